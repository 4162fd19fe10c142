//! INSERT / REPLACE statement builder.

use crate::arg::Arg;
use crate::buf::SqlBuf;
use crate::clauses::Clauses;
use crate::error::{SqlError, SqlResult};
use crate::expr::expr;
use crate::placeholder::PlaceholderFormat;
use crate::qb::select::SelectBuilder;
use crate::qb::traits::{Statement, impl_statement};
use crate::sqlizer::{Part, Rendered};
use std::collections::BTreeMap;

/// INSERT statement builder.
///
/// Each VALUES cell is either bound to a placeholder or, for fragments,
/// rendered in place. A SELECT source replaces the VALUES list entirely.
#[derive(Clone, Debug, Default)]
pub struct InsertBuilder {
    format: PlaceholderFormat,
    prefixes: Clauses<Part>,
    keyword: Option<&'static str>,
    options: Clauses<String>,
    table: String,
    columns: Clauses<String>,
    values: Clauses<Vec<Arg>>,
    select: Option<SelectBuilder>,
    suffixes: Clauses<Part>,
}

impl InsertBuilder {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            ..Self::default()
        }
    }

    pub fn placeholder_format(mut self, format: PlaceholderFormat) -> Self {
        self.format = format;
        self
    }

    /// Use `REPLACE` instead of `INSERT`.
    pub fn replace(mut self) -> Self {
        self.keyword = Some("REPLACE");
        self
    }

    pub fn prefix<A: Into<Arg>>(self, sql: &str, args: impl IntoIterator<Item = A>) -> Self {
        self.prefix_expr(expr(sql, args))
    }

    pub fn prefix_expr(mut self, e: impl Into<Part>) -> Self {
        self.prefixes.push(e.into());
        self
    }

    /// Keywords between `INSERT` and `INTO`, e.g. `IGNORE`.
    pub fn options<S: Into<String>>(mut self, options: impl IntoIterator<Item = S>) -> Self {
        self.options.extend(options.into_iter().map(Into::into));
        self
    }

    /// Target table (`INTO <table>`).
    pub fn table(mut self, table: &str) -> Self {
        self.table = table.to_string();
        self
    }

    pub fn columns<S: Into<String>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
        self.columns.extend(columns.into_iter().map(Into::into));
        self
    }

    /// Append one VALUES row. Use [`args!`](crate::args) for mixed cells.
    pub fn values<A: Into<Arg>>(mut self, row: impl IntoIterator<Item = A>) -> Self {
        self.values.push(row.into_iter().map(Into::into).collect());
        self
    }

    /// Replace columns and values with a single row from `clauses`, sorted by column.
    pub fn set_map<K: Into<String>, V: Into<Arg>>(
        mut self,
        clauses: impl IntoIterator<Item = (K, V)>,
    ) -> Self {
        let sorted: BTreeMap<String, Arg> = clauses
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let (columns, row): (Vec<String>, Vec<Arg>) = sorted.into_iter().unzip();

        self.columns.clear();
        self.columns.extend(columns);
        self.values.clear();
        self.values.push(row);
        self
    }

    /// `INSERT ... SELECT`. Takes precedence over VALUES.
    pub fn select(mut self, sb: SelectBuilder) -> Self {
        self.select = Some(sb);
        self
    }

    pub fn suffix<A: Into<Arg>>(self, sql: &str, args: impl IntoIterator<Item = A>) -> Self {
        self.suffix_expr(expr(sql, args))
    }

    pub fn suffix_expr(mut self, e: impl Into<Part>) -> Self {
        self.suffixes.push(e.into());
        self
    }

    fn build_insert(&self) -> SqlResult<Rendered> {
        if self.table.is_empty() {
            return Err(SqlError::validation("insert statements must specify a table"));
        }
        if self.values.is_empty() && self.select.is_none() {
            return Err(SqlError::validation(
                "insert statements must have at least one set of values or select clause",
            ));
        }

        let mut buf = SqlBuf::new();

        if buf.push_list(&self.prefixes, " ")? {
            buf.push(" ");
        }

        buf.push(self.keyword.unwrap_or("INSERT")).push(" ");
        if !self.options.is_empty() {
            buf.push(&self.options.join(" ")).push(" ");
        }
        buf.push("INTO ").push(&self.table).push(" ");

        if !self.columns.is_empty() {
            buf.push("(").push(&self.columns.join(",")).push(") ");
        }

        match &self.select {
            Some(sb) => {
                buf.push_nested(sb)?;
            }
            None => self.push_values(&mut buf)?,
        }

        buf.push_clause(" ", &self.suffixes, " ")?;

        Ok(buf.finish())
    }

    fn push_values(&self, buf: &mut SqlBuf) -> SqlResult<()> {
        buf.push("VALUES ");
        for (r, row) in self.values.iter().enumerate() {
            if r > 0 {
                buf.push(",");
            }
            buf.push("(");
            for (c, cell) in row.iter().enumerate() {
                if c > 0 {
                    buf.push(",");
                }
                match cell.as_fragment() {
                    Some(fragment) => {
                        buf.push_nested(fragment)?;
                    }
                    None => {
                        if let Some(v) = cell.resolve_value()? {
                            buf.push_bind(v);
                        }
                    }
                }
            }
            buf.push(")");
        }
        Ok(())
    }
}

impl Statement for InsertBuilder {
    const KIND: &'static str = "insert";

    fn format(&self) -> PlaceholderFormat {
        self.format
    }

    fn build_raw(&self) -> SqlResult<Rendered> {
        self.build_insert()
    }
}

impl_statement!(InsertBuilder);

impl From<InsertBuilder> for Arg {
    fn from(ib: InsertBuilder) -> Self {
        Arg::Fragment(Part::new(ib))
    }
}
