//! UPDATE statement builder.

use crate::arg::Arg;
use crate::buf::SqlBuf;
use crate::clauses::Clauses;
use crate::error::{SqlError, SqlResult};
use crate::expr::{alias, expr};
use crate::placeholder::PlaceholderFormat;
use crate::qb::select::SelectBuilder;
use crate::qb::traits::{Statement, impl_statement};
use crate::sqlizer::{Part, Rendered};
use std::collections::BTreeMap;

/// UPDATE statement builder.
///
/// A SET value is bound as `col = ?`, a SELECT renders as `col = (<sub>)`
/// and any other fragment renders in place: `col = <expr>`.
#[derive(Clone, Debug, Default)]
pub struct UpdateBuilder {
    format: PlaceholderFormat,
    prefixes: Clauses<Part>,
    table: String,
    set_clauses: Clauses<(String, Arg)>,
    from: Part,
    where_parts: Clauses<Part>,
    order_bys: Clauses<String>,
    limit: Option<u64>,
    offset: Option<u64>,
    suffixes: Clauses<Part>,
}

impl UpdateBuilder {
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

    pub fn prefix<A: Into<Arg>>(self, sql: &str, args: impl IntoIterator<Item = A>) -> Self {
        self.prefix_expr(expr(sql, args))
    }

    pub fn prefix_expr(mut self, e: impl Into<Part>) -> Self {
        self.prefixes.push(e.into());
        self
    }

    pub fn table(mut self, table: &str) -> Self {
        self.table = table.to_string();
        self
    }

    // ==================== SET ====================

    /// Set a column value.
    pub fn set(mut self, column: &str, value: impl Into<Arg>) -> Self {
        self.set_clauses.push((column.to_string(), value.into()));
        self
    }

    /// Set several columns, in column name order.
    pub fn set_map<K: Into<String>, V: Into<Arg>>(
        mut self,
        clauses: impl IntoIterator<Item = (K, V)>,
    ) -> Self {
        let sorted: BTreeMap<String, Arg> = clauses
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.set_clauses.extend(sorted);
        self
    }

    // ==================== FROM / WHERE ====================

    pub fn from(mut self, from: impl Into<Part>) -> Self {
        self.from = from.into();
        self
    }

    /// `FROM (<sub>) AS <alias>`
    pub fn from_select(self, sub: SelectBuilder, alias_name: &str) -> Self {
        self.from(alias(sub, alias_name))
    }

    pub fn where_(mut self, pred: impl Into<Part>) -> Self {
        let part = pred.into();
        if !part.is_empty() {
            self.where_parts.push(part);
        }
        self
    }

    pub fn where_sql<A: Into<Arg>>(self, sql: &str, args: impl IntoIterator<Item = A>) -> Self {
        if sql.is_empty() {
            return self;
        }
        self.where_(expr(sql, args))
    }

    pub fn order_by<S: Into<String>>(mut self, order_bys: impl IntoIterator<Item = S>) -> Self {
        self.order_bys.extend(order_bys.into_iter().map(Into::into));
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn suffix<A: Into<Arg>>(self, sql: &str, args: impl IntoIterator<Item = A>) -> Self {
        self.suffix_expr(expr(sql, args))
    }

    pub fn suffix_expr(mut self, e: impl Into<Part>) -> Self {
        self.suffixes.push(e.into());
        self
    }

    pub(crate) fn where_parts(mut self, parts: &[Part]) -> Self {
        self.where_parts.extend(parts.iter().cloned());
        self
    }

    fn build_update(&self) -> SqlResult<Rendered> {
        if self.table.is_empty() {
            return Err(SqlError::validation("update statements must specify a table"));
        }
        if self.set_clauses.is_empty() {
            return Err(SqlError::validation(
                "update statements must have at least one Set clause",
            ));
        }

        let mut buf = SqlBuf::new();

        if buf.push_list(&self.prefixes, " ")? {
            buf.push(" ");
        }

        buf.push("UPDATE ").push(&self.table).push(" SET ");
        for (i, (column, value)) in self.set_clauses.iter().enumerate() {
            if i > 0 {
                buf.push(", ");
            }
            buf.push(column).push(" = ");
            match value {
                Arg::Select(sb) => {
                    buf.push("(");
                    buf.push_nested(sb)?;
                    buf.push(")");
                }
                Arg::Fragment(fragment) => {
                    buf.push_nested(fragment)?;
                }
                Arg::Value(_) | Arg::Valuer(_) => {
                    if let Some(v) = value.resolve_value()? {
                        buf.push_bind(v);
                    }
                }
            }
        }

        buf.push_clause(" FROM ", std::slice::from_ref(&self.from), "")?;
        buf.push_clause(" WHERE ", &self.where_parts, " AND ")?;

        if !self.order_bys.is_empty() {
            buf.push(" ORDER BY ").push(&self.order_bys.join(", "));
        }
        if let Some(limit) = self.limit {
            buf.push(&format!(" LIMIT {limit}"));
        }
        if let Some(offset) = self.offset {
            buf.push(&format!(" OFFSET {offset}"));
        }

        buf.push_clause(" ", &self.suffixes, " ")?;

        Ok(buf.finish())
    }
}

impl Statement for UpdateBuilder {
    const KIND: &'static str = "update";

    fn format(&self) -> PlaceholderFormat {
        self.format
    }

    fn build_raw(&self) -> SqlResult<Rendered> {
        self.build_update()
    }
}

impl_statement!(UpdateBuilder);

impl From<UpdateBuilder> for Arg {
    fn from(ub: UpdateBuilder) -> Self {
        Arg::Fragment(Part::new(ub))
    }
}
