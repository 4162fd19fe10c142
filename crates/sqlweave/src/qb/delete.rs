//! DELETE statement builder.

use crate::arg::Arg;
use crate::buf::SqlBuf;
use crate::clauses::Clauses;
use crate::error::{SqlError, SqlResult};
use crate::expr::expr;
use crate::placeholder::PlaceholderFormat;
use crate::qb::traits::{Statement, impl_statement};
use crate::sqlizer::{Part, Rendered};

/// DELETE statement builder.
#[derive(Clone, Debug, Default)]
pub struct DeleteBuilder {
    format: PlaceholderFormat,
    prefixes: Clauses<Part>,
    from: String,
    where_parts: Clauses<Part>,
    order_bys: Clauses<String>,
    limit: Option<u64>,
    offset: Option<u64>,
    suffixes: Clauses<Part>,
}

impl DeleteBuilder {
    pub fn new(from: &str) -> Self {
        Self {
            from: from.to_string(),
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

    pub fn from(mut self, from: &str) -> Self {
        self.from = from.to_string();
        self
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

    fn build_delete(&self) -> SqlResult<Rendered> {
        if self.from.is_empty() {
            return Err(SqlError::validation(
                "delete statements must specify a From table",
            ));
        }

        let mut buf = SqlBuf::new();

        if buf.push_list(&self.prefixes, " ")? {
            buf.push(" ");
        }

        buf.push("DELETE FROM ").push(&self.from);
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

impl Statement for DeleteBuilder {
    const KIND: &'static str = "delete";

    fn format(&self) -> PlaceholderFormat {
        self.format
    }

    fn build_raw(&self) -> SqlResult<Rendered> {
        self.build_delete()
    }
}

impl_statement!(DeleteBuilder);

impl From<DeleteBuilder> for Arg {
    fn from(db: DeleteBuilder) -> Self {
        Arg::Fragment(Part::new(db))
    }
}
