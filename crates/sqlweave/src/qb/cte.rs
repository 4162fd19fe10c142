//! `WITH ... AS (...)` statement builder.

use crate::arg::Arg;
use crate::buf::SqlBuf;
use crate::clauses::Clauses;
use crate::error::{SqlError, SqlResult};
use crate::expr::cte;
use crate::placeholder::PlaceholderFormat;
use crate::qb::delete::DeleteBuilder;
use crate::qb::insert::InsertBuilder;
use crate::qb::select::SelectBuilder;
use crate::qb::traits::{Statement, impl_statement};
use crate::qb::update::UpdateBuilder;
use crate::sqlizer::{Part, Rendered};

/// Common table expressions followed by one final statement.
///
/// ```ignore
/// with("lab")
///     .as_select(select(["col"]).from("tab"))
///     .cte("lab_2")
///     .as_select(select(["col"]).from("tab_2"))
///     .select(select(["col"]).from("lab"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct CteBuilder {
    format: PlaceholderFormat,
    recursive: bool,
    current_name: String,
    ctes: Clauses<Part>,
    statement: Option<Part>,
}

impl CteBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            current_name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn placeholder_format(mut self, format: PlaceholderFormat) -> Self {
        self.format = format;
        self
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Name the next common table expression.
    pub fn cte(mut self, name: &str) -> Self {
        self.current_name = name.to_string();
        self
    }

    /// Body of the current common table expression.
    pub fn as_select(mut self, sub: SelectBuilder) -> Self {
        self.ctes.push(cte(sub, self.current_name.as_str()).into());
        self
    }

    pub fn select(self, statement: SelectBuilder) -> Self {
        self.statement(statement)
    }

    pub fn insert(self, statement: InsertBuilder) -> Self {
        self.statement(statement)
    }

    /// Same as [`insert`](Self::insert); pass a builder made with `replace()`.
    pub fn replace(self, statement: InsertBuilder) -> Self {
        self.statement(statement)
    }

    pub fn update(self, statement: UpdateBuilder) -> Self {
        self.statement(statement)
    }

    pub fn delete(self, statement: DeleteBuilder) -> Self {
        self.statement(statement)
    }

    fn statement(mut self, statement: impl Into<Part>) -> Self {
        self.statement = Some(statement.into());
        self
    }

    fn build_cte(&self) -> SqlResult<Rendered> {
        if self.ctes.is_empty() {
            return Err(SqlError::validation(
                "common table expressions statements must have at least one label and subquery",
            ));
        }
        let Some(statement) = &self.statement else {
            return Err(SqlError::validation(
                "common table expressions must have a final statement (select, insert, replace, update, delete)",
            ));
        };

        let mut buf = SqlBuf::new();
        buf.push("WITH ");
        if self.recursive {
            buf.push("RECURSIVE ");
        }
        buf.push_list(&self.ctes, ", ")?;
        buf.push(" ");
        buf.push_nested(statement)?;

        Ok(buf.finish())
    }
}

impl Statement for CteBuilder {
    const KIND: &'static str = "with";

    fn format(&self) -> PlaceholderFormat {
        self.format
    }

    fn build_raw(&self) -> SqlResult<Rendered> {
        self.build_cte()
    }
}

impl_statement!(CteBuilder);

impl From<CteBuilder> for Arg {
    fn from(cb: CteBuilder) -> Self {
        Arg::Fragment(Part::new(cb))
    }
}
