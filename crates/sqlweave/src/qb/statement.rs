//! Shared defaults for a family of statements.

use crate::arg::Arg;
use crate::clauses::Clauses;
use crate::expr::{CaseBuilder, expr};
use crate::placeholder::PlaceholderFormat;
use crate::qb::cte::CteBuilder;
use crate::qb::delete::DeleteBuilder;
use crate::qb::insert::InsertBuilder;
use crate::qb::select::SelectBuilder;
use crate::qb::update::UpdateBuilder;
use crate::sqlizer::Part;

/// Starts statements with a common placeholder format and WHERE parts.
///
/// SELECT, UPDATE and DELETE statements inherit the WHERE parts; every
/// statement inherits the format.
///
/// ```ignore
/// let pg = StatementBuilder::new().placeholder_format(PlaceholderFormat::Dollar);
/// let (sql, _) = pg.select(["id"]).from("users").where_(eq("id", 1)).to_sql()?;
/// assert_eq!(sql, "SELECT id FROM users WHERE id = $1");
/// ```
#[derive(Clone, Debug, Default)]
pub struct StatementBuilder {
    format: PlaceholderFormat,
    where_parts: Clauses<Part>,
}

impl StatementBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn placeholder_format(mut self, format: PlaceholderFormat) -> Self {
        self.format = format;
        self
    }

    /// Add a WHERE predicate inherited by every SELECT, UPDATE and DELETE.
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

    pub fn select<S: Into<String>>(&self, columns: impl IntoIterator<Item = S>) -> SelectBuilder {
        SelectBuilder::new()
            .placeholder_format(self.format)
            .where_parts(&self.where_parts)
            .columns(columns)
    }

    pub fn insert(&self, table: &str) -> InsertBuilder {
        InsertBuilder::new(table).placeholder_format(self.format)
    }

    pub fn replace(&self, table: &str) -> InsertBuilder {
        self.insert(table).replace()
    }

    pub fn update(&self, table: &str) -> UpdateBuilder {
        UpdateBuilder::new(table)
            .placeholder_format(self.format)
            .where_parts(&self.where_parts)
    }

    pub fn delete(&self, from: &str) -> DeleteBuilder {
        DeleteBuilder::new(from)
            .placeholder_format(self.format)
            .where_parts(&self.where_parts)
    }

    pub fn with(&self, name: &str) -> CteBuilder {
        CteBuilder::new(name).placeholder_format(self.format)
    }

    pub fn with_recursive(&self, name: &str) -> CteBuilder {
        self.with(name).recursive(true)
    }

    /// CASE expressions carry no format of their own.
    pub fn case(&self) -> CaseBuilder {
        CaseBuilder::new()
    }
}
