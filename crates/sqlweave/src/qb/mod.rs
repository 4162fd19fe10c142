//! Statement builders.
//!
//! Every builder is an immutable value: each setter consumes the builder and
//! returns an updated copy, and clones share their clause lists until one of
//! them appends. A builder can therefore be used as a base and forked freely.
//!
//! # Usage
//!
//! ```ignore
//! use sqlweave::{args, eq, qb, PlaceholderFormat};
//!
//! // SELECT
//! let (sql, args) = qb::select(["id", "name"])
//!     .from("users")
//!     .where_(eq("status", "active"))
//!     .order_by(["created_at DESC"])
//!     .limit(20)
//!     .placeholder_format(PlaceholderFormat::Dollar)
//!     .to_sql()?;
//!
//! // INSERT
//! qb::insert("users")
//!     .columns(["username", "email"])
//!     .values(args!["alice", "alice@example.com"])
//!     .suffix("RETURNING id", args![]);
//!
//! // UPDATE
//! qb::update("users").set("status", "inactive").where_(eq("id", 7));
//!
//! // DELETE
//! qb::delete("users").where_sql("id = ?", args![7]);
//! ```
//!
//! Nested statements are rendered with `?` markers and numbered once, by the
//! outermost statement's placeholder format.

mod cte;
mod delete;
mod insert;
mod select;
mod statement;
pub(crate) mod traits;
mod update;

pub use cte::CteBuilder;
pub use delete::DeleteBuilder;
pub use insert::InsertBuilder;
pub use select::{Direction, OrderCond, Paginator, SelectBuilder, TableAlias};
pub use statement::StatementBuilder;
pub use update::UpdateBuilder;

use crate::expr::CaseBuilder;
use crate::sqlizer::Part;

/// Start a SELECT with the given result columns.
pub fn select<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> SelectBuilder {
    SelectBuilder::new().columns(columns)
}

/// Start an INSERT into `table`.
pub fn insert(table: &str) -> InsertBuilder {
    InsertBuilder::new(table)
}

/// Start a REPLACE into `table`.
pub fn replace(table: &str) -> InsertBuilder {
    InsertBuilder::new(table).replace()
}

pub fn update(table: &str) -> UpdateBuilder {
    UpdateBuilder::new(table)
}

pub fn delete(from: &str) -> DeleteBuilder {
    DeleteBuilder::new(from)
}

/// Searched CASE: `CASE WHEN <cond> THEN ...`.
pub fn case() -> CaseBuilder {
    CaseBuilder::new()
}

/// Simple CASE: `CASE <what> WHEN <value> THEN ...`.
pub fn case_of(what: impl Into<Part>) -> CaseBuilder {
    CaseBuilder::new().what(what)
}

/// Start a WITH statement whose first expression is `name`.
pub fn with(name: &str) -> CteBuilder {
    CteBuilder::new(name)
}

pub fn with_recursive(name: &str) -> CteBuilder {
    CteBuilder::new(name).recursive(true)
}
