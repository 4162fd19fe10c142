//! # sqlweave
//!
//! A fluent, immutable SQL statement builder.
//!
//! ## Features
//!
//! - **Immutable builders**: every setter returns a new builder; forks share clause lists
//! - **Composable fragments**: predicates, CASE, aggregates and whole statements nest anywhere
//! - **One numbering pass**: nested statements render with `?` and are numbered once, by the outermost statement
//! - **Dialects**: `?`, `$n`, `:n` and `@pn` placeholders
//! - **Typed arguments**: a closed [`Value`] enum, bindable through `tokio-postgres` with the `postgres` feature
//! - **Tracing**: rendered statements are reported on the `sqlweave.sql` target (`tracing` feature, on by default)
//!
//! ## Example
//!
//! ```ignore
//! use sqlweave::{args, eq, exists, select, PlaceholderFormat, Sqlizer};
//!
//! let active = select(["1"]).from("orders").where_sql("orders.user_id = users.id AND total > ?", args![100]);
//!
//! let (sql, args) = select(["id", "name"])
//!     .from("users")
//!     .where_(eq("status", "active"))
//!     .where_(exists(active))
//!     .placeholder_format(PlaceholderFormat::Dollar)
//!     .to_sql()?;
//!
//! assert_eq!(
//!     sql,
//!     "SELECT id, name FROM users WHERE status = $1 AND EXISTS (SELECT 1 FROM orders \
//!      WHERE orders.user_id = users.id AND total > $2)"
//! );
//! assert_eq!(args.len(), 2);
//! ```

mod arg;
mod buf;
mod clauses;
mod debug;
pub mod error;
pub mod expr;
mod placeholder;
pub mod qb;
mod sqlizer;
pub mod value;

pub use arg::Arg;
pub use debug::debug_sqlizer;
pub use error::{SqlError, SqlResult};
pub use placeholder::{PlaceholderFormat, placeholders};
pub use sqlizer::{Part, RawSqlizer, Rendered, Sqlizer, nested_to_sql};
pub use value::{Valuer, Value};

pub use expr::{
    Alias, And, CaseBuilder, Coalesce, Compare, Concat, Cte, Eq, EqNotEmpty, Expr, Func, Gt,
    GtOrEq, ILike, In, Like, Lt, LtOrEq, NotEq, NotILike, NotLike, Or, Range, alias, avg,
    coalesce, concat, count, cte, eq, eq_not_empty, equal, exists, expr, greater,
    greater_or_equal, gt, gt_or_eq, ilike, in_, less, less_or_equal, like, lt, lt_or_eq, max,
    min, not, not_eq, not_equal, not_exists, not_ilike, not_in, not_like, range, sum,
};

pub use qb::{
    CteBuilder, DeleteBuilder, Direction, InsertBuilder, OrderCond, Paginator, SelectBuilder,
    StatementBuilder, TableAlias, UpdateBuilder, case, case_of, delete, insert, replace, select,
    update, with, with_recursive,
};
