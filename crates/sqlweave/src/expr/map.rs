//! Column maps: `{column: value}` predicates joined with ` AND `.
//!
//! Keys are kept sorted so output is deterministic.

use super::{SQL_FALSE, SQL_TRUE};
use crate::arg::{Arg, ArgKind};
use crate::buf::SqlBuf;
use crate::error::{SqlError, SqlResult};
use crate::sqlizer::{Rendered, Sqlizer, impl_fragment};
use std::collections::BTreeMap;

macro_rules! column_map {
    ($($(#[$meta:meta])* $name:ident => $ctor:ident;)*) => {
        $(
            $(#[$meta])*
            #[derive(Clone, Debug, Default)]
            pub struct $name(BTreeMap<String, Arg>);

            impl $name {
                pub fn new() -> Self {
                    Self::default()
                }

                /// Add (or replace) one column.
                pub fn with(mut self, column: impl Into<String>, value: impl Into<Arg>) -> Self {
                    self.0.insert(column.into(), value.into());
                    self
                }

                pub fn is_empty(&self) -> bool {
                    self.0.is_empty()
                }
            }

            impl<K: Into<String>, V: Into<Arg>> FromIterator<(K, V)> for $name {
                fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
                    Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
                }
            }

            impl From<BTreeMap<String, Arg>> for $name {
                fn from(map: BTreeMap<String, Arg>) -> Self {
                    Self(map)
                }
            }

            /// Single-column shorthand.
            pub fn $ctor(column: impl Into<String>, value: impl Into<Arg>) -> $name {
                $name::new().with(column, value)
            }

            impl_fragment!($name);
        )*
    };
}

column_map! {
    /// `col = ?`, `col IS NULL`, `col IN (?,?)`, `col IN (<subquery>)`.
    Eq => eq;
    /// Negated [`Eq`]: `<>`, `IS NOT NULL`, `NOT IN`.
    NotEq => not_eq;
    /// [`Eq`] that first drops null, zero and empty values.
    EqNotEmpty => eq_not_empty;
    /// `col < ?`
    Lt => lt;
    /// `col <= ?`
    LtOrEq => lt_or_eq;
    /// `col > ?`
    Gt => gt;
    /// `col >= ?`
    GtOrEq => gt_or_eq;
    /// `col LIKE ?`
    Like => like;
    /// `col NOT LIKE ?`
    NotLike => not_like;
    /// `col ILIKE ?`
    ILike => ilike;
    /// `col NOT ILIKE ?`
    NotILike => not_ilike;
}

fn render_eq(map: &BTreeMap<String, Arg>, negate: bool) -> SqlResult<Rendered> {
    if map.is_empty() {
        return Ok((SQL_TRUE.to_string(), Vec::new()));
    }

    let (equal_opr, in_opr, null_opr, in_empty) = if negate {
        ("<>", "NOT IN", "IS NOT", SQL_TRUE)
    } else {
        ("=", "IN", "IS", SQL_FALSE)
    };

    let mut buf = SqlBuf::new();
    for (i, (column, value)) in map.iter().enumerate() {
        if i > 0 {
            buf.push(" AND ");
        }
        match value.classify()? {
            ArgKind::Null => {
                buf.push(&format!("{column} {null_opr} NULL"));
            }
            ArgKind::List(items) if items.is_empty() => {
                buf.push(in_empty);
            }
            ArgKind::List(items) => {
                buf.push(&format!("{column} {in_opr} ("))
                    .push_bind_list(items)
                    .push(")");
            }
            ArgKind::Subquery(sb) => {
                buf.push(&format!("{column} {in_opr} ("));
                buf.push_nested(sb)?;
                buf.push(")");
            }
            ArgKind::Fragment(fragment) => {
                buf.push(&format!("{column} {equal_opr} "));
                buf.push_nested(fragment)?;
            }
            ArgKind::Scalar(v) => {
                buf.push(&format!("{column} {equal_opr} ")).push_bind(v);
            }
        }
    }
    Ok(buf.finish())
}

/// `col <opr> ?` per column; nulls and lists are rejected with the given messages.
fn render_binary(
    map: &BTreeMap<String, Arg>,
    opr: &str,
    null_error: &str,
    list_error: &str,
) -> SqlResult<Rendered> {
    let mut buf = SqlBuf::new();
    for (i, (column, value)) in map.iter().enumerate() {
        if i > 0 {
            buf.push(" AND ");
        }
        match value.classify()? {
            ArgKind::Null => return Err(SqlError::invalid_argument(null_error)),
            ArgKind::List(_) => return Err(SqlError::invalid_argument(list_error)),
            ArgKind::Subquery(sb) => {
                buf.push(&format!("{column} {opr} ("));
                buf.push_nested(sb)?;
                buf.push(")");
            }
            ArgKind::Fragment(fragment) => {
                buf.push(&format!("{column} {opr} "));
                buf.push_nested(fragment)?;
            }
            ArgKind::Scalar(v) => {
                buf.push(&format!("{column} {opr} ")).push_bind(v);
            }
        }
    }
    Ok(buf.finish())
}

fn render_cmp(map: &BTreeMap<String, Arg>, opr: &str) -> SqlResult<Rendered> {
    render_binary(
        map,
        opr,
        "cannot use null with less than or greater than operators",
        "cannot use array or slice with less than or greater than operators",
    )
}

fn render_like(map: &BTreeMap<String, Arg>, opr: &str) -> SqlResult<Rendered> {
    render_binary(
        map,
        opr,
        "cannot use null with like operators",
        "cannot use array or slice with like operators",
    )
}

impl Sqlizer for Eq {
    fn to_sql(&self) -> SqlResult<Rendered> {
        render_eq(&self.0, false)
    }
}

impl Sqlizer for NotEq {
    fn to_sql(&self) -> SqlResult<Rendered> {
        render_eq(&self.0, true)
    }
}

impl Sqlizer for EqNotEmpty {
    fn to_sql(&self) -> SqlResult<Rendered> {
        let mut kept = BTreeMap::new();
        for (column, value) in &self.0 {
            let kept_value = match value {
                Arg::Fragment(_) | Arg::Select(_) => Some(value.clone()),
                Arg::Value(_) | Arg::Valuer(_) => value
                    .resolve_value()?
                    .and_then(|v| v.strip_empty())
                    .map(Arg::Value),
            };
            if let Some(v) = kept_value {
                kept.insert(column.clone(), v);
            }
        }
        render_eq(&kept, false)
    }
}

impl Sqlizer for Lt {
    fn to_sql(&self) -> SqlResult<Rendered> {
        render_cmp(&self.0, "<")
    }
}

impl Sqlizer for LtOrEq {
    fn to_sql(&self) -> SqlResult<Rendered> {
        render_cmp(&self.0, "<=")
    }
}

impl Sqlizer for Gt {
    fn to_sql(&self) -> SqlResult<Rendered> {
        render_cmp(&self.0, ">")
    }
}

impl Sqlizer for GtOrEq {
    fn to_sql(&self) -> SqlResult<Rendered> {
        render_cmp(&self.0, ">=")
    }
}

impl Sqlizer for Like {
    fn to_sql(&self) -> SqlResult<Rendered> {
        render_like(&self.0, "LIKE")
    }
}

impl Sqlizer for NotLike {
    fn to_sql(&self) -> SqlResult<Rendered> {
        render_like(&self.0, "NOT LIKE")
    }
}

impl Sqlizer for ILike {
    fn to_sql(&self) -> SqlResult<Rendered> {
        render_like(&self.0, "ILIKE")
    }
}

impl Sqlizer for NotILike {
    fn to_sql(&self) -> SqlResult<Rendered> {
        render_like(&self.0, "NOT ILIKE")
    }
}
