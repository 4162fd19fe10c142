//! Expression fragments for WHERE, HAVING, column and SET positions.
//!
//! Every type here implements [`Sqlizer`] and converts into a [`Part`], so it
//! can be passed to any builder method that takes a predicate or column.

mod case;
mod func;
mod map;

pub use case::CaseBuilder;
pub use func::{
    Coalesce, Compare, Func, In, Range, avg, coalesce, count, equal, exists, greater,
    greater_or_equal, in_, less, less_or_equal, max, min, not_equal, not_exists, not_in, range,
    sum,
};
pub use map::{
    Eq, EqNotEmpty, Gt, GtOrEq, ILike, Like, Lt, LtOrEq, NotEq, NotILike, NotLike, eq,
    eq_not_empty, gt, gt_or_eq, ilike, like, lt, lt_or_eq, not_eq, not_ilike, not_like,
};

use crate::arg::Arg;
use crate::buf::SqlBuf;
use crate::error::{SqlError, SqlResult};
use crate::sqlizer::{Part, Rendered, Sqlizer, impl_fragment, nested_to_sql};
use crate::value::Value;

/// Always true.
pub(crate) const SQL_TRUE: &str = "(1=1)";
/// Always false.
pub(crate) const SQL_FALSE: &str = "(1=0)";

/// A SQL snippet with positional arguments.
///
/// Fragment arguments are rendered in place of their `?`; value arguments are
/// bound to it. `??` is an escaped literal `?` and consumes no argument.
#[derive(Clone, Debug)]
pub struct Expr {
    sql: String,
    args: Vec<Arg>,
}

/// Build an [`Expr`].
///
/// ```ignore
/// let e = expr("FROM_UNIXTIME(?)", args![t]);
/// let nested = expr("EXISTS(?)", args![select(["1"]).from("t")]);
/// ```
pub fn expr<A: Into<Arg>>(sql: impl Into<String>, args: impl IntoIterator<Item = A>) -> Expr {
    Expr {
        sql: sql.into(),
        args: args.into_iter().map(Into::into).collect(),
    }
}

impl Expr {
    /// SQL with no arguments.
    pub fn raw(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            args: Vec::new(),
        }
    }

    fn bound_args(&self) -> SqlResult<Vec<Value>> {
        let mut values = Vec::with_capacity(self.args.len());
        for arg in &self.args {
            if let Some(v) = arg.resolve_value()? {
                values.push(v);
            }
        }
        Ok(values)
    }
}

impl Sqlizer for Expr {
    fn to_sql(&self) -> SqlResult<Rendered> {
        if self.args.iter().all(|a| a.as_fragment().is_none()) {
            return Ok((self.sql.clone(), self.bound_args()?));
        }

        let mut buf = SqlBuf::new();
        let mut rest = self.sql.as_str();
        let mut pending = self.args.as_slice();

        while let Some((arg, tail)) = pending.split_first() {
            let Some(i) = rest.find('?') else {
                break;
            };
            if rest[i + 1..].starts_with('?') {
                buf.push(&rest[..i + 2]);
                rest = &rest[i + 2..];
                continue;
            }
            match arg.as_fragment() {
                Some(fragment) => {
                    buf.push(&rest[..i]);
                    buf.push_nested(fragment)?;
                }
                None => {
                    buf.push(&rest[..=i]);
                    if let Some(v) = arg.resolve_value()? {
                        buf.push_arg(v);
                    }
                }
            }
            rest = &rest[i + 1..];
            pending = tail;
        }
        buf.push(rest);

        for arg in pending {
            match arg.resolve_value()? {
                Some(v) => {
                    buf.push_arg(v);
                }
                None => {
                    return Err(SqlError::invalid_argument(format!(
                        "fragment argument has no placeholder in {:?}",
                        self.sql
                    )));
                }
            }
        }
        Ok(buf.finish())
    }
}

/// Text and fragments concatenated without separators.
#[derive(Clone, Debug)]
pub struct Concat(Vec<Arg>);

/// Concatenate text pieces and fragments.
///
/// Any other value is rejected when rendered.
pub fn concat<A: Into<Arg>>(parts: impl IntoIterator<Item = A>) -> Concat {
    Concat(parts.into_iter().map(Into::into).collect())
}

impl Sqlizer for Concat {
    fn to_sql(&self) -> SqlResult<Rendered> {
        let mut buf = SqlBuf::new();
        for part in &self.0 {
            if let Some(fragment) = part.as_fragment() {
                buf.push_nested(fragment)?;
                continue;
            }
            match part.resolve_value()? {
                Some(Value::Text(text)) => {
                    buf.push(&text);
                }
                Some(other) => {
                    return Err(SqlError::invalid_argument(format!(
                        "{other} is not a string or Sqlizer"
                    )));
                }
                None => {}
            }
        }
        Ok(buf.finish())
    }
}

/// `(<expr>) AS <alias>`
#[derive(Clone, Debug)]
pub struct Alias {
    expr: Part,
    alias: String,
}

pub fn alias(expr: impl Into<Part>, alias: impl Into<String>) -> Alias {
    Alias {
        expr: expr.into(),
        alias: alias.into(),
    }
}

impl Sqlizer for Alias {
    fn to_sql(&self) -> SqlResult<Rendered> {
        let (sql, args) = nested_to_sql(&self.expr)?;
        Ok((format!("({sql}) AS {}", self.alias), args))
    }
}

/// `<name> AS (<expr>)`, one entry of a WITH list.
#[derive(Clone, Debug)]
pub struct Cte {
    expr: Part,
    name: String,
}

pub fn cte(expr: impl Into<Part>, name: impl Into<String>) -> Cte {
    Cte {
        expr: expr.into(),
        name: name.into(),
    }
}

impl Sqlizer for Cte {
    fn to_sql(&self) -> SqlResult<Rendered> {
        let (sql, args) = nested_to_sql(&self.expr)?;
        Ok((format!("{} AS ({sql})", self.name), args))
    }
}

// ==================== AND / OR / NOT ====================

fn join_conj(parts: &[Part], sep: &str, identity: &str) -> SqlResult<Rendered> {
    if parts.is_empty() {
        return Ok((identity.to_string(), Vec::new()));
    }
    let mut buf = SqlBuf::new();
    if !buf.push_list(parts, sep)? {
        return Ok((String::new(), Vec::new()));
    }
    let (sql, args) = buf.finish();
    Ok((format!("({sql})"), args))
}

/// Members joined with ` AND `. Empty renders `(1=1)`.
#[derive(Clone, Debug, Default)]
pub struct And(Vec<Part>);

/// Members joined with ` OR `. Empty renders `(1=0)`.
#[derive(Clone, Debug, Default)]
pub struct Or(Vec<Part>);

impl And {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, e: impl Into<Part>) -> Self {
        self.0.push(e.into());
        self
    }
}

impl Or {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, e: impl Into<Part>) -> Self {
        self.0.push(e.into());
        self
    }
}

impl From<Vec<Part>> for And {
    fn from(parts: Vec<Part>) -> Self {
        Self(parts)
    }
}

impl From<Vec<Part>> for Or {
    fn from(parts: Vec<Part>) -> Self {
        Self(parts)
    }
}

impl Sqlizer for And {
    fn to_sql(&self) -> SqlResult<Rendered> {
        join_conj(&self.0, " AND ", SQL_TRUE)
    }
}

impl Sqlizer for Or {
    fn to_sql(&self) -> SqlResult<Rendered> {
        join_conj(&self.0, " OR ", SQL_FALSE)
    }
}

/// Conjunction of fragments: `and![eq("a", 1), "b IS NOT NULL"]`.
#[macro_export]
macro_rules! and {
    () => {
        $crate::And::new()
    };
    ($($e:expr),+ $(,)?) => {
        $crate::And::from(::std::vec![$($crate::Part::from($e)),+])
    };
}

/// Disjunction of fragments: `or![eq("a", 1), eq("b", 2)]`.
#[macro_export]
macro_rules! or {
    () => {
        $crate::Or::new()
    };
    ($($e:expr),+ $(,)?) => {
        $crate::Or::from(::std::vec![$($crate::Part::from($e)),+])
    };
}

#[derive(Clone, Debug)]
struct NotExpr(Part);

/// `NOT (<expr>)`. Negating a negation returns the inner fragment.
pub fn not(e: impl Into<Part>) -> Part {
    let part = e.into();
    if let Some(inner) = part.negated() {
        return inner;
    }
    Part::new(NotExpr(part))
}

impl Sqlizer for NotExpr {
    fn to_sql(&self) -> SqlResult<Rendered> {
        let (sql, args) = nested_to_sql(&self.0)?;
        if sql.is_empty() {
            return Ok((sql, args));
        }
        Ok((format!("NOT ({sql})"), args))
    }

    fn negated(&self) -> Option<Part> {
        Some(self.0.clone())
    }
}

impl_fragment!(Expr, Concat, Alias, Cte, And, Or);
