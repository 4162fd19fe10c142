//! Function wrappers, IN, ranges and subquery comparisons.

use crate::arg::{Arg, ArgKind};
use crate::buf::SqlBuf;
use crate::error::SqlResult;
use crate::sqlizer::{Part, Rendered, Sqlizer, impl_fragment, nested_to_sql};
use crate::value::Value;

/// `NAME(<expr>)`, or `NAME (<expr>)` for EXISTS.
#[derive(Clone, Debug)]
pub struct Func {
    name: &'static str,
    spaced: bool,
    inner: Part,
}

impl Func {
    fn new(name: &'static str, inner: impl Into<Part>) -> Self {
        Self {
            name,
            spaced: false,
            inner: inner.into(),
        }
    }

    fn spaced(name: &'static str, inner: impl Into<Part>) -> Self {
        Self {
            spaced: true,
            ..Self::new(name, inner)
        }
    }
}

impl Sqlizer for Func {
    fn to_sql(&self) -> SqlResult<Rendered> {
        let (sql, args) = nested_to_sql(&self.inner)?;
        let sep = if self.spaced { " " } else { "" };
        Ok((format!("{}{sep}({sql})", self.name), args))
    }
}

pub fn sum(e: impl Into<Part>) -> Func {
    Func::new("SUM", e)
}

pub fn count(e: impl Into<Part>) -> Func {
    Func::new("COUNT", e)
}

pub fn min(e: impl Into<Part>) -> Func {
    Func::new("MIN", e)
}

pub fn max(e: impl Into<Part>) -> Func {
    Func::new("MAX", e)
}

pub fn avg(e: impl Into<Part>) -> Func {
    Func::new("AVG", e)
}

pub fn exists(e: impl Into<Part>) -> Func {
    Func::spaced("EXISTS", e)
}

pub fn not_exists(e: impl Into<Part>) -> Func {
    Func::spaced("NOT EXISTS", e)
}

/// Single-column membership test.
///
/// | value                 | IN                 | NOT IN              |
/// |-----------------------|--------------------|---------------------|
/// | fragment / subquery   | `col IN (<sql>)`   | `col NOT IN (<sql>)`|
/// | empty list            | nothing            | nothing             |
/// | one-element list      | `col=?`            | `col<>?`            |
/// | longer list           | `col=ANY(?)`       | `col<>ALL(?)`       |
/// | scalar                | `col=?`            | `col<>?`            |
///
/// Longer lists bind as a single array argument.
#[derive(Clone, Debug)]
pub struct In {
    column: String,
    value: Arg,
    negate: bool,
}

pub fn in_(column: impl Into<String>, value: impl Into<Arg>) -> In {
    In {
        column: column.into(),
        value: value.into(),
        negate: false,
    }
}

pub fn not_in(column: impl Into<String>, value: impl Into<Arg>) -> In {
    In {
        negate: true,
        ..in_(column, value)
    }
}

impl Sqlizer for In {
    fn to_sql(&self) -> SqlResult<Rendered> {
        let column = &self.column;
        let (eq_opr, in_opr, list_opr) = if self.negate {
            ("<>", "NOT IN", "<>ALL")
        } else {
            ("=", "IN", "=ANY")
        };

        let mut buf = SqlBuf::new();
        match self.value.classify()? {
            ArgKind::Fragment(fragment) => push_subquery(&mut buf, column, in_opr, fragment)?,
            ArgKind::Subquery(sb) => push_subquery(&mut buf, column, in_opr, sb)?,
            ArgKind::List(mut items) => match items.len() {
                0 => {}
                1 => {
                    let first = items.swap_remove(0);
                    buf.push(&format!("{column}{eq_opr}")).push_bind(first);
                }
                _ => {
                    buf.push(&format!("{column}{list_opr}("))
                        .push_bind(Value::Array(items))
                        .push(")");
                }
            },
            ArgKind::Null => {
                buf.push(&format!("{column}{eq_opr}")).push_bind(Value::Null);
            }
            ArgKind::Scalar(v) => {
                buf.push(&format!("{column}{eq_opr}")).push_bind(v);
            }
        }
        Ok(buf.finish())
    }
}

fn push_subquery(buf: &mut SqlBuf, column: &str, opr: &str, sub: &dyn Sqlizer) -> SqlResult<()> {
    let (sql, args) = nested_to_sql(sub)?;
    if !sql.is_empty() {
        buf.push(&format!("{column} {opr} ("))
            .push_rendered((sql, args))
            .push(")");
    }
    Ok(())
}

/// `col BETWEEN ? AND ?`, or a one-sided bound.
///
/// Null and zero bounds count as absent; with both absent nothing renders.
#[derive(Clone, Debug)]
pub struct Range {
    column: String,
    start: Value,
    end: Value,
}

pub fn range(column: impl Into<String>, start: impl Into<Value>, end: impl Into<Value>) -> Range {
    Range {
        column: column.into(),
        start: start.into(),
        end: end.into(),
    }
}

impl Sqlizer for Range {
    fn to_sql(&self) -> SqlResult<Rendered> {
        let column = &self.column;
        let mut buf = SqlBuf::new();
        match (!self.start.is_zero(), !self.end.is_zero()) {
            (true, true) => {
                buf.push(&format!("{column} BETWEEN "))
                    .push_bind(self.start.clone())
                    .push(" AND ")
                    .push_bind(self.end.clone());
            }
            (true, false) => {
                buf.push(&format!("{column} >= ")).push_bind(self.start.clone());
            }
            (false, true) => {
                buf.push(&format!("{column} <= ")).push_bind(self.end.clone());
            }
            (false, false) => {}
        }
        Ok(buf.finish())
    }
}

/// `(<subquery>) <op> ?`
#[derive(Clone, Debug)]
pub struct Compare {
    sub: Part,
    op: &'static str,
    value: Value,
}

fn compare(sub: impl Into<Part>, op: &'static str, value: impl Into<Value>) -> Compare {
    Compare {
        sub: sub.into(),
        op,
        value: value.into(),
    }
}

pub fn equal(sub: impl Into<Part>, value: impl Into<Value>) -> Compare {
    compare(sub, "=", value)
}

pub fn not_equal(sub: impl Into<Part>, value: impl Into<Value>) -> Compare {
    compare(sub, "<>", value)
}

pub fn greater(sub: impl Into<Part>, value: impl Into<Value>) -> Compare {
    compare(sub, ">", value)
}

pub fn greater_or_equal(sub: impl Into<Part>, value: impl Into<Value>) -> Compare {
    compare(sub, ">=", value)
}

pub fn less(sub: impl Into<Part>, value: impl Into<Value>) -> Compare {
    compare(sub, "<", value)
}

pub fn less_or_equal(sub: impl Into<Part>, value: impl Into<Value>) -> Compare {
    compare(sub, "<=", value)
}

impl Sqlizer for Compare {
    fn to_sql(&self) -> SqlResult<Rendered> {
        let mut buf = SqlBuf::new();
        buf.push("(");
        buf.push_nested(&self.sub)?;
        buf.push(&format!(") {} ", self.op)).push_bind(self.value.clone());
        Ok(buf.finish())
    }
}

/// `COALESCE((<a>),(<b>),?)`
///
/// Fragment arguments are parenthesized; value arguments and the fallback bind
/// to placeholders.
#[derive(Clone, Debug)]
pub struct Coalesce {
    args: Vec<Arg>,
    fallback: Value,
}

pub fn coalesce<A: Into<Arg>>(
    args: impl IntoIterator<Item = A>,
    fallback: impl Into<Value>,
) -> Coalesce {
    Coalesce {
        args: args.into_iter().map(Into::into).collect(),
        fallback: fallback.into(),
    }
}

impl Sqlizer for Coalesce {
    fn to_sql(&self) -> SqlResult<Rendered> {
        let mut buf = SqlBuf::new();
        buf.push("COALESCE(");
        for arg in &self.args {
            match arg.as_fragment() {
                Some(fragment) => {
                    buf.push("(");
                    buf.push_nested(fragment)?;
                    buf.push("),");
                }
                None => {
                    if let Some(v) = arg.resolve_value()? {
                        buf.push_bind(v).push(",");
                    }
                }
            }
        }
        buf.push_bind(self.fallback.clone()).push(")");
        Ok(buf.finish())
    }
}

impl_fragment!(Func, In, Range, Compare, Coalesce);
