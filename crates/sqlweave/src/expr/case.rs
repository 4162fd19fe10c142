//! CASE expressions.

use crate::arg::{Arg, ArgKind};
use crate::buf::SqlBuf;
use crate::clauses::Clauses;
use crate::error::{SqlError, SqlResult};
use crate::sqlizer::{Part, Rendered, Sqlizer, impl_fragment};
use crate::value::Value;

/// `CASE [<what>] WHEN <cond> THEN <result> ... [ELSE <result>] END`
///
/// THEN values carry an explicit cast (`CAST(? AS integer)`) when their SQL
/// type is known, so databases can infer the type of the whole expression.
/// Fragments are embedded as-is and nulls bind as a bare `?`.
#[derive(Clone, Debug, Default)]
pub struct CaseBuilder {
    what: Part,
    whens: Clauses<(Part, Arg)>,
    else_value: Option<Arg>,
}

impl CaseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subject compared against each WHEN value.
    pub fn what(mut self, what: impl Into<Part>) -> Self {
        self.what = what.into();
        self
    }

    /// Add `WHEN <when> THEN <then>`.
    ///
    /// The cast on `then` comes from the bound value, not a static type: an
    /// array is typed by its first non-null element, so an empty or all-null
    /// array binds as a bare `?`. Wrap such values in an explicit
    /// `expr("CAST(? AS integer[])", ...)` when the type matters.
    pub fn when(mut self, when: impl Into<Part>, then: impl Into<Arg>) -> Self {
        self.whens.push((when.into(), then.into()));
        self
    }

    pub fn else_(mut self, value: impl Into<Arg>) -> Self {
        self.else_value = Some(value.into());
        self
    }
}

fn push_then(buf: &mut SqlBuf, then: &Arg) -> SqlResult<()> {
    match then.classify()? {
        ArgKind::Fragment(fragment) => {
            buf.push_nested(fragment)?;
        }
        ArgKind::Subquery(sb) => {
            buf.push_nested(sb)?;
        }
        ArgKind::Null => {
            buf.push_bind(Value::Null);
        }
        ArgKind::Scalar(v) => push_cast(buf, v),
        ArgKind::List(items) => push_cast(buf, Value::Array(items)),
    }
    Ok(())
}

fn push_cast(buf: &mut SqlBuf, value: Value) {
    match value.sql_type() {
        Some(ty) => {
            buf.push("CAST(").push_bind(value).push(&format!(" AS {ty})"));
        }
        None => {
            buf.push_bind(value);
        }
    }
}

fn push_else(buf: &mut SqlBuf, value: &Arg) -> SqlResult<()> {
    match value.classify()? {
        ArgKind::Fragment(fragment) => {
            buf.push_nested(fragment)?;
        }
        ArgKind::Subquery(sb) => {
            buf.push_nested(sb)?;
        }
        ArgKind::Null => {
            buf.push_bind(Value::Null);
        }
        ArgKind::Scalar(v) => {
            buf.push_bind(v);
        }
        ArgKind::List(items) => {
            buf.push_bind(Value::Array(items));
        }
    }
    Ok(())
}

impl Sqlizer for CaseBuilder {
    fn to_sql(&self) -> SqlResult<Rendered> {
        if self.whens.is_empty() {
            return Err(SqlError::validation(
                "case expression must contain at least one WHEN clause",
            ));
        }

        let mut buf = SqlBuf::new();
        buf.push("CASE ");
        if buf.push_nested(&self.what)? {
            buf.push(" ");
        }
        for (when, then) in self.whens.iter() {
            buf.push("WHEN ");
            buf.push_nested(when)?;
            buf.push(" THEN ");
            push_then(&mut buf, then)?;
            buf.push(" ");
        }
        if let Some(value) = &self.else_value {
            buf.push("ELSE ");
            push_else(&mut buf, value)?;
            buf.push(" ");
        }
        buf.push("END");
        Ok(buf.finish())
    }
}

impl_fragment!(CaseBuilder);
