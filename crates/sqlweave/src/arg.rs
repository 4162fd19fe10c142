//! Arguments accepted by expressions and statement setters.
//!
//! An [`Arg`] is either a bound [`Value`], a nested fragment, a nested SELECT,
//! or a [`Valuer`] resolved at render time. Operators never inspect an `Arg`
//! directly; they [`classify`](Arg::classify) it once and match on the result.

use crate::error::SqlResult;
use crate::qb::SelectBuilder;
use crate::sqlizer::{Part, Sqlizer};
use crate::value::{Valuer, Value};
use chrono::{DateTime, FixedOffset};
use std::sync::Arc;

/// A value or fragment passed to an operator.
#[derive(Clone, Debug)]
pub enum Arg {
    /// Bound to one placeholder (or expanded, for lists).
    Value(Value),
    /// Rendered raw and embedded in place.
    Fragment(Part),
    /// Rendered raw; embedded as a subquery.
    Select(SelectBuilder),
    /// Produces its value at render time.
    Valuer(Arc<dyn Valuer>),
}

/// Result of classifying an [`Arg`].
pub(crate) enum ArgKind<'a> {
    Null,
    Scalar(Value),
    List(Vec<Value>),
    Fragment(&'a dyn Sqlizer),
    Subquery(&'a SelectBuilder),
}

impl ArgKind<'_> {
    fn of_value(value: Value) -> Self {
        match value {
            Value::Null => ArgKind::Null,
            Value::Array(items) => ArgKind::List(items),
            v => ArgKind::Scalar(v),
        }
    }
}

impl Arg {
    /// Wrap a value producer.
    pub fn valuer(v: impl Valuer + 'static) -> Self {
        Arg::Valuer(Arc::new(v))
    }

    /// Wrap any fragment.
    pub fn fragment(f: impl Into<Part>) -> Self {
        Arg::Fragment(f.into())
    }

    /// Resolve valuers and sort the argument into one of the operator cases.
    pub(crate) fn classify(&self) -> SqlResult<ArgKind<'_>> {
        Ok(match self {
            Arg::Value(v) => ArgKind::of_value(v.clone()),
            Arg::Valuer(v) => ArgKind::of_value(v.value()?),
            Arg::Fragment(part) => ArgKind::Fragment(part),
            Arg::Select(sb) => ArgKind::Subquery(sb),
        })
    }

    /// The bound value, if this argument is not a fragment.
    pub(crate) fn resolve_value(&self) -> SqlResult<Option<Value>> {
        match self {
            Arg::Value(v) => Ok(Some(v.clone())),
            Arg::Valuer(v) => v.value().map(Some),
            Arg::Fragment(_) | Arg::Select(_) => Ok(None),
        }
    }

    /// The fragment to embed, if this argument is one.
    pub(crate) fn as_fragment(&self) -> Option<&dyn Sqlizer> {
        match self {
            Arg::Fragment(part) => Some(part),
            Arg::Select(sb) => Some(sb),
            Arg::Value(_) | Arg::Valuer(_) => None,
        }
    }
}

impl From<Value> for Arg {
    fn from(v: Value) -> Self {
        Arg::Value(v)
    }
}

impl From<Part> for Arg {
    fn from(part: Part) -> Self {
        Arg::Fragment(part)
    }
}

impl From<SelectBuilder> for Arg {
    fn from(sb: SelectBuilder) -> Self {
        Arg::Select(sb)
    }
}

impl From<&str> for Arg {
    fn from(v: &str) -> Self {
        Arg::Value(v.into())
    }
}

impl From<isize> for Arg {
    fn from(v: isize) -> Self {
        Arg::Value(v.into())
    }
}

impl From<usize> for Arg {
    fn from(v: usize) -> Self {
        Arg::Value(v.into())
    }
}

impl From<DateTime<FixedOffset>> for Arg {
    fn from(v: DateTime<FixedOffset>) -> Self {
        Arg::Value(v.into())
    }
}

impl<T: Into<Value>> From<Option<T>> for Arg {
    fn from(v: Option<T>) -> Self {
        Arg::Value(v.into())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Arg {
    fn from(v: Vec<T>) -> Self {
        Arg::Value(v.into())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Arg {
    fn from(v: [T; N]) -> Self {
        Arg::Value(v.into())
    }
}

impl<T: Clone + Into<Value>> From<&[T]> for Arg {
    fn from(v: &[T]) -> Self {
        Arg::Value(v.into())
    }
}

/// Build a `Vec<Arg>` from heterogeneous values and fragments.
///
/// ```ignore
/// let args = args![1, "two", sqlweave::expr("now()", args![])];
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Arg>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::Arg::from($arg)),+]
    };
}
