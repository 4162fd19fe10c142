//! Bound argument values.
//!
//! A [`Value`] is what ends up next to a placeholder in the rendered argument
//! list. Conversions exist for the usual scalar types; `Option<T>` maps `None`
//! to [`Value::Null`] and sequences map to [`Value::Array`].

#[cfg(feature = "postgres")]
mod postgres;

use crate::arg::Arg;
use crate::error::{SqlError, SqlResult};
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A single bound argument.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Text(String),
    Bytes(Vec<u8>),
    Timestamp(DateTime<Utc>),
    Uuid(Uuid),
    Json(serde_json::Value),
    Array(Vec<Value>),
}

impl Value {
    /// Binary payload (`bytea`, `BLOB`).
    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Bytes(bytes.into())
    }

    /// Serialize any value into a JSON argument.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> SqlResult<Self> {
        Ok(Self::Json(serde_json::to_value(value)?))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Whether this is the zero value of its type.
    ///
    /// `Null`, `false`, numeric zero, empty text/bytes/arrays, the nil UUID and
    /// JSON `null` count as zero. Timestamps are never zero.
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Bool(v) => !v,
            Self::I8(v) => *v == 0,
            Self::I16(v) => *v == 0,
            Self::I32(v) => *v == 0,
            Self::I64(v) => *v == 0,
            Self::U8(v) => *v == 0,
            Self::U16(v) => *v == 0,
            Self::U32(v) => *v == 0,
            Self::U64(v) => *v == 0,
            Self::F32(v) => *v == 0.0,
            Self::F64(v) => *v == 0.0,
            Self::Text(v) => v.is_empty(),
            Self::Bytes(v) => v.is_empty(),
            Self::Timestamp(_) => false,
            Self::Uuid(v) => v.is_nil(),
            Self::Json(v) => v.is_null(),
            Self::Array(v) => v.is_empty(),
        }
    }

    /// Drop zero values, recursing into arrays. `None` when nothing survives.
    pub(crate) fn strip_empty(self) -> Option<Self> {
        match self {
            Self::Array(items) => {
                let kept: Vec<Value> = items.into_iter().filter_map(Value::strip_empty).collect();
                if kept.is_empty() {
                    None
                } else {
                    Some(Self::Array(kept))
                }
            }
            v if v.is_zero() => None,
            v => Some(v),
        }
    }

    /// SQL type name used for `CAST(? AS <type>)`, when one is known.
    ///
    /// Arrays take the type of their first non-null element.
    pub fn sql_type(&self) -> Option<String> {
        let name = match self {
            Self::Bool(_) => "boolean",
            Self::I64(_) | Self::U64(_) => "bigint",
            Self::I32(_) | Self::U32(_) => "integer",
            Self::I16(_) | Self::U16(_) | Self::I8(_) | Self::U8(_) => "smallint",
            Self::F32(_) | Self::F64(_) => "double precision",
            Self::Text(_) => "text",
            Self::Timestamp(_) => "timestamp with time zone",
            Self::Array(items) => {
                return items
                    .iter()
                    .find(|v| !v.is_null())
                    .and_then(Value::sql_type)
                    .map(|t| format!("{t}[]"));
            }
            Self::Null | Self::Bytes(_) | Self::Uuid(_) | Self::Json(_) => return None,
        };
        Some(name.to_string())
    }
}

/// Human readable rendering used by [`debug_sqlizer`](crate::debug_sqlizer).
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::I8(v) => write!(f, "{v}"),
            Self::I16(v) => write!(f, "{v}"),
            Self::I32(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::U8(v) => write!(f, "{v}"),
            Self::U16(v) => write!(f, "{v}"),
            Self::U32(v) => write!(f, "{v}"),
            Self::U64(v) => write!(f, "{v}"),
            Self::F32(v) => write!(f, "{v}"),
            Self::F64(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
            Self::Bytes(v) => {
                f.write_str("\\x")?;
                for b in v {
                    write!(f, "{b:02x}")?;
                }
                Ok(())
            }
            Self::Timestamp(v) => write!(f, "{}", v.to_rfc3339()),
            Self::Uuid(v) => write!(f, "{v}"),
            Self::Json(v) => write!(f, "{v}"),
            Self::Array(items) => {
                f.write_str("{")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("}")
            }
        }
    }
}

/// A value computed when the statement is rendered.
///
/// The produced value is classified like any other argument; an error aborts
/// the render.
pub trait Valuer: fmt::Debug + Send + Sync {
    fn value(&self) -> SqlResult<Value>;
}

macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }

            impl From<&$ty> for Value {
                fn from(v: &$ty) -> Self {
                    Value::$variant(v.clone())
                }
            }

            impl From<$ty> for Arg {
                fn from(v: $ty) -> Self {
                    Arg::Value(Value::$variant(v))
                }
            }

            impl From<&$ty> for Arg {
                fn from(v: &$ty) -> Self {
                    Arg::Value(Value::$variant(v.clone()))
                }
            }
        )*
    };
}

impl_from_scalar!(
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    String => Text,
    DateTime<Utc> => Timestamp,
    Uuid => Uuid,
    serde_json::Value => Json,
);

impl From<isize> for Value {
    fn from(v: isize) -> Self {
        Value::I64(v as i64)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::U64(v as u64)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(v: DateTime<FixedOffset>) -> Self {
        Value::Timestamp(v.with_timezone(&Utc))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Array(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(v: [T; N]) -> Self {
        Value::Array(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Clone + Into<Value>> From<&[T]> for Value {
    fn from(v: &[T]) -> Self {
        Value::Array(v.iter().cloned().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests;
