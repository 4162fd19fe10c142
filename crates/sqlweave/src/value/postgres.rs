//! Binding [`Value`] with `tokio-postgres`.
//!
//! Values are encoded for the parameter type the server asks for, not for
//! their own width: integers convert to `int2`/`int4`/`int8` and fail when
//! they do not fit, floats convert to `float4`/`float8`, and timestamps bind
//! to both `timestamptz` and `timestamp`. Anything else must match the
//! parameter type exactly or the bind fails with [`WrongType`].

use super::Value;
use bytes::BytesMut;
use chrono::{DateTime, Utc};
use std::error::Error;
use tokio_postgres::types::{IsNull, Kind, ToSql, Type, WrongType};
use uuid::Uuid;

type BoxError = Box<dyn Error + Sync + Send>;

impl ToSql for Value {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
        match self {
            Value::Null => Ok(IsNull::Yes),
            Value::Bool(v) => encode_exact(v, ty, out),
            Value::I8(v) => encode_int(i64::from(*v), ty, out),
            Value::I16(v) => encode_int(i64::from(*v), ty, out),
            Value::I32(v) => encode_int(i64::from(*v), ty, out),
            Value::I64(v) => encode_int(*v, ty, out),
            Value::U8(v) => encode_int(i64::from(*v), ty, out),
            Value::U16(v) => encode_int(i64::from(*v), ty, out),
            Value::U32(v) => encode_int(i64::from(*v), ty, out),
            Value::U64(v) => encode_int(i64::try_from(*v)?, ty, out),
            Value::F32(v) => encode_float(f64::from(*v), ty, out),
            Value::F64(v) => encode_float(*v, ty, out),
            Value::Text(v) => encode_exact(v, ty, out),
            Value::Bytes(v) => encode_exact(v, ty, out),
            Value::Timestamp(v) => match *ty {
                Type::TIMESTAMP => v.naive_utc().to_sql(ty, out),
                _ => encode_exact(v, ty, out),
            },
            Value::Uuid(v) => encode_exact(v, ty, out),
            Value::Json(v) => encode_exact(v, ty, out),
            Value::Array(items) => {
                if !matches!(ty.kind(), Kind::Array(_)) {
                    return Err(format!("cannot bind an array to {ty}").into());
                }
                items.to_sql(ty, out)
            }
        }
    }

    fn accepts(ty: &Type) -> bool {
        if let Kind::Array(member) = ty.kind() {
            return Self::accepts(member);
        }
        matches!(
            *ty,
            Type::INT2 | Type::INT4 | Type::INT8 | Type::FLOAT4 | Type::FLOAT8 | Type::TIMESTAMP
        ) || <bool as ToSql>::accepts(ty)
            || <String as ToSql>::accepts(ty)
            || <Vec<u8> as ToSql>::accepts(ty)
            || <DateTime<Utc> as ToSql>::accepts(ty)
            || <Uuid as ToSql>::accepts(ty)
            || <serde_json::Value as ToSql>::accepts(ty)
    }

    tokio_postgres::types::to_sql_checked!();
}

/// Encode `v` only when its own type matches the parameter type.
fn encode_exact<T: ToSql>(v: &T, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
    if !T::accepts(ty) {
        return Err(Box::new(WrongType::new::<T>(ty.clone())));
    }
    v.to_sql(ty, out)
}

fn encode_int(v: i64, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
    match *ty {
        Type::INT2 => i16::try_from(v)?.to_sql(ty, out),
        Type::INT4 => i32::try_from(v)?.to_sql(ty, out),
        Type::INT8 => v.to_sql(ty, out),
        _ => Err(Box::new(WrongType::new::<i64>(ty.clone()))),
    }
}

fn encode_float(v: f64, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
    match *ty {
        Type::FLOAT4 => (v as f32).to_sql(ty, out),
        Type::FLOAT8 => v.to_sql(ty, out),
        _ => Err(Box::new(WrongType::new::<f64>(ty.clone()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bind(value: Value, ty: &Type) -> Result<BytesMut, BoxError> {
        let mut buf = BytesMut::new();
        value.to_sql_checked(ty, &mut buf)?;
        Ok(buf)
    }

    #[test]
    fn null_encodes_as_sql_null() {
        let mut buf = BytesMut::new();
        let is_null = Value::Null.to_sql(&Type::INT4, &mut buf).unwrap();
        assert!(matches!(is_null, IsNull::Yes));
        assert!(buf.is_empty());
    }

    #[test]
    fn integers_take_the_parameter_width() {
        assert_eq!(bind(Value::I32(1), &Type::INT8).unwrap().len(), 8);
        assert_eq!(bind(Value::I32(1), &Type::INT2).unwrap().len(), 2);
        assert_eq!(bind(Value::U32(7), &Type::INT8).unwrap().len(), 8);

        let buf = bind(Value::I64(42), &Type::INT4).unwrap();
        assert_eq!(&buf[..], &42i32.to_be_bytes());
    }

    #[test]
    fn narrowing_overflow_is_an_error() {
        assert!(bind(Value::I64(i64::MAX), &Type::INT4).is_err());
        assert!(bind(Value::I32(70_000), &Type::INT2).is_err());
        assert!(bind(Value::U64(u64::MAX), &Type::INT8).is_err());
    }

    #[test]
    fn floats_take_the_parameter_width() {
        assert_eq!(bind(Value::F64(1.5), &Type::FLOAT4).unwrap().len(), 4);
        assert_eq!(bind(Value::F32(1.5), &Type::FLOAT8).unwrap().len(), 8);
        assert!(bind(Value::F64(1.5), &Type::INT4).is_err());
    }

    #[test]
    fn mismatched_types_are_rejected() {
        let err = bind(Value::from("abc"), &Type::INT4).unwrap_err();
        assert!(err.is::<WrongType>());
        assert!(bind(Value::I32(1), &Type::TEXT).is_err());
        assert!(bind(Value::Bool(true), &Type::INT4).is_err());
    }

    #[test]
    fn text_binds_to_text_types() {
        assert_eq!(&bind(Value::from("abc"), &Type::TEXT).unwrap()[..], b"abc");
        assert_eq!(&bind(Value::from("abc"), &Type::VARCHAR).unwrap()[..], b"abc");
    }

    #[test]
    fn timestamp_binds_with_and_without_zone() {
        let ts = Value::Timestamp(DateTime::<Utc>::from_timestamp(0, 0).unwrap());
        assert_eq!(bind(ts.clone(), &Type::TIMESTAMPTZ).unwrap().len(), 8);
        assert_eq!(bind(ts, &Type::TIMESTAMP).unwrap().len(), 8);
    }

    #[test]
    fn array_elements_follow_the_member_type() {
        let ids = Value::Array(vec![Value::I32(1), Value::I32(2)]);
        assert!(bind(ids.clone(), &Type::INT8_ARRAY).is_ok());
        assert!(bind(ids.clone(), &Type::TEXT_ARRAY).is_err());
        assert!(bind(ids, &Type::INT8).is_err());
    }
}
