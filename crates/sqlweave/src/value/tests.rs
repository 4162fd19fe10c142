use super::*;
use chrono::TimeZone;

#[test]
fn option_none_is_null() {
    let v: Value = None::<i32>.into();
    assert_eq!(v, Value::Null);
    let v: Value = Some("a").into();
    assert_eq!(v, Value::Text("a".into()));
}

#[test]
fn sequences_become_arrays() {
    let v: Value = vec![1i64, 2, 3].into();
    assert_eq!(v, Value::Array(vec![Value::I64(1), Value::I64(2), Value::I64(3)]));
    let v: Value = ["a", "b"].into();
    assert_eq!(v, Value::Array(vec!["a".into(), "b".into()]));
}

#[test]
fn zero_values() {
    assert!(Value::Null.is_zero());
    assert!(Value::I32(0).is_zero());
    assert!(Value::Text(String::new()).is_zero());
    assert!(Value::Uuid(Uuid::nil()).is_zero());
    assert!(!Value::F64(0.5).is_zero());
    assert!(!Value::Bool(true).is_zero());
}

#[test]
fn strip_empty_recurses_into_arrays() {
    let v: Value = vec![2, 0, 3].into();
    assert_eq!(v.strip_empty(), Some(vec![2, 3].into()));

    let v: Value = vec![0, 0].into();
    assert_eq!(v.strip_empty(), None);

    let nested = Value::Array(vec![Value::Array(vec![Value::I32(0)]), Value::Null]);
    assert_eq!(nested.strip_empty(), None);
}

#[test]
fn sql_type_names() {
    assert_eq!(Value::Bool(true).sql_type().as_deref(), Some("boolean"));
    assert_eq!(Value::U64(1).sql_type().as_deref(), Some("bigint"));
    assert_eq!(Value::I32(1).sql_type().as_deref(), Some("integer"));
    assert_eq!(Value::U8(1).sql_type().as_deref(), Some("smallint"));
    assert_eq!(Value::F32(1.0).sql_type().as_deref(), Some("double precision"));
    assert_eq!(Value::from("x").sql_type().as_deref(), Some("text"));
    let ts = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
    assert_eq!(
        Value::from(ts).sql_type().as_deref(),
        Some("timestamp with time zone")
    );
    assert_eq!(
        Value::from(vec![1i16, 2]).sql_type().as_deref(),
        Some("smallint[]")
    );
    assert_eq!(Value::Uuid(Uuid::nil()).sql_type(), None);
    assert_eq!(Value::Array(vec![]).sql_type(), None);
}

#[test]
fn display_for_debug_output() {
    assert_eq!(Value::from("abc").to_string(), "abc");
    assert_eq!(Value::from(vec![1, 2]).to_string(), "{1,2}");
    assert_eq!(Value::bytes(vec![0xde, 0xad]).to_string(), "\\xdead");
    assert_eq!(Value::Null.to_string(), "NULL");
}

#[test]
fn json_arguments() {
    #[derive(Serialize)]
    struct Tags {
        tags: Vec<&'static str>,
    }
    let v = Value::json(&Tags { tags: vec!["a"] }).unwrap();
    assert_eq!(v, Value::Json(serde_json::json!({ "tags": ["a"] })));
}

#[test]
fn values_serialize() {
    let encoded = serde_json::to_string(&Value::I32(5)).unwrap();
    let decoded: Value = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, Value::I32(5));
}
