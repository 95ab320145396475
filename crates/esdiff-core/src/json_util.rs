//! Shared JSON helpers: document parsing, default detection, scalar coercion
//! and settings flattening.

use crate::errors::{EsDiffError, Result};
use serde_json::{Map, Number, Value};

/// Parse one side of a comparison.
///
/// An empty or whitespace-only string is the canonical empty object: a
/// resource that never existed and one with no fields set read the same.
///
/// # Errors
///
/// `MalformedJson` naming `side` when the text is not JSON.
pub fn parse_document(raw: &str, side: &str) -> Result<Value> {
    if raw.trim().is_empty() {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_str(raw).map_err(|e| EsDiffError::MalformedJson {
        side: side.to_string(),
        reason: e.to_string(),
    })
}

/// Render a value the way it is stored in resource state.
///
/// `null` and `{}` become the empty string, mirroring [`parse_document`].
///
/// # Errors
///
/// `Serialization` if the value cannot be rendered.
pub fn to_state_string(value: &Value) -> Result<String> {
    match value {
        Value::Null => Ok(String::new()),
        Value::Object(map) if map.is_empty() => Ok(String::new()),
        other => Ok(serde_json::to_string(other)?),
    }
}

/// Whether a value is interchangeable with the key being absent.
pub fn is_zero_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Numeric equality across integer and float representations (`5` ≡ `5.0`).
pub fn numbers_equal(a: &Number, b: &Number) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x == y;
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) if s.eq_ignore_ascii_case("true") => Some(true),
        Value::String(s) if s.eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    }
}

/// Scalar equality where strings may stand in for numbers and booleans.
///
/// Elasticsearch echoes index settings back as strings, so `"1"` must equal
/// `1` and `"true"` must equal `true` under a settings path.
pub fn coerced_scalars_equal(a: &Value, b: &Value) -> bool {
    if let (Value::Number(x), Value::Number(y)) = (a, b) {
        return numbers_equal(x, y);
    }
    if let (Some(x), Some(y)) = (as_number(a), as_number(b)) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (as_bool(a), as_bool(b)) {
        return x == y;
    }
    a == b
}

/// Flatten nested objects into dotted keys.
///
/// `{"index": {"lifecycle": {"name": "p"}}}` becomes `{"index.lifecycle.name": "p"}`.
/// Arrays and scalars are leaves. Empty nested objects are dropped.
pub fn flatten_object(map: &Map<String, Value>) -> Map<String, Value> {
    let mut out = Map::new();
    flatten_into("", map, &mut out);
    out
}

fn flatten_into(prefix: &str, map: &Map<String, Value>, out: &mut Map<String, Value>) {
    for (key, value) in map {
        let full = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            Value::Object(inner) => flatten_into(&full, inner, out),
            other => {
                out.insert(full, other.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_input_is_empty_object() {
        assert_eq!(parse_document("", "old").unwrap(), json!({}));
        assert_eq!(parse_document("  \n", "new").unwrap(), json!({}));
    }

    #[test]
    fn test_malformed_input_names_side() {
        let err = parse_document("{\"a\":", "new").unwrap_err();
        match err {
            EsDiffError::MalformedJson { side, .. } => assert_eq!(side, "new"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_state_string_collapses_empty() {
        assert_eq!(to_state_string(&json!({})).unwrap(), "");
        assert_eq!(to_state_string(&Value::Null).unwrap(), "");
        assert_eq!(to_state_string(&json!({"a": 1})).unwrap(), "{\"a\":1}");
    }

    #[test]
    fn test_zero_values() {
        for zero in [json!(null), json!(false), json!(0), json!(0.0), json!(""), json!([]), json!({})] {
            assert!(is_zero_value(&zero), "{zero} should be zero");
        }
        for non_zero in [json!(true), json!(1), json!("x"), json!([0]), json!({"a": null})] {
            assert!(!is_zero_value(&non_zero), "{non_zero} should not be zero");
        }
    }

    #[test]
    fn test_numbers_equal_across_representations() {
        let five: Number = 5.into();
        let five_f = Number::from_f64(5.0).unwrap();
        assert!(numbers_equal(&five, &five_f));
        assert!(!numbers_equal(&five, &Number::from_f64(5.5).unwrap()));
    }

    #[test]
    fn test_coerced_scalars() {
        assert!(coerced_scalars_equal(&json!("1"), &json!(1)));
        assert!(coerced_scalars_equal(&json!("1.5"), &json!(1.5)));
        assert!(coerced_scalars_equal(&json!("TRUE"), &json!(true)));
        assert!(coerced_scalars_equal(&json!("5s"), &json!("5s")));
        assert!(!coerced_scalars_equal(&json!("2"), &json!(1)));
        assert!(!coerced_scalars_equal(&json!("5s"), &json!(5)));
    }

    #[test]
    fn test_flatten_nested_settings() {
        let nested = json!({"index": {"refresh_interval": "5s", "lifecycle": {"name": "p"}}, "codec": "best_compression"});
        let flat = flatten_object(nested.as_object().unwrap());
        assert_eq!(
            Value::Object(flat),
            json!({"index.refresh_interval": "5s", "index.lifecycle.name": "p", "codec": "best_compression"})
        );
    }
}
