//! Field-level deserializers that never fail on a mistyped value.
//!
//! Source payloads are loosely typed: ids show up as strings or numbers, and
//! optional sections are sometimes `null`, `false` or an unexpected shape. Each
//! helper maps anything it cannot use to the field's empty value so a single
//! odd field never rejects the whole record. Pair them with `#[serde(default)]`.
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};

/// String-only field; any other JSON type becomes `None`.
pub fn opt_string<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// String field defaulting to empty; numbers and booleans are stringified.
pub fn string<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::String(s) => s,
        Value::Number(n) => number_string(&n),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

/// Identifier field: non-empty string or number, rendered as a string.
pub fn opt_id<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_id(&Value::deserialize(d)?))
}

/// Numeric field accepting integers, floats and numeric strings.
pub fn opt_f64<'de, D>(d: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Integer field defaulting to 0; floats are truncated.
pub fn int<'de, D>(d: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

/// Nested record; a value of the wrong shape becomes `None`.
pub fn opt_record<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(d)?;
    if !value.is_object() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value).ok())
}

/// List of records; non-arrays become empty and bad elements are dropped.
pub fn records<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(d)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

/// List of strings; other element types are dropped.
pub fn strings<'de, D>(d: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

/// Non-empty string or number as an id string.
pub fn scalar_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(number_string(n)),
        _ => None,
    }
}

/// Decimal text of `n`; whole-valued floats drop the fraction, so `1.0` and
/// `1` give the same key.
pub fn number_string(n: &Number) -> String {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < MAX_EXACT => {
            format!("{}", f as i64)
        }
        _ => n.to_string(),
    }
}

/// Non-empty string value of `field` on an object.
pub fn str_field<'a>(value: &'a Value, field: &str) -> Option<&'a str> {
    value
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Loose {
        #[serde(default, deserialize_with = "opt_id")]
        id: Option<String>,
        #[serde(default, deserialize_with = "opt_string")]
        name: Option<String>,
        #[serde(default, deserialize_with = "opt_f64")]
        rate: Option<f64>,
        #[serde(default, deserialize_with = "strings")]
        urls: Vec<String>,
    }

    #[test]
    fn mistyped_fields_do_not_fail_the_record() {
        let p: Loose = serde_json::from_value(json!({
            "id": 1234567890123456789u64,
            "name": 7,
            "rate": "2176000",
            "urls": ["a", 1, null, "b"]
        }))
        .unwrap();
        assert_eq!(p.id.as_deref(), Some("1234567890123456789"));
        assert_eq!(p.name, None);
        assert_eq!(p.rate, Some(2_176_000.0));
        assert_eq!(p.urls, vec!["a", "b"]);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let p: Loose = serde_json::from_value(json!({})).unwrap();
        assert!(p.id.is_none() && p.name.is_none() && p.rate.is_none());
        assert!(p.urls.is_empty());
    }

    #[test]
    fn empty_string_is_not_an_id() {
        assert_eq!(scalar_id(&json!("")), None);
        assert_eq!(scalar_id(&json!(null)), None);
        assert_eq!(scalar_id(&json!(42)), Some("42".into()));
    }

    #[test]
    fn whole_floats_stringify_like_integers() {
        let n = |v: Value| match v {
            Value::Number(n) => number_string(&n),
            other => panic!("not a number: {other}"),
        };
        assert_eq!(n(json!(1.0)), "1");
        assert_eq!(n(json!(-3.0)), "-3");
        assert_eq!(n(json!(2.5)), "2.5");
        assert_eq!(n(json!(18446744073709551615u64)), "18446744073709551615");
        assert_eq!(scalar_id(&json!(7.0)), Some("7".into()));
    }
}
