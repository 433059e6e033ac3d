use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Effective parameters for one instance: schema defaults merged with
/// instance overrides. Ordered so serialization is deterministic — the
/// render cache keys on the serialized form.
pub type ParameterMap = BTreeMap<String, ParamValue>;

/// Runtime parameter value.
///
/// Untagged so backend JSON (`"hello"`, `42`, `true`, nested objects)
/// deserializes directly into the matching variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<ParamValue>),
    Object(BTreeMap<String, ParamValue>),
}

impl ParamValue {
    pub fn is_truthy(&self) -> bool {
        match self {
            ParamValue::Null => false,
            ParamValue::Bool(b) => *b,
            ParamValue::Number(n) => *n != 0.0,
            ParamValue::String(s) => !s.is_empty(),
            ParamValue::Array(a) => !a.is_empty(),
            ParamValue::Object(o) => !o.is_empty(),
        }
    }

    /// True for the values the `||` fallback chain skips over.
    pub fn is_empty_like(&self) -> bool {
        match self {
            ParamValue::Null => true,
            ParamValue::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Numeric coercion: numbers pass through, numeric strings parse,
    /// booleans map to 0/1, null to 0. Everything else is `None`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ParamValue::Number(n) => Some(*n),
            ParamValue::String(s) => s.trim().parse::<f64>().ok(),
            ParamValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            ParamValue::Null => Some(0.0),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Dotted lookup into nested objects (`user.address.city`).
    pub fn get_path(&self, path: &[&str]) -> Option<&ParamValue> {
        let mut current = self;
        for segment in path {
            match current {
                ParamValue::Object(map) => current = map.get(*segment)?,
                _ => return None,
            }
        }
        Some(current)
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Null => Ok(()),
            ParamValue::Bool(b) => write!(f, "{}", b),
            ParamValue::Number(n) => {
                // Integers render without a trailing ".0" so "{{count}}"
                // substitutes as "3", not "3.0".
                if n.fract() == 0.0 && n.is_finite() {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            ParamValue::String(s) => write!(f, "{}", s),
            ParamValue::Array(_) | ParamValue::Object(_) => {
                let json = serde_json::to_string(self).unwrap_or_default();
                write!(f, "{}", json)
            }
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::String(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::String(s)
    }
}

impl From<f64> for ParamValue {
    fn from(n: f64) -> Self {
        ParamValue::Number(n)
    }
}

impl From<i64> for ParamValue {
    fn from(n: i64) -> Self {
        ParamValue::Number(n as f64)
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Bool(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthiness() {
        assert!(!ParamValue::Null.is_truthy());
        assert!(!ParamValue::from("").is_truthy());
        assert!(!ParamValue::from(0.0).is_truthy());
        assert!(ParamValue::from("x").is_truthy());
        assert!(ParamValue::from(2.0).is_truthy());
        assert!(ParamValue::Bool(true).is_truthy());
    }

    #[test]
    fn test_display_integers_without_fraction() {
        assert_eq!(ParamValue::from(5.0).to_string(), "5");
        assert_eq!(ParamValue::from(2.5).to_string(), "2.5");
        assert_eq!(ParamValue::Null.to_string(), "");
    }

    #[test]
    fn test_untagged_roundtrip() {
        let json = r#"{"title":"Hi","count":3,"active":true,"nested":{"a":1}}"#;
        let map: ParameterMap = serde_json::from_str(json).unwrap();
        assert_eq!(map["title"], ParamValue::from("Hi"));
        assert_eq!(map["count"], ParamValue::from(3.0));
        assert_eq!(map["active"], ParamValue::Bool(true));
        assert_eq!(
            map["nested"].get_path(&["a"]),
            Some(&ParamValue::from(1.0))
        );
    }

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(ParamValue::from("12.5").as_number(), Some(12.5));
        assert_eq!(ParamValue::Bool(true).as_number(), Some(1.0));
        assert_eq!(ParamValue::from("abc").as_number(), None);
    }
}
