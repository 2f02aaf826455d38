//! Dynamically-typed metadata values.
//!
//! Event metadata is an arbitrary JSON-like tree. [`MetaValue`] models it as
//! a closed set of variants so that merge and copy logic can pattern-match
//! on structure instead of inspecting types at runtime.
//!
//! Maps are [`BTreeMap`]s: keys iterate and serialize in lexicographic order,
//! which keeps rendered output deterministic.
//!
//! Arrays have no variant. [`metadata_from_json`] drops array-valued entries
//! at every depth and keeps their siblings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// A string-keyed map of metadata values.
pub type Metadata = BTreeMap<String, MetaValue>;

/// A single metadata value.
///
/// Serialized untagged, so a `MetaValue` round-trips as plain JSON. Numbers
/// keep the integer/float distinction of their source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    /// JSON `null`.
    Null,
    /// A boolean flag.
    Bool(bool),
    /// An integer or floating-point number.
    Number(Number),
    /// A string.
    String(String),
    /// A nested map.
    Map(Metadata),
}

impl MetaValue {
    /// Return the nested map if this value is one.
    pub const fn as_map(&self) -> Option<&Metadata> {
        match self {
            Self::Map(map) => Some(map),
            Self::Null | Self::Bool(_) | Self::Number(_) | Self::String(_) => None,
        }
    }

    /// Return whether this value is a nested map.
    pub const fn is_map(&self) -> bool {
        matches!(self, Self::Map(_))
    }

    /// Convert a JSON value, or `None` if it is an array.
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Null => Some(Self::Null),
            Value::Bool(flag) => Some(Self::Bool(flag)),
            Value::Number(number) => Some(Self::Number(number)),
            Value::String(text) => Some(Self::String(text)),
            Value::Object(_) => Some(Self::Map(metadata_from_json(value))),
            Value::Array(_) => None,
        }
    }
}

/// Build metadata from an arbitrary JSON value.
///
/// Anything other than an object yields an empty map. Array-valued entries
/// are dropped, nested maps included.
pub fn metadata_from_json(value: Value) -> Metadata {
    let Value::Object(entries) = value else {
        return Metadata::new();
    };
    entries
        .into_iter()
        .filter_map(|(key, value)| MetaValue::from_json(value).map(|value| (key, value)))
        .collect()
}

impl From<&str> for MetaValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for MetaValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for MetaValue {
    fn from(value: i64) -> Self {
        Self::Number(Number::from(value))
    }
}

impl From<bool> for MetaValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Non-finite floats have no JSON representation and become [`MetaValue::Null`].
impl From<f64> for MetaValue {
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or(Self::Null, Self::Number)
    }
}

impl From<Metadata> for MetaValue {
    fn from(value: Metadata) -> Self {
        Self::Map(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_every_variant() {
        let parsed: Metadata = serde_json::from_str(
            r#"{"n": null, "b": true, "i": 7, "f": 1.5, "s": "x", "m": {"k": "v"}}"#,
        )
        .unwrap_or_default();

        assert_eq!(parsed.get("n"), Some(&MetaValue::Null));
        assert_eq!(parsed.get("b"), Some(&MetaValue::Bool(true)));
        assert_eq!(parsed.get("i"), Some(&MetaValue::from(7_i64)));
        assert_eq!(parsed.get("f"), Some(&MetaValue::from(1.5)));
        assert_eq!(parsed.get("s"), Some(&MetaValue::from("x")));
        assert!(parsed.get("m").is_some_and(MetaValue::is_map));
    }

    #[test]
    fn serializes_as_plain_json() {
        let mut inner = Metadata::new();
        inner.insert("x".to_owned(), MetaValue::from(1_i64));
        let mut outer = Metadata::new();
        outer.insert("b".to_owned(), MetaValue::from(inner));
        outer.insert("a".to_owned(), MetaValue::Null);

        let json = serde_json::to_string(&outer).unwrap_or_default();
        assert_eq!(json, r#"{"a":null,"b":{"x":1}}"#);
    }

    #[test]
    fn integers_stay_integers() {
        let json = serde_json::to_string(&MetaValue::from(100_i64)).unwrap_or_default();
        assert_eq!(json, "100");
    }

    #[test]
    fn non_finite_float_becomes_null() {
        assert_eq!(MetaValue::from(f64::NAN), MetaValue::Null);
        assert_eq!(MetaValue::from(f64::INFINITY), MetaValue::Null);
    }

    #[test]
    fn non_object_json_is_empty_metadata() {
        assert!(metadata_from_json(Value::from("oops")).is_empty());
        assert!(metadata_from_json(Value::from(5_i64)).is_empty());
        assert!(metadata_from_json(Value::Null).is_empty());
        assert!(metadata_from_json(serde_json::json!([1, 2])).is_empty());
    }

    #[test]
    fn arrays_are_dropped_at_every_depth() {
        let parsed = metadata_from_json(serde_json::json!({
            "tags": ["a", "b"],
            "page": "/",
            "ctx": {"ids": [1, 2], "depth": 3}
        }));

        let mut ctx = Metadata::new();
        ctx.insert("depth".to_owned(), MetaValue::from(3_i64));
        let mut expected = Metadata::new();
        expected.insert("page".to_owned(), MetaValue::from("/"));
        expected.insert("ctx".to_owned(), MetaValue::from(ctx));
        assert_eq!(parsed, expected);
    }

    #[test]
    fn as_map_only_matches_maps() {
        assert!(MetaValue::from(Metadata::new()).as_map().is_some());
        assert!(MetaValue::from("x").as_map().is_none());
        assert!(MetaValue::Null.as_map().is_none());
    }
}
