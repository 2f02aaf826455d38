//! Timestamped user events: the sessionizer's input.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::value::{MetaValue, Metadata, metadata_from_json};

/// An immutable event emitted by a user.
///
/// Missing, `null`, or non-object metadata deserializes to an empty map, so
/// downstream code never has to distinguish "no metadata" from "bad
/// metadata". Array values inside the map are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// The user that produced the event.
    pub user_id: String,
    /// Event time in seconds.
    pub ts: i64,
    /// The event type (e.g. `click`, `scroll`).
    #[serde(rename = "type")]
    pub kind: String,
    /// Arbitrarily nested event metadata.
    #[serde(default, deserialize_with = "lenient_metadata")]
    pub meta: Metadata,
}

impl Event {
    /// Create an event with empty metadata.
    pub fn new(user_id: impl Into<String>, ts: i64, kind: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            ts,
            kind: kind.into(),
            meta: Metadata::new(),
        }
    }

    /// Add a metadata entry, replacing any previous value under `key`.
    #[must_use]
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<MetaValue>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }
}

fn lenient_metadata<'de, D>(deserializer: D) -> Result<Metadata, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(metadata_from_json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_field_maps_to_kind() {
        let event: Result<Event, _> =
            serde_json::from_str(r#"{"user_id":"u1","ts":10,"type":"click","meta":{}}"#);
        assert!(event.is_ok());
        if let Ok(event) = event {
            assert_eq!(event.kind, "click");
            assert_eq!(event.ts, 10);
        }
    }

    #[test]
    fn missing_meta_is_empty() {
        let event: Result<Event, _> =
            serde_json::from_str(r#"{"user_id":"u1","ts":10,"type":"click"}"#);
        assert!(event.is_ok_and(|e| e.meta.is_empty()));
    }

    #[test]
    fn null_meta_is_empty() {
        let event: Result<Event, _> =
            serde_json::from_str(r#"{"user_id":"u1","ts":10,"type":"click","meta":null}"#);
        assert!(event.is_ok_and(|e| e.meta.is_empty()));
    }

    #[test]
    fn string_meta_is_empty() {
        let event: Result<Event, _> =
            serde_json::from_str(r#"{"user_id":"u1","ts":10,"type":"click","meta":"oops"}"#);
        assert!(event.is_ok_and(|e| e.meta.is_empty()));
    }

    #[test]
    fn number_meta_is_empty() {
        let event: Result<Event, _> =
            serde_json::from_str(r#"{"user_id":"u1","ts":10,"type":"click","meta":5}"#);
        assert!(event.is_ok_and(|e| e.meta.is_empty()));
    }

    #[test]
    fn array_in_meta_keeps_siblings() {
        let event: Result<Event, _> = serde_json::from_str(
            r#"{"user_id":"u1","ts":10,"type":"click","meta":{"tags":["a","b"],"page":"/"}}"#,
        );
        assert!(event.is_ok());
        if let Ok(event) = event {
            assert_eq!(event.meta.get("page"), Some(&MetaValue::from("/")));
            assert!(!event.meta.contains_key("tags"));
            assert_eq!(event.meta.len(), 1);
        }
    }

    #[test]
    fn builder_sets_metadata() {
        let event = Event::new("u1", 5, "view")
            .with_meta("item", "A")
            .with_meta("rank", 3_i64);
        assert_eq!(event.meta.get("item"), Some(&MetaValue::from("A")));
        assert_eq!(event.meta.get("rank"), Some(&MetaValue::from(3_i64)));
    }
}
