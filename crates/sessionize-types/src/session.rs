//! Folded per-session records: the sessionizer's output.

use serde::{Deserialize, Serialize};

use crate::value::Metadata;

/// One user's session: a maximal run of events with no internal gap above
/// the threshold, folded into a single record.
///
/// Field order is the serialized order: `user_id`, `start_ts`, `end_ts`,
/// `types`, `meta`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// The user the session belongs to.
    pub user_id: String,
    /// Timestamp of the first event in the run.
    pub start_ts: i64,
    /// Timestamp of the last event in the run.
    pub end_ts: i64,
    /// Event types in order, with adjacent duplicates collapsed.
    pub types: Vec<String>,
    /// Earliest-wins deep merge of every event's metadata.
    pub meta: Metadata,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MetaValue;

    #[test]
    fn serializes_fields_in_declared_order() {
        let mut meta = Metadata::new();
        meta.insert("page".to_owned(), MetaValue::from("/"));
        let session = Session {
            user_id: "u1".to_owned(),
            start_ts: 1,
            end_ts: 2,
            types: vec!["click".to_owned()],
            meta,
        };

        let json = serde_json::to_string(&session).unwrap_or_default();
        assert_eq!(
            json,
            r#"{"user_id":"u1","start_ts":1,"end_ts":2,"types":["click"],"meta":{"page":"/"}}"#
        );
    }
}
