//! Earliest-wins deep merge of event metadata.
//!
//! Values already in the accumulator always win. Incoming values only fill
//! keys the accumulator does not have yet, except that two maps under the
//! same key are merged recursively by the same rule:
//!
//! | accumulator | incoming | result |
//! |-------------|----------|--------|
//! | absent      | any      | incoming (owned copy) |
//! | map         | map      | recursive merge |
//! | map         | scalar   | accumulator |
//! | scalar      | map      | accumulator |
//! | scalar      | scalar   | accumulator |
//!
//! Every inserted value is cloned, so the accumulator owns its whole tree
//! and never shares structure with the events it was built from.

use std::collections::btree_map::Entry;

use sessionize_types::{MetaValue, Metadata};

/// Merge `incoming` into `acc` in place, keeping `acc`'s value on conflict.
pub fn merge_into(acc: &mut Metadata, incoming: &Metadata) {
    for (key, value) in incoming {
        match acc.entry(key.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(value.clone());
            }
            Entry::Occupied(mut slot) => {
                if let (MetaValue::Map(existing), MetaValue::Map(nested)) = (slot.get_mut(), value)
                {
                    merge_into(existing, nested);
                }
                // Any other pairing is a conflict: the earlier value stays.
            }
        }
    }
}

/// Fold `incoming` into an owned accumulator and hand it back.
pub fn merge(mut acc: Metadata, incoming: &Metadata) -> Metadata {
    merge_into(&mut acc, incoming);
    acc
}
