//! Event ordering by user and time.

use sessionize_types::Event;

/// Order events by `(user_id, ts)` ascending.
///
/// Returns borrowed references; the input slice is left untouched. The sort
/// is stable, so events sharing a user and timestamp keep their input order.
pub fn order_events(events: &[Event]) -> Vec<&Event> {
    let mut ordered: Vec<&Event> = events.iter().collect();
    ordered.sort_by(|a, b| a.user_id.cmp(&b.user_id).then(a.ts.cmp(&b.ts)));
    ordered
}
