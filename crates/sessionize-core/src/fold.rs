//! Folding a run of events into a single [`Session`].
//!
//! The [`SessionBuilder`] is the single owner of a session under
//! construction. It is seeded from the first event of a run, absorbs the
//! remaining events in timestamp order, and is consumed by
//! [`SessionBuilder::finish`], after which the session is never touched
//! again.

use sessionize_types::{Event, Session};
use tracing::debug;

use crate::merge::merge;

/// Accumulates one run of events into a [`Session`].
#[derive(Debug, Clone)]
pub struct SessionBuilder {
    session: Session,
    event_count: usize,
}

impl SessionBuilder {
    /// Start a session from the first event of a run.
    ///
    /// The event's metadata is deep-copied; the builder never borrows from
    /// the event after this call returns.
    pub fn start(first: &Event) -> Self {
        Self {
            session: Session {
                user_id: first.user_id.clone(),
                start_ts: first.ts,
                end_ts: first.ts,
                types: vec![first.kind.clone()],
                meta: first.meta.clone(),
            },
            event_count: 1,
        }
    }

    /// Absorb the next event of the run.
    ///
    /// Extends the end timestamp, appends the event type unless it repeats
    /// the last retained type, and merges metadata with earliest-wins
    /// conflict resolution.
    pub fn absorb(&mut self, event: &Event) {
        self.session.end_ts = event.ts;

        if self.session.types.last() != Some(&event.kind) {
            self.session.types.push(event.kind.clone());
        }

        let acc = std::mem::take(&mut self.session.meta);
        self.session.meta = merge(acc, &event.meta);
        self.event_count = self.event_count.saturating_add(1);
    }

    /// Number of events absorbed so far, including the first.
    pub const fn event_count(&self) -> usize {
        self.event_count
    }

    /// Finalize the session.
    pub fn finish(self) -> Session {
        self.session
    }
}

/// Fold a whole run into a session.
///
/// Returns `None` for an empty run.
pub fn fold_run(run: &[&Event]) -> Option<Session> {
    let (first, rest) = run.split_first()?;
    let mut builder = SessionBuilder::start(first);
    for event in rest {
        builder.absorb(event);
    }

    let event_count = builder.event_count();
    let session = builder.finish();
    debug!(
        user_id = session.user_id,
        start_ts = session.start_ts,
        end_ts = session.end_ts,
        event_count,
        "session closed"
    );
    Some(session)
}
