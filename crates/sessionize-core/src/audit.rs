//! Session invariant verification.
//!
//! [`audit_sessions`] re-derives, from the original events alone, every
//! property a correct sessionizing pass must satisfy and reports each one
//! that does not hold:
//!
//! - every event falls inside exactly one session of its user;
//! - every session's span is exactly the min/max timestamp of its events;
//! - consecutive events inside a session are at most `gap_threshold` apart;
//! - consecutive sessions of one user are more than `gap_threshold` apart;
//! - no type sequence repeats an entry back to back;
//! - output is ordered by `start_ts`.
//!
//! The sessionizer satisfies all of these by construction. The audit exists
//! for callers that assemble or transform session lists themselves.

use std::collections::BTreeMap;

use sessionize_types::{Event, Session};

use crate::grouping::within_gap;
use crate::ordering::order_events;

/// The outcome of auditing a session list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditResult {
    /// Every invariant holds.
    Consistent,
    /// One or more invariants were violated.
    Violations(Vec<AuditViolation>),
}

impl AuditResult {
    /// Return whether every invariant holds.
    pub const fn is_consistent(&self) -> bool {
        matches!(self, Self::Consistent)
    }
}

/// A single broken session invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuditViolation {
    /// An event is not covered by any session of its user.
    #[error("event for {user_id} at {ts} is not covered by any session")]
    UncoveredEvent {
        /// The event's user.
        user_id: String,
        /// The event's timestamp.
        ts: i64,
    },

    /// An event is covered by more than one session of its user.
    #[error("event for {user_id} at {ts} is covered by {count} sessions")]
    OverlappingSessions {
        /// The event's user.
        user_id: String,
        /// The event's timestamp.
        ts: i64,
        /// How many sessions cover it.
        count: usize,
    },

    /// A session covers no event at all.
    #[error("session for {user_id} spanning {start_ts}..={end_ts} covers no events")]
    EmptySession {
        /// The session's user.
        user_id: String,
        /// Session start.
        start_ts: i64,
        /// Session end.
        end_ts: i64,
    },

    /// A session's span differs from the span of the events it covers.
    #[error(
        "session for {user_id} spans {start_ts}..={end_ts} but its events span {first_ts}..={last_ts}"
    )]
    SpanMismatch {
        /// The session's user.
        user_id: String,
        /// Session start.
        start_ts: i64,
        /// Session end.
        end_ts: i64,
        /// Earliest covered event.
        first_ts: i64,
        /// Latest covered event.
        last_ts: i64,
    },

    /// Two consecutive events inside one session are too far apart.
    #[error("session for {user_id} has a gap from {prev_ts} to {next_ts}")]
    InternalGap {
        /// The session's user.
        user_id: String,
        /// The earlier event.
        prev_ts: i64,
        /// The later event.
        next_ts: i64,
    },

    /// Two consecutive sessions of one user should have been one session.
    #[error("sessions for {user_id} ending {end_ts} and starting {next_start_ts} are not split")]
    UnsplitBoundary {
        /// The sessions' user.
        user_id: String,
        /// End of the earlier session.
        end_ts: i64,
        /// Start of the later session.
        next_start_ts: i64,
    },

    /// A type sequence contains the same type twice in a row.
    #[error("session for {user_id} starting {start_ts} repeats type {kind:?}")]
    RepeatedType {
        /// The session's user.
        user_id: String,
        /// Session start.
        start_ts: i64,
        /// The repeated type.
        kind: String,
    },

    /// A session starts earlier than the session listed before it.
    #[error("session at position {position} starts before its predecessor")]
    UnorderedOutput {
        /// Zero-based position of the out-of-order session.
        position: usize,
    },
}

/// Audit `sessions` against the `events` they were built from.
pub fn audit_sessions(
    events: &[Event],
    sessions: &[Session],
    gap_threshold: u64,
) -> AuditResult {
    let mut violations = Vec::new();

    for (position, pair) in sessions.windows(2).enumerate() {
        if let [prev, next] = pair {
            if next.start_ts < prev.start_ts {
                violations.push(AuditViolation::UnorderedOutput {
                    position: position.saturating_add(1),
                });
            }
        }
    }

    let mut events_by_user: BTreeMap<&str, Vec<&Event>> = BTreeMap::new();
    for event in order_events(events) {
        events_by_user.entry(&event.user_id).or_default().push(event);
    }

    let mut sessions_by_user: BTreeMap<&str, Vec<&Session>> = BTreeMap::new();
    for session in sessions {
        sessions_by_user
            .entry(&session.user_id)
            .or_default()
            .push(session);
    }
    for user_sessions in sessions_by_user.values_mut() {
        user_sessions.sort_by_key(|s| s.start_ts);
    }

    for (user_id, user_events) in &events_by_user {
        let user_sessions = sessions_by_user
            .get(user_id)
            .map_or(&[][..], Vec::as_slice);
        check_coverage(user_id, user_events, user_sessions, &mut violations);
    }

    for (user_id, user_sessions) in &sessions_by_user {
        let user_events = events_by_user.get(user_id).map_or(&[][..], Vec::as_slice);
        for session in user_sessions {
            check_session(session, user_events, gap_threshold, &mut violations);
        }
        check_boundaries(user_id, user_sessions, gap_threshold, &mut violations);
    }

    if violations.is_empty() {
        AuditResult::Consistent
    } else {
        AuditResult::Violations(violations)
    }
}

const fn covers(session: &Session, ts: i64) -> bool {
    session.start_ts <= ts && ts <= session.end_ts
}

/// Every event must sit inside exactly one of its user's sessions.
fn check_coverage(
    user_id: &str,
    events: &[&Event],
    sessions: &[&Session],
    violations: &mut Vec<AuditViolation>,
) {
    for event in events {
        let count = sessions.iter().filter(|s| covers(s, event.ts)).count();
        match count {
            1 => {}
            0 => violations.push(AuditViolation::UncoveredEvent {
                user_id: user_id.to_owned(),
                ts: event.ts,
            }),
            _ => violations.push(AuditViolation::OverlappingSessions {
                user_id: user_id.to_owned(),
                ts: event.ts,
                count,
            }),
        }
    }
}

/// Span, internal gaps, and type sequence of a single session.
fn check_session(
    session: &Session,
    user_events: &[&Event],
    gap_threshold: u64,
    violations: &mut Vec<AuditViolation>,
) {
    for pair in session.types.windows(2) {
        if let [prev, next] = pair {
            if prev == next {
                violations.push(AuditViolation::RepeatedType {
                    user_id: session.user_id.clone(),
                    start_ts: session.start_ts,
                    kind: next.clone(),
                });
            }
        }
    }

    // `user_events` is sorted by timestamp, so the covered events are too.
    let covered: Vec<i64> = user_events
        .iter()
        .map(|e| e.ts)
        .filter(|ts| covers(session, *ts))
        .collect();

    let (Some(&first_ts), Some(&last_ts)) = (covered.first(), covered.last()) else {
        violations.push(AuditViolation::EmptySession {
            user_id: session.user_id.clone(),
            start_ts: session.start_ts,
            end_ts: session.end_ts,
        });
        return;
    };

    if first_ts != session.start_ts || last_ts != session.end_ts {
        violations.push(AuditViolation::SpanMismatch {
            user_id: session.user_id.clone(),
            start_ts: session.start_ts,
            end_ts: session.end_ts,
            first_ts,
            last_ts,
        });
    }

    for pair in covered.windows(2) {
        if let &[prev_ts, next_ts] = pair {
            if !within_gap(prev_ts, next_ts, gap_threshold) {
                violations.push(AuditViolation::InternalGap {
                    user_id: session.user_id.clone(),
                    prev_ts,
                    next_ts,
                });
            }
        }
    }
}

/// Consecutive sessions of one user must be separated by more than the gap.
fn check_boundaries(
    user_id: &str,
    sessions: &[&Session],
    gap_threshold: u64,
    violations: &mut Vec<AuditViolation>,
) {
    for pair in sessions.windows(2) {
        if let [prev, next] = pair {
            let split = next.start_ts > prev.end_ts
                && !within_gap(prev.end_ts, next.start_ts, gap_threshold);
            if !split {
                violations.push(AuditViolation::UnsplitBoundary {
                    user_id: user_id.to_owned(),
                    end_ts: prev.end_ts,
                    next_start_ts: next.start_ts,
                });
            }
        }
    }
}
