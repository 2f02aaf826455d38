//! The full sessionizing pipeline: order, group, fold, assemble.

use sessionize_types::{Event, Session};
use tracing::debug;

use crate::config::SessionizerConfig;
use crate::fold::fold_run;
use crate::grouping::runs;
use crate::ordering::order_events;

/// Group `events` into sessions using `gap_threshold` seconds of inactivity
/// as the session boundary.
///
/// Sessions from all users are returned sorted by `start_ts`. The sort is
/// stable, so sessions starting at the same second keep user order. Empty
/// input yields an empty vector.
pub fn sessionize(events: &[Event], gap_threshold: u64) -> Vec<Session> {
    if events.is_empty() {
        return Vec::new();
    }

    let ordered = order_events(events);
    let mut sessions: Vec<Session> = runs(&ordered, gap_threshold)
        .filter_map(fold_run)
        .collect();

    sessions.sort_by_key(|session| session.start_ts);

    debug!(
        event_count = events.len(),
        session_count = sessions.len(),
        gap_threshold,
        "sessionized events"
    );
    sessions
}

/// A sessionizer bound to a configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sessionizer {
    config: SessionizerConfig,
}

impl Sessionizer {
    /// Create a sessionizer from a configuration.
    pub const fn new(config: SessionizerConfig) -> Self {
        Self { config }
    }

    /// The gap threshold this sessionizer splits on, in seconds.
    pub const fn gap_threshold_secs(&self) -> u64 {
        self.config.gap_threshold_secs
    }

    /// Run the pipeline over `events`.
    pub fn run(&self, events: &[Event]) -> Vec<Session> {
        sessionize(events, self.config.gap_threshold_secs)
    }
}

#[cfg(test)]
mod tests {
    use sessionize_types::MetaValue;

    use super::*;

    fn demo_events() -> Vec<Event> {
        vec![
            Event::new("u1", 1000, "click").with_meta("page", "/"),
            Event::new("u1", 1500, "click").with_meta("page", "/home"),
            Event::new("u1", 1600, "scroll").with_meta("depth", 100_i64),
            Event::new("u1", 1700, "scroll").with_meta("depth", 200_i64),
            Event::new("u1", 2200, "click").with_meta("page", "/about"),
            Event::new("u2", 1200, "view").with_meta("item", "A"),
            Event::new("u2", 1300, "view").with_meta("item", "B"),
        ]
    }

    #[test]
    fn empty_input_yields_no_sessions() {
        assert!(sessionize(&[], 600).is_empty());
    }

    #[test]
    fn demo_input_yields_two_sessions() {
        let sessions = sessionize(&demo_events(), 600);
        assert_eq!(sessions.len(), 2);

        let u1 = sessions.first();
        assert_eq!(u1.map(|s| s.user_id.as_str()), Some("u1"));
        assert_eq!(u1.map(|s| (s.start_ts, s.end_ts)), Some((1000, 2200)));
        assert_eq!(
            u1.map(|s| s.types.clone()),
            Some(vec!["click".to_owned(), "scroll".to_owned(), "click".to_owned()])
        );
        assert_eq!(
            u1.and_then(|s| s.meta.get("page")),
            Some(&MetaValue::from("/"))
        );
        assert_eq!(
            u1.and_then(|s| s.meta.get("depth")),
            Some(&MetaValue::from(100_i64))
        );

        let u2 = sessions.get(1);
        assert_eq!(u2.map(|s| s.user_id.as_str()), Some("u2"));
        assert_eq!(u2.map(|s| (s.start_ts, s.end_ts)), Some((1200, 1300)));
        assert_eq!(u2.map(|s| s.types.clone()), Some(vec!["view".to_owned()]));
        assert_eq!(
            u2.and_then(|s| s.meta.get("item")),
            Some(&MetaValue::from("A"))
        );
    }

    #[test]
    fn sessions_interleave_across_users_by_start() {
        let events = vec![
            Event::new("a", 0, "x"),
            Event::new("a", 5000, "x"),
            Event::new("b", 2000, "y"),
        ];
        let starts: Vec<(String, i64)> = sessionize(&events, 600)
            .into_iter()
            .map(|s| (s.user_id, s.start_ts))
            .collect();
        assert_eq!(
            starts,
            vec![
                ("a".to_owned(), 0),
                ("b".to_owned(), 2000),
                ("a".to_owned(), 5000),
            ]
        );
    }

    #[test]
    fn equal_starts_keep_user_order() {
        let events = vec![Event::new("b", 100, "x"), Event::new("a", 100, "x")];
        let users: Vec<String> = sessionize(&events, 600)
            .into_iter()
            .map(|s| s.user_id)
            .collect();
        assert_eq!(users, vec!["a".to_owned(), "b".to_owned()]);
    }

    #[test]
    fn input_order_does_not_change_result() {
        let mut shuffled = demo_events();
        shuffled.reverse();
        assert_eq!(sessionize(&shuffled, 600), sessionize(&demo_events(), 600));
    }

    #[test]
    fn sessionizer_uses_configured_gap() {
        let events = vec![Event::new("u1", 0, "a"), Event::new("u1", 1000, "a")];
        let narrow = Sessionizer::default();
        let wide = Sessionizer::new(SessionizerConfig {
            gap_threshold_secs: 1000,
        });
        assert_eq!(narrow.gap_threshold_secs(), 600);
        assert_eq!(narrow.run(&events).len(), 2);
        assert_eq!(wide.run(&events).len(), 1);
    }
}
