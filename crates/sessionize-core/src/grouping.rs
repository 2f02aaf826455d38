//! Session-run detection over ordered events.
//!
//! A run is a maximal contiguous block of one user's events in which every
//! event follows its immediate predecessor by at most the gap threshold.
//! The check is strictly pairwise: a long run is fine as long as no single
//! step exceeds the threshold.
//!
//! ```text
//! u1: 1000 --500--> 1500 --100--> 1600 --700--> 2300
//!     [------------ run 1 -----------]    [run 2]
//! ```

use sessionize_types::Event;

/// Gap threshold used when none is supplied, in seconds.
pub const DEFAULT_GAP_THRESHOLD_SECS: u64 = 600;

/// Return whether `later` follows `earlier` by at most `gap_threshold`.
///
/// The boundary is inclusive. A `later` that precedes `earlier` is never
/// within the gap.
pub const fn within_gap(earlier: i64, later: i64, gap_threshold: u64) -> bool {
    later >= earlier && later.abs_diff(earlier) <= gap_threshold
}

/// Return whether `next` extends the run that `prev` currently ends.
///
/// The boundary is inclusive: a gap of exactly `gap_threshold` continues
/// the run.
pub fn continues_run(prev: &Event, next: &Event, gap_threshold: u64) -> bool {
    prev.user_id == next.user_id && within_gap(prev.ts, next.ts, gap_threshold)
}

/// Split ordered events into runs.
///
/// `ordered` must already be sorted by `(user_id, ts)`, as produced by
/// [`order_events`](crate::ordering::order_events).
pub const fn runs<'s, 'e>(ordered: &'s [&'e Event], gap_threshold: u64) -> Runs<'s, 'e> {
    Runs {
        remaining: ordered,
        gap_threshold,
    }
}

/// Lazy iterator over the runs of an ordered event slice.
///
/// Each item is a non-empty sub-slice of the input. Concatenating every item
/// reproduces the input exactly.
#[derive(Debug, Clone)]
pub struct Runs<'s, 'e> {
    remaining: &'s [&'e Event],
    gap_threshold: u64,
}

impl<'s, 'e> Iterator for Runs<'s, 'e> {
    type Item = &'s [&'e Event];

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining.is_empty() {
            return None;
        }

        let gap_threshold = self.gap_threshold;
        let len = self
            .remaining
            .windows(2)
            .position(|pair| match pair {
                [prev, next] => !continues_run(prev, next, gap_threshold),
                _ => true,
            })
            .map_or(self.remaining.len(), |split| split.saturating_add(1));

        let (run, rest) = self.remaining.split_at(len);
        self.remaining = rest;
        Some(run)
    }
}
