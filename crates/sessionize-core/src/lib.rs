//! Ordering, run detection, and metadata folding for sessionize.
//!
//! This crate turns an unordered collection of [`Event`]s into an ordered
//! collection of [`Session`]s. The pipeline is pure and synchronous:
//!
//! ```text
//! events --> order (user, ts) --> runs (gap <= threshold) --> fold --> sort by start_ts
//! ```
//!
//! # Modules
//!
//! - [`ordering`] -- Stable `(user_id, ts)` ordering over borrowed events.
//! - [`grouping`] -- The [`Runs`] iterator that splits ordered events at
//!   inactivity gaps.
//! - [`merge`] -- Earliest-wins deep merge of [`Metadata`] trees.
//! - [`fold`] -- [`SessionBuilder`]: one run in, one [`Session`] out.
//! - [`sessionizer`] -- [`sessionize`] and the config-bound [`Sessionizer`].
//! - [`audit`] -- Invariant verification for session lists.
//! - [`render`] -- The [`SessionRenderer`] trait and JSON renderers.
//! - [`config`] -- [`SessionizerConfig`] and its YAML loader.
//!
//! # Usage
//!
//! ```
//! use sessionize_core::{sessionize, DEFAULT_GAP_THRESHOLD_SECS};
//! use sessionize_types::Event;
//!
//! let events = vec![
//!     Event::new("u1", 1000, "click").with_meta("page", "/"),
//!     Event::new("u1", 1600, "click").with_meta("page", "/home"),
//!     Event::new("u1", 2201, "scroll"),
//! ];
//!
//! let sessions = sessionize(&events, DEFAULT_GAP_THRESHOLD_SECS);
//! assert_eq!(sessions.len(), 2);
//! assert_eq!(sessions[0].types, vec!["click"]);
//! ```
//!
//! [`Event`]: sessionize_types::Event
//! [`Session`]: sessionize_types::Session
//! [`Metadata`]: sessionize_types::Metadata

pub mod audit;
pub mod config;
pub mod fold;
pub mod grouping;
pub mod merge;
pub mod ordering;
pub mod render;
pub mod sessionizer;

// Re-export primary types at crate root.
pub use audit::{AuditResult, AuditViolation, audit_sessions};
pub use config::{ConfigError, SessionizerConfig};
pub use fold::{SessionBuilder, fold_run};
pub use grouping::{DEFAULT_GAP_THRESHOLD_SECS, Runs, continues_run, runs, within_gap};
pub use merge::{merge, merge_into};
pub use ordering::order_events;
pub use render::{JsonLinesRenderer, PrettyJsonRenderer, RenderError, SessionRenderer};
pub use sessionizer::{Sessionizer, sessionize};
