//! Shared type definitions for sessionize.
//!
//! This crate is the single source of truth for the values that flow through
//! the sessionizer: the raw [`Event`] input, the folded [`Session`] output,
//! and the dynamically-typed [`MetaValue`] tree carried by both.
//!
//! # Modules
//!
//! - [`value`] -- [`MetaValue`] and the [`Metadata`] map alias
//! - [`event`] -- Timestamped user events (input)
//! - [`session`] -- Merged per-session records (output)

pub mod event;
pub mod session;
pub mod value;

// Re-export all public types at crate root for convenience.
pub use event::Event;
pub use session::Session;
pub use value::{MetaValue, Metadata, metadata_from_json};
