//! Sessionize demonstration binary.
//!
//! Runs the sessionizer over a fixed, embedded event set and prints the
//! resulting sessions to stdout as a pretty JSON array. The binary takes no
//! flags and reads no files.
//!
//! # Sequence
//!
//! 1. Initialize structured logging (tracing, to stderr)
//! 2. Build the demonstration events
//! 3. Sessionize with the default 600s gap threshold
//! 4. Audit the result and log any violations
//! 5. Render and write the JSON document

mod error;

use std::io::Write as _;

use sessionize_core::{
    AuditResult, PrettyJsonRenderer, SessionRenderer, Sessionizer, SessionizerConfig,
    audit_sessions,
};
use sessionize_types::Event;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::CliError;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if rendering or writing to stdout fails.
fn main() -> Result<(), CliError> {
    // Logs go to stderr so stdout carries only the JSON document.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let sessionizer = Sessionizer::new(SessionizerConfig::default());
    let events = demo_events();
    info!(
        event_count = events.len(),
        gap_threshold_secs = sessionizer.gap_threshold_secs(),
        "sessionizing demonstration events"
    );

    let sessions = sessionizer.run(&events);
    info!(session_count = sessions.len(), "sessions built");

    match audit_sessions(&events, &sessions, sessionizer.gap_threshold_secs()) {
        AuditResult::Consistent => info!("session audit passed"),
        AuditResult::Violations(violations) => {
            for violation in &violations {
                warn!(%violation, "session audit violation");
            }
        }
    }

    let document = PrettyJsonRenderer.render(&sessions)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{document}")?;
    stdout.flush()?;

    Ok(())
}

/// The fixed demonstration input.
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
