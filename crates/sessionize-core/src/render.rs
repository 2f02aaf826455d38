//! Output formatting for session lists.
//!
//! Rendering is kept behind the [`SessionRenderer`] trait so the pipeline
//! never depends on a particular output format.

use sessionize_types::Session;

/// Errors that can occur while rendering sessions.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// A session could not be serialized.
    #[error("failed to serialize sessions: {source}")]
    Serialize {
        /// The underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}

/// Turns a session list into text.
pub trait SessionRenderer {
    /// Render `sessions` in order.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if a session cannot be represented in the
    /// output format.
    fn render(&self, sessions: &[Session]) -> Result<String, RenderError>;
}

/// A pretty-printed JSON array with two-space indentation.
///
/// An empty list renders as `[]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrettyJsonRenderer;

impl SessionRenderer for PrettyJsonRenderer {
    fn render(&self, sessions: &[Session]) -> Result<String, RenderError> {
        Ok(serde_json::to_string_pretty(sessions)?)
    }
}

/// One compact JSON object per line.
///
/// An empty list renders as an empty string.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLinesRenderer;

impl SessionRenderer for JsonLinesRenderer {
    fn render(&self, sessions: &[Session]) -> Result<String, RenderError> {
        let mut out = String::new();
        for session in sessions {
            out.push_str(&serde_json::to_string(session)?);
            out.push('\n');
        }
        Ok(out)
    }
}
