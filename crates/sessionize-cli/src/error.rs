//! Error types for the sessionize binary.
//!
//! [`CliError`] is the top-level error type that wraps every failure mode
//! between sessionizing and writing the document to stdout.

/// Top-level error for the sessionize binary.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Sessions could not be rendered.
    #[error("render error: {source}")]
    Render {
        /// The underlying render error.
        #[from]
        source: sessionize_core::RenderError,
    },

    /// Writing the rendered document failed.
    #[error("failed to write output: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}
