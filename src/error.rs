//! Error types for grammar-highlight

use thiserror::Error;

/// Result type alias for highlighting operations
pub type Result<T> = std::result::Result<T, HighlightError>;

/// Highlighting error types
///
/// Ordinary non-matches and unexpected grammar faults never show up here:
/// the first drive the scan cursor, the second go to a diagnostic sink.
#[derive(Error, Debug)]
pub enum HighlightError {
    #[error("cannot highlight input that is not text: {0}")]
    InvalidInput(#[from] std::str::Utf8Error),

    #[error("grammar failed while skipping at offset {offset}: {message}")]
    FatalGrammar { offset: usize, message: String },

    #[error("invalid pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid language definition: {0}")]
    Definition(String),

    #[error("failed to parse language definition: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
