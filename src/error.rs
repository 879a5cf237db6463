//! Error types for `Junkyard`
//!
//! Errors only surface at the edges: configuration and catalog loading, and
//! programmatic tag selection. Nothing on the activation path returns an error;
//! those failures are logged and swallowed by the controller.

use thiserror::Error;

/// Simple error type for wrapping string messages while implementing `std::error::Error`
#[derive(Debug, Error)]
#[error("{0}")]
pub struct StringError(pub String);

impl StringError {
    /// Create a new `StringError` from a string message
    pub fn new(msg: impl Into<String>) -> Box<Self> {
        Box::new(Self(msg.into()))
    }
}

/// Main error type for `Junkyard`
#[derive(Debug, Error)]
pub enum JunkyardError {
    /// Configuration error
    /// Preserves the underlying error source for full error chain transparency
    #[error("Configuration error: {0}")]
    ConfigError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Gallery data (tags, cards, icons) could not be used
    #[error("Gallery data error: {0}")]
    DataError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A tag id that is neither `all` nor present in the current tag set
    #[error("Unknown tag: {0}")]
    UnknownTag(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias for `Junkyard` operations
pub type Result<T> = std::result::Result<T, JunkyardError>;

/// Convert an error to a message suitable for a terminal user of the replay tool
pub fn get_user_friendly_error(error: &JunkyardError) -> String {
    match error {
        JunkyardError::ConfigError(_) => "Failed to load or save configuration.\n\n\
             Default delays and thresholds will be used.\n\
             Check that JUNKYARD_HOME points to a writable directory."
            .to_string(),
        JunkyardError::DataError(e) => {
            format!(
                "The gallery data could not be loaded:\n\n{e}\n\n\
                 Expected tags.json, cards.json and optionally icons.json."
            )
        }
        JunkyardError::UnknownTag(tag) => {
            format!(
                "Unknown tag: {tag}\n\n\
                 Use 'all' or one of the tag ids from tags.json."
            )
        }
        JunkyardError::IoError(e) => {
            format!(
                "A file system error occurred:\n\n{e}\n\n\
                 Please check file permissions and paths."
            )
        }
        JunkyardError::JsonError(e) => {
            format!(
                "A JSON file is malformed:\n\n{e}\n\n\
                 Fix the file or remove it to fall back to defaults."
            )
        }
    }
}
