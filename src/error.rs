//! Error types shared by every operation in the crate.

use std::path::PathBuf;

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, ZenodoError>;

/// Errors that can occur when searching Zenodo or downloading record files
#[derive(Debug, thiserror::Error)]
pub enum ZenodoError {
    /// The server answered with a status other than the expected one
    #[error("Request failed with status code {status}")]
    RequestFailed {
        /// HTTP status code returned by the server
        status: u16,
    },

    /// The caller handed over a value of the wrong shape
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// An expected field is absent (dotted path for nested fields)
    #[error("Missing field: {0}")]
    MissingField(String),

    /// A field exists but holds a different kind of value
    #[error("Field '{field}' is not a {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
    },

    /// Status code not covered by the explanation tables
    #[error("No explanation available for status code {0}")]
    LookupFailure(u16),

    /// The search response body lacks the `hits.hits` listing
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Network or transport error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON decoding error
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// File system error while writing a download
    #[error("IO error writing to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ZenodoError {
    /// Status code carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ZenodoError::RequestFailed { status } => Some(*status),
            ZenodoError::Network(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub(crate) fn missing(field: impl Into<String>) -> Self {
        ZenodoError::MissingField(field.into())
    }
}
