//! Error types for DocSearch.
//!
//! Transport and decode failures both end up on the widget's fetch-error path: they
//! are logged and the suggestion panel is left as it was.

use thiserror::Error;

/// Main error type for DocSearch operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Request to search endpoint failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Search endpoint returned a non-JSON body: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Invalid search endpoint '{0}'")]
    InvalidEndpoint(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type alias for DocSearch operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether the error came from a fetch (as opposed to setup).
    ///
    /// Fetch errors are logged and swallowed by the widget; setup errors abort startup.
    pub fn is_fetch_error(&self) -> bool {
        matches!(self, Error::Transport(_) | Error::InvalidJson(_))
    }
}
