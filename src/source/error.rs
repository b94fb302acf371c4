//! Error types for country data sources.

use thiserror::Error;

/// Errors that can occur while loading the country list.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The endpoint answered with a non-success status.
    #[error("request failed with status {status}")]
    FetchFailed { status: u16 },

    /// The request could not be completed (connection failure, timeout).
    #[error("request failed: {0}")]
    Transport(String),

    /// The response body is not the expected JSON array of countries.
    #[error("failed to parse response: {0}")]
    Parse(String),

    /// Reading a local snapshot file failed.
    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            SourceError::FetchFailed {
                status: status.as_u16(),
            }
        } else {
            SourceError::Transport(err.to_string())
        }
    }
}
