//! Error types for the metric client.

use thiserror::Error;

/// Errors that can occur while talking to a node.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request failed to complete.
    #[error("request failed: {0}")]
    Transport(String),

    /// Could not connect to the node.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The node did not answer in time.
    #[error("request timed out")]
    Timeout,

    /// The response body was not the expected shape.
    #[error("failed to parse response: {0}")]
    Parse(String),

    /// The node answered with an `{"error": ...}` body.
    #[error("error returned from {url}: {message}")]
    Api { url: String, message: String },
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_connect() {
            ClientError::Connection(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}
