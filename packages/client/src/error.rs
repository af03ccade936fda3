//! Error types for the terminal client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientError {
    /// The server refused the login (empty or duplicate nickname)
    #[error("Login rejected: {0}")]
    LoginRejected(String),

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),
}
