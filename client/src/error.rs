//! Error types for the menu client

use thiserror::Error;

/// Errors that can occur when talking to the menu backend
///
/// Cloneable so a failure can travel inside an action back into a store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientError {
    /// Invalid client configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Network, DNS or timeout failure
    #[error("Request failed: {0}")]
    Transport(String),

    /// The resource does not exist (HTTP 404)
    #[error("Not found: {path}")]
    NotFound {
        /// Request path that returned 404
        path: String,
    },

    /// Any other non-success status
    #[error("API error (status {status}): {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, if any
        body: String,
    },

    /// Response body was not the expected JSON
    #[error("Response parsing failed: {0}")]
    Decode(String),
}

impl ClientError {
    /// Whether this error means the requested resource is absent
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
