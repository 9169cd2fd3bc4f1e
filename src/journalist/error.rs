//! Collaborator error types

use thiserror::Error;

/// Collaborator error with classification. These never cross the session
/// boundary: they are logged and replaced by a fallback turn.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct JournalistError {
    pub kind: JournalistErrorKind,
    pub message: String,
}

impl JournalistError {
    pub fn new(kind: JournalistErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(JournalistErrorKind::Network, message)
    }

    pub fn rate_limit(message: impl Into<String>) -> Self {
        Self::new(JournalistErrorKind::RateLimit, message)
    }

    pub fn server_error(message: impl Into<String>) -> Self {
        Self::new(JournalistErrorKind::ServerError, message)
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::new(JournalistErrorKind::Auth, message)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(JournalistErrorKind::InvalidRequest, message)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(JournalistErrorKind::Malformed, message)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(JournalistErrorKind::Unknown, message)
    }
}

/// Error classification, for logging and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JournalistErrorKind {
    /// Network issues, timeouts
    Network,
    /// Rate limited (429)
    RateLimit,
    /// Server error (5xx)
    ServerError,
    /// Authentication failed (401, 403) or missing credential
    Auth,
    /// Bad request (400)
    InvalidRequest,
    /// Response did not match the turn contract
    Malformed,
    /// Unknown error
    Unknown,
}
