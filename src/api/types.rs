//! API request and response types

use serde::{Deserialize, Serialize};

/// Request to put a company on air.
#[derive(Debug, Deserialize)]
pub struct ProfileRequest {
    pub name: String,
    pub industry: String,
    pub mission: String,
}

/// Request to answer the journalist's current question.
#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub text: String,
}

/// Response for queued player actions.
#[derive(Debug, Serialize)]
pub struct QueuedResponse {
    pub queued: bool,
}

/// Error payload.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
