//! Conversation collaborator boundary
//!
//! The journalist's dialogue always comes from an external generation
//! service. The traits here are the only surface the game runtime sees;
//! implementations substitute fixed fallback turns on any failure, so a
//! round trip never surfaces an error to the state machine.

mod error;
mod gemini;

pub use error::{JournalistError, JournalistErrorKind};
pub use gemini::GeminiJournalist;

use std::sync::Arc;

use async_trait::async_trait;

use crate::state_machine::{CompanyProfile, Sentiment, Turn};

/// Factory for interview-scoped collaborator sessions.
pub trait Journalist: Send + Sync {
    /// Create a fresh session for one interview. Any session created
    /// earlier is implicitly dead: the runtime drops its handle, and
    /// results still in flight land on a stale generation.
    fn session(&self, profile: &CompanyProfile) -> Arc<dyn JournalistSession>;
}

/// One live interview conversation. Conversation history lives behind
/// this handle; the game core never replays or reconstructs it.
#[async_trait]
pub trait JournalistSession: Send + Sync {
    /// Opening round trip. Resolves to [`fallback_opening`] on any
    /// failure.
    async fn begin(&self) -> Turn;

    /// Next turn for the player's answer. Resolves to [`fallback_reply`]
    /// on any failure.
    async fn reply(&self, text: &str) -> Turn;
}

/// Opening substituted when the collaborator cannot be reached at the top
/// of the segment.
pub fn fallback_opening() -> Turn {
    Turn {
        text: "Welcome to the show. Tell us about your company.".to_string(),
        sentiment: Sentiment::Neutral,
        stock_change: 0.0,
        interview_over: false,
    }
}

/// Reply substituted when a round trip fails mid-interview. The small
/// negative delta reads on air as a technical stumble.
pub fn fallback_reply() -> Turn {
    Turn {
        text: "We seem to be having technical difficulties. Let's move on.".to_string(),
        sentiment: Sentiment::Neutral,
        stock_change: -1.5,
        interview_over: false,
    }
}
