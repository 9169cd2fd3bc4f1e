//! Game state types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;

/// The company profile the player takes on air. Frozen once the segment
/// starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub name: String,
    pub industry: String,
    pub mission: String,
}

impl CompanyProfile {
    /// Whether the profile can go live. Name and industry gate the
    /// transition; the mission is only checked at the input boundary.
    pub fn can_go_live(&self) -> bool {
        !self.name.trim().is_empty() && !self.industry.trim().is_empty()
    }
}

/// Audience/market reaction attached to a journalist turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

/// One structured reply from the journalist collaborator.
///
/// The serde shape is the collaborator wire contract:
/// `{text, sentiment, stockChange, isInterviewOver}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub text: String,
    pub sentiment: Sentiment,
    #[serde(rename = "stockChange")]
    pub stock_change: f64,
    #[serde(rename = "isInterviewOver")]
    pub interview_over: bool,
}

/// Who authored a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Journalist,
}

/// A transcript entry. Journalist entries carry the simulation deltas;
/// user entries cannot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "sender", rename_all = "lowercase")]
pub enum Message {
    User {
        id: String,
        text: String,
        at: DateTime<Utc>,
    },
    Journalist {
        id: String,
        text: String,
        sentiment: Sentiment,
        stock_impact: f64,
        at: DateTime<Utc>,
    },
}

impl Message {
    #[allow(dead_code)] // Query utility
    pub fn id(&self) -> &str {
        match self {
            Message::User { id, .. } | Message::Journalist { id, .. } => id,
        }
    }

    #[allow(dead_code)] // Query utility
    pub fn text(&self) -> &str {
        match self {
            Message::User { text, .. } | Message::Journalist { text, .. } => text,
        }
    }

    #[allow(dead_code)] // Query utility
    pub fn sender(&self) -> Sender {
        match self {
            Message::User { .. } => Sender::User,
            Message::Journalist { .. } => Sender::Journalist,
        }
    }
}

/// Running simulation aggregate, owned by the state machine and updated
/// only through the turn evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewState {
    pub stock_price: f64,
    /// Clamped to [0, 100].
    pub audience_sentiment: i32,
    pub question_count: u32,
    pub max_questions: u32,
}

impl InterviewState {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            stock_price: config.initial_stock_price,
            audience_sentiment: config.initial_sentiment,
            question_count: 0,
            max_questions: config.max_questions,
        }
    }
}

/// Where the loop is within the `Interview` phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExchangePhase {
    /// Opening round trip in flight; no input accepted yet.
    AwaitingOpening,
    /// Ready for the player's next answer.
    AwaitingAnswer,
    /// Reply round trip in flight; input is blocked.
    AwaitingReply,
    /// Segment terminated; the summary timer is pending and input stays
    /// blocked while the final exchange renders.
    WrappingUp,
}

/// Broadcast phase, strictly forward-progressing within one segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GamePhase {
    Setup,
    Intro,
    Interview { exchange: ExchangePhase },
    Summary,
}

impl GamePhase {
    /// True while a collaborator round trip is outstanding.
    #[allow(dead_code)] // Query utility
    pub fn round_trip_outstanding(&self) -> bool {
        matches!(
            self,
            GamePhase::Interview {
                exchange: ExchangePhase::AwaitingOpening | ExchangePhase::AwaitingReply
            }
        )
    }
}

/// Full machine state for one game session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub profile: Option<CompanyProfile>,
    pub interview: InterviewState,
    /// Bumped on every restart. Timers and round-trip completions carry
    /// the generation they were scheduled under and land dead once it is
    /// stale.
    pub generation: u64,
}

impl GameState {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            phase: GamePhase::Setup,
            profile: None,
            interview: InterviewState::new(config),
            generation: 0,
        }
    }

    /// Fresh state for the next segment, under a new generation.
    pub fn reset(&self, config: &GameConfig) -> Self {
        Self {
            generation: self.generation + 1,
            ..Self::new(config)
        }
    }
}
