//! Events that drive the game state machine

use super::state::{CompanyProfile, Turn};

/// Events that trigger state transitions.
///
/// Timer and round-trip completion events carry the generation they were
/// scheduled under; the transition ignores them once a restart has moved
/// the session on.
#[derive(Debug, Clone)]
pub enum Event {
    /// Player submitted the company profile from the setup screen.
    ProfileSubmitted { profile: CompanyProfile },

    /// The intro sequence timer fired.
    IntroElapsed { generation: u64 },

    /// The opening round trip resolved (possibly to the fallback turn).
    OpeningReady { turn: Turn, generation: u64 },

    /// Player submitted an answer.
    AnswerSubmitted { text: String },

    /// A reply round trip resolved (possibly to the fallback turn).
    ReplyReady { turn: Turn, generation: u64 },

    /// The post-termination display delay elapsed.
    SummaryDue { generation: u64 },

    /// The talking cue expired. Intercepted by the runtime and never fed
    /// to `transition`: the cue is presentation state only.
    TalkingElapsed { generation: u64 },

    /// Player asked for a fresh segment.
    RestartRequested,
}
