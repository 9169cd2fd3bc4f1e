//! Effects produced by state transitions

use std::time::Duration;

use super::state::{CompanyProfile, Turn};

/// Effects to be executed by the runtime after a state transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Start the intro countdown.
    ScheduleIntroEnd { delay: Duration },

    /// Open a collaborator session for `profile` and spawn the opening
    /// round trip.
    BeginSession { profile: CompanyProfile },

    /// Spawn a reply round trip for the player's answer.
    RequestReply { text: String },

    /// Append the player's text to the transcript.
    AppendUser { text: String },

    /// Append a journalist turn to the transcript.
    AppendJournalist { turn: Turn },

    /// Assert the talking indicator for `duration`, then clear it.
    CueTalking { duration: Duration },

    /// Start the post-termination display delay.
    ScheduleSummary { delay: Duration },

    /// Drop the live collaborator session.
    CloseSession,

    /// Discard the transcript (restart only).
    ClearTranscript,

    /// Publish the current state snapshot to clients.
    PublishState,
}
