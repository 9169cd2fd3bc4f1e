//! Pure state transition function

use thiserror::Error;

use super::evaluator::{fold_turn, talking_duration};
use super::state::{ExchangePhase, GamePhase, GameState, Sender, Turn};
use super::{Effect, Event};
use crate::config::GameConfig;

/// Result of a state transition.
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: GameState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: GameState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    /// No state change, no effects. Used for timers and round trips that
    /// land after the generation or phase they were scheduled under has
    /// moved on.
    pub fn unchanged(state: &GameState) -> Self {
        Self::new(state.clone())
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Errors that can occur during transition. All of them leave the state
/// untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Company name and industry are required to go live")]
    IncompleteProfile,
    #[error("The journalist is mid-question, hold your answer")]
    ReplyPending,
    #[error("Answers are only accepted during the interview")]
    NotAcceptingAnswers,
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

/// Pure transition function.
///
/// Given the same state, config and event this always produces the same
/// result; all I/O happens in the runtime when it executes the returned
/// effects.
pub fn transition(
    state: &GameState,
    config: &GameConfig,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match (&state.phase, event) {
        // ============================================================
        // Setup: profile intake gates on name + industry
        // ============================================================
        (GamePhase::Setup, Event::ProfileSubmitted { profile }) => {
            if !profile.can_go_live() {
                return Err(TransitionError::IncompleteProfile);
            }
            let mut next = state.clone();
            next.phase = GamePhase::Intro;
            next.profile = Some(profile);
            Ok(TransitionResult::new(next)
                .with_effect(Effect::ScheduleIntroEnd {
                    delay: config.intro_duration,
                })
                .with_effect(Effect::PublishState))
        }

        (_, Event::ProfileSubmitted { .. }) => Err(TransitionError::InvalidTransition(
            "a profile can only be submitted from setup".to_string(),
        )),

        // ============================================================
        // Intro: time-boxed, no input; rolls into the interview and
        // kicks off the opening request concurrently
        // ============================================================
        (GamePhase::Intro, Event::IntroElapsed { generation })
            if generation == state.generation =>
        {
            let Some(profile) = state.profile.clone() else {
                return Err(TransitionError::InvalidTransition(
                    "intro without a profile".to_string(),
                ));
            };
            let mut next = state.clone();
            next.phase = GamePhase::Interview {
                exchange: ExchangePhase::AwaitingOpening,
            };
            Ok(TransitionResult::new(next)
                .with_effect(Effect::BeginSession { profile })
                .with_effect(Effect::PublishState))
        }

        // ============================================================
        // Interview: one collaborator round trip per accepted answer
        // ============================================================
        (
            GamePhase::Interview {
                exchange: ExchangePhase::AwaitingOpening,
            },
            Event::OpeningReady { turn, generation },
        ) if generation == state.generation => Ok(journalist_turn(state, config, turn)),

        (
            GamePhase::Interview {
                exchange: ExchangePhase::AwaitingAnswer,
            },
            Event::AnswerSubmitted { text },
        ) => {
            let mut next = state.clone();
            next.phase = GamePhase::Interview {
                exchange: ExchangePhase::AwaitingReply,
            };
            Ok(TransitionResult::new(next)
                .with_effect(Effect::AppendUser { text: text.clone() })
                .with_effect(Effect::RequestReply { text })
                .with_effect(Effect::PublishState))
        }

        // Loading guard: input is blocked while a round trip is out or
        // the segment is wrapping up.
        (GamePhase::Interview { .. }, Event::AnswerSubmitted { .. }) => {
            Err(TransitionError::ReplyPending)
        }
        (_, Event::AnswerSubmitted { .. }) => Err(TransitionError::NotAcceptingAnswers),

        (
            GamePhase::Interview {
                exchange: ExchangePhase::AwaitingReply,
            },
            Event::ReplyReady { turn, generation },
        ) if generation == state.generation => Ok(journalist_turn(state, config, turn)),

        // ============================================================
        // Termination display delay elapsed
        // ============================================================
        (
            GamePhase::Interview {
                exchange: ExchangePhase::WrappingUp,
            },
            Event::SummaryDue { generation },
        ) if generation == state.generation => {
            let mut next = state.clone();
            next.phase = GamePhase::Summary;
            Ok(TransitionResult::new(next)
                .with_effect(Effect::CloseSession)
                .with_effect(Effect::PublishState))
        }

        // ============================================================
        // Full reset: everything is rebuilt under a new generation, so
        // in-flight timers and round trips land dead
        // ============================================================
        (_, Event::RestartRequested) => Ok(TransitionResult::new(state.reset(config))
            .with_effect(Effect::CloseSession)
            .with_effect(Effect::ClearTranscript)
            .with_effect(Effect::PublishState)),

        // Stale or out-of-phase timers and round trips are no-ops.
        (
            _,
            Event::IntroElapsed { .. }
            | Event::OpeningReady { .. }
            | Event::ReplyReady { .. }
            | Event::SummaryDue { .. }
            | Event::TalkingElapsed { .. },
        ) => Ok(TransitionResult::unchanged(state)),
    }
}

/// Fold a journalist turn into the state, append it to the transcript and
/// decide whether the segment goes on or wraps up.
///
/// The question-cap check reads the count after this turn's increment, so
/// the capping question ends the segment with no one-turn lag.
fn journalist_turn(state: &GameState, config: &GameConfig, turn: Turn) -> TransitionResult {
    let interview = fold_turn(&state.interview, &turn, Sender::Journalist);
    let over = turn.interview_over || interview.question_count >= interview.max_questions;

    let mut next = state.clone();
    next.interview = interview;
    next.phase = GamePhase::Interview {
        exchange: if over {
            ExchangePhase::WrappingUp
        } else {
            ExchangePhase::AwaitingAnswer
        },
    };

    let cue = talking_duration(&turn.text);
    let mut result = TransitionResult::new(next)
        .with_effect(Effect::AppendJournalist { turn })
        .with_effect(Effect::CueTalking { duration: cue });
    if over {
        result = result.with_effect(Effect::ScheduleSummary {
            delay: config.summary_delay,
        });
    }
    result.with_effect(Effect::PublishState)
}
