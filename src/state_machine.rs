//! Core interview state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions:
//! events go in, a new state and a list of effects come out, and the
//! runtime is the only place effects touch the outside world.

mod effect;
pub mod evaluator;
mod event;
mod state;
mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::Event;
pub use state::{
    CompanyProfile, ExchangePhase, GamePhase, GameState, InterviewState, Message, Sender,
    Sentiment, Turn,
};
pub use transition::{transition, TransitionError, TransitionResult};
