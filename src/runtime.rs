//! Game runtime
//!
//! One runtime task owns the whole mutable state graph (machine state,
//! transcript, talking cue, live collaborator session); everything else
//! talks to it through channels.

mod executor;


pub use executor::GameRuntime;

use serde::Serialize;
use tokio::sync::{broadcast, mpsc, watch};

use crate::state_machine::{CompanyProfile, Event, GamePhase, InterviewState, Message};

/// Cloneable front door to the running game.
#[derive(Clone)]
pub struct GameHandle {
    event_tx: mpsc::Sender<Event>,
    broadcast_tx: broadcast::Sender<SseEvent>,
    snapshot_rx: watch::Receiver<GameSnapshot>,
}

impl GameHandle {
    /// Queue an event for the runtime.
    pub async fn send_event(&self, event: Event) -> Result<(), String> {
        self.event_tx
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {e}"))
    }

    /// Subscribe to incremental game updates.
    pub fn subscribe(&self) -> broadcast::Receiver<SseEvent> {
        self.broadcast_tx.subscribe()
    }

    /// Latest full snapshot.
    pub fn snapshot(&self) -> GameSnapshot {
        self.snapshot_rx.borrow().clone()
    }
}

/// Read-only view of the game for clients.
#[derive(Debug, Clone, Serialize)]
pub struct GameSnapshot {
    pub phase: GamePhase,
    pub company: Option<CompanyProfile>,
    pub interview: InterviewState,
    pub transcript: Vec<Message>,
    pub journalist_talking: bool,
}

/// Events pushed to SSE clients.
#[derive(Debug, Clone)]
pub enum SseEvent {
    /// A transcript entry was appended.
    Message { message: Message },
    /// Phase or interview numbers changed.
    StateChange {
        phase: GamePhase,
        interview: InterviewState,
    },
    /// The journalist started or stopped talking.
    Talking { active: bool },
    /// A player action was rejected.
    Error { message: String },
}
