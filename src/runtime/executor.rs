//! Game runtime executor

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rand::Rng;
use tokio::sync::{broadcast, mpsc, watch};
use uuid::Uuid;

use super::{GameHandle, GameSnapshot, SseEvent};
use crate::config::GameConfig;
use crate::journalist::{Journalist, JournalistSession};
use crate::state_machine::{transition, Effect, Event, GameState, Message, Turn};

/// Generic game runtime over any journalist implementation.
///
/// All state mutation happens on this task in response to a received
/// event; round trips and timers are spawned tasks that only post events
/// back, stamped with the generation they were scheduled under.
pub struct GameRuntime<J: Journalist> {
    config: GameConfig,
    state: GameState,
    transcript: Vec<Message>,
    journalist_talking: bool,
    journalist: Arc<J>,
    /// Live collaborator session; `Some` exactly while the interview
    /// phase is active.
    session: Option<Arc<dyn JournalistSession>>,
    event_rx: mpsc::Receiver<Event>,
    event_tx: mpsc::Sender<Event>,
    broadcast_tx: broadcast::Sender<SseEvent>,
    snapshot_tx: watch::Sender<GameSnapshot>,
}

impl<J: Journalist + 'static> GameRuntime<J> {
    /// Build a runtime and its handle. `run()` must be spawned for the
    /// handle to make progress.
    pub fn new(config: GameConfig, journalist: Arc<J>) -> (Self, GameHandle) {
        let state = GameState::new(&config);
        let (event_tx, event_rx) = mpsc::channel(32);
        let (broadcast_tx, _) = broadcast::channel(128);
        let (snapshot_tx, snapshot_rx) = watch::channel(GameSnapshot {
            phase: state.phase,
            company: None,
            interview: state.interview.clone(),
            transcript: Vec::new(),
            journalist_talking: false,
        });

        let handle = GameHandle {
            event_tx: event_tx.clone(),
            broadcast_tx: broadcast_tx.clone(),
            snapshot_rx,
        };

        let runtime = Self {
            config,
            state,
            transcript: Vec::new(),
            journalist_talking: false,
            journalist,
            session: None,
            event_rx,
            event_tx,
            broadcast_tx,
            snapshot_tx,
        };

        (runtime, handle)
    }

    pub async fn run(mut self) {
        tracing::info!("Starting game runtime");

        while let Some(event) = self.event_rx.recv().await {
            if let Err(e) = self.process_event(event) {
                tracing::debug!(error = %e, "Rejected event");
                let _ = self.broadcast_tx.send(SseEvent::Error { message: e });
            }
        }

        tracing::info!("Game runtime stopped");
    }

    fn process_event(&mut self, event: Event) -> Result<(), String> {
        // The talking cue is presentation state, not machine state; it is
        // handled here and never reaches the transition function.
        if let Event::TalkingElapsed { generation } = event {
            if generation == self.state.generation && self.journalist_talking {
                self.journalist_talking = false;
                let _ = self.broadcast_tx.send(SseEvent::Talking { active: false });
                self.publish_snapshot();
            }
            return Ok(());
        }

        let result =
            transition(&self.state, &self.config, event).map_err(|e| e.to_string())?;
        self.state = result.new_state;

        for effect in result.effects {
            self.execute_effect(effect);
        }

        Ok(())
    }

    fn execute_effect(&mut self, effect: Effect) {
        match effect {
            Effect::ScheduleIntroEnd { delay } => {
                self.schedule(delay, |generation| Event::IntroElapsed { generation });
            }

            Effect::BeginSession { profile } => {
                let session = self.journalist.session(&profile);
                self.session = Some(session.clone());

                let event_tx = self.event_tx.clone();
                let generation = self.state.generation;
                tokio::spawn(async move {
                    let turn = session.begin().await;
                    let _ = event_tx
                        .send(Event::OpeningReady { turn, generation })
                        .await;
                });
            }

            Effect::RequestReply { text } => {
                let Some(session) = self.session.clone() else {
                    tracing::error!("Reply requested without a live session");
                    return;
                };

                let event_tx = self.event_tx.clone();
                let generation = self.state.generation;
                let delay = self.reply_delay();
                tokio::spawn(async move {
                    let turn = session.reply(&text).await;
                    // Short pause before the reply lands, for broadcast
                    // realism.
                    tokio::time::sleep(delay).await;
                    let _ = event_tx.send(Event::ReplyReady { turn, generation }).await;
                });
            }

            Effect::AppendUser { text } => {
                self.append(Message::User {
                    id: Uuid::new_v4().to_string(),
                    text,
                    at: Utc::now(),
                });
            }

            Effect::AppendJournalist { turn } => {
                let Turn {
                    text,
                    sentiment,
                    stock_change,
                    ..
                } = turn;
                self.append(Message::Journalist {
                    id: Uuid::new_v4().to_string(),
                    text,
                    sentiment,
                    stock_impact: stock_change,
                    at: Utc::now(),
                });
            }

            Effect::CueTalking { duration } => {
                self.journalist_talking = true;
                let _ = self.broadcast_tx.send(SseEvent::Talking { active: true });
                self.schedule(duration, |generation| Event::TalkingElapsed { generation });
            }

            Effect::ScheduleSummary { delay } => {
                self.schedule(delay, |generation| Event::SummaryDue { generation });
            }

            Effect::CloseSession => {
                self.session = None;
            }

            Effect::ClearTranscript => {
                self.transcript.clear();
                self.journalist_talking = false;
            }

            Effect::PublishState => {
                let _ = self.broadcast_tx.send(SseEvent::StateChange {
                    phase: self.state.phase,
                    interview: self.state.interview.clone(),
                });
                self.publish_snapshot();
            }
        }
    }

    /// Fire-and-forget timer stamped with the current generation.
    fn schedule(&self, delay: Duration, make_event: impl FnOnce(u64) -> Event + Send + 'static) {
        let event_tx = self.event_tx.clone();
        let generation = self.state.generation;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = event_tx.send(make_event(generation)).await;
        });
    }

    fn append(&mut self, message: Message) {
        self.transcript.push(message.clone());
        let _ = self.broadcast_tx.send(SseEvent::Message { message });
        self.publish_snapshot();
    }

    fn publish_snapshot(&self) {
        let _ = self.snapshot_tx.send(GameSnapshot {
            phase: self.state.phase,
            company: self.state.profile.clone(),
            interview: self.state.interview.clone(),
            transcript: self.transcript.clone(),
            journalist_talking: self.journalist_talking,
        });
    }

    fn reply_delay(&self) -> Duration {
        let min = self.config.reply_delay_min.as_millis() as u64;
        let max = self.config.reply_delay_max.as_millis() as u64;
        if max <= min {
            return self.config.reply_delay_min;
        }
        Duration::from_millis(rand::thread_rng().gen_range(min..=max))
    }
}
