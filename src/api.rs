//! HTTP API for the interview broadcast

mod handlers;
mod sse;
mod types;

pub use handlers::create_router;

use crate::runtime::GameHandle;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub game: GameHandle,
}

impl AppState {
    pub fn new(game: GameHandle) -> Self {
        Self { game }
    }
}
