//! Hot Seat - televised interview simulation backend
//!
//! A Rust backend implementing the turn-based interview state machine
//! behind the "Hot Seat" broadcast game, with the journalist's dialogue
//! supplied by an external generation service.

mod api;
mod config;
mod journalist;
mod runtime;
mod state_machine;

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::{create_router, AppState};
use config::{GameConfig, ServerConfig};
use journalist::GeminiJournalist;
use runtime::GameRuntime;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hotseat=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    let server_config = ServerConfig::from_env();

    if server_config.gemini_api_key.is_none() && server_config.gateway.is_none() {
        tracing::warn!(
            "No collaborator credential configured. Set GEMINI_API_KEY or LLM_GATEWAY; \
             the journalist will be limited to canned lines."
        );
    }

    let journalist = Arc::new(GeminiJournalist::new(
        server_config.gemini_api_key.clone(),
        server_config.gateway.as_deref(),
    ));

    let (game_runtime, game) = GameRuntime::new(GameConfig::default(), journalist);
    tokio::spawn(game_runtime.run());

    let state = AppState::new(game);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let compression = CompressionLayer::new()
        .gzip(true)
        .br(true)
        .deflate(true)
        .zstd(true);

    let app = create_router(state).layer(cors).layer(compression);

    let addr = SocketAddr::from(([0, 0, 0, 0], server_config.port));
    tracing::info!("Hot Seat server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
