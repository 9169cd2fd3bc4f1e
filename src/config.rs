//! Process and game configuration

use std::time::Duration;

/// Tunable game parameters. The defaults mirror the broadcast's original
/// pacing; tests zero the delays.
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub initial_stock_price: f64,
    pub initial_sentiment: i32,
    /// Hard cap on journalist questions per segment.
    pub max_questions: u32,
    /// Length of the intro sequence before the interview starts.
    pub intro_duration: Duration,
    /// How long the final exchange stays on screen before the summary.
    pub summary_delay: Duration,
    /// Bounds of the artificial pause before a journalist reply lands.
    pub reply_delay_min: Duration,
    pub reply_delay_max: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            initial_stock_price: 100.0,
            initial_sentiment: 50,
            max_questions: 10,
            intro_duration: Duration::from_secs(3),
            summary_delay: Duration::from_secs(3),
            reply_delay_min: Duration::from_millis(1_000),
            reply_delay_max: Duration::from_millis(2_000),
        }
    }
}

impl GameConfig {
    /// Zero-delay preset for deterministic tests.
    #[cfg(test)]
    pub fn immediate() -> Self {
        Self {
            intro_duration: Duration::ZERO,
            summary_delay: Duration::ZERO,
            reply_delay_min: Duration::ZERO,
            reply_delay_max: Duration::ZERO,
            ..Self::default()
        }
    }
}

/// Environment-driven server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub gemini_api_key: Option<String>,
    /// Optional gateway base URL; routes collaborator traffic through a
    /// proxy that handles authentication itself.
    pub gateway: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let port = std::env::var("HOTSEAT_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        Self {
            port,
            gemini_api_key: std::env::var("GEMINI_API_KEY").ok(),
            gateway: std::env::var("LLM_GATEWAY").ok(),
        }
    }
}
