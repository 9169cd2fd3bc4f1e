//! Google Gemini collaborator implementation

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::Mutex;

use super::{fallback_opening, fallback_reply, Journalist, JournalistError, JournalistSession};
use crate::state_machine::{CompanyProfile, Turn};

const MODEL: &str = "gemini-2.5-flash";

/// Prompt that kicks the segment off once the session exists.
const OPENING_TRIGGER: &str = "Start the show. Introduce the guest to the audience and ask the \
                               first opening question. Be dramatic.";

/// Gemini-backed journalist.
pub struct GeminiJournalist {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    /// In gateway mode the proxy handles authentication and no key goes
    /// on the URL.
    gateway_mode: bool,
}

impl GeminiJournalist {
    pub fn new(api_key: Option<String>, gateway: Option<&str>) -> Self {
        let base_url = match gateway {
            Some(gw) => {
                format!(
                    "{}/gemini/v1beta/models/{}:generateContent",
                    gw.trim_end_matches('/'),
                    MODEL
                )
            }
            None => {
                format!(
                    "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
                    MODEL
                )
            }
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(300))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key,
            base_url,
            gateway_mode: gateway.is_some(),
        }
    }
}

impl Journalist for GeminiJournalist {
    fn session(&self, profile: &CompanyProfile) -> Arc<dyn JournalistSession> {
        Arc::new(GeminiSession {
            client: self.client.clone(),
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            gateway_mode: self.gateway_mode,
            system_instruction: persona_instruction(profile),
            history: Mutex::new(Vec::new()),
        })
    }
}

/// One interview conversation. History is replayed client-side into every
/// request; failed exchanges are not recorded, so the conversation stays
/// coherent across fallbacks.
struct GeminiSession {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    gateway_mode: bool,
    system_instruction: String,
    history: Mutex<Vec<GeminiContent>>,
}

#[async_trait]
impl JournalistSession for GeminiSession {
    async fn begin(&self) -> Turn {
        match self.exchange(OPENING_TRIGGER).await {
            Ok(turn) => turn,
            Err(e) => {
                tracing::warn!(
                    kind = ?e.kind,
                    error = %e,
                    "Opening round trip failed, falling back"
                );
                fallback_opening()
            }
        }
    }

    async fn reply(&self, text: &str) -> Turn {
        match self.exchange(text).await {
            Ok(turn) => turn,
            Err(e) => {
                tracing::warn!(
                    kind = ?e.kind,
                    error = %e,
                    "Reply round trip failed, falling back"
                );
                fallback_reply()
            }
        }
    }
}

impl GeminiSession {
    /// One request/response exchange: send the history plus `user_text`,
    /// parse the structured turn, and commit both sides to the history
    /// only on success.
    async fn exchange(&self, user_text: &str) -> Result<Turn, JournalistError> {
        let url = match (&self.api_key, self.gateway_mode) {
            (_, true) => self.base_url.clone(),
            (Some(key), false) if !key.is_empty() => format!("{}?key={}", self.base_url, key),
            _ => return Err(JournalistError::auth("GEMINI_API_KEY is not set")),
        };

        let user_content = GeminiContent {
            role: Some("user".to_string()),
            parts: vec![GeminiPart {
                text: user_text.to_string(),
            }],
        };

        let contents = {
            let history = self.history.lock().await;
            let mut contents = history.clone();
            contents.push(user_content.clone());
            contents
        };

        let request = GeminiRequest {
            contents,
            system_instruction: GeminiContent {
                role: None,
                parts: vec![GeminiPart {
                    text: self.system_instruction.clone(),
                }],
            },
            generation_config: GeminiGenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: turn_schema(),
            },
        };

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    JournalistError::network(format!("Request timeout: {e}"))
                } else if e.is_connect() {
                    JournalistError::network(format!("Connection failed: {e}"))
                } else {
                    JournalistError::unknown(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| JournalistError::network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            if let Ok(error_resp) = serde_json::from_str::<GeminiErrorResponse>(&body) {
                let message = error_resp.error.message;
                return Err(match status.as_u16() {
                    400 => JournalistError::invalid_request(format!("Invalid request: {message}")),
                    401 | 403 => {
                        JournalistError::auth(format!("Authentication failed: {message}"))
                    }
                    429 => JournalistError::rate_limit(format!("Rate limit exceeded: {message}")),
                    500..=599 => JournalistError::server_error(format!("Server error: {message}")),
                    _ => JournalistError::unknown(format!("HTTP {status}: {message}")),
                });
            }
            return Err(JournalistError::unknown(format!(
                "HTTP {status} error: {body}"
            )));
        }

        let resp: GeminiResponse = serde_json::from_str(&body).map_err(|e| {
            JournalistError::malformed(format!("Failed to parse response: {e} - body: {body}"))
        })?;

        let raw = resp
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| JournalistError::malformed("No candidates in response"))?
            .content
            .parts
            .into_iter()
            .map(|p| p.text)
            .collect::<String>();

        let turn = parse_turn(&raw)?;

        let mut history = self.history.lock().await;
        history.push(user_content);
        history.push(GeminiContent {
            role: Some("model".to_string()),
            parts: vec![GeminiPart { text: raw }],
        });

        Ok(turn)
    }
}

/// Render the host persona for one company.
fn persona_instruction(company: &CompanyProfile) -> String {
    format!(
        r#"You are Alex Sterling, the ruthless but charismatic host of the prime-time business news show "The Hot Seat".
You are interviewing the CEO of "{name}", a company in the "{industry}" industry.
Their mission is: "{mission}".

Your Goal: Grill them. Be skeptical but fair. React to their answers dynamically.
- If they give a vague answer, press them.
- If they give a great answer, acknowledge it but move to the next hard hitting question.
- Keep your responses punchy and suitable for TV (under 40 words usually).

You must output your response in JSON format ONLY.
The JSON structure must be:
{{
  "text": "Your spoken response/question to the guest",
  "sentiment": "positive" | "negative" | "neutral" (How the audience/market reacts to the user's last answer),
  "stockChange": number (Between -5.0 and +5.0, representing immediate stock price impact),
  "isInterviewOver": boolean (Set to true only after 8-10 exchanges or if they crash and burn completely)
}}"#,
        name = company.name,
        industry = company.industry,
        mission = company.mission,
    )
}

/// Parse the model's JSON into a turn, clamping the stock delta to the
/// documented band.
fn parse_turn(raw: &str) -> Result<Turn, JournalistError> {
    let mut turn: Turn = serde_json::from_str(raw.trim())
        .map_err(|e| JournalistError::malformed(format!("Turn did not match contract: {e}")))?;
    turn.stock_change = turn.stock_change.clamp(-5.0, 5.0);
    Ok(turn)
}

/// Response schema forcing the turn shape on the model.
fn turn_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "text": { "type": "STRING" },
            "sentiment": { "type": "STRING", "enum": ["positive", "negative", "neutral"] },
            "stockChange": { "type": "NUMBER" },
            "isInterviewOver": { "type": "BOOLEAN" },
        },
        "required": ["text", "sentiment", "stockChange", "isInterviewOver"]
    })
}

// Gemini API types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    system_instruction: GeminiContent,
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorResponse {
    error: GeminiError,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
    #[allow(dead_code)]
    code: Option<i32>,
    #[allow(dead_code)]
    status: Option<String>,
}
