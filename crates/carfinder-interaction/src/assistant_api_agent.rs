//! AssistantApiAgent - REST client for the AI turn endpoint.
//!
//! Posts `{"message": ...}` to `{api_base}/ai-chat` and maps the returned
//! wire-named filter object back onto UI facets.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use carfinder_core::chat::{AssistantReply, AssistantService};
use carfinder_core::config::ClientConfig;
use carfinder_core::error::{CarfinderError, Result};
use carfinder_core::filter::{Facet, FilterState};

const CHAT_PATH: &str = "/ai-chat";

/// Assistant implementation that talks to the AI turn HTTP endpoint.
#[derive(Clone)]
pub struct AssistantApiAgent {
    client: Client,
    config: ClientConfig,
}

impl AssistantApiAgent {
    /// Creates an agent for the configured service address.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| CarfinderError::config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    async fn send_request(&self, body: &ChatRequest<'_>) -> Result<ChatResponse> {
        let url = self.config.endpoint(CHAT_PATH);
        let response = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|err| CarfinderError::http(None, format!("AI request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read AI error body".to_string());
            return Err(CarfinderError::http(Some(status.as_u16()), body_text));
        }

        response
            .json()
            .await
            .map_err(|err| CarfinderError::decode(format!("Failed to parse AI response: {err}")))
    }
}

#[async_trait]
impl AssistantService for AssistantApiAgent {
    async fn ask(&self, message: &str) -> Result<AssistantReply> {
        let response = self.send_request(&ChatRequest { message }).await?;
        Ok(response.into_reply())
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: String,
    #[serde(default)]
    filters: Option<Map<String, Value>>,
    #[serde(default)]
    cars_found: Option<u64>,
}

impl ChatResponse {
    fn into_reply(self) -> AssistantReply {
        AssistantReply {
            message: self.message,
            filters: self.filters.as_ref().map(filters_from_wire),
            cars_found: self.cars_found,
        }
    }
}

/// Maps a wire-named assistant filter object onto a full filter state.
///
/// Facets the object omits, or sets to a falsy value (`null`, `false`, `""`,
/// `0`), are empty. Keys outside the vocabulary are ignored.
pub fn filters_from_wire(filters: &Map<String, Value>) -> FilterState {
    let mut state = FilterState::new();
    for (key, value) in filters {
        let Some(facet) = Facet::from_wire_name(key) else {
            tracing::debug!(key = %key, "Ignoring unknown assistant filter key");
            continue;
        };
        if let Some(text) = wire_value_text(value) {
            state.set(facet, text);
        }
    }
    state
}

fn wire_value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(number_text(n)),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

/// Whole-valued floats (`20000.0`) are rendered as integers.
fn number_text(n: &Number) -> String {
    if n.is_f64() {
        if let Some(f) = n.as_f64().filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64) {
            return (f as i64).to_string();
        }
    }
    n.to_string()
}
