use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use super::error::LlmError;
use super::provider::{preview, send_json, LlmProvider};
use super::types::{BackendResponse, ChatRequest};
use crate::core::config::LocalBackendConfig;

const NAME: &str = "ollama";

/// Locally hosted Ollama server. No credential and no token cap.
#[derive(Clone)]
pub struct OllamaProvider {
    base_url: String,
    model: String,
    client: Client,
}

impl OllamaProvider {
    pub fn new(config: &LocalBackendConfig, client: Client) -> Self {
        Self {
            base_url: config.base_url.trim().trim_end_matches('/').to_string(),
            model: config.model.clone(),
            client,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/api/chat", self.base_url)
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn chat(&self, request: ChatRequest) -> Result<BackendResponse, LlmError> {
        let body = json!({
            "model": self.model,
            "messages": request.messages,
            "stream": false,
        });

        let payload = send_json(NAME, self.client.post(self.endpoint()).json(&body)).await?;

        parse_chat_message(&payload)
    }
}

/// Reads `message.content`.
pub(crate) fn parse_chat_message(payload: &Value) -> Result<BackendResponse, LlmError> {
    payload["message"]["content"]
        .as_str()
        .map(|text| BackendResponse {
            text: text.to_string(),
        })
        .ok_or_else(|| {
            tracing::error!("Invalid {} response: {}", NAME, preview(payload));
            LlmError::InvalidResponse {
                backend: NAME,
                detail: "missing message.content".to_string(),
            }
        })
}
