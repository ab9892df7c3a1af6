use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use super::error::LlmError;
use super::provider::{preview, send_json, LlmProvider};
use super::types::{BackendResponse, ChatRequest};
use crate::core::config::HostedBackendConfig;

/// A hosted endpoint speaking the OpenAI chat-completions protocol with
/// bearer authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostedPreset {
    pub name: &'static str,
    /// Environment variable operators set the credential through.
    pub env_var: &'static str,
}

pub const GROQ: HostedPreset = HostedPreset {
    name: "groq",
    env_var: "GROQ_API_KEY",
};

pub const HUGGING_FACE: HostedPreset = HostedPreset {
    name: "huggingface",
    env_var: "HF_TOKEN",
};

#[derive(Clone)]
pub struct OpenAiCompatibleProvider {
    preset: HostedPreset,
    base_url: String,
    model: String,
    api_key: Option<String>,
    client: Client,
}

impl OpenAiCompatibleProvider {
    pub fn new(preset: HostedPreset, config: &HostedBackendConfig, client: Client) -> Self {
        Self {
            preset,
            base_url: config.base_url.trim().trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.credential().map(str::to_string),
            client,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl LlmProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &'static str {
        self.preset.name
    }

    fn ensure_configured(&self) -> Result<(), LlmError> {
        match self.api_key {
            Some(_) => Ok(()),
            None => Err(LlmError::NotConfigured {
                backend: self.preset.name,
                env_var: self.preset.env_var,
            }),
        }
    }

    async fn chat(&self, request: ChatRequest) -> Result<BackendResponse, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::NotConfigured {
            backend: self.preset.name,
            env_var: self.preset.env_var,
        })?;

        let mut body = json!({
            "model": self.model,
            "messages": request.messages,
            "stream": false,
        });

        if let Some(obj) = body.as_object_mut() {
            if let Some(t) = request.max_tokens {
                obj.insert("max_tokens".to_string(), json!(t));
            }
        }

        let payload = send_json(
            self.preset.name,
            self.client
                .post(self.endpoint())
                .bearer_auth(api_key)
                .json(&body),
        )
        .await?;

        parse_chat_completion(self.preset.name, &payload)
    }
}

/// Reads `choices[0].message.content`.
pub(crate) fn parse_chat_completion(
    backend: &'static str,
    payload: &Value,
) -> Result<BackendResponse, LlmError> {
    payload["choices"][0]["message"]["content"]
        .as_str()
        .map(|text| BackendResponse {
            text: text.to_string(),
        })
        .ok_or_else(|| {
            tracing::error!("Invalid {} response: {}", backend, preview(payload));
            LlmError::InvalidResponse {
                backend,
                detail: "missing choices[0].message.content".to_string(),
            }
        })
}
