use async_trait::async_trait;
use reqwest::{RequestBuilder, StatusCode};
use serde_json::Value;

use super::error::LlmError;
use super::types::{BackendResponse, ChatRequest};

#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// return the backend name (e.g. "groq", "huggingface", "ollama")
    fn name(&self) -> &'static str;

    /// fail fast when a required credential is missing; must not touch the network
    fn ensure_configured(&self) -> Result<(), LlmError> {
        Ok(())
    }

    /// chat completion (non-streaming)
    async fn chat(&self, request: ChatRequest) -> Result<BackendResponse, LlmError>;
}

/// Sends `request` and reads the body as JSON.
///
/// An explicit `error` field wins over everything else, then a non-success
/// status. A body that is not JSON at all is an invalid response.
pub(crate) async fn send_json(
    backend: &'static str,
    request: RequestBuilder,
) -> Result<Value, LlmError> {
    let res = request
        .send()
        .await
        .map_err(|source| LlmError::Transport { backend, source })?;
    let status = res.status();
    let text = res
        .text()
        .await
        .map_err(|source| LlmError::Transport { backend, source })?;

    classify_body(backend, status, &text)
}

pub(crate) fn classify_body(
    backend: &'static str,
    status: StatusCode,
    text: &str,
) -> Result<Value, LlmError> {
    let parsed = serde_json::from_str::<Value>(text);

    if let Ok(payload) = &parsed {
        if let Some(message) = extract_error_message(payload) {
            return Err(LlmError::Upstream { backend, message });
        }
    }

    if !status.is_success() {
        return Err(LlmError::Upstream {
            backend,
            message: format!("HTTP {status}"),
        });
    }

    parsed.map_err(|err| LlmError::InvalidResponse {
        backend,
        detail: format!("body is not JSON: {err}"),
    })
}

/// Reads the `error` field of a backend payload, if it carries one.
pub(crate) fn extract_error_message(payload: &Value) -> Option<String> {
    match payload.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Object(obj) => Some(
            obj.get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| Value::Object(obj.clone()).to_string()),
        ),
        other => Some(other.to_string()),
    }
}

/// Short excerpt of a payload for log lines.
pub(crate) fn preview(payload: &Value) -> String {
    let text = payload.to_string();
    if text.chars().count() <= 200 {
        return text;
    }
    let head: String = text.chars().take(200).collect();
    format!("{head}...")
}
