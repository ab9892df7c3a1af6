use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap};
use axum::Json;
use serde::Deserialize;
use tracing::Instrument;

use crate::chat::{ChatReply, NO_MESSAGES};
use crate::core::errors::ApiError;
use crate::llm::ChatMessage;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ChatBody {
    #[serde(default)]
    pub messages: Option<Vec<ChatMessage>>,
}

pub async fn chat(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ChatReply>, ApiError> {
    let body = parse_body(&headers, &body)?;

    let messages = match body.messages {
        Some(messages) if !messages.is_empty() => messages,
        _ => return Err(ApiError::BadRequest(NO_MESSAGES.to_string())),
    };

    let request_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("chat", %request_id);
    let reply = state.chat.handle_chat(messages).instrument(span).await?;

    Ok(Json(reply))
}

/// An empty or non-JSON body carries no messages. Only a JSON body that
/// fails to parse is reported with the parser's text.
fn parse_body(headers: &HeaderMap, bytes: &Bytes) -> Result<ChatBody, ApiError> {
    if bytes.iter().all(u8::is_ascii_whitespace) || !has_json_content_type(headers) {
        return Ok(ChatBody::default());
    }

    Json::<ChatBody>::from_bytes(bytes)
        .map(|Json(body)| body)
        .map_err(|rejection| {
            tracing::warn!("Rejected chat body: {}", rejection.body_text());
            ApiError::BadRequest(rejection.body_text())
        })
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    let essence = content_type.split(';').next().unwrap_or_default().trim();
    essence.eq_ignore_ascii_case("application/json") || essence.ends_with("+json")
}
