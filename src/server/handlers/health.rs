use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde_json::json;

use crate::state::AppState;

pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let uptime_secs = (Utc::now() - state.started_at).num_seconds().max(0);
    Json(json!({
        "status": "ok",
        "knowledge_entries": state.knowledge.len(),
        "backend": state.llm.backend_name(),
        "backend_configured": state.llm.is_configured(),
        "uptime_secs": uptime_secs
    }))
}
