//! Chat request pipeline: validate, look up context, build the prompt,
//! dispatch, and wrap the reply.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::errors::{ApiError, INTERNAL_AI_ERROR};
use crate::llm::{ChatMessage, LlmError, LlmService};
use crate::rag::{assemble_messages, build_system_prompt, find_context, KnowledgeStore};

pub const NO_MESSAGES: &str = "No messages";

/// Which path produced the reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplySource {
    /// The prompt was grounded on a knowledge base entry.
    #[serde(rename = "bluebook-rag")]
    BluebookRag,
    #[serde(rename = "qwen-general")]
    QwenGeneral,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub content: Vec<ContentBlock>,
    pub source: ReplySource,
}

impl ChatReply {
    pub fn new(text: String, source: ReplySource) -> Self {
        Self {
            content: vec![ContentBlock { text }],
            source,
        }
    }
}

#[derive(Clone)]
pub struct ChatOrchestrator {
    knowledge: Arc<KnowledgeStore>,
    llm: LlmService,
}

impl ChatOrchestrator {
    pub fn new(knowledge: Arc<KnowledgeStore>, llm: LlmService) -> Self {
        Self { knowledge, llm }
    }

    pub async fn handle_chat(&self, conversation: Vec<ChatMessage>) -> Result<ChatReply, ApiError> {
        let Some(last) = conversation.last() else {
            return Err(ApiError::BadRequest(NO_MESSAGES.to_string()));
        };
        let query = last.content.clone();
        tracing::info!("User: {}", query);

        let context = find_context(&query, &self.knowledge);
        if let Some(found) = &context {
            tracing::info!(
                "RAG match: {} (score {})",
                found.entry.category,
                found.score
            );
        }
        let source = if context.is_some() {
            ReplySource::BluebookRag
        } else {
            ReplySource::QwenGeneral
        };

        let system_prompt = build_system_prompt(context.map(|found| found.entry));
        let messages = assemble_messages(system_prompt, conversation);

        let response = self.llm.dispatch(messages).await.map_err(to_api_error)?;
        tracing::info!("AI: {}...", head(&response.text, 30));

        Ok(ChatReply::new(response.text, source))
    }
}

fn to_api_error(err: LlmError) -> ApiError {
    match err {
        LlmError::NotConfigured { backend, env_var } => {
            tracing::error!("{} is not configured: {} is missing", backend, env_var);
            ApiError::NotConfigured(LlmError::not_configured_message(env_var))
        }
        other => {
            tracing::error!("Chat dispatch failed: {}", other);
            ApiError::Internal(INTERNAL_AI_ERROR.to_string())
        }
    }
}

fn head(text: &str, chars: usize) -> String {
    text.chars().take(chars).collect()
}
