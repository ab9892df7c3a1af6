use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use super::error::LlmError;
use super::ollama::OllamaProvider;
use super::openai_compatible::{OpenAiCompatibleProvider, GROQ, HUGGING_FACE};
use super::provider::LlmProvider;
use super::types::{BackendResponse, ChatMessage, ChatRequest};
use crate::core::config::{LlmBackend, LlmConfig};

/// Dispatches conversations to the backend selected at startup.
#[derive(Clone)]
pub struct LlmService {
    provider: Arc<dyn LlmProvider>,
}

impl LlmService {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    /// Builds the provider named by `llm.backend`, sharing one HTTP client
    /// that enforces `llm.request_timeout_secs`.
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(LlmError::Client)?;

        let provider: Arc<dyn LlmProvider> = match config.backend {
            LlmBackend::Groq => Arc::new(OpenAiCompatibleProvider::new(
                GROQ,
                &config.groq,
                client,
            )),
            LlmBackend::HuggingFace => Arc::new(OpenAiCompatibleProvider::new(
                HUGGING_FACE,
                &config.huggingface,
                client,
            )),
            LlmBackend::Ollama => Arc::new(OllamaProvider::new(&config.ollama, client)),
        };

        Ok(Self::new(provider))
    }

    pub fn backend_name(&self) -> &'static str {
        self.provider.name()
    }

    pub fn is_configured(&self) -> bool {
        self.provider.ensure_configured().is_ok()
    }

    /// Sends the assembled conversation and returns the assistant text.
    ///
    /// A missing credential is reported before any network traffic.
    pub async fn dispatch(&self, messages: Vec<ChatMessage>) -> Result<BackendResponse, LlmError> {
        self.provider.ensure_configured()?;

        tracing::debug!(
            "Dispatching {} messages to {}",
            messages.len(),
            self.provider.name()
        );
        self.provider.chat(ChatRequest::new(messages)).await
    }
}
