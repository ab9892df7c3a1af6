use thiserror::Error;

use crate::llm::LlmError;

#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("Failed to initialize LLM service: {0}")]
    Llm(#[from] LlmError),
}
