pub mod error;
pub mod ollama;
pub mod openai_compatible;
pub mod provider;
pub mod service;
pub mod types;


pub use error::LlmError;
pub use provider::LlmProvider;
pub use service::LlmService;
pub use types::{BackendResponse, ChatMessage, ChatRequest, Role};
