//! BlueChat backend: a chat relay for a Spanish-language STEM assistant.
//!
//! Each request's last message is matched against the Bluebook knowledge
//! base; the best entry, if any, grounds the system prompt sent to the
//! configured LLM backend.

pub mod chat;
pub mod core;
pub mod llm;
pub mod rag;
pub mod server;
pub mod state;
