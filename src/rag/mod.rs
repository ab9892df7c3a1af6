//! Retrieval side of the chat pipeline.
//!
//! This module provides:
//! - `KnowledgeStore`: the immutable knowledge base loaded at startup
//! - `find_context`: keyword lookup of the best entry for a query
//! - `build_system_prompt`: grounding of the system prompt on a match
//! - `parse_markdown_sections`: knowledge base ingest from markdown

pub mod context_builder;
pub mod ingest;
pub mod matcher;
pub mod normalize;
pub mod store;

pub use context_builder::{assemble_messages, build_system_prompt};
pub use ingest::{parse_markdown_sections, IngestOptions};
pub use matcher::{find_context, KnowledgeMatch};
pub use normalize::normalize;
pub use store::{KnowledgeEntry, KnowledgeStore};
