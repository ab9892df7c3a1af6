use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::chat::ChatOrchestrator;
use crate::core::config::{AppConfig, AppPaths};
use crate::llm::LlmService;
use crate::rag::KnowledgeStore;

pub mod error;

use error::InitializationError;

/// Application state shared across all routes.
///
/// Everything here is read-only after startup; the knowledge base and the
/// backend client are shared behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub knowledge: Arc<KnowledgeStore>,
    pub llm: LlmService,
    pub chat: ChatOrchestrator,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: AppConfig, knowledge: KnowledgeStore, llm: LlmService) -> Arc<Self> {
        let knowledge = Arc::new(knowledge);
        let chat = ChatOrchestrator::new(knowledge.clone(), llm.clone());

        Arc::new(AppState {
            config: Arc::new(config),
            knowledge,
            llm,
            chat,
            started_at: Utc::now(),
        })
    }

    /// Loads the knowledge base and builds the configured backend.
    ///
    /// A missing knowledge base is not an error; the service runs with an
    /// empty store.
    pub fn initialize(paths: &AppPaths, config: AppConfig) -> Result<Arc<Self>, InitializationError> {
        let knowledge = KnowledgeStore::load(&paths.resolve(&config.knowledge.path));

        let llm = LlmService::from_config(&config.llm)?;

        tracing::info!(
            "Knowledge entries: {}, backend: {} ({})",
            knowledge.len(),
            llm.backend_name(),
            if llm.is_configured() {
                "configured"
            } else {
                "NOT CONFIGURED"
            }
        );

        Ok(Self::new(config, knowledge, llm))
    }
}
