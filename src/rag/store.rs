//! In-memory knowledge base.
//!
//! The store is built once at startup and never mutated. Each entry keeps its
//! normalized searchable text next to it so matching does not re-normalize
//! the corpus on every request.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::normalize::normalize;

/// One category/question/answer record of the knowledge base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    pub category: String,
    pub question: String,
    pub answer: String,
    /// Title words recorded by the ingest tool. Not used for scoring.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
}

impl KnowledgeEntry {
    pub fn new(
        category: impl Into<String>,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            question: question.into(),
            answer: answer.into(),
            keywords: Vec::new(),
        }
    }

    /// Normalized `category question answer`, the text queries are matched against.
    pub fn searchable_text(&self) -> String {
        normalize(&format!("{} {} {}", self.category, self.question, self.answer))
    }
}

#[derive(Debug, Clone)]
pub(crate) struct IndexedEntry {
    pub(crate) entry: KnowledgeEntry,
    pub(crate) text: String,
}

#[derive(Debug, Clone, Default)]
pub struct KnowledgeStore {
    entries: Vec<IndexedEntry>,
}

impl KnowledgeStore {
    pub fn new(entries: Vec<KnowledgeEntry>) -> Self {
        let entries = entries
            .into_iter()
            .map(|entry| {
                let text = entry.searchable_text();
                IndexedEntry { entry, text }
            })
            .collect();
        Self { entries }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Loads a JSON array of entries.
    ///
    /// A missing or unreadable file yields an empty store: the service keeps
    /// answering, every reply is just untagged by the knowledge base.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            tracing::warn!("Knowledge base not found at {}", path.display());
            return Self::empty();
        }

        let parsed = fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|contents| {
                serde_json::from_str::<Vec<KnowledgeEntry>>(&contents).map_err(|e| e.to_string())
            });

        match parsed {
            Ok(entries) => {
                tracing::info!(
                    "Loaded {} knowledge entries from {}",
                    entries.len(),
                    path.display()
                );
                Self::new(entries)
            }
            Err(err) => {
                tracing::error!("Failed to load knowledge base {}: {}", path.display(), err);
                Self::empty()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &KnowledgeEntry> {
        self.entries.iter().map(|indexed| &indexed.entry)
    }

    pub(crate) fn indexed(&self) -> &[IndexedEntry] {
        &self.entries
    }
}
