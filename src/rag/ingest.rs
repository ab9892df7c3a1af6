//! Builds knowledge entries from the Bluebook markdown.
//!
//! Every `#### ` heading after the start marker becomes one entry whose
//! answer is the section body, trimmed of page numbers and blank lines.

use std::sync::LazyLock;

use regex::Regex;

use super::store::KnowledgeEntry;

#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Text marking where the relevant chapters begin. Everything before it is ignored.
    pub start_marker: String,
    pub category: String,
    pub question_prefix: String,
    /// Sections whose body has this many characters or fewer are skipped.
    pub min_body_chars: usize,
    pub max_answer_chars: usize,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            start_marker: "Fundamentación Científica del Modelo".to_string(),
            category: "Bluebook Science & Tech".to_string(),
            question_prefix: "Explícame sobre: ".to_string(),
            min_body_chars: 50,
            max_answer_chars: 1000,
        }
    }
}

// Literal patterns, compiled once on first use.
static PAGE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\d+\n").expect("page number pattern is a valid regex"));
static BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("blank line pattern is a valid regex"));

pub fn parse_markdown_sections(markdown: &str, options: &IngestOptions) -> Vec<KnowledgeEntry> {
    let Some(start) = markdown.find(&options.start_marker) else {
        return Vec::new();
    };

    markdown[start..]
        .split("#### ")
        .skip(1)
        .filter_map(|section| parse_section(section, options))
        .collect()
}

fn parse_section(section: &str, options: &IngestOptions) -> Option<KnowledgeEntry> {
    let (title, body) = section.split_once('\n').unwrap_or((section, ""));
    let title = title.trim();
    let body = clean_body(body.trim());

    if body.chars().count() <= options.min_body_chars {
        return None;
    }

    Some(KnowledgeEntry {
        category: options.category.clone(),
        question: format!("{}{}", options.question_prefix, title),
        answer: body.chars().take(options.max_answer_chars).collect(),
        keywords: title
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect(),
    })
}

fn clean_body(body: &str) -> String {
    let without_pages = PAGE_NUMBER.replace_all(body, "");
    BLANK_LINES
        .replace_all(&without_pages, "\n")
        .into_owned()
}
