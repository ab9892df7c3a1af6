//! Converts the Bluebook markdown into the JSON knowledge base.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use bluechat_backend::rag::{parse_markdown_sections, IngestOptions};

#[derive(Parser, Debug)]
#[command(name = "bluebook-ingest")]
#[command(about = "Convert the Bluebook markdown into the BlueChat knowledge base", long_about = None)]
struct Args {
    /// Bluebook markdown export
    source: PathBuf,

    /// Knowledge base JSON to write
    target: PathBuf,

    /// Heading text where the relevant chapters begin
    #[arg(long)]
    start_marker: Option<String>,
}

impl Args {
    fn ingest_options(&self) -> IngestOptions {
        let mut options = IngestOptions::default();
        if let Some(marker) = &self.start_marker {
            options.start_marker = marker.clone();
        }
        options
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt().with_target(false).init();

    let source = &args.source;
    let target = &args.target;

    let markdown = fs::read_to_string(source)
        .with_context(|| format!("Failed to read {}", source.display()))?;

    let entries = parse_markdown_sections(&markdown, &args.ingest_options());
    if entries.is_empty() {
        tracing::warn!("No sections found in {}", source.display());
    }

    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(&entries)?;
    fs::write(target, json).with_context(|| format!("Failed to write {}", target.display()))?;

    tracing::info!("Generated {} entries in {}", entries.len(), target.display());
    Ok(())
}
