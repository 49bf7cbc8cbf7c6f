//! `stageline check` - Build a pipeline from a document
//!
//! Loads the YAML document, assembles the pipeline with the built-in
//! variants and prints either the stage tree or a JSON summary.
//!
//! ```bash
//! stageline check pipeline.yml
//! # Exit code 0: the document builds a pipeline
//! # Exit code 1: the document is rejected
//! ```

use anyhow::{Context, Result};
use stageline::parser::document;
use stageline::{Config, Parser, ParserOptions, Registry};
use std::path::Path;

/// How `check` prints the assembled pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Indented stage tree
    Text,
    /// Pretty-printed `PipelineSummary`
    Json,
}

/// Builds the pipeline described by `file` and renders it
pub fn check_document(file: &Path, config: &Config, format: OutputFormat) -> Result<String> {
    tracing::debug!("Checking pipeline document: {}", file.display());

    let doc = document::load(file)?;
    let parser = Parser::new(Registry::with_defaults()).with_options(ParserOptions::from(config));
    let pipeline = parser
        .parse(&doc)
        .with_context(|| format!("Failed to build pipeline from {}", file.display()))?;

    tracing::info!("Pipeline document is valid: {}", file.display());

    match format {
        OutputFormat::Text => Ok(pipeline.to_string().trim_end().to_string()),
        OutputFormat::Json => serde_json::to_string_pretty(&pipeline.summary())
            .context("Failed to serialize pipeline summary"),
    }
}
