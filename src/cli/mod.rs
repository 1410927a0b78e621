//! CLI support for tds-lambda
//!
//! Provides programmatic access to the `tds` command so the builder can be
//! driven from other tools with plain strings in and out.

mod build;
mod tokens;

pub use build::{default_body, execute_build, BuildOptions, OutputFormat};
pub use tokens::{get_tokens_overview, get_vocabulary, Vocabulary};

use std::io;

/// Errors that can occur during CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Request could not be compiled
    #[error("Build error: {0}")]
    Build(#[from] crate::TdsError),

    /// Request or body is not valid JSON, or does not match the protocol
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// No request provided
    #[error("No request provided. Use --request or pipe JSON to stdin.")]
    NoInput,

    #[error("Unknown vocabulary: '{0}'\nRun 'tds tokens' to see available vocabularies.")]
    UnknownVocabulary(String),
}
