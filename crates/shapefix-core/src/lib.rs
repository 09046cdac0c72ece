//! Result-shape normalization for TypeScript server action modules
//!
//! This crate rewrites a configured set of source files so that every
//! returned result object carries an explicit `success` flag next to its
//! `data` / `error` field, and inserts a missing import after a known anchor
//! line. Every rule is idempotent: running the pipeline twice yields the
//! same text as running it once.
//!
//! # Pipeline
//!
//! - [`mask`] parses the text with Tree-sitter into code vs comment/string
//!   regions so rules never touch commented-out code or string contents
//! - [`rules`] holds the rule kinds (`tag_object`, `promote`, `insert_import`)
//! - [`normalizer`] applies an ordered rule list to one text or one file
//! - [`runner`] drives the normalizer over the configured file list
//!
//! # Example
//!
//! ```ignore
//! use shapefix_core::{ConfigLoader, Runner};
//!
//! let config = ConfigLoader::new().load()?;
//! let report = Runner::new(config)?.run()?;
//! println!("{}", shapefix_core::Reporter::to_human_readable(&report));
//! ```

pub mod config;
pub mod constants;
pub mod logging;
pub mod mask;
pub mod normalizer;
pub mod reporter;
pub mod rules;
pub mod runner;

use std::path::PathBuf;
use thiserror::Error;

pub use config::{
    ConfigLoader, LoggingConfig, MissingAnchorPolicy, MissingFilePolicy, ShapefixConfig,
};
pub use mask::{CodeMask, Region, SourceDialect};
pub use normalizer::{FileReport, FileStatus, NormalizeOptions, Normalized, TextNormalizer};
pub use reporter::{Reporter, RunReport, RunSummary};
pub use rules::{Rule, RuleApplication, RuleConfig, RuleEffect, RuleOutcome, default_rules};
pub use runner::{Runner, run};

/// Result type for normalization operations
pub type Result<T> = std::result::Result<T, ShapefixError>;

/// Normalization error types
#[derive(Error, Debug)]
pub enum ShapefixError {
    #[error("File not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Report serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid regex pattern `{pattern}`: {message}")]
    InvalidRegex { pattern: String, message: String },

    #[error("Anchor `{anchor}` not found in {}", .path.display())]
    AnchorMissing { path: PathBuf, anchor: String },
}

impl ShapefixError {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
