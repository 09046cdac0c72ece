//! Configuration types

use crate::constants::{DEFAULT_LOG_LEVEL, DEFAULT_TARGET_FILES};
use crate::logging::parse_log_level;
use crate::normalizer::TextNormalizer;
use crate::rules::{RuleConfig, default_rules};
use crate::{Result, ShapefixError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// What to do when a configured file does not exist
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingFilePolicy {
    /// Report the file as not found and continue with the next one
    #[default]
    Skip,
    /// Stop the run at the first missing file
    Abort,
}

/// What to do when an import rule cannot find its anchor line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingAnchorPolicy {
    /// Rewrite the file anyway and report a warning
    #[default]
    Warn,
    /// Leave the file untouched and report it as failed
    Error,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Enable JSON output format
    pub json_format: bool,

    /// Also log to a daily-rolling file at this path
    pub file_output: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json_format: false,
            file_output: None,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapefixConfig {
    /// Directory relative file paths are resolved against
    pub root: PathBuf,

    /// Files to normalize, in processing order
    pub files: Vec<PathBuf>,

    pub missing_file: MissingFilePolicy,

    pub missing_anchor: MissingAnchorPolicy,

    /// Report changes without writing them
    pub dry_run: bool,

    /// Like `dry_run`, and the run fails if any file would change
    pub check: bool,

    /// Ordered rule pipeline applied to every file
    pub rules: Vec<RuleConfig>,

    pub logging: LoggingConfig,
}

impl Default for ShapefixConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            files: DEFAULT_TARGET_FILES.iter().map(PathBuf::from).collect(),
            missing_file: MissingFilePolicy::default(),
            missing_anchor: MissingAnchorPolicy::default(),
            dry_run: false,
            check: false,
            rules: default_rules(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ShapefixConfig {
    /// Resolve a configured file path against `root`
    pub fn resolve(&self, file: &Path) -> PathBuf {
        if file.is_absolute() || self.root.as_os_str() == "." {
            file.to_path_buf()
        } else {
            self.root.join(file)
        }
    }

    /// True if files must not be written
    pub fn is_read_only(&self) -> bool {
        self.dry_run || self.check
    }

    /// Validate configuration values
    ///
    /// Rules are compiled here so that a bad regex or an invalid rule shape
    /// is reported before any file is read.
    pub fn validate(&self) -> Result<()> {
        self.compile().map(|_| ())
    }

    /// Validate the settings and compile the rule pipeline
    pub fn compile(&self) -> Result<TextNormalizer> {
        if self.files.is_empty() {
            return Err(ShapefixError::Config(
                "no target files configured".to_string(),
            ));
        }
        if let Some(empty) = self.files.iter().find(|f| f.as_os_str().is_empty()) {
            return Err(ShapefixError::Config(format!(
                "empty target file path in list: {empty:?}"
            )));
        }
        parse_log_level(&self.logging.level)?;
        TextNormalizer::from_config(&self.rules)
    }

    /// Serialize to TOML, the same format [`super::ConfigLoader`] reads
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| ShapefixError::Config(format!("failed to serialize config: {e}")))
    }
}
