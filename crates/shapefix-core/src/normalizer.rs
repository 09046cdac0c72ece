//! Text Normalizer
//!
//! Applies an ordered rule list to a text, and to a file in place. A file is
//! read whole, transformed in memory and, when the text changed, replaced
//! atomically: the new content goes to a temporary file in the same
//! directory which is then renamed over the original.

use crate::mask::{CodeMask, SourceDialect};
use crate::rules::{Rule, RuleConfig, RuleEffect, RuleOutcome, compile_rules};
use crate::{Result, ShapefixError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Per-call behaviour of [`TextNormalizer::normalize_file`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Compute and report changes without writing
    pub dry_run: bool,
    /// Treat a missing import anchor as an error instead of a warning
    pub strict_anchor: bool,
}

/// Output of one pipeline pass over a text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub text: String,
    pub outcomes: Vec<RuleOutcome>,
    pub changed: bool,
}

/// Processing status of one file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    /// Rewritten (or, in a dry run, would be rewritten)
    Updated,
    Unchanged,
    NotFound,
    Failed,
}

impl std::fmt::Display for FileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Updated => write!(f, "updated"),
            Self::Unchanged => write!(f, "unchanged"),
            Self::NotFound => write!(f, "not found"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Result of processing one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub status: FileStatus,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outcomes: Vec<RuleOutcome>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileReport {
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            status: FileStatus::NotFound,
            outcomes: Vec::new(),
            error: None,
        }
    }

    pub fn failed(path: impl Into<PathBuf>, error: &ShapefixError) -> Self {
        Self {
            path: path.into(),
            status: FileStatus::Failed,
            outcomes: Vec::new(),
            error: Some(error.to_string()),
        }
    }

    /// Outcomes that deserve the user's attention (missing anchors)
    pub fn warnings(&self) -> impl Iterator<Item = &RuleOutcome> {
        self.outcomes
            .iter()
            .filter(|outcome| matches!(outcome.effect, RuleEffect::AnchorMissing { .. }))
    }
}

/// Ordered rule pipeline
#[derive(Debug)]
pub struct TextNormalizer {
    rules: Vec<Box<dyn Rule>>,
}

impl TextNormalizer {
    pub fn new(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    /// Compile rule definitions into a normalizer
    pub fn from_config(rules: &[RuleConfig]) -> Result<Self> {
        Ok(Self::new(compile_rules(rules)?))
    }

    /// Normalizer for the built-in warehouse rule set
    pub fn with_default_rules() -> Result<Self> {
        Self::from_config(&crate::rules::default_rules())
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Apply every rule in order to TypeScript `text`
    pub fn normalize_text(&self, text: &str) -> Result<Normalized> {
        self.normalize_source(text, SourceDialect::TypeScript)
    }

    /// Apply every rule in order. Each rule sees the output of the previous
    /// one, with a freshly parsed code mask.
    pub fn normalize_source(&self, text: &str, dialect: SourceDialect) -> Result<Normalized> {
        let mut current = text.to_string();
        let mut outcomes = Vec::with_capacity(self.rules.len());

        for rule in &self.rules {
            let mask = CodeMask::analyze_as(&current, dialect)?;
            if mask.has_syntax_errors() {
                debug!(rule = %rule.name(), "Source has syntax errors, rewriting recovered code only");
            }
            let application = rule.apply(&current, &mask);
            let name = rule.name();
            debug!(rule = %name, effect = ?application.effect, "Rule applied");
            if let Some(rewritten) = application.text {
                current = rewritten;
            }
            outcomes.push(RuleOutcome {
                rule: name,
                effect: application.effect,
            });
        }

        let changed = current != text;
        Ok(Normalized {
            text: current,
            outcomes,
            changed,
        })
    }

    /// Normalize the file at `path` in place
    ///
    /// Fails with [`ShapefixError::NotFound`] before touching anything if the
    /// file does not exist, and with [`ShapefixError::AnchorMissing`] (again
    /// without writing) when `strict_anchor` is set and an import anchor is
    /// absent. Unchanged files are not rewritten.
    pub fn normalize_file(&self, path: &Path, options: NormalizeOptions) -> Result<FileReport> {
        if !path.exists() {
            return Err(ShapefixError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let original = fs::read_to_string(path).map_err(|e| ShapefixError::io(path, e))?;
        let normalized = self.normalize_source(&original, SourceDialect::from_path(path))?;

        if options.strict_anchor {
            if let Some(anchor) = normalized.outcomes.iter().find_map(|o| match &o.effect {
                RuleEffect::AnchorMissing { anchor } => Some(anchor.clone()),
                _ => None,
            }) {
                return Err(ShapefixError::AnchorMissing {
                    path: path.to_path_buf(),
                    anchor,
                });
            }
        }

        let status = if normalized.changed {
            if options.dry_run {
                debug!(path = %path.display(), "Dry run, not writing");
            } else {
                write_atomic(path, &normalized.text)?;
                info!(path = %path.display(), "File updated");
            }
            FileStatus::Updated
        } else {
            debug!(path = %path.display(), "File already normalized");
            FileStatus::Unchanged
        };

        Ok(FileReport {
            path: path.to_path_buf(),
            status,
            outcomes: normalized.outcomes,
            error: None,
        })
    }
}

/// Replace `path` with `contents` via a same-directory temp file and rename,
/// keeping the original file's permissions. A symlink is followed so the
/// link survives and its target is rewritten.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let path = target.as_path();
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut temp = NamedTempFile::new_in(dir).map_err(|e| ShapefixError::io(path, e))?;
    temp.write_all(contents.as_bytes())
        .map_err(|e| ShapefixError::io(path, e))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| ShapefixError::io(path, e))?;

    if let Ok(metadata) = fs::metadata(path) {
        fs::set_permissions(temp.path(), metadata.permissions())
            .map_err(|e| ShapefixError::io(path, e))?;
    }

    temp.persist(path)
        .map_err(|e| ShapefixError::io(path, e.error))?;
    Ok(())
}
