//! Rewrite Rules
//!
//! Each rule is one substitution intent. Rules are declared as data
//! ([`RuleConfig`], loaded from configuration) and compiled into trait
//! objects implementing [`Rule`].
//!
//! Every rule decides per occurrence whether the text is already in
//! canonical form, so applying a rule to its own output changes nothing.

mod import;
mod promote;
mod tag_object;

pub use import::InsertImportRule;
pub use promote::PromoteRule;
pub use tag_object::TagObjectRule;

use crate::constants::{
    DEFAULT_IMPORT_ANCHOR, DEFAULT_IMPORT_LINE, DEFAULT_IMPORT_MARKER, DEFAULT_RETURN_KEYWORD,
    DEFAULT_TAG_FIELD,
};
use crate::mask::CodeMask;
use crate::{Result, ShapefixError};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// A compiled substitution intent
pub trait Rule: Debug + Send + Sync {
    /// Short human-readable label used in reports and logs
    fn name(&self) -> String;

    /// Apply the rule to `text`. `mask` must have been computed from `text`.
    fn apply(&self, text: &str, mask: &CodeMask) -> RuleApplication;
}

/// Result of applying one rule to one text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleApplication {
    /// Rewritten text, `None` when the rule left the text unchanged
    pub text: Option<String>,
    pub effect: RuleEffect,
}

impl RuleApplication {
    pub fn unchanged(effect: RuleEffect) -> Self {
        Self { text: None, effect }
    }

    pub fn rewritten(text: String, effect: RuleEffect) -> Self {
        Self {
            text: Some(text),
            effect,
        }
    }
}

/// What a rule did to a text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum RuleEffect {
    /// Number of occurrences promoted to canonical form (may be zero)
    Rewritten { count: usize },
    ImportInserted,
    ImportPresent,
    /// The anchor line was not found, so the import could not be inserted
    AnchorMissing { anchor: String },
}

impl RuleEffect {
    /// True if the effect modified the text
    pub fn is_change(&self) -> bool {
        match self {
            Self::Rewritten { count } => *count > 0,
            Self::ImportInserted => true,
            Self::ImportPresent | Self::AnchorMissing { .. } => false,
        }
    }
}

/// Named effect recorded in a file report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleOutcome {
    pub rule: String,
    #[serde(flatten)]
    pub effect: RuleEffect,
}

impl std::fmt::Display for RuleOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.effect {
            RuleEffect::Rewritten { count } => {
                write!(f, "{}: {} occurrence(s) rewritten", self.rule, count)
            }
            RuleEffect::ImportInserted => write!(f, "{}: import inserted", self.rule),
            RuleEffect::ImportPresent => write!(f, "{}: import already present", self.rule),
            RuleEffect::AnchorMissing { anchor } => write!(
                f,
                "{}: anchor `{}` not found, import not inserted",
                self.rule, anchor
            ),
        }
    }
}

/// Declarative rule definition as it appears in `shapefix.toml`
///
/// ```toml
/// [[rules]]
/// kind = "tag_object"
/// key = "data"
/// value = "true"
///
/// [[rules]]
/// kind = "insert_import"
/// line = 'import { type ActionResult } from "@/lib/types";'
/// anchor = '^import \{ z \} from "zod";'
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleConfig {
    /// Add `tag: value` to object literals after `keyword` whose first key is `key`
    TagObject {
        #[serde(default = "default_keyword")]
        keyword: String,
        key: String,
        #[serde(default = "default_tag")]
        tag: String,
        value: String,
    },
    /// Replace literal `source` with `canonical`, skipping occurrences that
    /// overlap an existing `canonical`
    Promote { source: String, canonical: String },
    /// Insert `line` after the first line matching `anchor` unless the
    /// `marker` pattern matches in code (defaults to the trimmed line,
    /// matched literally)
    InsertImport {
        line: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        marker: Option<String>,
        anchor: String,
    },
}

fn default_keyword() -> String {
    DEFAULT_RETURN_KEYWORD.to_string()
}

fn default_tag() -> String {
    DEFAULT_TAG_FIELD.to_string()
}

impl RuleConfig {
    /// Validate the definition and build the executable rule
    pub fn compile(&self) -> Result<Box<dyn Rule>> {
        match self {
            Self::TagObject {
                keyword,
                key,
                tag,
                value,
            } => Ok(Box::new(TagObjectRule::new(keyword, key, tag, value)?)),
            Self::Promote { source, canonical } => {
                Ok(Box::new(PromoteRule::new(source, canonical)?))
            }
            Self::InsertImport {
                line,
                marker,
                anchor,
            } => Ok(Box::new(InsertImportRule::new(
                line,
                marker.as_deref(),
                anchor,
            )?)),
        }
    }
}

/// Compile an ordered rule list, failing on the first invalid definition
pub fn compile_rules(configs: &[RuleConfig]) -> Result<Vec<Box<dyn Rule>>> {
    if configs.is_empty() {
        return Err(ShapefixError::Config(
            "at least one rule must be configured".to_string(),
        ));
    }
    configs.iter().map(RuleConfig::compile).collect()
}

/// Rules for the warehouse action modules: tag `data` results as successes,
/// `error` results as failures, and import `ActionResult`
pub fn default_rules() -> Vec<RuleConfig> {
    vec![
        RuleConfig::TagObject {
            keyword: default_keyword(),
            key: "data".to_string(),
            tag: default_tag(),
            value: "true".to_string(),
        },
        RuleConfig::TagObject {
            keyword: default_keyword(),
            key: "error".to_string(),
            tag: default_tag(),
            value: "false".to_string(),
        },
        RuleConfig::InsertImport {
            line: DEFAULT_IMPORT_LINE.to_string(),
            marker: Some(DEFAULT_IMPORT_MARKER.to_string()),
            anchor: DEFAULT_IMPORT_ANCHOR.to_string(),
        },
    ]
}

/// Compile a regex, mapping failures to [`ShapefixError::InvalidRegex`]
pub(crate) fn build_regex(pattern: &str, multi_line: bool) -> Result<regex::Regex> {
    regex::RegexBuilder::new(pattern)
        .multi_line(multi_line)
        .crlf(multi_line)
        .build()
        .map_err(|e| ShapefixError::InvalidRegex {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })
}

/// Reject empty rule fields with a uniform message
pub(crate) fn require_non_empty(rule: &str, field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ShapefixError::Config(format!(
            "{rule} rule: `{field}` must not be empty"
        )));
    }
    Ok(())
}
