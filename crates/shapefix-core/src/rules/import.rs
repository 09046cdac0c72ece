//! Insert a missing import line after an anchor line
//!
//! The import counts as present when the `marker` pattern matches in code,
//! so an existing import of the same name in another form is not
//! duplicated.

use super::{RuleApplication, RuleEffect, build_regex, require_non_empty};
use crate::mask::CodeMask;
use crate::{Result, ShapefixError};
use regex::Regex;

#[derive(Debug)]
pub struct InsertImportRule {
    line: String,
    marker: Regex,
    anchor_pattern: String,
    anchor: Regex,
}

impl InsertImportRule {
    pub fn new(line: &str, marker: Option<&str>, anchor: &str) -> Result<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        require_non_empty("insert_import", "line", line)?;
        require_non_empty("insert_import", "anchor", anchor)?;
        if line.contains('\n') {
            return Err(ShapefixError::Config(format!(
                "insert_import rule: `line` must be a single line, got `{line}`"
            )));
        }
        let marker = match marker {
            Some(pattern) => {
                require_non_empty("insert_import", "marker", pattern)?;
                build_regex(pattern, true)?
            }
            None => build_regex(&regex::escape(line.trim()), true)?,
        };

        Ok(Self {
            line: line.to_string(),
            marker,
            anchor_pattern: anchor.to_string(),
            anchor: build_regex(anchor, true)?,
        })
    }
}

impl super::Rule for InsertImportRule {
    fn name(&self) -> String {
        format!("insert_import(`{}`)", self.line.trim())
    }

    fn apply(&self, text: &str, mask: &CodeMask) -> RuleApplication {
        // Commented-out imports do not count as present
        let present = self
            .marker
            .find_iter(text)
            .any(|m| mask.is_code(m.start()));
        if present {
            return RuleApplication::unchanged(RuleEffect::ImportPresent);
        }

        let Some(anchor) = self
            .anchor
            .find_iter(text)
            .find(|m| mask.is_code(m.start()))
        else {
            return RuleApplication::unchanged(RuleEffect::AnchorMissing {
                anchor: self.anchor_pattern.clone(),
            });
        };

        // Insert after the line holding the last matched byte
        let end = anchor.end();
        let newline = if end > anchor.start() && text[..end].ends_with('\n') {
            Some(end - 1)
        } else {
            text[end..].find('\n').map(|pos| end + pos)
        };
        let mut output = String::with_capacity(text.len() + self.line.len() + 2);

        match newline {
            Some(newline) => {
                let eol = if newline > 0 && text.as_bytes()[newline - 1] == b'\r' {
                    "\r\n"
                } else {
                    "\n"
                };
                output.push_str(&text[..=newline]);
                output.push_str(&self.line);
                output.push_str(eol);
                output.push_str(&text[newline + 1..]);
            }
            None => {
                let eol = if text.contains("\r\n") { "\r\n" } else { "\n" };
                output.push_str(text);
                output.push_str(eol);
                output.push_str(&self.line);
            }
        }

        RuleApplication::rewritten(output, RuleEffect::ImportInserted)
    }
}
