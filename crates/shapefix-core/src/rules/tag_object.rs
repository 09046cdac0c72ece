//! Tag object literals with a discriminant field
//!
//! `return { data: x }` becomes `return { success: true, data: x }`. An
//! object is left alone when `key` is not its first property, or when the
//! parsed object literal already has a top-level `tag` property anywhere,
//! so `return { data: x, success: true }` is not tagged twice.

use super::{RuleApplication, RuleEffect, build_regex, require_non_empty};
use crate::mask::CodeMask;
use crate::{Result, ShapefixError};
use regex::Regex;

#[derive(Debug)]
pub struct TagObjectRule {
    keyword: String,
    key: String,
    tag: String,
    value: String,
    pattern: Regex,
}

impl TagObjectRule {
    pub fn new(keyword: &str, key: &str, tag: &str, value: &str) -> Result<Self> {
        for (field, ident) in [("keyword", keyword), ("key", key), ("tag", tag)] {
            require_non_empty("tag_object", field, ident)?;
            if !is_identifier(ident) {
                return Err(ShapefixError::Config(format!(
                    "tag_object rule: `{field}` must be an identifier, got `{ident}`"
                )));
            }
        }
        require_non_empty("tag_object", "value", value)?;

        let pattern = format!(
            r"\b{}\s*\{{(\s*){}\s*:",
            regex::escape(keyword),
            regex::escape(key)
        );

        Ok(Self {
            keyword: keyword.to_string(),
            key: key.to_string(),
            tag: tag.to_string(),
            value: value.trim().to_string(),
            pattern: build_regex(&pattern, false)?,
        })
    }

    /// Text inserted before the first key. Multi-line objects get the tag on
    /// its own line with the same indentation as the key.
    fn insertion(&self, leading_ws: &str) -> String {
        if leading_ws.contains('\n') {
            format!("{}: {},{}", self.tag, self.value, leading_ws)
        } else {
            format!("{}: {}, ", self.tag, self.value)
        }
    }
}

impl super::Rule for TagObjectRule {
    fn name(&self) -> String {
        format!(
            "tag_object({} {{ {}: }} +{}: {})",
            self.keyword, self.key, self.tag, self.value
        )
    }

    fn apply(&self, text: &str, mask: &CodeMask) -> RuleApplication {
        let mut output = String::with_capacity(text.len() + 64);
        let mut last = 0;
        let mut count = 0;

        for caps in self.pattern.captures_iter(text) {
            let (Some(whole), Some(ws)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            if !mask.is_code(whole.start()) {
                continue;
            }
            // Only object literals without a top-level tag are rewritten
            let brace = ws.start() - 1;
            match mask.object_properties(text, brace) {
                Some(properties) if !properties.contains(&self.tag.as_str()) => {}
                _ => continue,
            }

            output.push_str(&text[last..ws.end()]);
            output.push_str(&self.insertion(ws.as_str()));
            last = ws.end();
            count += 1;
        }

        if count == 0 {
            return RuleApplication::unchanged(RuleEffect::Rewritten { count });
        }
        output.push_str(&text[last..]);
        RuleApplication::rewritten(output, RuleEffect::Rewritten { count })
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
