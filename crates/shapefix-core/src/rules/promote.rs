//! Literal promotion of a non-canonical fragment to its canonical form
//!
//! An occurrence of `source` that overlaps an occurrence of `canonical` is
//! already canonical and is kept as is. Every other occurrence in code is
//! replaced by `canonical`, so `return { data:` is promoted to
//! `return { success: true, data:` while existing canonical text is left
//! untouched, even when `canonical` itself contains `source`.

use super::{RuleApplication, RuleEffect, require_non_empty};
use crate::mask::CodeMask;
use crate::{Result, ShapefixError};
use std::ops::Range;

#[derive(Debug)]
pub struct PromoteRule {
    source: String,
    canonical: String,
}

impl PromoteRule {
    pub fn new(source: &str, canonical: &str) -> Result<Self> {
        require_non_empty("promote", "source", source)?;
        require_non_empty("promote", "canonical", canonical)?;
        if source == canonical {
            return Err(ShapefixError::Config(format!(
                "promote rule: source and canonical are identical (`{source}`)"
            )));
        }
        Ok(Self {
            source: source.to_string(),
            canonical: canonical.to_string(),
        })
    }
}

impl super::Rule for PromoteRule {
    fn name(&self) -> String {
        format!("promote(`{}` -> `{}`)", self.source, self.canonical)
    }

    fn apply(&self, text: &str, mask: &CodeMask) -> RuleApplication {
        let canonical_spans: Vec<Range<usize>> = text
            .match_indices(self.canonical.as_str())
            .map(|(start, _)| start..start + self.canonical.len())
            .collect();
        let overlaps_canonical = |start: usize, end: usize| {
            let idx = canonical_spans.partition_point(|span| span.end <= start);
            canonical_spans
                .get(idx)
                .is_some_and(|span| span.start < end)
        };

        let mut output = String::with_capacity(text.len() + 64);
        let mut last = 0;
        let mut count = 0;

        for (start, _) in text.match_indices(self.source.as_str()) {
            let end = start + self.source.len();
            if !mask.is_code(start) || overlaps_canonical(start, end) {
                continue;
            }
            output.push_str(&text[last..start]);
            output.push_str(&self.canonical);
            last = end;
            count += 1;
        }

        if count == 0 {
            return RuleApplication::unchanged(RuleEffect::Rewritten { count });
        }
        output.push_str(&text[last..]);
        RuleApplication::rewritten(output, RuleEffect::Rewritten { count })
    }
}
