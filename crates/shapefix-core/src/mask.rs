//! Code mask built from a Tree-sitter parse
//!
//! Classifies every byte of a TypeScript source text as code, comment,
//! string or regular expression literal. Rules consult the mask so that a
//! pattern appearing inside `// return { data: x }` or
//! `"return { data: x }"` is never rewritten.
//!
//! Non-code ranges come from the `comment`, `string`, `regex` and
//! `template_string` nodes of the tree (plus `jsx_text` for TSX). The text
//! parts of a template literal are string regions while its `${ ... }`
//! substitutions are code, including nested templates. The parse tree is
//! kept so rules can inspect object literals directly.

use crate::{Result, ShapefixError};
use std::ops::Range;
use std::path::Path;
use tree_sitter::{Language, Node, Parser, Tree};

/// Lexical class of a byte offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Code,
    Comment,
    /// String literal, template text, or JSX text
    StringLiteral,
    RegexLiteral,
}

/// Grammar used to parse a source text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SourceDialect {
    #[default]
    TypeScript,
    Tsx,
}

impl SourceDialect {
    /// Pick the grammar from a file extension; anything but `.tsx`/`.jsx`
    /// parses as plain TypeScript
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("tsx") || ext.eq_ignore_ascii_case("jsx") => {
                Self::Tsx
            }
            _ => Self::TypeScript,
        }
    }

    /// Get tree-sitter language for this dialect
    pub fn tree_sitter_language(self) -> Language {
        match self {
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Self::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

/// A maximal non-code span
#[derive(Debug, Clone, PartialEq, Eq)]
struct Span {
    range: Range<usize>,
    region: Region,
}

/// Non-code spans of one text, sorted by start offset, and its parse tree
#[derive(Debug, Clone)]
pub struct CodeMask {
    spans: Vec<Span>,
    len: usize,
    tree: Tree,
}

impl CodeMask {
    /// Parse `text` as TypeScript and record its comment and string spans
    pub fn analyze(text: &str) -> Result<Self> {
        Self::analyze_as(text, SourceDialect::TypeScript)
    }

    /// Parse `text` with the grammar of `dialect`
    pub fn analyze_as(text: &str, dialect: SourceDialect) -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&dialect.tree_sitter_language())
            .map_err(|e| ShapefixError::Parse(format!("failed to load {dialect:?} grammar: {e}")))?;
        let tree = parser
            .parse(text, None)
            .ok_or_else(|| ShapefixError::Parse(format!("{dialect:?} parse was cancelled")))?;

        let mut spans = Vec::new();
        collect_spans(tree.root_node(), &mut spans);

        Ok(Self {
            spans,
            len: text.len(),
            tree,
        })
    }

    /// Region containing byte `offset`; offsets past the end count as code
    pub fn region_at(&self, offset: usize) -> Region {
        self.span_at(offset).map_or(Region::Code, |(_, region)| region)
    }

    /// The non-code span containing byte `offset`, if any
    pub fn span_at(&self, offset: usize) -> Option<(Range<usize>, Region)> {
        let idx = self.spans.partition_point(|span| span.range.end <= offset);
        self.spans
            .get(idx)
            .filter(|span| span.range.start <= offset)
            .map(|span| (span.range.clone(), span.region))
    }

    /// True if byte `offset` is code
    pub fn is_code(&self, offset: usize) -> bool {
        self.region_at(offset) == Region::Code
    }

    /// True if byte `offset` is inside a comment
    pub fn is_comment(&self, offset: usize) -> bool {
        self.region_at(offset) == Region::Comment
    }

    /// Non-code ranges with their region, in text order
    pub fn non_code(&self) -> impl Iterator<Item = (Range<usize>, Region)> + '_ {
        self.spans.iter().map(|span| (span.range.clone(), span.region))
    }

    /// Top-level property names of the object literal whose `{` is at byte
    /// `brace`, or `None` if no object literal opens there
    ///
    /// Keyed (`name: v`), quoted (`"name": v`), shorthand (`name`) and
    /// method (`name() {}`) properties are listed; spreads and computed
    /// keys are not.
    pub fn object_properties<'t>(&self, text: &'t str, brace: usize) -> Option<Vec<&'t str>> {
        let token = self
            .tree
            .root_node()
            .descendant_for_byte_range(brace, brace + 1)?;
        let object = if token.kind() == "object" {
            token
        } else {
            token.parent()?
        };
        if object.kind() != "object" || object.start_byte() != brace {
            return None;
        }

        let source = text.as_bytes();
        let mut names = Vec::new();
        let mut cursor = object.walk();
        for property in object.named_children(&mut cursor) {
            let name = match property.kind() {
                "pair" => property.child_by_field_name("key"),
                "method_definition" => property.child_by_field_name("name"),
                "shorthand_property_identifier" => Some(property),
                _ => None,
            };
            let Some(name) = name else { continue };
            if name.kind() == "computed_property_name" {
                continue;
            }
            if let Ok(raw) = name.utf8_text(source) {
                names.push(raw.trim_matches(['"', '\'']));
            }
        }
        Some(names)
    }

    /// True if the parse recovered from syntax errors somewhere in the text
    pub fn has_syntax_errors(&self) -> bool {
        self.tree.root_node().has_error()
    }

    /// Length of the analyzed text in bytes
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Span {
    fn new(range: Range<usize>, region: Region) -> Self {
        Self { range, region }
    }
}

/// Walk `node` in document order, pushing non-code spans
fn collect_spans(node: Node<'_>, spans: &mut Vec<Span>) {
    let region = match node.kind() {
        "comment" | "hash_bang_line" => Some(Region::Comment),
        "string" | "jsx_text" => Some(Region::StringLiteral),
        "regex" => Some(Region::RegexLiteral),
        "template_string" => {
            collect_template(node, spans);
            return;
        }
        _ => None,
    };
    if let Some(region) = region {
        if node.end_byte() > node.start_byte() {
            spans.push(Span::new(node.byte_range(), region));
        }
        return;
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_spans(child, spans);
    }
}

/// Template text is string, `${ ... }` substitutions are code
fn collect_template(node: Node<'_>, spans: &mut Vec<Span>) {
    let mut text_start = node.start_byte();
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() != "template_substitution" {
            continue;
        }
        if child.start_byte() > text_start {
            spans.push(Span::new(
                text_start..child.start_byte(),
                Region::StringLiteral,
            ));
        }
        let mut inner = child.walk();
        for expr in child.children(&mut inner) {
            collect_spans(expr, spans);
        }
        text_start = child.end_byte();
    }
    if node.end_byte() > text_start {
        spans.push(Span::new(text_start..node.end_byte(), Region::StringLiteral));
    }
}
