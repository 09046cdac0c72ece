//! Unit tests for `shapefix_core::mask`

use shapefix_core::{CodeMask, Region, SourceDialect};
use std::path::Path;

fn region_of(text: &str, needle: &str) -> Region {
    let pos = text.find(needle).unwrap();
    CodeMask::analyze(text).unwrap().region_at(pos)
}

#[test]
fn test_plain_code() {
    let text = "return { data: 1 };";
    let mask = CodeMask::analyze(text).unwrap();
    assert!(mask.non_code().next().is_none());
    assert!((0..text.len()).all(|i| mask.is_code(i)));
    assert!(!mask.has_syntax_errors());
}

#[test]
fn test_line_comment_ends_at_newline() {
    let text = "// return { data: 1 }\nreturn { data: 2 };";
    assert_eq!(region_of(text, "return { data: 1"), Region::Comment);
    assert_eq!(region_of(text, "return { data: 2"), Region::Code);
    assert_eq!(region_of(text, "\n"), Region::Code);
}

#[test]
fn test_block_comment() {
    let text = "a; /* return { data: 1 } */ b;";
    assert_eq!(region_of(text, "return"), Region::Comment);
    assert_eq!(region_of(text, "*/"), Region::Comment);
    assert_eq!(region_of(text, " b;"), Region::Code);
}

#[test]
fn test_string_literals() {
    let text = r#"const a = "return { data: 1 }"; const b = 'it\'s // not a comment'; c;"#;
    assert_eq!(region_of(text, "return"), Region::StringLiteral);
    assert_eq!(region_of(text, "// not"), Region::StringLiteral);
    assert_eq!(region_of(text, "; c"), Region::Code);
}

#[test]
fn test_comment_markers_inside_strings_are_ignored() {
    let text = r#"const url = "http://example.com"; return { data: url };"#;
    assert_eq!(region_of(text, "return"), Region::Code);
}

#[test]
fn test_template_literal_with_interpolation() {
    let text = "const s = `text ${ { data: 1 }.data } more`; return x;";
    assert_eq!(region_of(text, "text"), Region::StringLiteral);
    assert_eq!(region_of(text, "{ data"), Region::Code);
    assert_eq!(region_of(text, " more"), Region::StringLiteral);
    assert_eq!(region_of(text, "return"), Region::Code);
}

#[test]
fn test_nested_template_literals() {
    let text = "const t = `a ${`b ${c} d`} e` + f;";
    assert_eq!(region_of(text, "b "), Region::StringLiteral);
    assert_eq!(region_of(text, "c}"), Region::Code);
    assert_eq!(region_of(text, " d"), Region::StringLiteral);
    assert_eq!(region_of(text, " e"), Region::StringLiteral);
    assert_eq!(region_of(text, "+ f"), Region::Code);
}

#[test]
fn test_regex_literals_with_quotes_do_not_open_strings() {
    for (text, pattern) in [
        ("s = s.replace(/`/g, \"\");\nreturn { data: 1 };", "/`/g"),
        ("const q = /'/; return { data: 1 };", "/'/"),
        ("const d = /\"/; return { data: 1 };", "/\"/"),
    ] {
        assert_eq!(region_of(text, pattern), Region::RegexLiteral, "{text}");
        assert_eq!(region_of(text, "return"), Region::Code, "{text}");
    }
}

#[test]
fn test_line_continuation_with_crlf_stays_in_string() {
    let text = "const s = \"first \\\r\nsecond\";\r\nreturn { data: s };\r\n";
    assert_eq!(region_of(text, "second"), Region::StringLiteral);
    assert_eq!(region_of(text, "return"), Region::Code);
}

#[test]
fn test_jsx_text_apostrophe_in_tsx() {
    let text = "const el = <p>Don't panic</p>;\nfunction f() { return { data: el }; }\n";
    let mask = CodeMask::analyze_as(text, SourceDialect::Tsx).unwrap();
    assert_eq!(
        mask.region_at(text.find("Don't").unwrap()),
        Region::StringLiteral
    );
    assert!(mask.is_code(text.find("return").unwrap()));
}

#[test]
fn test_dialect_from_path() {
    assert_eq!(
        SourceDialect::from_path(Path::new("app/page.tsx")),
        SourceDialect::Tsx
    );
    assert_eq!(
        SourceDialect::from_path(Path::new("app/actions.ts")),
        SourceDialect::TypeScript
    );
    assert_eq!(
        SourceDialect::from_path(Path::new("Makefile")),
        SourceDialect::TypeScript
    );
}

#[test]
fn test_object_properties_lists_top_level_names() {
    let text = "return { data: 1, \"success\": true, ok, run() {}, ...rest, [k]: 2, nested: { inner: 3 } };";
    let mask = CodeMask::analyze(text).unwrap();
    let brace = text.find('{').unwrap();
    assert_eq!(
        mask.object_properties(text, brace).unwrap(),
        vec!["data", "success", "ok", "run", "nested"]
    );
}

#[test]
fn test_object_properties_rejects_non_objects() {
    let text = "if (x) { y(); }";
    let mask = CodeMask::analyze(text).unwrap();
    assert!(mask.object_properties(text, text.find('{').unwrap()).is_none());
    assert!(mask.object_properties(text, 0).is_none());
}

#[test]
fn test_offsets_past_end_are_code() {
    let mask = CodeMask::analyze("// c").unwrap();
    assert_eq!(mask.len(), 4);
    assert!(mask.is_code(10));
    assert!(!CodeMask::analyze("x").unwrap().is_empty());
}
