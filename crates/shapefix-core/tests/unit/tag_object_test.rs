//! Unit tests for the `tag_object` rule

use shapefix_core::rules::TagObjectRule;
use shapefix_core::{CodeMask, Rule, RuleEffect, ShapefixError};

fn data_rule() -> TagObjectRule {
    TagObjectRule::new("return", "data", "success", "true").unwrap()
}

fn apply(rule: &TagObjectRule, text: &str) -> (String, RuleEffect) {
    let application = rule.apply(text, &CodeMask::analyze(text).unwrap());
    let out = application.text.unwrap_or_else(|| text.to_string());
    (out, application.effect)
}

#[test]
fn test_targeted_substitution() {
    let (out, effect) = apply(&data_rule(), "return { data: 1 };");
    assert_eq!(out, "return { success: true, data: 1 };");
    assert_eq!(effect, RuleEffect::Rewritten { count: 1 });
    assert!(!out.contains("return { data:"));
}

#[test]
fn test_canonical_text_is_untouched() {
    let text = "return { success: true, data: 1 };";
    let application = data_rule().apply(text, &CodeMask::analyze(text).unwrap());
    assert!(application.text.is_none());
    assert_eq!(application.effect, RuleEffect::Rewritten { count: 0 });
}

#[test]
fn test_mixed_content_is_not_double_tagged() {
    let text = "return { success: true, data: a };\nreturn { data: b };\n";
    let (out, effect) = apply(&data_rule(), text);
    assert_eq!(
        out,
        "return { success: true, data: a };\nreturn { success: true, data: b };\n"
    );
    assert_eq!(effect, RuleEffect::Rewritten { count: 1 });
    assert!(!out.contains("success: true, success: true"));
}

#[test]
fn test_tag_elsewhere_in_object_counts_as_canonical() {
    let rule = data_rule();
    for text in [
        "return { data: x, success: true };",
        "return { data: x, \"success\": true };",
        "return { data: x, success };",
    ] {
        let (out, _) = apply(&rule, text);
        assert_eq!(out, text, "should not tag: {text}");
    }
}

#[test]
fn test_nested_tag_does_not_count() {
    let (out, _) = apply(&data_rule(), "return { data: { success: false } };");
    assert_eq!(out, "return { success: true, data: { success: false } };");
}

#[test]
fn test_tag_inside_string_value_does_not_count() {
    let (out, _) = apply(&data_rule(), r#"return { data: "success: true" };"#);
    assert_eq!(out, r#"return { success: true, data: "success: true" };"#);
}

#[test]
fn test_multiline_object_gets_tag_on_own_line() {
    let text = "return {\n    data: rows,\n    total,\n};";
    let (out, _) = apply(&data_rule(), text);
    assert_eq!(out, "return {\n    success: true,\n    data: rows,\n    total,\n};");
}

#[test]
fn test_crlf_indentation_is_preserved() {
    let text = "return {\r\n  data: rows\r\n};";
    let (out, _) = apply(&data_rule(), text);
    assert_eq!(out, "return {\r\n  success: true,\r\n  data: rows\r\n};");
}

#[test]
fn test_compact_object() {
    let (out, _) = apply(&data_rule(), "return {data:1}");
    assert_eq!(out, "return {success: true, data:1}");
}

#[test]
fn test_comments_and_strings_are_ignored() {
    let text = "// return { data: 1 }\nconst s = \"return { data: 2 }\";\n/* return { data: 3 } */";
    let (out, effect) = apply(&data_rule(), text);
    assert_eq!(out, text);
    assert_eq!(effect, RuleEffect::Rewritten { count: 0 });
}

#[test]
fn test_key_must_be_first_and_exact() {
    let rule = data_rule();
    for text in [
        "return { total: 1, data: 2 };",
        "return { dataset: 1 };",
        "return { metadata: 1 };",
        "myreturn { data: 1 }",
        "const x = { data: 1 };",
    ] {
        let (out, _) = apply(&rule, text);
        assert_eq!(out, text, "should not tag: {text}");
    }
}

#[test]
fn test_error_rule() {
    let rule = TagObjectRule::new("return", "error", "success", "false").unwrap();
    let (out, _) = apply(&rule, r#"if (!ok) return { error: "Недостаточно прав" };"#);
    assert_eq!(
        out,
        r#"if (!ok) return { success: false, error: "Недостаточно прав" };"#
    );
}

#[test]
fn test_idempotent() {
    let rule = data_rule();
    let text = "return { data: 1 };\nreturn {\n  data: 2\n};\nreturn { success: true, data: 3 };";
    let (once, _) = apply(&rule, text);
    let (twice, effect) = apply(&rule, &once);
    assert_eq!(once, twice);
    assert_eq!(effect, RuleEffect::Rewritten { count: 0 });
}

#[test]
fn test_invalid_identifiers_are_rejected() {
    let err = TagObjectRule::new("return", "da ta", "success", "true").unwrap_err();
    assert!(matches!(err, ShapefixError::Config(_)));
    assert!(TagObjectRule::new("return", "data", "", "true").is_err());
    assert!(TagObjectRule::new("return", "data", "success", "  ").is_err());
}

#[test]
fn test_name_describes_rule() {
    assert_eq!(
        data_rule().name(),
        "tag_object(return { data: } +success: true)"
    );
}

#[test]
fn test_regex_literal_before_return_does_not_hide_it() {
    let rule = data_rule();
    for (text, expected) in [
        (
            "function f(s) {\n    s = s.replace(/`/g, \"\");\n    return { data: 1 };\n}",
            "function f(s) {\n    s = s.replace(/`/g, \"\");\n    return { success: true, data: 1 };\n}",
        ),
        (
            "const q = /'/; return { data: 1 };",
            "const q = /'/; return { success: true, data: 1 };",
        ),
        (
            "const d = /\"/; return { data: 1 };",
            "const d = /\"/; return { success: true, data: 1 };",
        ),
    ] {
        let (out, effect) = apply(&rule, text);
        assert_eq!(out, expected);
        assert_eq!(effect, RuleEffect::Rewritten { count: 1 });
    }
}

#[test]
fn test_tag_as_method_counts_as_canonical() {
    let text = "return { data: x, success() { return true; } };";
    let (out, _) = apply(&data_rule(), text);
    assert_eq!(out, text);
}
