//! Unit tests for `shapefix_core::reporter`

use shapefix_core::{FileReport, FileStatus, Reporter, RuleEffect, RuleOutcome, RunReport};
use std::path::PathBuf;

fn report(status: FileStatus, path: &str) -> FileReport {
    FileReport {
        path: PathBuf::from(path),
        status,
        outcomes: Vec::new(),
        error: None,
    }
}

fn anchor_warning() -> RuleOutcome {
    RuleOutcome {
        rule: "insert_import(`import a;`)".to_string(),
        effect: RuleEffect::AnchorMissing {
            anchor: "^import b".to_string(),
        },
    }
}

#[test]
fn test_summary_counts() {
    let mut warned = report(FileStatus::Updated, "b.ts");
    warned.outcomes.push(anchor_warning());
    let files = vec![
        report(FileStatus::Updated, "a.ts"),
        warned,
        report(FileStatus::Unchanged, "c.ts"),
        report(FileStatus::NotFound, "d.ts"),
    ];

    let run = RunReport::new(PathBuf::from("."), false, false, false, files);
    assert_eq!(run.summary.total, 4);
    assert_eq!(run.summary.updated, 2);
    assert_eq!(run.summary.unchanged, 1);
    assert_eq!(run.summary.not_found, 1);
    assert_eq!(run.summary.failed, 0);
    assert_eq!(run.summary.warnings, 1);
    assert!(run.summary.passed);
}

#[test]
fn test_failures_abort_and_check_fail_the_run() {
    let failed = RunReport::new(
        PathBuf::from("."),
        false,
        false,
        false,
        vec![report(FileStatus::Failed, "a.ts")],
    );
    assert!(!failed.summary.passed);

    let aborted = RunReport::new(
        PathBuf::from("."),
        false,
        false,
        true,
        vec![report(FileStatus::NotFound, "a.ts")],
    );
    assert!(!aborted.summary.passed);

    let pending = RunReport::new(
        PathBuf::from("."),
        true,
        true,
        false,
        vec![report(FileStatus::Updated, "a.ts")],
    );
    assert!(!pending.summary.passed);

    let clean = RunReport::new(
        PathBuf::from("."),
        true,
        true,
        false,
        vec![report(FileStatus::Unchanged, "a.ts")],
    );
    assert!(clean.summary.passed);
}

#[test]
fn test_human_readable_lines() {
    let mut failed = report(FileStatus::Failed, "e.ts");
    failed.error = Some("I/O error on e.ts: denied".to_string());
    let mut warned = report(FileStatus::Updated, "b.ts");
    warned.outcomes.push(anchor_warning());
    let run = RunReport::new(
        PathBuf::from("."),
        false,
        false,
        false,
        vec![
            report(FileStatus::Updated, "a.ts"),
            warned,
            report(FileStatus::Unchanged, "c.ts"),
            report(FileStatus::NotFound, "d.ts"),
            failed,
        ],
    );

    let output = Reporter::to_human_readable(&run);
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines[0], "updated a.ts");
    assert_eq!(lines[1], "updated b.ts");
    assert_eq!(
        lines[2],
        "  warning: insert_import(`import a;`): anchor `^import b` not found, import not inserted"
    );
    assert_eq!(lines[3], "unchanged c.ts");
    assert_eq!(lines[4], "file not found: d.ts");
    assert_eq!(lines[5], "failed e.ts: I/O error on e.ts: denied");
    assert!(output.contains("Status: FAILED"));
}

#[test]
fn test_dry_run_wording() {
    let run = RunReport::new(
        PathBuf::from("."),
        true,
        false,
        false,
        vec![report(FileStatus::Updated, "a.ts")],
    );
    let output = Reporter::to_human_readable(&run);
    assert!(output.starts_with("would update a.ts\n"));
    assert!(output.contains("Dry run: no files were written"));
    assert!(output.contains("Status: PASSED"));
}

#[test]
fn test_json_report() {
    let mut warned = report(FileStatus::Updated, "a.ts");
    warned.outcomes.push(anchor_warning());
    let run = RunReport::new(PathBuf::from("/srv"), false, false, false, vec![warned]);

    let json = Reporter::to_json(&run).unwrap();
    let json: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(json["root"], "/srv");
    assert_eq!(json["summary"]["passed"], true);
    assert_eq!(json["files"][0]["status"], "updated");
    assert_eq!(json["files"][0]["outcomes"][0]["effect"], "anchor_missing");
    assert_eq!(json["files"][0]["outcomes"][0]["anchor"], "^import b");
    assert!(json["files"][0].get("error").is_none());
}
