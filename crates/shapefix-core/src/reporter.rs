//! Run Report Generation
//!
//! Generates reports in two formats:
//! - Human-readable for terminal output, one line per file
//! - JSON for CI integration

use crate::Result;
use crate::normalizer::{FileReport, FileStatus};
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::path::PathBuf;

/// Report of one run over the configured files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Timestamp of the run
    pub timestamp: String,
    /// Directory relative paths were resolved against
    pub root: PathBuf,
    /// Nothing was written
    pub dry_run: bool,
    /// Pending changes count as failure
    pub check: bool,
    /// The run stopped early on a missing file
    pub aborted: bool,
    /// Per-file results, in processing order
    pub files: Vec<FileReport>,
    pub summary: RunSummary,
}

/// Summary of a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub total: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub not_found: usize,
    pub failed: usize,
    /// Number of missing-anchor warnings
    pub warnings: usize,
    /// No failed files, no abort, and in check mode no pending changes
    pub passed: bool,
}

impl RunReport {
    pub fn new(
        root: PathBuf,
        dry_run: bool,
        check: bool,
        aborted: bool,
        files: Vec<FileReport>,
    ) -> Self {
        let summary = RunSummary::from_files(&files, check, aborted);
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            root,
            dry_run,
            check,
            aborted,
            files,
            summary,
        }
    }
}

impl RunSummary {
    fn from_files(files: &[FileReport], check: bool, aborted: bool) -> Self {
        let count = |status: FileStatus| files.iter().filter(|f| f.status == status).count();
        let updated = count(FileStatus::Updated);
        let failed = count(FileStatus::Failed);

        Self {
            total: files.len(),
            updated,
            unchanged: count(FileStatus::Unchanged),
            not_found: count(FileStatus::NotFound),
            failed,
            warnings: files.iter().map(|f| f.warnings().count()).sum(),
            passed: failed == 0 && !aborted && !(check && updated > 0),
        }
    }
}

/// Report generator
pub struct Reporter;

impl Reporter {
    /// Generate JSON report
    pub fn to_json(report: &RunReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }

    /// One status line per file
    pub fn file_line(file: &FileReport, dry_run: bool) -> String {
        let path = file.path.display();
        match file.status {
            FileStatus::Updated if dry_run => format!("would update {path}"),
            FileStatus::Updated => format!("updated {path}"),
            FileStatus::Unchanged => format!("unchanged {path}"),
            FileStatus::NotFound => format!("file not found: {path}"),
            FileStatus::Failed => format!(
                "failed {path}: {}",
                file.error.as_deref().unwrap_or("unknown error")
            ),
        }
    }

    /// Generate human-readable report
    pub fn to_human_readable(report: &RunReport) -> String {
        let mut output = String::new();

        for file in &report.files {
            let _ = writeln!(output, "{}", Self::file_line(file, report.dry_run));
            for warning in file.warnings() {
                let _ = writeln!(output, "  warning: {warning}");
            }
        }

        let summary = &report.summary;
        output.push_str("\n--- Summary ---\n");
        let _ = writeln!(output, "Files:      {}", summary.total);
        let _ = writeln!(output, "  Updated:   {}", summary.updated);
        let _ = writeln!(output, "  Unchanged: {}", summary.unchanged);
        let _ = writeln!(output, "  Not found: {}", summary.not_found);
        let _ = writeln!(output, "  Failed:    {}", summary.failed);
        let _ = writeln!(output, "Warnings:   {}", summary.warnings);
        if report.dry_run {
            output.push_str("Dry run: no files were written\n");
        }
        if report.aborted {
            output.push_str("Run aborted at the first missing file\n");
        }
        if report.check && summary.updated > 0 {
            output.push_str("Check failed: files are not normalized\n");
        }
        let _ = writeln!(
            output,
            "Status: {}",
            if summary.passed { "PASSED" } else { "FAILED" }
        );

        output
    }
}
