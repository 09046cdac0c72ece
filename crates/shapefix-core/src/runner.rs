//! Run driver
//!
//! Iterates over the configured files and normalizes each one. Files are
//! independent: a failure on one file is recorded and the run moves on. A
//! missing file is skipped unless the `abort` policy is configured.

use crate::config::{MissingAnchorPolicy, MissingFilePolicy, ShapefixConfig};
use crate::normalizer::{FileReport, NormalizeOptions, TextNormalizer};
use crate::reporter::RunReport;
use crate::{Result, ShapefixError};
use tracing::{error, info, warn};

/// Normalizes every configured file with one compiled rule pipeline
#[derive(Debug)]
pub struct Runner {
    config: ShapefixConfig,
    normalizer: TextNormalizer,
}

impl Runner {
    /// Validate the configuration and compile its rules
    pub fn new(config: ShapefixConfig) -> Result<Self> {
        let normalizer = config.compile()?;
        Ok(Self { config, normalizer })
    }

    pub fn config(&self) -> &ShapefixConfig {
        &self.config
    }

    fn options(&self) -> NormalizeOptions {
        NormalizeOptions {
            dry_run: self.config.is_read_only(),
            strict_anchor: self.config.missing_anchor == MissingAnchorPolicy::Error,
        }
    }

    /// Process all files in order and collect a report
    pub fn run(&self) -> Result<RunReport> {
        let options = self.options();
        let mut files = Vec::with_capacity(self.config.files.len());
        let mut aborted = false;

        info!(
            files = self.config.files.len(),
            rules = self.normalizer.rule_count(),
            dry_run = options.dry_run,
            "Starting normalization run"
        );

        for file in &self.config.files {
            let path = self.config.resolve(file);
            match self.normalizer.normalize_file(&path, options) {
                Ok(report) => {
                    for warning in report.warnings() {
                        warn!(path = %path.display(), "{}", warning);
                    }
                    files.push(report);
                }
                Err(ShapefixError::NotFound { path }) => {
                    warn!(path = %path.display(), "File not found");
                    files.push(FileReport::not_found(path));
                    if self.config.missing_file == MissingFilePolicy::Abort {
                        error!("Aborting run on missing file");
                        aborted = true;
                        break;
                    }
                }
                Err(err) => {
                    error!(path = %path.display(), error = %err, "File processing failed");
                    files.push(FileReport::failed(path, &err));
                }
            }
        }

        Ok(RunReport::new(
            self.config.root.clone(),
            options.dry_run,
            self.config.check,
            aborted,
            files,
        ))
    }
}

/// Build a runner for `config` and execute it
pub fn run(config: ShapefixConfig) -> Result<RunReport> {
    Runner::new(config)?.run()
}
