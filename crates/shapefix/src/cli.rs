//! Command line interface

use anyhow::Context;
use clap::{Parser, ValueEnum};
use shapefix_core::logging::init_logging;
use shapefix_core::{
    ConfigLoader, MissingAnchorPolicy, MissingFilePolicy, Reporter, Runner, ShapefixConfig,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

/// Report format written to stdout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

/// Command line interface for shapefix
#[derive(Parser, Debug, Default)]
#[command(name = "shapefix")]
#[command(about = "Tag result objects with a success flag and add missing imports")]
#[command(version)]
pub struct Cli {
    /// Files to normalize, relative to the root (replaces the configured list)
    pub files: Vec<PathBuf>,

    /// Path to configuration file (default: ./shapefix.toml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory that relative file paths are resolved against
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Show what would change without writing any file
    #[arg(long)]
    pub dry_run: bool,

    /// Fail if any file is not normalized; writes nothing
    #[arg(long)]
    pub check: bool,

    /// Stop at the first missing file instead of skipping it
    #[arg(long)]
    pub abort_on_missing: bool,

    /// Treat a missing import anchor as an error
    #[arg(long)]
    pub strict_anchor: bool,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Apply command line flags on top of the loaded configuration
    pub fn apply_overrides(&self, config: &mut ShapefixConfig) {
        if !self.files.is_empty() {
            config.files.clone_from(&self.files);
        }
        if let Some(root) = &self.root {
            config.root.clone_from(root);
        }
        if self.dry_run {
            config.dry_run = true;
        }
        if self.check {
            config.check = true;
        }
        if self.abort_on_missing {
            config.missing_file = MissingFilePolicy::Abort;
        }
        if self.strict_anchor {
            config.missing_anchor = MissingAnchorPolicy::Error;
        }
        match self.verbose {
            0 => {}
            1 => config.logging.level = "debug".to_string(),
            _ => config.logging.level = "trace".to_string(),
        }
    }

    /// Load configuration from file and environment, then apply flags.
    /// The result is validated by whoever consumes it.
    pub fn load_config(&self) -> anyhow::Result<ShapefixConfig> {
        let mut loader = ConfigLoader::new();
        if let Some(path) = &self.config {
            loader = loader.with_config_path(path);
        }
        let mut config = loader.extract().context("failed to load configuration")?;
        self.apply_overrides(&mut config);
        Ok(config)
    }
}

/// Run the CLI. Configuration and setup errors are returned as `Err`; a run
/// that completes but does not pass yields exit code 1.
pub fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let config = cli.load_config()?;

    if cli.print_config {
        config.validate().context("invalid configuration")?;
        print!("{}", config.to_toml()?);
        return Ok(ExitCode::SUCCESS);
    }

    let runner = Runner::new(config).context("invalid configuration")?;
    init_logging(&runner.config().logging)?;
    debug!(config = ?runner.config(), "Configuration loaded");

    let report = runner.run()?;
    match cli.format {
        OutputFormat::Human => print!("{}", Reporter::to_human_readable(&report)),
        OutputFormat::Json => println!("{}", Reporter::to_json(&report)?),
    }

    Ok(if report.summary.passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}
