//! shapefix - Entry Point
//!
//! Lives in the facade crate next to the library re-exports.
//!
//! | Exit code | Meaning |
//! |-----------|---------|
//! | 0 | every file normalized (or already normalized) |
//! | 1 | a file failed, the run aborted on a missing file, or `--check` found pending changes |
//! | 2 | configuration or setup error |

use clap::Parser;
use shapefix::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match shapefix::run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}
