//! # shapefix
//!
//! Normalizes result objects returned by TypeScript server actions so every
//! one carries an explicit `success` flag, and adds the `ActionResult`
//! import where it is missing.
//!
//! ## Example
//!
//! ```ignore
//! use shapefix::engine::TextNormalizer;
//!
//! let normalizer = TextNormalizer::with_default_rules()?;
//! let out = normalizer.normalize_text("return { data: 1 };")?;
//! assert_eq!(out.text, "return { success: true, data: 1 };");
//! ```
//!
//! ## Layout
//!
//! - `engine` - rules, normalizer, run driver, configuration (from `shapefix-core`)
//! - `cli` - command line parsing and the binary entry point

pub mod cli;

/// Normalization engine
///
/// Re-exports from the core crate for convenience
pub mod engine {
    pub use shapefix_core::*;
}

pub use cli::{Cli, OutputFormat, run};
pub use shapefix_core::{
    ConfigLoader, Reporter, RunReport, Runner, ShapefixConfig, ShapefixError, TextNormalizer,
};
