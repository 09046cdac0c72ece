//! Configuration Module
//!
//! Layered configuration for shapefix: built-in defaults, an optional
//! `shapefix.toml`, then `SHAPEFIX_*` environment variables.

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{LoggingConfig, MissingAnchorPolicy, MissingFilePolicy, ShapefixConfig};
