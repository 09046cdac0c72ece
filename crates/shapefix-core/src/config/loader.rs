//! Configuration loader
//!
//! Handles loading configuration from TOML files, environment variables,
//! and default values using Figment.

use super::ShapefixConfig;
use crate::constants::{
    CONFIG_ENV_PREFIX, CONFIG_ENV_SEPARATOR, DEFAULT_CONFIG_FILENAME, LOG_ENV_VAR,
};
use crate::{Result, ShapefixError};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    ///
    /// Sources are merged in this order (later sources override earlier):
    /// 1. Default values from `ShapefixConfig::default()`
    /// 2. TOML configuration file: the explicit path, which must exist, or
    ///    `shapefix.toml` in the working directory if present
    /// 3. Environment variables with prefix, nested keys split on `__`
    ///    (e.g. `SHAPEFIX_DRY_RUN`, `SHAPEFIX_LOGGING__LEVEL`)
    pub fn load(&self) -> Result<ShapefixConfig> {
        let config = self.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Merge all sources without validating, for callers that apply further
    /// overrides and validate afterwards
    pub fn extract(&self) -> Result<ShapefixConfig> {
        Ok(self.figment()?.extract::<ShapefixConfig>()?)
    }

    /// The merged provider stack, before extraction
    pub fn figment(&self) -> Result<Figment> {
        let mut figment = Figment::new().merge(Serialized::defaults(ShapefixConfig::default()));

        if let Some(config_path) = self.config_file()? {
            figment = figment.merge(Toml::file(config_path));
        }

        // The log filter variable shares the prefix but is not a config key
        let log_key = LOG_ENV_VAR
            .strip_prefix(&format!("{}_", self.env_prefix))
            .unwrap_or(LOG_ENV_VAR)
            .to_lowercase();
        figment = figment.merge(
            Env::prefixed(&format!("{}_", self.env_prefix))
                .ignore(&[log_key.as_str()])
                .split(CONFIG_ENV_SEPARATOR),
        );

        Ok(figment)
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// The config file to merge, if any
    fn config_file(&self) -> Result<Option<PathBuf>> {
        match &self.config_path {
            Some(path) if path.exists() => Ok(Some(path.clone())),
            Some(path) => Err(ShapefixError::NotFound { path: path.clone() }),
            None => Ok(Self::find_default_config_path()),
        }
    }

    /// `shapefix.toml` in the working directory, if it exists
    fn find_default_config_path() -> Option<PathBuf> {
        let candidate = env::current_dir().ok()?.join(DEFAULT_CONFIG_FILENAME);
        candidate.exists().then_some(candidate)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
