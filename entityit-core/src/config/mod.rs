//! Configuration for the generator
//!
//! Values are resolved in the following order (highest priority wins):
//!
//! 1. **Code / CLI flags**
//! 2. **Environment variables** (`ENTITYIT_*`)
//! 3. **Config file** (`entityit.toml`)
//! 4. **Defaults**
//!
//! # Example
//!
//! ```no_run
//! use entityit_core::config::EntityItConfig;
//!
//! let config = EntityItConfig::load()?;
//! config.validate()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod generator;
pub mod logging;
pub mod output;

pub use generator::GeneratorConfig;
pub use logging::LoggingConfig;
pub use output::OutputConfig;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "entityit.toml";

/// Complete generator configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityItConfig {
    pub generator: GeneratorConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

impl EntityItConfig {
    /// Load with the full chain: defaults, `entityit.toml`, environment.
    pub fn load() -> Result<Self> {
        Self::load_from(CONFIG_FILE)
    }

    /// Load with a specific config file; a missing file is skipped.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let mut config = Self::default();

        if path.exists() {
            let file_config = Self::from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?;
            config.merge(file_config);
        }

        config.apply_env_vars();

        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config: {}", path.as_ref().display()))
    }

    /// Merge another config into this one (other takes priority)
    pub fn merge(&mut self, other: Self) {
        self.generator.merge(other.generator);
        self.output.merge(other.output);
        self.logging.merge(other.logging);
    }

    pub fn apply_env_vars(&mut self) {
        self.generator.apply_env_vars();
        self.output.apply_env_vars();
        self.logging.apply_env_vars();
    }

    pub fn validate(&self) -> Result<()> {
        self.generator.validate()?;
        self.output.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
