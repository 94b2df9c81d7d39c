//! Logging configuration

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::env;

pub const LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string() }
    }
}

impl LoggingConfig {
    pub fn merge(&mut self, other: Self) {
        *self = other;
    }

    pub fn apply_env_vars(&mut self) {
        if let Ok(level) = env::var("ENTITYIT_LOG_LEVEL") {
            self.level = level;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !LEVELS.contains(&self.level.to_ascii_lowercase().as_str()) {
            bail!("unknown log level {}, expected one of {}", self.level, LEVELS.join(", "));
        }
        Ok(())
    }
}
