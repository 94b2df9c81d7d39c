//! Output settings

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Source tree to inspect.
    pub src_dir: PathBuf,
    /// Root generated modules are written under, usually the same as `src_dir`.
    pub out_dir: PathBuf,
    /// Write a `mod.rs` per generated package.
    pub module_index: bool,
    /// Run `rustfmt` over generated files.
    pub rustfmt: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            src_dir: PathBuf::from("src"),
            out_dir: PathBuf::from("src"),
            module_index: true,
            rustfmt: false,
        }
    }
}

impl OutputConfig {
    pub fn merge(&mut self, other: Self) {
        *self = other;
    }

    pub fn apply_env_vars(&mut self) {
        if let Ok(dir) = env::var("ENTITYIT_SRC_DIR") {
            self.src_dir = PathBuf::from(dir);
        }
        if let Ok(dir) = env::var("ENTITYIT_OUT_DIR") {
            self.out_dir = PathBuf::from(dir);
        }
        if let Ok(value) = env::var("ENTITYIT_RUSTFMT") {
            self.rustfmt = matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on");
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.src_dir.as_os_str().is_empty() {
            bail!("output.src_dir cannot be empty");
        }
        if self.out_dir.as_os_str().is_empty() {
            bail!("output.out_dir cannot be empty");
        }
        Ok(())
    }
}
