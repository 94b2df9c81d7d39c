//! Code generation settings

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Simple name of the generic mapper base looked up on mapper supertypes.
    pub mapper_trait: String,
    /// Module generated code imports runtime items from.
    pub runtime_path: String,
    /// Derives on every entity.
    pub entity_derives: Vec<String>,
    /// Derives added to serializable entities.
    pub serialization_derives: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            mapper_trait: "EntityMapper".to_string(),
            runtime_path: "::entityit_core::runtime".to_string(),
            entity_derives: vec!["Debug".to_string(), "Clone".to_string(), "PartialEq".to_string()],
            serialization_derives: vec![
                "::serde::Serialize".to_string(),
                "::serde::Deserialize".to_string(),
            ],
        }
    }
}

impl GeneratorConfig {
    pub fn merge(&mut self, other: Self) {
        *self = other;
    }

    pub fn apply_env_vars(&mut self) {
        if let Ok(path) = env::var("ENTITYIT_RUNTIME_PATH") {
            self.runtime_path = path;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.mapper_trait.trim().is_empty() {
            bail!("generator.mapper_trait cannot be empty");
        }
        if self.mapper_trait.contains("::") {
            bail!("generator.mapper_trait must be a simple name, got {}", self.mapper_trait);
        }
        if self.runtime_path.trim().is_empty() {
            bail!("generator.runtime_path cannot be empty");
        }
        if syn::parse_str::<syn::Path>(&self.runtime_path).is_err() {
            bail!("generator.runtime_path is not a Rust path: {}", self.runtime_path);
        }
        for derive in self.entity_derives.iter().chain(&self.serialization_derives) {
            if syn::parse_str::<syn::Path>(derive).is_err() {
                bail!("invalid derive path: {}", derive);
            }
        }
        Ok(())
    }
}
