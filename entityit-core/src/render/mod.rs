//! Renderers: emission instructions to generated source artifacts.

pub mod fs;
pub mod rust;

pub use fs::FsRenderer;

use crate::emission::{EmissionInstructions, FileSpec};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Writes one generated artifact per [`FileSpec`].
pub trait Renderer {
    fn emit_file(&mut self, file: &FileSpec) -> Result<(), RenderError>;

    /// Called once after the last file of a batch.
    fn finish(&mut self) -> Result<(), RenderError> {
        Ok(())
    }

    /// Emit every file of one declaration.
    ///
    /// The provided renderers leave no trace of the declaration when this fails.
    fn emit(&mut self, instructions: &EmissionInstructions) -> Result<(), RenderError> {
        for file in &instructions.files {
            self.emit_file(file)?;
        }
        Ok(())
    }
}

/// Renderer error type
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("`{0}` is not a valid Rust identifier")]
    InvalidIdentifier(String),
    #[error("`{path}` is not a valid Rust path or type: {message}")]
    InvalidPath { path: String, message: String },
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("generated module `{file}` is not valid Rust: {message}")]
    Syntax { file: String, message: String },
    #[error("rustfmt failed: {0}")]
    Rustfmt(String),
}

/// Keeps rendered sources in memory, keyed by their path relative to the output directory.
#[derive(Debug, Default)]
pub struct MemoryRenderer {
    files: BTreeMap<PathBuf, String>,
}

impl MemoryRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> &BTreeMap<PathBuf, String> {
        &self.files
    }

    pub fn get(&self, path: impl Into<PathBuf>) -> Option<&str> {
        self.files.get(&path.into()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl Renderer for MemoryRenderer {
    fn emit_file(&mut self, file: &FileSpec) -> Result<(), RenderError> {
        let source = rust::render_file(file)?;
        self.files.insert(fs::relative_path(file), source);
        Ok(())
    }

    fn emit(&mut self, instructions: &EmissionInstructions) -> Result<(), RenderError> {
        let rendered = instructions
            .files
            .iter()
            .map(|file| Ok((fs::relative_path(file), rust::render_file(file)?)))
            .collect::<Result<Vec<_>, RenderError>>()?;
        self.files.extend(rendered);
        Ok(())
    }
}
