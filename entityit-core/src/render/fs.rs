//! File-system renderer: writes generated modules below an output directory.

use super::rust::render_file;
use super::{RenderError, Renderer};
use crate::emission::{EmissionInstructions, FileSpec};
use crate::naming::GENERATED_MARKER;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Path of a generated file relative to the output directory.
///
/// `crate::sample::entity` + `sample_class_entity` -> `sample/entity/sample_class_entity.rs`
pub fn relative_path(file: &FileSpec) -> PathBuf {
    let mut path = package_dir(file.package.segments());
    path.push(format!("{}.rs", file.name));
    path
}

fn package_dir(segments: &[String]) -> PathBuf {
    segments.iter().skip_while(|segment| segment.as_str() == "crate").collect()
}

/// Writes rendered files, then module indexes and an optional `rustfmt` pass on [`finish`](Renderer::finish).
pub struct FsRenderer {
    out_dir: PathBuf,
    module_index: bool,
    rustfmt: bool,
    written: Vec<PathBuf>,
    /// package dir -> module -> exported type names
    modules: BTreeMap<PathBuf, BTreeMap<String, BTreeSet<String>>>,
}

impl FsRenderer {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            module_index: true,
            rustfmt: false,
            written: Vec::new(),
            modules: BTreeMap::new(),
        }
    }

    pub fn with_module_index(mut self, enabled: bool) -> Self {
        self.module_index = enabled;
        self
    }

    pub fn with_rustfmt(mut self, enabled: bool) -> Self {
        self.rustfmt = enabled;
        self
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Files written so far, module indexes included.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn write(&mut self, path: PathBuf, content: &str) -> Result<(), RenderError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|source| RenderError::Io { path: parent.to_path_buf(), source })?;
        }
        fs::write(&path, content).map_err(|source| RenderError::Io { path: path.clone(), source })?;
        log::info!("Generated {}", path.display());
        self.written.push(path);
        Ok(())
    }

    fn write_indexes(&mut self) -> Result<(), RenderError> {
        let modules = std::mem::take(&mut self.modules);
        for (dir, entries) in modules {
            let mut index = format!("// {GENERATED_MARKER}. Do not edit.\n\n");
            for module in entries.keys() {
                index.push_str(&format!("pub mod {module};\n"));
            }
            index.push('\n');
            for (module, types) in &entries {
                for ty in types {
                    index.push_str(&format!("pub use {module}::{ty};\n"));
                }
            }
            self.write(self.out_dir.join(dir).join("mod.rs"), &index)?;
        }
        Ok(())
    }

    fn format(&self) -> Result<(), RenderError> {
        if self.written.is_empty() {
            return Ok(());
        }
        let output = Command::new("rustfmt")
            .arg("--edition")
            .arg("2021")
            .args(&self.written)
            .output()
            .map_err(|err| RenderError::Rustfmt(err.to_string()))?;
        if !output.status.success() {
            return Err(RenderError::Rustfmt(String::from_utf8_lossy(&output.stderr).trim().to_string()));
        }
        log::debug!("Formatted {} generated files", self.written.len());
        Ok(())
    }

    fn register(&mut self, file: &FileSpec) {
        let dir = package_dir(file.package.segments());
        self.modules
            .entry(dir)
            .or_default()
            .entry(file.name.clone())
            .or_default()
            .extend(file.type_names().map(str::to_string));
    }

    /// Remove files written since `mark`.
    fn roll_back(&mut self, mark: usize) {
        for path in self.written.drain(mark..) {
            if let Err(err) = fs::remove_file(&path) {
                log::warn!("Failed to remove {}: {}", path.display(), err);
            }
        }
    }
}

impl Renderer for FsRenderer {
    fn emit_file(&mut self, file: &FileSpec) -> Result<(), RenderError> {
        let source = render_file(file)?;
        self.write(self.out_dir.join(relative_path(file)), &source)?;
        self.register(file);
        Ok(())
    }

    fn emit(&mut self, instructions: &EmissionInstructions) -> Result<(), RenderError> {
        let rendered = instructions
            .files
            .iter()
            .map(|file| Ok((self.out_dir.join(relative_path(file)), render_file(file)?)))
            .collect::<Result<Vec<_>, RenderError>>()?;

        let mark = self.written.len();
        for (path, source) in rendered {
            if let Err(err) = self.write(path, &source) {
                self.roll_back(mark);
                return Err(err);
            }
        }
        for file in &instructions.files {
            self.register(file);
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), RenderError> {
        if self.module_index {
            self.write_indexes()?;
        } else {
            self.modules.clear();
        }
        if self.rustfmt {
            self.format()?;
        }
        Ok(())
    }
}
