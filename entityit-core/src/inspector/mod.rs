//! Declaration inspection: the host side that resolves symbols and annotations.
//!
//! The core only consumes [`DeclarationInspector`]. [`SourceInspector`] is the
//! implementation over a crate's source tree; tests use small in-memory ones.

pub mod attributes;
pub mod source;

pub use source::SourceInspector;

use crate::declaration::{Declaration, Supertype};
use crate::types::QualifiedName;
use std::path::PathBuf;

/// Read-only, synchronous queries over already-loaded symbol metadata.
pub trait DeclarationInspector {
    /// Names of every annotated declaration of this pass, in discovery order.
    fn declarations(&self) -> Vec<QualifiedName>;

    /// Fields, field types and annotation values of one declaration.
    ///
    /// Failing here only affects that declaration.
    fn resolve_declaration(&self, name: &QualifiedName) -> Result<Declaration, InspectError>;

    /// Whether `name` is itself an annotated declaration.
    fn is_entity(&self, name: &QualifiedName) -> bool;

    /// Supertypes of a mapper type with their generic arguments in declared order.
    fn mapper_supertypes(&self, mapper: &QualifiedName) -> Result<Vec<Supertype>, InspectError>;
}

/// Inspector error type
#[derive(thiserror::Error, Debug)]
pub enum InspectError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("invalid entity annotation on [{target}]: {message}")]
    InvalidAnnotation { target: String, message: String },
    #[error("[{name}] cannot be processed: {reason}")]
    UnsupportedDeclaration { name: QualifiedName, reason: String },
    #[error("mapper [{0}] is not declared in the inspected sources")]
    UnknownMapper(QualifiedName),
    #[error(transparent)]
    Walk(#[from] walkdir::Error),
}
