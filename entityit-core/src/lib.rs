//! EntityIt - Core
//!
//! Derives a persistence-facing "entity" struct from an annotated domain
//! struct, together with the conversions between the two.
//!
//! # Overview
//!
//! Annotate a domain struct, then run the generator (`entityit generate`)
//! over the crate's sources:
//!
//! ```rust,ignore
//! use entityit_macros::Entity;
//!
//! #[derive(Entity)]
//! #[entity(serializable = false)]
//! pub struct SampleClass {
//!     #[entity(not_null)]
//!     id: Option<String>,
//!     flag: bool,
//!     #[entity(rename = "iAmDouble", map_with = SampleMapper)]
//!     long: i64,
//! }
//!
//! // generated: entity::SampleClassEntity, entity::SampleClassMappers
//! pub mod entity;
//! ```
//!
//! # Architecture
//!
//! - [`classify`] - type classification and default literals
//! - [`resolver`] - per-field plans (name, type, nullability, conversion)
//! - [`planner`] - per-declaration entity plans
//! - [`registry`] - mapper registry plans
//! - [`emission`] - abstract emission instructions
//! - [`inspector`] - declaration metadata from Rust sources
//! - [`render`] - Rust source rendering and output
//! - [`processor`] - batch driver
//! - [`runtime`] - traits and errors used by generated code

pub mod classify;
pub mod config;
pub mod declaration;
pub mod emission;
pub mod inspector;
pub mod logging;
pub mod naming;
pub mod planner;
pub mod processor;
pub mod registry;
pub mod render;
pub mod resolver;
pub mod runtime;
pub mod types;

pub use inspector::InspectError;
pub use processor::{Diagnostic, EntityProcessor, ProcessReport};
pub use render::RenderError;

use types::{QualifiedName, TypeRef};

/// Generation error type
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(
        "field [{declaration}.{field}] has type [{ty}], which must be annotated as a nested entity, \
         given a custom mapper, or be a primitive"
    )]
    IneligibleFieldType { declaration: QualifiedName, field: String, ty: TypeRef },
    #[error("mapper [{mapper}] maps to [{ty}], which is neither a primitive nor a nested entity")]
    IneligibleMapperTarget { mapper: QualifiedName, ty: TypeRef },
    #[error("mapper [{mapper}] does not implement {base}<Domain, Entity>")]
    MapperBaseNotFound { mapper: QualifiedName, base: String },
    #[error(transparent)]
    Inspect(#[from] InspectError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::EntityItConfig;
    pub use crate::inspector::{DeclarationInspector, SourceInspector};
    pub use crate::processor::{EntityProcessor, ProcessReport};
    pub use crate::render::{FsRenderer, MemoryRenderer, Renderer};
    pub use crate::runtime::{ConversionError, EntityDeclaration, EntityMapper, ToDomain, ToEntity};
    pub use crate::{Error, Result};
}
