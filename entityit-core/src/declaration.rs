//! Declaration metadata as delivered by a [`DeclarationInspector`](crate::inspector::DeclarationInspector).
//!
//! Everything here is an immutable input to the planners: the inspector builds
//! it once per pass and the core never mutates it.

use crate::types::{QualifiedName, TypeRef};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Visibility of a declaration as seen by generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Public,
    /// Anything narrower than `pub`.
    Restricted,
}

/// How declared nullability propagates to the emitted entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NullabilityMode {
    /// Every emitted property is non-null.
    None,
    /// Emitted properties copy the declared nullability.
    #[default]
    Transient,
    /// Every emitted property is nullable unless forced non-null.
    Full,
}

impl NullabilityMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "none" => Some(Self::None),
            "transient" => Some(Self::Transient),
            "full" => Some(Self::Full),
            _ => None,
        }
    }
}

impl fmt::Display for NullabilityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::Transient => f.write_str("transient"),
            Self::Full => f.write_str("full"),
        }
    }
}

/// Raw values of the class-level `#[entity(..)]` marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityAnnotation {
    pub serializable: bool,
    pub nullability: NullabilityMode,
    pub conversions: bool,
}

impl Default for EntityAnnotation {
    fn default() -> Self {
        Self { serializable: true, nullability: NullabilityMode::Transient, conversions: true }
    }
}

/// Field-level markers: `rename`, `map_with`, `not_null`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldAnnotations {
    pub rename: Option<String>,
    pub map_with: Option<QualifiedName>,
    pub not_null: bool,
}

/// One field of a declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDeclaration {
    pub name: String,
    /// Declared type; `ty.nullable` is the declared nullability.
    pub ty: TypeRef,
    pub annotations: FieldAnnotations,
}

impl FieldDeclaration {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self { name: name.into(), ty, annotations: FieldAnnotations::default() }
    }

    pub fn renamed(mut self, name: impl Into<String>) -> Self {
        self.annotations.rename = Some(name.into());
        self
    }

    pub fn mapped_with(mut self, mapper: QualifiedName) -> Self {
        self.annotations.map_with = Some(mapper);
        self
    }

    pub fn not_null(mut self) -> Self {
        self.annotations.not_null = true;
        self
    }

    pub fn is_declared_nullable(&self) -> bool {
        self.ty.nullable
    }
}

/// An annotated domain type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: QualifiedName,
    pub visibility: Visibility,
    pub annotation: EntityAnnotation,
    pub fields: Vec<FieldDeclaration>,
}

impl Declaration {
    pub fn package(&self) -> QualifiedName {
        self.name.package()
    }

    pub fn simple_name(&self) -> &str {
        self.name.simple_name()
    }
}

/// Resolved class-level settings, populated once per declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassPolicy {
    pub serializable: bool,
    pub nullability: NullabilityMode,
    pub generate_conversions: bool,
    pub visibility_restricted: bool,
}

impl ClassPolicy {
    pub fn from_declaration(declaration: &Declaration) -> Self {
        let annotation = &declaration.annotation;
        Self {
            serializable: annotation.serializable,
            nullability: annotation.nullability,
            generate_conversions: annotation.conversions,
            visibility_restricted: declaration.visibility == Visibility::Restricted,
        }
    }

    pub fn visibility(&self) -> Visibility {
        if self.visibility_restricted {
            Visibility::Restricted
        } else {
            Visibility::Public
        }
    }
}

/// A supertype (implemented trait) of a declaration with its generic arguments in declared order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Supertype {
    pub name: QualifiedName,
    pub arguments: Vec<TypeRef>,
}
