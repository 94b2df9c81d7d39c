//! Field resolution: annotations, classification and class policy combined into a [`FieldPlan`].

use crate::classify::{classify, fallback_for, Fallback, TypeClass};
use crate::declaration::{ClassPolicy, FieldDeclaration, NullabilityMode, Supertype};
use crate::inspector::DeclarationInspector;
use crate::naming;
use crate::types::{QualifiedName, TypeRef};
use crate::{Error, Result};

/// A custom mapper with its two type parameters in declared order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapperRef {
    pub identity: QualifiedName,
    pub domain: TypeRef,
    pub entity: TypeRef,
}

impl MapperRef {
    /// Registry key: the identity with separators removed.
    pub fn key(&self) -> String {
        naming::mapper_key(&self.identity)
    }
}

/// How a field moves between the domain and the entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionKind {
    /// Passthrough.
    Direct,
    /// Through a custom mapper.
    CustomMapper(MapperRef),
    /// Through the nested declaration's own generated conversions.
    NestedEntity { entity: QualifiedName },
}

/// What happens when an absent value must become a present one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collapse {
    Fallback(Fallback),
    /// No default exists: the conversion fails at runtime when the value is absent.
    Assert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    ToEntity,
    ToDomain,
}

/// Nullability adjustment around a field's conversion step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lift {
    /// Both sides non-null.
    Plain,
    /// Both sides nullable: the step runs inside the `Option`.
    Map,
    /// Present source, nullable target.
    Wrap,
    /// Nullable source, non-null target.
    Collapse(Collapse),
}

/// Resolved generation decision for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPlan {
    pub declared_name: String,
    pub emitted_name: String,
    /// Declared type, `nullable` as declared.
    pub declared_type: TypeRef,
    /// Emitted type, `nullable` as decided by the nullability policy.
    pub emitted_type: TypeRef,
    pub conversion: ConversionKind,
    /// Only set when exactly one direction turns an absent value into a present one.
    pub collapse: Option<Collapse>,
}

impl FieldPlan {
    pub fn is_emitted_nullable(&self) -> bool {
        self.emitted_type.nullable
    }

    pub fn is_declared_nullable(&self) -> bool {
        self.declared_type.nullable
    }

    pub fn mapper(&self) -> Option<&MapperRef> {
        match &self.conversion {
            ConversionKind::CustomMapper(mapper) => Some(mapper),
            _ => None,
        }
    }

    /// Default value used by the collapsing direction, if a table entry exists.
    pub fn fallback(&self) -> Option<Fallback> {
        match self.collapse {
            Some(Collapse::Fallback(fallback)) => Some(fallback),
            _ => None,
        }
    }

    pub fn lift(&self, direction: Direction) -> Lift {
        let (source, target) = match direction {
            Direction::ToEntity => (self.is_declared_nullable(), self.is_emitted_nullable()),
            Direction::ToDomain => (self.is_emitted_nullable(), self.is_declared_nullable()),
        };
        match (source, target) {
            (false, false) => Lift::Plain,
            (true, true) => Lift::Map,
            (false, true) => Lift::Wrap,
            (true, false) => Lift::Collapse(self.collapse.unwrap_or(Collapse::Assert)),
        }
    }
}

/// Emitted nullability from the class mode and the field flags.
pub fn emitted_nullable(mode: NullabilityMode, not_null: bool, declared_nullable: bool) -> bool {
    match mode {
        NullabilityMode::None => false,
        NullabilityMode::Full => !not_null,
        NullabilityMode::Transient => declared_nullable && !not_null,
    }
}

/// Resolves fields against an inspector; `mapper_trait` names the generic mapper base.
pub struct FieldResolver<'a, I: ?Sized> {
    inspector: &'a I,
    mapper_trait: &'a str,
}

impl<'a, I> FieldResolver<'a, I>
where
    I: DeclarationInspector + ?Sized,
{
    pub fn new(inspector: &'a I, mapper_trait: &'a str) -> Self {
        Self { inspector, mapper_trait }
    }

    pub fn resolve(
        &self,
        declaration: &QualifiedName,
        field: &FieldDeclaration,
        policy: &ClassPolicy,
    ) -> Result<FieldPlan> {
        let emitted_name =
            field.annotations.rename.clone().unwrap_or_else(|| field.name.clone());
        let is_entity = |name: &QualifiedName| self.inspector.is_entity(name);
        let declared_class = classify(&field.ty.non_null(), is_entity);

        let (core_type, emitted_class, conversion) = match &field.annotations.map_with {
            Some(identity) => {
                let mapper = self.resolve_mapper(identity)?;
                let target_class = classify(&mapper.entity, is_entity);
                if !target_class.is_mapper_target() {
                    return Err(Error::IneligibleMapperTarget {
                        mapper: mapper.identity,
                        ty: mapper.entity,
                    });
                }
                (mapper.entity.clone(), target_class, ConversionKind::CustomMapper(mapper))
            }
            None => match declared_class {
                TypeClass::Ineligible => {
                    return Err(Error::IneligibleFieldType {
                        declaration: declaration.clone(),
                        field: field.name.clone(),
                        ty: field.ty.clone(),
                    });
                }
                TypeClass::NestedEntity => {
                    let entity = field
                        .ty
                        .qualified_name()
                        .map(naming::entity_name)
                        .unwrap_or_default();
                    (
                        TypeRef::path(entity.clone(), Vec::new()),
                        declared_class,
                        ConversionKind::NestedEntity { entity },
                    )
                }
                _ => (field.ty.non_null(), declared_class, ConversionKind::Direct),
            },
        };

        let declared_nullable = field.is_declared_nullable();
        let nullable =
            emitted_nullable(policy.nullability, field.annotations.not_null, declared_nullable);
        // Defaults always come from the entity side: forward collapses fill the
        // emitted value, backward collapses fill the entity value before the step.
        let collapse = (declared_nullable != nullable).then(|| collapse_for(emitted_class));

        let plan = FieldPlan {
            declared_name: field.name.clone(),
            emitted_name,
            declared_type: field.ty.clone(),
            emitted_type: core_type.with_nullable(nullable),
            conversion,
            collapse,
        };
        log::debug!(
            "{}.{} -> {}: {} ({:?})",
            declaration,
            plan.declared_name,
            plan.emitted_name,
            plan.emitted_type,
            plan.conversion
        );
        Ok(plan)
    }

    fn resolve_mapper(&self, identity: &QualifiedName) -> Result<MapperRef> {
        let supertypes = self.inspector.mapper_supertypes(identity)?;
        let base = find_mapper_base(&supertypes, self.mapper_trait).ok_or_else(|| {
            Error::MapperBaseNotFound { mapper: identity.clone(), base: self.mapper_trait.to_string() }
        })?;
        match base.arguments.as_slice() {
            [domain, entity] => {
                if entity.nullable {
                    return Err(Error::IneligibleMapperTarget {
                        mapper: identity.clone(),
                        ty: entity.clone(),
                    });
                }
                Ok(MapperRef { identity: identity.clone(), domain: domain.clone(), entity: entity.clone() })
            }
            _ => Err(Error::MapperBaseNotFound {
                mapper: identity.clone(),
                base: self.mapper_trait.to_string(),
            }),
        }
    }
}

fn find_mapper_base<'s>(supertypes: &'s [Supertype], mapper_trait: &str) -> Option<&'s Supertype> {
    supertypes
        .iter()
        .find(|supertype| supertype.name.simple_name() == mapper_trait && supertype.arguments.len() == 2)
}

fn collapse_for(class: TypeClass) -> Collapse {
    fallback_for(class).map_or(Collapse::Assert, Collapse::Fallback)
}
