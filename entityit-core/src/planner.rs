//! Entity planning: a declaration and its field plans folded into one [`EntityPlan`].

use crate::declaration::{ClassPolicy, Declaration};
use crate::naming;
use crate::resolver::{ConversionKind, Direction, FieldPlan, Lift, MapperRef};
use crate::types::{QualifiedName, TypeRef};

/// One constructor parameter of the entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterPlan {
    pub name: String,
    pub ty: TypeRef,
    /// Emitted-nullable parameters default to `None`.
    pub defaults_to_none: bool,
}

/// One stored property of the entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyPlan {
    pub name: String,
    pub ty: TypeRef,
}

/// The core of a conversion statement, applied to non-optional values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionStep {
    Direct,
    /// Call the mapper held by `registry` under `accessor`.
    Mapper { registry: QualifiedName, accessor: String, mapper: MapperRef },
    /// Call the nested declaration's generated conversion.
    Nested { entity: QualifiedName },
}

/// `target = lift(step(source))` inside one conversion function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionStatement {
    pub target: String,
    pub source: String,
    pub step: ConversionStep,
    pub lift: Lift,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionFunction {
    pub direction: Direction,
    pub statements: Vec<ConversionStatement>,
}

/// Both conversion functions; they are always planned together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionPlan {
    pub to_entity: ConversionFunction,
    pub to_domain: ConversionFunction,
}

/// Everything needed to emit the entity of one declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityPlan {
    pub domain: QualifiedName,
    pub entity: QualifiedName,
    pub registry: QualifiedName,
    pub policy: ClassPolicy,
    pub fields: Vec<FieldPlan>,
    pub constructor: Vec<ParameterPlan>,
    pub properties: Vec<PropertyPlan>,
    pub conversions: Option<ConversionPlan>,
}

impl EntityPlan {
    pub fn plan(declaration: &Declaration, policy: ClassPolicy, fields: Vec<FieldPlan>) -> Self {
        let registry = naming::registry_name(&declaration.name);
        let planned = fields
            .iter()
            .fold(Accumulator::new(registry.clone(), policy.generate_conversions), Accumulator::append);

        Self {
            domain: declaration.name.clone(),
            entity: naming::entity_name(&declaration.name),
            registry,
            policy,
            fields,
            constructor: planned.constructor,
            properties: planned.properties,
            conversions: planned.conversions.map(|(to_entity, to_domain)| ConversionPlan {
                to_entity: ConversionFunction { direction: Direction::ToEntity, statements: to_entity },
                to_domain: ConversionFunction { direction: Direction::ToDomain, statements: to_domain },
            }),
        }
    }

    /// Module holding the generated items.
    pub fn package(&self) -> QualifiedName {
        self.entity.package()
    }

    pub fn entity_name(&self) -> &str {
        self.entity.simple_name()
    }

    /// Field plans whose mapper must be registered. Empty when conversions are off.
    pub fn registry_requirements(&self) -> impl Iterator<Item = &FieldPlan> {
        let enabled = self.conversions.is_some();
        self.fields.iter().filter(move |field| enabled && field.mapper().is_some())
    }
}

struct Accumulator {
    registry: QualifiedName,
    constructor: Vec<ParameterPlan>,
    properties: Vec<PropertyPlan>,
    conversions: Option<(Vec<ConversionStatement>, Vec<ConversionStatement>)>,
}

impl Accumulator {
    fn new(registry: QualifiedName, conversions: bool) -> Self {
        Self {
            registry,
            constructor: Vec::new(),
            properties: Vec::new(),
            conversions: conversions.then(|| (Vec::new(), Vec::new())),
        }
    }

    fn append(mut self, field: &FieldPlan) -> Self {
        self.constructor.push(ParameterPlan {
            name: field.emitted_name.clone(),
            ty: field.emitted_type.clone(),
            defaults_to_none: field.is_emitted_nullable(),
        });
        self.properties.push(PropertyPlan {
            name: field.emitted_name.clone(),
            ty: field.emitted_type.clone(),
        });

        let forward_step = self.step(field, Direction::ToEntity);
        let backward_step = self.step(field, Direction::ToDomain);
        if let Some((to_entity, to_domain)) = self.conversions.as_mut() {
            to_entity.push(ConversionStatement {
                target: field.emitted_name.clone(),
                source: field.declared_name.clone(),
                step: forward_step,
                lift: field.lift(Direction::ToEntity),
            });
            to_domain.push(ConversionStatement {
                target: field.declared_name.clone(),
                source: field.emitted_name.clone(),
                step: backward_step,
                lift: field.lift(Direction::ToDomain),
            });
        }
        self
    }

    fn step(&self, field: &FieldPlan, direction: Direction) -> ConversionStep {
        match &field.conversion {
            ConversionKind::Direct => ConversionStep::Direct,
            ConversionKind::CustomMapper(mapper) => ConversionStep::Mapper {
                registry: self.registry.clone(),
                accessor: mapper.key(),
                mapper: mapper.clone(),
            },
            ConversionKind::NestedEntity { entity } => match direction {
                Direction::ToEntity => ConversionStep::Nested { entity: entity.clone() },
                Direction::ToDomain => ConversionStep::Nested {
                    entity: field.declared_type.qualified_name().cloned().unwrap_or_default(),
                },
            },
        }
    }
}
