//! Emission planning: an [`EntityPlan`] and its registry assembled into files and items.
//!
//! Every decision is already made upstream; this only arranges structure,
//! visibility and markers for the renderer.

use crate::config::GeneratorConfig;
use crate::declaration::Visibility;
use crate::naming;
use crate::planner::{ConversionFunction, EntityPlan};
use crate::registry::MapperRegistryPlan;
use crate::resolver::Direction;
use crate::types::{QualifiedName, TypeRef};

/// Fully qualified runtime items referenced by generated code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimePaths {
    pub mapper_trait: String,
    pub to_entity: String,
    pub to_domain: String,
    pub conversion_error: String,
}

impl RuntimePaths {
    pub fn new(runtime_path: &str, mapper_trait: &str) -> Self {
        let runtime = runtime_path.trim_end_matches("::");
        Self {
            mapper_trait: format!("{runtime}::{mapper_trait}"),
            to_entity: format!("{runtime}::ToEntity"),
            to_domain: format!("{runtime}::ToDomain"),
            conversion_error: format!("{runtime}::ConversionError"),
        }
    }
}

/// Output of the emission planner: one entry per generated file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EmissionInstructions {
    pub files: Vec<FileSpec>,
}

impl EmissionInstructions {
    pub fn file(&self, name: &str) -> Option<&FileSpec> {
        self.files.iter().find(|file| file.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSpec {
    pub package: QualifiedName,
    /// File stem, also the module name.
    pub name: String,
    pub header: String,
    pub runtime: RuntimePaths,
    pub items: Vec<ItemSpec>,
}

impl FileSpec {
    /// Public type names declared by this file.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.items.iter().filter_map(|item| match item {
            ItemSpec::Struct(spec) => Some(spec.name.as_str()),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemSpec {
    Struct(StructSpec),
    Impl(ImplSpec),
    TraitImpl(TraitImplSpec),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructSpec {
    pub name: String,
    pub visibility: Visibility,
    pub derives: Vec<String>,
    /// Empty for a unit struct.
    pub fields: Vec<StructField>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructField {
    pub name: String,
    pub ty: TypeRef,
    pub visibility: Visibility,
    /// `#[serde(default)]`, set for nullable fields of serializable entities.
    pub serde_default: bool,
}

/// Inherent `impl` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImplSpec {
    pub self_ty: QualifiedName,
    pub functions: Vec<FunctionSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraitImplSpec {
    pub trait_path: String,
    pub self_ty: QualifiedName,
    /// `type <name> = <ty>;`
    pub associated_types: Vec<(String, QualifiedName)>,
    pub functions: Vec<FunctionSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSpec {
    pub name: String,
    /// `None` inside trait impls.
    pub visibility: Option<Visibility>,
    pub receiver: bool,
    pub params: Vec<(String, TypeRef)>,
    pub returns: ReturnSpec,
    pub body: BodySpec,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnSpec {
    SelfType,
    /// `Result<T, ConversionError>`
    Conversion(QualifiedName),
    /// `&'static T`
    StaticRef(QualifiedName),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodySpec {
    /// `Self { a, b, .. }`
    Constructor { fields: Vec<String> },
    /// `Ok(Target { .. })` built from `self`.
    Conversion { target: QualifiedName, source: QualifiedName, function: ConversionFunction },
    /// Lazily initialised shared mapper instance.
    MapperInstance { mapper: QualifiedName },
    /// `Self::<method>(self)`
    Delegate { method: String },
}

/// Builds [`EmissionInstructions`] under the generator settings.
pub struct EmissionPlanner<'a> {
    config: &'a GeneratorConfig,
    runtime: RuntimePaths,
}

impl<'a> EmissionPlanner<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { runtime: RuntimePaths::new(&config.runtime_path, &config.mapper_trait), config }
    }

    pub fn emit(&self, plan: &EntityPlan, registry: &MapperRegistryPlan) -> EmissionInstructions {
        let mut files = vec![self.entity_file(plan)];
        if plan.conversions.is_some() && !registry.is_empty() {
            files.push(self.registry_file(plan, registry));
        }
        EmissionInstructions { files }
    }

    fn header(&self, plan: &EntityPlan) -> String {
        format!("{} from {}. Do not edit.", naming::GENERATED_MARKER, plan.domain)
    }

    fn entity_file(&self, plan: &EntityPlan) -> FileSpec {
        let visibility = plan.policy.visibility();
        let serializable = plan.policy.serializable;

        let mut derives = self.config.entity_derives.clone();
        if serializable {
            derives.extend(self.config.serialization_derives.iter().cloned());
        }
        let fields = plan
            .properties
            .iter()
            .map(|property| StructField {
                name: property.name.clone(),
                ty: property.ty.clone(),
                visibility,
                serde_default: serializable && property.ty.nullable,
            })
            .collect();

        let mut entity_functions = vec![FunctionSpec {
            name: "new".to_string(),
            visibility: Some(visibility),
            receiver: false,
            params: plan.constructor.iter().map(|param| (param.name.clone(), param.ty.clone())).collect(),
            returns: ReturnSpec::SelfType,
            body: BodySpec::Constructor {
                fields: plan.constructor.iter().map(|param| param.name.clone()).collect(),
            },
        }];

        let mut items = Vec::new();
        let mut conversion_items = Vec::new();
        if let Some(conversions) = &plan.conversions {
            entity_functions.push(self.conversion_function(plan, &conversions.to_domain, visibility));
            conversion_items.push(ItemSpec::Impl(ImplSpec {
                self_ty: plan.domain.clone(),
                functions: vec![self.conversion_function(plan, &conversions.to_entity, visibility)],
            }));
            conversion_items.push(self.delegating_impl(plan, Direction::ToEntity));
            conversion_items.push(self.delegating_impl(plan, Direction::ToDomain));
        }

        items.push(ItemSpec::Struct(StructSpec {
            name: plan.entity_name().to_string(),
            visibility,
            derives,
            fields,
        }));
        items.push(ItemSpec::Impl(ImplSpec { self_ty: plan.entity.clone(), functions: entity_functions }));
        items.extend(conversion_items);

        FileSpec {
            package: plan.package(),
            name: naming::module_file_name(plan.entity_name()),
            header: self.header(plan),
            runtime: self.runtime.clone(),
            items,
        }
    }

    fn conversion_function(
        &self,
        plan: &EntityPlan,
        function: &ConversionFunction,
        visibility: Visibility,
    ) -> FunctionSpec {
        let (name, source, target) = match function.direction {
            Direction::ToEntity => ("to_entity", &plan.domain, &plan.entity),
            Direction::ToDomain => ("to_domain", &plan.entity, &plan.domain),
        };
        FunctionSpec {
            name: name.to_string(),
            visibility: Some(visibility),
            receiver: true,
            params: Vec::new(),
            returns: ReturnSpec::Conversion(target.clone()),
            body: BodySpec::Conversion {
                target: target.clone(),
                source: source.clone(),
                function: function.clone(),
            },
        }
    }

    fn delegating_impl(&self, plan: &EntityPlan, direction: Direction) -> ItemSpec {
        let (trait_path, self_ty, associated, target, method) = match direction {
            Direction::ToEntity => (&self.runtime.to_entity, &plan.domain, "Entity", &plan.entity, "to_entity"),
            Direction::ToDomain => (&self.runtime.to_domain, &plan.entity, "Domain", &plan.domain, "to_domain"),
        };
        ItemSpec::TraitImpl(TraitImplSpec {
            trait_path: trait_path.clone(),
            self_ty: self_ty.clone(),
            associated_types: vec![(associated.to_string(), target.clone())],
            functions: vec![FunctionSpec {
                name: method.to_string(),
                visibility: None,
                receiver: true,
                params: Vec::new(),
                returns: ReturnSpec::Conversion(target.clone()),
                body: BodySpec::Delegate { method: method.to_string() },
            }],
        })
    }

    fn registry_file(&self, plan: &EntityPlan, registry: &MapperRegistryPlan) -> FileSpec {
        let visibility = plan.policy.visibility();
        let functions = registry
            .entries()
            .map(|(key, mapper)| FunctionSpec {
                name: key.to_string(),
                visibility: Some(visibility),
                receiver: false,
                params: Vec::new(),
                returns: ReturnSpec::StaticRef(mapper.identity.clone()),
                body: BodySpec::MapperInstance { mapper: mapper.identity.clone() },
            })
            .collect();

        FileSpec {
            package: registry.name.package(),
            name: naming::module_file_name(registry.name.simple_name()),
            header: self.header(plan),
            runtime: self.runtime.clone(),
            items: vec![
                ItemSpec::Struct(StructSpec {
                    name: registry.name.simple_name().to_string(),
                    visibility,
                    derives: vec!["Debug".to_string(), "Clone".to_string(), "Copy".to_string()],
                    fields: Vec::new(),
                }),
                ItemSpec::Impl(ImplSpec { self_ty: registry.name.clone(), functions }),
            ],
        }
    }
}
