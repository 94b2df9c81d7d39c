//! Batch processing: every discovered declaration planned and emitted independently.

use crate::config::GeneratorConfig;
use crate::declaration::ClassPolicy;
use crate::emission::{EmissionInstructions, EmissionPlanner};
use crate::inspector::DeclarationInspector;
use crate::planner::EntityPlan;
use crate::registry::MapperRegistryPlan;
use crate::render::Renderer;
use crate::resolver::FieldResolver;
use crate::types::QualifiedName;
use crate::{Error, Result};
use std::fmt;

/// A declaration that failed; nothing was emitted for it.
#[derive(Debug)]
pub struct Diagnostic {
    pub declaration: QualifiedName,
    pub error: Error,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.declaration, self.error)
    }
}

/// Files generated for one declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedEntity {
    pub declaration: QualifiedName,
    pub entity: QualifiedName,
    pub files: Vec<String>,
}

/// Outcome of one batch.
#[derive(Debug, Default)]
pub struct ProcessReport {
    pub generated: Vec<GeneratedEntity>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ProcessReport {
    pub fn is_success(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn generated_files(&self) -> usize {
        self.generated.iter().map(|entity| entity.files.len()).sum()
    }

    pub fn diagnostic(&self, declaration: &QualifiedName) -> Option<&Diagnostic> {
        self.diagnostics.iter().find(|diagnostic| &diagnostic.declaration == declaration)
    }
}

pub struct EntityProcessor {
    config: GeneratorConfig,
}

impl EntityProcessor {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Resolve and plan one declaration.
    pub fn plan_declaration<I>(
        &self,
        inspector: &I,
        name: &QualifiedName,
    ) -> Result<(EntityPlan, MapperRegistryPlan)>
    where
        I: DeclarationInspector + ?Sized,
    {
        let declaration = inspector.resolve_declaration(name)?;
        let policy = ClassPolicy::from_declaration(&declaration);
        let resolver = FieldResolver::new(inspector, &self.config.mapper_trait);
        let fields = declaration
            .fields
            .iter()
            .map(|field| resolver.resolve(&declaration.name, field, &policy))
            .collect::<Result<Vec<_>>>()?;

        let plan = EntityPlan::plan(&declaration, policy, fields);
        let registry = MapperRegistryPlan::plan(plan.registry.clone(), plan.registry_requirements());
        log::debug!(
            "Planned {} -> {} ({} fields, {} mappers, conversions {})",
            plan.domain,
            plan.entity,
            plan.fields.len(),
            registry.len(),
            if plan.conversions.is_some() { "on" } else { "off" }
        );
        Ok((plan, registry))
    }

    /// Emission instructions for one declaration.
    pub fn process_declaration<I>(&self, inspector: &I, name: &QualifiedName) -> Result<EmissionInstructions>
    where
        I: DeclarationInspector + ?Sized,
    {
        let (plan, registry) = self.plan_declaration(inspector, name)?;
        Ok(EmissionPlanner::new(&self.config).emit(&plan, &registry))
    }

    /// Process every declaration of the inspector; failures are isolated per declaration.
    ///
    /// Only a failing [`Renderer::finish`] fails the whole batch.
    pub fn process<I, R>(&self, inspector: &I, renderer: &mut R) -> Result<ProcessReport>
    where
        I: DeclarationInspector + ?Sized,
        R: Renderer + ?Sized,
    {
        let mut report = ProcessReport::default();
        for name in inspector.declarations() {
            match self.emit_declaration(inspector, renderer, &name) {
                Ok(generated) => report.generated.push(generated),
                Err(error) => {
                    log::warn!("Skipping {}: {}", name, error);
                    report.diagnostics.push(Diagnostic { declaration: name, error });
                }
            }
        }
        renderer.finish()?;

        log::info!(
            "Generated {} entities ({} files), {} failed",
            report.generated.len(),
            report.generated_files(),
            report.diagnostics.len()
        );
        Ok(report)
    }

    fn emit_declaration<I, R>(&self, inspector: &I, renderer: &mut R, name: &QualifiedName) -> Result<GeneratedEntity>
    where
        I: DeclarationInspector + ?Sized,
        R: Renderer + ?Sized,
    {
        let instructions = self.process_declaration(inspector, name)?;
        renderer.emit(&instructions)?;

        Ok(GeneratedEntity {
            declaration: name.clone(),
            entity: crate::naming::entity_name(name),
            files: instructions.files.iter().map(|file| file.name.clone()).collect(),
        })
    }
}

impl Default for EntityProcessor {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}
