//! Items referenced by generated code.
//!
//! Generated entities depend only on this module (and on `serde` when
//! serializable), so it stays small and stable.

/// A bidirectional converter between a domain-side and an entity-side value.
///
/// Registries hold one shared instance per mapper, created with `Default`.
pub trait EntityMapper<Domain, Entity>: Send + Sync {
    fn map_domain_to_entity(&self, domain: Domain) -> Entity;
    fn map_entity_to_domain(&self, entity: Entity) -> Domain;
}

/// Domain to entity conversion implemented by generated code.
pub trait ToEntity: Sized {
    type Entity;
    fn to_entity(self) -> Result<Self::Entity, ConversionError>;
}

/// Entity to domain conversion implemented by generated code.
pub trait ToDomain: Sized {
    type Domain;
    fn to_domain(self) -> Result<Self::Domain, ConversionError>;
}

/// Implemented by `#[derive(Entity)]` on every annotated declaration.
pub trait EntityDeclaration {
    /// Simple name of the declaration.
    const NAME: &'static str;
    /// Simple name of the generated entity.
    const ENTITY_NAME: &'static str;
}

/// Runtime conversion failures.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// An absent value had to become a present one and the type has no default.
    #[error("{source_type}.{field} is absent and has no default value")]
    AbsentValue { source_type: &'static str, field: &'static str },
}

impl ConversionError {
    pub fn absent(source_type: &'static str, field: &'static str) -> Self {
        Self::AbsentValue { source_type, field }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Scale;

    impl EntityMapper<i64, f64> for Scale {
        fn map_domain_to_entity(&self, domain: i64) -> f64 {
            domain as f64 / 100.0
        }
        fn map_entity_to_domain(&self, entity: f64) -> i64 {
            (entity * 100.0).round() as i64
        }
    }

    #[test]
    fn mapper_round_trip() {
        let mapper = Scale;
        let entity = mapper.map_domain_to_entity(1250);
        assert_eq!(entity, 12.5);
        assert_eq!(mapper.map_entity_to_domain(entity), 1250);
    }

    #[test]
    fn absent_value_message_names_field() {
        let err = ConversionError::absent("SampleClassEntity", "home");
        assert_eq!(err.to_string(), "SampleClassEntity.home is absent and has no default value");
    }
}
