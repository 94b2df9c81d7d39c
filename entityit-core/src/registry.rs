//! Mapper registry planning: one shared instance per distinct mapper of a declaration.

use crate::resolver::{FieldPlan, MapperRef};
use crate::types::QualifiedName;
use std::collections::BTreeMap;

/// Deduplicated mappers of one declaration, keyed by sanitized identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapperRegistryPlan {
    pub name: QualifiedName,
    entries: BTreeMap<String, MapperRef>,
}

impl MapperRegistryPlan {
    pub fn empty(name: QualifiedName) -> Self {
        Self { name, entries: BTreeMap::new() }
    }

    /// Collect the mappers referenced by `fields`.
    ///
    /// Two distinct mappers with the same sanitized key keep the last one seen.
    pub fn plan<'a>(name: QualifiedName, fields: impl IntoIterator<Item = &'a FieldPlan>) -> Self {
        let mut entries: BTreeMap<String, MapperRef> = BTreeMap::new();
        for mapper in fields.into_iter().filter_map(FieldPlan::mapper) {
            let key = mapper.key();
            if let Some(previous) = entries.insert(key.clone(), mapper.clone()) {
                if previous.identity != mapper.identity {
                    log::warn!(
                        "Mapper registry {}: [{}] and [{}] share the key {}, keeping [{}]",
                        name,
                        previous.identity,
                        mapper.identity,
                        key,
                        mapper.identity
                    );
                }
            }
        }
        Self { name, entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, key: &str) -> Option<&MapperRef> {
        self.entries.get(key)
    }

    /// Entries ordered by key.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &MapperRef)> {
        self.entries.iter().map(|(key, mapper)| (key.as_str(), mapper))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::ConversionKind;
    use crate::types::TypeRef;

    fn mapped(field: &str, mapper: &str) -> FieldPlan {
        FieldPlan {
            declared_name: field.to_string(),
            emitted_name: field.to_string(),
            declared_type: TypeRef::simple("i64"),
            emitted_type: TypeRef::simple("f64"),
            conversion: ConversionKind::CustomMapper(MapperRef {
                identity: QualifiedName::parse(mapper),
                domain: TypeRef::simple("i64"),
                entity: TypeRef::simple("f64"),
            }),
            collapse: None,
        }
    }

    fn direct(field: &str) -> FieldPlan {
        FieldPlan {
            declared_name: field.to_string(),
            emitted_name: field.to_string(),
            declared_type: TypeRef::simple("bool"),
            emitted_type: TypeRef::simple("bool"),
            conversion: ConversionKind::Direct,
            collapse: None,
        }
    }

    fn registry_name() -> QualifiedName {
        QualifiedName::parse("crate::sample::entity::SampleClassMappers")
    }

    #[test]
    fn same_mapper_is_registered_once() {
        let fields = [
            mapped("a", "crate::sample::SampleMapper"),
            direct("flag"),
            mapped("b", "crate::sample::SampleMapper"),
        ];
        let plan = MapperRegistryPlan::plan(registry_name(), &fields);
        assert_eq!(plan.len(), 1);
        assert!(plan.get("cratesampleSampleMapper").is_some());
    }

    #[test]
    fn no_mappers_means_empty_registry() {
        let plan = MapperRegistryPlan::plan(registry_name(), &[direct("flag")]);
        assert!(plan.is_empty());
    }

    #[test]
    fn sanitized_collisions_keep_the_last_mapper() {
        let fields = [mapped("a", "crate::ab::C"), mapped("b", "crate::a::bC")];
        let plan = MapperRegistryPlan::plan(registry_name(), &fields);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.get("crateabC").unwrap().identity.to_string(), "crate::a::bC");
    }

    #[test]
    fn entries_are_ordered_by_key() {
        let fields = [mapped("a", "crate::z::Mapper"), mapped("b", "crate::a::Mapper")];
        let plan = MapperRegistryPlan::plan(registry_name(), &fields);
        let keys: Vec<&str> = plan.entries().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["crateaMapper", "cratezMapper"]);
    }
}
