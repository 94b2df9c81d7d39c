//! Naming conventions for generated items.
//!
//! Generated names are a pure function of the declaration's package and simple
//! name, so a declaration can predict the entity of a nested declaration
//! without seeing its plan.

use crate::types::QualifiedName;

/// Marker opening every generated file; such files are never inspected.
pub const GENERATED_MARKER: &str = "@generated by entityit";

/// Sub-module holding generated items, sibling of the declaration.
pub const ENTITY_MODULE: &str = "entity";

/// Suffix appended to the declaration name for the entity type.
pub const ENTITY_SUFFIX: &str = "Entity";

/// Suffix appended to the declaration name for the mapper registry.
pub const MAPPERS_SUFFIX: &str = "Mappers";

/// `crate::a::Foo` -> `crate::a::entity`
pub fn entity_package(declaration: &QualifiedName) -> QualifiedName {
    declaration.package().child(ENTITY_MODULE)
}

/// `crate::a::Foo` -> `crate::a::entity::FooEntity`
pub fn entity_name(declaration: &QualifiedName) -> QualifiedName {
    entity_package(declaration).child(format!("{}{}", declaration.simple_name(), ENTITY_SUFFIX))
}

/// `crate::a::Foo` -> `crate::a::entity::FooMappers`
pub fn registry_name(declaration: &QualifiedName) -> QualifiedName {
    entity_package(declaration).child(format!("{}{}", declaration.simple_name(), MAPPERS_SUFFIX))
}

/// Registry key of a mapper: its identity with separators removed.
pub fn mapper_key(mapper: &QualifiedName) -> String {
    mapper.sanitized()
}

/// Module file stem for a generated type: `SampleClassEntity` -> `sample_class_entity`.
pub fn module_file_name(type_name: &str) -> String {
    let mut out = String::with_capacity(type_name.len() + 4);
    let chars: Vec<char> = type_name.chars().collect();
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev_lower = i > 0 && (chars[i - 1].is_lowercase() || chars[i - 1].is_ascii_digit());
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let prev_upper = i > 0 && chars[i - 1].is_uppercase();
            if i > 0 && (prev_lower || (prev_upper && next_lower)) {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
