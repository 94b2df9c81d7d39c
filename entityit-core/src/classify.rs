//! Type classification and the default-literal table.

use crate::types::{QualifiedName, TypeName, TypeRef};

/// Scalar-like types with a well-defined zero/empty literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Char,
    String,
    BoxedStr,
    I8,
    I16,
    I32,
    I64,
    I128,
    Isize,
    U8,
    U16,
    U32,
    U64,
    U128,
    Usize,
    F32,
    F64,
    Bool,
}

impl Primitive {
    fn from_std_name(name: &str) -> Option<Self> {
        let primitive = match name {
            "char" => Self::Char,
            "String" => Self::String,
            "i8" => Self::I8,
            "i16" => Self::I16,
            "i32" => Self::I32,
            "i64" => Self::I64,
            "i128" => Self::I128,
            "isize" => Self::Isize,
            "u8" => Self::U8,
            "u16" => Self::U16,
            "u32" => Self::U32,
            "u64" => Self::U64,
            "u128" => Self::U128,
            "usize" => Self::Usize,
            "f32" => Self::F32,
            "f64" => Self::F64,
            "bool" => Self::Bool,
            _ => return None,
        };
        Some(primitive)
    }
}

/// Container families treated as directly encodable. Element types are not inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    Vec,
    VecDeque,
    LinkedList,
    HashMap,
    BTreeMap,
    HashSet,
    BTreeSet,
    /// `Box<[T]>`
    BoxedSlice,
    /// `[T; N]`
    FixedArray,
}

impl CollectionKind {
    fn from_std_name(name: &str) -> Option<Self> {
        let kind = match name {
            "Vec" => Self::Vec,
            "VecDeque" => Self::VecDeque,
            "LinkedList" => Self::LinkedList,
            "HashMap" => Self::HashMap,
            "BTreeMap" => Self::BTreeMap,
            "HashSet" => Self::HashSet,
            "BTreeSet" => Self::BTreeSet,
            _ => return None,
        };
        Some(kind)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeClass {
    Primitive(Primitive),
    CollectionLike(CollectionKind),
    NestedEntity,
    Ineligible,
}

impl TypeClass {
    pub fn is_eligible(&self) -> bool {
        !matches!(self, Self::Ineligible)
    }

    /// Allowed as the entity side of a custom mapper.
    pub fn is_mapper_target(&self) -> bool {
        matches!(self, Self::Primitive(_) | Self::NestedEntity)
    }
}

/// Default value used when an absent value collapses into a non-null one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// Zero/empty literal of a primitive.
    Literal(Primitive),
    /// Empty instance of a collection.
    Empty(CollectionKind),
}

/// Classify a resolved type. `is_entity` answers whether a path names an annotated declaration.
pub fn classify<F>(ty: &TypeRef, is_entity: F) -> TypeClass
where
    F: Fn(&QualifiedName) -> bool,
{
    match &ty.name {
        TypeName::Array { .. } => TypeClass::CollectionLike(CollectionKind::FixedArray),
        TypeName::Slice(_) | TypeName::Other(_) => TypeClass::Ineligible,
        TypeName::Path { path, args } => {
            if let Some(name) = ty.std_name() {
                if let Some(primitive) = Primitive::from_std_name(name) {
                    return TypeClass::Primitive(primitive);
                }
                if let Some(kind) = CollectionKind::from_std_name(name) {
                    return TypeClass::CollectionLike(kind);
                }
                if name == "Box" {
                    if let Some(class) = classify_box(args) {
                        return class;
                    }
                }
            }
            if is_entity(path) {
                TypeClass::NestedEntity
            } else {
                TypeClass::Ineligible
            }
        }
    }
}

fn classify_box(args: &[TypeRef]) -> Option<TypeClass> {
    match args {
        [inner] if !inner.nullable => match &inner.name {
            TypeName::Slice(_) => Some(TypeClass::CollectionLike(CollectionKind::BoxedSlice)),
            TypeName::Path { .. } if inner.std_name() == Some("str") => {
                Some(TypeClass::Primitive(Primitive::BoxedStr))
            }
            _ => None,
        },
        _ => None,
    }
}

/// Table-driven default for a classified type, or `None` when only an assertion is possible.
pub fn fallback_for(class: TypeClass) -> Option<Fallback> {
    match class {
        TypeClass::Primitive(primitive) => Some(Fallback::Literal(primitive)),
        TypeClass::CollectionLike(CollectionKind::FixedArray) => None,
        TypeClass::CollectionLike(kind) => Some(Fallback::Empty(kind)),
        TypeClass::NestedEntity | TypeClass::Ineligible => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_entities(_: &QualifiedName) -> bool {
        false
    }

    #[test]
    fn scalars_are_primitive() {
        for (name, expected) in [
            ("char", Primitive::Char),
            ("String", Primitive::String),
            ("std::string::String", Primitive::String),
            ("i64", Primitive::I64),
            ("u8", Primitive::U8),
            ("f32", Primitive::F32),
            ("f64", Primitive::F64),
            ("bool", Primitive::Bool),
        ] {
            assert_eq!(
                classify(&TypeRef::simple(name), no_entities),
                TypeClass::Primitive(expected),
                "{name}"
            );
        }
    }

    #[test]
    fn boxed_str_and_slice() {
        let boxed_str = TypeRef::generic("Box", vec![TypeRef::simple("str")]);
        assert_eq!(classify(&boxed_str, no_entities), TypeClass::Primitive(Primitive::BoxedStr));

        let slice = TypeRef {
            name: TypeName::Slice(Box::new(TypeRef::simple("u8"))),
            nullable: false,
        };
        let boxed_slice = TypeRef::generic("Box", vec![slice]);
        assert_eq!(
            classify(&boxed_slice, no_entities),
            TypeClass::CollectionLike(CollectionKind::BoxedSlice)
        );

        let boxed_other = TypeRef::generic("Box", vec![TypeRef::simple("crate::Thing")]);
        assert_eq!(classify(&boxed_other, no_entities), TypeClass::Ineligible);
    }

    #[test]
    fn collections_ignore_element_types() {
        let list = TypeRef::generic("Vec", vec![TypeRef::simple("crate::Unknown")]);
        assert_eq!(classify(&list, no_entities), TypeClass::CollectionLike(CollectionKind::Vec));

        let map = TypeRef::generic(
            "std::collections::BTreeMap",
            vec![TypeRef::simple("String"), TypeRef::simple("i32")],
        );
        assert_eq!(classify(&map, no_entities), TypeClass::CollectionLike(CollectionKind::BTreeMap));
    }

    #[test]
    fn annotated_declarations_are_nested_entities() {
        let address = TypeRef::simple("crate::address::Address");
        let known = |name: &QualifiedName| name.to_string() == "crate::address::Address";
        assert_eq!(classify(&address, known), TypeClass::NestedEntity);
        assert_eq!(classify(&address, no_entities), TypeClass::Ineligible);
    }

    #[test]
    fn fallback_table() {
        assert_eq!(
            fallback_for(TypeClass::Primitive(Primitive::Bool)),
            Some(Fallback::Literal(Primitive::Bool))
        );
        assert_eq!(
            fallback_for(TypeClass::CollectionLike(CollectionKind::HashSet)),
            Some(Fallback::Empty(CollectionKind::HashSet))
        );
        assert_eq!(fallback_for(TypeClass::CollectionLike(CollectionKind::FixedArray)), None);
        assert_eq!(fallback_for(TypeClass::NestedEntity), None);
    }
}
