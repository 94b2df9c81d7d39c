//! Parsing of the `#[entity(..)]` annotation schema.
//!
//! Shared by the source inspector and the `Entity` derive so both accept
//! exactly the same surface:
//!
//! ```rust,ignore
//! #[derive(Entity)]
//! #[entity(serializable = false, nullability = "full", conversions = true)]
//! pub(crate) struct SampleClass {
//!     #[entity(not_null)]
//!     id: String,
//!     #[entity(rename = "iAmDouble", map_with = SampleMapper)]
//!     long: i64,
//! }
//! ```

use crate::declaration::{EntityAnnotation, NullabilityMode};
use syn::punctuated::Punctuated;
use syn::{Attribute, LitBool, LitStr, Meta, Path, Token};

/// Attribute name for both class- and field-level markers.
pub const ATTRIBUTE: &str = "entity";

/// Derive name that marks a struct as a declaration.
pub const DERIVE: &str = "Entity";

/// Field markers before path resolution.
#[derive(Debug, Clone, Default)]
pub struct RawFieldAnnotations {
    pub rename: Option<String>,
    pub map_with: Option<Path>,
    pub not_null: bool,
}

/// True when the struct derives `Entity` or carries `#[entity]`.
pub fn is_entity_declaration(attrs: &[Attribute]) -> bool {
    derives_entity(attrs) || attrs.iter().any(|attr| attr.path().is_ident(ATTRIBUTE))
}

fn derives_entity(attrs: &[Attribute]) -> bool {
    attrs.iter().filter(|attr| attr.path().is_ident("derive")).any(|attr| {
        attr.parse_args_with(Punctuated::<Path, Token![,]>::parse_terminated)
            .map(|paths| {
                paths.iter().any(|path| path.segments.last().is_some_and(|s| s.ident == DERIVE))
            })
            .unwrap_or(false)
    })
}

/// Parse class-level `#[entity(serializable = .., nullability = .., conversions = ..)]`.
///
/// Missing keys keep their defaults; several `#[entity]` attributes are merged in order.
pub fn parse_class_annotation(attrs: &[Attribute]) -> syn::Result<EntityAnnotation> {
    let mut annotation = EntityAnnotation::default();
    for attr in entity_attributes(attrs) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("serializable") {
                annotation.serializable = meta.value()?.parse::<LitBool>()?.value;
                Ok(())
            } else if meta.path.is_ident("conversions") {
                annotation.conversions = meta.value()?.parse::<LitBool>()?.value;
                Ok(())
            } else if meta.path.is_ident("nullability") {
                let value = meta.value()?;
                let (name, span) = if value.peek(LitStr) {
                    let lit: LitStr = value.parse()?;
                    (lit.value(), lit.span())
                } else {
                    let ident: syn::Ident = value.parse()?;
                    (ident.to_string(), ident.span())
                };
                annotation.nullability = NullabilityMode::from_name(&name).ok_or_else(|| {
                    syn::Error::new(
                        span,
                        format!("unknown nullability `{name}`, expected none, transient or full"),
                    )
                })?;
                Ok(())
            } else {
                Err(meta.error("unsupported entity option, expected serializable, nullability or conversions"))
            }
        })?;
    }
    Ok(annotation)
}

/// Parse field-level `#[entity(rename = "..", map_with = Path, not_null)]`.
pub fn parse_field_annotations(attrs: &[Attribute]) -> syn::Result<RawFieldAnnotations> {
    let mut annotations = RawFieldAnnotations::default();
    for attr in entity_attributes(attrs) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                annotations.rename = Some(meta.value()?.parse::<LitStr>()?.value());
                Ok(())
            } else if meta.path.is_ident("map_with") {
                let value = meta.value()?;
                let path = if value.peek(LitStr) {
                    value.parse::<LitStr>()?.parse::<Path>()?
                } else {
                    value.parse::<Path>()?
                };
                annotations.map_with = Some(path);
                Ok(())
            } else if meta.path.is_ident("not_null") {
                annotations.not_null = true;
                Ok(())
            } else {
                Err(meta.error("unsupported entity field option, expected rename, map_with or not_null"))
            }
        })?;
    }
    Ok(annotations)
}

// `#[entity]` without arguments only marks the target.
fn entity_attributes(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident(ATTRIBUTE))
        .filter(|attr| !matches!(attr.meta, Meta::Path(_)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn class_annotation_values() {
        let item: syn::ItemStruct = parse_quote! {
            #[derive(Debug, entityit::Entity)]
            #[entity(serializable = false, nullability = "full")]
            struct Sample { id: String }
        };
        assert!(is_entity_declaration(&item.attrs));
        let annotation = parse_class_annotation(&item.attrs).unwrap();
        assert!(!annotation.serializable);
        assert!(annotation.conversions);
        assert_eq!(annotation.nullability, NullabilityMode::Full);
    }

    #[test]
    fn nullability_accepts_identifier() {
        let item: syn::ItemStruct = parse_quote! {
            #[entity(nullability = none, conversions = false)]
            struct Sample { id: String }
        };
        let annotation = parse_class_annotation(&item.attrs).unwrap();
        assert_eq!(annotation.nullability, NullabilityMode::None);
        assert!(!annotation.conversions);
    }

    #[test]
    fn bare_marker_keeps_defaults() {
        let item: syn::ItemStruct = parse_quote! {
            #[entity]
            struct Sample { id: String }
        };
        assert!(is_entity_declaration(&item.attrs));
        assert_eq!(parse_class_annotation(&item.attrs).unwrap(), EntityAnnotation::default());
    }

    #[test]
    fn unknown_options_are_rejected() {
        let item: syn::ItemStruct = parse_quote! {
            #[entity(nullability = "partial")]
            struct Sample { id: String }
        };
        let err = parse_class_annotation(&item.attrs).unwrap_err();
        assert!(err.to_string().contains("unknown nullability"));

        let item: syn::ItemStruct = parse_quote! {
            #[entity(table = "samples")]
            struct Sample { id: String }
        };
        assert!(parse_class_annotation(&item.attrs).is_err());
    }

    #[test]
    fn field_markers() {
        let field: syn::Field = parse_quote! {
            #[entity(rename = "iAmDouble", map_with = crate::sample::SampleMapper)]
            #[entity(not_null)]
            long: i64
        };
        let annotations = parse_field_annotations(&field.attrs).unwrap();
        assert_eq!(annotations.rename.as_deref(), Some("iAmDouble"));
        assert!(annotations.not_null);
        let path = annotations.map_with.unwrap();
        assert_eq!(path.segments.len(), 3);
    }

    #[test]
    fn map_with_accepts_string_literal() {
        let field: syn::Field = parse_quote! {
            #[entity(map_with = "SampleMapper")]
            long: i64
        };
        let path = parse_field_annotations(&field.attrs).unwrap().map_with.unwrap();
        assert!(path.is_ident("SampleMapper"));
    }

    #[test]
    fn plain_struct_is_not_a_declaration() {
        let item: syn::ItemStruct = parse_quote! {
            #[derive(Debug, Clone)]
            struct Plain { id: String }
        };
        assert!(!is_entity_declaration(&item.attrs));
    }
}
