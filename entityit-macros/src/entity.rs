//! `Entity` derive implementation

use entityit_core::inspector::attributes::{parse_class_annotation, parse_field_annotations};
use entityit_core::naming::ENTITY_SUFFIX;
use entityit_core::render::rust::ident;
use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{parse2, Data, DeriveInput, Error, Fields, Result};

pub fn derive_entity(input: TokenStream) -> Result<TokenStream> {
    let input: DeriveInput = parse2(input)?;
    let name = &input.ident;

    let Data::Struct(data) = &input.data else {
        return Err(Error::new_spanned(name, "Entity can only be derived for structs"));
    };
    let Fields::Named(fields) = &data.fields else {
        return Err(Error::new_spanned(name, "Entity requires a struct with named fields"));
    };
    if !input.generics.params.is_empty() {
        return Err(Error::new_spanned(&input.generics, "Entity cannot be derived for generic structs"));
    }

    parse_class_annotation(&input.attrs)?;

    for field in &fields.named {
        let annotations = parse_field_annotations(&field.attrs)?;
        if let Some(rename) = &annotations.rename {
            if ident(rename).is_err() {
                return Err(Error::new_spanned(
                    field,
                    format!("rename = \"{rename}\" is not a valid Rust identifier"),
                ));
            }
        }
    }

    let name_str = name.unraw().to_string();
    let entity_name = format!("{name_str}{ENTITY_SUFFIX}");

    Ok(quote! {
        impl ::entityit_core::runtime::EntityDeclaration for #name {
            const NAME: &'static str = #name_str;
            const ENTITY_NAME: &'static str = #entity_name;
        }
    })
}
