//! Procedural macros for EntityIt
//!
//! `#[derive(Entity)]` marks a domain struct for the generator. It registers
//! the `entity` helper attribute, checks the annotation schema at compile time
//! with the same parser the generator uses, and implements
//! `entityit_core::runtime::EntityDeclaration`. The entity itself is written
//! by `entityit generate`.

use proc_macro::TokenStream;

mod entity;

/// Derive macro for entity declarations
///
/// # Example
///
/// ```rust,ignore
/// use entityit_macros::Entity;
///
/// #[derive(Entity)]
/// #[entity(serializable = false, nullability = "transient")]
/// pub struct SampleClass {
///     #[entity(not_null)]
///     id: String,
///     #[entity(rename = "iAmDouble", map_with = SampleMapper)]
///     long: i64,
/// }
/// ```
#[proc_macro_derive(Entity, attributes(entity))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    match entity::derive_entity(input.into()) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
