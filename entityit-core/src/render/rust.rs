//! Rust source rendering of [`FileSpec`]s with `quote`.

use super::RenderError;
use crate::classify::{CollectionKind, Fallback, Primitive};
use crate::declaration::Visibility;
use crate::emission::{
    BodySpec, FileSpec, FunctionSpec, ImplSpec, ItemSpec, ReturnSpec, RuntimePaths, StructSpec,
    TraitImplSpec,
};
use crate::planner::{ConversionStatement, ConversionStep};
use crate::resolver::{Collapse, Direction, Lift};
use crate::types::{QualifiedName, TypeName, TypeRef};
use proc_macro2::{Ident, Literal, Span, TokenStream};
use quote::{format_ident, quote};

/// Render a file: the `@generated` header followed by its pretty-printed items.
pub fn render_file(file: &FileSpec) -> Result<String, RenderError> {
    let tokens = render_tokens(file)?;
    let parsed: syn::File = syn::parse2(tokens).map_err(|err| RenderError::Syntax {
        file: file.name.clone(),
        message: err.to_string(),
    })?;
    Ok(format!("// {}\n\n{}", file.header, prettyplease::unparse(&parsed)))
}

/// Items of a file as one token stream, without the header.
pub fn render_tokens(file: &FileSpec) -> Result<TokenStream, RenderError> {
    let ctx = Context { runtime: &file.runtime };
    let items = file
        .items
        .iter()
        .map(|item| ctx.item(item))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(quote! { #(#items)* })
}

/// An identifier, falling back to a raw identifier for keywords.
pub fn ident(name: &str) -> Result<Ident, RenderError> {
    if syn::parse_str::<Ident>(name).is_ok() {
        return Ok(format_ident!("{}", name));
    }
    let is_word = name.chars().next().is_some_and(|c| c == '_' || c.is_alphabetic())
        && name.chars().all(|c| c == '_' || c.is_alphanumeric());
    if is_word && !matches!(name, "_" | "crate" | "self" | "super" | "Self") {
        return Ok(Ident::new_raw(name, Span::call_site()));
    }
    Err(RenderError::InvalidIdentifier(name.to_string()))
}

pub fn path(path: &str) -> Result<syn::Path, RenderError> {
    syn::parse_str(path).map_err(|err| RenderError::InvalidPath {
        path: path.to_string(),
        message: err.to_string(),
    })
}

fn qualified(name: &QualifiedName) -> Result<syn::Path, RenderError> {
    path(&name.to_string())
}

pub fn type_tokens(ty: &TypeRef) -> Result<TokenStream, RenderError> {
    let inner = match &ty.name {
        TypeName::Path { path, args } => {
            let path = qualified(path)?;
            if args.is_empty() {
                quote! { #path }
            } else {
                let args = args.iter().map(type_tokens).collect::<Result<Vec<_>, _>>()?;
                quote! { #path<#(#args),*> }
            }
        }
        TypeName::Array { element, len } => {
            let element = type_tokens(element)?;
            let len: syn::Expr = syn::parse_str(len).map_err(|err| RenderError::InvalidPath {
                path: len.clone(),
                message: err.to_string(),
            })?;
            quote! { [#element; #len] }
        }
        TypeName::Slice(element) => {
            let element = type_tokens(element)?;
            quote! { [#element] }
        }
        TypeName::Other(text) => {
            let parsed: syn::Type = syn::parse_str(text).map_err(|err| RenderError::InvalidPath {
                path: text.clone(),
                message: err.to_string(),
            })?;
            quote! { #parsed }
        }
    };
    Ok(if ty.nullable { quote! { Option<#inner> } } else { inner })
}

fn visibility(visibility: Visibility) -> TokenStream {
    match visibility {
        Visibility::Public => quote! { pub },
        Visibility::Restricted => quote! { pub(crate) },
    }
}

pub fn fallback_tokens(fallback: Fallback) -> TokenStream {
    match fallback {
        Fallback::Literal(primitive) => match primitive {
            Primitive::Char => {
                let lit = Literal::character('\0');
                quote! { #lit }
            }
            Primitive::String => quote! { ::std::string::String::new() },
            Primitive::BoxedStr => quote! { ::std::boxed::Box::<str>::default() },
            Primitive::I64 => {
                let lit = Literal::i64_suffixed(0);
                quote! { #lit }
            }
            Primitive::U64 => {
                let lit = Literal::u64_suffixed(0);
                quote! { #lit }
            }
            Primitive::F32 => {
                let lit = Literal::f32_suffixed(0.0);
                quote! { #lit }
            }
            Primitive::F64 => {
                let lit = Literal::f64_unsuffixed(0.0);
                quote! { #lit }
            }
            Primitive::Bool => quote! { false },
            Primitive::I8
            | Primitive::I16
            | Primitive::I32
            | Primitive::I128
            | Primitive::Isize
            | Primitive::U8
            | Primitive::U16
            | Primitive::U32
            | Primitive::U128
            | Primitive::Usize => {
                let lit = Literal::i32_unsuffixed(0);
                quote! { #lit }
            }
        },
        Fallback::Empty(kind) => match kind {
            CollectionKind::Vec => quote! { ::std::vec::Vec::new() },
            CollectionKind::VecDeque => quote! { ::std::collections::VecDeque::new() },
            CollectionKind::LinkedList => quote! { ::std::collections::LinkedList::new() },
            CollectionKind::HashMap => quote! { ::std::collections::HashMap::new() },
            CollectionKind::BTreeMap => quote! { ::std::collections::BTreeMap::new() },
            CollectionKind::HashSet => quote! { ::std::collections::HashSet::new() },
            CollectionKind::BTreeSet => quote! { ::std::collections::BTreeSet::new() },
            CollectionKind::BoxedSlice => quote! { ::std::boxed::Box::default() },
            CollectionKind::FixedArray => quote! { ::core::default::Default::default() },
        },
    }
}

struct Context<'a> {
    runtime: &'a RuntimePaths,
}

impl Context<'_> {
    fn item(&self, item: &ItemSpec) -> Result<TokenStream, RenderError> {
        match item {
            ItemSpec::Struct(spec) => self.structure(spec),
            ItemSpec::Impl(spec) => self.inherent_impl(spec),
            ItemSpec::TraitImpl(spec) => self.trait_impl(spec),
        }
    }

    fn structure(&self, spec: &StructSpec) -> Result<TokenStream, RenderError> {
        let name = ident(&spec.name)?;
        let vis = visibility(spec.visibility);
        let derives = spec.derives.iter().map(|d| path(d)).collect::<Result<Vec<_>, _>>()?;
        let derive = if derives.is_empty() {
            quote! {}
        } else {
            quote! { #[derive(#(#derives),*)] }
        };

        if spec.fields.is_empty() {
            return Ok(quote! {
                #derive
                #vis struct #name;
            });
        }

        let fields = spec
            .fields
            .iter()
            .map(|field| {
                let name = ident(&field.name)?;
                let ty = type_tokens(&field.ty)?;
                let vis = visibility(field.visibility);
                let serde = if field.serde_default {
                    quote! { #[serde(default)] }
                } else {
                    quote! {}
                };
                Ok(quote! { #serde #vis #name: #ty })
            })
            .collect::<Result<Vec<_>, RenderError>>()?;

        Ok(quote! {
            #derive
            #[allow(non_snake_case)]
            #vis struct #name {
                #(#fields),*
            }
        })
    }

    fn inherent_impl(&self, spec: &ImplSpec) -> Result<TokenStream, RenderError> {
        let self_ty = qualified(&spec.self_ty)?;
        let functions = spec.functions.iter().map(|f| self.function(f)).collect::<Result<Vec<_>, _>>()?;
        Ok(quote! {
            #[allow(non_snake_case)]
            impl #self_ty {
                #(#functions)*
            }
        })
    }

    fn trait_impl(&self, spec: &TraitImplSpec) -> Result<TokenStream, RenderError> {
        let trait_path = path(&spec.trait_path)?;
        let self_ty = qualified(&spec.self_ty)?;
        let associated = spec
            .associated_types
            .iter()
            .map(|(name, ty)| {
                let name = ident(name)?;
                let ty = qualified(ty)?;
                Ok(quote! { type #name = #ty; })
            })
            .collect::<Result<Vec<_>, RenderError>>()?;
        let functions = spec.functions.iter().map(|f| self.function(f)).collect::<Result<Vec<_>, _>>()?;
        Ok(quote! {
            impl #trait_path for #self_ty {
                #(#associated)*
                #(#functions)*
            }
        })
    }

    fn function(&self, spec: &FunctionSpec) -> Result<TokenStream, RenderError> {
        let name = ident(&spec.name)?;
        let vis = spec.visibility.map(visibility).unwrap_or_default();
        let mut params = Vec::new();
        if spec.receiver {
            params.push(quote! { self });
        }
        for (param, ty) in &spec.params {
            let param = ident(param)?;
            let ty = type_tokens(ty)?;
            params.push(quote! { #param: #ty });
        }
        let returns = match &spec.returns {
            ReturnSpec::SelfType => quote! { Self },
            ReturnSpec::Conversion(target) => {
                let target = qualified(target)?;
                let error = path(&self.runtime.conversion_error)?;
                quote! { ::core::result::Result<#target, #error> }
            }
            ReturnSpec::StaticRef(target) => {
                let target = qualified(target)?;
                quote! { &'static #target }
            }
        };
        let body = self.body(&spec.body)?;
        Ok(quote! {
            #vis fn #name(#(#params),*) -> #returns {
                #body
            }
        })
    }

    fn body(&self, body: &BodySpec) -> Result<TokenStream, RenderError> {
        match body {
            BodySpec::Constructor { fields } => {
                let fields = fields.iter().map(|f| ident(f)).collect::<Result<Vec<_>, _>>()?;
                Ok(quote! { Self { #(#fields),* } })
            }
            BodySpec::Delegate { method } => {
                let method = ident(method)?;
                Ok(quote! { Self::#method(self) })
            }
            BodySpec::MapperInstance { mapper } => {
                let mapper = qualified(mapper)?;
                Ok(quote! {
                    static INSTANCE: ::std::sync::OnceLock<#mapper> = ::std::sync::OnceLock::new();
                    INSTANCE.get_or_init(<#mapper as ::core::default::Default>::default)
                })
            }
            BodySpec::Conversion { target, source, function } => {
                let target = qualified(target)?;
                let fields = function
                    .statements
                    .iter()
                    .map(|statement| {
                        let name = ident(&statement.target)?;
                        let value = self.statement(source, function.direction, statement)?;
                        Ok(quote! { #name: #value })
                    })
                    .collect::<Result<Vec<_>, RenderError>>()?;
                Ok(quote! {
                    ::core::result::Result::Ok(#target {
                        #(#fields),*
                    })
                })
            }
        }
    }

    /// Value expression of one conversion statement, reading `self.<source>`.
    fn statement(
        &self,
        source_type: &QualifiedName,
        direction: Direction,
        statement: &ConversionStatement,
    ) -> Result<TokenStream, RenderError> {
        let field = ident(&statement.source)?;
        let source = quote! { self.#field };
        let value = format_ident!("value");

        let (step, fallible) = self.step(&statement.step, direction, quote! { #value })?;
        let some = quote! { ::core::option::Option::Some };

        let expr = match statement.lift {
            Lift::Plain => {
                let (step, _) = self.step(&statement.step, direction, source)?;
                if fallible { quote! { #step? } } else { step }
            }
            Lift::Wrap => {
                let (step, _) = self.step(&statement.step, direction, source)?;
                if fallible { quote! { #some(#step?) } } else { quote! { #some(#step) } }
            }
            Lift::Map => {
                if matches!(statement.step, ConversionStep::Direct) {
                    source
                } else if fallible {
                    quote! { #source.map(|#value| #step).transpose()? }
                } else {
                    quote! { #source.map(|#value| #step) }
                }
            }
            Lift::Collapse(Collapse::Assert) => {
                let error = path(&self.runtime.conversion_error)?;
                let type_name = source_type.simple_name();
                let field_name = statement.source.as_str();
                let present = quote! {
                    #source.ok_or_else(|| #error::absent(#type_name, #field_name))?
                };
                let (step, _) = self.step(&statement.step, direction, present)?;
                if fallible { quote! { #step? } } else { step }
            }
            Lift::Collapse(Collapse::Fallback(fallback)) => {
                let fallback = fallback_tokens(fallback);
                if direction == Direction::ToDomain {
                    // Entity-side default, then the step.
                    let present = quote! { #source.unwrap_or_else(|| #fallback) };
                    let (step, _) = self.step(&statement.step, direction, present)?;
                    if fallible { quote! { #step? } } else { step }
                } else if matches!(statement.step, ConversionStep::Direct) {
                    quote! { #source.unwrap_or_else(|| #fallback) }
                } else if fallible {
                    quote! { #source.map(|#value| #step).transpose()?.unwrap_or_else(|| #fallback) }
                } else {
                    quote! { #source.map(|#value| #step).unwrap_or_else(|| #fallback) }
                }
            }
        };
        Ok(expr)
    }

    /// The step applied to `input`, and whether it returns a `Result`.
    fn step(
        &self,
        step: &ConversionStep,
        direction: Direction,
        input: TokenStream,
    ) -> Result<(TokenStream, bool), RenderError> {
        match step {
            ConversionStep::Direct => Ok((input, false)),
            ConversionStep::Mapper { registry, accessor, mapper } => {
                let mapper_trait = path(&self.runtime.mapper_trait)?;
                let registry = qualified(registry)?;
                let accessor = ident(accessor)?;
                let domain = type_tokens(&mapper.domain)?;
                let entity = type_tokens(&mapper.entity)?;
                let method = match direction {
                    Direction::ToEntity => format_ident!("map_domain_to_entity"),
                    Direction::ToDomain => format_ident!("map_entity_to_domain"),
                };
                Ok((
                    quote! { #mapper_trait::<#domain, #entity>::#method(#registry::#accessor(), #input) },
                    false,
                ))
            }
            ConversionStep::Nested { .. } => {
                let call = match direction {
                    Direction::ToEntity => {
                        let to_entity = path(&self.runtime.to_entity)?;
                        quote! { #to_entity::to_entity(#input) }
                    }
                    Direction::ToDomain => {
                        let to_domain = path(&self.runtime.to_domain)?;
                        quote! { #to_domain::to_domain(#input) }
                    }
                };
                Ok((call, true))
            }
        }
    }
}
