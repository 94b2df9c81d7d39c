//! [`DeclarationInspector`] over a crate's Rust sources, built on `syn`.
//!
//! Files map to module paths the way rustc does for a library crate
//! (`lib.rs` is `crate`, `a/mod.rs` and `a.rs` are `crate::a`). Paths are
//! resolved through `use` items and same-module items; anything else (std,
//! extern crates) is kept as written.

use super::attributes::{self, RawFieldAnnotations};
use super::{DeclarationInspector, InspectError};
use crate::declaration::{Declaration, FieldAnnotations, FieldDeclaration, Supertype, Visibility};
use crate::naming::GENERATED_MARKER;
use crate::types::{QualifiedName, TypeName, TypeRef};
use quote::ToTokens;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use syn::ext::IdentExt;
use syn::{Fields, GenericArgument, Item, PathArguments, UseTree};
use walkdir::WalkDir;

/// Names visible in one module.
#[derive(Debug)]
struct ModuleScope {
    path: QualifiedName,
    /// alias -> path as written in the `use` item
    imports: BTreeMap<String, Vec<String>>,
    /// structs, enums, traits, aliases and modules declared here
    items: BTreeSet<String>,
}

struct DeclarationEntry {
    name: QualifiedName,
    scope: usize,
    item: syn::ItemStruct,
}

struct ImplEntry {
    scope: usize,
    self_ty: syn::Type,
    trait_path: syn::Path,
}

/// Inspector over parsed source files.
pub struct SourceInspector {
    scopes: Vec<ModuleScope>,
    entries: Vec<DeclarationEntry>,
    entity_names: BTreeSet<QualifiedName>,
    known_types: BTreeSet<QualifiedName>,
    supertypes: BTreeMap<QualifiedName, Vec<Supertype>>,
    skipped: Vec<InspectError>,
}

impl SourceInspector {
    /// Parse every `.rs` file below `src_dir`, skipping `bin/` and previously generated files.
    pub fn from_dir(src_dir: impl AsRef<Path>) -> Result<Self, InspectError> {
        let src_dir = src_dir.as_ref();
        let mut files = Vec::new();
        let walker = WalkDir::new(src_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !(entry.depth() == 1 && entry.file_type().is_dir() && entry.file_name() == "bin"));
        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_file() || entry.path().extension().map_or(true, |ext| ext != "rs") {
                continue;
            }
            let relative = entry.path().strip_prefix(src_dir).unwrap_or(entry.path());
            let Some(module) = module_path(relative) else {
                continue;
            };
            let content = fs::read_to_string(entry.path())
                .map_err(|source| InspectError::Io { path: entry.path().to_path_buf(), source })?;
            if content.lines().next().is_some_and(|line| line.contains(GENERATED_MARKER)) {
                log::debug!("Skipping generated file {}", entry.path().display());
                continue;
            }
            files.push((module, entry.path().to_path_buf(), content));
        }
        Self::build(files)
    }

    /// Build from in-memory sources: `(module path, source text)` pairs.
    pub fn from_sources<I, M, S>(sources: I) -> Result<Self, InspectError>
    where
        I: IntoIterator<Item = (M, S)>,
        M: AsRef<str>,
        S: AsRef<str>,
    {
        let files = sources
            .into_iter()
            .map(|(module, source)| {
                let module = QualifiedName::parse(module.as_ref());
                let path = PathBuf::from(module.to_string());
                (module, path, source.as_ref().to_string())
            })
            .collect();
        Self::build(files)
    }

    /// Files left out because they do not parse.
    pub fn skipped(&self) -> &[InspectError] {
        &self.skipped
    }

    fn build(files: Vec<(QualifiedName, PathBuf, String)>) -> Result<Self, InspectError> {
        let mut collector = Collector::default();
        let mut skipped = Vec::new();
        for (module, path, content) in files {
            match syn::parse_file(&content) {
                Ok(file) => collector.collect_module(module, &file.items),
                Err(err) => {
                    let error = InspectError::Parse { path, message: err.to_string() };
                    log::warn!("Skipping {}", error);
                    skipped.push(error);
                }
            }
        }

        let Collector { scopes, entries, impls, known_types } = collector;
        let mut inspector = Self {
            scopes,
            entries,
            entity_names: BTreeSet::new(),
            known_types,
            supertypes: BTreeMap::new(),
            skipped,
        };
        inspector.entity_names = inspector.entries.iter().map(|entry| entry.name.clone()).collect();

        for entry in impls {
            let scope = &inspector.scopes[entry.scope];
            let syn::Type::Path(self_path) = &entry.self_ty else {
                continue;
            };
            let self_name = inspector.resolve_path(scope, &path_segments(&self_path.path));
            let supertype = Supertype {
                name: inspector.resolve_path(scope, &path_segments(&entry.trait_path)),
                arguments: inspector.generic_arguments(scope, &entry.trait_path),
            };
            inspector.supertypes.entry(self_name).or_default().push(supertype);
        }

        log::debug!(
            "Inspected {} modules, {} entity declarations",
            inspector.scopes.len(),
            inspector.entries.len()
        );
        Ok(inspector)
    }

    fn entry(&self, name: &QualifiedName) -> Option<&DeclarationEntry> {
        self.entries.iter().find(|entry| &entry.name == name)
    }

    fn resolve_path(&self, scope: &ModuleScope, segments: &[String]) -> QualifiedName {
        self.resolve_segments(scope, segments, true)
    }

    fn resolve_segments(&self, scope: &ModuleScope, segments: &[String], follow_imports: bool) -> QualifiedName {
        let Some((first, rest)) = segments.split_first() else {
            return QualifiedName::new(Vec::<String>::new());
        };
        match first.as_str() {
            "crate" => QualifiedName::new(segments.iter().cloned()),
            "self" => scope.path.join(&QualifiedName::new(rest.iter().cloned())),
            "super" => {
                let mut base = scope.path.package();
                let mut rest = rest;
                while let Some((next, tail)) = rest.split_first() {
                    if next != "super" {
                        break;
                    }
                    base = base.package();
                    rest = tail;
                }
                base.join(&QualifiedName::new(rest.iter().cloned()))
            }
            _ => {
                if follow_imports {
                    if let Some(target) = scope.imports.get(first) {
                        let mut expanded = target.clone();
                        expanded.extend(rest.iter().cloned());
                        return self.resolve_segments(scope, &expanded, false);
                    }
                }
                if scope.items.contains(first) {
                    scope.path.join(&QualifiedName::new(segments.iter().cloned()))
                } else {
                    QualifiedName::new(segments.iter().cloned())
                }
            }
        }
    }

    fn generic_arguments(&self, scope: &ModuleScope, path: &syn::Path) -> Vec<TypeRef> {
        let Some(last) = path.segments.last() else {
            return Vec::new();
        };
        match &last.arguments {
            PathArguments::AngleBracketed(args) => args
                .args
                .iter()
                .filter_map(|arg| match arg {
                    GenericArgument::Type(ty) => Some(self.type_ref(scope, ty)),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    fn type_ref(&self, scope: &ModuleScope, ty: &syn::Type) -> TypeRef {
        match ty {
            syn::Type::Paren(inner) => self.type_ref(scope, &inner.elem),
            syn::Type::Group(inner) => self.type_ref(scope, &inner.elem),
            syn::Type::Path(type_path) if type_path.qself.is_none() => {
                let segments = path_segments(&type_path.path);
                if is_option(&segments) {
                    if let [inner] = self.generic_arguments(scope, &type_path.path).as_slice() {
                        if inner.nullable {
                            return TypeRef { name: TypeName::Other(tokens(ty)), nullable: true };
                        }
                        return inner.clone().nullable();
                    }
                }
                TypeRef::path(
                    self.resolve_path(scope, &segments),
                    self.generic_arguments(scope, &type_path.path),
                )
            }
            syn::Type::Array(array) => TypeRef {
                name: TypeName::Array {
                    element: Box::new(self.type_ref(scope, &array.elem)),
                    len: tokens(&array.len),
                },
                nullable: false,
            },
            syn::Type::Slice(slice) => TypeRef {
                name: TypeName::Slice(Box::new(self.type_ref(scope, &slice.elem))),
                nullable: false,
            },
            other => TypeRef { name: TypeName::Other(tokens(other)), nullable: false },
        }
    }

    fn field_annotations(
        &self,
        scope: &ModuleScope,
        raw: RawFieldAnnotations,
    ) -> FieldAnnotations {
        FieldAnnotations {
            rename: raw.rename,
            map_with: raw.map_with.map(|path| self.resolve_path(scope, &path_segments(&path))),
            not_null: raw.not_null,
        }
    }
}

impl DeclarationInspector for SourceInspector {
    fn declarations(&self) -> Vec<QualifiedName> {
        self.entries.iter().map(|entry| entry.name.clone()).collect()
    }

    fn resolve_declaration(&self, name: &QualifiedName) -> Result<Declaration, InspectError> {
        let entry = self.entry(name).ok_or_else(|| InspectError::UnsupportedDeclaration {
            name: name.clone(),
            reason: "not an entity declaration".to_string(),
        })?;
        let scope = &self.scopes[entry.scope];

        if !entry.item.generics.params.is_empty() {
            return Err(InspectError::UnsupportedDeclaration {
                name: name.clone(),
                reason: "generic declarations are not supported".to_string(),
            });
        }
        let Fields::Named(named) = &entry.item.fields else {
            return Err(InspectError::UnsupportedDeclaration {
                name: name.clone(),
                reason: "only structs with named fields can be entities".to_string(),
            });
        };

        let annotation = attributes::parse_class_annotation(&entry.item.attrs).map_err(|err| {
            InspectError::InvalidAnnotation { target: name.to_string(), message: err.to_string() }
        })?;

        let mut fields = Vec::with_capacity(named.named.len());
        for field in &named.named {
            let Some(ident) = &field.ident else {
                continue;
            };
            let field_name = ident.unraw().to_string();
            let raw = attributes::parse_field_annotations(&field.attrs).map_err(|err| {
                InspectError::InvalidAnnotation {
                    target: format!("{name}.{field_name}"),
                    message: err.to_string(),
                }
            })?;
            fields.push(FieldDeclaration {
                name: field_name,
                ty: self.type_ref(scope, &field.ty),
                annotations: self.field_annotations(scope, raw),
            });
        }

        let visibility = match entry.item.vis {
            syn::Visibility::Public(_) => Visibility::Public,
            _ => Visibility::Restricted,
        };

        Ok(Declaration { name: name.clone(), visibility, annotation, fields })
    }

    fn is_entity(&self, name: &QualifiedName) -> bool {
        self.entity_names.contains(name)
    }

    fn mapper_supertypes(&self, mapper: &QualifiedName) -> Result<Vec<Supertype>, InspectError> {
        match self.supertypes.get(mapper) {
            Some(supertypes) => Ok(supertypes.clone()),
            None if self.known_types.contains(mapper) => Ok(Vec::new()),
            None => Err(InspectError::UnknownMapper(mapper.clone())),
        }
    }
}

#[derive(Default)]
struct Collector {
    scopes: Vec<ModuleScope>,
    entries: Vec<DeclarationEntry>,
    impls: Vec<ImplEntry>,
    known_types: BTreeSet<QualifiedName>,
}

impl Collector {
    fn collect_module(&mut self, path: QualifiedName, items: &[Item]) {
        let index = self.scopes.len();
        self.scopes.push(ModuleScope {
            path: path.clone(),
            imports: BTreeMap::new(),
            items: BTreeSet::new(),
        });

        let mut imports = BTreeMap::new();
        let mut names = BTreeSet::new();
        for item in items {
            match item {
                Item::Use(item_use) => flatten_use(Vec::new(), &item_use.tree, &mut imports),
                Item::Struct(item_struct) => {
                    let name = item_struct.ident.to_string();
                    self.known_types.insert(path.child(&name));
                    if attributes::is_entity_declaration(&item_struct.attrs) {
                        self.entries.push(DeclarationEntry {
                            name: path.child(&name),
                            scope: index,
                            item: item_struct.clone(),
                        });
                    }
                    names.insert(name);
                }
                Item::Enum(item_enum) => {
                    let name = item_enum.ident.to_string();
                    self.known_types.insert(path.child(&name));
                    names.insert(name);
                }
                Item::Trait(item_trait) => {
                    names.insert(item_trait.ident.to_string());
                }
                Item::Type(item_type) => {
                    names.insert(item_type.ident.to_string());
                }
                Item::Impl(item_impl) => {
                    if let Some((_, trait_path, _)) = &item_impl.trait_ {
                        self.impls.push(ImplEntry {
                            scope: index,
                            self_ty: (*item_impl.self_ty).clone(),
                            trait_path: trait_path.clone(),
                        });
                    }
                }
                Item::Mod(item_mod) => {
                    let name = item_mod.ident.to_string();
                    if let Some((_, content)) = &item_mod.content {
                        self.collect_module(path.child(&name), content);
                    }
                    names.insert(name);
                }
                _ => {}
            }
        }

        let scope = &mut self.scopes[index];
        scope.imports = imports;
        scope.items = names;
    }
}

fn flatten_use(prefix: Vec<String>, tree: &UseTree, out: &mut BTreeMap<String, Vec<String>>) {
    match tree {
        UseTree::Path(path) => {
            let mut prefix = prefix;
            prefix.push(path.ident.to_string());
            flatten_use(prefix, &path.tree, out);
        }
        UseTree::Name(name) => {
            if name.ident == "self" {
                if let Some(last) = prefix.last() {
                    out.insert(last.clone(), prefix.clone());
                }
            } else {
                let mut target = prefix;
                target.push(name.ident.to_string());
                out.insert(name.ident.to_string(), target);
            }
        }
        UseTree::Rename(rename) => {
            let mut target = prefix;
            if rename.ident != "self" {
                target.push(rename.ident.to_string());
            }
            out.insert(rename.rename.to_string(), target);
        }
        UseTree::Group(group) => {
            for item in &group.items {
                flatten_use(prefix.clone(), item, out);
            }
        }
        UseTree::Glob(_) => {}
    }
}

fn path_segments(path: &syn::Path) -> Vec<String> {
    path.segments.iter().map(|segment| segment.ident.to_string()).collect()
}

fn is_option(segments: &[String]) -> bool {
    match segments {
        [single] => single == "Option",
        [root, .., last] => last == "Option" && matches!(root.as_str(), "std" | "core"),
        [] => false,
    }
}

fn tokens<T: ToTokens>(value: &T) -> String {
    value.to_token_stream().to_string()
}

/// Module path of a source file relative to the crate's `src` directory.
pub fn module_path(relative: &Path) -> Option<QualifiedName> {
    let stem = relative.file_stem()?.to_str()?;
    let mut segments = vec!["crate".to_string()];
    if let Some(parent) = relative.parent() {
        for component in parent.components() {
            segments.push(component.as_os_str().to_str()?.to_string());
        }
    }
    let at_root = segments.len() == 1;
    match stem {
        "lib" | "main" if at_root => {}
        "mod" => {}
        _ => segments.push(stem.to_string()),
    }
    Some(QualifiedName::new(segments))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::NullabilityMode;

    const SAMPLE: &str = r#"
        use entityit_core::runtime::EntityMapper;
        use std::collections::HashMap;
        use crate::address::Address as Location;

        #[derive(Debug, entityit_macros::Entity)]
        #[entity(serializable = false, nullability = "full")]
        pub(crate) struct SampleClass {
            #[entity(not_null)]
            id: String,
            #[entity(rename = "iAmDouble", map_with = SampleMapper)]
            long: i64,
            tags: HashMap<String, String>,
            home: Option<Location>,
            r#type: u8,
        }

        #[derive(Default)]
        pub struct SampleMapper;

        impl EntityMapper<i64, f64> for SampleMapper {
            fn map_domain_to_entity(&self, domain: i64) -> f64 { domain as f64 }
            fn map_entity_to_domain(&self, entity: f64) -> i64 { entity as i64 }
        }
    "#;

    const ADDRESS: &str = r#"
        #[derive(entityit_macros::Entity)]
        pub struct Address {
            street: String,
        }

        mod nested {
            #[entity]
            pub struct Inner { value: super::Address }
        }
    "#;

    fn inspector() -> SourceInspector {
        SourceInspector::from_sources([("crate::sample", SAMPLE), ("crate::address", ADDRESS)]).unwrap()
    }

    #[test]
    fn discovers_declarations_in_order() {
        let names: Vec<String> = inspector().declarations().iter().map(ToString::to_string).collect();
        assert_eq!(
            names,
            vec!["crate::sample::SampleClass", "crate::address::Address", "crate::address::nested::Inner"]
        );
    }

    #[test]
    fn resolves_fields_and_annotations() {
        let inspector = inspector();
        let declaration =
            inspector.resolve_declaration(&QualifiedName::parse("crate::sample::SampleClass")).unwrap();

        assert_eq!(declaration.visibility, Visibility::Restricted);
        assert!(!declaration.annotation.serializable);
        assert_eq!(declaration.annotation.nullability, NullabilityMode::Full);

        let names: Vec<&str> = declaration.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["id", "long", "tags", "home", "type"]);

        assert!(declaration.fields[0].annotations.not_null);
        assert_eq!(declaration.fields[1].annotations.rename.as_deref(), Some("iAmDouble"));
        assert_eq!(
            declaration.fields[1].annotations.map_with.as_ref().map(ToString::to_string).as_deref(),
            Some("crate::sample::SampleMapper")
        );
        assert_eq!(declaration.fields[2].ty.to_string(), "std::collections::HashMap<String, String>");
        assert_eq!(declaration.fields[3].ty.to_string(), "Option<crate::address::Address>");
        assert!(declaration.fields[3].is_declared_nullable());
    }

    #[test]
    fn resolves_super_paths_in_inline_modules() {
        let inspector = inspector();
        let inner = inspector
            .resolve_declaration(&QualifiedName::parse("crate::address::nested::Inner"))
            .unwrap();
        assert_eq!(inner.fields[0].ty.to_string(), "crate::address::Address");
        assert!(inspector.is_entity(&QualifiedName::parse("crate::address::Address")));
    }

    #[test]
    fn mapper_supertypes_carry_generic_arguments() {
        let inspector = inspector();
        let supertypes =
            inspector.mapper_supertypes(&QualifiedName::parse("crate::sample::SampleMapper")).unwrap();
        assert_eq!(supertypes.len(), 1);
        assert_eq!(supertypes[0].name.to_string(), "entityit_core::runtime::EntityMapper");
        let args: Vec<String> = supertypes[0].arguments.iter().map(ToString::to_string).collect();
        assert_eq!(args, vec!["i64", "f64"]);

        let missing = inspector.mapper_supertypes(&QualifiedName::parse("crate::sample::Missing"));
        assert!(matches!(missing, Err(InspectError::UnknownMapper(_))));
    }

    #[test]
    fn invalid_field_annotation_names_the_field() {
        let inspector = SourceInspector::from_sources([(
            "crate",
            r#"
            #[entity]
            pub struct Broken { #[entity(rename = 5)] id: String }
            "#,
        )])
        .unwrap();
        let err = inspector.resolve_declaration(&QualifiedName::parse("crate::Broken")).unwrap_err();
        assert!(err.to_string().contains("crate::Broken.id"), "{err}");
    }

    #[test]
    fn unparsable_files_are_skipped() {
        let inspector = SourceInspector::from_sources([
            ("crate::broken", "pub struct Half {"),
            ("crate::tag", "#[entity]\npub struct Tag { name: String }"),
        ])
        .unwrap();
        assert_eq!(inspector.declarations(), vec![QualifiedName::parse("crate::tag::Tag")]);
        assert_eq!(inspector.skipped().len(), 1);
        assert!(matches!(&inspector.skipped()[0], InspectError::Parse { path, .. } if path.ends_with("crate::broken")));
    }

    #[test]
    fn tuple_structs_are_unsupported() {
        let inspector =
            SourceInspector::from_sources([("crate", "#[entity] pub struct Id(String);")]).unwrap();
        let err = inspector.resolve_declaration(&QualifiedName::parse("crate::Id")).unwrap_err();
        assert!(matches!(err, InspectError::UnsupportedDeclaration { .. }));
    }

    #[test]
    fn module_paths_follow_file_layout() {
        assert_eq!(module_path(Path::new("lib.rs")).unwrap().to_string(), "crate");
        assert_eq!(module_path(Path::new("sample.rs")).unwrap().to_string(), "crate::sample");
        assert_eq!(module_path(Path::new("a/mod.rs")).unwrap().to_string(), "crate::a");
        assert_eq!(module_path(Path::new("a/b.rs")).unwrap().to_string(), "crate::a::b");
    }

    #[test]
    fn reads_a_source_tree() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("lib.rs"), "pub mod sample;").unwrap();
        fs::write(dir.path().join("sample.rs"), SAMPLE).unwrap();
        fs::create_dir(dir.path().join("bin")).unwrap();
        fs::write(dir.path().join("bin/tool.rs"), "#[entity] pub struct Ignored { a: u8 }").unwrap();
        fs::write(
            dir.path().join("generated.rs"),
            format!("// {GENERATED_MARKER} from crate::x::X. Do not edit.\n#[entity] pub struct Skipped {{ a: u8 }}"),
        )
        .unwrap();

        let inspector = SourceInspector::from_dir(dir.path()).unwrap();
        let names: Vec<String> = inspector.declarations().iter().map(ToString::to_string).collect();
        assert_eq!(names, vec!["crate::sample::SampleClass"]);
    }
}
