//! Resolved type descriptors handed to the core by a declaration inspector.

use std::fmt;

/// A `::`-separated path such as `crate::sample::SampleClass`.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QualifiedName {
    segments: Vec<String>,
}

impl QualifiedName {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { segments: segments.into_iter().map(Into::into).collect() }
    }

    /// Parse `a::b::C`. A leading `::` is dropped.
    pub fn parse(path: &str) -> Self {
        Self::new(path.split("::").map(str::trim).filter(|s| !s.is_empty()))
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Last segment, the simple name.
    pub fn simple_name(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    /// Everything but the last segment.
    pub fn package(&self) -> QualifiedName {
        let end = self.segments.len().saturating_sub(1);
        Self { segments: self.segments[..end].to_vec() }
    }

    pub fn child(&self, segment: impl Into<String>) -> QualifiedName {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    pub fn join(&self, other: &QualifiedName) -> QualifiedName {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        Self { segments }
    }

    /// The path with all separators removed: `crate::a::M` becomes `crateaM`.
    pub fn sanitized(&self) -> String {
        self.segments.concat()
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("::"))
    }
}

/// Shape of a resolved type, without its outer nullability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeName {
    /// A named type with optional generic arguments, e.g. `Vec<String>`.
    Path { path: QualifiedName, args: Vec<TypeRef> },
    /// `[T; N]`, `len` kept as written.
    Array { element: Box<TypeRef>, len: String },
    /// `[T]`, only meaningful behind a pointer such as `Box<[T]>`.
    Slice(Box<TypeRef>),
    /// Tuples, references, trait objects and anything else, kept as source text.
    Other(String),
}

/// A resolved type descriptor with its nullability flag.
///
/// A declared `Option<T>` is carried as `T` with `nullable = true`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    pub name: TypeName,
    pub nullable: bool,
}

const STD_ROOTS: [&str; 3] = ["std", "alloc", "core"];

impl TypeRef {
    pub fn path(path: QualifiedName, args: Vec<TypeRef>) -> Self {
        Self { name: TypeName::Path { path, args }, nullable: false }
    }

    /// Shorthand for a non-generic path type, e.g. `TypeRef::simple("i64")`.
    pub fn simple(path: &str) -> Self {
        Self::path(QualifiedName::parse(path), Vec::new())
    }

    pub fn generic(path: &str, args: Vec<TypeRef>) -> Self {
        Self::path(QualifiedName::parse(path), args)
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// The same type with the nullability flag cleared.
    pub fn non_null(&self) -> Self {
        self.clone().with_nullable(false)
    }

    pub fn qualified_name(&self) -> Option<&QualifiedName> {
        match &self.name {
            TypeName::Path { path, .. } => Some(path),
            _ => None,
        }
    }

    pub fn args(&self) -> &[TypeRef] {
        match &self.name {
            TypeName::Path { args, .. } => args,
            _ => &[],
        }
    }

    /// The simple name when the path is bare or rooted in `std`/`alloc`/`core`.
    pub fn std_name(&self) -> Option<&str> {
        let path = self.qualified_name()?;
        match path.segments() {
            [single] => Some(single.as_str()),
            [root, .., last] if STD_ROOTS.contains(&root.as_str()) => Some(last.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nullable {
            f.write_str("Option<")?;
        }
        match &self.name {
            TypeName::Path { path, args } => {
                write!(f, "{path}")?;
                if !args.is_empty() {
                    let args: Vec<String> = args.iter().map(ToString::to_string).collect();
                    write!(f, "<{}>", args.join(", "))?;
                }
            }
            TypeName::Array { element, len } => write!(f, "[{element}; {len}]")?,
            TypeName::Slice(element) => write!(f, "[{element}]")?,
            TypeName::Other(text) => f.write_str(text)?,
        }
        if self.nullable {
            f.write_str(">")?;
        }
        Ok(())
    }
}
