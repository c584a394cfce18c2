//! Type symbols: metadata names, canonical keys and handles.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::assembly::AssemblyIdentity;
use crate::context::ContextId;
use crate::errors::ResolveError;

/// Kind of a declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
    Enum,
    Delegate,
    Record,
    RecordStruct,
    /// Stand-in for a name that failed to bind.
    Error,
}

/// One type name plus its generic arity (`List`1` has arity 1).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeSegment {
    pub name: String,
    pub arity: usize,
}

impl TypeSegment {
    #[must_use]
    pub fn new(name: impl Into<String>, arity: usize) -> Self {
        Self {
            name: name.into(),
            arity,
        }
    }

    fn parse(raw: &str, full: &str) -> Result<Self, ResolveError> {
        let (name, arity) = match raw.split_once('`') {
            Some((name, arity)) => {
                let arity = arity.parse::<usize>().map_err(|_| ResolveError::InvalidName {
                    name: full.to_string(),
                    reason: format!("bad generic arity in '{raw}'"),
                })?;
                (name, arity)
            }
            None => (raw, 0),
        };
        if name.is_empty() {
            return Err(ResolveError::InvalidName {
                name: full.to_string(),
                reason: "empty type name".to_string(),
            });
        }
        Ok(Self::new(name, arity))
    }
}

impl fmt::Display for TypeSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.arity == 0 {
            f.write_str(&self.name)
        } else {
            write!(f, "{}`{}", self.name, self.arity)
        }
    }
}

/// A fully-qualified metadata name: `Ns.Sub.Outer+Inner`1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MetadataName {
    pub namespace: Vec<String>,
    /// Enclosing types, outermost first.
    pub containing_types: Vec<TypeSegment>,
    pub name: TypeSegment,
}

impl MetadataName {
    #[must_use]
    pub const fn new(
        namespace: Vec<String>,
        containing_types: Vec<TypeSegment>,
        name: TypeSegment,
    ) -> Self {
        Self {
            namespace,
            containing_types,
            name,
        }
    }

    /// Parse a metadata name as accepted by `resolve_type`.
    ///
    /// # Errors
    /// Returns [`ResolveError::InvalidName`] for empty segments or a
    /// malformed generic arity.
    pub fn parse(raw: &str) -> Result<Self, ResolveError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ResolveError::InvalidName {
                name: raw.to_string(),
                reason: "empty name".to_string(),
            });
        }

        let mut nested = trimmed.split('+');
        let outer = nested.next().unwrap_or_default();
        let (namespace, outer_type) = match outer.rsplit_once('.') {
            Some((ns, ty)) => {
                let parts: Vec<String> = ns.split('.').map(ToString::to_string).collect();
                if parts.iter().any(String::is_empty) {
                    return Err(ResolveError::InvalidName {
                        name: raw.to_string(),
                        reason: "empty namespace segment".to_string(),
                    });
                }
                (parts, ty)
            }
            None => (Vec::new(), outer),
        };

        let mut segments = vec![TypeSegment::parse(outer_type, raw)?];
        for inner in nested {
            segments.push(TypeSegment::parse(inner, raw)?);
        }
        let name = segments.pop().unwrap_or_else(|| TypeSegment::new(outer_type, 0));

        Ok(Self::new(namespace, segments, name))
    }

    #[must_use]
    pub fn simple_name(&self) -> &str {
        &self.name.name
    }

    /// Dotted namespace path, empty for the global namespace.
    #[must_use]
    pub fn namespace_path(&self) -> String {
        self.namespace.join(".")
    }

    /// Metadata name of the type nested inside this one.
    #[must_use]
    pub fn nested(&self, name: TypeSegment) -> Self {
        let mut containing_types = self.containing_types.clone();
        containing_types.push(self.name.clone());
        Self::new(self.namespace.clone(), containing_types, name)
    }
}

impl fmt::Display for MetadataName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.namespace.is_empty() {
            write!(f, "{}.", self.namespace.join("."))?;
        }
        for containing in &self.containing_types {
            write!(f, "{containing}+")?;
        }
        write!(f, "{}", self.name)
    }
}

/// Canonical identity of a declared type: metadata name plus defining assembly.
///
/// This is what symbol equality compares. It is independent of which
/// compilation context a handle came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeKey {
    pub assembly: AssemblyIdentity,
    pub metadata_name: MetadataName,
}

impl TypeKey {
    #[must_use]
    pub const fn new(assembly: AssemblyIdentity, metadata_name: MetadataName) -> Self {
        Self {
            assembly,
            metadata_name,
        }
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.metadata_name, self.assembly)
    }
}

/// Handle to a declared type as seen from one compilation context.
///
/// `==` and `Hash` use the canonical [`TypeKey`] only. Two handles for the
/// same type obtained through different contexts compare equal even though
/// they are distinct instances; use [`NamedTypeHandle::is_same_instance`]
/// for instance identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedTypeHandle {
    key: TypeKey,
    kind: TypeKind,
    origin: ContextId,
    slot: u32,
}

impl NamedTypeHandle {
    #[must_use]
    pub const fn new(key: TypeKey, kind: TypeKind, origin: ContextId, slot: u32) -> Self {
        Self {
            key,
            kind,
            origin,
            slot,
        }
    }

    /// An error type for a name that could not be bound.
    #[must_use]
    pub fn error(name: MetadataName, origin: ContextId, slot: u32) -> Self {
        Self::new(
            TypeKey::new(AssemblyIdentity::error(), name),
            TypeKind::Error,
            origin,
            slot,
        )
    }

    #[must_use]
    pub const fn key(&self) -> &TypeKey {
        &self.key
    }

    #[must_use]
    pub const fn kind(&self) -> TypeKind {
        self.kind
    }

    #[must_use]
    pub const fn origin(&self) -> ContextId {
        self.origin
    }

    #[must_use]
    pub const fn slot(&self) -> u32 {
        self.slot
    }

    #[must_use]
    pub const fn assembly(&self) -> &AssemblyIdentity {
        &self.key.assembly
    }

    #[must_use]
    pub const fn metadata_name(&self) -> &MetadataName {
        &self.key.metadata_name
    }

    #[must_use]
    pub fn simple_name(&self) -> &str {
        self.key.metadata_name.simple_name()
    }

    #[must_use]
    pub fn qualified_name(&self) -> String {
        self.key.metadata_name.to_string()
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.kind == TypeKind::Error
    }

    /// Instance identity: same context and same slot within it.
    #[must_use]
    pub fn is_same_instance(&self, other: &Self) -> bool {
        self.origin == other.origin && self.slot == other.slot
    }
}

impl PartialEq for NamedTypeHandle {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for NamedTypeHandle {}

impl Hash for NamedTypeHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for NamedTypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.key.fmt(f)
    }
}
