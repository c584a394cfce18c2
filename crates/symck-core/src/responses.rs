//! CLI response types returned as JSON by `symck` commands.

use serde::{Deserialize, Serialize};

use crate::attribute::AttributeInstance;
use crate::symbol::{NamedTypeHandle, TypeKind};

/// A resolved type, flattened for output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSummary {
    pub name: String,
    pub kind: TypeKind,
    pub assembly: String,
    pub context: u32,
}

impl From<&NamedTypeHandle> for TypeSummary {
    fn from(handle: &NamedTypeHandle) -> Self {
        Self {
            name: handle.qualified_name(),
            kind: handle.kind(),
            assembly: handle.assembly().to_string(),
            context: handle.origin().get(),
        }
    }
}

/// Response from `symck resolve`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveResponse {
    pub resolved: TypeSummary,
}

/// Response from `symck attributes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributesResponse {
    pub target: TypeSummary,
    pub attributes: Vec<AttributeInstance>,
}
