//! # symck-core
//!
//! Core types shared by every symck crate.
//!
//! This crate provides:
//! - Canonical type keys and the [`NamedTypeHandle`] symbol handle
//! - Assembly identities and compilation context ids
//! - Attribute instances and their typed constant arguments
//! - The [`SemanticModel`] query interface a front end implements
//! - Resolution error types and compiler-style diagnostics
//! - CLI response types
//!
//! Nothing here knows how a program is parsed or bound. Front ends produce
//! handles; the matcher in `symck-match` consumes them through
//! [`SemanticModel`] only.

pub mod assembly;
pub mod attribute;
pub mod constant;
pub mod context;
pub mod diagnostic;
pub mod errors;
pub mod model;
pub mod responses;
pub mod symbol;

pub use assembly::AssemblyIdentity;
pub use attribute::{AttributeInstance, NamedArgument};
pub use constant::{ConstantValue, TypedConstant};
pub use context::ContextId;
pub use diagnostic::{Diagnostic, DiagnosticCode, Severity};
pub use errors::ResolveError;
pub use model::SemanticModel;
pub use symbol::{MetadataName, NamedTypeHandle, TypeKey, TypeKind, TypeSegment};
