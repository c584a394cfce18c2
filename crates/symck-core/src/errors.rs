//! Resolution error types.
//!
//! Only symbol resolution can fail hard. Matching and verification report
//! absence and booleans instead, so they have no error type here. Front-end
//! and driver errors live in their own crates; the CLI converges them with
//! `anyhow`.

use thiserror::Error;

/// Errors raised while resolving a type by fully-qualified name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// No declaration with this name exists in the compilation or its references.
    #[error("Type not found: {name}")]
    NotFound { name: String },

    /// More than one referenced assembly declares the name and the
    /// compilation itself does not.
    #[error("Type {name} is ambiguous between assemblies: {}", assemblies.join(", "))]
    Ambiguous {
        name: String,
        assemblies: Vec<String>,
    },

    /// The metadata name could not be parsed.
    #[error("Invalid metadata name '{name}': {reason}")]
    InvalidName { name: String, reason: String },
}

impl ResolveError {
    /// Build a [`ResolveError::NotFound`] for `name`.
    #[must_use]
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// The name the failed lookup was asked for.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::NotFound { name } | Self::Ambiguous { name, .. } | Self::InvalidName { name, .. } => {
                name
            }
        }
    }
}
