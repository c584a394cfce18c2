//! The query interface a front end exposes to the matcher.

use crate::assembly::AssemblyIdentity;
use crate::attribute::AttributeInstance;
use crate::errors::ResolveError;
use crate::symbol::NamedTypeHandle;

/// Read-only view of a compiled program.
///
/// Implementations are pure queries over already-bound state. The matcher
/// only ever talks to a front end through this trait.
pub trait SemanticModel {
    /// Identity of the assembly this model compiles.
    fn assembly(&self) -> &AssemblyIdentity;

    /// Look up a type by fully-qualified metadata name (`Ns.Type`,
    /// `Ns.Outer+Inner`, ``Ns.Generic`1``) in the program and its references.
    ///
    /// # Errors
    /// [`ResolveError::NotFound`] when nothing declares the name;
    /// [`ResolveError::Ambiguous`] when several references do and the program
    /// itself does not; [`ResolveError::InvalidName`] for malformed names.
    fn resolve_type(&self, metadata_name: &str) -> Result<NamedTypeHandle, ResolveError>;

    /// Attributes applied to the declaration behind `ty`, in source order.
    ///
    /// Empty when the declaration has none or the model does not know the type.
    fn attributes_of(&self, ty: &NamedTypeHandle) -> Vec<AttributeInstance>;
}

impl<M: SemanticModel + ?Sized> SemanticModel for &M {
    fn assembly(&self) -> &AssemblyIdentity {
        (**self).assembly()
    }

    fn resolve_type(&self, metadata_name: &str) -> Result<NamedTypeHandle, ResolveError> {
        (**self).resolve_type(metadata_name)
    }

    fn attributes_of(&self, ty: &NamedTypeHandle) -> Vec<AttributeInstance> {
        (**self).attributes_of(ty)
    }
}
