use serde::{Deserialize, Serialize};

use crate::constant::TypedConstant;
use crate::symbol::NamedTypeHandle;

/// A `Name = value` argument on an attribute application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedArgument {
    pub name: String,
    pub value: TypedConstant,
}

/// One attribute application on a declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeInstance {
    /// The bound attribute class. An error type when binding failed.
    pub attribute_class: NamedTypeHandle,
    /// Positional constructor arguments, in source order.
    pub constructor_arguments: Vec<TypedConstant>,
    pub named_arguments: Vec<NamedArgument>,
    /// 1-based source line of the attribute.
    pub line: u32,
}

impl AttributeInstance {
    #[must_use]
    pub fn simple_name(&self) -> &str {
        self.attribute_class.simple_name()
    }

    #[must_use]
    pub fn named_argument(&self, name: &str) -> Option<&TypedConstant> {
        self.named_arguments
            .iter()
            .find(|arg| arg.name == name)
            .map(|arg| &arg.value)
    }
}
