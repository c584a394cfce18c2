//! Typed constants carried by attribute arguments.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Literal value of an attribute argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ConstantValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    /// `decimal` literals keep their source digits.
    Decimal(String),
    Char(char),
    String(String),
    /// `typeof(T)`; holds the type as written.
    Type(String),
    Array(Vec<TypedConstant>),
    /// Anything the front end does not evaluate (enum members, `nameof`, ...).
    Expression(String),
}

/// A constant value together with its declared type name (`int`, `string`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedConstant {
    pub type_name: String,
    pub value: ConstantValue,
}

impl TypedConstant {
    #[must_use]
    pub fn new(type_name: impl Into<String>, value: ConstantValue) -> Self {
        Self {
            type_name: type_name.into(),
            value,
        }
    }

    #[must_use]
    pub fn int(value: i64) -> Self {
        Self::new("int", ConstantValue::Int(value))
    }

    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::new("string", ConstantValue::String(value.into()))
    }

    #[must_use]
    pub const fn is_evaluated(&self) -> bool {
        !matches!(self.value, ConstantValue::Expression(_))
    }
}

impl fmt::Display for ConstantValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::UInt(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Decimal(v) | Self::Expression(v) => f.write_str(v),
            Self::Char(v) => write!(f, "'{v}'"),
            Self::String(v) => write!(f, "\"{v}\""),
            Self::Type(v) => write!(f, "typeof({v})"),
            Self::Array(items) => {
                f.write_str("{")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item.value)?;
                }
                f.write_str("}")
            }
        }
    }
}

impl fmt::Display for TypedConstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}){}", self.type_name, self.value)
    }
}
