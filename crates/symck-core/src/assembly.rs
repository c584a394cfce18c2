use std::fmt;

use semver::Version;
use serde::{Deserialize, Serialize};

/// Name used for the synthetic assembly that owns unresolved types.
pub const ERROR_ASSEMBLY_NAME: &str = "<error>";

/// Identity of a compiled unit: the defining half of a canonical type key.
///
/// Two assemblies are the same assembly when both name and version match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssemblyIdentity {
    pub name: String,
    pub version: Version,
}

impl AssemblyIdentity {
    #[must_use]
    pub fn new(name: impl Into<String>, version: Version) -> Self {
        Self {
            name: name.into(),
            version,
        }
    }

    /// Identity with the default `1.0.0` version.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, Version::new(1, 0, 0))
    }

    /// The assembly that owns error types produced by failed binding.
    #[must_use]
    pub fn error() -> Self {
        Self::new(ERROR_ASSEMBLY_NAME, Version::new(0, 0, 0))
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.name == ERROR_ASSEMBLY_NAME
    }
}

impl fmt::Display for AssemblyIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, Version={}", self.name, self.version)
    }
}
