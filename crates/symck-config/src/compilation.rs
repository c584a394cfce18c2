//! How sources given on the command line are compiled.

use semver::Version;
use serde::{Deserialize, Serialize};

fn default_assembly_name() -> String {
    "Project".to_string()
}

const fn default_version() -> Version {
    Version::new(1, 0, 0)
}

const fn default_include_core_library() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CompilationConfig {
    /// Assembly name of the compilation built from `--source` files.
    #[serde(default = "default_assembly_name")]
    pub assembly_name: String,

    #[serde(default = "default_version")]
    pub version: Version,

    /// Reference the built-in core library (`System.Attribute` and friends).
    #[serde(default = "default_include_core_library")]
    pub include_core_library: bool,
}

impl Default for CompilationConfig {
    fn default() -> Self {
        Self {
            assembly_name: default_assembly_name(),
            version: default_version(),
            include_core_library: default_include_core_library(),
        }
    }
}
