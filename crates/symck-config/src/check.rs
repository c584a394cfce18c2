//! Defaults for `symck check`.

use serde::{Deserialize, Serialize};

/// Output formats the CLI understands.
pub const OUTPUT_FORMATS: [&str; 3] = ["json", "table", "raw"];

const fn default_expected_argument_count() -> usize {
    1
}

fn default_format() -> String {
    "table".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CheckConfig {
    /// Positional arguments each matched attribute must carry.
    #[serde(default = "default_expected_argument_count")]
    pub expected_argument_count: usize,

    /// Output format used when `--format` is not given.
    #[serde(default = "default_format")]
    pub default_format: String,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            expected_argument_count: default_expected_argument_count(),
            default_format: default_format(),
        }
    }
}
