//! # symck-config
//!
//! Layered configuration loading for symck using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`SYMCK_*` prefix, `__` as separator)
//! 2. Project-level `.symck/config.toml`
//! 3. User-level `~/.config/symck/config.toml`
//! 4. Built-in defaults
//!
//! `SYMCK_COMPILATION__ASSEMBLY_NAME` maps to `compilation.assembly_name`,
//! `SYMCK_CHECK__EXPECTED_ARGUMENT_COUNT` to `check.expected_argument_count`.
//!
//! ```no_run
//! use symck_config::SymckConfig;
//!
//! let config = SymckConfig::load_with_dotenv().expect("config");
//! println!("compiling as {}", config.compilation.assembly_name);
//! ```

mod check;
mod compilation;
mod error;

pub use check::{CheckConfig, OUTPUT_FORMATS};
pub use compilation::CompilationConfig;
pub use error::ConfigError;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment prefix for every symck setting.
pub const ENV_PREFIX: &str = "SYMCK_";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SymckConfig {
    #[serde(default)]
    pub compilation: CompilationConfig,
    #[serde(default)]
    pub check: CheckConfig,
}

impl SymckConfig {
    /// Load configuration from TOML files and environment variables.
    ///
    /// Does not read `.env`; see [`SymckConfig::load_with_dotenv`].
    ///
    /// # Errors
    /// [`ConfigError::Figment`] when a source cannot be parsed, and
    /// [`ConfigError::InvalidValue`] when a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load `.env` from the working directory first, then [`SymckConfig::load`].
    ///
    /// # Errors
    /// See [`SymckConfig::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".symck/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Reject values figment accepts but symck cannot use.
    ///
    /// # Errors
    /// [`ConfigError::InvalidValue`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.compilation.assembly_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "compilation.assembly_name".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if !OUTPUT_FORMATS.contains(&self.check.default_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "check.default_format".to_string(),
                reason: format!(
                    "'{}' is not one of {}",
                    self.check.default_format,
                    OUTPUT_FORMATS.join(", ")
                ),
            });
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("symck").join("config.toml"))
    }
}
