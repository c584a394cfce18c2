use clap::ValueEnum;

/// Shared output mode across all commands.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Raw,
}

impl OutputFormat {
    /// Parse a configured format name. Unknown names fall back to `table`;
    /// config validation rejects them before this is reached.
    #[must_use]
    pub fn from_config(name: &str) -> Self {
        Self::from_str(name, true).unwrap_or(Self::Table)
    }
}

/// Global flags after config defaults are applied.
#[derive(Clone, Copy, Debug)]
pub struct GlobalFlags {
    pub format: OutputFormat,
}
