use clap::Parser;

pub mod commands;
pub mod global;

pub use commands::{Commands, ReferenceSpec, SourceArgs};
pub use global::{GlobalFlags, OutputFormat};

/// Top-level CLI parser for the `symck` binary.
#[derive(Debug, Parser)]
#[command(
    name = "symck",
    version,
    about = "symck - check attribute symbol identity across compilation contexts"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw (defaults to `check.default_format`)
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Global flags, falling back to `default_format` when `--format` is absent.
    #[must_use]
    pub fn global_flags(&self, default_format: OutputFormat) -> GlobalFlags {
        GlobalFlags {
            format: self.format.unwrap_or(default_format),
        }
    }
}
