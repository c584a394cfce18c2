use std::path::PathBuf;

use clap::{Args, Subcommand};

/// `NAME=PATH`: compile `PATH` as assembly `NAME` and reference it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReferenceSpec {
    pub name: Option<String>,
    pub path: PathBuf,
}

/// Parse `--reference` values. A bare path names the assembly after the
/// file stem.
pub fn parse_reference(raw: &str) -> Result<ReferenceSpec, String> {
    match raw.split_once('=') {
        Some((name, path)) => {
            let name = name.trim();
            if name.is_empty() {
                return Err(format!("missing assembly name in '{raw}'"));
            }
            if path.trim().is_empty() {
                return Err(format!("missing path in '{raw}'"));
            }
            Ok(ReferenceSpec {
                name: Some(name.to_string()),
                path: PathBuf::from(path.trim()),
            })
        }
        None if raw.trim().is_empty() => Err("empty reference".to_string()),
        None => Ok(ReferenceSpec {
            name: None,
            path: PathBuf::from(raw.trim()),
        }),
    }
}

/// Sources and references that make up the compilation under test.
#[derive(Clone, Debug, Args)]
pub struct SourceArgs {
    /// C# source files of the compilation
    #[arg(short, long = "source", required = true, value_name = "FILE")]
    pub sources: Vec<PathBuf>,

    /// Referenced assembly as NAME=FILE (or FILE, named after its stem)
    #[arg(short, long = "reference", value_name = "NAME=FILE", value_parser = parse_reference)]
    pub references: Vec<ReferenceSpec>,

    /// Assembly name of the compilation (overrides config)
    #[arg(long)]
    pub assembly_name: Option<String>,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Resolve a type by fully-qualified metadata name
    Resolve {
        #[command(flatten)]
        input: SourceArgs,

        /// Metadata name, e.g. `Project.SimpleClass` or `Ns.Outer+Inner`
        type_name: String,
    },

    /// List the attributes applied to a type
    Attributes {
        #[command(flatten)]
        input: SourceArgs,

        type_name: String,
    },

    /// Match a type's attributes against expected classes and verify them
    Check {
        #[command(flatten)]
        input: SourceArgs,

        /// Annotated type to inspect
        #[arg(short, long)]
        target: String,

        /// Expected attribute class; order breaks simple-name ties
        #[arg(short, long = "candidate", required = true, value_name = "TYPE")]
        candidates: Vec<String>,

        /// Positional arguments each attribute must carry (overrides config)
        #[arg(long)]
        expected_args: Option<usize>,
    },

    /// Run the built-in SimpleClass regression scenario
    Demo,
}
