use symck_config::SymckConfig;
use symck_core::SemanticModel;
use symck_core::responses::{ResolveResponse, TypeSummary};

use super::load::build_compilation;
use crate::cli::{GlobalFlags, SourceArgs};
use crate::output::output;

/// Handle `symck resolve`.
pub fn handle(
    input: &SourceArgs,
    type_name: &str,
    config: &SymckConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<bool> {
    let compilation = build_compilation(input, &config.compilation)?;
    let handle = compilation.resolve_type(type_name)?;
    output(
        &ResolveResponse {
            resolved: TypeSummary::from(&handle),
        },
        flags.format,
    )?;
    Ok(true)
}
