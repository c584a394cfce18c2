use symck_config::SymckConfig;
use symck_core::SemanticModel;
use symck_core::responses::{AttributesResponse, TypeSummary};

use super::load::build_compilation;
use crate::cli::{GlobalFlags, SourceArgs};
use crate::output::output;

/// Handle `symck attributes`.
pub fn handle(
    input: &SourceArgs,
    type_name: &str,
    config: &SymckConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<bool> {
    let compilation = build_compilation(input, &config.compilation)?;
    let target = compilation.resolve_type(type_name)?;
    let attributes = compilation.attributes_of(&target);
    output(
        &AttributesResponse {
            target: TypeSummary::from(&target),
            attributes,
        },
        flags.format,
    )?;
    Ok(true)
}
