use anyhow::Context;
use symck_config::SymckConfig;
use symck_match::Scenario;

use super::load::build_compilation;
use crate::cli::{GlobalFlags, SourceArgs};
use crate::output::output;

/// Handle `symck check`. Returns whether every verdict passed.
pub fn handle(
    input: &SourceArgs,
    target: &str,
    candidates: &[String],
    expected_args: Option<usize>,
    config: &SymckConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<bool> {
    let compilation = build_compilation(input, &config.compilation)?;
    let scenario = Scenario::new(
        target,
        candidates.iter().cloned(),
        expected_args.unwrap_or(config.check.expected_argument_count),
    );
    let report = scenario
        .run(&compilation)
        .with_context(|| format!("failed to resolve names for target {target}"))?;

    output(&report, flags.format)?;
    Ok(report.passed())
}
