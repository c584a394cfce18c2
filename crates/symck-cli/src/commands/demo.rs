use anyhow::Context;
use symck_config::SymckConfig;
use symck_core::AssemblyIdentity;
use symck_frontend::{Compilation, MetadataReference, SyntaxTree};
use symck_match::{AttributePairingGenerator, Generator, GeneratorDriver, Scenario};

use crate::cli::GlobalFlags;
use crate::output::output;

const LIBRARY_ASSEMBLY: &str = "RoslynBug";
const PROGRAM_ASSEMBLY: &str = "SourceGeneratorTests";

const LIBRARY_SOURCE: &str = r"
using System;

namespace RoslynBug
{
    public sealed class FromAnotherAssemblyAttribute : Attribute
    {
        public FromAnotherAssemblyAttribute(int arg) { }
    }
}
";

const PROGRAM_SOURCE: &str = r"
namespace Project
{
    using RoslynBug;
    using System;

    [FromAnotherAssembly(10)]
    [FromCurrentAssembly(10)]
    public class SimpleClass { }

    public sealed class FromCurrentAssemblyAttribute : Attribute
    {
        public FromCurrentAssemblyAttribute(int arg) { }
    }
}
";

/// The program referencing the attribute library.
pub fn compilation() -> Compilation {
    let core = MetadataReference::core_library();
    let library = MetadataReference::from_source(
        AssemblyIdentity::named(LIBRARY_ASSEMBLY),
        LIBRARY_SOURCE,
        vec![core.clone()],
    );
    Compilation::create(
        AssemblyIdentity::named(PROGRAM_ASSEMBLY),
        vec![SyntaxTree::parse_with_path(PROGRAM_SOURCE, "SimpleClass.cs")],
        vec![core, library],
    )
}

pub fn scenario(config: &SymckConfig) -> Scenario {
    Scenario::new(
        "Project.SimpleClass",
        [
            "Project.FromCurrentAssemblyAttribute",
            "RoslynBug.FromAnotherAssemblyAttribute",
        ],
        config.check.expected_argument_count,
    )
}

/// Handle `symck demo`: run the scenario inside a generator pass, then
/// report the verdicts.
pub fn handle(config: &SymckConfig, flags: &GlobalFlags) -> anyhow::Result<bool> {
    let compilation = compilation();
    let scenario = scenario(config);

    let mut generator = AttributePairingGenerator::new(scenario.clone());
    let mut generators: [&mut dyn Generator; 1] = [&mut generator];
    let run = GeneratorDriver::run(&compilation, &mut generators);
    for diagnostic in &run.diagnostics {
        tracing::warn!(%diagnostic, "generator diagnostic");
    }
    tracing::info!(pairs = generator.pairs().len(), "generator pass finished");

    let report = scenario
        .run(&compilation)
        .context("demo scenario failed to resolve")?;
    output(&report, flags.format)?;
    Ok(report.passed())
}
