use anyhow::Context;
use symck_config::CompilationConfig;
use symck_core::AssemblyIdentity;
use symck_frontend::{Compilation, MetadataReference, SyntaxTree};

use crate::cli::SourceArgs;

/// Compile `--source` files against `--reference` assemblies.
///
/// References are compiled in the order given; each one can see the core
/// library and the references before it.
pub fn build_compilation(
    input: &SourceArgs,
    config: &CompilationConfig,
) -> anyhow::Result<Compilation> {
    let mut references = Vec::new();
    if config.include_core_library {
        references.push(MetadataReference::core_library());
    }

    for spec in &input.references {
        let reference =
            MetadataReference::from_file(&spec.path, spec.name.as_deref(), references.clone())
                .with_context(|| format!("failed to load reference {}", spec.path.display()))?;
        tracing::debug!(assembly = %reference.assembly(), path = %spec.path.display(), "loaded reference");
        references.push(reference);
    }

    let trees = input
        .sources
        .iter()
        .map(|path| {
            SyntaxTree::from_file(path)
                .with_context(|| format!("failed to load source {}", path.display()))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let name = input
        .assembly_name
        .clone()
        .unwrap_or_else(|| config.assembly_name.clone());
    let assembly = AssemblyIdentity::new(name, config.version.clone());

    Ok(Compilation::create(assembly, trees, references))
}
