//! Metadata references: assemblies that are already compiled.

use std::path::Path;
use std::sync::{Arc, OnceLock};

use semver::Version;
use symck_core::{AssemblyIdentity, ContextId, MetadataName};

use crate::compilation::{AssemblyData, Compilation, DeclaredType};
use crate::error::FrontendError;
use crate::syntax::SyntaxTree;

const CORE_LIBRARY_SOURCE: &str = include_str!("../corlib/System.cs");
const CORE_LIBRARY_NAME: &str = "System.Runtime";

static CORE_LIBRARY: OnceLock<MetadataReference> = OnceLock::new();

/// An emitted assembly a compilation can reference.
///
/// Its types and their attributes were bound when it was compiled, inside
/// its own context. Clones share the same data.
#[derive(Debug, Clone)]
pub struct MetadataReference {
    data: Arc<AssemblyData>,
}

impl MetadataReference {
    pub(crate) const fn from_data(data: Arc<AssemblyData>) -> Self {
        Self { data }
    }

    /// Emit a compilation as a reference.
    #[must_use]
    pub fn from_compilation(compilation: &Compilation) -> Self {
        compilation.to_metadata_reference()
    }

    /// Compile `source` as assembly `assembly` and reference the result.
    #[must_use]
    pub fn from_source(
        assembly: AssemblyIdentity,
        source: &str,
        references: Vec<MetadataReference>,
    ) -> Self {
        Compilation::create(assembly, vec![SyntaxTree::parse(source)], references)
            .to_metadata_reference()
    }

    /// Compile a `.cs` file and reference the result.
    ///
    /// The assembly is named `assembly_name`, or after the file stem when
    /// `None`.
    ///
    /// # Errors
    /// Returns [`FrontendError`] if the file is not C# or cannot be read.
    pub fn from_file(
        path: &Path,
        assembly_name: Option<&str>,
        references: Vec<MetadataReference>,
    ) -> Result<Self, FrontendError> {
        let tree = SyntaxTree::from_file(path)?;
        let name = assembly_name.map_or_else(
            || {
                path.file_stem()
                    .map_or_else(|| "Reference".to_string(), |s| s.to_string_lossy().into_owned())
            },
            ToString::to_string,
        );
        Ok(Compilation::create(AssemblyIdentity::named(name), vec![tree], references)
            .to_metadata_reference())
    }

    /// The built-in core library (`System.Object`, `System.Attribute`,
    /// primitives and common attributes).
    ///
    /// Compiled once per process; every call returns the same context.
    #[must_use]
    pub fn core_library() -> Self {
        CORE_LIBRARY
            .get_or_init(|| {
                Self::from_source(
                    AssemblyIdentity::new(CORE_LIBRARY_NAME, Version::new(8, 0, 0)),
                    CORE_LIBRARY_SOURCE,
                    Vec::new(),
                )
            })
            .clone()
    }

    #[must_use]
    pub fn assembly(&self) -> &AssemblyIdentity {
        &self.data.assembly
    }

    /// Context the reference's own types were bound in.
    #[must_use]
    pub fn context(&self) -> ContextId {
        self.data.context
    }

    #[must_use]
    pub fn type_count(&self) -> usize {
        self.data.types.len()
    }

    /// Whether the assembly declares `metadata_name`.
    #[must_use]
    pub fn declares(&self, metadata_name: &str) -> bool {
        MetadataName::parse(metadata_name)
            .ok()
            .and_then(|name| self.index_of(&name))
            .is_some()
    }

    pub(crate) fn index_of(&self, name: &MetadataName) -> Option<usize> {
        self.data.index.get(name).copied()
    }

    pub(crate) fn declared(&self, index: usize) -> &DeclaredType {
        &self.data.types[index]
    }

    pub(crate) fn data(&self) -> &AssemblyData {
        &self.data
    }
}
