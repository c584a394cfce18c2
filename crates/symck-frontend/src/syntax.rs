use std::path::Path;
use std::sync::Arc;

use ast_grep_core::{Doc, Node};

use crate::collect::{self, SourceUnit};
use crate::error::FrontendError;
use crate::parser::{detect_language, parse_source};

/// Path recorded for trees parsed from in-memory text.
pub const IN_MEMORY_PATH: &str = "<source>";

/// A parsed C# file and the declarations collected from it.
///
/// Cheap to clone; compilations derived from one another share trees.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    inner: Arc<TreeData>,
}

#[derive(Debug)]
struct TreeData {
    path: String,
    source: String,
    unit: SourceUnit,
    error_lines: Vec<u32>,
}

impl SyntaxTree {
    /// Parse in-memory source text.
    #[must_use]
    pub fn parse(source: &str) -> Self {
        Self::parse_with_path(source, IN_MEMORY_PATH)
    }

    #[must_use]
    pub fn parse_with_path(source: &str, path: impl Into<String>) -> Self {
        let path = path.into();
        let tree = parse_source(source);
        let root = tree.root();
        let unit = collect::collect(&root);
        let mut error_lines = Vec::new();
        gather_error_lines(&root, &mut error_lines);

        tracing::debug!(
            path = %path,
            types = unit.types.len(),
            syntax_errors = error_lines.len(),
            "parsed syntax tree"
        );

        Self {
            inner: Arc::new(TreeData {
                path,
                source: source.to_string(),
                unit,
                error_lines,
            }),
        }
    }

    /// Read and parse a `.cs` file.
    ///
    /// # Errors
    /// [`FrontendError::UnsupportedLanguage`] for non-C# paths and
    /// [`FrontendError::Io`] when the file cannot be read.
    pub fn from_file(path: &Path) -> Result<Self, FrontendError> {
        let display = path.to_string_lossy();
        if detect_language(&display).is_none() {
            return Err(FrontendError::UnsupportedLanguage(path.to_path_buf()));
        }
        let source = std::fs::read_to_string(path).map_err(|source| FrontendError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse_with_path(&source, display.into_owned()))
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.inner.path
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.inner.source
    }

    /// 1-based lines holding `ERROR` or missing nodes.
    #[must_use]
    pub fn syntax_error_lines(&self) -> &[u32] {
        &self.inner.error_lines
    }

    #[must_use]
    pub fn has_syntax_errors(&self) -> bool {
        !self.inner.error_lines.is_empty()
    }

    pub(crate) fn unit(&self) -> &SourceUnit {
        &self.inner.unit
    }
}

fn gather_error_lines<D: Doc>(node: &Node<D>, lines: &mut Vec<u32>) {
    for child in node.children() {
        if child.is_error() || child.is_missing() {
            lines.push(child.start_pos().line() as u32 + 1);
        }
        gather_error_lines(&child, lines);
    }
}
