//! ast-grep wrapper and source-file detection.

use ast_grep_core::tree_sitter::StrDoc;
use ast_grep_language::SupportLang;

/// The concrete AST tree type returned by `parse_source`.
pub type AstTree = ast_grep_core::AstGrep<StrDoc<SupportLang>>;

/// Detect whether a path names a C# source file.
///
/// Returns `None` for any other extension; C# is the only language the
/// front end binds.
#[must_use]
pub fn detect_language(file_path: &str) -> Option<SupportLang> {
    let (_, ext) = file_path.rsplit_once('.')?;
    match ext {
        "cs" | "csx" => Some(SupportLang::CSharp),
        _ => None,
    }
}

/// Parse C# source into an ast-grep tree.
#[must_use]
pub fn parse_source(source: &str) -> AstTree {
    use ast_grep_language::LanguageExt;
    SupportLang::CSharp.ast_grep(source)
}
