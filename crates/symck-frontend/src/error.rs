//! Front-end error types.

use std::path::PathBuf;

/// Errors raised while loading sources or references.
#[derive(Debug, thiserror::Error)]
pub enum FrontendError {
    #[error("Not a C# source file: {}", .0.display())]
    UnsupportedLanguage(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
