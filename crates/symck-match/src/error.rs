//! Generator error types.

use symck_core::ResolveError;

/// Why a generator's execute step failed.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("{0}")]
    Failed(String),
}
