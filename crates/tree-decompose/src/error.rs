//! Error types for tree decomposition.

use thiserror::Error;

/// Errors that abort a decomposition call. No partial result is returned
/// alongside any of them.
#[derive(Error, Debug)]
pub enum DecomposeError {
    /// The input buffer was not syntactically valid JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The tree nests deeper than the configured limit.
    /// `path` is the location of the first node past the limit.
    #[error("maximum nesting depth of {limit} exceeded at '{path}'")]
    DepthExceeded { limit: usize, path: String },
}

/// Convenience alias used throughout tree-decompose.
pub type Result<T> = std::result::Result<T, DecomposeError>;
