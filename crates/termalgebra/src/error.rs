//! Error types for term construction and substitution handling

use crate::fol::Variable;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TermError {
    /// Wrong shape passed to a constructor or method, e.g. an arity mismatch
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// `add` called for a variable the substitution already binds
    #[error("Duplicate binding for variable {variable}")]
    DuplicateBinding { variable: Variable },

    /// Composition tried to reintroduce a key it had already bound.
    /// Not reachable from valid inputs.
    #[error("Internal invariant violation: {0}")]
    InternalInvariantViolation(String),

    #[error("JSON error: {0}")]
    Json(String),
}

impl From<serde_json::Error> for TermError {
    fn from(err: serde_json::Error) -> Self {
        TermError::Json(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TermError>;
