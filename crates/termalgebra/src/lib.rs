//! termalgebra: first-order terms and substitutions
//!
//! This library provides the substratum for unification-style reasoning:
//! term construction with arity checking, structural equality, application of
//! substitutions to terms and composition of substitutions.

pub mod config;
pub mod error;
pub mod fol;
pub mod json;

// Re-export commonly used types from fol
pub use fol::{Application, Constant, Equation, FunctionSymbol, Substitution, Term, Variable};

pub use config::CompositionConfig;
pub use error::{Result, TermError};
