//! First-order logic data structures
//!
//! This module provides the fundamental types for equational reasoning:
//! terms, equations and substitutions.

pub mod equation;
pub mod substitution;
pub mod term;


// Re-export commonly used types
pub use equation::Equation;
pub use substitution::Substitution;
pub use term::{Application, Constant, FunctionSymbol, Term, Variable};
