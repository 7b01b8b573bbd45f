//! Equations between terms

use super::substitution::Substitution;
use super::term::Term;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A pair of terms `left = right`. Never evaluated, only carried around and printed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Equation {
    pub left: Term,
    pub right: Term,
}

impl Equation {
    pub fn new(left: Term, right: Term) -> Self {
        Equation { left, right }
    }

    /// Apply a substitution to both sides
    pub fn apply_substitution(&self, subst: &Substitution) -> Equation {
        Equation {
            left: subst.apply(&self.left),
            right: subst.apply(&self.right),
        }
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.left, self.right)
    }
}
