//! Terms in first-order logic

use crate::error::{Result, TermError};
use crate::json::TermJson;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A variable in first-order logic. Identity is by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
}

impl Variable {
    pub fn new(name: impl Into<String>) -> Self {
        Variable { name: name.into() }
    }
}

/// A constant symbol. Identity is by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Constant {
    pub name: String,
}

impl Constant {
    pub fn new(name: impl Into<String>) -> Self {
        Constant { name: name.into() }
    }
}

/// A function symbol with arity.
///
/// Two symbols are equal iff both name and arity match. Fields are private so a
/// symbol cannot change once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionSymbol {
    name: String,
    arity: usize,
}

impl FunctionSymbol {
    pub fn new(name: impl Into<String>, arity: usize) -> Self {
        FunctionSymbol {
            name: name.into(),
            arity,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Build the application `self(args...)`.
    ///
    /// Fails with [`TermError::InvalidArgument`] when `args.len()` differs from the arity.
    pub fn apply(&self, args: Vec<Term>) -> Result<Term> {
        Application::new(self.clone(), args).map(Term::Function)
    }
}

/// A function symbol applied to exactly `symbol.arity()` arguments.
///
/// The arity invariant is checked in [`Application::new`]; there is no other way
/// to build one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Application {
    symbol: FunctionSymbol,
    args: Vec<Term>,
}

impl Application {
    pub fn new(symbol: FunctionSymbol, args: Vec<Term>) -> Result<Self> {
        if args.len() != symbol.arity {
            return Err(TermError::InvalidArgument(format!(
                "function symbol {}/{} applied to {} argument(s)",
                symbol.name,
                symbol.arity,
                args.len()
            )));
        }
        Ok(Application { symbol, args })
    }

    pub fn symbol(&self) -> &FunctionSymbol {
        &self.symbol
    }

    pub fn args(&self) -> &[Term] {
        &self.args
    }

    /// Rebuild with the same symbol, mapping each argument. Arity is preserved.
    pub(crate) fn map_args(&self, f: impl FnMut(&Term) -> Term) -> Application {
        Application {
            symbol: self.symbol.clone(),
            args: self.args.iter().map(f).collect(),
        }
    }
}

/// A term in first-order logic
///
/// Equality (`==`) is structural: variables and constants compare by name,
/// applications by symbol (name and arity) and then argument by argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TermJson", into = "TermJson")]
pub enum Term {
    Variable(Variable),
    Constant(Constant),
    Function(Application),
}

impl Term {
    pub fn variable(name: impl Into<String>) -> Self {
        Term::Variable(Variable::new(name))
    }

    pub fn constant(name: impl Into<String>) -> Self {
        Term::Constant(Constant::new(name))
    }

    /// Apply `symbol` to `args`, checking the arity.
    pub fn function(symbol: &FunctionSymbol, args: Vec<Term>) -> Result<Self> {
        symbol.apply(args)
    }

    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Term::Variable(v) => Some(v),
            _ => None,
        }
    }

    /// True if this term is exactly the variable `var`, i.e. `var -> self` is a no-op binding.
    pub fn is_trivial_binding_of(&self, var: &Variable) -> bool {
        matches!(self, Term::Variable(v) if v == var)
    }

    /// Distinct variables of this term, in order of first occurrence
    pub fn variables(&self) -> Vec<Variable> {
        let mut vars = Vec::new();
        self.collect_variables(&mut vars);
        vars
    }

    fn collect_variables(&self, vars: &mut Vec<Variable>) {
        match self {
            Term::Variable(v) => {
                if !vars.contains(v) {
                    vars.push(v.clone());
                }
            }
            Term::Constant(_) => {}
            Term::Function(app) => {
                for arg in app.args() {
                    arg.collect_variables(vars);
                }
            }
        }
    }

    pub fn is_ground(&self) -> bool {
        match self {
            Term::Variable(_) => false,
            Term::Constant(_) => true,
            Term::Function(app) => app.args().iter().all(Term::is_ground),
        }
    }

    /// Check whether `var` occurs anywhere in this term
    pub fn occurs(&self, var: &Variable) -> bool {
        match self {
            Term::Variable(v) => v == var,
            Term::Constant(_) => false,
            Term::Function(app) => app.args().iter().any(|arg| arg.occurs(var)),
        }
    }
}

impl From<Variable> for Term {
    fn from(var: Variable) -> Self {
        Term::Variable(var)
    }
}

impl From<Constant> for Term {
    fn from(c: Constant) -> Self {
        Term::Constant(c)
    }
}

// Display implementations for pretty printing

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Display for FunctionSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.arity)
    }
}

impl fmt::Display for Application {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 0-ary applications print like constants
        if self.args.is_empty() {
            return write!(f, "{}", self.symbol.name);
        }
        write!(f, "{}(", self.symbol.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", arg)?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Variable(v) => write!(f, "{}", v),
            Term::Constant(c) => write!(f, "{}", c),
            Term::Function(app) => write!(f, "{}", app),
        }
    }
}
