//! JSON serialization types for terms and substitutions
//!
//! `Term` and `Substitution` (de)serialize through these shapes, so decoding goes
//! through the same arity and duplicate-binding checks as building them in code.

use crate::error::{Result, TermError};
use crate::fol::{Constant, FunctionSymbol, Substitution, Term, Variable};
use serde::{Deserialize, Serialize};

/// JSON representation of a term
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TermJson {
    Variable { name: String },
    Constant { name: String },
    Function { name: String, args: Vec<TermJson> },
}

impl From<&Term> for TermJson {
    fn from(term: &Term) -> Self {
        match term {
            Term::Variable(v) => TermJson::Variable {
                name: v.name.clone(),
            },
            Term::Constant(c) => TermJson::Constant {
                name: c.name.clone(),
            },
            Term::Function(app) => TermJson::Function {
                name: app.symbol().name().to_string(),
                args: app.args().iter().map(TermJson::from).collect(),
            },
        }
    }
}

impl From<Term> for TermJson {
    fn from(term: Term) -> Self {
        TermJson::from(&term)
    }
}

impl TryFrom<TermJson> for Term {
    type Error = TermError;

    fn try_from(json: TermJson) -> Result<Term> {
        match json {
            TermJson::Variable { name } => Ok(Term::Variable(Variable::new(name))),
            TermJson::Constant { name } => Ok(Term::Constant(Constant::new(name))),
            TermJson::Function { name, args } => {
                let args = args
                    .into_iter()
                    .map(Term::try_from)
                    .collect::<Result<Vec<_>>>()?;
                FunctionSymbol::new(name, args.len()).apply(args)
            }
        }
    }
}

/// JSON representation of a single binding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BindingJson {
    pub variable: String,
    pub term: TermJson,
}

/// JSON representation of a substitution, bindings in insertion order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubstitutionJson {
    #[serde(default)]
    pub bindings: Vec<BindingJson>,
}

impl From<&Substitution> for SubstitutionJson {
    fn from(subst: &Substitution) -> Self {
        SubstitutionJson {
            bindings: subst
                .iter()
                .map(|(var, term)| BindingJson {
                    variable: var.name.clone(),
                    term: TermJson::from(term),
                })
                .collect(),
        }
    }
}

impl From<Substitution> for SubstitutionJson {
    fn from(subst: Substitution) -> Self {
        SubstitutionJson::from(&subst)
    }
}

impl TryFrom<SubstitutionJson> for Substitution {
    type Error = TermError;

    fn try_from(json: SubstitutionJson) -> Result<Substitution> {
        let mut subst = Substitution::new();
        for binding in json.bindings {
            subst.add(Variable::new(binding.variable), Term::try_from(binding.term)?)?;
        }
        Ok(subst)
    }
}

/// Serialize a substitution to a JSON string
pub fn substitution_to_json(subst: &Substitution) -> Result<String> {
    Ok(serde_json::to_string(subst)?)
}

/// Parse a substitution from a JSON string
pub fn substitution_from_json(json: &str) -> Result<Substitution> {
    Ok(serde_json::from_str(json)?)
}

/// Serialize a term to a JSON string
pub fn term_to_json(term: &Term) -> Result<String> {
    Ok(serde_json::to_string(term)?)
}

/// Parse a term from a JSON string
pub fn term_from_json(json: &str) -> Result<Term> {
    Ok(serde_json::from_str(json)?)
}
