//! Variable substitutions

use super::equation::Equation;
use super::term::{Term, Variable};
use crate::config::CompositionConfig;
use crate::error::{Result, TermError};
use crate::json::SubstitutionJson;
use indexmap::IndexMap;
use log::trace;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A substitution mapping variables to terms.
///
/// Keys are unique. Insertion order is kept for rendering and iteration but plays no
/// part in lookup, and `==` compares substitutions as sets of bindings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SubstitutionJson", into = "SubstitutionJson")]
pub struct Substitution {
    map: IndexMap<Variable, Term>,
}

impl Substitution {
    /// Create a new empty substitution
    pub fn new() -> Self {
        Substitution {
            map: IndexMap::new(),
        }
    }

    /// Create a substitution with a single binding
    pub fn singleton(var: Variable, term: Term) -> Self {
        let mut map = IndexMap::with_capacity(1);
        map.insert(var, term);
        Substitution { map }
    }

    /// Build a substitution from ordered pairs, rejecting repeated variables
    pub fn from_bindings(bindings: impl IntoIterator<Item = (Variable, Term)>) -> Result<Self> {
        let mut subst = Substitution::new();
        for (var, term) in bindings {
            subst.add(var, term)?;
        }
        Ok(subst)
    }

    /// Append `var -> term`.
    ///
    /// Fails with [`TermError::DuplicateBinding`] if `var` is already bound; the
    /// substitution is left unchanged in that case.
    pub fn add(&mut self, var: Variable, term: Term) -> Result<()> {
        if self.map.contains_key(&var) {
            return Err(TermError::DuplicateBinding { variable: var });
        }
        self.map.insert(var, term);
        Ok(())
    }

    /// Remove the binding for `var`, keeping the order of the others.
    /// Removing an unbound variable is a no-op. Returns the removed term, if any.
    pub fn remove(&mut self, var: &Variable) -> Option<Term> {
        self.map.shift_remove(var)
    }

    /// Check if a variable is bound
    pub fn contains(&self, var: &Variable) -> bool {
        self.map.contains_key(var)
    }

    /// Get the term for a variable, if bound
    pub fn get(&self, var: &Variable) -> Option<&Term> {
        self.map.get(var)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Bindings in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&Variable, &Term)> {
        self.map.iter()
    }

    /// Bound variables in insertion order
    pub fn domain(&self) -> impl Iterator<Item = &Variable> {
        self.map.keys()
    }

    /// Distinct variables occurring in the bound terms
    pub fn range_variables(&self) -> Vec<Variable> {
        let mut vars: Vec<Variable> = Vec::new();
        for term in self.map.values() {
            for var in term.variables() {
                if !vars.contains(&var) {
                    vars.push(var);
                }
            }
        }
        vars
    }

    /// Apply this substitution to a term, returning a fresh tree
    pub fn apply(&self, term: &Term) -> Term {
        if self.map.is_empty() {
            return term.clone();
        }
        self.apply_nonempty(term)
    }

    fn apply_nonempty(&self, term: &Term) -> Term {
        match term {
            Term::Variable(v) => self.map.get(v).cloned().unwrap_or_else(|| term.clone()),
            Term::Constant(_) => term.clone(),
            Term::Function(app) => Term::Function(app.map_args(|arg| self.apply_nonempty(arg))),
        }
    }

    /// Apply this substitution to both sides of an equation
    pub fn apply_to_equation(&self, equation: &Equation) -> Equation {
        equation.apply_substitution(self)
    }

    /// Compose with the default configuration.
    ///
    /// The result behaves like applying `self` first and then `other`:
    /// `self.compose(other)?.apply(t) == other.apply(&self.apply(t))`.
    pub fn compose(&self, other: &Substitution) -> Result<Substitution> {
        self.compose_with(other, &CompositionConfig::default())
    }

    /// Compose two substitutions (Baader–Snyder).
    ///
    /// 1. rewrite every term bound by `self` under `other`, giving `R`
    /// 2. drop from a copy `S` of `other` every variable bound in `R`
    /// 3. drop the trivial bindings `x -> x` from `R`
    ///    (and from `S` if `config.prune_trivial_right` is set)
    /// 4. append what is left of `S` after `R`
    pub fn compose_with(
        &self,
        other: &Substitution,
        config: &CompositionConfig,
    ) -> Result<Substitution> {
        if self.is_empty() {
            trace!("compose: left side empty, result is {}", other);
            return Ok(other.clone());
        }

        let mut rewritten = Substitution::new();
        for (var, term) in &self.map {
            rewritten.add_internal(var.clone(), other.apply(term))?;
        }
        trace!("compose: {} rewritten under {} is {}", self, other, rewritten);

        let mut surviving = other.clone();
        for var in rewritten.map.keys() {
            if let Some(dropped) = surviving.remove(var) {
                trace!("compose: {} -> {} shadowed by left side", var, dropped);
            }
        }

        rewritten.prune_trivial();
        if config.prune_trivial_right {
            surviving.prune_trivial();
        }

        for (var, term) in surviving.map {
            rewritten.add_internal(var, term)?;
        }
        trace!("compose: result {}", rewritten);
        Ok(rewritten)
    }

    /// Remove every binding `x -> x`
    fn prune_trivial(&mut self) {
        self.map.retain(|var, term| {
            let trivial = term.is_trivial_binding_of(var);
            if trivial {
                trace!("compose: pruned trivial binding {} -> {}", var, term);
            }
            !trivial
        });
    }

    /// `add` for keys the caller has already made unique; a clash is a bug here
    fn add_internal(&mut self, var: Variable, term: Term) -> Result<()> {
        self.add(var, term).map_err(|err| {
            TermError::InternalInvariantViolation(format!("composition produced a clash: {}", err))
        })
    }
}

impl<'a> IntoIterator for &'a Substitution {
    type Item = (&'a Variable, &'a Term);
    type IntoIter = indexmap::map::Iter<'a, Variable, Term>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.iter()
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (var, term)) in self.map.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} -> {}", var, term)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fol::FunctionSymbol;

    /// Signature used by the published composition example
    struct TestContext {
        f: FunctionSymbol,
        g: FunctionSymbol,
    }

    impl TestContext {
        fn new() -> Self {
            TestContext {
                f: FunctionSymbol::new("f", 1),
                g: FunctionSymbol::new("g", 2),
            }
        }

        fn f(&self, a: Term) -> Term {
            self.f.apply(vec![a]).unwrap()
        }

        fn g(&self, a: Term, b: Term) -> Term {
            self.g.apply(vec![a, b]).unwrap()
        }
    }

    fn var(name: &str) -> Variable {
        Variable::new(name)
    }

    fn v(name: &str) -> Term {
        Term::variable(name)
    }

    fn c(name: &str) -> Term {
        Term::constant(name)
    }

    #[test]
    fn test_add_and_lookup() {
        let mut subst = Substitution::new();
        subst.add(var("x"), c("a")).unwrap();

        assert!(subst.contains(&var("x")));
        assert!(!subst.contains(&var("y")));
        assert_eq!(subst.get(&var("x")), Some(&c("a")));
        assert_eq!(subst.get(&var("y")), None);
        assert_eq!(subst.len(), 1);
    }

    #[test]
    fn test_add_duplicate_leaves_substitution_unchanged() {
        let mut subst = Substitution::new();
        subst.add(var("x"), c("a")).unwrap();
        subst.add(var("y"), c("b")).unwrap();
        let before = subst.to_string();

        let err = subst.add(var("x"), c("c")).unwrap_err();
        assert_eq!(err, TermError::DuplicateBinding { variable: var("x") });
        assert_eq!(subst.to_string(), before);
    }

    #[test]
    fn test_remove_keeps_order_and_ignores_unbound() {
        let mut subst = Substitution::from_bindings(vec![
            (var("x"), c("a")),
            (var("y"), c("b")),
            (var("z"), c("c")),
        ])
        .unwrap();
        assert_eq!(subst.remove(&var("w")), None);
        assert_eq!(subst.remove(&var("y")), Some(c("b")));
        assert_eq!(subst.to_string(), "{x -> a, z -> c}");
        assert!(!subst.contains(&var("y")));
    }

    #[test]
    fn test_display() {
        let ctx = TestContext::new();
        let subst = Substitution::from_bindings(vec![
            (var("x"), ctx.g(v("y"), c("c"))),
            (var("y"), c("a")),
        ])
        .unwrap();
        assert_eq!(subst.to_string(), "{x -> g(y,c), y -> a}");
        assert_eq!(Substitution::new().to_string(), "{}");
    }

    #[test]
    fn test_apply_empty_is_identity() {
        let ctx = TestContext::new();
        let t = ctx.g(v("x"), ctx.f(c("a")));
        assert_eq!(Substitution::new().apply(&t), t);
    }

    #[test]
    fn test_apply_recursive() {
        let ctx = TestContext::new();
        let subst =
            Substitution::from_bindings(vec![(var("x"), c("a")), (var("y"), ctx.f(v("z")))])
                .unwrap();
        let t = ctx.g(v("x"), ctx.f(v("y")));
        assert_eq!(subst.apply(&t).to_string(), "g(a,f(f(z)))");
        assert_eq!(subst.apply(&c("x")), c("x"));
        assert_eq!(subst.apply(&v("w")), v("w"));
    }

    #[test]
    fn test_apply_is_single_pass() {
        // {x -> y, y -> a} maps x to y, not to a
        let subst =
            Substitution::from_bindings(vec![(var("x"), v("y")), (var("y"), c("a"))]).unwrap();
        assert_eq!(subst.apply(&v("x")), v("y"));
    }

    #[test]
    fn test_compose_published_example() {
        let ctx = TestContext::new();
        let sigma1 = Substitution::singleton(var("x"), ctx.g(v("y"), c("c")));
        let sigma2 = Substitution::singleton(var("y"), c("a"));

        let composed = sigma1.compose(&sigma2).unwrap();
        assert_eq!(composed.to_string(), "{x -> g(a,c), y -> a}");
        assert_eq!(composed.apply(&ctx.f(v("x"))).to_string(), "f(g(a,c))");
    }

    #[test]
    fn test_compose_left_empty_copies_right() {
        let subst =
            Substitution::from_bindings(vec![(var("x"), c("a")), (var("y"), v("y"))]).unwrap();
        let composed = Substitution::new().compose(&subst).unwrap();
        assert_eq!(composed.to_string(), subst.to_string());
    }

    #[test]
    fn test_compose_right_empty_drops_trivial() {
        let subst =
            Substitution::from_bindings(vec![(var("x"), v("x")), (var("y"), c("b"))]).unwrap();
        let composed = subst.compose(&Substitution::new()).unwrap();
        assert_eq!(composed.to_string(), "{y -> b}");
    }

    #[test]
    fn test_compose_left_domain_takes_precedence() {
        let sigma1 = Substitution::singleton(var("x"), v("y"));
        let sigma2 =
            Substitution::from_bindings(vec![(var("x"), c("b")), (var("y"), c("a"))]).unwrap();

        let composed = sigma1.compose(&sigma2).unwrap();
        assert_eq!(composed.get(&var("x")), Some(&c("a")));
        assert_eq!(composed.to_string(), "{x -> a, y -> a}");
    }

    #[test]
    fn test_compose_removes_bindings_that_become_trivial() {
        // x -> y then y -> x: x maps back to itself
        let sigma1 = Substitution::singleton(var("x"), v("y"));
        let sigma2 = Substitution::singleton(var("y"), v("x"));

        let composed = sigma1.compose(&sigma2).unwrap();
        assert!(!composed.contains(&var("x")));
        assert_eq!(composed.to_string(), "{y -> x}");
    }

    #[test]
    fn test_compose_keeps_trivial_right_bindings_by_default() {
        let sigma1 = Substitution::singleton(var("x"), c("a"));
        let sigma2 = Substitution::singleton(var("y"), v("y"));

        let composed = sigma1.compose(&sigma2).unwrap();
        assert_eq!(composed.to_string(), "{x -> a, y -> y}");

        let config = CompositionConfig {
            prune_trivial_right: true,
        };
        let pruned = sigma1.compose_with(&sigma2, &config).unwrap();
        assert_eq!(pruned.to_string(), "{x -> a}");
    }

    #[test]
    fn test_compose_does_not_mutate_operands() {
        let ctx = TestContext::new();
        let sigma1 = Substitution::singleton(var("x"), ctx.f(v("y")));
        let sigma2 = Substitution::singleton(var("y"), c("a"));
        let (before1, before2) = (sigma1.to_string(), sigma2.to_string());

        let _ = sigma1.compose(&sigma2).unwrap();
        assert_eq!(sigma1.to_string(), before1);
        assert_eq!(sigma2.to_string(), before2);
    }

    #[test]
    fn test_equality_ignores_insertion_order() {
        let s1 =
            Substitution::from_bindings(vec![(var("x"), c("a")), (var("y"), c("b"))]).unwrap();
        let s2 =
            Substitution::from_bindings(vec![(var("y"), c("b")), (var("x"), c("a"))]).unwrap();
        assert_eq!(s1, s2);
        assert_ne!(s1.to_string(), s2.to_string());
    }

    #[test]
    fn test_range_variables() {
        let ctx = TestContext::new();
        let subst = Substitution::from_bindings(vec![
            (var("x"), ctx.g(v("z"), v("w"))),
            (var("y"), ctx.f(v("z"))),
        ])
        .unwrap();
        assert_eq!(subst.range_variables(), vec![var("z"), var("w")]);
        assert_eq!(
            subst.domain().cloned().collect::<Vec<_>>(),
            vec![var("x"), var("y")]
        );
    }
}
