//! Binding environments
//!
//! A `Bindings` value maps variable identities to the terms they are bound
//! to. Environments are never shared mutably: the solver extends a clone
//! and discards it wholesale when a search path fails, so every holder of
//! an older environment keeps seeing exactly the bindings it saw when the
//! environment was produced.

use super::interner::VarId;
use super::term::{ListTerm, Term, Variable};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An append-only mapping from variable id to bound term
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bindings {
    map: HashMap<VarId, Term>,
}

impl Bindings {
    pub fn new() -> Self {
        Bindings::default()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// The term a variable is directly bound to, if any
    pub fn get(&self, var: VarId) -> Option<&Term> {
        self.map.get(&var)
    }

    /// Bind an unbound variable.
    ///
    /// Binding an already-bound variable is an invariant violation, not a
    /// unification failure; callers must dereference first.
    pub fn bind(&mut self, var: Variable, term: Term) {
        let previous = self.map.insert(var.id, term);
        assert!(
            previous.is_none(),
            "rebinding bound variable {:?}",
            var.id
        );
    }

    /// Follow bound-variable chains until reaching a non-variable term or
    /// an unbound variable. Shallow: sub-terms are not rewritten.
    pub fn resolve<'a>(&'a self, term: &'a Term) -> &'a Term {
        let mut cur = term;
        while let Term::Var(v) = cur {
            match self.map.get(&v.id) {
                Some(next) => cur = next,
                None => return cur,
            }
        }
        cur
    }

    /// Resolve a variable id through binding chains. `None` if the
    /// variable is unbound; `Some(Term::Var(_))` if it resolves to a
    /// different, still-unbound variable.
    pub fn resolve_var(&self, var: VarId) -> Option<&Term> {
        let mut cur = self.map.get(&var)?;
        loop {
            match cur {
                Term::Var(v) => match self.map.get(&v.id) {
                    Some(next) => cur = next,
                    None => return Some(cur),
                },
                _ => return Some(cur),
            }
        }
    }

    /// Fully substitute bound variables throughout a term. Unbound
    /// variables remain as themselves.
    pub fn substitute(&self, term: &Term) -> Term {
        match self.resolve(term) {
            Term::Constant(c) => Term::Constant(*c),
            Term::Var(v) => Term::Var(*v),
            Term::Wildcard => Term::Wildcard,
            Term::Compound(functor, args) => Term::Compound(
                *functor,
                args.iter().map(|arg| self.substitute(arg)).collect(),
            ),
            Term::List(list) => Term::List(self.substitute_list(list)),
        }
    }

    fn substitute_list(&self, list: &ListTerm) -> ListTerm {
        match list {
            ListTerm::Nil => ListTerm::Nil,
            ListTerm::Cons(head, tail) => ListTerm::Cons(
                Box::new(self.substitute(head)),
                Box::new(self.substitute_list(tail)),
            ),
            ListTerm::Tail(v) => match self.resolve_var(v.id) {
                Some(Term::List(bound)) => self.substitute_list(bound),
                Some(Term::Var(unbound)) => ListTerm::Tail(*unbound),
                // A tail variable only ever unifies with lists or
                // variables; anything else cannot arise.
                _ => ListTerm::Tail(*v),
            },
        }
    }

    /// Whether a term is ground under this environment: following bound
    /// variables resolves every position to a non-variable value.
    pub fn is_ground(&self, term: &Term) -> bool {
        match self.resolve(term) {
            Term::Constant(_) | Term::Wildcard => true,
            Term::Var(_) => false,
            Term::Compound(_, args) => args.iter().all(|arg| self.is_ground(arg)),
            Term::List(list) => self.is_ground_list(list),
        }
    }

    fn is_ground_list(&self, list: &ListTerm) -> bool {
        match list {
            ListTerm::Nil => true,
            ListTerm::Cons(head, tail) => self.is_ground(head) && self.is_ground_list(tail),
            ListTerm::Tail(v) => match self.resolve_var(v.id) {
                Some(Term::List(bound)) => self.is_ground_list(bound),
                _ => false,
            },
        }
    }

    /// Iterate over directly-bound variables
    pub fn iter(&self) -> impl Iterator<Item = (VarId, &Term)> {
        self.map.iter().map(|(id, term)| (*id, term))
    }
}
