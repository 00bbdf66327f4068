//! Clauses and standardizing apart
//!
//! A clause is a head term plus an optional body goal; a head-only clause
//! is a fact. Clauses are immutable. Every fetch from the rule database
//! renames the clause through a fetch-local old-id → new-id table, so two
//! uses of the same clause within one proof never share variable identity.

use super::bindings::Bindings;
use super::goal::Goal;
use super::interner::{SymbolTable, VarId};
use super::term::{ListTerm, Term, Variable};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clause {
    pub head: Term,
    pub body: Option<Goal>,
}

impl Clause {
    pub fn fact(head: Term) -> Self {
        Clause { head, body: None }
    }

    pub fn rule(head: Term, body: Goal) -> Self {
        Clause {
            head,
            body: Some(body),
        }
    }

    pub fn is_fact(&self) -> bool {
        self.body.is_none()
    }

    /// Produce a copy with every variable consistently renamed to a fresh
    /// identity. The rename table lives only for this call: occurrences of
    /// one variable across head and body stay shared, while separate
    /// fetches never do.
    pub fn rename(&self, symbols: &mut SymbolTable) -> Clause {
        let mut table = HashMap::new();
        Clause {
            head: self.head.rename(&mut table, symbols),
            body: self
                .body
                .as_ref()
                .map(|goal| goal.rename(&mut table, symbols)),
        }
    }
}

/// Rename a single variable through the fetch-local table
fn rename_variable(
    var: Variable,
    table: &mut HashMap<VarId, VarId>,
    symbols: &mut SymbolTable,
) -> Variable {
    if let Some(&new_id) = table.get(&var.id) {
        return Variable::new(new_id);
    }
    let name = symbols.variable_name(var.id).to_string();
    let new_id = symbols.fresh_variable(&name);
    table.insert(var.id, new_id);
    Variable::new(new_id)
}

impl Term {
    /// Copy this term with variables renamed through the given table,
    /// minting fresh identities for unseen variables.
    pub fn rename(
        &self,
        table: &mut HashMap<VarId, VarId>,
        symbols: &mut SymbolTable,
    ) -> Term {
        match self {
            Term::Constant(c) => Term::Constant(*c),
            Term::Wildcard => Term::Wildcard,
            Term::Var(v) => Term::Var(rename_variable(*v, table, symbols)),
            Term::Compound(functor, args) => Term::Compound(
                *functor,
                args.iter().map(|arg| arg.rename(table, symbols)).collect(),
            ),
            Term::List(list) => Term::List(list.rename(table, symbols)),
        }
    }
}

impl ListTerm {
    pub fn rename(
        &self,
        table: &mut HashMap<VarId, VarId>,
        symbols: &mut SymbolTable,
    ) -> ListTerm {
        match self {
            ListTerm::Nil => ListTerm::Nil,
            ListTerm::Cons(head, tail) => ListTerm::Cons(
                Box::new(head.rename(table, symbols)),
                Box::new(tail.rename(table, symbols)),
            ),
            ListTerm::Tail(v) => ListTerm::Tail(rename_variable(*v, table, symbols)),
        }
    }
}

impl Goal {
    pub fn rename(
        &self,
        table: &mut HashMap<VarId, VarId>,
        symbols: &mut SymbolTable,
    ) -> Goal {
        match self {
            Goal::Call(term) => Goal::Call(term.rename(table, symbols)),
            Goal::And(goals) => Goal::And(
                goals.iter().map(|g| g.rename(table, symbols)).collect(),
            ),
            Goal::Or(goals) => Goal::Or(
                goals.iter().map(|g| g.rename(table, symbols)).collect(),
            ),
            Goal::Not(inner) => Goal::Not(Box::new(inner.rename(table, symbols))),
            Goal::Cut => Goal::Cut,
            Goal::Builtin { functor, args } => Goal::Builtin {
                functor: *functor,
                args: args.iter().map(|arg| arg.rename(table, symbols)).collect(),
            },
        }
    }

    /// Whether every term in this goal is ground under the environment
    pub fn is_ground(&self, env: &Bindings) -> bool {
        match self {
            Goal::Call(term) => env.is_ground(term),
            Goal::And(goals) | Goal::Or(goals) => goals.iter().all(|g| g.is_ground(env)),
            Goal::Not(inner) => inner.is_ground(env),
            Goal::Cut => true,
            Goal::Builtin { args, .. } => args.iter().all(|arg| env.is_ground(arg)),
        }
    }
}
