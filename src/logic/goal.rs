//! Goals: the provable things
//!
//! A goal is what the engine can try to prove. Control structure is a
//! tagged enum rather than a hierarchy of node classes; the solver
//! dispatches on the variant. Assembly turns a body or query term into a
//! goal by recognizing the control functors and registered builtins.

use super::interner::SymbolTable;
use super::term::{Functor, Term, Variable};
use crate::builtins::BuiltinRegistry;
use crate::error::SolveError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Goal {
    /// Prove a predicate against the rule database
    Call(Term),
    /// Prove every goal, left to right, with backtracking
    And(Vec<Goal>),
    /// Prove any goal, in declaration order, never interleaved
    Or(Vec<Goal>),
    /// Succeed once iff the operand has no solution
    Not(Box<Goal>),
    /// Commit to the current proof path
    Cut,
    /// A native predicate call
    Builtin { functor: Functor, args: Vec<Term> },
}

impl Goal {
    /// Assemble a goal from a body or query term.
    ///
    /// Recognizes `','`/`';'` compounds (flattened), `not/1`, the cut atom
    /// (`!`, with `cut` accepted as an alias), and registered builtin
    /// signatures. A builtin name used at an unregistered arity is a
    /// structural error here, before any search begins.
    pub fn assemble(
        term: &Term,
        symbols: &SymbolTable,
        builtins: &BuiltinRegistry,
    ) -> Result<Goal, SolveError> {
        match term {
            Term::Compound(functor, args) => {
                let name = symbols.functor_name(functor.id);
                match (name, args.len()) {
                    (",", 2) => {
                        let mut goals = Vec::new();
                        for arg in args {
                            match Goal::assemble(arg, symbols, builtins)? {
                                Goal::And(inner) => goals.extend(inner),
                                goal => goals.push(goal),
                            }
                        }
                        Ok(Goal::And(goals))
                    }
                    (";", 2) => {
                        let mut alternatives = Vec::new();
                        for arg in args {
                            match Goal::assemble(arg, symbols, builtins)? {
                                Goal::Or(inner) => alternatives.extend(inner),
                                goal => alternatives.push(goal),
                            }
                        }
                        Ok(Goal::Or(alternatives))
                    }
                    ("not", 1) => Ok(Goal::Not(Box::new(Goal::assemble(
                        &args[0], symbols, builtins,
                    )?))),
                    _ => {
                        if builtins.has_name(functor.id) {
                            if builtins.get(functor.id, args.len()).is_some() {
                                Ok(Goal::Builtin {
                                    functor: *functor,
                                    args: args.clone(),
                                })
                            } else {
                                Err(SolveError::BuiltinArity {
                                    name: name.to_string(),
                                    expected: builtins.arities_of(functor.id)[0],
                                    found: args.len(),
                                })
                            }
                        } else {
                            Ok(Goal::Call(term.clone()))
                        }
                    }
                }
            }
            Term::Constant(c) => {
                let text = symbols.constant_text(c.id);
                if text == "!" || text == "cut" {
                    Ok(Goal::Cut)
                } else {
                    Ok(Goal::Call(term.clone()))
                }
            }
            Term::Var(_) | Term::Wildcard | Term::List(_) => Err(SolveError::MalformedGoal(
                "only constants and compounds are callable".to_string(),
            )),
        }
    }

    pub fn collect_variables(&self, vars: &mut HashSet<Variable>) {
        match self {
            Goal::Call(term) => term.collect_variables(vars),
            Goal::And(goals) | Goal::Or(goals) => {
                for goal in goals {
                    goal.collect_variables(vars);
                }
            }
            Goal::Not(inner) => inner.collect_variables(vars),
            Goal::Cut => {}
            Goal::Builtin { args, .. } => {
                for arg in args {
                    arg.collect_variables(vars);
                }
            }
        }
    }
}
