//! Core data model: terms, symbols, bindings, clauses, and the rule
//! database.

pub mod bindings;
pub mod clause;
pub mod database;
pub mod goal;
pub mod interner;
pub mod term;

pub use bindings::Bindings;
pub use clause::Clause;
pub use database::{PredicateKey, RuleDatabase};
pub use goal::Goal;
pub use interner::{ConstId, FunctorId, SymbolTable, VarId};
pub use term::{Constant, Functor, ListTerm, Term, TermDisplay, Variable};
