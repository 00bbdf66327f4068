//! hornbeam: a miniature Horn-clause resolution engine
//!
//! Facts and rules over first-order terms go into a rule database; queries
//! are answered by depth-first SLD-style resolution with backtracking,
//! producing variable substitutions lazily, one at a time. Conjunction,
//! disjunction, negation as failure, and cut are supported, along with
//! open-tail list unification and a registry of native predicates.
//!
//! ```
//! use hornbeam::Engine;
//!
//! let mut engine = Engine::new();
//! engine.consult_str("
//!     parent(maria, bill).
//!     parent(bill, audrey).
//!     ancestor(X, Y) :- parent(X, Y).
//!     ancestor(X, Y) :- parent(X, Z), ancestor(Z, Y).
//! ").unwrap();
//!
//! let mut query = engine.query("ancestor(maria, Who)").unwrap();
//! while let Some(env) = query.next_solution().unwrap() {
//!     println!("{}", hornbeam::render::solution(query.variables(), &env, query.symbols()));
//! }
//! ```

pub mod builtins;
pub mod engine;
pub mod error;
pub mod logic;
pub mod parser;
pub mod render;
pub mod solve;
pub mod unify;

// Re-export the commonly used types
pub use builtins::{Builtin, BuiltinRegistry, Mode};
pub use engine::{Engine, EngineError};
pub use error::{Abort, SolveError};
pub use logic::{
    Bindings, Clause, Constant, Functor, Goal, ListTerm, PredicateKey, RuleDatabase, SymbolTable,
    Term, Variable,
};
pub use parser::{parse_program, parse_query, ParseError, ParsedClause};
pub use solve::{Query, SearchContext, SolveConfig};
pub use unify::unify;
