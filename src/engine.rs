//! The engine facade
//!
//! Owns the symbol table, rule database, and builtin registry. Knowledge
//! comes in through `consult_*`; questions go out through `query`, whose
//! handle pulls solutions one at a time.

use crate::builtins::{Builtin, BuiltinRegistry};
use crate::error::SolveError;
use crate::logic::clause::Clause;
use crate::logic::database::{PredicateKey, RuleDatabase};
use crate::logic::goal::Goal;
use crate::logic::interner::SymbolTable;
use crate::parser::{parse_program, parse_query, ParseError};
use crate::solve::{Query, SearchContext, SolveConfig};
use std::path::Path;
use thiserror::Error;

/// Anything that can go wrong between source text and a running query
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Solve(#[from] SolveError),

    #[error("cannot read knowledge base: {0}")]
    Io(#[from] std::io::Error),
}

pub struct Engine {
    symbols: SymbolTable,
    db: RuleDatabase,
    builtins: BuiltinRegistry,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}

impl Engine {
    /// An engine with the default builtin catalog registered
    pub fn new() -> Self {
        let mut symbols = SymbolTable::new();
        let builtins = BuiltinRegistry::with_defaults(&mut symbols);
        Engine {
            symbols,
            db: RuleDatabase::new(),
            builtins,
        }
    }

    /// Register an additional native predicate
    pub fn register_builtin(&mut self, builtin: Box<dyn Builtin>) {
        self.builtins.register(&mut self.symbols, builtin);
    }

    /// Load clauses from source text. Returns how many were added.
    ///
    /// Goal assembly runs here, so malformed bodies and misused builtins
    /// are rejected at load time, not at query time.
    pub fn consult_str(&mut self, source: &str) -> Result<usize, EngineError> {
        let parsed = parse_program(source, &mut self.symbols)?;
        let count = parsed.len();
        for clause in parsed {
            let body = clause
                .body
                .as_ref()
                .map(|term| Goal::assemble(term, &self.symbols, &self.builtins))
                .transpose()?;
            let stored = Clause {
                head: clause.head,
                body,
            };
            self.db.add_clause(stored, &mut self.symbols)?;
        }
        log::info!("consulted {} clause(s)", count);
        Ok(count)
    }

    /// Load clauses from a file
    pub fn consult_file<P: AsRef<Path>>(&mut self, path: P) -> Result<usize, EngineError> {
        let source = std::fs::read_to_string(path)?;
        self.consult_str(&source)
    }

    /// Drop every clause for a predicate. Only affects future lookups.
    pub fn retract_predicate(&mut self, name: &str, arity: usize) -> usize {
        match self.symbols.get_functor(name) {
            Some(functor) => self.db.remove_by_key(PredicateKey { functor, arity }),
            None => 0,
        }
    }

    /// Clauses currently stored for a predicate
    pub fn clause_count(&self, name: &str, arity: usize) -> usize {
        match self.symbols.get_functor(name) {
            Some(functor) => self.db.count_for(PredicateKey { functor, arity }),
            None => 0,
        }
    }

    /// Start a query with the default limits
    pub fn query(&mut self, text: &str) -> Result<Query<'_>, EngineError> {
        self.query_with_config(text, SolveConfig::default())
    }

    /// Start a query under explicit limits
    pub fn query_with_config(
        &mut self,
        text: &str,
        config: SolveConfig,
    ) -> Result<Query<'_>, EngineError> {
        let term = parse_query(text, &mut self.symbols)?;
        let goal = Goal::assemble(&term, &self.symbols, &self.builtins)?;
        let ctx = SearchContext::new(&self.db, &self.builtins, &mut self.symbols, config);
        Ok(Query::new(goal, term, ctx))
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }
}
