//! Per-query search context and execution guards
//!
//! Every top-level query owns one context: the database and builtin
//! registry it reads, the symbol table it mints renamed variables from,
//! and the guard state. Nothing here is global, so independent queries
//! never interfere.

use crate::builtins::BuiltinRegistry;
use crate::error::{Abort, SolveError};
use crate::logic::database::RuleDatabase;
use crate::logic::interner::SymbolTable;
use std::time::{Duration, Instant};

/// Limits for one query
#[derive(Debug, Clone)]
pub struct SolveConfig {
    /// Wall-clock budget measured from query start
    pub time_budget: Duration,
    /// Ceiling on variable identities minted during the query
    /// (0 means no limit)
    pub max_variables: usize,
}

impl Default for SolveConfig {
    fn default() -> Self {
        SolveConfig {
            time_budget: Duration::from_secs(60),
            max_variables: 0,
        }
    }
}

/// State threaded through the resolution tree for one query
pub struct SearchContext<'a> {
    pub db: &'a RuleDatabase,
    pub builtins: &'a BuiltinRegistry,
    pub symbols: &'a mut SymbolTable,
    config: SolveConfig,
    started: Instant,
    variables_at_start: usize,
}

impl<'a> SearchContext<'a> {
    pub fn new(
        db: &'a RuleDatabase,
        builtins: &'a BuiltinRegistry,
        symbols: &'a mut SymbolTable,
        config: SolveConfig,
    ) -> Self {
        let variables_at_start = symbols.variable_count();
        SearchContext {
            db,
            builtins,
            symbols,
            config,
            started: Instant::now(),
            variables_at_start,
        }
    }

    /// Variables minted since this query started
    pub fn variables_minted(&self) -> usize {
        self.symbols.variable_count() - self.variables_at_start
    }

    /// Cooperative guard check. Called at call-node activation and each
    /// clause fetch; a violation unwinds the entire search.
    pub fn check_guards(&self) -> Result<(), SolveError> {
        let elapsed = self.started.elapsed();
        if elapsed > self.config.time_budget {
            return Err(SolveError::Aborted(Abort::TimeBudget {
                elapsed,
                budget: self.config.time_budget,
            }));
        }
        let minted = self.variables_minted();
        if self.config.max_variables > 0 && minted >= self.config.max_variables {
            return Err(SolveError::Aborted(Abort::VariableCeiling {
                minted,
                ceiling: self.config.max_variables,
            }));
        }
        Ok(())
    }
}
