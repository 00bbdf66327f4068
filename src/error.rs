//! Error taxonomy for the solver
//!
//! Three distinct things can stop a search, and callers must be able to
//! tell them apart:
//!
//! - structural errors (malformed clauses/goals, builtin misuse) indicate a
//!   knowledge-base or programming defect and propagate out of the search
//!   entirely;
//! - abort signals from the execution guards unwind the whole search;
//! - logical failure (unification mismatch, exhausted node) is *not* an
//!   error at all — it is the normal signal to backtrack, and it never
//!   appears in these types.

use std::time::Duration;
use thiserror::Error;

/// Errors that cross solution-node boundaries unimpeded
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    /// A clause head that is not a compound or constant term
    #[error("malformed clause head: {0}")]
    MalformedClause(String),

    /// A goal position holding something that cannot be proved
    #[error("malformed goal: {0}")]
    MalformedGoal(String),

    /// A builtin invoked with the wrong number of arguments
    #[error("builtin `{name}` expects {expected} arguments, got {found}")]
    BuiltinArity {
        name: String,
        expected: usize,
        found: usize,
    },

    /// A required builtin input that is not ground at call time
    #[error("argument {position} of builtin `{name}` must be bound")]
    UnboundInput { name: String, position: usize },

    /// Execution-guard abort: the search was cut short, not proven false
    #[error("search aborted: {0}")]
    Aborted(#[from] Abort),
}

impl SolveError {
    /// Whether this error is a guard abort rather than a structural defect
    pub fn is_abort(&self) -> bool {
        matches!(self, SolveError::Aborted(_))
    }
}

/// Abort signals raised by the execution guards
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Abort {
    #[error("time budget of {budget:?} exhausted after {elapsed:?}")]
    TimeBudget { elapsed: Duration, budget: Duration },

    #[error("variable ceiling of {ceiling} reached ({minted} minted)")]
    VariableCeiling { minted: usize, ceiling: usize },
}
