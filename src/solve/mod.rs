//! The resolution engine: search context, solution nodes, and the
//! top-level query handle.

pub mod context;
pub mod node;

pub use context::{SearchContext, SolveConfig};
pub use node::{Node, Step};

use crate::error::SolveError;
use crate::logic::bindings::Bindings;
use crate::logic::goal::Goal;
use crate::logic::interner::SymbolTable;
use crate::logic::term::{Term, Variable};

/// A running query
///
/// Pull solutions with `next_solution` until `None`; dropping the query is
/// the only other form of cancellation. Each query owns its node tree and
/// its chain of binding environments; nothing is shared across queries.
pub struct Query<'a> {
    ctx: SearchContext<'a>,
    root: Node,
    term: Term,
    vars: Vec<Variable>,
}

impl<'a> Query<'a> {
    pub fn new(goal: Goal, term: Term, ctx: SearchContext<'a>) -> Self {
        let vars = term.variables_ordered();
        Query {
            ctx,
            root: Node::build(goal, Bindings::new()),
            term,
            vars,
        }
    }

    /// The next solution environment, `Ok(None)` on exhaustion.
    ///
    /// Exhaustion is permanent: further calls keep returning `Ok(None)`.
    /// Guard aborts and structural errors arrive as `Err` and abandon all
    /// pending alternatives.
    pub fn next_solution(&mut self) -> Result<Option<Bindings>, SolveError> {
        match self.root.next(&mut self.ctx)? {
            Step::Solution { env, .. } => Ok(Some(env)),
            Step::Exhausted { .. } => Ok(None),
        }
    }

    /// The query term as parsed
    pub fn term(&self) -> &Term {
        &self.term
    }

    /// Query variables in first-appearance order
    pub fn variables(&self) -> &[Variable] {
        &self.vars
    }

    pub fn symbols(&self) -> &SymbolTable {
        &*self.ctx.symbols
    }
}
