//! Result rendering
//!
//! A read-only projection of a solution environment onto the query's
//! variables, as `Name = value` text or as JSON. Not part of resolution.

use crate::logic::bindings::Bindings;
use crate::logic::interner::SymbolTable;
use crate::logic::term::{Term, Variable};

/// Render one term under an environment
pub fn term_text(term: &Term, env: &Bindings, symbols: &SymbolTable) -> String {
    env.substitute(term).display(symbols).to_string()
}

/// One `Name = value` line per query variable, in appearance order.
/// A solution with no variables renders as `true`.
pub fn solution(vars: &[Variable], env: &Bindings, symbols: &SymbolTable) -> String {
    if vars.is_empty() {
        return "true".to_string();
    }
    vars.iter()
        .map(|v| {
            format!(
                "{} = {}",
                symbols.variable_name(v.id),
                term_text(&Term::Var(*v), env, symbols)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The same projection as a JSON object, variable name to rendered value
pub fn solution_json(
    vars: &[Variable],
    env: &Bindings,
    symbols: &SymbolTable,
) -> serde_json::Value {
    let mut object = serde_json::Map::new();
    for v in vars {
        object.insert(
            symbols.variable_name(v.id).to_string(),
            serde_json::Value::String(term_text(&Term::Var(*v), env, symbols)),
        );
    }
    serde_json::Value::Object(object)
}
