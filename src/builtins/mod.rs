//! Built-in (native) predicate contract and registry
//!
//! A builtin participates in resolution without consulting the rule
//! database: given the current binding environment it computes new
//! bindings, or fails, in one deterministic step. Builtins declare which
//! argument positions are inputs (must be ground at call time) and which
//! are outputs (terms the builtin will bind), so misuse surfaces as a
//! structural error distinct from ordinary "no solution".

mod arith;

pub use arith::{Add, GreaterThan, LessThan};

use crate::error::SolveError;
use crate::logic::bindings::Bindings;
use crate::logic::interner::{FunctorId, SymbolTable};
use crate::logic::term::Term;
use std::collections::HashMap;

/// Declared role of one builtin argument position
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Must be ground (after following bindings) when the builtin runs
    In,
    /// A term the builtin will bind or check
    Out,
}

/// A native predicate
///
/// `step` is invoked with the argument terms of the call site (already
/// standardized apart by clause renaming — the builtin is re-applied to
/// whatever terms appear at the call, no reflection involved). By
/// convention a builtin yields at most one solution, but the protocol
/// permits more.
pub trait Builtin {
    fn name(&self) -> &'static str;

    fn arity(&self) -> usize;

    /// One mode per argument position; length equals `arity()`
    fn modes(&self) -> &'static [Mode];

    /// One deterministic evaluation step. An empty vec is logical failure;
    /// errors are reserved for structural misuse and guard aborts.
    fn step(
        &self,
        args: &[Term],
        env: &Bindings,
        symbols: &mut SymbolTable,
    ) -> Result<Vec<Bindings>, SolveError>;
}

/// Registry of native predicates, keyed by functor and arity
#[derive(Default)]
pub struct BuiltinRegistry {
    map: HashMap<(FunctorId, usize), Box<dyn Builtin>>,
    arities: HashMap<FunctorId, Vec<usize>>,
}

impl BuiltinRegistry {
    pub fn new() -> Self {
        BuiltinRegistry::default()
    }

    /// Register a builtin under its declared name and arity
    pub fn register(&mut self, symbols: &mut SymbolTable, builtin: Box<dyn Builtin>) {
        let functor = symbols.intern_functor(builtin.name());
        self.arities.entry(functor).or_default().push(builtin.arity());
        self.map.insert((functor, builtin.arity()), builtin);
    }

    pub fn get(&self, functor: FunctorId, arity: usize) -> Option<&dyn Builtin> {
        self.map.get(&(functor, arity)).map(|b| b.as_ref())
    }

    /// Whether any builtin is registered under this name
    pub fn has_name(&self, functor: FunctorId) -> bool {
        self.arities.contains_key(&functor)
    }

    /// Registered arities for a name (for arity-mismatch reporting)
    pub fn arities_of(&self, functor: FunctorId) -> &[usize] {
        self.arities.get(&functor).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The default catalog
    pub fn with_defaults(symbols: &mut SymbolTable) -> Self {
        let mut registry = BuiltinRegistry::new();
        registry.register(symbols, Box::new(GreaterThan));
        registry.register(symbols, Box::new(LessThan));
        registry.register(symbols, Box::new(Add));
        registry
    }
}

impl std::fmt::Debug for BuiltinRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuiltinRegistry")
            .field("registered", &self.map.len())
            .finish()
    }
}

/// Validate a call site against a builtin's declared signature.
///
/// Arity mismatches and unbound `In` arguments are structural errors, so
/// callers can tell "wrong usage" from "no solution".
pub fn check_call(
    builtin: &dyn Builtin,
    args: &[Term],
    env: &Bindings,
) -> Result<(), SolveError> {
    if args.len() != builtin.arity() {
        return Err(SolveError::BuiltinArity {
            name: builtin.name().to_string(),
            expected: builtin.arity(),
            found: args.len(),
        });
    }
    for (position, (mode, arg)) in builtin.modes().iter().zip(args).enumerate() {
        if *mode == Mode::In && !env.is_ground(arg) {
            return Err(SolveError::UnboundInput {
                name: builtin.name().to_string(),
                position,
            });
        }
    }
    Ok(())
}

/// Resolve an argument to a numeric value, if it is a numeric constant
/// under the current environment.
pub(crate) fn numeric_arg(arg: &Term, env: &Bindings, symbols: &SymbolTable) -> Option<f64> {
    match env.resolve(arg) {
        Term::Constant(c) => symbols.constant_number(c.id),
        _ => None,
    }
}
