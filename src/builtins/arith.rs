//! Arithmetic builtins
//!
//! A deliberately small catalog: enough to exercise the In/Out mode
//! machinery and the demo knowledge bases. Non-numeric ground arguments
//! are ordinary failures, not errors, matching how constant unification
//! treats non-numeric text.

use super::{numeric_arg, Builtin, Mode};
use crate::error::SolveError;
use crate::logic::bindings::Bindings;
use crate::logic::interner::SymbolTable;
use crate::logic::term::{Constant, Term};
use crate::unify::unify;

/// Render a computed number the way the parser would have read it:
/// integral values without a fractional part.
fn number_term(value: f64, symbols: &mut SymbolTable) -> Term {
    let text = if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    };
    Term::Constant(Constant::new(symbols.intern_constant(&text)))
}

/// `greater_than(A, B)`: numeric comparison, both inputs
pub struct GreaterThan;

impl Builtin for GreaterThan {
    fn name(&self) -> &'static str {
        "greater_than"
    }

    fn arity(&self) -> usize {
        2
    }

    fn modes(&self) -> &'static [Mode] {
        &[Mode::In, Mode::In]
    }

    fn step(
        &self,
        args: &[Term],
        env: &Bindings,
        symbols: &mut SymbolTable,
    ) -> Result<Vec<Bindings>, SolveError> {
        let (a, b) = match (
            numeric_arg(&args[0], env, symbols),
            numeric_arg(&args[1], env, symbols),
        ) {
            (Some(a), Some(b)) => (a, b),
            _ => return Ok(vec![]),
        };
        if a > b {
            Ok(vec![env.clone()])
        } else {
            Ok(vec![])
        }
    }
}

/// `less_than(A, B)`: numeric comparison, both inputs
pub struct LessThan;

impl Builtin for LessThan {
    fn name(&self) -> &'static str {
        "less_than"
    }

    fn arity(&self) -> usize {
        2
    }

    fn modes(&self) -> &'static [Mode] {
        &[Mode::In, Mode::In]
    }

    fn step(
        &self,
        args: &[Term],
        env: &Bindings,
        symbols: &mut SymbolTable,
    ) -> Result<Vec<Bindings>, SolveError> {
        let (a, b) = match (
            numeric_arg(&args[0], env, symbols),
            numeric_arg(&args[1], env, symbols),
        ) {
            (Some(a), Some(b)) => (a, b),
            _ => return Ok(vec![]),
        };
        if a < b {
            Ok(vec![env.clone()])
        } else {
            Ok(vec![])
        }
    }
}

/// `add(A, B, Sum)`: arithmetic with a bound-or-bindable third position
pub struct Add;

impl Builtin for Add {
    fn name(&self) -> &'static str {
        "add"
    }

    fn arity(&self) -> usize {
        3
    }

    fn modes(&self) -> &'static [Mode] {
        &[Mode::In, Mode::In, Mode::Out]
    }

    fn step(
        &self,
        args: &[Term],
        env: &Bindings,
        symbols: &mut SymbolTable,
    ) -> Result<Vec<Bindings>, SolveError> {
        let (a, b) = match (
            numeric_arg(&args[0], env, symbols),
            numeric_arg(&args[1], env, symbols),
        ) {
            (Some(a), Some(b)) => (a, b),
            _ => return Ok(vec![]),
        };
        let sum = number_term(a + b, symbols);
        // Unifying covers both directions: bind an unbound third argument
        // or check an already-ground one (numeric equality included).
        match unify(&args[2], &sum, env, symbols) {
            Some(extended) => Ok(vec![extended]),
            None => Ok(vec![]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::term::Variable;

    fn constant(symbols: &mut SymbolTable, text: &str) -> Term {
        Term::Constant(Constant::new(symbols.intern_constant(text)))
    }

    #[test]
    fn test_greater_than() {
        let mut symbols = SymbolTable::new();
        let two = constant(&mut symbols, "2");
        let one = constant(&mut symbols, "1");
        let env = Bindings::new();

        let solutions = GreaterThan
            .step(&[two.clone(), one.clone()], &env, &mut symbols)
            .unwrap();
        assert_eq!(solutions.len(), 1);

        let none = GreaterThan.step(&[one, two], &env, &mut symbols).unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_non_numeric_fails_quietly() {
        let mut symbols = SymbolTable::new();
        let apple = constant(&mut symbols, "apple");
        let one = constant(&mut symbols, "1");
        let env = Bindings::new();

        let solutions = LessThan.step(&[apple, one], &env, &mut symbols).unwrap();
        assert!(solutions.is_empty());
    }

    #[test]
    fn test_add_binds_output() {
        let mut symbols = SymbolTable::new();
        let one = constant(&mut symbols, "1");
        let two = constant(&mut symbols, "2");
        let sum = Variable::new(symbols.fresh_variable("Sum"));
        let env = Bindings::new();

        let solutions = Add
            .step(&[one, two, Term::Var(sum)], &env, &mut symbols)
            .unwrap();
        assert_eq!(solutions.len(), 1);

        let three = constant(&mut symbols, "3");
        assert_eq!(solutions[0].resolve(&Term::Var(sum)), &three);
    }

    #[test]
    fn test_add_checks_bound_output() {
        let mut symbols = SymbolTable::new();
        let one = constant(&mut symbols, "1");
        let two = constant(&mut symbols, "2");
        // "3.0" is numerically equal to the computed "3"
        let three = constant(&mut symbols, "3.0");
        let env = Bindings::new();

        let solutions = Add
            .step(&[one.clone(), two, three], &env, &mut symbols)
            .unwrap();
        assert_eq!(solutions.len(), 1);

        let wrong = Add
            .step(&[one.clone(), one.clone(), one], &env, &mut symbols)
            .unwrap();
        assert!(wrong.is_empty());
    }
}
