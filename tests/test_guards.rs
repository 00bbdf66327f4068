//! Execution guards and the error taxonomy through the public API

use hornbeam::{Abort, Engine, EngineError, SolveConfig, SolveError};
use std::time::Duration;

#[test]
fn test_time_budget_aborts_runaway_recursion() {
    let mut engine = Engine::new();
    // Self-recursive rule, no base case
    engine.consult_str("count(X) :- count(s(X)).").unwrap();

    let config = SolveConfig {
        time_budget: Duration::from_millis(5),
        ..SolveConfig::default()
    };
    let mut query = engine.query_with_config("count(zero)", config).unwrap();

    // Terminates via the abort signal, not by looping forever, and not by
    // quietly reporting "no solution".
    let err = query.next_solution().unwrap_err();
    assert!(matches!(
        err,
        SolveError::Aborted(Abort::TimeBudget { .. })
    ));
}

#[test]
fn test_variable_ceiling_aborts() {
    let mut engine = Engine::new();
    engine.consult_str("count(X) :- count(s(X)).").unwrap();

    let config = SolveConfig {
        max_variables: 200,
        ..SolveConfig::default()
    };
    let mut query = engine.query_with_config("count(zero)", config).unwrap();

    let err = query.next_solution().unwrap_err();
    assert!(matches!(
        err,
        SolveError::Aborted(Abort::VariableCeiling { .. })
    ));
}

#[test]
fn test_abort_is_distinct_from_no_solution() {
    let mut engine = Engine::new();
    engine.consult_str("count(X) :- count(s(X)).").unwrap();

    // Unprovable but terminating: plain exhaustion
    let mut finite = engine.query("count(zero, extra)").unwrap();
    assert!(finite.next_solution().unwrap().is_none());

    // Unprovable and non-terminating: the guard signal
    let config = SolveConfig {
        time_budget: Duration::from_millis(5),
        ..SolveConfig::default()
    };
    let mut infinite = engine.query_with_config("count(zero)", config).unwrap();
    assert!(infinite.next_solution().unwrap_err().is_abort());
}

#[test]
fn test_generous_limits_do_not_interfere() {
    let mut engine = Engine::new();
    engine
        .consult_str(
            "
            parent(maria, bill).
            parent(bill, audrey).
            ancestor(X, Y) :- parent(X, Y).
            ancestor(X, Y) :- parent(X, Z), ancestor(Z, Y).
        ",
        )
        .unwrap();

    let config = SolveConfig {
        time_budget: Duration::from_secs(10),
        max_variables: 10_000,
    };
    let mut query = engine
        .query_with_config("ancestor(maria, Y)", config)
        .unwrap();
    let mut count = 0;
    while query.next_solution().unwrap().is_some() {
        count += 1;
    }
    assert_eq!(count, 2);
}

#[test]
fn test_unbound_builtin_input_is_structural_error() {
    let mut engine = Engine::new();
    engine
        .consult_str("risky(X, Y) :- greater_than(X, Y).")
        .unwrap();

    // The error propagates out of the search rather than becoming
    // "this alternative failed".
    let mut query = engine.query("risky(A, 3)").unwrap();
    let err = query.next_solution().unwrap_err();
    assert!(matches!(err, SolveError::UnboundInput { position: 0, .. }));
    assert!(!err.is_abort());
}

#[test]
fn test_parse_errors_surface_eagerly() {
    let mut engine = Engine::new();
    let err = engine.consult_str("parent(bill, .").unwrap_err();
    assert!(matches!(err, EngineError::Parse(_)));
}
