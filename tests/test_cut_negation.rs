//! Cut pruning, negation as failure, and exhaustion behavior

use hornbeam::{render, Engine};

fn all_solutions(engine: &mut Engine, goal: &str, var: &str) -> Vec<String> {
    let mut query = engine.query(goal).unwrap();
    let mut out = Vec::new();
    while let Some(env) = query.next_solution().unwrap() {
        let json = render::solution_json(query.variables(), &env, query.symbols());
        out.push(json[var].as_str().unwrap().to_string());
    }
    out
}

fn count_solutions(engine: &mut Engine, goal: &str) -> usize {
    let mut query = engine.query(goal).unwrap();
    let mut count = 0;
    while query.next_solution().unwrap().is_some() {
        count += 1;
    }
    count
}

const JOBS: &str = "
    job(lawyer).
    job(teacher).
    job(programmer).
    job(janitor).
    pay(lawyer, high).
    pay(teacher, high).
";

#[test]
fn test_cut_commits_to_first_proof_path() {
    let mut engine = Engine::new();
    engine.consult_str(JOBS).unwrap();
    engine
        .consult_str(
            "
            good_job(X) :- !, job(X), pay(X, high).
            good_job(programmer).
        ",
        )
        .unwrap();

    // The cut prevents exploring teacher and suppresses the fallback
    // clause entirely.
    assert_eq!(all_solutions(&mut engine, "good_job(X)", "X"), vec!["lawyer"]);
}

#[test]
fn test_cut_word_alias() {
    let mut engine = Engine::new();
    engine.consult_str(JOBS).unwrap();
    engine
        .consult_str(
            "
            good_job(X) :- cut, job(X), pay(X, high).
            good_job(programmer).
        ",
        )
        .unwrap();

    assert_eq!(all_solutions(&mut engine, "good_job(X)", "X"), vec!["lawyer"]);
}

#[test]
fn test_without_cut_all_alternatives_surface() {
    let mut engine = Engine::new();
    engine.consult_str(JOBS).unwrap();
    engine
        .consult_str(
            "
            good_job(X) :- job(X), pay(X, high).
            good_job(programmer).
        ",
        )
        .unwrap();

    assert_eq!(
        all_solutions(&mut engine, "good_job(X)", "X"),
        vec!["lawyer", "teacher", "programmer"]
    );
}

#[test]
fn test_cut_after_commitment_fails_whole_call() {
    let mut engine = Engine::new();
    engine.consult_str(JOBS).unwrap();
    engine
        .consult_str(
            "
            has_high_pay(X) :- job(X), !, pay(X, high).
            has_high_pay(janitor).
        ",
        )
        .unwrap();

    // job(X) commits to lawyer before the cut; pay(lawyer, high) holds.
    assert_eq!(
        all_solutions(&mut engine, "has_high_pay(X)", "X"),
        vec!["lawyer"]
    );

    // Committing to a candidate that fails the rest of the body leaves
    // no solutions at all: the fallback clause is gone too.
    engine
        .consult_str(
            "
            first_is_high(X) :- job_b(X), !, pay(X, high).
            first_is_high(janitor).
            job_b(programmer).
            job_b(lawyer).
        ",
        )
        .unwrap();
    assert_eq!(count_solutions(&mut engine, "first_is_high(X)"), 0);
}

#[test]
fn test_negation_on_ground_goals() {
    let mut engine = Engine::new();
    engine.consult_str("female(sarah).").unwrap();

    assert_eq!(count_solutions(&mut engine, "not(female(sarah))"), 0);
    // Exactly one solution, with no bindings
    let mut query = engine.query("not(female(richard))").unwrap();
    let env = query.next_solution().unwrap().expect("negation succeeds");
    assert!(env.is_empty());
    assert!(query.next_solution().unwrap().is_none());
}

#[test]
fn test_negation_in_rule_body() {
    let mut engine = Engine::new();
    engine
        .consult_str(
            "
            bird(tweety).
            bird(pingu).
            flies_not(pingu).
            can_fly(X) :- bird(X), not(flies_not(X)).
        ",
        )
        .unwrap();

    assert_eq!(all_solutions(&mut engine, "can_fly(B)", "B"), vec!["tweety"]);
}

#[test]
fn test_exhausted_query_stays_exhausted() {
    let mut engine = Engine::new();
    engine.consult_str("job(lawyer).").unwrap();

    let mut query = engine.query("job(X)").unwrap();
    assert!(query.next_solution().unwrap().is_some());
    // Exhaustion is permanent and idempotent: no stale re-yields
    for _ in 0..5 {
        assert!(query.next_solution().unwrap().is_none());
    }
}

#[test]
fn test_cut_inside_disjunction_prunes_remaining_alternatives() {
    let mut engine = Engine::new();
    engine
        .consult_str(
            "
            color(red).
            color(green).
            pick(X) :- (color(X), ! ; color(green)).
        ",
        )
        .unwrap();

    assert_eq!(all_solutions(&mut engine, "pick(X)", "X"), vec!["red"]);
}
