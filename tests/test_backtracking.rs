//! Backtracking completeness and list unification through the full stack

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

const FAMILY: &str = "
    parent(bill, audrey).
    parent(maria, bill).
    parent(tony, maria).
    parent(charles, tony).
    ancestor(X, Y) :- parent(X, Y).
    ancestor(X, Y) :- parent(X, Z), ancestor(Z, Y).
";

#[test]
fn test_ancestor_enumeration_order() {
    let mut engine = Engine::new();
    engine.consult_str(FAMILY).unwrap();

    // Depth-first, clause order first: the direct parent, then each
    // further generation in turn.
    assert_eq!(
        all_solutions(&mut engine, "ancestor(charles, Y)", "Y"),
        vec!["tony", "maria", "bill", "audrey"]
    );
}

#[test]
fn test_ancestor_reverse_direction() {
    let mut engine = Engine::new();
    engine.consult_str(FAMILY).unwrap();

    assert_eq!(
        all_solutions(&mut engine, "ancestor(A, audrey)", "A"),
        vec!["bill", "maria", "tony", "charles"]
    );
}

#[test]
fn test_solutions_are_lazy() {
    let mut engine = Engine::new();
    engine.consult_str(FAMILY).unwrap();

    // Pull exactly one solution and stop: no further search happens,
    // and the engine is reusable afterwards.
    {
        let mut query = engine.query("ancestor(charles, Y)").unwrap();
        let first = query.next_solution().unwrap();
        assert!(first.is_some());
    }
    assert_eq!(
        all_solutions(&mut engine, "parent(charles, Y)", "Y"),
        vec!["tony"]
    );
}

#[test]
fn test_open_tail_closure_through_query() {
    let mut engine = Engine::new();
    engine.consult_str("same(X, X).").unwrap();

    let mut query = engine.query("same([a, b, c], [H, H2 | T])").unwrap();
    let env = query.next_solution().unwrap().expect("lists must unify");
    let json = render::solution_json(query.variables(), &env, query.symbols());

    assert_eq!(json["H"], "a");
    assert_eq!(json["H2"], "b");
    assert_eq!(json["T"], "[c]");
}

#[test]
fn test_member_via_open_tails() {
    let mut engine = Engine::new();
    engine
        .consult_str(
            "
            member(X, [X | _]).
            member(X, [_ | T]) :- member(X, T).
        ",
        )
        .unwrap();

    assert_eq!(
        all_solutions(&mut engine, "member(E, [red, green, blue])", "E"),
        vec!["red", "green", "blue"]
    );
}

#[test]
fn test_append_backtracks_over_splits() {
    let mut engine = Engine::new();
    engine
        .consult_str(
            "
            append([], L, L).
            append([H | T], L, [H | R]) :- append(T, L, R).
        ",
        )
        .unwrap();

    let mut query = engine.query("append(A, B, [1, 2])").unwrap();
    let mut splits = Vec::new();
    while let Some(env) = query.next_solution().unwrap() {
        let json = render::solution_json(query.variables(), &env, query.symbols());
        splits.push(format!(
            "{}+{}",
            json["A"].as_str().unwrap(),
            json["B"].as_str().unwrap()
        ));
    }
    assert_eq!(splits, vec!["[]+[1,2]", "[1]+[2]", "[1,2]+[]"]);
}
