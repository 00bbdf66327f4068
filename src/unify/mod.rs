//! Unification
//!
//! `unify` extends a binding environment so that two terms become equal, or
//! reports failure. It never partially commits: work happens on a cloned
//! snapshot of the caller's environment, and the snapshot is discarded
//! wholesale on failure, so a mismatch deep in the second argument of a
//! compound leaves no trace of the first.


use crate::logic::bindings::Bindings;
use crate::logic::interner::SymbolTable;
use crate::logic::term::{Constant, ListTerm, Term};

/// Unify two terms under an environment.
///
/// Returns the extended environment on success, `None` on mismatch. The
/// caller's environment is untouched either way.
pub fn unify(a: &Term, b: &Term, env: &Bindings, symbols: &SymbolTable) -> Option<Bindings> {
    let mut extended = env.clone();
    if unify_terms(a, b, &mut extended, symbols) {
        Some(extended)
    } else {
        None
    }
}

fn unify_terms(a: &Term, b: &Term, env: &mut Bindings, symbols: &SymbolTable) -> bool {
    let a = env.resolve(a).clone();
    let b = env.resolve(b).clone();

    match (a, b) {
        // Wildcard unifies with anything and binds nothing
        (Term::Wildcard, _) | (_, Term::Wildcard) => true,

        // Same identity: trivially equal
        (Term::Var(x), Term::Var(y)) if x.id == y.id => true,

        // Unbound variable: extend the environment
        (Term::Var(x), other) => {
            env.bind(x, other);
            true
        }
        (other, Term::Var(y)) => {
            env.bind(y, other);
            true
        }

        (Term::Constant(c1), Term::Constant(c2)) => constants_equal(c1, c2, symbols),

        (Term::Compound(f, xs), Term::Compound(g, ys)) => {
            if f.id != g.id || xs.len() != ys.len() {
                return false;
            }
            // Left to right, short-circuiting; the snapshot discipline in
            // `unify` makes abandoning mid-way safe.
            xs.iter().zip(ys.iter()).all(|(x, y)| unify_terms(x, y, env, symbols))
        }

        (Term::List(l1), Term::List(l2)) => unify_lists(l1, l2, env, symbols),

        // Cross-kind pairs (variable cases already handled above)
        _ => false,
    }
}

/// Text equality, or numeric equality when both texts parse as numbers
fn constants_equal(a: Constant, b: Constant, symbols: &SymbolTable) -> bool {
    if a.id == b.id {
        return true;
    }
    matches!(
        (symbols.constant_number(a.id), symbols.constant_number(b.id)),
        (Some(x), Some(y)) if x == y
    )
}

/// Dereference a list position: a bound open tail stands for whatever list
/// its variable resolved to. `None` means the tail variable is bound to a
/// non-list value, which cannot unify as a list.
fn deref_list(mut list: ListTerm, env: &Bindings) -> Option<ListTerm> {
    loop {
        match list {
            ListTerm::Tail(v) => match env.resolve_var(v.id) {
                None => return Some(ListTerm::Tail(v)),
                Some(Term::Var(u)) => return Some(ListTerm::Tail(*u)),
                Some(Term::List(bound)) => list = bound.clone(),
                Some(_) => return None,
            },
            other => return Some(other),
        }
    }
}

fn unify_lists(l1: ListTerm, l2: ListTerm, env: &mut Bindings, symbols: &SymbolTable) -> bool {
    let mut a = l1;
    let mut b = l2;
    loop {
        a = match deref_list(a, env) {
            Some(list) => list,
            None => return false,
        };
        b = match deref_list(b, env) {
            Some(list) => list,
            None => return false,
        };

        match (a, b) {
            (ListTerm::Nil, ListTerm::Nil) => return true,

            // Both open: one list becomes an alias for the other
            (ListTerm::Tail(x), ListTerm::Tail(y)) => {
                if x.id != y.id {
                    env.bind(x, Term::List(ListTerm::Tail(y)));
                }
                return true;
            }

            // One open tail captures the entire remainder of the other
            // side; a proper end closes an open tail with the empty list.
            (ListTerm::Tail(x), rest) => {
                env.bind(x, Term::List(rest));
                return true;
            }
            (rest, ListTerm::Tail(y)) => {
                env.bind(y, Term::List(rest));
                return true;
            }

            (ListTerm::Cons(h1, t1), ListTerm::Cons(h2, t2)) => {
                if !unify_terms(&h1, &h2, env, symbols) {
                    return false;
                }
                a = *t1;
                b = *t2;
            }

            // Length mismatch between proper lists
            (ListTerm::Nil, ListTerm::Cons(..)) | (ListTerm::Cons(..), ListTerm::Nil) => {
                return false;
            }
        }
    }
}
