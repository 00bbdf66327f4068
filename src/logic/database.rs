//! The rule database
//!
//! Clauses are indexed by predicate key (functor name + arity) in an
//! insertion-ordered map; clause order within a key is declaration order
//! and determines which alternative is tried first. Mutation only affects
//! future lookups — call nodes snapshot their candidates at activation.

use super::clause::Clause;
use super::interner::{FunctorId, SymbolTable};
use super::term::Term;
use crate::error::SolveError;
use indexmap::IndexMap;

/// Functor name + arity, the identity of a predicate
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PredicateKey {
    pub functor: FunctorId,
    pub arity: usize,
}

impl PredicateKey {
    /// Derive the key for a callable term. Constants name zero-arity
    /// predicates; their text is interned into the functor arena so keys
    /// compare by id.
    pub fn for_term(term: &Term, symbols: &mut SymbolTable) -> Option<PredicateKey> {
        match term {
            Term::Compound(functor, args) => Some(PredicateKey {
                functor: functor.id,
                arity: args.len(),
            }),
            Term::Constant(c) => {
                let text = symbols.constant_text(c.id).to_string();
                Some(PredicateKey {
                    functor: symbols.intern_functor(&text),
                    arity: 0,
                })
            }
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct RuleDatabase {
    index: IndexMap<PredicateKey, Vec<Clause>>,
}

impl RuleDatabase {
    pub fn new() -> Self {
        RuleDatabase::default()
    }

    /// Append a clause under its head's predicate key.
    ///
    /// A head that is not a constant or compound is a structural error,
    /// raised here rather than at query time.
    pub fn add_clause(
        &mut self,
        clause: Clause,
        symbols: &mut SymbolTable,
    ) -> Result<PredicateKey, SolveError> {
        let key = PredicateKey::for_term(&clause.head, symbols).ok_or_else(|| {
            SolveError::MalformedClause(format!(
                "clause head must be a constant or compound, got {}",
                clause.head.display(symbols)
            ))
        })?;
        self.index.entry(key).or_default().push(clause);
        Ok(key)
    }

    /// Remove every clause stored under a predicate key. Only affects
    /// future lookups; in-flight proofs hold their own clause copies.
    pub fn remove_by_key(&mut self, key: PredicateKey) -> usize {
        self.index.shift_remove(&key).map(|v| v.len()).unwrap_or(0)
    }

    /// Clauses for a key in declaration order. Unknown predicates are
    /// empty, not errors.
    pub fn lookup(&self, key: PredicateKey) -> &[Clause] {
        self.index.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn count_for(&self, key: PredicateKey) -> usize {
        self.lookup(key).len()
    }

    /// Number of distinct predicate keys
    pub fn predicate_count(&self) -> usize {
        self.index.len()
    }

    /// Total clause count across all predicates
    pub fn clause_count(&self) -> usize {
        self.index.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::term::{Constant, Functor, Variable};

    fn fact(symbols: &mut SymbolTable, name: &str, arg: &str) -> Clause {
        let f = Functor::new(symbols.intern_functor(name));
        let a = Term::Constant(Constant::new(symbols.intern_constant(arg)));
        Clause::fact(Term::Compound(f, vec![a]))
    }

    #[test]
    fn test_lookup_preserves_declaration_order() {
        let mut symbols = SymbolTable::new();
        let mut db = RuleDatabase::new();

        let key = db
            .add_clause(fact(&mut symbols, "job", "lawyer"), &mut symbols)
            .unwrap();
        db.add_clause(fact(&mut symbols, "job", "teacher"), &mut symbols)
            .unwrap();

        let clauses = db.lookup(key);
        assert_eq!(clauses.len(), 2);
        let first_arg = match &clauses[0].head {
            Term::Compound(_, args) => &args[0],
            _ => panic!("expected compound head"),
        };
        assert_eq!(
            first_arg,
            &Term::Constant(Constant::new(symbols.get_constant("lawyer").unwrap()))
        );
    }

    #[test]
    fn test_arity_distinguishes_predicates() {
        let mut symbols = SymbolTable::new();
        let mut db = RuleDatabase::new();

        let f = Functor::new(symbols.intern_functor("p"));
        let a = Term::Constant(Constant::new(symbols.intern_constant("a")));
        let one = db
            .add_clause(Clause::fact(Term::Compound(f, vec![a.clone()])), &mut symbols)
            .unwrap();
        let two = db
            .add_clause(
                Clause::fact(Term::Compound(f, vec![a.clone(), a])),
                &mut symbols,
            )
            .unwrap();

        assert_ne!(one, two);
        assert_eq!(db.count_for(one), 1);
        assert_eq!(db.count_for(two), 1);
    }

    #[test]
    fn test_remove_by_key() {
        let mut symbols = SymbolTable::new();
        let mut db = RuleDatabase::new();

        let key = db
            .add_clause(fact(&mut symbols, "job", "lawyer"), &mut symbols)
            .unwrap();
        assert_eq!(db.remove_by_key(key), 1);
        assert_eq!(db.count_for(key), 0);
        assert_eq!(db.remove_by_key(key), 0);
    }

    #[test]
    fn test_constant_head_is_zero_arity_predicate() {
        let mut symbols = SymbolTable::new();
        let mut db = RuleDatabase::new();

        let happy = Term::Constant(Constant::new(symbols.intern_constant("happy")));
        let key = db.add_clause(Clause::fact(happy), &mut symbols).unwrap();
        assert_eq!(key.arity, 0);
        assert_eq!(db.count_for(key), 1);
    }

    #[test]
    fn test_malformed_head_rejected() {
        let mut symbols = SymbolTable::new();
        let mut db = RuleDatabase::new();

        let x = Term::Var(Variable::new(symbols.fresh_variable("X")));
        let err = db.add_clause(Clause::fact(x), &mut symbols).unwrap_err();
        assert!(matches!(err, SolveError::MalformedClause(_)));
    }
}
