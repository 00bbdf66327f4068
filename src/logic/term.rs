//! Terms: constants, variables, compounds, lists, and the wildcard

use super::interner::{ConstId, FunctorId, SymbolTable, VarId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A constant value, stored as interned text
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Constant {
    pub id: ConstId,
}

impl Constant {
    pub fn new(id: ConstId) -> Self {
        Constant { id }
    }
}

/// A variable identity
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Variable {
    pub id: VarId,
}

impl Variable {
    pub fn new(id: VarId) -> Self {
        Variable { id }
    }
}

/// A compound term's name. Arity is structural (`args.len()`), not stored.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Functor {
    pub id: FunctorId,
}

impl Functor {
    pub fn new(id: FunctorId) -> Self {
        Functor { id }
    }
}

/// A term
///
/// Terms are immutable once constructed; all change over time lives in the
/// binding environment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    Constant(Constant),
    Var(Variable),
    /// Unifies with anything, binds nothing
    Wildcard,
    Compound(Functor, Vec<Term>),
    List(ListTerm),
}

/// A list as a recursive head/tail structure.
///
/// The tail of a list node is either a proper list or, uniquely, an unbound
/// variable standing for the rest of the list (an open tail). Length and
/// open/closed status are derived by walking the structure, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListTerm {
    Nil,
    Cons(Box<Term>, Box<ListTerm>),
    /// Open tail: a variable standing for the remainder of the list
    Tail(Variable),
}

impl ListTerm {
    /// Build a closed list from element terms
    pub fn from_vec(items: Vec<Term>) -> ListTerm {
        let mut list = ListTerm::Nil;
        for item in items.into_iter().rev() {
            list = ListTerm::Cons(Box::new(item), Box::new(list));
        }
        list
    }

    /// Build an open list: the given elements followed by a tail variable
    pub fn with_tail(items: Vec<Term>, tail: Variable) -> ListTerm {
        let mut list = ListTerm::Tail(tail);
        for item in items.into_iter().rev() {
            list = ListTerm::Cons(Box::new(item), Box::new(list));
        }
        list
    }

    /// Structural element count up to the open tail (if any)
    pub fn prefix_len(&self) -> usize {
        let mut n = 0;
        let mut cur = self;
        while let ListTerm::Cons(_, tail) = cur {
            n += 1;
            cur = tail;
        }
        n
    }

    /// Whether the list ends in an open tail
    pub fn is_open(&self) -> bool {
        let mut cur = self;
        loop {
            match cur {
                ListTerm::Nil => return false,
                ListTerm::Tail(_) => return true,
                ListTerm::Cons(_, tail) => cur = tail,
            }
        }
    }

    pub fn collect_variables(&self, vars: &mut HashSet<Variable>) {
        let mut cur = self;
        loop {
            match cur {
                ListTerm::Nil => return,
                ListTerm::Tail(v) => {
                    vars.insert(*v);
                    return;
                }
                ListTerm::Cons(head, tail) => {
                    head.collect_variables(vars);
                    cur = tail;
                }
            }
        }
    }
}

impl Term {
    /// Variables occurring in this term, in no particular order
    pub fn variables(&self) -> HashSet<Variable> {
        let mut vars = HashSet::new();
        self.collect_variables(&mut vars);
        vars
    }

    pub fn collect_variables(&self, vars: &mut HashSet<Variable>) {
        match self {
            Term::Constant(_) | Term::Wildcard => {}
            Term::Var(v) => {
                vars.insert(*v);
            }
            Term::Compound(_, args) => {
                for arg in args {
                    arg.collect_variables(vars);
                }
            }
            Term::List(list) => list.collect_variables(vars),
        }
    }

    /// Variables in first-appearance order (left to right, depth first).
    /// The render layer uses this to list query bindings deterministically.
    pub fn variables_ordered(&self) -> Vec<Variable> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        self.push_variables_ordered(&mut seen, &mut out);
        out
    }

    fn push_variables_ordered(&self, seen: &mut HashSet<VarId>, out: &mut Vec<Variable>) {
        match self {
            Term::Constant(_) | Term::Wildcard => {}
            Term::Var(v) => {
                if seen.insert(v.id) {
                    out.push(*v);
                }
            }
            Term::Compound(_, args) => {
                for arg in args {
                    arg.push_variables_ordered(seen, out);
                }
            }
            Term::List(list) => {
                let mut cur = list;
                loop {
                    match cur {
                        ListTerm::Nil => break,
                        ListTerm::Tail(v) => {
                            if seen.insert(v.id) {
                                out.push(*v);
                            }
                            break;
                        }
                        ListTerm::Cons(head, tail) => {
                            head.push_variables_ordered(seen, out);
                            cur = tail;
                        }
                    }
                }
            }
        }
    }

    /// Format this term with a symbol table for name resolution
    pub fn display<'a>(&'a self, symbols: &'a SymbolTable) -> TermDisplay<'a> {
        TermDisplay {
            term: self,
            symbols,
        }
    }
}

// Display wrappers

/// Display wrapper for Term that resolves symbol names
pub struct TermDisplay<'a> {
    term: &'a Term,
    symbols: &'a SymbolTable,
}

impl<'a> fmt::Display for TermDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_term(self.term, self.symbols, f)
    }
}

fn fmt_term(term: &Term, symbols: &SymbolTable, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match term {
        Term::Constant(c) => write!(f, "{}", symbols.constant_text(c.id)),
        Term::Var(v) => {
            // Disambiguate renamed copies: same display name, distinct id
            write!(f, "{}_{}", symbols.variable_name(v.id), v.id.as_u32())
        }
        Term::Wildcard => write!(f, "_"),
        Term::Compound(functor, args) => {
            write!(f, "{}(", symbols.functor_name(functor.id))?;
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                fmt_term(arg, symbols, f)?;
            }
            write!(f, ")")
        }
        Term::List(list) => {
            write!(f, "[")?;
            let mut cur = list;
            let mut first = true;
            loop {
                match cur {
                    ListTerm::Nil => break,
                    ListTerm::Tail(v) => {
                        write!(f, "|{}_{}", symbols.variable_name(v.id), v.id.as_u32())?;
                        break;
                    }
                    ListTerm::Cons(head, tail) => {
                        if !first {
                            write!(f, ",")?;
                        }
                        first = false;
                        fmt_term(head, symbols, f)?;
                        cur = tail;
                    }
                }
            }
            write!(f, "]")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols() -> SymbolTable {
        SymbolTable::new()
    }

    #[test]
    fn test_list_from_vec() {
        let mut sym = symbols();
        let a = Term::Constant(Constant::new(sym.intern_constant("a")));
        let b = Term::Constant(Constant::new(sym.intern_constant("b")));

        let list = ListTerm::from_vec(vec![a, b]);
        assert_eq!(list.prefix_len(), 2);
        assert!(!list.is_open());
    }

    #[test]
    fn test_open_list() {
        let mut sym = symbols();
        let a = Term::Constant(Constant::new(sym.intern_constant("a")));
        let t = Variable::new(sym.fresh_variable("T"));

        let list = ListTerm::with_tail(vec![a], t);
        assert_eq!(list.prefix_len(), 1);
        assert!(list.is_open());

        let mut vars = HashSet::new();
        list.collect_variables(&mut vars);
        assert!(vars.contains(&t));
    }

    #[test]
    fn test_variables_ordered() {
        let mut sym = symbols();
        let f = Functor::new(sym.intern_functor("f"));
        let x = Variable::new(sym.fresh_variable("X"));
        let y = Variable::new(sym.fresh_variable("Y"));

        let term = Term::Compound(
            f,
            vec![Term::Var(x), Term::Var(y), Term::Var(x)],
        );
        assert_eq!(term.variables_ordered(), vec![x, y]);
    }

    #[test]
    fn test_display() {
        let mut sym = symbols();
        let f = Functor::new(sym.intern_functor("parent"));
        let bill = Term::Constant(Constant::new(sym.intern_constant("bill")));
        let x = Variable::new(sym.fresh_variable("X"));

        let term = Term::Compound(f, vec![bill, Term::Var(x)]);
        assert_eq!(term.display(&sym).to_string(), "parent(bill,X_0)");
    }
}
