//! Textual clause and query syntax
//!
//! Prolog-flavored surface syntax:
//!
//! ```text
//! parent(bill, audrey).
//! ancestor(X, Y) :- parent(X, Z), ancestor(Z, Y).
//! good_job(X) :- !, job(X), pay(X, high).
//! member(X, [X|_]).
//! ```
//!
//! `,` is conjunction, `;` disjunction, `not(G)` negation, `!` cut.
//! Capitalized or underscore-led identifiers are variables, a bare `_` is
//! the wildcard, `%` starts a line comment. Parsing yields plain terms;
//! within one clause, occurrences of the same variable name share one
//! freshly-minted identity (standardizing apart happens later, at clause
//! fetch).

use crate::logic::interner::{SymbolTable, VarId};
use crate::logic::term::{Constant, Functor, ListTerm, Term, Variable};
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char, digit1, multispace1, satisfy},
    combinator::{map, opt, recognize, value},
    multi::{many0, separated_list1},
    sequence::{delimited, pair, preceded, terminated, tuple},
    IResult,
};
use std::collections::HashMap;
use thiserror::Error;

/// Errors from the text reader
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("syntax error near `{near}`")]
    Syntax { near: String },

    #[error("unexpected trailing input near `{near}`")]
    Trailing { near: String },

    #[error("list tail must be a variable or a list, near `{near}`")]
    BadListTail { near: String },
}

fn near(input: &str) -> String {
    let trimmed = input.trim_start();
    let mut end = 0;
    for (count, (offset, ch)) in trimmed.char_indices().enumerate() {
        if count == 24 {
            break;
        }
        end = offset + ch.len_utf8();
    }
    trimmed[..end].to_string()
}

/// A clause as read from text: head term plus optional raw body term.
/// Goal assembly (control operators, builtins) happens in the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedClause {
    pub head: Term,
    pub body: Option<Term>,
}

// === Raw syntax tree (names, before interning) ===

#[derive(Debug, Clone, PartialEq)]
enum Ast {
    Atom(String),
    Number(String),
    Var(String),
    Wildcard,
    Compound(String, Vec<Ast>),
    List(Vec<Ast>, Option<Box<Ast>>),
}

#[derive(Debug, Clone, PartialEq)]
struct AstClause {
    head: Ast,
    body: Option<Ast>,
}

// === Lexical helpers ===

fn comment(input: &str) -> IResult<&str, ()> {
    value((), preceded(char('%'), take_while(|c| c != '\n')))(input)
}

/// Whitespace and comments
fn sp(input: &str) -> IResult<&str, ()> {
    value((), many0(alt((value((), multispace1), comment))))(input)
}

fn token<'a>(t: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str> {
    preceded(sp, tag(t))
}

fn ident_rest(input: &str) -> IResult<&str, &str> {
    take_while(|c: char| c.is_ascii_alphanumeric() || c == '_')(input)
}

fn atom_name(input: &str) -> IResult<&str, String> {
    preceded(
        sp,
        alt((
            map(
                recognize(pair(satisfy(|c| c.is_ascii_lowercase()), ident_rest)),
                str::to_string,
            ),
            // Quoted atoms may hold arbitrary text
            map(
                delimited(char('\''), take_while(|c| c != '\''), char('\'')),
                str::to_string,
            ),
        )),
    )(input)
}

fn number(input: &str) -> IResult<&str, Ast> {
    map(
        preceded(
            sp,
            recognize(tuple((
                opt(char('-')),
                digit1,
                opt(pair(char('.'), digit1)),
            ))),
        ),
        |text: &str| Ast::Number(text.to_string()),
    )(input)
}

fn variable(input: &str) -> IResult<&str, Ast> {
    map(
        preceded(
            sp,
            alt((
                recognize(pair(satisfy(|c| c.is_ascii_uppercase()), ident_rest)),
                recognize(pair(char('_'), take_while1(|c: char| {
                    c.is_ascii_alphanumeric() || c == '_'
                }))),
            )),
        ),
        |name: &str| Ast::Var(name.to_string()),
    )(input)
}

fn wildcard(input: &str) -> IResult<&str, Ast> {
    value(Ast::Wildcard, preceded(sp, char('_')))(input)
}

// === Terms ===

fn list(input: &str) -> IResult<&str, Ast> {
    let (rest, _) = token("[")(input)?;
    if let Ok((rest, _)) = token("]")(rest) {
        return Ok((rest, Ast::List(vec![], None)));
    }
    let (rest, items) = separated_list1(token(","), term)(rest)?;
    let (rest, tail) = opt(preceded(token("|"), term))(rest)?;
    let (rest, _) = token("]")(rest)?;
    Ok((rest, Ast::List(items, tail.map(Box::new))))
}

fn atom_or_compound(input: &str) -> IResult<&str, Ast> {
    let (rest, name) = atom_name(input)?;
    // No space between functor and argument list
    let args: IResult<&str, Vec<Ast>> = delimited(
        char('('),
        separated_list1(token(","), term),
        token(")"),
    )(rest);
    match args {
        Ok((rest, args)) => Ok((rest, Ast::Compound(name, args))),
        Err(_) => Ok((rest, Ast::Atom(name))),
    }
}

fn term(input: &str) -> IResult<&str, Ast> {
    alt((list, number, variable, wildcard, atom_or_compound))(input)
}

// === Clause bodies ===
// Right-nested binary `,` and `;` compounds; goal assembly flattens them.

fn primary(input: &str) -> IResult<&str, Ast> {
    alt((
        value(Ast::Atom("!".to_string()), token("!")),
        delimited(token("("), body, token(")")),
        term,
    ))(input)
}

fn conjunction(input: &str) -> IResult<&str, Ast> {
    map(separated_list1(token(","), primary), fold_op(","))(input)
}

fn body(input: &str) -> IResult<&str, Ast> {
    map(separated_list1(token(";"), conjunction), fold_op(";"))(input)
}

fn fold_op(op: &'static str) -> impl Fn(Vec<Ast>) -> Ast {
    move |mut items: Vec<Ast>| {
        let mut acc = items.pop().expect("separated_list1 yields at least one");
        while let Some(item) = items.pop() {
            acc = Ast::Compound(op.to_string(), vec![item, acc]);
        }
        acc
    }
}

fn clause(input: &str) -> IResult<&str, AstClause> {
    map(
        terminated(
            pair(term, opt(preceded(token(":-"), body))),
            token("."),
        ),
        |(head, body)| AstClause { head, body },
    )(input)
}

// === Interning the raw tree ===

struct ClauseScope<'s> {
    symbols: &'s mut SymbolTable,
    vars: HashMap<String, VarId>,
}

impl<'s> ClauseScope<'s> {
    fn new(symbols: &'s mut SymbolTable) -> Self {
        ClauseScope {
            symbols,
            vars: HashMap::new(),
        }
    }

    fn variable(&mut self, name: &str) -> Variable {
        if let Some(&id) = self.vars.get(name) {
            return Variable::new(id);
        }
        let id = self.symbols.fresh_variable(name);
        self.vars.insert(name.to_string(), id);
        Variable::new(id)
    }

    fn build(&mut self, ast: &Ast) -> Result<Term, ParseError> {
        match ast {
            Ast::Atom(text) | Ast::Number(text) => Ok(Term::Constant(Constant::new(
                self.symbols.intern_constant(text),
            ))),
            Ast::Var(name) => Ok(Term::Var(self.variable(name))),
            Ast::Wildcard => Ok(Term::Wildcard),
            Ast::Compound(name, args) => {
                let functor = Functor::new(self.symbols.intern_functor(name));
                let built = args
                    .iter()
                    .map(|arg| self.build(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Term::Compound(functor, built))
            }
            Ast::List(items, tail) => {
                let built = items
                    .iter()
                    .map(|item| self.build(item))
                    .collect::<Result<Vec<_>, _>>()?;
                let list = match tail.as_deref() {
                    None => ListTerm::from_vec(built),
                    Some(Ast::Var(name)) => ListTerm::with_tail(built, self.variable(name)),
                    // `[a|_]`: an anonymous remainder is a fresh variable
                    Some(Ast::Wildcard) => {
                        let anon = Variable::new(self.symbols.fresh_variable("_"));
                        ListTerm::with_tail(built, anon)
                    }
                    Some(inner @ Ast::List(..)) => {
                        let tail_term = self.build(inner)?;
                        match tail_term {
                            Term::List(tail_list) => prepend(built, tail_list),
                            _ => unreachable!("list ast builds a list term"),
                        }
                    }
                    Some(other) => {
                        return Err(ParseError::BadListTail {
                            near: format!("{:?}", other),
                        })
                    }
                };
                Ok(Term::List(list))
            }
        }
    }
}

fn prepend(items: Vec<Term>, tail: ListTerm) -> ListTerm {
    let mut list = tail;
    for item in items.into_iter().rev() {
        list = ListTerm::Cons(Box::new(item), Box::new(list));
    }
    list
}

// === Public entry points ===

/// Parse a whole program: a sequence of clauses.
///
/// Each clause gets its own variable scope: `X` in one clause never shares
/// identity with `X` in another.
pub fn parse_program(
    source: &str,
    symbols: &mut SymbolTable,
) -> Result<Vec<ParsedClause>, ParseError> {
    let mut clauses = Vec::new();
    let mut rest = source;
    loop {
        let (after_ws, _) = sp(rest).map_err(|_| ParseError::Syntax { near: near(rest) })?;
        if after_ws.is_empty() {
            return Ok(clauses);
        }
        let (after, ast) = clause(after_ws).map_err(|_| ParseError::Syntax {
            near: near(after_ws),
        })?;
        let mut scope = ClauseScope::new(symbols);
        let head = scope.build(&ast.head)?;
        let body = ast.body.as_ref().map(|b| scope.build(b)).transpose()?;
        clauses.push(ParsedClause { head, body });
        rest = after;
    }
}

/// Parse a query: a clause body with an optional trailing `.`
pub fn parse_query(source: &str, symbols: &mut SymbolTable) -> Result<Term, ParseError> {
    let (rest, ast) = body(source).map_err(|_| ParseError::Syntax { near: near(source) })?;
    let (rest, _) = opt(token("."))(rest).map_err(|_: nom::Err<nom::error::Error<&str>>| {
        ParseError::Syntax { near: near(rest) }
    })?;
    let (rest, _) = sp(rest).map_err(|_| ParseError::Syntax { near: near(rest) })?;
    if !rest.is_empty() {
        return Err(ParseError::Trailing { near: near(rest) });
    }
    let mut scope = ClauseScope::new(symbols);
    scope.build(&ast)
}
