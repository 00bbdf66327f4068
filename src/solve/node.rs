//! Solution nodes: the resumable search tree
//!
//! Each goal kind maps to one node type implementing a pull-based
//! `next()`; nodes compose into a tree mirroring the goal structure and
//! keep explicit state (clause index, active child, exhausted flag) so
//! every call resumes where the previous one left off. Exhaustion is
//! permanent and idempotent.
//!
//! Cut travels as a flag on steps, both solutions and exhaustions:
//! conjunction and disjunction nodes that see it deliver the solution in
//! flight (if one completes) and are then permanently exhausted; the
//! nearest enclosing call node absorbs the flag and abandons its remaining
//! clause alternatives. Structural errors and guard aborts cross node
//! boundaries unimpeded via `Result`; only unification mismatch and
//! exhaustion are absorbed as "try the next alternative".

use super::context::SearchContext;
use crate::error::SolveError;
use crate::logic::bindings::Bindings;
use crate::logic::clause::Clause;
use crate::logic::database::PredicateKey;
use crate::logic::goal::Goal;
use crate::logic::term::{Functor, Term};
use crate::unify::unify;
use std::collections::VecDeque;

/// One pull from a solution node. The `cut` flag tells ancestors up to
/// the enclosing call node to stop offering alternatives.
#[derive(Debug)]
pub enum Step {
    Solution { env: Bindings, cut: bool },
    Exhausted { cut: bool },
}

#[derive(Debug)]
pub enum Node {
    Call(CallNode),
    And(AndNode),
    Or(OrNode),
    Not(NotNode),
    Cut(CutNode),
    Builtin(BuiltinNode),
}

impl Node {
    /// Build the node tree for a goal under an environment
    pub fn build(goal: Goal, env: Bindings) -> Node {
        match goal {
            Goal::Call(term) => Node::Call(CallNode::new(term, env)),
            Goal::And(goals) => Node::And(AndNode::new(goals, env)),
            Goal::Or(alternatives) => Node::Or(OrNode::new(alternatives, env)),
            Goal::Not(operand) => Node::Not(NotNode::new(*operand, env)),
            Goal::Cut => Node::Cut(CutNode::new(env)),
            Goal::Builtin { functor, args } => Node::Builtin(BuiltinNode::new(functor, args, env)),
        }
    }

    pub fn next(&mut self, ctx: &mut SearchContext) -> Result<Step, SolveError> {
        match self {
            Node::Call(node) => node.next(ctx),
            Node::And(node) => node.next(ctx),
            Node::Or(node) => node.next(ctx),
            Node::Not(node) => node.next(ctx),
            Node::Cut(node) => node.next(ctx),
            Node::Builtin(node) => node.next(ctx),
        }
    }
}

// === Compound call ===

/// Tries the candidate clauses for a predicate in declaration order.
///
/// The candidate list is snapshotted at first activation, so database
/// edits made while this proof is in flight only affect future lookups.
/// Cut signals from the clause body stop here.
#[derive(Debug)]
pub struct CallNode {
    goal: Term,
    env: Bindings,
    candidates: Vec<Clause>,
    activated: bool,
    idx: usize,
    body: Option<Box<Node>>,
    committed: bool,
    exhausted: bool,
}

impl CallNode {
    pub fn new(goal: Term, env: Bindings) -> Self {
        CallNode {
            goal,
            env,
            candidates: Vec::new(),
            activated: false,
            idx: 0,
            body: None,
            committed: false,
            exhausted: false,
        }
    }

    fn next(&mut self, ctx: &mut SearchContext) -> Result<Step, SolveError> {
        if self.exhausted {
            return Ok(Step::Exhausted { cut: false });
        }

        if !self.activated {
            self.activated = true;
            ctx.check_guards()?;
            let key = PredicateKey::for_term(&self.goal, ctx.symbols).ok_or_else(|| {
                SolveError::MalformedGoal(format!(
                    "uncallable goal {}",
                    self.goal.display(ctx.symbols)
                ))
            })?;
            self.candidates = ctx.db.lookup(key).to_vec();
            log::debug!(
                "call {}: {} candidate clause(s)",
                self.goal.display(ctx.symbols),
                self.candidates.len()
            );
        }

        loop {
            if let Some(body) = self.body.as_mut() {
                match body.next(ctx)? {
                    Step::Solution { env, cut } => {
                        if cut {
                            // The cut stops here: drop the remaining
                            // clause alternatives, don't propagate.
                            self.committed = true;
                            log::trace!("cut committed call to clause {}", self.idx);
                        }
                        return Ok(Step::Solution { env, cut: false });
                    }
                    Step::Exhausted { cut } => {
                        self.body = None;
                        if cut {
                            self.committed = true;
                        }
                        if self.committed {
                            self.exhausted = true;
                            return Ok(Step::Exhausted { cut: false });
                        }
                    }
                }
            }

            if self.idx >= self.candidates.len() {
                self.exhausted = true;
                return Ok(Step::Exhausted { cut: false });
            }

            ctx.check_guards()?;
            let clause = self.candidates[self.idx].rename(ctx.symbols);
            self.idx += 1;

            if let Some(env) = unify(&self.goal, &clause.head, &self.env, ctx.symbols) {
                match clause.body {
                    // A fact: the unified environment is the solution
                    None => return Ok(Step::Solution { env, cut: false }),
                    Some(goal) => self.body = Some(Box::new(Node::build(goal, env))),
                }
            }
        }
    }
}

// === Conjunction ===

/// Depth-first, left-to-right conjunction with backtracking: each solution
/// of goal i drives goals i+1.. to exhaustion before goal i is resumed.
/// Once a cut fires anywhere below, the node delivers at most the solution
/// in flight and is then permanently exhausted.
#[derive(Debug)]
pub struct AndNode {
    goals: Vec<Goal>,
    env: Bindings,
    stack: Vec<Node>,
    cut_seen: bool,
    exhausted: bool,
}

impl AndNode {
    pub fn new(goals: Vec<Goal>, env: Bindings) -> Self {
        AndNode {
            goals,
            env,
            stack: Vec::new(),
            cut_seen: false,
            exhausted: false,
        }
    }

    fn next(&mut self, ctx: &mut SearchContext) -> Result<Step, SolveError> {
        if self.exhausted {
            return Ok(Step::Exhausted { cut: false });
        }
        if self.goals.is_empty() {
            // Vacuous truth, once
            self.exhausted = true;
            return Ok(Step::Solution {
                env: self.env.clone(),
                cut: false,
            });
        }
        if self.stack.is_empty() {
            self.stack
                .push(Node::build(self.goals[0].clone(), self.env.clone()));
        }

        loop {
            let depth = self.stack.len() - 1;
            match self.stack[depth].next(ctx)? {
                Step::Solution { env, cut } => {
                    if cut {
                        self.cut_seen = true;
                    }
                    if depth + 1 == self.goals.len() {
                        if self.cut_seen {
                            // Committed: the solution in flight is the last
                            self.exhausted = true;
                        }
                        return Ok(Step::Solution {
                            env,
                            cut: self.cut_seen,
                        });
                    }
                    self.stack
                        .push(Node::build(self.goals[depth + 1].clone(), env));
                }
                Step::Exhausted { cut } => {
                    if cut {
                        self.cut_seen = true;
                    }
                    if self.cut_seen {
                        self.exhausted = true;
                        return Ok(Step::Exhausted { cut: true });
                    }
                    self.stack.pop();
                    if self.stack.is_empty() {
                        self.exhausted = true;
                        return Ok(Step::Exhausted { cut: false });
                    }
                }
            }
        }
    }
}

// === Disjunction ===

/// Exhausts alternatives strictly in declaration order, never
/// interleaving. A cut inside an alternative prunes the rest.
#[derive(Debug)]
pub struct OrNode {
    alternatives: Vec<Goal>,
    env: Bindings,
    idx: usize,
    active: Option<Box<Node>>,
    cut_seen: bool,
    exhausted: bool,
}

impl OrNode {
    pub fn new(alternatives: Vec<Goal>, env: Bindings) -> Self {
        OrNode {
            alternatives,
            env,
            idx: 0,
            active: None,
            cut_seen: false,
            exhausted: false,
        }
    }

    fn next(&mut self, ctx: &mut SearchContext) -> Result<Step, SolveError> {
        if self.exhausted {
            return Ok(Step::Exhausted { cut: false });
        }
        loop {
            if let Some(active) = self.active.as_mut() {
                match active.next(ctx)? {
                    Step::Solution { env, cut } => {
                        if cut {
                            self.cut_seen = true;
                            self.exhausted = true;
                        }
                        return Ok(Step::Solution {
                            env,
                            cut: self.cut_seen,
                        });
                    }
                    Step::Exhausted { cut } => {
                        self.active = None;
                        if cut {
                            self.cut_seen = true;
                        }
                        if self.cut_seen {
                            self.exhausted = true;
                            return Ok(Step::Exhausted { cut: true });
                        }
                    }
                }
            }

            if self.idx >= self.alternatives.len() {
                self.exhausted = true;
                return Ok(Step::Exhausted { cut: false });
            }
            self.active = Some(Box::new(Node::build(
                self.alternatives[self.idx].clone(),
                self.env.clone(),
            )));
            self.idx += 1;
        }
    }
}

// === Negation ===

/// Negation as failure over one attempt of the operand.
///
/// The operand is expected to be ground; a non-ground operand is the
/// original engine's documented unsoundness, warned about and evaluated
/// anyway. Cut signals never escape the probe.
#[derive(Debug)]
pub struct NotNode {
    operand: Goal,
    env: Bindings,
    done: bool,
}

impl NotNode {
    pub fn new(operand: Goal, env: Bindings) -> Self {
        NotNode {
            operand,
            env,
            done: false,
        }
    }

    fn next(&mut self, ctx: &mut SearchContext) -> Result<Step, SolveError> {
        if self.done {
            return Ok(Step::Exhausted { cut: false });
        }
        self.done = true;

        if !self.operand.is_ground(&self.env) {
            log::warn!("negation over a non-ground goal; the result may be unsound");
        }

        let mut probe = Node::build(self.operand.clone(), self.env.clone());
        match probe.next(ctx)? {
            Step::Solution { .. } => Ok(Step::Exhausted { cut: false }),
            // No proof: negation succeeds once with the caller's
            // environment unchanged
            Step::Exhausted { .. } => Ok(Step::Solution {
                env: self.env.clone(),
                cut: false,
            }),
        }
    }
}

// === Cut ===

#[derive(Debug)]
pub struct CutNode {
    env: Bindings,
    fired: bool,
}

impl CutNode {
    pub fn new(env: Bindings) -> Self {
        CutNode { env, fired: false }
    }

    fn next(&mut self, _ctx: &mut SearchContext) -> Result<Step, SolveError> {
        if self.fired {
            return Ok(Step::Exhausted { cut: false });
        }
        self.fired = true;
        Ok(Step::Solution {
            env: self.env.clone(),
            cut: true,
        })
    }
}

// === Builtin leaf ===

/// Delegates one deterministic step to a registered native predicate.
#[derive(Debug)]
pub struct BuiltinNode {
    functor: Functor,
    args: Vec<Term>,
    env: Bindings,
    stepped: bool,
    pending: VecDeque<Bindings>,
}

impl BuiltinNode {
    pub fn new(functor: Functor, args: Vec<Term>, env: Bindings) -> Self {
        BuiltinNode {
            functor,
            args,
            env,
            stepped: false,
            pending: VecDeque::new(),
        }
    }

    fn next(&mut self, ctx: &mut SearchContext) -> Result<Step, SolveError> {
        if !self.stepped {
            self.stepped = true;
            ctx.check_guards()?;
            let builtin = ctx
                .builtins
                .get(self.functor.id, self.args.len())
                .ok_or_else(|| {
                    SolveError::MalformedGoal(format!(
                        "no builtin registered for {}/{}",
                        ctx.symbols.functor_name(self.functor.id),
                        self.args.len()
                    ))
                })?;
            crate::builtins::check_call(builtin, &self.args, &self.env)?;
            let solutions = builtin.step(&self.args, &self.env, ctx.symbols)?;
            self.pending = solutions.into();
        }

        match self.pending.pop_front() {
            Some(env) => Ok(Step::Solution { env, cut: false }),
            None => Ok(Step::Exhausted { cut: false }),
        }
    }
}
