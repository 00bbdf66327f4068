//! Symbol interning for the term model
//!
//! Constant and functor names are interned get-or-create style: the same
//! text always resolves to the same id, so comparison is an integer
//! compare instead of a string compare.
//!
//! Variables are different. A variable is an *identity*, not a name: two
//! occurrences of `X` in different clause instantiations must not share an
//! id. The variable arena is therefore append-only and never deduplicates;
//! `fresh_variable` is the single minting point in the crate, and the total
//! minted count feeds the variable-ceiling execution guard.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Id of an interned constant text
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstId(pub(crate) u32);

/// Id of an interned functor (compound/predicate name)
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FunctorId(pub(crate) u32);

/// Identity of a variable. Monotonically assigned, never reused.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(pub(crate) u32);

impl ConstId {
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl FunctorId {
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl VarId {
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

/// Deduplicating string arena for one symbol kind
#[derive(Debug, Clone, Default)]
struct StringArena {
    strings: Vec<String>,
    lookup: HashMap<String, u32>,
}

impl StringArena {
    fn intern(&mut self, name: &str) -> u32 {
        if let Some(&id) = self.lookup.get(name) {
            return id;
        }
        let id = self.strings.len() as u32;
        self.strings.push(name.to_string());
        self.lookup.insert(name.to_string(), id);
        id
    }

    fn resolve(&self, id: u32) -> &str {
        &self.strings[id as usize]
    }

    fn get(&self, name: &str) -> Option<u32> {
        self.lookup.get(name).copied()
    }

    fn len(&self) -> usize {
        self.strings.len()
    }
}

/// Symbol table for the whole engine
///
/// Owned by the engine and threaded through parsing, clause renaming, and
/// rendering rather than living in global state, so independent engines
/// never interfere.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    constants: StringArena,
    functors: StringArena,
    /// Display names of minted variables, indexed by id. Names repeat;
    /// ids do not.
    variable_names: Vec<String>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable::default()
    }

    // === Constants ===

    /// Intern a constant text, returning its id (get-or-create)
    pub fn intern_constant(&mut self, text: &str) -> ConstId {
        ConstId(self.constants.intern(text))
    }

    /// Resolve a constant id to its text
    pub fn constant_text(&self, id: ConstId) -> &str {
        self.constants.resolve(id.0)
    }

    /// Get the id for an already-interned constant
    pub fn get_constant(&self, text: &str) -> Option<ConstId> {
        self.constants.get(text).map(ConstId)
    }

    /// Numeric value of a constant, if its text parses as a number.
    ///
    /// This is the basis of numeric constant equality: `1` and `1.0` are
    /// distinct interned texts but equal numbers.
    pub fn constant_number(&self, id: ConstId) -> Option<f64> {
        self.constant_text(id).parse::<f64>().ok()
    }

    pub fn constant_count(&self) -> usize {
        self.constants.len()
    }

    // === Functors ===

    /// Intern a functor name, returning its id (get-or-create)
    pub fn intern_functor(&mut self, name: &str) -> FunctorId {
        FunctorId(self.functors.intern(name))
    }

    /// Resolve a functor id to its name
    pub fn functor_name(&self, id: FunctorId) -> &str {
        self.functors.resolve(id.0)
    }

    /// Get the id for an already-interned functor
    pub fn get_functor(&self, name: &str) -> Option<FunctorId> {
        self.functors.get(name).map(FunctorId)
    }

    pub fn functor_count(&self) -> usize {
        self.functors.len()
    }

    // === Variables ===

    /// Mint a new variable identity with the given display name.
    ///
    /// Always returns a fresh id, even for a name minted before. This is
    /// the only place in the crate where variable ids come from.
    pub fn fresh_variable(&mut self, name: &str) -> VarId {
        let id = VarId(self.variable_names.len() as u32);
        self.variable_names.push(name.to_string());
        id
    }

    /// Display name of a variable
    pub fn variable_name(&self, id: VarId) -> &str {
        &self.variable_names[id.0 as usize]
    }

    /// Total number of variable identities minted so far
    pub fn variable_count(&self) -> usize {
        self.variable_names.len()
    }
}

impl fmt::Display for ConstId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

impl fmt::Display for FunctorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f{}", self.0)
    }
}

impl fmt::Display for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_{}", self.0)
    }
}

// === Serde implementations ===
// Ids serialize as raw u32; name resolution happens in the render layer.

impl Serialize for ConstId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ConstId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u32::deserialize(deserializer).map(ConstId)
    }
}

impl Serialize for FunctorId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FunctorId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u32::deserialize(deserializer).map(FunctorId)
    }
}

impl Serialize for VarId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for VarId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u32::deserialize(deserializer).map(VarId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_interning() {
        let mut symbols = SymbolTable::new();

        let a = symbols.intern_constant("a");
        let b = symbols.intern_constant("b");
        let a2 = symbols.intern_constant("a");

        assert_eq!(a, a2);
        assert_ne!(a, b);
        assert_eq!(symbols.constant_text(a), "a");
        assert_eq!(symbols.constant_count(), 2);
    }

    #[test]
    fn test_functor_interning() {
        let mut symbols = SymbolTable::new();

        let f = symbols.intern_functor("parent");
        let g = symbols.intern_functor("ancestor");
        let f2 = symbols.intern_functor("parent");

        assert_eq!(f, f2);
        assert_ne!(f, g);
        assert_eq!(symbols.functor_name(f), "parent");
    }

    #[test]
    fn test_variables_never_deduplicate() {
        let mut symbols = SymbolTable::new();

        let x1 = symbols.fresh_variable("X");
        let x2 = symbols.fresh_variable("X");

        assert_ne!(x1, x2);
        assert_eq!(symbols.variable_name(x1), "X");
        assert_eq!(symbols.variable_name(x2), "X");
        assert_eq!(symbols.variable_count(), 2);
    }

    #[test]
    fn test_variable_ids_monotonic() {
        let mut symbols = SymbolTable::new();

        let a = symbols.fresh_variable("A");
        let b = symbols.fresh_variable("B");
        assert!(a < b);
    }

    #[test]
    fn test_constant_number() {
        let mut symbols = SymbolTable::new();

        let one = symbols.intern_constant("1");
        let one_dot = symbols.intern_constant("1.0");
        let abc = symbols.intern_constant("abc");

        assert_eq!(symbols.constant_number(one), Some(1.0));
        assert_eq!(symbols.constant_number(one_dot), Some(1.0));
        assert_eq!(symbols.constant_number(abc), None);
    }
}
