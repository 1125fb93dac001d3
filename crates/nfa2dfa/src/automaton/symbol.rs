//! Symbol types for automata transitions.

use indexmap::IndexSet;

use crate::error::AutomatonError;

/// A symbol identifier represented as a u32.
/// The special value `EPSILON` represents an epsilon (empty) transition.
pub type SymbolId = u32;

/// Special symbol ID representing epsilon (empty) transitions.
/// We use u32::MAX as the epsilon marker.
pub const EPSILON: SymbolId = u32::MAX;

/// Character that denotes an epsilon transition in textual descriptions.
pub const EPSILON_MARKER: char = '&';

/// Check if a symbol is an epsilon transition.
#[inline]
pub fn is_epsilon(symbol: SymbolId) -> bool {
    symbol == EPSILON
}

/// The set of input symbols of an automaton.
///
/// Symbols keep their declaration order, and each one is identified by its
/// position in that order. The epsilon marker is never a member.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alphabet {
    symbols: IndexSet<char>,
}

impl Alphabet {
    /// Create an empty alphabet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an alphabet from a sequence of symbols. Duplicates are ignored.
    pub fn from_symbols<I>(symbols: I) -> Result<Self, AutomatonError>
    where
        I: IntoIterator<Item = char>,
    {
        let mut alphabet = Self::new();
        for symbol in symbols {
            alphabet.insert(symbol)?;
        }
        Ok(alphabet)
    }

    /// Add a symbol and return its ID. Adding an existing symbol returns
    /// the ID it already has.
    pub fn insert(&mut self, symbol: char) -> Result<SymbolId, AutomatonError> {
        if symbol == EPSILON_MARKER {
            return Err(AutomatonError::EpsilonInAlphabet);
        }
        let (index, _) = self.symbols.insert_full(symbol);
        Ok(index as SymbolId)
    }

    /// Get the ID of a symbol, if it belongs to the alphabet.
    pub fn id(&self, symbol: char) -> Option<SymbolId> {
        self.symbols.get_index_of(&symbol).map(|i| i as SymbolId)
    }

    /// Get the symbol with the given ID. Returns `None` for `EPSILON`.
    pub fn symbol(&self, id: SymbolId) -> Option<char> {
        if is_epsilon(id) {
            None
        } else {
            self.symbols.get_index(id as usize).copied()
        }
    }

    pub fn contains(&self, symbol: char) -> bool {
        self.symbols.contains(&symbol)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Iterate over `(id, symbol)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, char)> + '_ {
        self.symbols
            .iter()
            .enumerate()
            .map(|(i, &symbol)| (i as SymbolId, symbol))
    }

    /// Iterate over all symbol IDs in declaration order.
    pub fn ids(&self) -> impl Iterator<Item = SymbolId> {
        0..self.symbols.len() as SymbolId
    }
}
