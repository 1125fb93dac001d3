//! Finite automata: epsilon-NFAs, their determinization, and word
//! classification.
//!
//! This module provides:
//! - Epsilon closure computation
//! - Subset construction (NFA to DFA conversion)
//! - Classification of words with the resulting DFA

mod classify;
mod dfa;
mod epsilon_nfa;
mod state;
mod subset_construction;
mod symbol;

pub use classify::{Verdict, WordClassifier, classify};
pub use dfa::{DFA, DescribedTransition, DfaDescription, STATE_NAME_PREFIX};
pub use epsilon_nfa::{EpsilonNFA, NfaBuilder};
pub use state::{StateId, StateSet};
pub use subset_construction::{SubsetConstructor, subset_construction};
pub use symbol::{Alphabet, EPSILON, EPSILON_MARKER, SymbolId, is_epsilon};
