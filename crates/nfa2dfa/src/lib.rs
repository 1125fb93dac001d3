//! This crate converts nondeterministic finite automata with epsilon
//! transitions (ε-NFAs) into equivalent deterministic automata using the
//! subset construction, and classifies words with the result.
//!
//! # Usage
//!
//! ```
//! use nfa2dfa::{Verdict, WordClassifier, convert_to_dfa, parse_automaton};
//!
//! let nfa = parse_automaton("a b\nq0 q1\nq1\nq0\nq0 a q1\nq0 a q0\nq1 b q1\n").unwrap();
//! let dfa = convert_to_dfa(&nfa);
//!
//! let classifier = WordClassifier::new(&dfa);
//! assert_eq!(classifier.classify("aab"), Verdict::Accept);
//! assert_eq!(classifier.classify("ba"), Verdict::Reject);
//! assert_eq!(classifier.classify("ac"), Verdict::Invalid);
//! ```
//!
//! The DFA is built once and can then classify any number of words. It is
//! never minimized.

use indexmap::IndexMap;

mod automaton;
mod config;
mod error;
mod loader;

pub use automaton::*;
pub use config::{ClassifierConfig, ConstructionConfig, EpsilonInWord, WorklistOrder};
pub use error::{AutomatonError, LoadError};
pub use loader::{load_automaton, parse_automaton};

/// Convert an epsilon-NFA into an equivalent DFA.
pub fn convert_to_dfa(nfa: &EpsilonNFA) -> DFA {
    subset_construction(nfa)
}

/// Classify each of `words` with `dfa`, validating symbols against
/// `alphabet`. The result keeps the order in which words first appear.
pub fn classify_words<I, S>(dfa: &DFA, alphabet: &Alphabet, words: I) -> IndexMap<String, Verdict>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    WordClassifier::with_alphabet(dfa, alphabet).classify_words(words)
}
