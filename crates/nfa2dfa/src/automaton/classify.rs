//! Classification of input words with a DFA.

use crate::automaton::dfa::DFA;
use crate::automaton::symbol::{Alphabet, EPSILON_MARKER};
use crate::config::{ClassifierConfig, EpsilonInWord};
use indexmap::IndexMap;
use log::trace;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The outcome of classifying a word.
///
/// All three verdicts are regular results: a word with foreign symbols is
/// `Invalid`, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Accept,
    Reject,
    Invalid,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Verdict::Accept => "ACCEPT",
            Verdict::Reject => "REJECT",
            Verdict::Invalid => "INVALID",
        })
    }
}

/// Classify `word` with `dfa`, validating its symbols against `alphabet`.
pub fn classify(dfa: &DFA, alphabet: &Alphabet, word: &str) -> Verdict {
    WordClassifier::with_alphabet(dfa, alphabet).classify(word)
}

/// Walks a DFA over input words.
///
/// The classifier only reads the DFA, so one DFA can back any number of
/// classifiers, on any number of threads.
#[derive(Debug, Clone, Copy)]
pub struct WordClassifier<'a> {
    dfa: &'a DFA,
    alphabet: &'a Alphabet,
    config: ClassifierConfig,
}

impl<'a> WordClassifier<'a> {
    /// Create a classifier that validates words against the DFA's own
    /// alphabet.
    pub fn new(dfa: &'a DFA) -> Self {
        Self::with_alphabet(dfa, dfa.alphabet())
    }

    /// Create a classifier that validates words against `alphabet`.
    pub fn with_alphabet(dfa: &'a DFA, alphabet: &'a Alphabet) -> Self {
        Self {
            dfa,
            alphabet,
            config: ClassifierConfig::default(),
        }
    }

    pub fn config(mut self, config: ClassifierConfig) -> Self {
        self.config = config;
        self
    }

    /// Check that every symbol of `word` may appear in a word.
    fn is_valid(&self, word: &str) -> bool {
        word.chars().all(|symbol| {
            self.alphabet.contains(symbol)
                || (symbol == EPSILON_MARKER
                    && self.config.epsilon_in_word != EpsilonInWord::Invalid)
        })
    }

    /// Classify a single word.
    ///
    /// A word holding any symbol outside the alphabet is `Invalid`, whatever
    /// the DFA looks like. Otherwise the word is `Reject`ed as soon as a
    /// transition is missing, and after the last symbol it is `Accept`ed iff
    /// the DFA is in a final state.
    pub fn classify(&self, word: &str) -> Verdict {
        if !self.is_valid(word) {
            trace!("{word:?}: invalid symbol");
            return Verdict::Invalid;
        }

        let mut current = self.dfa.start_state();
        for symbol in word.chars() {
            if symbol == EPSILON_MARKER && self.config.epsilon_in_word == EpsilonInWord::Skip {
                continue;
            }
            match self.dfa.next_state(current, symbol) {
                Some(next) => current = next,
                None => {
                    trace!(
                        "{word:?}: no transition from {} on {symbol:?}",
                        self.dfa.state_name(current)
                    );
                    return Verdict::Reject;
                }
            }
        }

        if self.dfa.is_final(current) {
            Verdict::Accept
        } else {
            Verdict::Reject
        }
    }

    /// Classify every word, keeping the order in which words first appear.
    pub fn classify_words<I, S>(&self, words: I) -> IndexMap<String, Verdict>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        words
            .into_iter()
            .map(|word| {
                let word = word.as_ref();
                (word.to_owned(), self.classify(word))
            })
            .collect()
    }

    /// Like [`WordClassifier::classify_words`], but classifies the words in
    /// parallel.
    pub fn classify_words_par<S>(&self, words: &[S]) -> IndexMap<String, Verdict>
    where
        S: AsRef<str> + Sync,
    {
        let verdicts: Vec<(String, Verdict)> = words
            .par_iter()
            .map(|word| {
                let word = word.as_ref();
                (word.to_owned(), self.classify(word))
            })
            .collect();
        verdicts.into_iter().collect()
    }
}
