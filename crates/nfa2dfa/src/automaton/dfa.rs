//! Deterministic Finite Automaton (DFA) produced by the subset construction.

use crate::automaton::classify::{Verdict, WordClassifier};
use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::{Alphabet, SymbolId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Prefix of the synthetic DFA state names (`S0`, `S1`, ...).
pub const STATE_NAME_PREFIX: char = 'S';

/// A Deterministic Finite Automaton.
///
/// States are numbered `0..num_states` in discovery order, and state `0` is
/// always the start state. The transition function is partial: a missing
/// entry means there is no move.
#[derive(Debug, Clone)]
pub struct DFA {
    /// Number of states
    num_states: StateId,
    /// Final (accepting) states
    final_states: StateSet,
    /// Transitions: (source, symbol) -> destination
    transitions: HashMap<(StateId, SymbolId), StateId>,
    /// Input symbols
    alphabet: Alphabet,
    /// NFA configuration each DFA state stands for, indexed by state ID
    configurations: Vec<StateSet>,
}

impl DFA {
    /// Create a DFA holding only its start state.
    pub(crate) fn new(alphabet: Alphabet) -> Self {
        Self {
            num_states: 1,
            final_states: StateSet::with_capacity(16),
            transitions: HashMap::new(),
            alphabet,
            configurations: Vec::new(),
        }
    }

    /// Add a new state and return its ID.
    pub(crate) fn add_state(&mut self) -> StateId {
        let id = self.num_states;
        self.num_states += 1;
        id
    }

    /// Add a final (accepting) state.
    pub(crate) fn add_final_state(&mut self, state: StateId) {
        self.final_states.insert(state);
    }

    /// Add a transition.
    pub(crate) fn add_transition(&mut self, source: StateId, symbol: SymbolId, destination: StateId) {
        self.transitions.insert((source, symbol), destination);
    }

    /// Set the NFA configurations of the states.
    pub(crate) fn set_configurations(&mut self, configurations: Vec<StateSet>) {
        self.configurations = configurations;
    }

    /// Get the transition from a state on a symbol.
    pub fn transition(&self, source: StateId, symbol: SymbolId) -> Option<StateId> {
        self.transitions.get(&(source, symbol)).copied()
    }

    /// Get the transition from a state on an input character. Characters
    /// outside the alphabet have no transitions.
    pub fn next_state(&self, source: StateId, symbol: char) -> Option<StateId> {
        self.alphabet
            .id(symbol)
            .and_then(|id| self.transition(source, id))
    }

    /// Get the number of states.
    pub fn num_states(&self) -> StateId {
        self.num_states
    }

    /// Get the start state.
    pub fn start_state(&self) -> StateId {
        0
    }

    /// Get the final states.
    pub fn final_states(&self) -> &StateSet {
        &self.final_states
    }

    pub fn is_final(&self, state: StateId) -> bool {
        self.final_states.contains(state)
    }

    /// Get the alphabet.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Get the set of NFA states a DFA state was built from.
    pub fn configuration(&self, state: StateId) -> Option<&StateSet> {
        self.configurations.get(state as usize)
    }

    /// Get the display name of a state.
    pub fn state_name(&self, state: StateId) -> String {
        format!("{STATE_NAME_PREFIX}{state}")
    }

    /// Check if the DFA is empty (accepts no strings).
    ///
    /// Every state is reachable from the start state, so the language is
    /// empty exactly when no state is final.
    pub fn is_empty(&self) -> bool {
        self.final_states.is_empty()
    }

    /// Get all transitions as an iterator.
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, SymbolId, StateId)> + '_ {
        self.transitions
            .iter()
            .map(|(&(src, sym), &dst)| (src, sym, dst))
    }

    /// Check whether the DFA accepts `word`, using the default classifier.
    pub fn accepts(&self, word: &str) -> bool {
        WordClassifier::new(self).classify(word) == Verdict::Accept
    }

    /// Export the DFA with named states and symbols.
    pub fn describe(&self) -> DfaDescription {
        let mut transitions: Vec<(StateId, SymbolId, StateId)> = self.transitions().collect();
        transitions.sort_unstable();

        DfaDescription {
            states: (0..self.num_states).map(|s| self.state_name(s)).collect(),
            alphabet: self.alphabet.iter().map(|(_, symbol)| symbol).collect(),
            transitions: transitions
                .into_iter()
                .filter_map(|(src, sym, dst)| {
                    Some(DescribedTransition {
                        origin: self.state_name(src),
                        symbol: self.alphabet.symbol(sym)?,
                        destination: self.state_name(dst),
                    })
                })
                .collect(),
            initial: self.state_name(self.start_state()),
            finals: self.final_states.iter().map(|s| self.state_name(s)).collect(),
        }
    }
}

/// Renders the transition table, one row per state. The start state is
/// marked with `->` and final states with `*`.
impl fmt::Display for DFA {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:8}", "")?;
        for (_, symbol) in self.alphabet.iter() {
            write!(f, "{symbol:>6}")?;
        }
        writeln!(f)?;

        for state in 0..self.num_states {
            let start = if state == self.start_state() { "->" } else { "" };
            let accept = if self.is_final(state) { "*" } else { "" };
            write!(f, "{start:>2}{accept:1}{:5}", self.state_name(state))?;
            for (symbol, _) in self.alphabet.iter() {
                match self.transition(state, symbol) {
                    Some(dst) => write!(f, "{:>6}", self.state_name(dst))?,
                    None => write!(f, "{:>6}", "-")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// A DFA with its states and symbols spelled out by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DfaDescription {
    pub states: Vec<String>,
    pub alphabet: Vec<char>,
    pub transitions: Vec<DescribedTransition>,
    pub initial: String,
    pub finals: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescribedTransition {
    pub origin: String,
    pub symbol: char,
    pub destination: String,
}
