//! Epsilon Non-deterministic Finite Automaton (ε-NFA) implementation.

use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::{Alphabet, EPSILON, EPSILON_MARKER, SymbolId, is_epsilon};
use crate::error::AutomatonError;
use indexmap::IndexSet;
use log::debug;
use std::collections::{HashMap, VecDeque};

/// An Epsilon Non-deterministic Finite Automaton.
///
/// Instances are created with [`NfaBuilder`], which validates the automaton,
/// and are immutable afterwards.
#[derive(Debug, Clone)]
pub struct EpsilonNFA {
    /// State names; a state's ID is its index here
    states: IndexSet<String>,
    /// Input symbols (never epsilon)
    alphabet: Alphabet,
    /// Initial state
    start_state: StateId,
    /// Final (accepting) states
    final_states: StateSet,
    /// Transitions: (source, symbol) -> set of destination states
    /// For epsilon transitions, symbol == EPSILON
    transitions: HashMap<(StateId, SymbolId), StateSet>,
    /// Epsilon closure of every state, indexed by state ID
    epsilon_closures: Vec<StateSet>,
}

impl EpsilonNFA {
    /// Start building a new epsilon-NFA.
    pub fn builder() -> NfaBuilder {
        NfaBuilder::new()
    }

    /// Get the number of states.
    pub fn num_states(&self) -> StateId {
        self.states.len() as StateId
    }

    /// Get the start state.
    pub fn start_state(&self) -> StateId {
        self.start_state
    }

    /// Get the final states.
    pub fn final_states(&self) -> &StateSet {
        &self.final_states
    }

    /// Get the alphabet (all symbols except epsilon).
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Get the name of a state.
    pub fn state_name(&self, state: StateId) -> Option<&str> {
        self.states.get_index(state as usize).map(String::as_str)
    }

    /// Get the ID of the state with the given name.
    pub fn state_id(&self, name: &str) -> Option<StateId> {
        self.states.get_index_of(name).map(|i| i as StateId)
    }

    /// Get the destinations of `state` on `symbol`. `symbol` may be `EPSILON`.
    pub fn destinations(&self, state: StateId, symbol: SymbolId) -> Option<&StateSet> {
        self.transitions.get(&(state, symbol))
    }

    /// Compute the epsilon closure of a single state using DFS.
    fn compute_epsilon_closure(
        transitions: &HashMap<(StateId, SymbolId), StateSet>,
        num_states: usize,
        state: StateId,
    ) -> StateSet {
        let mut closure = StateSet::with_capacity(num_states);
        let mut stack = vec![state];

        while let Some(s) = stack.pop() {
            if !closure.insert(s) {
                continue;
            }

            // Follow epsilon transitions
            if let Some(destinations) = transitions.get(&(s, EPSILON)) {
                for dest in destinations.iter() {
                    if !closure.contains(dest) {
                        stack.push(dest);
                    }
                }
            }
        }

        closure
    }

    /// Get the epsilon closure of a single state: every state reachable from
    /// it through epsilon transitions only, including the state itself.
    /// Returns `None` if `state` is not a state of this automaton.
    pub fn epsilon_closure_of(&self, state: StateId) -> Option<&StateSet> {
        self.epsilon_closures.get(state as usize)
    }

    /// Get the epsilon closure of the start state.
    pub fn start_closure(&self) -> StateSet {
        self.epsilon_closure(&StateSet::singleton(self.start_state, self.states.len()))
    }

    /// Get the epsilon closure of a set of states.
    pub fn epsilon_closure(&self, states: &StateSet) -> StateSet {
        let mut closure = StateSet::with_capacity(self.states.len());
        for state in states.iter() {
            if let Some(cached) = self.epsilon_closures.get(state as usize) {
                closure.union_with(cached);
            }
        }
        closure
    }

    /// Get the states reachable from a set of states on a given symbol.
    /// Returns the epsilon closure of the reached states.
    pub fn move_on_symbol(&self, states: &StateSet, symbol: SymbolId) -> StateSet {
        assert!(!is_epsilon(symbol), "Use epsilon_closure for epsilon moves");

        let mut reached = StateSet::with_capacity(self.states.len());

        for state in states.iter() {
            if let Some(destinations) = self.transitions.get(&(state, symbol)) {
                reached.union_with(destinations);
            }
        }

        self.epsilon_closure(&reached)
    }

    /// Simulate the automaton directly on `word`.
    ///
    /// Symbols outside the alphabet, the epsilon marker included, make the
    /// word rejected.
    pub fn accepts(&self, word: &str) -> bool {
        let mut current = self.start_closure();

        for symbol in word.chars() {
            let Some(id) = self.alphabet.id(symbol) else {
                return false;
            };
            current = self.move_on_symbol(&current, id);
            if current.is_empty() {
                return false;
            }
        }

        current.intersects(&self.final_states)
    }

    /// Check if the NFA accepts any string (i.e., if the language is non-empty).
    /// Uses BFS from the start state following all transitions.
    pub fn is_empty(&self) -> bool {
        let mut visited = StateSet::with_capacity(self.states.len());
        let mut queue: VecDeque<StateId> = self.start_closure().iter().collect();

        while let Some(state) = queue.pop_front() {
            if !visited.insert(state) {
                continue;
            }

            // Check if we reached a final state
            if self.final_states.contains(state) {
                return false;
            }

            // Explore all transitions
            for symbol in self.alphabet.ids() {
                if let Some(destinations) = self.transitions.get(&(state, symbol)) {
                    let closure = self.epsilon_closure(destinations);
                    for dest in closure.iter() {
                        if !visited.contains(dest) {
                            queue.push_back(dest);
                        }
                    }
                }
            }
        }

        true
    }

    /// Get all transitions as an iterator.
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, SymbolId, StateId)> + '_ {
        self.transitions
            .iter()
            .flat_map(|(&(src, sym), dests)| dests.iter().map(move |dst| (src, sym, dst)))
    }
}

/// Collects the parts of an epsilon-NFA and validates them in [`NfaBuilder::build`].
///
/// States and symbols are referred to by name. A transition labeled with
/// [`EPSILON_MARKER`] is an epsilon transition.
#[derive(Debug, Clone, Default)]
pub struct NfaBuilder {
    symbols: Vec<char>,
    states: IndexSet<String>,
    start_state: Option<String>,
    final_states: Vec<String>,
    transitions: Vec<(String, char, String)>,
}

impl NfaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a symbol to the alphabet.
    pub fn symbol(&mut self, symbol: char) -> &mut Self {
        self.symbols.push(symbol);
        self
    }

    /// Add several symbols to the alphabet.
    pub fn symbols<I: IntoIterator<Item = char>>(&mut self, symbols: I) -> &mut Self {
        self.symbols.extend(symbols);
        self
    }

    /// Declare a state. Declaring the same name twice has no effect.
    pub fn state(&mut self, name: impl Into<String>) -> &mut Self {
        self.states.insert(name.into());
        self
    }

    /// Declare several states.
    pub fn states<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.states.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn start_state(&mut self, name: impl Into<String>) -> &mut Self {
        self.start_state = Some(name.into());
        self
    }

    pub fn final_state(&mut self, name: impl Into<String>) -> &mut Self {
        self.final_states.push(name.into());
        self
    }

    /// Add a transition. Adding several transitions for the same origin and
    /// symbol makes the automaton non-deterministic.
    pub fn transition(
        &mut self,
        origin: impl Into<String>,
        symbol: char,
        destination: impl Into<String>,
    ) -> &mut Self {
        self.transitions
            .push((origin.into(), symbol, destination.into()));
        self
    }

    /// Add an epsilon transition.
    pub fn epsilon_transition(
        &mut self,
        origin: impl Into<String>,
        destination: impl Into<String>,
    ) -> &mut Self {
        self.transition(origin, EPSILON_MARKER, destination)
    }

    fn state_id(&self, name: &str) -> Result<StateId, AutomatonError> {
        self.states
            .get_index_of(name)
            .map(|i| i as StateId)
            .ok_or_else(|| AutomatonError::UnknownState(name.to_owned()))
    }

    /// Validate the collected parts and build the automaton.
    pub fn build(&self) -> Result<EpsilonNFA, AutomatonError> {
        let alphabet = Alphabet::from_symbols(self.symbols.iter().copied())?;
        let num_states = self.states.len();

        let start_name = self
            .start_state
            .as_deref()
            .ok_or(AutomatonError::MissingInitialState)?;
        let start_state = self
            .state_id(start_name)
            .map_err(|_| AutomatonError::UnknownInitialState(start_name.to_owned()))?;

        let mut final_states = StateSet::with_capacity(num_states);
        for name in &self.final_states {
            let state = self
                .state_id(name)
                .map_err(|_| AutomatonError::UnknownFinalState(name.clone()))?;
            final_states.insert(state);
        }

        let mut transitions: HashMap<(StateId, SymbolId), StateSet> = HashMap::new();
        for (origin, symbol, destination) in &self.transitions {
            let source = self.state_id(origin)?;
            let target = self.state_id(destination)?;
            let symbol = if *symbol == EPSILON_MARKER {
                EPSILON
            } else {
                alphabet
                    .id(*symbol)
                    .ok_or(AutomatonError::UnknownSymbol(*symbol))?
            };
            transitions
                .entry((source, symbol))
                .or_insert_with(|| StateSet::with_capacity(num_states))
                .insert(target);
        }

        let epsilon_closures = (0..num_states as StateId)
            .map(|state| EpsilonNFA::compute_epsilon_closure(&transitions, num_states, state))
            .collect();

        debug!(
            "built ε-NFA with {} states, {} symbols, {} transition rules",
            num_states,
            alphabet.len(),
            self.transitions.len()
        );

        Ok(EpsilonNFA {
            states: self.states.clone(),
            alphabet,
            start_state,
            final_states,
            transitions,
            epsilon_closures,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn closure_names(nfa: &EpsilonNFA, state: &str) -> Vec<String> {
        let id = nfa.state_id(state).unwrap();
        nfa.epsilon_closure_of(id)
            .unwrap()
            .iter()
            .map(|s| nfa.state_name(s).unwrap().to_owned())
            .collect()
    }

    #[test]
    fn test_epsilon_nfa_basic() {
        // 0 -a-> 1 -ε-> 2 (final)
        let nfa = EpsilonNFA::builder()
            .symbol('a')
            .states(["0", "1", "2"])
            .start_state("0")
            .final_state("2")
            .transition("0", 'a', "1")
            .epsilon_transition("1", "2")
            .build()
            .unwrap();

        assert_eq!(nfa.num_states(), 3);
        assert_eq!(nfa.state_name(nfa.start_state()), Some("0"));
        assert_eq!(nfa.transitions().count(), 2);
        assert!(!nfa.is_empty());
        assert!(nfa.accepts("a"));
        assert!(!nfa.accepts(""));
        assert!(!nfa.accepts("aa"));
    }

    #[test]
    fn test_epsilon_closure() {
        // 0 -ε-> 1 -ε-> 2, 3 unreachable
        let nfa = EpsilonNFA::builder()
            .states(["0", "1", "2", "3"])
            .start_state("0")
            .epsilon_transition("0", "1")
            .epsilon_transition("1", "2")
            .build()
            .unwrap();

        assert_eq!(closure_names(&nfa, "0"), vec!["0", "1", "2"]);
        assert_eq!(closure_names(&nfa, "1"), vec!["1", "2"]);
        assert_eq!(closure_names(&nfa, "3"), vec!["3"]);
        assert_eq!(nfa.start_closure().to_vec(), vec![0, 1, 2]);
    }

    #[test]
    fn test_epsilon_closure_of_unknown_state() {
        let nfa = EpsilonNFA::builder()
            .states(["0", "1"])
            .start_state("0")
            .epsilon_transition("0", "1")
            .build()
            .unwrap();

        assert!(nfa.epsilon_closure_of(2).is_none());
        // Unknown states are skipped in set closures as well
        let states: StateSet = [0, 7].into_iter().collect();
        assert_eq!(nfa.epsilon_closure(&states).to_vec(), vec![0, 1]);
    }

    #[test]
    fn test_epsilon_closure_with_cycle() {
        // 0 -ε-> 1 -ε-> 2 -ε-> 0
        let nfa = EpsilonNFA::builder()
            .states(["0", "1", "2"])
            .start_state("0")
            .epsilon_transition("0", "1")
            .epsilon_transition("1", "2")
            .epsilon_transition("2", "0")
            .build()
            .unwrap();

        for state in ["0", "1", "2"] {
            assert_eq!(closure_names(&nfa, state), vec!["0", "1", "2"]);
        }
    }

    #[test]
    fn test_move_on_symbol() {
        // 0 -a-> 1, 0 -a-> 2, 1 -ε-> 3
        let nfa = EpsilonNFA::builder()
            .symbol('a')
            .states(["0", "1", "2", "3"])
            .start_state("0")
            .transition("0", 'a', "1")
            .transition("0", 'a', "2")
            .epsilon_transition("1", "3")
            .build()
            .unwrap();

        let start = StateSet::singleton(0, 4);
        let reached = nfa.move_on_symbol(&start, 0);

        assert_eq!(reached.to_vec(), vec![1, 2, 3]);
        // Without the epsilon closure, only the direct destinations
        assert_eq!(nfa.destinations(0, 0).unwrap().to_vec(), vec![1, 2]);
        assert_eq!(nfa.destinations(1, EPSILON).unwrap().to_vec(), vec![3]);
        assert!(nfa.destinations(1, 0).is_none());
    }

    #[test]
    fn test_empty_nfa() {
        let mut builder = EpsilonNFA::builder();
        builder
            .symbol('a')
            .states(["0", "1"])
            .start_state("0")
            .final_state("1");

        // No transitions - NFA is empty (no path from 0 to 1)
        assert!(builder.build().unwrap().is_empty());

        builder.transition("0", 'a', "1");
        assert!(!builder.build().unwrap().is_empty());
    }

    #[test]
    fn test_build_validation() {
        let mut builder = EpsilonNFA::builder();
        builder.symbol('a').states(["q0", "q1"]);
        assert_eq!(
            builder.build().unwrap_err(),
            AutomatonError::MissingInitialState
        );

        builder.start_state("q9");
        assert_eq!(
            builder.build().unwrap_err(),
            AutomatonError::UnknownInitialState("q9".to_owned())
        );

        builder.start_state("q0").final_state("q2");
        assert_eq!(
            builder.build().unwrap_err(),
            AutomatonError::UnknownFinalState("q2".to_owned())
        );

        let mut builder = EpsilonNFA::builder();
        builder
            .symbol('a')
            .states(["q0", "q1"])
            .start_state("q0")
            .transition("q0", 'b', "q1");
        assert_eq!(
            builder.build().unwrap_err(),
            AutomatonError::UnknownSymbol('b')
        );

        let mut builder = EpsilonNFA::builder();
        builder
            .symbol('a')
            .states(["q0"])
            .start_state("q0")
            .transition("q0", 'a', "q1");
        assert_eq!(
            builder.build().unwrap_err(),
            AutomatonError::UnknownState("q1".to_owned())
        );

        let mut builder = EpsilonNFA::builder();
        builder.symbol(EPSILON_MARKER).state("q0").start_state("q0");
        assert_eq!(
            builder.build().unwrap_err(),
            AutomatonError::EpsilonInAlphabet
        );
    }
}
