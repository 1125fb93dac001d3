//! Subset construction algorithm for converting ε-NFA to DFA.

use crate::automaton::dfa::DFA;
use crate::automaton::epsilon_nfa::EpsilonNFA;
use crate::automaton::state::{StateId, StateSet};
use crate::config::{ConstructionConfig, WorklistOrder};
use crate::error::AutomatonError;
use indexmap::IndexSet;
use log::{debug, info};
use std::collections::VecDeque;
use std::convert::Infallible;

/// Convert an epsilon-NFA to a DFA using the powerset construction algorithm,
/// with the default configuration.
pub fn subset_construction(nfa: &EpsilonNFA) -> DFA {
    let Ok(dfa) = SubsetConstructor::default().explore(nfa, |_| Ok::<_, Infallible>(()));
    dfa
}

/// Builds DFAs out of epsilon-NFAs according to a [`ConstructionConfig`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SubsetConstructor {
    config: ConstructionConfig,
}

impl SubsetConstructor {
    pub fn new(config: ConstructionConfig) -> Self {
        Self { config }
    }

    /// Convert `nfa` into an equivalent DFA.
    ///
    /// Only configurations reachable from the start state are built. Fails
    /// if more than `max_states` states are discovered.
    pub fn build(&self, nfa: &EpsilonNFA) -> Result<DFA, AutomatonError> {
        let limit = self.config.max_states;
        self.explore(nfa, |discovered| {
            if limit != 0 && discovered > limit {
                Err(AutomatonError::StateLimitExceeded { limit })
            } else {
                Ok(())
            }
        })
    }

    /// Run the worklist algorithm. `admit` is called with the number of
    /// states discovered so far every time a configuration is discovered,
    /// and can abort the construction.
    fn explore<E>(
        &self,
        nfa: &EpsilonNFA,
        mut admit: impl FnMut(usize) -> Result<(), E>,
    ) -> Result<DFA, E> {
        // Each DFA state corresponds to a set of NFA states; a configuration's
        // index in this set is the ID of its DFA state.
        let mut configurations: IndexSet<StateSet> = IndexSet::new();
        let mut dfa = DFA::new(nfa.alphabet().clone());

        // Initial DFA state is the epsilon closure of the NFA start state
        let initial_set = nfa.start_closure();
        admit(1)?;
        configurations.insert(initial_set.clone());

        let mut worklist: VecDeque<(StateId, StateSet)> = VecDeque::new();
        worklist.push_back((dfa.start_state(), initial_set));

        loop {
            let next = match self.config.worklist_order {
                WorklistOrder::Stack => worklist.pop_back(),
                WorklistOrder::Queue => worklist.pop_front(),
            };
            let Some((current_state, current_set)) = next else {
                break;
            };

            if current_set.intersects(nfa.final_states()) {
                dfa.add_final_state(current_state);
            }
            debug!(
                "expanding {} = {:?} (final: {})",
                dfa.state_name(current_state),
                current_set,
                dfa.is_final(current_state)
            );

            for symbol in nfa.alphabet().ids() {
                let next_set = nfa.move_on_symbol(&current_set, symbol);

                if next_set.is_empty() {
                    // No transition on this symbol; the DFA stays partial here
                    continue;
                }

                let next_state = match configurations.get_index_of(&next_set) {
                    Some(existing) => existing as StateId,
                    None => {
                        admit(configurations.len() + 1)?;
                        let new_state = dfa.add_state();
                        configurations.insert(next_set.clone());
                        worklist.push_back((new_state, next_set));
                        new_state
                    }
                };

                dfa.add_transition(current_state, symbol, next_state);
            }
        }

        info!(
            "subset construction: {} NFA states -> {} DFA states ({} final)",
            nfa.num_states(),
            dfa.num_states(),
            dfa.final_states().len()
        );

        dfa.set_configurations(configurations.into_iter().collect());
        Ok(dfa)
    }
}
