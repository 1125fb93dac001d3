//! Tunables for DFA construction and word classification.

/// Order in which the subset construction expands discovered configurations.
///
/// The order only changes which names the DFA states receive. The language
/// accepted by the resulting DFA is the same for every order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WorklistOrder {
    /// Most recently discovered configuration first.
    #[default]
    Stack,
    /// Configurations are expanded in discovery order.
    Queue,
}

/// Configuration for [`crate::SubsetConstructor`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConstructionConfig {
    pub worklist_order: WorklistOrder,

    /// Maximum number of DFA states (0 = unlimited).
    pub max_states: usize,
}

impl ConstructionConfig {
    pub fn worklist_order(mut self, order: WorklistOrder) -> Self {
        self.worklist_order = order;
        self
    }

    pub fn max_states(mut self, max_states: usize) -> Self {
        self.max_states = max_states;
        self
    }
}

/// How the classifier treats a literal epsilon marker found in a word.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EpsilonInWord {
    /// The marker passes symbol validation, but no DFA transition is ever
    /// labeled with it, so the word is rejected when it is reached.
    #[default]
    Unmatched,
    /// The marker is a foreign symbol and makes the word invalid.
    Invalid,
    /// The marker stands for the empty string and is consumed without
    /// moving.
    Skip,
}

/// Configuration for [`crate::WordClassifier`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassifierConfig {
    pub epsilon_in_word: EpsilonInWord,
}

impl ClassifierConfig {
    pub fn epsilon_in_word(mut self, policy: EpsilonInWord) -> Self {
        self.epsilon_in_word = policy;
        self
    }
}
