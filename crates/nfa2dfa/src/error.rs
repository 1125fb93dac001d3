use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised when an automaton is structurally invalid, or when its
/// determinization exceeds the configured bounds.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AutomatonError {
    /// No initial state was given.
    #[error("automaton has no initial state")]
    MissingInitialState,

    /// The initial state is not one of the declared states.
    #[error("initial state `{0}` is not a declared state")]
    UnknownInitialState(String),

    /// A final state is not one of the declared states.
    #[error("final state `{0}` is not a declared state")]
    UnknownFinalState(String),

    /// A transition references a state that was never declared.
    #[error("transition references undeclared state `{0}`")]
    UnknownState(String),

    /// A transition is labeled with a symbol outside the alphabet.
    #[error("transition symbol `{0}` is not in the alphabet")]
    UnknownSymbol(char),

    /// The epsilon marker was declared as an alphabet symbol.
    #[error("the epsilon marker `&` cannot be an alphabet symbol")]
    EpsilonInAlphabet,

    /// Subset construction discovered more states than allowed.
    #[error("DFA state limit exceeded (max: {limit})")]
    StateLimitExceeded { limit: usize },
}

/// Errors returned while loading an automaton description.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("error reading {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The description is shorter than the four header lines plus a rule.
    #[error("incomplete automaton description: {lines} line(s)")]
    Incomplete { lines: usize },

    #[error("initial state `{state}` not in set of states")]
    InitialNotInStates { state: String },

    #[error("final states not in set of states: {}", states.join(", "))]
    FinalsNotSubset { states: Vec<String> },

    /// A rule line does not have exactly three fields.
    #[error("line {line}: invalid transition rule format: `{text}`")]
    MalformedRule { line: usize, text: String },

    /// A rule line references an unknown state or symbol.
    #[error("line {line}: invalid rule components: `{text}`")]
    InvalidRule { line: usize, text: String },

    /// An alphabet entry is not a single character.
    #[error("alphabet symbol `{symbol}` is not a single character")]
    InvalidSymbol { symbol: String },

    #[error(transparent)]
    Automaton(#[from] AutomatonError),
}
