//! Loading of automata from their textual description.
//!
//! The description is line oriented:
//!
//! ```text
//! a b            <- alphabet, one character per symbol
//! q0 q1          <- states
//! q1             <- final states (may be empty)
//! q0             <- initial state
//! q0 a q1        <- transition rules: origin symbol destination
//! q0 & q1        <- `&` is the epsilon symbol
//! ```
//!
//! A rule can be repeated for the same origin and symbol, which makes the
//! automaton non-deterministic.

use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;

use indexmap::IndexSet;
use log::debug;

use crate::automaton::{EPSILON_MARKER, EpsilonNFA};
use crate::error::LoadError;

/// Number of lines before the transition rules. At least one rule must
/// follow them.
const HEADER_LINES: usize = 4;

/// Read and parse the automaton description stored at `path`.
pub fn load_automaton<P: AsRef<Path>>(path: P) -> Result<EpsilonNFA, LoadError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source: err,
        },
    })?;
    debug!("loading automaton from {}", path.display());
    parse_automaton(&source)
}

/// Parse an automaton description.
pub fn parse_automaton(source: &str) -> Result<EpsilonNFA, LoadError> {
    let lines: Vec<&str> = source.lines().collect();
    let has_rules = lines
        .iter()
        .skip(HEADER_LINES)
        .any(|line| !line.trim().is_empty());
    if !has_rules {
        return Err(LoadError::Incomplete { lines: lines.len() });
    }

    let mut symbols = Vec::new();
    for token in lines[0].split_whitespace() {
        let symbol = single_char(token).ok_or_else(|| LoadError::InvalidSymbol {
            symbol: token.to_owned(),
        })?;
        symbols.push(symbol);
    }
    let states: IndexSet<&str> = lines[1].split_whitespace().collect();
    let finals: IndexSet<&str> = lines[2].split_whitespace().collect();
    let initial = lines[3].trim();

    if !states.contains(initial) {
        return Err(LoadError::InitialNotInStates {
            state: initial.to_owned(),
        });
    }

    let unknown_finals: Vec<String> = finals
        .iter()
        .filter(|state| !states.contains(**state))
        .map(|state| state.to_string())
        .collect();
    if !unknown_finals.is_empty() {
        return Err(LoadError::FinalsNotSubset {
            states: unknown_finals,
        });
    }

    let mut builder = EpsilonNFA::builder();
    builder
        .symbols(symbols.iter().copied())
        .states(states.iter().copied())
        .start_state(initial);
    for state in &finals {
        builder.final_state(*state);
    }

    let mut rules = 0;
    for (index, text) in lines.iter().enumerate().skip(HEADER_LINES) {
        if text.trim().is_empty() {
            continue;
        }
        let line = index + 1;
        let parts: Vec<&str> = text.split_whitespace().collect();
        let &[origin, symbol, destination] = parts.as_slice() else {
            return Err(LoadError::MalformedRule {
                line,
                text: text.to_string(),
            });
        };
        let symbol = single_char(symbol)
            .filter(|symbol| *symbol == EPSILON_MARKER || symbols.contains(symbol));
        let known_states = states.contains(origin) && states.contains(destination);
        let Some(symbol) = symbol.filter(|_| known_states) else {
            return Err(LoadError::InvalidRule {
                line,
                text: text.to_string(),
            });
        };
        builder.transition(origin, symbol, destination);
        rules += 1;
    }

    let nfa = builder.build()?;
    debug!(
        "loaded automaton: {} symbols, {} states, {} final, {} rules",
        symbols.len(),
        states.len(),
        finals.len(),
        rules
    );
    Ok(nfa)
}

fn single_char(token: &str) -> Option<char> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

impl FromStr for EpsilonNFA {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_automaton(s)
    }
}
