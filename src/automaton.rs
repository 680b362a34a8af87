use itertools::Itertools;
use owo_colors::OwoColorize;
use thiserror::Error;
use tracing::trace;

use crate::{
    alphabet::{Label, Symbol},
    math::{Bijection, StateSet},
    Alphabet, Show,
};

mod closure;

mod description;
pub use description::{Description, Row};

mod dfa;
pub use dfa::Dfa;

mod nfa;
pub use nfa::Nfa;

/// States of a resolved [`Automaton`] are identified by their position in the list of states.
pub type StateId = usize;

/// The ways in which a [`Description`] can fail to describe an automaton. These are raised when
/// resolving a description or when checking that an automaton is deterministic, never while
/// running an automaton.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum Malformed {
    /// The alphabet lists a symbol more than once.
    #[error("symbol `{0}` occurs more than once in the alphabet")]
    DuplicateSymbol(String),
    /// Two rows of the transition relation belong to the same state.
    #[error("state `{0}` is declared more than once")]
    DuplicateState(String),
    /// A state is referenced (as initial, accepting or target state) but has no row.
    #[error("state `{0}` is referenced but never declared")]
    DanglingState(String),
    /// An edge is labeled with something that is neither epsilon nor in the alphabet.
    #[error("edge from `{state}` is labeled with `{symbol}`, which is not in the alphabet")]
    UnknownSymbol {
        /// Name of the source state.
        state: String,
        /// The offending label.
        symbol: String,
    },
    /// There is no initial state at all.
    #[error("no initial state given")]
    NoInitialState,
    /// A deterministic automaton must have precisely one initial state.
    #[error("a deterministic automaton has exactly one initial state, but {0} are given")]
    MultipleInitialStates(usize),
    /// A deterministic automaton may not have epsilon edges.
    #[error("deterministic automaton has an epsilon edge leaving `{0}`")]
    EpsilonTransition(String),
    /// A deterministic automaton may have at most one successor per state and symbol.
    #[error("state `{state}` has {count} successors on symbol `{symbol}`")]
    Nondeterministic {
        /// Name of the state.
        state: String,
        /// The symbol with multiple successors.
        symbol: String,
        /// How many successors there are.
        count: usize,
    },
}

/// The automaton model shared by all components. It stores an [`Alphabet`], the names of all
/// states, the initial and accepting states and the transition relation.
///
/// The relation is stored as a flat table with one [`StateSet`] per state and column, where the
/// columns are the symbols of the alphabet in their declared order followed by one column for
/// epsilon edges. Thus looking up the successors of a state on some symbol is a direct index
/// computation.
///
/// An [`Automaton`] is immutable once built. It is usually obtained by resolving a
/// [`Description`] and then viewed as either a [`Dfa`] or an [`Nfa`].
#[derive(Clone, PartialEq, Eq)]
pub struct Automaton<S: Symbol = char> {
    alphabet: Alphabet<S>,
    names: Bijection<StateId, String>,
    initial: StateSet,
    accepting: StateSet,
    table: Vec<StateSet>,
}

impl<S: Symbol> Automaton<S> {
    /// Assembles an automaton from already resolved parts. `names` must be non-repeating and
    /// `table` must contain `names.len() * (alphabet.size() + 1)` entries.
    pub(crate) fn from_parts(
        alphabet: Alphabet<S>,
        names: Vec<String>,
        initial: StateSet,
        accepting: StateSet,
        table: Vec<StateSet>,
    ) -> Self {
        debug_assert_eq!(table.len(), names.len() * (alphabet.size() + 1));
        let names: Bijection<StateId, String> = names.into_iter().enumerate().collect();
        trace!(
            "assembled automaton with {} states over {}",
            names.len(),
            alphabet.show()
        );
        Self {
            alphabet,
            names,
            initial,
            accepting,
            table,
        }
    }

    /// Returns the alphabet.
    pub fn alphabet(&self) -> &Alphabet<S> {
        &self.alphabet
    }

    /// Returns the number of states.
    pub fn size(&self) -> usize {
        self.names.len()
    }

    /// Iterates over the indices of all states.
    pub fn states(&self) -> std::ops::Range<StateId> {
        0..self.size()
    }

    /// Returns the set of initial states.
    pub fn initial_states(&self) -> &StateSet {
        &self.initial
    }

    /// Returns the set of accepting states.
    pub fn accepting(&self) -> &StateSet {
        &self.accepting
    }

    /// Returns true if `state` is accepting.
    pub fn is_accepting(&self, state: StateId) -> bool {
        self.accepting.contains(state)
    }

    /// Returns the name of `state`, if it exists.
    pub fn state_name(&self, state: StateId) -> Option<&str> {
        self.names.get_by_left(&state).map(String::as_str)
    }

    /// Returns the index of the state with the given `name`, if it exists.
    pub fn state_index(&self, name: &str) -> Option<StateId> {
        self.names.get_by_right(name).copied()
    }

    /// Renders a set of states through their names, e.g. `{q0, q2}`.
    pub fn show_states(&self, states: &StateSet) -> String {
        format!(
            "{{{}}}",
            states.iter().map(|q| self.name_of(q)).join(", ")
        )
    }

    /// Returns the set of states reached from `state` by reading `symbol`. The result is `None`
    /// if `symbol` does not belong to the alphabet or `state` does not exist, otherwise it may
    /// well be empty.
    pub fn transitions_from(&self, state: StateId, symbol: &S) -> Option<&StateSet> {
        if state >= self.size() {
            return None;
        }
        let column = self.alphabet.position(symbol)?;
        Some(self.successors(state, column))
    }

    /// Returns the set of states reachable from `state` through a single epsilon edge.
    ///
    /// # Panics
    /// If `state` does not exist.
    pub fn epsilon_targets(&self, state: StateId) -> &StateSet {
        self.successors(state, self.epsilon_column())
    }

    /// Returns true if at least one epsilon edge exists.
    pub fn has_epsilon_edges(&self) -> bool {
        self.states().any(|q| !self.epsilon_targets(q).is_empty())
    }

    /// Iterates over all edges as triples `(source, label, target)`, ordered by source, then
    /// by label in alphabet order (epsilon last) and then by target.
    pub fn edges(&self) -> impl Iterator<Item = (StateId, Label<&S>, StateId)> + '_ {
        self.states().flat_map(move |q| {
            (0..=self.alphabet.size()).flat_map(move |column| {
                let label = match self.alphabet.nth(column) {
                    Some(sym) => Label::Symbol(sym),
                    None => Label::Epsilon,
                };
                self.successors(q, column)
                    .iter()
                    .map(move |p| (q, label.clone(), p))
            })
        })
    }

    /// Converts `self` back into a [`Description`] that resolves to an equal automaton.
    pub fn to_description(&self) -> Description<S> {
        let mut description = Description::new(self.alphabet.universe().cloned());
        description.start = self.initial.iter().map(|q| self.name_of(q)).collect();
        description.accept = self.accepting.iter().map(|q| self.name_of(q)).collect();
        for q in self.states() {
            description = description.state(self.name_of(q));
        }
        for (q, label, p) in self.edges() {
            let label = match label {
                Label::Symbol(sym) => Label::Symbol(sym.clone()),
                Label::Epsilon => Label::Epsilon,
            };
            description = description.labeled_edge(self.name_of(q), label, self.name_of(p));
        }
        description
    }

    /// Builds a table that lists the successors of every state for each symbol. Initial states
    /// are marked with an arrow and accepting states are highlighted. The epsilon column only
    /// shows up if there is at least one epsilon edge.
    pub fn transition_table(&self) -> String {
        let with_epsilon = self.has_epsilon_edges();
        let columns = self.alphabet.size() + usize::from(with_epsilon);

        let mut builder = tabled::builder::Builder::default();
        builder.push_record(
            std::iter::once("State".to_string())
                .chain(self.alphabet.universe().map(|sym| sym.show()))
                .chain(with_epsilon.then(|| Label::<S>::Epsilon.show())),
        );
        for q in self.states() {
            let name = self.name_of(q);
            let name = if self.is_accepting(q) {
                name.bold().green().to_string()
            } else {
                name
            };
            let name = if self.initial.contains(q) {
                format!("→ {name}")
            } else {
                name
            };
            let mut row = vec![name];
            for column in 0..columns {
                let targets = self.successors(q, column);
                row.push(if targets.is_empty() {
                    "-".to_string()
                } else if let Ok(p) = targets.iter().exactly_one() {
                    self.name_of(p)
                } else {
                    self.show_states(targets)
                });
            }
            builder.push_record(row);
        }

        builder
            .build()
            .with(tabled::settings::Style::rounded())
            .to_string()
    }

    pub(crate) fn epsilon_column(&self) -> usize {
        self.alphabet.size()
    }

    pub(crate) fn successors(&self, state: StateId, column: usize) -> &StateSet {
        &self.table[state * (self.alphabet.size() + 1) + column]
    }

    pub(crate) fn name_of(&self, state: StateId) -> String {
        self.state_name(state)
            .map(str::to_string)
            .unwrap_or_else(|| format!("#{state}"))
    }
}

impl<S: Symbol> std::fmt::Debug for Automaton<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "initial {} accepting {}",
            self.show_states(&self.initial),
            self.show_states(&self.accepting)
        )?;
        write!(f, "{}", self.transition_table())
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    fn branching() -> Automaton {
        Description::new(['a', 'b'])
            .initial("p")
            .accepting(["r"])
            .edge("p", 'a', "q")
            .edge("p", 'a', "r")
            .epsilon("q", "r")
            .edge("r", 'b', "p")
            .resolve()
            .unwrap()
    }

    #[test]
    fn lookups_are_indexed() {
        let aut = branching();
        let p = aut.state_index("p").unwrap();
        let q = aut.state_index("q").unwrap();
        let r = aut.state_index("r").unwrap();

        assert_eq!(aut.size(), 3);
        assert_eq!(aut.state_name(q), Some("q"));
        assert_eq!(
            aut.transitions_from(p, &'a'),
            Some(&[q, r].into_iter().collect())
        );
        assert_eq!(aut.transitions_from(p, &'b'), Some(&StateSet::new()));
        assert_eq!(aut.transitions_from(p, &'c'), None);
        assert_eq!(aut.transitions_from(7, &'a'), None);
        assert_eq!(aut.epsilon_targets(q), &StateSet::singleton(r));
        assert!(aut.is_accepting(r));
        assert!(!aut.is_accepting(p));
        assert!(aut.has_epsilon_edges());
    }

    #[test]
    fn edges_are_listed_in_order() {
        let aut = branching();
        let edges = aut
            .edges()
            .map(|(q, label, p)| (aut.name_of(q), label.show(), aut.name_of(p)))
            .collect::<Vec<_>>();
        assert_eq!(
            edges,
            vec![
                ("p".to_string(), "a".to_string(), "q".to_string()),
                ("p".to_string(), "a".to_string(), "r".to_string()),
                ("q".to_string(), "ε".to_string(), "r".to_string()),
                ("r".to_string(), "b".to_string(), "p".to_string()),
            ]
        );
    }

    #[test]
    fn description_round_trip() {
        let aut = branching();
        assert_eq!(aut.to_description().resolve().unwrap(), aut);
    }

    #[test]
    fn transition_table_mentions_everything() {
        let table = branching().transition_table();
        assert!(table.contains("State"));
        assert!(table.contains("ε"));
        assert!(table.contains("{q, r}"));
        assert!(table.contains("→ p"));
    }
}
