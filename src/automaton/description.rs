use tracing::trace;

use crate::{
    alphabet::{Label, Symbol},
    math::{Bijection, StateSet},
    Alphabet, Show,
};

use super::{Automaton, Dfa, Malformed, Nfa, StateId};

/// One row of the transition relation: the name of a state together with its outgoing edges.
/// Each edge is a label and the names of all targets reached through it.
pub type Row<S> = (String, Vec<(Label<S>, Vec<String>)>);

/// The raw description of an automaton, referring to states by name. Every state has to
/// appear as the first component of a row in `delta`, even if it has no outgoing edges.
///
/// Descriptions can either be written down as a record or grown edge by edge, the latter is
/// usually more convenient:
/// ```
/// use finite_automata::prelude::*;
///
/// // accepts all words over {0, 1} that end in 1
/// let dfa = Description::new(['0', '1'])
///     .initial("q0")
///     .accepting(["q1"])
///     .edge("q0", '0', "q0")
///     .edge("q0", '1', "q1")
///     .edge("q1", '0', "q0")
///     .edge("q1", '1', "q1")
///     .into_dfa()
///     .unwrap();
/// assert!(dfa.accepts("0101".chars()).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description<S> {
    /// The symbols in their declared order.
    pub alphabet: Vec<S>,
    /// Names of the initial states.
    pub start: Vec<String>,
    /// Names of the accepting states.
    pub accept: Vec<String>,
    /// The transition relation, one row per state.
    pub delta: Vec<Row<S>>,
}

impl<S: Symbol> Description<S> {
    /// Creates a description over the given alphabet without any states.
    pub fn new<I: IntoIterator<Item = S>>(alphabet: I) -> Self {
        Self {
            alphabet: alphabet.into_iter().collect(),
            start: vec![],
            accept: vec![],
            delta: vec![],
        }
    }

    /// Adds `name` to the initial states.
    pub fn initial<N: Into<String>>(mut self, name: N) -> Self {
        self.start.push(name.into());
        self
    }

    /// Adds all given names to the accepting states.
    pub fn accepting<I, N>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        self.accept.extend(names.into_iter().map(Into::into));
        self
    }

    /// Ensures that a row for `name` exists.
    pub fn state<N: Into<String>>(mut self, name: N) -> Self {
        self.row_mut(name.into());
        self
    }

    /// Appends a complete row. Unlike [`Self::edge`], this does not merge with an existing row
    /// for the same state, so adding two rows for one state makes the description malformed.
    pub fn row<N, I>(mut self, name: N, edges: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = (Label<S>, Vec<String>)>,
    {
        self.delta
            .push((name.into(), edges.into_iter().collect()));
        self
    }

    /// Adds an edge from `from` to `to` on `symbol`.
    pub fn edge<F: Into<String>, T: Into<String>>(self, from: F, symbol: S, to: T) -> Self {
        self.labeled_edge(from, Label::Symbol(symbol), to)
    }

    /// Adds an epsilon edge from `from` to `to`.
    pub fn epsilon<F: Into<String>, T: Into<String>>(self, from: F, to: T) -> Self {
        self.labeled_edge(from, Label::Epsilon, to)
    }

    /// Adds an edge with an arbitrary label. Targets for the same label are grouped together and
    /// the target state is declared as well, if it has no row yet.
    pub fn labeled_edge<F: Into<String>, T: Into<String>>(
        mut self,
        from: F,
        label: Label<S>,
        to: T,
    ) -> Self {
        let to = to.into();
        let row = self.row_mut(from.into());
        match row.iter_mut().find(|(l, _)| *l == label) {
            Some((_, targets)) => targets.push(to.clone()),
            None => row.push((label, vec![to.clone()])),
        }
        self.row_mut(to);
        self
    }

    fn row_mut(&mut self, name: String) -> &mut Vec<(Label<S>, Vec<String>)> {
        let pos = match self.delta.iter().position(|(q, _)| *q == name) {
            Some(pos) => pos,
            None => {
                self.delta.push((name, vec![]));
                self.delta.len() - 1
            }
        };
        &mut self.delta[pos].1
    }

    /// Resolves all names and checks that the description is well-formed. States are numbered
    /// in the order of their rows.
    pub fn resolve(self) -> Result<Automaton<S>, Malformed> {
        let alphabet = Alphabet::try_new(self.alphabet)
            .map_err(|dup| Malformed::DuplicateSymbol(dup.show()))?;

        let mut names: Bijection<StateId, String> = Bijection::new();
        for (id, (name, _)) in self.delta.iter().enumerate() {
            names
                .insert_no_overwrite(id, name.clone())
                .map_err(|(_, name)| Malformed::DuplicateState(name))?;
        }
        let lookup = |name: &String| {
            names
                .get_by_right(name)
                .copied()
                .ok_or_else(|| Malformed::DanglingState(name.clone()))
        };

        let columns = alphabet.size() + 1;
        let mut table = vec![StateSet::new(); self.delta.len() * columns];
        for (source, (name, edges)) in self.delta.iter().enumerate() {
            for (label, targets) in edges {
                let column = match label {
                    Label::Symbol(sym) => {
                        alphabet
                            .position(sym)
                            .ok_or_else(|| Malformed::UnknownSymbol {
                                state: name.clone(),
                                symbol: sym.show(),
                            })?
                    }
                    Label::Epsilon => alphabet.size(),
                };
                for target in targets {
                    table[source * columns + column].insert(lookup(target)?);
                }
            }
        }

        let initial = self.start.iter().map(lookup).collect::<Result<StateSet, _>>()?;
        let accepting = self.accept.iter().map(lookup).collect::<Result<StateSet, _>>()?;
        trace!(
            "resolved description with {} states, initial {:?}",
            self.delta.len(),
            initial
        );

        let names = self.delta.into_iter().map(|(name, _)| name).collect();
        Ok(Automaton::from_parts(
            alphabet, names, initial, accepting, table,
        ))
    }

    /// Resolves `self` and views the result as an [`Nfa`].
    pub fn into_nfa(self) -> Result<Nfa<S>, Malformed> {
        self.resolve().map(Nfa::from)
    }

    /// Resolves `self` and checks that the result is deterministic.
    pub fn into_dfa(self) -> Result<Dfa<S>, Malformed> {
        Dfa::try_from(self.resolve()?)
    }
}
