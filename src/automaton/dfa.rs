use std::collections::VecDeque;

use tracing::debug;

use crate::{
    alphabet::Symbol,
    math::{Set, StateSet},
    Show,
};

use super::{Automaton, Malformed, Nfa, StateId};

/// A deterministic finite automaton (DFA). It wraps an [`Automaton`] that has precisely one
/// initial state, no epsilon edges and at most one successor for each state and symbol.
///
/// A DFA need not be total, i.e. some state may lack a successor for some symbol. Running
/// such a DFA into a missing transition is an error (see [`crate::run::RunError`]); if an
/// implicit rejecting sink is wanted instead, make it explicit through [`Dfa::totalized`].
///
/// All query methods of the underlying [`Automaton`] are available through `Deref`.
#[derive(Clone, PartialEq, Eq)]
pub struct Dfa<S: Symbol = char> {
    automaton: Automaton<S>,
    initial: StateId,
    subsets: Option<Vec<StateSet>>,
}

impl<S: Symbol> TryFrom<Automaton<S>> for Dfa<S> {
    type Error = Malformed;

    fn try_from(automaton: Automaton<S>) -> Result<Self, Self::Error> {
        let initial = match automaton.initial_states().len() {
            0 => return Err(Malformed::NoInitialState),
            1 => automaton
                .initial_states()
                .iter()
                .next()
                .ok_or(Malformed::NoInitialState)?,
            n => return Err(Malformed::MultipleInitialStates(n)),
        };

        for q in automaton.states() {
            if !automaton.epsilon_targets(q).is_empty() {
                return Err(Malformed::EpsilonTransition(automaton.name_of(q)));
            }
            for (column, sym) in automaton.alphabet().universe().enumerate() {
                let count = automaton.successors(q, column).len();
                if count > 1 {
                    return Err(Malformed::Nondeterministic {
                        state: automaton.name_of(q),
                        symbol: sym.show(),
                        count,
                    });
                }
            }
        }

        Ok(Self {
            automaton,
            initial,
            subsets: None,
        })
    }
}

impl<S: Symbol> Dfa<S> {
    /// Used by the subset construction, which knows that `automaton` is deterministic and
    /// remembers for each state the set of states it was built from.
    pub(crate) fn from_subsets(
        automaton: Automaton<S>,
        initial: StateId,
        subsets: Vec<StateSet>,
    ) -> Self {
        debug_assert_eq!(automaton.size(), subsets.len());
        Self {
            automaton,
            initial,
            subsets: Some(subsets),
        }
    }

    /// Returns the underlying automaton.
    pub fn automaton(&self) -> &Automaton<S> {
        &self.automaton
    }

    /// Returns the initial state.
    pub fn initial(&self) -> StateId {
        self.initial
    }

    /// Returns the successor of `state` on `symbol`, if it exists. Also gives back `None` if
    /// `symbol` is not in the alphabet.
    pub fn successor(&self, state: StateId, symbol: &S) -> Option<StateId> {
        self.automaton
            .transitions_from(state, symbol)?
            .iter()
            .next()
    }

    pub(crate) fn successor_at(&self, state: StateId, column: usize) -> Option<StateId> {
        self.automaton.successors(state, column).iter().next()
    }

    /// If `self` was produced by the subset construction, returns the set of states of the
    /// nondeterministic automaton that `state` stands for.
    pub fn subset_of(&self, state: StateId) -> Option<&StateSet> {
        self.subsets.as_ref()?.get(state)
    }

    /// Returns true if every state has a successor for every symbol.
    pub fn is_total(&self) -> bool {
        let columns = self.alphabet().size();
        self.states()
            .all(|q| (0..columns).all(|column| self.successor_at(q, column).is_some()))
    }

    /// Returns a total DFA accepting the same language. Every missing transition is redirected
    /// to a fresh rejecting sink state that loops on all symbols. If `self` already is total,
    /// a plain copy is returned.
    pub fn totalized(&self) -> Self {
        if self.is_total() {
            return self.clone();
        }

        let size = self.size();
        let sink = size;
        let mut sink_name = "sink".to_string();
        while self.state_index(&sink_name).is_some() {
            sink_name.push('\'');
        }
        debug!("totalizing DFA with {size} states, adding sink `{sink_name}`");

        let columns = self.alphabet().size() + 1;
        let mut table = Vec::with_capacity((size + 1) * columns);
        for q in self.states().chain([sink]) {
            for column in 0..self.alphabet().size() {
                let target = if q == sink {
                    sink
                } else {
                    self.successor_at(q, column).unwrap_or(sink)
                };
                table.push(StateSet::singleton(target));
            }
            table.push(StateSet::new());
        }

        let names = self
            .states()
            .map(|q| self.name_of(q))
            .chain([sink_name])
            .collect();
        let automaton = Automaton::from_parts(
            self.alphabet().clone(),
            names,
            StateSet::singleton(self.initial),
            self.accepting().clone(),
            table,
        );
        let subsets = self.subsets.clone().map(|mut subsets| {
            subsets.push(StateSet::new());
            subsets
        });

        Self {
            automaton,
            initial: self.initial,
            subsets,
        }
    }

    /// Computes the set of states reachable from the initial state.
    pub fn reachable_states(&self) -> StateSet {
        let mut seen = StateSet::singleton(self.initial);
        let mut queue = VecDeque::from([self.initial]);
        while let Some(q) = queue.pop_front() {
            for column in 0..self.alphabet().size() {
                if let Some(p) = self.successor_at(q, column) {
                    if seen.insert(p) {
                        queue.push_back(p);
                    }
                }
            }
        }
        seen
    }

    /// Searches for a word that is accepted by exactly one of `self` and `other`. The search
    /// runs breadth-first through the product of both automata, exploring symbols in the order
    /// of the alphabet of `self`, so the returned word is the length-lexicographically minimal
    /// witness. Missing transitions (including symbols that `other` does not know) lead to an
    /// implicit rejecting sink. Returns `None` if no such word exists.
    pub fn distinguishing_word(&self, other: &Dfa<S>) -> Option<Vec<S>> {
        let accepts =
            |dfa: &Dfa<S>, q: Option<StateId>| q.map(|q| dfa.is_accepting(q)).unwrap_or(false);

        let origin = (Some(self.initial), Some(other.initial));
        let mut seen: Set<(Option<StateId>, Option<StateId>)> = Set::default();
        seen.insert(origin);
        let mut queue = VecDeque::from([(vec![], origin)]);

        while let Some((word, (l, r))) = queue.pop_front() {
            if accepts(self, l) != accepts(other, r) {
                return Some(word);
            }
            for sym in self.alphabet().universe() {
                let next = (
                    l.and_then(|q| self.successor(q, sym)),
                    r.and_then(|q| other.successor(q, sym)),
                );
                if seen.insert(next) {
                    let mut extended = word.clone();
                    extended.push(sym.clone());
                    queue.push_back((extended, next));
                }
            }
        }
        None
    }

    /// Returns true if `self` and `other` accept the same words over the alphabet of `self`.
    pub fn equivalent(&self, other: &Dfa<S>) -> bool {
        self.distinguishing_word(other).is_none()
    }

    /// Views `self` as a nondeterministic automaton.
    pub fn into_nfa(self) -> Nfa<S> {
        Nfa::from(self.automaton)
    }
}

impl<S: Symbol> std::ops::Deref for Dfa<S> {
    type Target = Automaton<S>;

    fn deref(&self) -> &Self::Target {
        &self.automaton
    }
}

impl<S: Symbol> From<Dfa<S>> for Nfa<S> {
    fn from(value: Dfa<S>) -> Self {
        value.into_nfa()
    }
}

impl<S: Symbol> std::fmt::Debug for Dfa<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DFA ")?;
        std::fmt::Debug::fmt(&self.automaton, f)
    }
}
