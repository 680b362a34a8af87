use std::collections::VecDeque;

use itertools::Itertools;
use tracing::{debug, trace};

use crate::{
    alphabet::Symbol,
    automaton::{Automaton, Dfa, Malformed, Nfa, StateId},
    math::{Map, Set, StateSet},
};

/// Name given to the state that stands for the empty set of states.
pub const DEAD_STATE_NAME: &str = "∅";

impl<S: Symbol> Nfa<S> {
    /// Converts `self` into an equivalent [`Dfa`] through the subset construction.
    ///
    /// Each state of the resulting DFA stands for a set of states of `self`, see
    /// [`Dfa::subset_of`]. The initial state is the epsilon closure of the initial states, the
    /// successor of a set on some symbol is the epsilon closure of all states reachable by an
    /// edge with that symbol. Sets are discovered from the initial one in breadth-first order
    /// with symbols in the order of the alphabet, and only discovered sets become states, so
    /// unreachable subsets are never materialized. A set is accepting if it contains an
    /// accepting state.
    ///
    /// The result is total. Whenever a set has no successor on some symbol, the transition
    /// leads to a rejecting dead state (standing for the empty set and named
    /// [`DEAD_STATE_NAME`]) that loops on every symbol. It is created at most once.
    ///
    /// Fails with [`Malformed::NoInitialState`] if there is no initial state.
    pub fn determinize(&self) -> Result<Dfa<S>, Malformed> {
        if self.initial_states().is_empty() {
            return Err(Malformed::NoInitialState);
        }

        let symbols = self.alphabet().size();
        let columns = symbols + 1;

        let mut ids: Map<StateSet, StateId> = Map::default();
        let mut subsets: Vec<StateSet> = Vec::new();
        let mut table: Vec<StateSet> = Vec::new();
        let mut queue = VecDeque::new();

        let initial = self.epsilon_closure(self.initial_states());
        trace!("initial subset {}", self.show_states(&initial));
        ids.insert(initial.clone(), 0);
        subsets.push(initial);
        table.resize(columns, StateSet::new());
        queue.push_back(0);

        while let Some(source) = queue.pop_front() {
            for column in 0..symbols {
                let reached = self.step_closure(&subsets[source], column);
                let target = match ids.get(&reached) {
                    Some(&id) => id,
                    None => {
                        let id = subsets.len();
                        table.resize((id + 1) * columns, StateSet::new());
                        if reached.is_empty() {
                            trace!("adding dead state {id}");
                            for c in 0..symbols {
                                table[id * columns + c] = StateSet::singleton(id);
                            }
                        } else {
                            trace!("discovered subset {} as {id}", self.show_states(&reached));
                            queue.push_back(id);
                        }
                        ids.insert(reached.clone(), id);
                        subsets.push(reached);
                        id
                    }
                };
                table[source * columns + column] = StateSet::singleton(target);
            }
        }

        let accepting = subsets
            .iter()
            .positions(|subset| subset.intersects(self.accepting()))
            .collect();
        let names = self.subset_names(&subsets);

        debug!(
            "determinized NFA with {} states into DFA with {} states",
            self.size(),
            subsets.len()
        );
        let automaton = Automaton::from_parts(
            self.alphabet().clone(),
            names,
            StateSet::singleton(0),
            accepting,
            table,
        );
        Ok(Dfa::from_subsets(automaton, 0, subsets))
    }

    /// Names every subset by the names of its members, e.g. `{q0, q2}`. As state names are
    /// arbitrary strings, two different subsets may still end up with the same rendering, in
    /// which case primes are appended until the name is unique.
    fn subset_names(&self, subsets: &[StateSet]) -> Vec<String> {
        let mut used = Set::default();
        subsets
            .iter()
            .map(|subset| {
                let mut name = if subset.is_empty() {
                    DEAD_STATE_NAME.to_string()
                } else {
                    self.show_states(subset)
                };
                while !used.insert(name.clone()) {
                    name.push('\'');
                }
                name
            })
            .collect()
    }
}
