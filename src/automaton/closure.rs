use std::collections::VecDeque;

use crate::{alphabet::Symbol, math::StateSet};

use super::{Automaton, StateId};

impl<S: Symbol> Automaton<S> {
    /// Computes the epsilon closure of `states`, that is the smallest superset of `states` that
    /// is closed under following epsilon edges.
    ///
    /// The closure is computed breadth-first. A state is put on the frontier only when it is
    /// added to the result for the first time, so every state is expanded at most once and
    /// cycles of epsilon edges are harmless.
    pub fn epsilon_closure(&self, states: &StateSet) -> StateSet {
        let mut closure = states.clone();
        let mut frontier: VecDeque<StateId> = states.iter().collect();

        while let Some(q) = frontier.pop_front() {
            for p in self.epsilon_targets(q) {
                if closure.insert(p) {
                    frontier.push_back(p);
                }
            }
        }

        closure
    }

    /// Computes the epsilon closure of a single state.
    pub fn epsilon_closure_of(&self, state: StateId) -> StateSet {
        self.epsilon_closure(&StateSet::singleton(state))
    }

    /// Collects all states that are reachable from a state in `states` on `column` and closes
    /// the result under epsilon edges. An empty move stays empty.
    pub(crate) fn step_closure(&self, states: &StateSet, column: usize) -> StateSet {
        let mut moved = StateSet::new();
        for q in states {
            moved.union_with(self.successors(q, column));
        }
        if moved.is_empty() {
            return moved;
        }
        self.epsilon_closure(&moved)
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    fn chain_with_cycle() -> Automaton {
        // 0 -ε-> 1 -ε-> 2 -ε-> 0, 2 -a-> 3 -ε-> 4
        Description::new(['a'])
            .initial("0")
            .epsilon("0", "1")
            .epsilon("1", "2")
            .epsilon("2", "0")
            .edge("2", 'a', "3")
            .epsilon("3", "4")
            .resolve()
            .unwrap()
    }

    #[test_log::test]
    fn closure_follows_cycles() {
        let aut = chain_with_cycle();
        let closure = aut.epsilon_closure_of(0);
        assert_eq!(closure.to_vec(), vec![0, 1, 2]);
        assert_eq!(aut.epsilon_closure_of(3).to_vec(), vec![3, 4]);
        assert_eq!(aut.epsilon_closure_of(4), StateSet::singleton(4));
    }

    #[test]
    fn closure_is_monotone_and_idempotent() {
        let aut = chain_with_cycle();
        for states in [
            StateSet::new(),
            StateSet::singleton(1),
            [1, 3].into_iter().collect(),
            aut.states().collect(),
        ] {
            let closure = aut.epsilon_closure(&states);
            assert!(states.is_subset(&closure));
            assert_eq!(aut.epsilon_closure(&closure), closure);
        }
    }

    #[test]
    fn step_closure_moves_then_closes() {
        let aut = chain_with_cycle();
        let start = aut.epsilon_closure(aut.initial_states());
        assert_eq!(aut.step_closure(&start, 0).to_vec(), vec![3, 4]);
        assert!(aut.step_closure(&StateSet::singleton(3), 0).is_empty());
    }
}
