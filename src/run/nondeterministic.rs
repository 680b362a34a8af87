use tracing::trace;

use crate::{alphabet::Symbol, automaton::Nfa, math::StateSet, Show};

use super::{NondeterministicOutcome, RunError, RunOutcome};

/// Executes an [`Nfa`] by tracking the set of all states the automaton could be in. Initially
/// this is the epsilon closure of the initial states.
#[derive(Debug, Clone)]
pub struct NondeterministicRunner<'a, S: Symbol> {
    nfa: &'a Nfa<S>,
    active: StateSet,
    step_count: usize,
}

impl<'a, S: Symbol> NondeterministicRunner<'a, S> {
    /// Creates a runner whose active states are the epsilon closure of the initial states.
    pub fn new(nfa: &'a Nfa<S>) -> Self {
        Self {
            nfa,
            active: nfa.epsilon_closure(nfa.initial_states()),
            step_count: 0,
        }
    }

    /// The currently active states.
    pub fn active(&self) -> &StateSet {
        &self.active
    }

    /// The number of transitions taken so far.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Whether the input consumed so far is accepted, i.e. some active state is accepting.
    pub fn is_accepting(&self) -> bool {
        self.active.intersects(self.nfa.accepting())
    }

    /// Moves back to the epsilon closure of the initial states and forgets all steps.
    pub fn reset(&mut self) {
        self.active = self.nfa.epsilon_closure(self.nfa.initial_states());
        self.step_count = 0;
    }

    /// Moves all active states along their `symbol` edges and closes the result under epsilon
    /// edges. If no active state has a `symbol` edge, the set of active states becomes empty and
    /// stays so, which rejects but is not an error. Only a symbol outside of the alphabet
    /// makes the step fail.
    pub fn step(&mut self, symbol: &S) -> Result<&StateSet, RunError<S>> {
        let column =
            self.nfa
                .alphabet()
                .position(symbol)
                .ok_or_else(|| RunError::SymbolNotInAlphabet {
                    symbol: symbol.clone(),
                    position: self.step_count,
                })?;
        let next = self.nfa.step_closure(&self.active, column);
        trace!(
            "{} --{}--> {}",
            self.nfa.show_states(&self.active),
            symbol.show(),
            self.nfa.show_states(&next)
        );
        self.active = next;
        self.step_count += 1;
        Ok(&self.active)
    }

    /// Steps through all symbols of `word`, stopping at the first failure.
    pub fn run<W: IntoIterator<Item = S>>(
        &mut self,
        word: W,
    ) -> Result<NondeterministicOutcome, RunError<S>> {
        for symbol in word {
            self.step(&symbol)?;
        }
        Ok(self.outcome())
    }

    /// Summarizes the current state of the runner.
    pub fn outcome(&self) -> NondeterministicOutcome {
        RunOutcome {
            accepted: self.is_accepting(),
            reached: self.active.clone(),
            transitions: self.step_count,
        }
    }
}

impl<S: Symbol> Nfa<S> {
    /// Creates a fresh [`NondeterministicRunner`] for `self`.
    pub fn runner(&self) -> NondeterministicRunner<'_, S> {
        NondeterministicRunner::new(self)
    }

    /// Runs `word` from the initial states.
    pub fn run<W: IntoIterator<Item = S>>(
        &self,
        word: W,
    ) -> Result<NondeterministicOutcome, RunError<S>> {
        self.runner().run(word)
    }

    /// Returns whether `word` is accepted.
    pub fn accepts<W: IntoIterator<Item = S>>(&self, word: W) -> Result<bool, RunError<S>> {
        self.run(word).map(|outcome| outcome.accepted)
    }
}

#[cfg(test)]
mod tests {
    use crate::{machines, prelude::*};

    #[test_log::test]
    fn zeros_then_ones() {
        let nfa = machines::zeros_then_ones();
        let s0 = nfa.state_index("s0").unwrap();
        let s1 = nfa.state_index("s1").unwrap();

        let outcome = nfa.run("0001".chars()).unwrap();
        assert!(outcome.accepted);
        assert_eq!(outcome.transitions, 4);
        assert_eq!(outcome.reached, StateSet::singleton(s1));

        assert_eq!(
            nfa.run("00".chars()).unwrap().reached,
            [s0, s1].into_iter().collect()
        );
        assert!(!nfa.accepts("10".chars()).unwrap());
        assert!(nfa.accepts("".chars()).unwrap());
    }

    #[test]
    fn dead_runs_stay_dead() {
        let nfa = machines::zeros_then_ones();
        let mut runner = nfa.runner();
        runner.run("10".chars()).unwrap();
        assert!(runner.active().is_empty());
        runner.run("0011".chars()).unwrap();
        assert!(runner.active().is_empty());
        assert!(!runner.is_accepting());
        assert_eq!(runner.step_count(), 6);

        // still, unknown symbols are reported
        assert_eq!(
            runner.step(&'x'),
            Err(RunError::SymbolNotInAlphabet {
                symbol: 'x',
                position: 6
            })
        );
    }

    #[test]
    fn invalid_symbol_is_fatal() {
        let nfa = machines::zeros_then_ones();
        assert_eq!(
            nfa.run("2".chars()),
            Err(RunError::SymbolNotInAlphabet {
                symbol: '2',
                position: 0
            })
        );
    }

    #[test]
    fn several_initial_states() {
        let nfa = Description::new(['a', 'b'])
            .initial("p")
            .initial("q")
            .accepting(["r"])
            .edge("p", 'a', "r")
            .edge("q", 'b', "r")
            .into_nfa()
            .unwrap();
        assert!(nfa.accepts("a".chars()).unwrap());
        assert!(nfa.accepts("b".chars()).unwrap());
        assert!(!nfa.accepts("ab".chars()).unwrap());
    }

    #[test]
    fn no_initial_states_rejects_everything() {
        let nfa = Description::new(['a'])
            .accepting(["p"])
            .edge("p", 'a', "p")
            .into_nfa()
            .unwrap();
        assert!(!nfa.accepts("".chars()).unwrap());
        assert!(!nfa.accepts("aaa".chars()).unwrap());
    }

    #[test]
    fn prefix_acceptance() {
        let nfa = machines::contains_one_zero_one();
        let mut runner = nfa.runner();
        let verdicts = "0101"
            .chars()
            .map(|sym| {
                runner.step(&sym).unwrap();
                runner.is_accepting()
            })
            .collect::<Vec<_>>();
        assert_eq!(verdicts, vec![false, false, false, true]);
    }
}
