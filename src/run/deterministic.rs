use tracing::trace;

use crate::{
    alphabet::Symbol,
    automaton::{Dfa, StateId},
    Show,
};

use super::{DeterministicOutcome, RunError, RunOutcome};

/// Executes a [`Dfa`] symbol by symbol. The runner borrows the automaton and owns nothing but
/// its current state and the number of steps taken, so any number of runners can work on the
/// same automaton independently.
#[derive(Debug, Clone)]
pub struct DeterministicRunner<'a, S: Symbol> {
    dfa: &'a Dfa<S>,
    current: StateId,
    step_count: usize,
}

impl<'a, S: Symbol> DeterministicRunner<'a, S> {
    /// Creates a runner positioned in the initial state of `dfa`.
    pub fn new(dfa: &'a Dfa<S>) -> Self {
        Self {
            dfa,
            current: dfa.initial(),
            step_count: 0,
        }
    }

    /// The state the runner is currently in.
    pub fn current(&self) -> StateId {
        self.current
    }

    /// The number of transitions taken so far.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Whether the input consumed so far is accepted.
    pub fn is_accepting(&self) -> bool {
        self.dfa.is_accepting(self.current)
    }

    /// Moves back to the initial state and forgets all steps.
    pub fn reset(&mut self) {
        self.current = self.dfa.initial();
        self.step_count = 0;
    }

    /// Takes the transition on `symbol`. Fails with [`RunError::SymbolNotInAlphabet`] for an
    /// unknown symbol and with [`RunError::UndefinedTransition`] if the current state has no
    /// successor on `symbol`. A failed step leaves the runner untouched.
    pub fn step(&mut self, symbol: &S) -> Result<StateId, RunError<S>> {
        let column =
            self.dfa
                .alphabet()
                .position(symbol)
                .ok_or_else(|| RunError::SymbolNotInAlphabet {
                    symbol: symbol.clone(),
                    position: self.step_count,
                })?;
        let next = self.dfa.successor_at(self.current, column).ok_or_else(|| {
            RunError::UndefinedTransition {
                state: self.dfa.name_of(self.current),
                symbol: symbol.clone(),
                position: self.step_count,
            }
        })?;
        trace!(
            "{} --{}--> {}",
            self.dfa.name_of(self.current),
            symbol.show(),
            self.dfa.name_of(next)
        );
        self.current = next;
        self.step_count += 1;
        Ok(next)
    }

    /// Steps through all symbols of `word`, stopping at the first failure.
    pub fn run<W: IntoIterator<Item = S>>(
        &mut self,
        word: W,
    ) -> Result<DeterministicOutcome, RunError<S>> {
        for symbol in word {
            self.step(&symbol)?;
        }
        Ok(self.outcome())
    }

    /// Summarizes the current state of the runner.
    pub fn outcome(&self) -> DeterministicOutcome {
        RunOutcome {
            accepted: self.is_accepting(),
            reached: self.current,
            transitions: self.step_count,
        }
    }
}

impl<S: Symbol> Dfa<S> {
    /// Creates a fresh [`DeterministicRunner`] for `self`.
    pub fn runner(&self) -> DeterministicRunner<'_, S> {
        DeterministicRunner::new(self)
    }

    /// Runs `word` from the initial state.
    ///
    /// # Example
    /// ```
    /// use finite_automata::machines;
    ///
    /// let dfa = machines::ends_in_one();
    /// let outcome = dfa.run("001101".chars()).unwrap();
    /// assert!(outcome.accepted);
    /// assert_eq!(outcome.transitions, 6);
    /// ```
    pub fn run<W: IntoIterator<Item = S>>(
        &self,
        word: W,
    ) -> Result<DeterministicOutcome, RunError<S>> {
        self.runner().run(word)
    }

    /// Returns whether `word` is accepted.
    pub fn accepts<W: IntoIterator<Item = S>>(&self, word: W) -> Result<bool, RunError<S>> {
        self.run(word).map(|outcome| outcome.accepted)
    }
}
