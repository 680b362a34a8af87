use thiserror::Error;

use crate::{alphabet::Symbol, automaton::StateId, math::StateSet, Show};

mod deterministic;
pub use deterministic::DeterministicRunner;

mod nondeterministic;
pub use nondeterministic::NondeterministicRunner;

/// The reasons for which a run can fail. A failed run stops at the offending symbol, whose
/// position in the input is reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunError<S: Symbol> {
    /// The input contains a symbol that is not part of the alphabet. This is fatal for both
    /// deterministic and nondeterministic runs.
    #[error("symbol `{}` at position {position} is not in the alphabet", .symbol.show())]
    SymbolNotInAlphabet {
        /// The offending symbol.
        symbol: S,
        /// Its position in the input.
        position: usize,
    },
    /// A deterministic run reached a state that has no successor for the next symbol. This
    /// never happens for nondeterministic runs, which simply end up with no active state.
    #[error("state `{state}` has no transition on `{}` (position {position})", .symbol.show())]
    UndefinedTransition {
        /// Name of the state in which the run got stuck.
        state: String,
        /// The symbol for which no transition exists.
        symbol: S,
        /// Its position in the input.
        position: usize,
    },
}

/// The result of a successful run, that is a run which consumed the entire input. `R` is
/// the type of what was reached, a single [`StateId`] for deterministic and a [`StateSet`]
/// for nondeterministic runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome<R> {
    /// Whether the input is accepted.
    pub accepted: bool,
    /// The state(s) reached after consuming the input.
    pub reached: R,
    /// The number of transitions taken.
    pub transitions: usize,
}

/// Outcome of a deterministic run.
pub type DeterministicOutcome = RunOutcome<StateId>;
/// Outcome of a nondeterministic run.
pub type NondeterministicOutcome = RunOutcome<StateSet>;

impl<R> std::fmt::Display for RunOutcome<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "After {} transitions, the machine {} the input.",
            self.transitions,
            if self.accepted { "accepts" } else { "rejects" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports() {
        let outcome = RunOutcome {
            accepted: true,
            reached: 0,
            transitions: 6,
        };
        assert_eq!(
            outcome.to_string(),
            "After 6 transitions, the machine accepts the input."
        );

        let err: RunError<char> = RunError::SymbolNotInAlphabet {
            symbol: '2',
            position: 0,
        };
        assert_eq!(
            err.to_string(),
            "symbol `2` at position 0 is not in the alphabet"
        );
    }
}
