use crate::alphabet::Symbol;

use super::Automaton;

/// A nondeterministic finite automaton (NFA) with epsilon edges. Any [`Automaton`] is an NFA,
/// it may have several (or no) initial states, epsilon edges and multiple successors for a
/// state and symbol.
///
/// All query methods of the underlying [`Automaton`] are available through `Deref`.
#[derive(Clone, PartialEq, Eq)]
pub struct Nfa<S: Symbol = char>(Automaton<S>);

impl<S: Symbol> From<Automaton<S>> for Nfa<S> {
    fn from(value: Automaton<S>) -> Self {
        Self(value)
    }
}

impl<S: Symbol> Nfa<S> {
    /// Returns the underlying automaton.
    pub fn automaton(&self) -> &Automaton<S> {
        &self.0
    }
}

impl<S: Symbol> std::ops::Deref for Nfa<S> {
    type Target = Automaton<S>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S: Symbol> std::fmt::Debug for Nfa<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NFA ")?;
        std::fmt::Debug::fmt(&self.0, f)
    }
}
