//! Library for simulating finite automata over finite words and for compiling nondeterministic
//! automata into deterministic ones.
//!
//! An automaton consists of an [`Alphabet`] of symbols, a finite list of named states, a set of
//! initial states, a set of accepting states and a transition relation. Edges of the relation are
//! labeled either by a symbol of the alphabet or by the epsilon marker [`alphabet::Label::Epsilon`],
//! which allows a transition without consuming input. Automata are described through a
//! [`automaton::Description`], which refers to states by name, and are then resolved into an
//! [`Automaton`] which refers to states by their index. Resolution checks that the description is
//! well-formed, so once an [`Automaton`] exists, every state and symbol it mentions is known.
//!
//! There are two views on the resolved model:
//! - [`Nfa`] is an arbitrary automaton, possibly with several initial states and epsilon edges.
//!   Running it tracks the set of currently active states.
//! - [`Dfa`] is guaranteed to have a single initial state, no epsilon edges and at most one
//!   successor for each state and symbol. Running it tracks a single state. A missing transition
//!   makes a run fail, use [`Dfa::totalized`] to obtain an automaton with an explicit sink instead.
//!
//! [`Nfa::determinize`] implements the subset construction, producing a total [`Dfa`] that accepts
//! the same language. Only subsets that are actually reachable are ever constructed.
//!
//! ```
//! use finite_automata::prelude::*;
//!
//! let nfa = Description::new(['0', '1'])
//!     .initial("s0")
//!     .accepting(["s1"])
//!     .edge("s0", '0', "s0")
//!     .epsilon("s0", "s1")
//!     .edge("s1", '1', "s1")
//!     .into_nfa()
//!     .unwrap();
//! let dfa = nfa.determinize().unwrap();
//!
//! assert!(nfa.accepts("0001".chars()).unwrap());
//! assert!(dfa.accepts("0001".chars()).unwrap());
//! assert!(!dfa.accepts("10".chars()).unwrap());
//! ```
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use finite_automata::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        alphabet::{Alphabet, Label, Symbol},
        automaton::{Automaton, Description, Dfa, Malformed, Nfa, StateId},
        math::{Set, StateSet},
        run::{DeterministicRunner, NondeterministicRunner, RunError, RunOutcome},
        Show,
    };
}

/// Contains the collection types used throughout the crate, most importantly [`math::StateSet`].
pub mod math;

/// Module that contains definitions for dealing with alphabets and edge labels.
pub mod alphabet;
pub use alphabet::Alphabet;

/// Defines the automaton model, its textual description and the deterministic and
/// nondeterministic views on it.
pub mod automaton;
pub use automaton::{Automaton, Dfa, Nfa};

/// Simulation of automata on finite words.
pub mod run;

/// Conversion of nondeterministic automata into deterministic ones via the subset construction.
pub mod determinize;

/// A small collection of ready-made automata.
pub mod machines;

/// Implements the generation of random automata. This is feature gated behind the `random` feature.
#[cfg(feature = "random")]
pub mod random;

/// Helper trait which can be used to display states, symbols, words and such.
pub trait Show {
    /// Returns a human readable representation of `self`. This is mainly used for tables, error
    /// messages and debugging output.
    fn show(&self) -> String;
}

impl Show for char {
    fn show(&self) -> String {
        self.to_string()
    }
}

impl Show for u8 {
    fn show(&self) -> String {
        self.to_string()
    }
}

impl Show for usize {
    fn show(&self) -> String {
        self.to_string()
    }
}

impl Show for String {
    fn show(&self) -> String {
        self.clone()
    }
}

impl<S: Show> Show for [S] {
    fn show(&self) -> String {
        format!(
            "\"{}\"",
            itertools::Itertools::join(&mut self.iter().map(|x| x.show()), "")
        )
    }
}

impl<S: Show> Show for Vec<S> {
    fn show(&self) -> String {
        self.as_slice().show()
    }
}

impl<S: Show + ?Sized> Show for &S {
    fn show(&self) -> String {
        S::show(*self)
    }
}
