use std::{fmt::Debug, hash::Hash};

use itertools::Itertools;

use crate::Show;

/// A symbol is anything that can label a transition: it has to be comparable, hashable and
/// displayable. Blanket-implemented, so `char`, `u8`, `usize` and `String` all qualify.
pub trait Symbol: Clone + Eq + Ord + Hash + Debug + Show {}

impl<T: Clone + Eq + Ord + Hash + Debug + Show> Symbol for T {}

/// The label of an edge. Either a symbol of the alphabet or the distinguished `Epsilon`
/// marker, which consumes no input. As the marker is its own variant, it can never be
/// confused with (or become) a member of an [`Alphabet`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Label<S> {
    /// Consumes the given symbol.
    Symbol(S),
    /// Consumes nothing.
    Epsilon,
}

impl<S> Label<S> {
    /// Returns true for the epsilon marker.
    pub fn is_epsilon(&self) -> bool {
        matches!(self, Label::Epsilon)
    }

    /// Returns the symbol, if this is not the epsilon marker.
    pub fn symbol(&self) -> Option<&S> {
        match self {
            Label::Symbol(sym) => Some(sym),
            Label::Epsilon => None,
        }
    }
}

impl<S> From<S> for Label<S> {
    fn from(value: S) -> Self {
        Label::Symbol(value)
    }
}

impl<S: Show> Show for Label<S> {
    fn show(&self) -> String {
        match self {
            Label::Symbol(sym) => sym.show(),
            Label::Epsilon => "ε".to_string(),
        }
    }
}

/// An ordered, duplicate-free collection of symbols. The order in which symbols are given is
/// kept, it determines the column order of transition tables and the order in which the
/// subset construction explores successors.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Alphabet<S = char>(Vec<S>);

impl<S: Symbol> Alphabet<S> {
    /// Creates an alphabet from the given symbols, keeping their order. Returns the first
    /// symbol that occurs twice as error.
    pub fn try_new<I: IntoIterator<Item = S>>(symbols: I) -> Result<Self, S> {
        let symbols = symbols.into_iter().collect_vec();
        if let Some(dup) = symbols.iter().duplicates().next() {
            return Err(dup.clone());
        }
        Ok(Self(symbols))
    }

    /// Returns the number of symbols.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Checks whether `symbol` belongs to the alphabet.
    pub fn contains(&self, symbol: &S) -> bool {
        self.0.contains(symbol)
    }

    /// Returns the position of `symbol` in the declared order.
    pub fn position(&self, symbol: &S) -> Option<usize> {
        self.0.iter().position(|s| s == symbol)
    }

    /// Returns the symbol at position `pos`.
    pub fn nth(&self, pos: usize) -> Option<&S> {
        self.0.get(pos)
    }

    /// Iterates over all symbols in the declared order.
    pub fn universe(&self) -> std::slice::Iter<'_, S> {
        self.0.iter()
    }
}

impl Alphabet<char> {
    /// Creates an alphabet over the first `size` lowercase letters.
    pub fn of_size(size: usize) -> Self {
        assert!(size <= 26, "Alphabet is too large");
        Self((0..size).map(|i| (b'a' + i as u8) as char).collect())
    }
}

impl<S: Show> Show for Alphabet<S> {
    fn show(&self) -> String {
        format!("{{{}}}", self.0.iter().map(|s| s.show()).join(", "))
    }
}
