use bit_set::BitSet;
use itertools::Itertools;

use crate::automaton::StateId;
use crate::Show;

/// Type alias for sets, we use this to hide which type of `HashSet` we are actually using.
pub type Set<S> = fxhash::FxHashSet<S>;
/// Type alias for maps, we use this to hide which type of `HashMap` we are actually using.
pub type Map<K, V> = fxhash::FxHashMap<K, V>;

/// Represents a bijective mapping between `L` and `R`, that is a mapping which associates
/// each `L` with precisely one `R` and vice versa.
pub type Bijection<L, R> = bimap::BiBTreeMap<L, R>;

/// A set of state indices, backed by a bitset over the index space of an automaton.
///
/// Equality and hashing only depend on which states are contained, never on the order in
/// which they were inserted or on the capacity of the underlying storage. This makes a
/// [`StateSet`] usable as the identity of a state produced by the subset construction.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateSet(BitSet);

impl StateSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self(BitSet::new())
    }

    /// Creates an empty set that can hold indices below `capacity` without reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self(BitSet::with_capacity(capacity))
    }

    /// Creates a set containing only `state`.
    pub fn singleton(state: StateId) -> Self {
        let mut set = Self::new();
        set.insert(state);
        set
    }

    /// Inserts `state`, returns `true` if it was not present before.
    pub fn insert(&mut self, state: StateId) -> bool {
        self.0.insert(state)
    }

    /// Removes `state`, returns `true` if it was present.
    pub fn remove(&mut self, state: StateId) -> bool {
        self.0.remove(state)
    }

    /// Checks whether `state` is contained.
    pub fn contains(&self, state: StateId) -> bool {
        self.0.contains(state)
    }

    /// Number of contained states.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no state is contained.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the contained states in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.0.iter()
    }

    /// Adds all states of `other` to `self`.
    pub fn union_with(&mut self, other: &StateSet) {
        self.0.union_with(&other.0)
    }

    /// Returns true if `self` and `other` share at least one state.
    pub fn intersects(&self, other: &StateSet) -> bool {
        !self.0.is_disjoint(&other.0)
    }

    /// Returns true if every state of `self` is also contained in `other`.
    pub fn is_subset(&self, other: &StateSet) -> bool {
        self.0.is_subset(&other.0)
    }

    /// The contained states as a sorted vector.
    pub fn to_vec(&self) -> Vec<StateId> {
        self.iter().collect()
    }
}

impl FromIterator<StateId> for StateSet {
    fn from_iter<T: IntoIterator<Item = StateId>>(iter: T) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl Extend<StateId> for StateSet {
    fn extend<T: IntoIterator<Item = StateId>>(&mut self, iter: T) {
        for state in iter {
            self.insert(state);
        }
    }
}

impl<'a> IntoIterator for &'a StateSet {
    type Item = StateId;
    type IntoIter = bit_set::Iter<'a, u32>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl std::fmt::Debug for StateSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.show())
    }
}

impl Show for StateSet {
    fn show(&self) -> String {
        format!("{{{}}}", self.iter().join(", "))
    }
}

#[cfg(test)]
mod tests {
    use std::hash::{Hash, Hasher};

    use super::StateSet;

    fn hash_of(set: &StateSet) -> u64 {
        let mut hasher = fxhash::FxHasher::default();
        set.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn identity_ignores_insertion_order_and_capacity() {
        let mut left = StateSet::with_capacity(128);
        left.extend([5, 1, 3]);
        let right: StateSet = [3, 5, 1, 1].into_iter().collect();

        assert_eq!(left, right);
        assert_eq!(hash_of(&left), hash_of(&right));
        assert_eq!(left.to_vec(), vec![1, 3, 5]);
    }

    #[test]
    fn removal_restores_equality() {
        let mut grown: StateSet = [0, 70].into_iter().collect();
        grown.remove(70);
        assert_eq!(grown, StateSet::singleton(0));
        assert_eq!(hash_of(&grown), hash_of(&StateSet::singleton(0)));
    }

    #[test]
    fn set_operations() {
        let mut a: StateSet = [0, 2].into_iter().collect();
        let b: StateSet = [2, 4].into_iter().collect();
        assert!(a.intersects(&b));
        assert!(!a.is_subset(&b));
        a.union_with(&b);
        assert_eq!(a.len(), 3);
        assert!(b.is_subset(&a));
        assert!(!StateSet::new().intersects(&a));
        assert!(StateSet::new().is_empty());
    }
}
