use crate::prelude::*;

/// One of the ready-made automata, which can either be deterministic or not.
#[derive(Debug, Clone)]
pub enum Machine {
    /// A deterministic machine.
    Deterministic(Dfa),
    /// A nondeterministic machine.
    Nondeterministic(Nfa),
}

impl Machine {
    /// Views the machine as an [`Nfa`], which is always possible.
    pub fn into_nfa(self) -> Nfa {
        match self {
            Machine::Deterministic(dfa) => dfa.into_nfa(),
            Machine::Nondeterministic(nfa) => nfa,
        }
    }
}

/// Names under which the machines can be obtained from [`by_name`].
pub const NAMES: [&str; 5] = [
    "ends-in-one",
    "zeros-then-ones",
    "contains-101",
    "epsilon-cycle",
    "third-from-last",
];

/// Looks up a machine by one of the [`NAMES`].
pub fn by_name(name: &str) -> Option<Machine> {
    Some(match name {
        "ends-in-one" => Machine::Deterministic(ends_in_one()),
        "zeros-then-ones" => Machine::Nondeterministic(zeros_then_ones()),
        "contains-101" => Machine::Nondeterministic(contains_one_zero_one()),
        "epsilon-cycle" => Machine::Nondeterministic(epsilon_cycle()),
        "third-from-last" => Machine::Nondeterministic(nth_from_last_is_one(3)),
        _ => return None,
    })
}

/// A DFA over `{0, 1}` that accepts the empty word and all words ending in `1`. Both of its
/// states `q0` (initial, accepting) and `q1` move to `q0` on `1` and to `q1` on `0`.
pub fn ends_in_one() -> Dfa {
    Description::new(['0', '1'])
        .initial("q0")
        .accepting(["q0"])
        .edge("q0", '0', "q1")
        .edge("q0", '1', "q0")
        .edge("q1", '0', "q1")
        .edge("q1", '1', "q0")
        .into_dfa()
        .expect("ends-in-one is a well-formed DFA")
}

/// An NFA over `{0, 1}` accepting any number of `0`s followed by any number of `1`s. State `s0`
/// reads the zeros and moves to the accepting `s1` via an epsilon edge.
pub fn zeros_then_ones() -> Nfa {
    Description::new(['0', '1'])
        .initial("s0")
        .accepting(["s1"])
        .edge("s0", '0', "s0")
        .epsilon("s0", "s1")
        .edge("s1", '1', "s1")
        .into_nfa()
        .expect("zeros-then-ones is a well-formed NFA")
}

/// An NFA over `{0, 1}` that guesses where an infix `101` starts.
pub fn contains_one_zero_one() -> Nfa {
    Description::new(['0', '1'])
        .initial("a")
        .accepting(["d"])
        .edge("a", '0', "a")
        .edge("a", '1', "a")
        .edge("a", '1', "b")
        .edge("b", '0', "c")
        .edge("c", '1', "d")
        .edge("d", '0', "d")
        .edge("d", '1', "d")
        .into_nfa()
        .expect("contains-101 is a well-formed NFA")
}

/// An NFA over `{a, b}` for `a*b` whose initial states form a cycle of epsilon edges.
pub fn epsilon_cycle() -> Nfa {
    Description::new(['a', 'b'])
        .initial("p")
        .accepting(["s"])
        .epsilon("p", "q")
        .epsilon("q", "r")
        .epsilon("r", "p")
        .edge("q", 'a', "q")
        .edge("r", 'b', "s")
        .into_nfa()
        .expect("epsilon-cycle is a well-formed NFA")
}

/// The classic NFA with `n + 1` states accepting the words over `{0, 1}` whose `n`-th symbol
/// from the end is a `1`. Every deterministic automaton for this language needs `2^n` states.
pub fn nth_from_last_is_one(n: usize) -> Nfa {
    assert!(n > 0, "position from the end starts at 1");
    let mut description = Description::new(['0', '1'])
        .initial("q0")
        .accepting([format!("q{n}")])
        .edge("q0", '0', "q0")
        .edge("q0", '1', "q0")
        .edge("q0", '1', "q1");
    for i in 1..n {
        let (from, to) = (format!("q{i}"), format!("q{}", i + 1));
        description = description
            .edge(from.clone(), '0', to.clone())
            .edge(from, '1', to);
    }
    description
        .into_nfa()
        .expect("nth-from-last is a well-formed NFA")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_names_resolve() {
        for name in NAMES {
            assert!(by_name(name).is_some(), "{name}");
        }
        assert!(by_name("unknown").is_none());
    }

    #[test]
    fn nth_from_last() {
        let nfa = nth_from_last_is_one(2);
        assert!(nfa.accepts("0010".chars()).unwrap());
        assert!(nfa.accepts("11".chars()).unwrap());
        assert!(!nfa.accepts("0101".chars()).unwrap());
        assert!(!nfa.accepts("1".chars()).unwrap());
    }
}
