#![cfg(feature = "random")]

use fastrand::Rng;
use finite_automata::{machines, prelude::*, random};
use itertools::Itertools;

/// All words over `alphabet` up to length `max_len`, shortest first.
fn words_up_to(alphabet: &Alphabet, max_len: usize) -> Vec<Vec<char>> {
    let mut words = vec![vec![]];
    for len in 1..=max_len {
        words.extend(
            std::iter::repeat(alphabet.universe().cloned().collect_vec())
                .take(len)
                .multi_cartesian_product(),
        );
    }
    words
}

fn random_nfas() -> impl Iterator<Item = Nfa> {
    let mut rng = Rng::with_seed(0xA17);
    (0..40).map(move |i| {
        let size = 1 + i % 6;
        let density = [0.1, 0.25, 0.4][i % 3];
        random::random_nfa(&mut rng, 2, size, density)
    })
}

fn all_nfas() -> Vec<Nfa> {
    machines::NAMES
        .iter()
        .filter_map(|name| machines::by_name(name))
        .map(|machine| machine.into_nfa())
        .chain(random_nfas())
        .collect()
}

fn assert_same_language(nfa: &Nfa, dfa: &Dfa, max_len: usize) {
    for word in words_up_to(nfa.alphabet(), max_len) {
        assert_eq!(
            nfa.accepts(word.iter().cloned()).unwrap(),
            dfa.accepts(word.iter().cloned()).unwrap(),
            "disagreement on {}\n{:?}\n{:?}",
            word.show(),
            nfa,
            dfa
        );
    }
}

#[test_log::test]
fn determinization_preserves_the_language() {
    for nfa in all_nfas() {
        let dfa = nfa.determinize().unwrap();
        assert_same_language(&nfa, &dfa, 7);
    }
}

#[test]
fn determinized_automata_are_total() {
    for nfa in all_nfas() {
        let dfa = nfa.determinize().unwrap();
        assert!(dfa.is_total());
        for q in dfa.reachable_states().iter() {
            for sym in dfa.alphabet().universe() {
                assert!(dfa.successor(q, sym).is_some());
            }
        }
        // running never gets stuck
        for word in words_up_to(dfa.alphabet(), 5) {
            assert!(dfa.run(word).is_ok());
        }
    }
}

#[test]
fn compilation_is_deterministic() {
    for nfa in all_nfas() {
        let first = nfa.determinize().unwrap();
        let second = nfa.clone().determinize().unwrap();
        assert_eq!(first, second);
        assert!(first.equivalent(&second));
    }
}

#[test]
fn compiling_a_compiled_automaton_changes_nothing_semantically() {
    for nfa in all_nfas() {
        let dfa = nfa.determinize().unwrap();
        let again = dfa.clone().into_nfa().determinize().unwrap();
        assert_eq!(dfa.distinguishing_word(&again), None);
        assert!(again.size() <= dfa.size());
    }
}

#[test]
fn closure_is_monotone_and_idempotent() {
    let mut rng = Rng::with_seed(99);
    for nfa in random_nfas() {
        for _ in 0..10 {
            let states: StateSet = nfa.states().filter(|_| rng.bool()).collect();
            let closure = nfa.epsilon_closure(&states);
            assert!(states.is_subset(&closure));
            assert_eq!(nfa.epsilon_closure(&closure), closure);
            for q in closure.iter() {
                assert!(nfa.epsilon_targets(q).is_subset(&closure));
            }
        }
    }
}

#[test]
fn empty_input_checks_the_initial_closure() {
    for nfa in all_nfas() {
        let expected = nfa
            .epsilon_closure(nfa.initial_states())
            .intersects(nfa.accepting());
        assert_eq!(nfa.accepts(std::iter::empty()).unwrap(), expected);

        let dfa = nfa.determinize().unwrap();
        assert_eq!(dfa.accepts(std::iter::empty()).unwrap(), expected);
        assert_eq!(dfa.is_accepting(dfa.initial()), expected);
    }
}

#[test]
fn invalid_symbols_fail_on_both_engines() {
    let expected = Err(RunError::SymbolNotInAlphabet {
        symbol: '2',
        position: 0,
    });

    let dfa = machines::ends_in_one();
    assert_eq!(dfa.run("2".chars()).map(|o| o.accepted), expected);
    assert_eq!(
        dfa.clone().into_nfa().run("2".chars()).map(|o| o.accepted),
        expected
    );

    let nfa = machines::zeros_then_ones();
    assert_eq!(nfa.run("2".chars()).map(|o| o.accepted), expected);
    assert_eq!(
        nfa.determinize()
            .unwrap()
            .run("2".chars())
            .map(|o| o.accepted),
        expected
    );
}

#[test]
fn scenario_zeros_then_ones() {
    let nfa = machines::zeros_then_ones();
    let dfa = nfa.determinize().unwrap();
    for (word, accepted) in [("0001", true), ("10", false)] {
        assert_eq!(nfa.accepts(word.chars()), Ok(accepted));
        assert_eq!(dfa.accepts(word.chars()), Ok(accepted));
    }
}

#[test]
fn scenario_ends_in_one() {
    let dfa = machines::ends_in_one();
    let outcome = dfa.run("001101".chars()).unwrap();
    assert!(outcome.accepted);
    assert_eq!(outcome.transitions, 6);
    assert!(!dfa.run("010010".chars()).unwrap().accepted);
}
