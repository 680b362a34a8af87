use fastrand::Rng;
use tracing::debug;

use crate::prelude::*;

/// Draws a random NFA with `size` states named `q0`, `q1`, ... over the first `symbols`
/// lowercase letters. The algorithm is as follows:
/// 1. State `q0` is initial, every other state is additionally initial with probability `1/size`.
/// 2. Each state is accepting with probability `1/2`.
/// 3. For each pair of states and each symbol, an edge is inserted with probability `density`.
/// 4. For each pair of distinct states, an epsilon edge is inserted with probability `density / 2`.
///
/// Passing a seeded [`Rng`] makes the result reproducible.
pub fn random_nfa(rng: &mut Rng, symbols: usize, size: usize, density: f64) -> Nfa {
    assert!(size > 0, "an automaton needs at least one state");
    let alphabet = Alphabet::of_size(symbols);
    let name = |q: usize| format!("q{q}");

    let mut description = Description::new(alphabet.universe().cloned()).initial(name(0));
    for q in 0..size {
        description = description.state(name(q));
        if q > 0 && rng.usize(..size) == 0 {
            description = description.initial(name(q));
        }
        if rng.bool() {
            description = description.accepting([name(q)]);
        }
    }

    let mut edges = 0;
    for q in 0..size {
        for p in 0..size {
            for &sym in alphabet.universe() {
                if rng.f64() < density {
                    description = description.edge(name(q), sym, name(p));
                    edges += 1;
                }
            }
            if q != p && rng.f64() < density / 2.0 {
                description = description.epsilon(name(q), name(p));
                edges += 1;
            }
        }
    }
    debug!("drew random NFA with {size} states and {edges} edges");

    description
        .into_nfa()
        .expect("randomly drawn descriptions only mention declared states")
}

/// Draws a random word over `alphabet` whose length is uniformly chosen from `0..=max_len`.
pub fn random_word<S: Symbol>(rng: &mut Rng, alphabet: &Alphabet<S>, max_len: usize) -> Vec<S> {
    if alphabet.size() == 0 {
        return vec![];
    }
    let len = rng.usize(..=max_len);
    (0..len)
        .filter_map(|_| alphabet.nth(rng.usize(..alphabet.size())).cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn seeded_generation_is_reproducible() {
        let left = random_nfa(&mut Rng::with_seed(7), 2, 5, 0.3);
        let right = random_nfa(&mut Rng::with_seed(7), 2, 5, 0.3);
        assert_eq!(left, right);
        assert_eq!(left.size(), 5);
        assert!(left.initial_states().contains(0));
    }

    #[test]
    fn random_words_stay_in_the_alphabet() {
        let mut rng = Rng::with_seed(3);
        let alphabet = Alphabet::of_size(3);
        for _ in 0..20 {
            let word = random_word(&mut rng, &alphabet, 6);
            assert!(word.len() <= 6);
            assert!(word.iter().all(|sym| alphabet.contains(sym)));
        }
    }
}
