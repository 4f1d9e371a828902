use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::state::RotationState;
use super::types::Selection;

pub trait Shuffler {
    fn shuffle(&mut self, items: &mut [String]);
}

/// Uniform Fisher-Yates shuffle over any rng.
pub struct RandomShuffler<R = StdRng> {
    rng: R,
}

impl RandomShuffler<StdRng> {
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> RandomShuffler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Shuffler for RandomShuffler<R> {
    fn shuffle(&mut self, items: &mut [String]) {
        items.shuffle(&mut self.rng);
    }
}

pub struct Selector {
    shuffler: Box<dyn Shuffler + Send>,
}

impl Selector {
    pub fn new(shuffler: impl Shuffler + Send + 'static) -> Self {
        Self {
            shuffler: Box::new(shuffler),
        }
    }

    pub fn random() -> Self {
        Self::new(RandomShuffler::from_os_rng())
    }

    /// Builds a cycle from scratch: shuffled candidates, cursor at the start.
    pub fn fresh_state(&mut self, mut candidates: Vec<String>) -> RotationState {
        self.shuffler.shuffle(&mut candidates);
        RotationState {
            items: candidates,
            cursor: 0,
        }
    }

    /// Returns the verse under the cursor and advances. Exhausting the cycle
    /// reshuffles and rewinds before returning, so the cursor is never left at
    /// `len` between calls.
    pub fn next(&mut self, state: &mut RotationState) -> Selection {
        let verse = state.items[state.cursor].clone();
        state.cursor += 1;

        let cycle_completed = state.cursor >= state.items.len();
        if cycle_completed {
            self.shuffler.shuffle(&mut state.items);
            state.cursor = 0;
        }

        Selection {
            verse,
            cycle_completed,
        }
    }

    pub fn reset(&mut self, state: &mut RotationState) {
        self.shuffler.shuffle(&mut state.items);
        state.cursor = 0;
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) struct IdentityShuffler;

    impl Shuffler for IdentityShuffler {
        fn shuffle(&mut self, _items: &mut [String]) {}
    }

    pub(crate) struct ReverseShuffler;

    impl Shuffler for ReverseShuffler {
        fn shuffle(&mut self, items: &mut [String]) {
            items.reverse();
        }
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_identity_walk_over_three() {
        let mut selector = Selector::new(IdentityShuffler);
        let mut state = selector.fresh_state(strings(&["A", "B", "C"]));
        assert_eq!(state.cursor(), 0);

        let first = selector.next(&mut state);
        assert_eq!(first.verse, "A");
        assert!(!first.cycle_completed);
        assert_eq!(state.cursor(), 1);

        assert_eq!(selector.next(&mut state).verse, "B");
        assert_eq!(state.cursor(), 2);

        let third = selector.next(&mut state);
        assert_eq!(third.verse, "C");
        assert!(third.cycle_completed);
        assert_eq!(state.cursor(), 0);
    }

    #[test]
    fn test_full_cycle_returns_each_item_once_then_reshuffles() {
        let mut selector = Selector::new(ReverseShuffler);
        let mut state = RotationState::new(strings(&["a", "b", "c", "d"]), 0).unwrap();
        let before = state.items().to_vec();

        let picked: Vec<String> = (0..before.len())
            .map(|_| selector.next(&mut state).verse)
            .collect();

        assert_eq!(picked, before);
        assert_eq!(state.cursor(), 0);
        assert_eq!(state.items(), strings(&["d", "c", "b", "a"]).as_slice());
    }

    #[test]
    fn test_reshuffle_does_not_change_returned_value() {
        let mut selector = Selector::new(ReverseShuffler);
        let mut state = RotationState::new(strings(&["X", "Y"]), 1).unwrap();

        let selection = selector.next(&mut state);
        assert_eq!(selection.verse, "Y");
        assert!(selection.cycle_completed);
        assert_eq!(state.cursor(), 0);
        assert_eq!(state.items(), strings(&["Y", "X"]).as_slice());
    }

    #[test]
    fn test_single_item_always_returned() {
        let mut selector = Selector::new(RandomShuffler::seeded(7));
        let mut state = RotationState::new(strings(&["only"]), 0).unwrap();

        for _ in 0..5 {
            let selection = selector.next(&mut state);
            assert_eq!(selection.verse, "only");
            assert_eq!(state.cursor(), 0);
            assert_eq!(state.items(), strings(&["only"]).as_slice());
        }
    }

    #[test]
    fn test_fresh_state_is_permutation() {
        let candidates = strings(&["1", "2", "3", "4", "5", "6", "7", "8"]);
        let mut selector = Selector::new(RandomShuffler::seeded(42));
        let state = selector.fresh_state(candidates.clone());

        let mut got = state.items().to_vec();
        got.sort();
        let mut want = candidates;
        want.sort();
        assert_eq!(got, want);
        assert_eq!(state.cursor(), 0);
    }

    #[test]
    fn test_seeded_shuffles_are_reproducible() {
        let candidates = strings(&["a", "b", "c", "d", "e", "f"]);
        let one = Selector::new(RandomShuffler::seeded(3)).fresh_state(candidates.clone());
        let two = Selector::new(RandomShuffler::seeded(3)).fresh_state(candidates);
        assert_eq!(one, two);
    }

    #[test]
    fn test_reset_rewinds_cursor() {
        let mut selector = Selector::new(ReverseShuffler);
        let mut state = RotationState::new(strings(&["a", "b", "c"]), 2).unwrap();

        selector.reset(&mut state);
        assert_eq!(state.cursor(), 0);
        assert_eq!(state.remaining(), 3);
        assert_eq!(state.items(), strings(&["c", "b", "a"]).as_slice());
    }
}
