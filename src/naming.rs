//! Default recipe names.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::types::{MAX_NAME_LEN, RecipeName};

const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Produces random all-letter names for recipes created without one.
///
/// The generator state is owned by whoever constructs it; nothing is shared
/// process-wide.
#[derive(Debug, Clone)]
pub struct NameGenerator {
    rng: StdRng,
    min_len: usize,
    max_len: usize,
}

impl NameGenerator {
    /// Deterministic generator; equal seeds yield equal name sequences.
    pub fn from_seed(seed: u64, min_len: usize, max_len: usize) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), min_len, max_len)
    }

    /// Generator seeded from operating-system entropy.
    pub fn from_entropy(min_len: usize, max_len: usize) -> Self {
        Self::with_rng(StdRng::from_entropy(), min_len, max_len)
    }

    fn with_rng(rng: StdRng, min_len: usize, max_len: usize) -> Self {
        let max_len = max_len.clamp(1, MAX_NAME_LEN);
        let min_len = min_len.clamp(1, max_len);
        Self {
            rng,
            min_len,
            max_len,
        }
    }

    /// Draws the next name.
    pub fn generate(&mut self) -> RecipeName {
        let len = self.rng.gen_range(self.min_len..=self.max_len);
        let name: String = (0..len)
            .map(|_| char::from(LETTERS[self.rng.gen_range(0..LETTERS.len())]))
            .collect();
        // Letters only and within the length bounds, so always valid.
        debug_assert!(RecipeName::new(name.as_str()).is_ok());
        RecipeName::new_unchecked(name)
    }
}
