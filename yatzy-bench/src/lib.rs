//! Shared inputs for the engine benchmarks.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;
use yatzy_core::Hand;

/// `n` hands drawn from a fixed-seed ChaCha8 stream, so every bench run
/// scores the same inputs.
pub fn dice_samples(n: usize) -> Vec<Hand> {
    let mut rng = ChaCha8Rng::seed_from_u64(0x5EED);
    (0..n)
        .map(|_| std::array::from_fn(|_| rng.gen_range(1..=6)))
        .collect()
}
