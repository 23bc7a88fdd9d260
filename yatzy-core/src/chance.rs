//! Dice sources.
//!
//! The engine never touches an RNG directly; every roll goes through a
//! [`DiceSource`]. Three flavours exist:
//! - `Rng`: seeded ChaCha8 stream (normal play, simulation).
//! - `EventKeyed`: outcomes keyed by `(seed, round_idx, roll_idx)` instead of
//!   evolving RNG state, so a replay with the same seed and the same actions
//!   reproduces the same dice regardless of how many dice were held.
//! - `Scripted`: a fixed queue of faces (tests, replays of recorded games).

use std::collections::VecDeque;

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;

use crate::scoring::Hand;

/// Structural event key for deterministic dice generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventKey {
    pub seed: u64,
    /// Banks made so far this game (repeat yatzy banks included).
    pub round_idx: u16,
    /// Roll within the round (0..=2).
    pub roll_idx: u8,
}

/// SplitMix64 step (fast, deterministic).
fn splitmix64_next(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

fn mix_seed(key: EventKey) -> u64 {
    let mut x = key.seed;
    x ^= (key.round_idx as u64).wrapping_mul(0xA5A35625E4F7C1AD);
    x ^= (key.roll_idx as u64).wrapping_mul(0x9E3779B97F4A7C15);
    let mut s = x;
    splitmix64_next(&mut s)
}

/// Deterministically generate 5 faces for the given event key.
pub fn roll5(key: EventKey) -> [u8; 5] {
    let mut state = mix_seed(key);
    let mut out = [0u8; 5];
    for o in &mut out {
        let r = splitmix64_next(&mut state);
        *o = ((r % 6) + 1) as u8;
    }
    out
}

pub enum DiceSource {
    Rng { rng: Box<ChaCha8Rng> },
    EventKeyed { seed: u64 },
    Scripted { faces: VecDeque<u8> },
}

impl std::fmt::Debug for DiceSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiceSource::Rng { .. } => f.write_str("DiceSource::Rng"),
            DiceSource::EventKeyed { seed } => write!(f, "DiceSource::EventKeyed({seed})"),
            DiceSource::Scripted { faces } => {
                write!(f, "DiceSource::Scripted({} left)", faces.len())
            }
        }
    }
}

impl DiceSource {
    pub fn from_seed(seed: u64) -> Self {
        DiceSource::Rng {
            rng: Box::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    pub fn from_entropy() -> Self {
        Self::from_seed(rand::random())
    }

    pub fn event_keyed(seed: u64) -> Self {
        DiceSource::EventKeyed { seed }
    }

    /// Faces are consumed in order, one per rerolled die. Out-of-range values
    /// are clamped into 1..=6; once the queue runs dry every die shows 1.
    pub fn scripted<I: IntoIterator<Item = u8>>(faces: I) -> Self {
        DiceSource::Scripted {
            faces: faces.into_iter().map(|f| f.clamp(1, 6)).collect(),
        }
    }

    /// Re-roll every die of `hand` whose `held` flag is false.
    ///
    /// `round_idx`/`roll_idx` position the roll within the game; only the
    /// event-keyed source reads them, combined with its own seed.
    /// Returns the number of dice rolled.
    pub fn reroll(
        &mut self,
        hand: &mut Hand,
        held: &[bool; 5],
        round_idx: u16,
        roll_idx: u8,
    ) -> usize {
        let mut rolled = 0usize;
        match self {
            DiceSource::Rng { rng } => {
                for (die, _) in hand.iter_mut().zip(held).filter(|(_, h)| !**h) {
                    *die = rng.gen_range(1..=6);
                    rolled += 1;
                }
            }
            DiceSource::EventKeyed { seed } => {
                let draws = roll5(EventKey {
                    seed: *seed,
                    round_idx,
                    roll_idx,
                });
                for (die, _) in hand.iter_mut().zip(held).filter(|(_, h)| !**h) {
                    *die = draws[rolled];
                    rolled += 1;
                }
            }
            DiceSource::Scripted { faces } => {
                for (die, _) in hand.iter_mut().zip(held).filter(|(_, h)| !**h) {
                    *die = faces.pop_front().unwrap_or(1);
                    rolled += 1;
                }
            }
        }
        rolled
    }
}
