//! Hand scoring.
//!
//! Pure functions over a 5-die hand. Faces are 1..=6; a 0 (die not rolled yet)
//! or any other out-of-range value is ignored by every category.

use crate::category::{Category, NUM_CATS};

pub type Hand = [u8; 5];

pub const FULL_HOUSE_POINTS: u32 = 25;
pub const SMALL_STRAIGHT_POINTS: u32 = 30;
pub const LARGE_STRAIGHT_POINTS: u32 = 40;
pub const YATZY_POINTS: u32 = 50;

/// Face counts, `counts[f - 1]` = number of dice showing `f`.
pub fn face_counts(hand: Hand) -> [u8; 6] {
    let mut counts = [0u8; 6];
    for &d in &hand {
        if (1..=6).contains(&d) {
            counts[(d - 1) as usize] += 1;
        }
    }
    counts
}

/// Highest face appearing at least `n` times.
fn highest_with_count(counts: &[u8; 6], n: u8) -> Option<u32> {
    (0..6).rev().find(|&i| counts[i] >= n).map(|i| i as u32 + 1)
}

/// True if faces `lo..=hi` all appear at least once.
fn has_run(counts: &[u8; 6], lo: usize, hi: usize) -> bool {
    (lo..=hi).all(|f| counts[f - 1] > 0)
}

/// Score a single category for `hand`.
pub fn score(category: Category, hand: Hand) -> u32 {
    let counts = face_counts(hand);
    match category {
        Category::Ones
        | Category::Twos
        | Category::Threes
        | Category::Fours
        | Category::Fives
        | Category::Sixes => {
            let face = category.index() + 1;
            counts[face - 1] as u32 * face as u32
        }
        Category::TwoOfKind => highest_with_count(&counts, 2).map_or(0, |f| f * 2),
        Category::ThreeOfAKind => highest_with_count(&counts, 3).map_or(0, |f| f * 3),
        Category::FourOfAKind => highest_with_count(&counts, 4).map_or(0, |f| f * 4),
        Category::FullHouse => {
            let has3 = counts.iter().any(|&c| c == 3);
            let has2 = counts.iter().any(|&c| c == 2);
            if has3 && has2 {
                FULL_HOUSE_POINTS
            } else {
                0
            }
        }
        Category::SmallStraight => {
            if has_run(&counts, 1, 4) || has_run(&counts, 2, 5) || has_run(&counts, 3, 6) {
                SMALL_STRAIGHT_POINTS
            } else {
                0
            }
        }
        Category::LargeStraight => {
            if has_run(&counts, 1, 5) || has_run(&counts, 2, 6) {
                LARGE_STRAIGHT_POINTS
            } else {
                0
            }
        }
        Category::Yatzy => {
            if is_yatzy(hand) {
                YATZY_POINTS
            } else {
                0
            }
        }
        Category::Chance => counts
            .iter()
            .enumerate()
            .map(|(i, &c)| c as u32 * (i as u32 + 1))
            .sum(),
    }
}

/// Five dice showing the same non-zero face.
pub fn is_yatzy(hand: Hand) -> bool {
    face_counts(hand).iter().any(|&c| c == 5)
}

/// Compute every category score for `hand`, indexed by `Category::index`.
pub fn scores_for_hand(hand: Hand) -> [u32; NUM_CATS] {
    let mut out = [0u32; NUM_CATS];
    for c in Category::ALL {
        out[c.index()] = score(c, hand);
    }
    out
}
