//! Per-category lock state, the repeat-yatzy exception, and bonus/total accounting.
//!
//! Every category goes `open -> locked` exactly once, with one exception: once
//! `yatzy` has been banked with a real five-of-a-kind, a later roll showing
//! five of a kind reopens it so another 50 can be added on top. Banking a
//! zero into `yatzy` forfeits it for the rest of the game.

use serde::Serialize;

use crate::category::{Category, NUM_CATS};
use crate::engine::ActionError;
use crate::scoring::{is_yatzy, score, Hand, YATZY_POINTS};

/// Cumulative minor-section points needed for the bonus.
pub const MINOR_BONUS_THRESHOLD: u32 = 63;
pub const MINOR_BONUS_POINTS: u32 = 35;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategorySlot {
    pub locked: bool,
    /// Banked points. For `yatzy` this accumulates across repeat banks.
    pub points: u32,
}

/// Result of a successful bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Banked {
    pub category: Category,
    /// Points added to the category by this bank.
    pub points: u32,
    /// Minor-section bonus granted by this bank (0 or `MINOR_BONUS_POINTS`).
    pub bonus: u32,
    /// True when this was a repeat yatzy added on top of an earlier one.
    pub yatzy_repeat: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scorecard {
    slots: [CategorySlot; NUM_CATS],
    yatzy_achieved: bool,
    minor_total: u32,
    bonus_applied: bool,
    total_points: u32,
}

impl Default for Scorecard {
    fn default() -> Self {
        Self::new()
    }
}

impl Scorecard {
    pub fn new() -> Self {
        Self {
            slots: [CategorySlot::default(); NUM_CATS],
            yatzy_achieved: false,
            minor_total: 0,
            bonus_applied: false,
            total_points: 0,
        }
    }

    pub fn slot(&self, category: Category) -> CategorySlot {
        self.slots[category.index()]
    }

    pub fn is_locked(&self, category: Category) -> bool {
        self.slots[category.index()].locked
    }

    /// True once `yatzy` has been banked with 50 at least once.
    pub fn yatzy_achieved(&self) -> bool {
        self.yatzy_achieved
    }

    /// `yatzy` is temporarily open for a repeat bank.
    pub fn yatzy_reopened(&self) -> bool {
        self.yatzy_achieved && !self.is_locked(Category::Yatzy)
    }

    pub fn minor_total(&self) -> u32 {
        self.minor_total
    }

    pub fn bonus_applied(&self) -> bool {
        self.bonus_applied
    }

    pub fn total_points(&self) -> u32 {
        self.total_points
    }

    /// Re-evaluate the repeat-yatzy rule for freshly settled dice.
    ///
    /// Must be called after every completed roll.
    pub fn refresh_after_roll(&mut self, hand: Hand) {
        if !self.yatzy_achieved {
            return;
        }
        let slot = &mut self.slots[Category::Yatzy.index()];
        if slot.points == 0 {
            return;
        }
        slot.locked = !is_yatzy(hand);
    }

    fn relock_yatzy(&mut self) {
        if self.yatzy_achieved {
            self.slots[Category::Yatzy.index()].locked = true;
        }
    }

    /// Bank `hand` into `category`, locking it.
    pub fn bank(&mut self, category: Category, hand: Hand) -> Result<Banked, ActionError> {
        let idx = category.index();
        if self.slots[idx].locked {
            return Err(ActionError::CategoryLocked { category });
        }

        let points = score(category, hand);
        let yatzy_repeat = category == Category::Yatzy && self.slots[idx].points > 0;

        let slot = &mut self.slots[idx];
        slot.points += points;
        slot.locked = true;

        if category == Category::Yatzy && points == YATZY_POINTS {
            self.yatzy_achieved = true;
        }

        let mut bonus = 0;
        if category.is_minor() {
            self.minor_total += points;
            if !self.bonus_applied && self.minor_total >= MINOR_BONUS_THRESHOLD {
                self.bonus_applied = true;
                bonus = MINOR_BONUS_POINTS;
            }
        }

        self.total_points += points + bonus;

        // Any bank ends the round, which closes a reopened yatzy.
        self.relock_yatzy();

        Ok(Banked {
            category,
            points,
            bonus,
            yatzy_repeat,
        })
    }

    /// Total recomputed from the slots, independent of the running counter.
    pub fn recomputed_total(&self) -> u32 {
        let banked: u32 = self.slots.iter().map(|s| s.points).sum();
        let bonus = if self.bonus_applied {
            MINOR_BONUS_POINTS
        } else {
            0
        };
        banked + bonus
    }
}
