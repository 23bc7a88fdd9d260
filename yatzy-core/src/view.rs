//! Read-only snapshot of a game for presentation layers.

use serde::Serialize;

use crate::category::Category;
use crate::engine::Phase;
use crate::scorecard::CategorySlot;
use crate::scoring::{score, Hand};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryView {
    pub category: Category,
    pub locked: bool,
    pub points: u32,
    /// What banking the current hand would add. None while locked.
    pub preview: Option<u32>,
}

impl CategoryView {
    pub(crate) fn new(category: Category, slot: CategorySlot, hand: Hand) -> Self {
        Self {
            category,
            locked: slot.locked,
            points: slot.points,
            preview: (!slot.locked).then(|| score(category, hand)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardView {
    pub phase: Phase,
    pub hand: Hand,
    pub held: [bool; 5],
    pub throws_remaining: u8,
    pub rounds_remaining: u8,
    pub selected: Option<Category>,
    pub categories: Vec<CategoryView>,
    pub minor_total: u32,
    pub bonus_applied: bool,
    pub total_points: u32,
    pub elapsed_secs: u64,
    pub game_over: bool,
}

impl BoardView {
    pub fn category(&self, category: Category) -> &CategoryView {
        &self.categories[category.index()]
    }
}
