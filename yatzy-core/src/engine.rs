//! Round & throw controller.
//!
//! `Game` is the single writer of game state. Presentation code drives it with
//! `start`/`roll`/`toggle_hold`/`select`/`confirm` and reads it back through
//! [`Game::view`]. Every rejected action comes back as an [`ActionError`]
//! whose `Display` text is the status line to show the player; a rejected
//! action leaves state untouched (see [`ExhaustedRollPolicy`] for the one
//! exception).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::category::{Category, NUM_CATS};
use crate::chance::DiceSource;
use crate::config::{Config, ExhaustedRollPolicy};
use crate::scorecard::{Banked, Scorecard};
use crate::scoring::Hand;
use crate::view::{BoardView, CategoryView};

pub const THROWS_PER_ROUND: u8 = 3;
/// One round per category.
pub const ROUNDS_PER_GAME: u8 = NUM_CATS as u8;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("Game has not started")]
    NotStarted,
    #[error("Game is over")]
    GameOver,
    #[error("No throws left")]
    NoThrowsLeft,
    #[error("Cannot select field at this time")]
    CannotSelect,
    #[error("No field selected")]
    NothingSelected,
    #[error("Field {category} is already used")]
    CategoryLocked { category: Category },
    #[error("No die at position {index}")]
    InvalidDie { index: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No game started yet.
    Idle,
    Playing,
    /// All rounds banked.
    Over,
}

/// Per-round state; reset after every bank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundState {
    /// 0 = not rolled yet this round.
    pub hand: Hand,
    pub held: [bool; 5],
    pub throws_remaining: u8,
    pub selected: Option<Category>,
}

impl RoundState {
    fn fresh() -> Self {
        Self {
            hand: [0; 5],
            held: [false; 5],
            throws_remaining: THROWS_PER_ROUND,
            selected: None,
        }
    }

    /// At least one roll has happened this round.
    pub fn has_rolled(&self) -> bool {
        self.throws_remaining < THROWS_PER_ROUND
    }
}

/// Final result handed to the score-submission collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub total_points: u32,
    pub elapsed_secs: u64,
}

#[derive(Debug)]
pub struct Game {
    dice: DiceSource,
    exhausted_roll: ExhaustedRollPolicy,
    phase: Phase,
    card: Scorecard,
    round: RoundState,
    rounds_remaining: u8,
    /// Banks made this game, repeat yatzy banks included. Keys the dice stream.
    banks: u16,
    elapsed_secs: u64,
}

impl Game {
    /// A new engine in the `Idle` phase. Call [`Game::start`] to play.
    pub fn new(dice: DiceSource) -> Self {
        Self {
            dice,
            exhausted_roll: ExhaustedRollPolicy::default(),
            phase: Phase::Idle,
            card: Scorecard::new(),
            round: RoundState::fresh(),
            rounds_remaining: ROUNDS_PER_GAME,
            banks: 0,
            elapsed_secs: 0,
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.dice.source()).with_exhausted_roll(cfg.rules.exhausted_roll)
    }

    pub fn with_exhausted_roll(mut self, policy: ExhaustedRollPolicy) -> Self {
        self.exhausted_roll = policy;
        self
    }

    /// Start (or restart) a game: every category open, totals cleared.
    pub fn start(&mut self) {
        self.phase = Phase::Playing;
        self.card = Scorecard::new();
        self.round = RoundState::fresh();
        self.rounds_remaining = ROUNDS_PER_GAME;
        self.banks = 0;
        self.elapsed_secs = 0;
    }

    fn ensure_playing(&self) -> Result<(), ActionError> {
        match self.phase {
            Phase::Idle => Err(ActionError::NotStarted),
            Phase::Over => Err(ActionError::GameOver),
            Phase::Playing => Ok(()),
        }
    }

    /// Roll every die that is not held.
    pub fn roll(&mut self) -> Result<Hand, ActionError> {
        self.ensure_playing()?;

        if self.round.throws_remaining == 0 {
            if self.exhausted_roll == ExhaustedRollPolicy::Reset {
                self.round.throws_remaining = THROWS_PER_ROUND;
            }
            return Err(ActionError::NoThrowsLeft);
        }

        let roll_idx = THROWS_PER_ROUND - self.round.throws_remaining;
        self.dice.reroll(&mut self.round.hand, &self.round.held, self.banks, roll_idx);
        self.round.throws_remaining -= 1;
        self.card.refresh_after_roll(self.round.hand);

        Ok(self.round.hand)
    }

    /// Flip the hold flag of die `index` (0..5). Returns the new flag.
    pub fn toggle_hold(&mut self, index: usize) -> Result<bool, ActionError> {
        self.ensure_playing()?;
        if index >= self.round.held.len() {
            return Err(ActionError::InvalidDie { index });
        }
        if !self.round.has_rolled() {
            return Err(ActionError::NotStarted);
        }
        let flag = &mut self.round.held[index];
        *flag = !*flag;
        Ok(*flag)
    }

    /// Select `category` for banking; selecting it again deselects.
    pub fn select(&mut self, category: Category) -> Result<Option<Category>, ActionError> {
        match self.phase {
            Phase::Over => return Err(ActionError::GameOver),
            Phase::Idle => return Err(ActionError::CannotSelect),
            Phase::Playing => {}
        }
        if !self.round.has_rolled() {
            return Err(ActionError::CannotSelect);
        }
        self.round.selected = if self.round.selected == Some(category) {
            None
        } else {
            Some(category)
        };
        Ok(self.round.selected)
    }

    /// Bank the current hand into the selected category and end the round.
    pub fn confirm(&mut self) -> Result<Banked, ActionError> {
        self.ensure_playing()?;
        let category = self.round.selected.ok_or(ActionError::NothingSelected)?;

        let banked = self.card.bank(category, self.round.hand)?;

        self.round = RoundState::fresh();
        self.banks = self.banks.saturating_add(1);
        if !banked.yatzy_repeat {
            self.rounds_remaining = self.rounds_remaining.saturating_sub(1);
        }
        if self.rounds_remaining == 0 {
            self.phase = Phase::Over;
        }
        Ok(banked)
    }

    /// Store the wall-clock duration measured by the caller's timer.
    pub fn record_elapsed(&mut self, secs: u64) {
        self.elapsed_secs = secs;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::Over
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn hand(&self) -> Hand {
        self.round.hand
    }

    pub fn throws_remaining(&self) -> u8 {
        self.round.throws_remaining
    }

    pub fn rounds_remaining(&self) -> u8 {
        self.rounds_remaining
    }

    pub fn scorecard(&self) -> &Scorecard {
        &self.card
    }

    pub fn total_points(&self) -> u32 {
        self.card.total_points()
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    /// Final result, once the game is over.
    pub fn summary(&self) -> Option<GameSummary> {
        self.is_over().then(|| GameSummary {
            total_points: self.card.total_points(),
            elapsed_secs: self.elapsed_secs,
        })
    }

    /// Read model for presentation.
    pub fn view(&self) -> BoardView {
        let categories = Category::ALL
            .iter()
            .map(|&c| CategoryView::new(c, self.card.slot(c), self.round.hand))
            .collect();
        BoardView {
            phase: self.phase,
            hand: self.round.hand,
            held: self.round.held,
            throws_remaining: self.round.throws_remaining,
            rounds_remaining: self.rounds_remaining,
            selected: self.round.selected,
            categories,
            minor_total: self.card.minor_total(),
            bonus_applied: self.card.bonus_applied(),
            total_points: self.card.total_points(),
            elapsed_secs: self.elapsed_secs,
            game_over: self.is_over(),
        }
    }
}
