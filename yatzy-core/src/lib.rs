//! yatzy-core: scoring rules, category locking, round controller and configuration.

pub mod category;
pub mod chance;
pub mod config;
pub mod engine;
pub mod scorecard;
pub mod scoring;
pub mod sim;
pub mod view;

pub use category::{Category, UnknownCategory, NUM_CATS, NUM_MINOR};
pub use chance::{DiceSource, EventKey};
pub use config::{Config, ConfigError, DiceMode, ExhaustedRollPolicy};
pub use engine::{
    ActionError, Game, GameSummary, Phase, RoundState, ROUNDS_PER_GAME, THROWS_PER_ROUND,
};
pub use scorecard::{
    Banked, CategorySlot, Scorecard, MINOR_BONUS_POINTS, MINOR_BONUS_THRESHOLD,
};
pub use scoring::{is_yatzy, score, scores_for_hand, Hand};
pub use sim::{greedy_category, play_game, simulate, SimReport};
pub use view::{BoardView, CategoryView};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");


#[cfg(test)]
mod chance_tests;
#[cfg(test)]
mod scoring_tests;
