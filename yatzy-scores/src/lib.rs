//! yatzy-scores: score submission for finished games.
//!
//! Keeps each player's best results in a key-value store and ranks players
//! against each other. The engine hands over a `GameSummary` and never waits on
//! or reacts to anything done here.

pub mod book;
pub mod store;

pub use book::{insert_result, rank_cmp, GameResult, LeaderboardEntry, ScoreBook, KEEP_BEST};
pub use store::{FileStore, KvStore, MemoryStore};

use thiserror::Error;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid player name: {0:?}")]
    InvalidPlayer(String),
}
