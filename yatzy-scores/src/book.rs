//! Per-player best results and the cross-player leaderboard.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use yatzy_core::GameSummary;

use crate::store::KvStore;
use crate::ScoreError;

const PLAYER_PREFIX: &str = "players/";

/// Default number of results kept per player.
pub const KEEP_BEST: usize = 5;

/// One finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub points: u32,
    pub duration_secs: u64,
    /// Unix time the game finished, in milliseconds.
    pub date_ms: u64,
}

impl GameResult {
    pub fn from_summary(summary: GameSummary, date_ms: u64) -> Self {
        Self {
            points: summary.total_points,
            duration_secs: summary.elapsed_secs,
            date_ms,
        }
    }
}

/// Best first: more points, then shorter game, then earlier date.
pub fn rank_cmp(a: &GameResult, b: &GameResult) -> Ordering {
    b.points
        .cmp(&a.points)
        .then(a.duration_secs.cmp(&b.duration_secs))
        .then(a.date_ms.cmp(&b.date_ms))
}

/// Insert `result` into a best-first list, keeping at most `keep` entries.
///
/// Returns the rank (0-based) the result landed at, or None if it did not make the cut.
pub fn insert_result(best: &mut Vec<GameResult>, result: GameResult, keep: usize) -> Option<usize> {
    let pos = best
        .binary_search_by(|e| rank_cmp(e, &result))
        .unwrap_or_else(|pos| pos);
    if pos >= keep {
        return None;
    }
    best.insert(pos, result);
    best.truncate(keep);
    Some(pos)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    /// 1-based.
    pub rank: u32,
    pub player: String,
    pub result: GameResult,
}

pub struct ScoreBook<S> {
    store: S,
    keep_best: usize,
}

impl<S: KvStore> ScoreBook<S> {
    pub fn new(store: S) -> Self {
        Self::with_keep_best(store, KEEP_BEST)
    }

    pub fn with_keep_best(store: S, keep_best: usize) -> Self {
        Self {
            store,
            keep_best: keep_best.max(1),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    fn key(player: &str) -> Result<String, ScoreError> {
        let trimmed = player.trim();
        if trimmed.is_empty() || trimmed.contains('/') {
            return Err(ScoreError::InvalidPlayer(player.to_string()));
        }
        Ok(format!("{PLAYER_PREFIX}{trimmed}"))
    }

    /// Best results for `player`, best first. Empty if the player never finished a game.
    ///
    /// Stored lists are re-sorted and cut to `keep_best`, whoever wrote them.
    pub fn best_results(&self, player: &str) -> Result<Vec<GameResult>, ScoreError> {
        let key = Self::key(player)?;
        Ok(self.load(&key)?.0)
    }

    /// Normalized list plus whether it differed from what was stored.
    fn load(&self, key: &str) -> Result<(Vec<GameResult>, bool), ScoreError> {
        let Some(v) = self.store.get(key)? else {
            return Ok((Vec::new(), false));
        };
        let stored: Vec<GameResult> = serde_json::from_value(v)?;
        let mut best = stored.clone();
        best.sort_by(rank_cmp);
        best.truncate(self.keep_best);
        let repaired = best != stored;
        Ok((best, repaired))
    }

    /// Record a finished game. Returns the player's updated best list.
    pub fn submit(
        &mut self,
        player: &str,
        result: GameResult,
    ) -> Result<Vec<GameResult>, ScoreError> {
        let key = Self::key(player)?;
        let (mut best, repaired) = self.load(&key)?;
        if repaired {
            tracing::warn!(player, "stored best list was out of order or too long; repairing");
        }
        let landed = insert_result(&mut best, result, self.keep_best);
        match landed {
            Some(rank) => {
                tracing::debug!(player, points = result.points, rank, "new best result");
            }
            None => {
                tracing::debug!(player, points = result.points, "result below best list");
            }
        }
        if landed.is_some() || repaired {
            self.store.set(&key, serde_json::to_value(&best)?)?;
        }
        Ok(best)
    }

    /// Each player's single best result, ranked across players.
    ///
    /// Records that fail to parse are skipped with a warning.
    pub fn leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, ScoreError> {
        let mut rows: Vec<(String, GameResult)> = Vec::new();
        for key in self.store.keys(PLAYER_PREFIX)? {
            let Some(value) = self.store.get(&key)? else {
                continue;
            };
            let player = key[PLAYER_PREFIX.len()..].to_string();
            match serde_json::from_value::<Vec<GameResult>>(value) {
                Ok(best) => {
                    if let Some(top) = best.iter().min_by(|a, b| rank_cmp(a, b)) {
                        rows.push((player, *top));
                    }
                }
                Err(e) => tracing::warn!(%player, error = %e, "skipping unreadable score record"),
            }
        }

        rows.sort_by(|a, b| rank_cmp(&a.1, &b.1).then_with(|| a.0.cmp(&b.0)));
        rows.truncate(limit);
        Ok(rows
            .into_iter()
            .enumerate()
            .map(|(i, (player, result))| LeaderboardEntry {
                rank: i as u32 + 1,
                player,
                result,
            })
            .collect())
    }
}
