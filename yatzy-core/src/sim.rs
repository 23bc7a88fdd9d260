//! Random-hold / greedy-category playouts.
//!
//! Used by `yatzy sim`, the benches, and the engine's own invariant tests.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;
use serde::Serialize;

use crate::category::Category;
use crate::chance::DiceSource;
use crate::engine::{ActionError, Game, GameSummary, THROWS_PER_ROUND};
use crate::view::BoardView;

/// Open category with the highest preview (first one on ties).
pub fn greedy_category(view: &BoardView) -> Option<Category> {
    let mut best: Option<(Category, u32)> = None;
    for c in &view.categories {
        if let Some(p) = c.preview {
            if best.map_or(true, |(_, b)| p > b) {
                best = Some((c.category, p));
            }
        }
    }
    best.map(|(c, _)| c)
}

/// Play one full game on `game`, choosing holds with `chooser`.
pub fn play_game(game: &mut Game, chooser: &mut ChaCha8Rng) -> Result<GameSummary, ActionError> {
    game.start();
    while !game.is_over() {
        game.roll()?;
        let extra = chooser.gen_range(0..THROWS_PER_ROUND);
        for _ in 0..extra {
            for die in 0..5 {
                if chooser.gen_bool(0.5) {
                    game.toggle_hold(die)?;
                }
            }
            game.roll()?;
        }

        let pick = greedy_category(&game.view()).ok_or(ActionError::NothingSelected)?;
        game.select(pick)?;
        game.confirm()?;
    }
    Ok(GameSummary {
        total_points: game.total_points(),
        elapsed_secs: game.elapsed_secs(),
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub games: usize,
    pub mean: f64,
    pub min: u32,
    pub max: u32,
    /// Fraction of games that earned the minor-section bonus.
    pub bonus_rate: f64,
    /// Fraction of games that banked at least one yatzy.
    pub yatzy_rate: f64,
    #[serde(skip)]
    pub scores: Vec<u32>,
}

/// Run `games` seeded playouts.
pub fn simulate(games: usize, seed: u64) -> Result<SimReport, ActionError> {
    let mut game = Game::new(DiceSource::from_seed(seed));
    let mut chooser = ChaCha8Rng::seed_from_u64(seed ^ 0x5EED_C0DE);

    let mut scores = Vec::with_capacity(games);
    let mut bonuses = 0usize;
    let mut yatzies = 0usize;
    for _ in 0..games {
        let summary = play_game(&mut game, &mut chooser)?;
        scores.push(summary.total_points);
        if game.scorecard().bonus_applied() {
            bonuses += 1;
        }
        if game.scorecard().yatzy_achieved() {
            yatzies += 1;
        }
    }

    let n = games.max(1) as f64;
    Ok(SimReport {
        games,
        mean: scores.iter().map(|&s| s as f64).sum::<f64>() / n,
        min: scores.iter().copied().min().unwrap_or(0),
        max: scores.iter().copied().max().unwrap_or(0),
        bonus_rate: bonuses as f64 / n,
        yatzy_rate: yatzies as f64 / n,
        scores,
    })
}
