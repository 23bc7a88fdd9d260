//! yatzy: terminal client for the Yatzy engine.
//!
//! Subcommands:
//! - play
//! - sim
//! - scores
//! - leaderboard

mod command;
mod grid;
mod render;
mod session;

use std::io;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use yatzy_core::{Config, DiceMode, Game};
use yatzy_logging::{hash_config_bytes, NdjsonWriter};
use yatzy_scores::{FileStore, ScoreBook};

use crate::session::Session;

#[derive(Parser)]
#[command(name = "yatzy", version, about = "Single-player Yatzy in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game interactively (commands on stdin; `help` lists them)
    Play {
        /// Path to YAML config
        #[arg(long)]
        config: Option<PathBuf>,
        /// Name the result is saved under
        #[arg(long, default_value = "player")]
        player: String,
        /// Dice seed (overrides config)
        #[arg(long)]
        seed: Option<u64>,
        /// Append NDJSON game events here (overrides config)
        #[arg(long)]
        events: Option<PathBuf>,
        /// Score store file (overrides config)
        #[arg(long)]
        store: Option<PathBuf>,
    },
    /// Run random-hold / greedy-field playouts and report score statistics
    Sim {
        /// Number of games to simulate
        #[arg(long, default_value_t = 10_000)]
        games: usize,
        /// RNG seed
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
        /// Skip printing histogram
        #[arg(long)]
        no_hist: bool,
    },
    /// Show a player's best results
    Scores {
        #[arg(long)]
        player: String,
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        store: Option<PathBuf>,
    },
    /// Rank every player by their best result
    Leaderboard {
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        store: Option<PathBuf>,
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("YATZY_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Load the config (or defaults) plus a hash of the file it came from.
fn load_config(path: Option<&Path>) -> (Config, Option<String>) {
    let Some(path) = path else {
        return (Config::default(), None);
    };
    let text = std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Failed to read config file {}: {e}", path.display());
        process::exit(1);
    });
    let cfg = Config::from_yaml(&text).unwrap_or_else(|e| {
        eprintln!("Invalid config {}: {e}", path.display());
        process::exit(1);
    });
    (cfg, Some(hash_config_bytes(text.as_bytes())))
}

fn open_book(config: Option<PathBuf>, store: Option<PathBuf>) -> ScoreBook<FileStore> {
    let (cfg, _) = load_config(config.as_deref());
    let path = store.unwrap_or(cfg.scores.store_path);
    match FileStore::open(&path) {
        Ok(s) => ScoreBook::with_keep_best(s, cfg.scores.keep_best),
        Err(e) => {
            eprintln!("Failed to open score store {}: {e}", path.display());
            process::exit(1);
        }
    }
}

fn cmd_play(
    config: Option<PathBuf>,
    player: String,
    seed: Option<u64>,
    events: Option<PathBuf>,
    store: Option<PathBuf>,
) {
    let (mut cfg, config_hash) = load_config(config.as_deref());
    if seed.is_some() {
        cfg.dice.seed = seed;
    }
    if events.is_some() {
        cfg.logging.events_path = events;
    }
    if let Some(store) = store {
        cfg.scores.store_path = store;
    }

    let dice_mode = match cfg.dice.mode {
        DiceMode::Rng => "rng",
        DiceMode::EventKeyed => "event_keyed",
    };
    let game = Game::from_config(&cfg);
    let stdout = io::stdout();
    let mut session: Session<_, FileStore> =
        Session::new(game, player, stdout.lock()).with_session_info(dice_mode, config_hash);

    match FileStore::open(&cfg.scores.store_path) {
        Ok(store) => {
            session = session.with_book(ScoreBook::with_keep_best(store, cfg.scores.keep_best));
        }
        Err(e) => {
            tracing::warn!(path = %cfg.scores.store_path.display(), error = %e, "score store unavailable");
            eprintln!("Scores will not be saved: {e}");
        }
    }

    if let Some(path) = &cfg.logging.events_path {
        match NdjsonWriter::open_append_with_flush(path, cfg.logging.flush_every_lines) {
            Ok(w) => session = session.with_log(w),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "event log unavailable");
            }
        }
    }

    let stdin = io::stdin();
    if let Err(e) = session.run(stdin.lock()) {
        eprintln!("I/O error: {e}");
        process::exit(1);
    }
}

fn print_histogram(scores: &[u32]) {
    const BUCKET: u32 = 25;
    let Some(&max) = scores.iter().max() else {
        return;
    };
    let mut counts = vec![0usize; (max / BUCKET) as usize + 1];
    for &s in scores {
        counts[(s / BUCKET) as usize] += 1;
    }
    let peak = counts.iter().copied().max().unwrap_or(1).max(1);

    println!();
    println!("Histogram:");
    for (i, &c) in counts.iter().enumerate() {
        let lo = i as u32 * BUCKET;
        let bar = "#".repeat(c * 50 / peak);
        println!("  {:>3}-{:<3} {:>6} {}", lo, lo + BUCKET - 1, c, bar);
    }
}

fn cmd_sim(games: usize, seed: u64, json: bool, no_hist: bool) {
    let report = match yatzy_core::simulate(games, seed) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Simulation failed: {e}");
            process::exit(1);
        }
    };

    if json {
        match serde_json::to_string(&report) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("Failed to encode report: {e}");
                process::exit(1);
            }
        }
        return;
    }

    println!("Evaluation:");
    println!("  - Games: {}", report.games);
    println!(
        "  - Score: mean={:.2}, min={}, max={}",
        report.mean, report.min, report.max
    );
    println!("  - Minor bonus rate: {:.1}%", report.bonus_rate * 100.0);
    println!("  - Yatzy rate: {:.1}%", report.yatzy_rate * 100.0);

    if !no_hist {
        print_histogram(&report.scores);
    }
}

fn cmd_scores(player: String, config: Option<PathBuf>, store: Option<PathBuf>) {
    let book = open_book(config, store);
    let best = match book.best_results(&player) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };
    if best.is_empty() {
        println!("No results yet for {player}.");
        return;
    }
    println!("Best results for {player}:");
    for (i, r) in best.iter().enumerate() {
        println!(
            "  {}. {:>4} points  {:>5}s  (finished at {})",
            i + 1,
            r.points,
            r.duration_secs,
            r.date_ms / 1000
        );
    }
}

fn cmd_leaderboard(config: Option<PathBuf>, store: Option<PathBuf>, limit: usize) {
    let book = open_book(config, store);
    let board = match book.leaderboard(limit) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };
    if board.is_empty() {
        println!("No results yet.");
        return;
    }
    for e in board {
        println!(
            "{:>3}. {:<20} {:>4} points  {:>5}s",
            e.rank, e.player, e.result.points, e.result.duration_secs
        );
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            config,
            player,
            seed,
            events,
            store,
        } => cmd_play(config, player, seed, events, store),
        Commands::Sim {
            games,
            seed,
            json,
            no_hist,
        } => cmd_sim(games, seed, json, no_hist),
        Commands::Scores {
            player,
            config,
            store,
        } => cmd_scores(player, config, store),
        Commands::Leaderboard {
            config,
            store,
            limit,
        } => cmd_leaderboard(config, store, limit),
    }
}
