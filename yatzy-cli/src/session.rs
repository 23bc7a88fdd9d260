//! Interactive play session: reads commands, drives the engine, prints the board.
//!
//! The session owns the elapsed-time clock, the event log and the score book.
//! The engine never sees any of them: a failing log or store only produces a
//! warning and the game carries on.

use std::io::{self, BufRead, Write};
use std::time::Instant;

use serde::Serialize;
use yatzy_core::{ActionError, Banked, Game};
use yatzy_logging::{
    now_ms, BankEventV1, GameOverEventV1, NdjsonWriter, RejectedEventV1, RollEventV1,
    SessionStartEventV1, VersionInfoV1,
};
use yatzy_scores::{GameResult, KvStore, ScoreBook};

use crate::command::{self, Command, HELP};
use crate::render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session<W, S> {
    game: Game,
    player: String,
    dice_mode: String,
    config_hash: Option<String>,
    out: W,
    log: Option<NdjsonWriter>,
    book: Option<ScoreBook<S>>,
    game_id: u64,
    started: Instant,
    games_finished: u32,
}

impl<W: Write, S: KvStore> Session<W, S> {
    pub fn new(game: Game, player: impl Into<String>, out: W) -> Self {
        Self {
            game,
            player: player.into(),
            dice_mode: "rng".to_string(),
            config_hash: None,
            out,
            log: None,
            book: None,
            game_id: 0,
            started: Instant::now(),
            games_finished: 0,
        }
    }

    pub fn with_log(mut self, log: NdjsonWriter) -> Self {
        self.log = Some(log);
        self
    }

    pub fn with_book(mut self, book: ScoreBook<S>) -> Self {
        self.book = Some(book);
        self
    }

    pub fn with_session_info(mut self, dice_mode: &str, config_hash: Option<String>) -> Self {
        self.dice_mode = dice_mode.to_string();
        self.config_hash = config_hash;
        self
    }

    #[cfg(test)]
    pub fn game(&self) -> &Game {
        &self.game
    }

    #[cfg(test)]
    pub fn book(&self) -> Option<&ScoreBook<S>> {
        self.book.as_ref()
    }

    #[cfg(test)]
    pub fn games_finished(&self) -> u32 {
        self.games_finished
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.out
    }

    fn log_event<T: Serialize>(&mut self, event: &T) {
        if let Some(log) = self.log.as_mut() {
            if let Err(e) = log.write_event(event) {
                tracing::warn!(error = %e, "event log write failed; disabling event log");
                self.log = None;
            }
        }
    }

    fn start_game(&mut self) -> io::Result<()> {
        self.game.start();
        self.game_id = now_ms();
        self.started = Instant::now();
        let event = SessionStartEventV1 {
            event: "session_start",
            ts_ms: now_ms(),
            v: VersionInfoV1::current(),
            game_id: self.game_id,
            player: self.player.clone(),
            dice_mode: self.dice_mode.clone(),
            config_hash: self.config_hash.clone(),
        };
        self.log_event(&event);
        writeln!(self.out, "New game for {}. Type `help` for commands.", self.player)?;
        self.print_board()
    }

    fn print_board(&mut self) -> io::Result<()> {
        let text = render::board(&self.game.view());
        write!(self.out, "{text}")
    }

    /// Run until `quit` or end of input.
    pub fn run<R: BufRead>(&mut self, input: R) -> io::Result<()> {
        self.start_game()?;
        for line in input.lines() {
            if self.handle_line(&line?)? == Flow::Quit {
                break;
            }
        }
        if let Some(log) = self.log.as_mut() {
            if let Err(e) = log.flush() {
                tracing::warn!(error = %e, "event log flush failed");
            }
        }
        self.out.flush()
    }

    pub fn handle_line(&mut self, line: &str) -> io::Result<Flow> {
        let cmd = match command::parse(line) {
            Ok(c) => c,
            Err(msg) => {
                writeln!(self.out, "{msg}")?;
                return Ok(Flow::Continue);
            }
        };

        match cmd {
            Command::Quit => {
                writeln!(self.out, "Bye.")?;
                return Ok(Flow::Quit);
            }
            Command::Help => write!(self.out, "{HELP}")?,
            Command::Board => self.print_board()?,
            Command::New => self.start_game()?,
            Command::Roll => match self.game.roll() {
                Ok(_) => {
                    let round = self.game.round().clone();
                    let event = RollEventV1 {
                        event: "roll",
                        ts_ms: now_ms(),
                        v: VersionInfoV1::current(),
                        game_id: self.game_id,
                        hand: round.hand,
                        held: round.held,
                        throws_remaining: round.throws_remaining,
                        yatzy_reopened: self.game.scorecard().yatzy_reopened(),
                    };
                    self.log_event(&event);
                    if event.yatzy_reopened {
                        writeln!(self.out, "Yatzy again! The yatzy field is open for another 50.")?;
                    }
                    self.print_board()?;
                }
                Err(e) => self.reject("roll", e)?,
            },
            Command::Hold(dice) => {
                for die in dice {
                    if let Err(e) = self.game.toggle_hold(die) {
                        self.reject("hold", e)?;
                        return Ok(Flow::Continue);
                    }
                }
                writeln!(self.out, "{}", render::dice_line(&self.game.view()))?;
            }
            Command::Select(category) => match self.game.select(category) {
                Ok(Some(c)) => writeln!(self.out, "Selected {c}.")?,
                Ok(None) => writeln!(self.out, "Selection cleared.")?,
                Err(e) => self.reject("select", e)?,
            },
            Command::Confirm => {
                let hand = self.game.hand();
                match self.game.confirm() {
                    Ok(banked) => self.on_banked(banked, hand)?,
                    Err(e) => self.reject("confirm", e)?,
                }
            }
        }
        Ok(Flow::Continue)
    }

    fn reject(&mut self, action: &str, err: ActionError) -> io::Result<()> {
        let event = RejectedEventV1 {
            event: "rejected",
            ts_ms: now_ms(),
            v: VersionInfoV1::current(),
            game_id: self.game_id,
            action: action.to_string(),
            reason: err.to_string(),
        };
        self.log_event(&event);
        writeln!(self.out, "{err}")
    }

    fn on_banked(&mut self, banked: Banked, hand: [u8; 5]) -> io::Result<()> {
        let event = BankEventV1 {
            event: "bank",
            ts_ms: now_ms(),
            v: VersionInfoV1::current(),
            game_id: self.game_id,
            category: banked.category.to_string(),
            hand,
            points: banked.points,
            bonus: banked.bonus,
            yatzy_repeat: banked.yatzy_repeat,
            total_points: self.game.total_points(),
            rounds_remaining: self.game.rounds_remaining(),
        };
        self.log_event(&event);

        writeln!(self.out, "Banked {} points in {}.", banked.points, banked.category)?;
        if banked.bonus > 0 {
            writeln!(self.out, "Minor section bonus: +{}!", banked.bonus)?;
        }

        if self.game.is_over() {
            self.finish_game()?;
        } else {
            self.print_board()?;
        }
        Ok(())
    }

    fn finish_game(&mut self) -> io::Result<()> {
        self.game.record_elapsed(self.started.elapsed().as_secs());
        self.games_finished += 1;
        self.print_board()?;

        let Some(summary) = self.game.summary() else {
            return Ok(());
        };
        writeln!(
            self.out,
            "Game over! {} points in {}s.",
            summary.total_points, summary.elapsed_secs
        )?;
        if self.games_finished > 1 {
            writeln!(self.out, "Games finished this session: {}.", self.games_finished)?;
        }

        // Fire and forget: a failed save is reported, never fed back into the game.
        let mut submitted = false;
        if let Some(book) = self.book.as_mut() {
            let result = GameResult::from_summary(summary, now_ms());
            match book.submit(&self.player, result) {
                Ok(best) => {
                    submitted = true;
                    if best.contains(&result) {
                        writeln!(self.out, "Score saved to your best {}.", best.len())?;
                    } else {
                        writeln!(self.out, "Score did not make your best results.")?;
                    }
                }
                Err(e) => {
                    tracing::warn!(player = %self.player, error = %e, "failed to save score");
                    writeln!(self.out, "Could not save score: {e}")?;
                }
            }
        }

        let event = GameOverEventV1 {
            event: "game_over",
            ts_ms: now_ms(),
            v: VersionInfoV1::current(),
            game_id: self.game_id,
            total_points: summary.total_points,
            elapsed_secs: summary.elapsed_secs,
            bonus_applied: self.game.scorecard().bonus_applied(),
            submitted,
        };
        self.log_event(&event);
        writeln!(self.out, "Type `new` to play again or `quit` to leave.")
    }
}
