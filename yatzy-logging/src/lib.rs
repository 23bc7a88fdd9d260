//! yatzy-logging: NDJSON game events.
//!
//! Append-only, one JSON object per line, so a crashed session still leaves a
//! readable log behind (a trailing partial line is the only possible damage).

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Event schema version.
pub const LOG_VERSION: u32 = 1;

/// Rule set these events were produced under.
pub const RULESET_ID: &str = "yatzy_14cat_bonus35_v1";

pub fn now_ms() -> u64 {
    let d = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    d.as_millis() as u64
}

pub fn hash_config_bytes(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex().to_string()
}

/// Schema versioning fields carried by every event.
#[derive(Debug, Clone, Serialize)]
pub struct VersionInfoV1 {
    pub log_version: u32,
    pub ruleset_id: &'static str,
}

impl VersionInfoV1 {
    pub fn current() -> Self {
        Self {
            log_version: LOG_VERSION,
            ruleset_id: RULESET_ID,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionStartEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,
    pub v: VersionInfoV1,

    pub game_id: u64,
    pub player: String,
    pub dice_mode: String,
    pub config_hash: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RollEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,
    pub v: VersionInfoV1,

    pub game_id: u64,
    pub hand: [u8; 5],
    pub held: [bool; 5],
    pub throws_remaining: u8,
    pub yatzy_reopened: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct BankEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,
    pub v: VersionInfoV1,

    pub game_id: u64,
    pub category: String,
    pub hand: [u8; 5],
    pub points: u32,
    pub bonus: u32,
    pub yatzy_repeat: bool,
    pub total_points: u32,
    pub rounds_remaining: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct RejectedEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,
    pub v: VersionInfoV1,

    pub game_id: u64,
    pub action: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameOverEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,
    pub v: VersionInfoV1,

    pub game_id: u64,
    pub total_points: u32,
    pub elapsed_secs: u64,
    pub bonus_applied: bool,
    /// False if handing the result to the score store failed.
    pub submitted: bool,
}

#[derive(Debug)]
pub enum NdjsonError {
    Io(io::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for NdjsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NdjsonError::Io(e) => write!(f, "io: {e}"),
            NdjsonError::Json(e) => write!(f, "json: {e}"),
        }
    }
}

impl std::error::Error for NdjsonError {}

impl From<io::Error> for NdjsonError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for NdjsonError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// Append-only NDJSON writer.
///
/// Contract: each call writes exactly one JSON object followed by a newline.
pub struct NdjsonWriter {
    w: BufWriter<File>,
    lines_since_flush: u64,
    flush_every_lines: u64,
}

impl NdjsonWriter {
    /// Open a file for append. Creates it if it doesn't exist.
    pub fn open_append(path: impl AsRef<Path>) -> Result<Self, NdjsonError> {
        Self::open_append_with_flush(path, 0)
    }

    /// `flush_every_lines=0` disables periodic flushing.
    pub fn open_append_with_flush(
        path: impl AsRef<Path>,
        flush_every_lines: u64,
    ) -> Result<Self, NdjsonError> {
        let f = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            w: BufWriter::new(f),
            lines_since_flush: 0,
            flush_every_lines,
        })
    }

    pub fn write_event<T: Serialize>(&mut self, event: &T) -> Result<(), NdjsonError> {
        let mut buf = serde_json::to_vec(event)?;
        buf.push(b'\n');
        self.w.write_all(&buf)?;
        self.lines_since_flush += 1;
        if self.flush_every_lines > 0 && self.lines_since_flush >= self.flush_every_lines {
            self.flush()?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), NdjsonError> {
        self.w.flush()?;
        self.lines_since_flush = 0;
        Ok(())
    }
}

/// Read every well-formed event back, skipping blank or truncated lines.
pub fn read_events_lenient(path: impl AsRef<Path>) -> Result<Vec<serde_json::Value>, NdjsonError> {
    let s = std::fs::read_to_string(path)?;
    Ok(s.lines()
        .filter(|l| !l.trim().is_empty())
        .filter_map(|l| serde_json::from_str(l).ok())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn roll_event(x: u8) -> RollEventV1 {
        RollEventV1 {
            event: "roll",
            ts_ms: now_ms(),
            v: VersionInfoV1::current(),
            game_id: 1,
            hand: [x; 5],
            held: [false; 5],
            throws_remaining: 2,
            yatzy_reopened: false,
        }
    }

    #[test]
    fn version_is_set() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn writes_one_valid_json_object_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.ndjson");
        let mut w = NdjsonWriter::open_append(&path).unwrap();

        w.write_event(&roll_event(1)).unwrap();
        w.write_event(&roll_event(2)).unwrap();
        w.flush().unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert_eq!(raw.lines().count(), 2);

        let vals = read_events_lenient(&path).unwrap();
        assert_eq!(vals.len(), 2);
        assert_eq!(vals[0]["event"], "roll");
        assert_eq!(vals[0]["hand"][0], 1);
        assert_eq!(vals[1]["hand"][4], 2);
        assert_eq!(vals[1]["v"]["ruleset_id"], RULESET_ID);
    }

    #[test]
    fn periodic_flush_makes_lines_visible() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.ndjson");
        let mut w = NdjsonWriter::open_append_with_flush(&path, 1).unwrap();
        w.write_event(&roll_event(3)).unwrap();

        // No explicit flush: the writer flushed after the first line.
        let vals = read_events_lenient(&path).unwrap();
        assert_eq!(vals.len(), 1);
    }

    #[test]
    fn lenient_reader_tolerates_trailing_partial_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.ndjson");

        {
            let mut w = NdjsonWriter::open_append(&path).unwrap();
            w.write_event(&roll_event(1)).unwrap();
            w.flush().unwrap();
        }

        // Simulate crash: append a partial JSON line (no newline, invalid JSON).
        let mut f = OpenOptions::new().append(true).open(&path).unwrap();
        f.write_all(br#"{"event":"roll","hand":"#).unwrap();
        f.flush().unwrap();

        let vals = read_events_lenient(&path).unwrap();
        assert_eq!(vals.len(), 1);
        assert_eq!(vals[0]["hand"][0], 1);
    }

    #[test]
    fn reopening_appends_instead_of_truncating() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.ndjson");
        for x in 1..=3 {
            let mut w = NdjsonWriter::open_append(&path).unwrap();
            w.write_event(&roll_event(x)).unwrap();
            w.flush().unwrap();
        }
        assert_eq!(read_events_lenient(&path).unwrap().len(), 3);
    }

    #[test]
    fn config_hash_is_stable_hex() {
        let a = hash_config_bytes(b"rules: {}\n");
        assert_eq!(a, hash_config_bytes(b"rules: {}\n"));
        assert_ne!(a, hash_config_bytes(b"rules: {exhausted_roll: reject}\n"));
        assert_eq!(a.len(), 64);
    }
}
