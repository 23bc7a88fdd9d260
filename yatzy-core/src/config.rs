//! Configuration schema.
//!
//! One YAML file configures the engine rules knobs, the dice source, the score
//! store and the event log. Every section is optional and falls back to its
//! default.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::chance::DiceSource;

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Rule variations.
    #[serde(default)]
    pub rules: RulesConfig,
    /// Where dice come from.
    #[serde(default)]
    pub dice: DiceConfig,
    /// Score history store.
    #[serde(default)]
    pub scores: ScoresConfig,
    /// NDJSON game event log.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// What `roll()` does when the round has no throws left.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExhaustedRollPolicy {
    /// Report "no throws left" and give the round 3 fresh throws.
    #[default]
    Reset,
    /// Report "no throws left" and change nothing.
    Reject,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RulesConfig {
    #[serde(default)]
    pub exhausted_roll: ExhaustedRollPolicy,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiceMode {
    /// Seeded ChaCha8 stream.
    #[default]
    Rng,
    /// Outcomes keyed by (seed, round, roll); reproducible replays.
    EventKeyed,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct DiceConfig {
    #[serde(default)]
    pub mode: DiceMode,
    /// If None, a seed is drawn from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl DiceConfig {
    /// Build the dice source described by this section.
    pub fn source(&self) -> DiceSource {
        let seed = self.seed.unwrap_or_else(rand::random);
        match self.mode {
            DiceMode::Rng => DiceSource::from_seed(seed),
            DiceMode::EventKeyed => DiceSource::event_keyed(seed),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ScoresConfig {
    /// JSON file holding every player's best results.
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
    /// Results kept per player.
    #[serde(default = "default_keep_best")]
    pub keep_best: usize,
}

fn default_store_path() -> PathBuf {
    PathBuf::from("scores.json")
}

fn default_keep_best() -> usize {
    5
}

impl Default for ScoresConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            keep_best: default_keep_best(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Append game events here when set.
    #[serde(default)]
    pub events_path: Option<PathBuf>,
    /// Flush the event log every N lines (0 disables periodic flushing).
    #[serde(default = "default_flush_every_lines")]
    pub flush_every_lines: u64,
}

fn default_flush_every_lines() -> u64 {
    1
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            events_path: None,
            flush_every_lines: default_flush_every_lines(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default_yaml() {
        let config =
            Config::load("../configs/default.yaml").expect("Failed to load configs/default.yaml");

        assert_eq!(config.rules.exhausted_roll, ExhaustedRollPolicy::Reset);
        assert_eq!(config.dice.mode, DiceMode::Rng);
        assert_eq!(config.dice.seed, None);
        assert_eq!(config.scores.keep_best, 5);
        assert_eq!(config.scores.store_path, PathBuf::from("scores.json"));
        assert_eq!(config.logging.events_path, None);
    }

    #[test]
    fn test_parse_yaml_string() {
        let yaml = r#"
rules:
  exhausted_roll: reject
dice:
  mode: event_keyed
  seed: 42
logging:
  events_path: /tmp/events.ndjson
"#;

        let config = Config::from_yaml(yaml).expect("Failed to parse YAML");
        assert_eq!(config.rules.exhausted_roll, ExhaustedRollPolicy::Reject);
        assert_eq!(config.dice.mode, DiceMode::EventKeyed);
        assert_eq!(config.dice.seed, Some(42));
        assert_eq!(
            config.logging.events_path.as_deref(),
            Some(Path::new("/tmp/events.ndjson"))
        );
        // Check defaults are applied
        assert_eq!(config.logging.flush_every_lines, 1);
        assert_eq!(config.scores, ScoresConfig::default());
    }

    #[test]
    fn test_empty_yaml_is_all_defaults() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_yaml_fails() {
        let invalid_yaml = "this is not: valid: yaml: {{{}}}";
        let result = Config::from_yaml(invalid_yaml);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_policy_fails() {
        let result = Config::from_yaml("rules:\n  exhausted_roll: sometimes\n");
        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }
}
