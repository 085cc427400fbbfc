//! Simulation configuration loaded from YAML and command-line overrides.

use anyhow::{anyhow, ensure, Context, Result};
use crapsim_execution::{Seed, SEED_LENGTH};
use crapsim_types::{BetConfig, BetType, GameConfig, SimulationConfig};
use serde::{Deserialize, Serialize};
use std::{path::Path, str::FromStr};
use tracing::Level;

/// Largest accepted stake, and the widest accepted stop thresholds.
pub const MAX_AMOUNT: i64 = 1_000_000;

/// Largest accepted roll cap.
pub const MAX_ROLLS: usize = 10_000;

/// Largest accepted batch.
pub const MAX_GAMES: usize = 1_000_000;

/// How games draw their randomness.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// One ChaCha20 source shared by every game, in order.
    #[default]
    Shared,
    /// One ChaCha20 stream per game, played sequentially.
    Streams,
    /// One ChaCha20 stream per game, played on a rayon pool.
    Parallel,
}

/// Simulation configuration (from config file).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub bet_type: String,
    pub stake: i64,
    pub stop_loss: i64,
    pub stop_win: i64,
    pub max_rolls: usize,
    pub games: usize,
    /// Hex-encoded 32-byte seed; a random one is drawn when absent.
    pub seed: Option<String>,
    pub mode: Mode,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bet_type: BetType::PassLine.label().to_string(),
            stake: 50,
            stop_loss: -1_000,
            stop_win: 500,
            max_rolls: 100,
            games: 100_000,
            seed: None,
            mode: Mode::Shared,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Read a YAML config file. Missing fields take their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("could not read config file {}", path.display()))?;
        serde_yaml::from_str(&contents)
            .with_context(|| format!("could not parse config file {}", path.display()))
    }

    /// Check ranges and resolve the bet type.
    pub fn simulation(&self) -> Result<SimulationConfig> {
        let bet_type = BetType::from_str(&self.bet_type).context("bet_type")?;
        ensure!(
            (1..=MAX_AMOUNT).contains(&self.stake),
            "stake must be between 1 and {MAX_AMOUNT} (got {})",
            self.stake
        );
        ensure!(
            (-MAX_AMOUNT..=0).contains(&self.stop_loss),
            "stop_loss must be between -{MAX_AMOUNT} and 0 (got {})",
            self.stop_loss
        );
        ensure!(
            (0..=MAX_AMOUNT).contains(&self.stop_win),
            "stop_win must be between 0 and {MAX_AMOUNT} (got {})",
            self.stop_win
        );
        ensure!(
            (1..=MAX_ROLLS).contains(&self.max_rolls),
            "max_rolls must be between 1 and {MAX_ROLLS} (got {})",
            self.max_rolls
        );
        ensure!(
            (1..=MAX_GAMES).contains(&self.games),
            "games must be between 1 and {MAX_GAMES} (got {})",
            self.games
        );
        Ok(SimulationConfig {
            bet: BetConfig::new(bet_type, self.stake),
            game: GameConfig::new(self.stop_loss, self.stop_win, self.max_rolls),
            games: self.games,
        })
    }

    /// Decoded seed, if one was configured.
    pub fn seed(&self) -> Result<Option<Seed>> {
        self.seed.as_deref().map(parse_seed).transpose()
    }

    pub fn level(&self) -> Result<Level> {
        Level::from_str(&self.log_level)
            .map_err(|_| anyhow!("invalid log_level: {:?}", self.log_level))
    }
}

/// Decode a hex seed of exactly 32 bytes (an optional `0x` prefix is allowed).
pub fn parse_seed(value: &str) -> Result<Seed> {
    let value = value.trim();
    let value = value.strip_prefix("0x").unwrap_or(value);
    let bytes = hex::decode(value).context("seed is not valid hex")?;
    let len = bytes.len();
    bytes
        .try_into()
        .map_err(|_| anyhow!("seed must be exactly {SEED_LENGTH} bytes (got {len})"))
}
