use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported wagers.
///
/// Each bet resolves as a single independent trial; there is no come-out/point
/// state between rolls.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BetType {
    PassLine = 0,
    DontPass = 1,
    /// Recognized but not resolvable: resolving it yields
    /// [`Error::UnsupportedOperation`].
    FreeOdds = 2,
}

impl BetType {
    pub const ALL: [BetType; 3] = [BetType::PassLine, BetType::DontPass, BetType::FreeOdds];

    /// Human-readable label, as shown to players.
    pub fn label(self) -> &'static str {
        match self {
            BetType::PassLine => "Pass Line Bet",
            BetType::DontPass => "Don't Pass Bet",
            BetType::FreeOdds => "Free Odds Bet",
        }
    }

    /// Short identifier used in configuration files and on the command line.
    pub fn id(self) -> &'static str {
        match self {
            BetType::PassLine => "pass-line",
            BetType::DontPass => "dont-pass",
            BetType::FreeOdds => "free-odds",
        }
    }
}

impl fmt::Display for BetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<u8> for BetType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(BetType::PassLine),
            1 => Ok(BetType::DontPass),
            2 => Ok(BetType::FreeOdds),
            i => Err(Error::InvalidBetType(i.to_string())),
        }
    }
}

impl FromStr for BetType {
    type Err = Error;

    /// Accepts either the display label or the identifier (case-insensitive,
    /// `_` and `-` interchangeable).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let normalized = trimmed.to_ascii_lowercase().replace('_', "-");
        BetType::ALL
            .into_iter()
            .find(|bet| {
                normalized == bet.id() || trimmed.eq_ignore_ascii_case(bet.label())
            })
            .ok_or_else(|| Error::InvalidBetType(s.to_string()))
    }
}

/// Wager placed on every roll of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetConfig {
    pub bet_type: BetType,
    /// Amount risked per roll (must be positive).
    pub stake: i64,
}

impl BetConfig {
    pub fn new(bet_type: BetType, stake: i64) -> Self {
        Self { bet_type, stake }
    }
}
