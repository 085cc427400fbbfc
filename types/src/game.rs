use crate::bet::BetConfig;
use serde::{Deserialize, Serialize};

/// Stopping rules applied to the running total of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Loss limit (`<= 0`).
    pub stop_loss: i64,
    /// Win target (`>= 0`).
    pub stop_win: i64,
    /// Roll cap (`>= 1`).
    pub max_rolls: usize,
}

impl GameConfig {
    pub fn new(stop_loss: i64, stop_win: i64, max_rolls: usize) -> Self {
        Self {
            stop_loss,
            stop_win,
            max_rolls,
        }
    }

    /// Returns true once `total` has reached either threshold (inclusive).
    pub fn should_stop(&self, total: i64) -> bool {
        total <= self.stop_loss || total >= self.stop_win
    }
}

/// Everything needed to simulate a batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub bet: BetConfig,
    pub game: GameConfig,
    /// Number of games in the batch (`>= 1`).
    pub games: usize,
}

/// How a finished game is classified by reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOutcome {
    /// Final balance landed exactly on the win target.
    Won,
    /// Final balance landed exactly on the loss limit.
    Lost,
    /// Neither limit was matched.
    Incomplete,
}

/// Roll-by-roll record of one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Signed payout of every roll played, in order.
    pub rolls: Vec<i64>,
    /// Sum of `rolls`.
    pub result: i64,
    pub stop_loss: i64,
    pub stop_win: i64,
    pub max_rolls: usize,
}

impl GameRecord {
    /// Empty record carrying the thresholds it will be played under.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            rolls: Vec::with_capacity(config.max_rolls.min(1024)),
            result: 0,
            stop_loss: config.stop_loss,
            stop_win: config.stop_win,
            max_rolls: config.max_rolls,
        }
    }

    /// Append one roll and fold it into the result.
    pub fn push(&mut self, outcome: i64) {
        self.rolls.push(outcome);
        self.result += outcome;
    }

    pub fn config(&self) -> GameConfig {
        GameConfig::new(self.stop_loss, self.stop_win, self.max_rolls)
    }

    pub fn len(&self) -> usize {
        self.rolls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rolls.is_empty()
    }

    pub fn outcome(&self) -> GameOutcome {
        if self.result == self.stop_win {
            GameOutcome::Won
        } else if self.result == self.stop_loss {
            GameOutcome::Lost
        } else {
            GameOutcome::Incomplete
        }
    }

    /// Balance after each roll.
    pub fn running_totals(&self) -> impl Iterator<Item = i64> + '_ {
        self.rolls.iter().scan(0i64, |total, outcome| {
            *total += outcome;
            Some(*total)
        })
    }
}

/// Ordered records of every game in a batch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchResult {
    games: Vec<GameRecord>,
}

impl BatchResult {
    pub fn with_capacity(games: usize) -> Self {
        Self {
            games: Vec::with_capacity(games),
        }
    }

    pub fn push(&mut self, record: GameRecord) {
        self.games.push(record);
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn games(&self) -> &[GameRecord] {
        &self.games
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GameRecord> {
        self.games.iter()
    }

    pub fn into_inner(self) -> Vec<GameRecord> {
        self.games
    }

    /// Longest game in the batch, in rolls.
    pub fn longest_game(&self) -> usize {
        self.games.iter().map(GameRecord::len).max().unwrap_or(0)
    }

    /// Outcome of roll `index` (0-based) for every game that reached it.
    pub fn outcomes_at(&self, index: usize) -> impl Iterator<Item = i64> + '_ {
        self.games
            .iter()
            .filter_map(move |game| game.rolls.get(index).copied())
    }
}

impl From<Vec<GameRecord>> for BatchResult {
    fn from(games: Vec<GameRecord>) -> Self {
        Self { games }
    }
}

impl<'a> IntoIterator for &'a BatchResult {
    type Item = &'a GameRecord;
    type IntoIter = std::slice::Iter<'a, GameRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.games.iter()
    }
}

impl IntoIterator for BatchResult {
    type Item = GameRecord;
    type IntoIter = std::vec::IntoIter<GameRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.games.into_iter()
    }
}
