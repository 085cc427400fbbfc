//! Batch orchestration.
//!
//! A batch is `games` independent calls to [`play_game`]. Two scheduling modes are provided:
//! - [`Simulator`] owns one random source and plays every game from it, in order.
//! - [`run_batch_streams`] (and [`run_batch_parallel`] with the `parallel` feature) give each
//!   game its own stream derived from a batch [`Seed`].
//!
//! Either way, the first failing game aborts the batch and no partial result is returned.

use crate::{game::play_game, rng::game_rng, rng::Seed};
use crapsim_types::{
    BatchResult, BetConfig, BetType, Error, GameConfig, GameRecord, Result, SimulationConfig,
};
use rand::Rng;
use tracing::{debug, trace, warn};

/// Maximum number of games between progress notifications.
pub const PROGRESS_INTERVAL: usize = 1_000;

/// Observer notified while a batch runs.
pub trait Progress {
    /// Called with a monotonically increasing count of finished games.
    fn on_progress(&mut self, completed: usize, total: usize);

    /// Checked before each game; returning `false` cancels the batch.
    fn should_continue(&self) -> bool {
        true
    }
}

impl Progress for () {
    fn on_progress(&mut self, _completed: usize, _total: usize) {}
}

impl<F: FnMut(usize, usize)> Progress for F {
    fn on_progress(&mut self, completed: usize, total: usize) {
        self(completed, total)
    }
}

/// Number of games between progress notifications for a batch of `total` games.
///
/// Small batches report every game; large ones report every [`PROGRESS_INTERVAL`] games.
pub fn progress_interval(total: usize) -> usize {
    (total / 100).clamp(1, PROGRESS_INTERVAL)
}

fn check_contract(config: &SimulationConfig) {
    assert!(config.bet.stake > 0, "stake must be positive");
    assert!(config.game.stop_loss <= 0, "stop_loss must not be positive");
    assert!(config.game.stop_win >= 0, "stop_win must not be negative");
    assert!(config.game.max_rolls >= 1, "max_rolls must be at least 1");
    assert!(config.games >= 1, "games must be at least 1");
}

fn run_sequential<P, F>(
    config: &SimulationConfig,
    progress: &mut P,
    mut play: F,
) -> Result<BatchResult>
where
    P: Progress + ?Sized,
    F: FnMut(usize) -> Result<GameRecord>,
{
    let total = config.games;
    let interval = progress_interval(total);
    debug!(
        games = total,
        bet = config.bet.bet_type.id(),
        stake = config.bet.stake,
        max_rolls = config.game.max_rolls,
        "Starting batch"
    );

    let mut batch = BatchResult::with_capacity(total);
    for index in 0..total {
        if !progress.should_continue() {
            warn!(completed = index, total, "Batch cancelled");
            return Err(Error::Cancelled {
                completed: index,
                total,
            });
        }
        let record = play(index)?;
        trace!(game = index, rolls = record.len(), result = record.result, "Game complete");
        batch.push(record);

        let completed = index + 1;
        if completed % interval == 0 || completed == total {
            progress.on_progress(completed, total);
        }
    }

    debug!(games = batch.len(), "Finished batch");
    Ok(batch)
}

/// Simulator bound to one configuration and one random source.
pub struct Simulator<R> {
    config: SimulationConfig,
    rng: R,
}

impl<R: Rng> Simulator<R> {
    /// Build a simulator from raw front-end input.
    ///
    /// Fails with [`Error::InvalidBetType`] if `bet_type` names no known bet.
    ///
    /// # Panics
    ///
    /// Panics if the numeric arguments violate their ranges (see [`Simulator::from_config`]).
    pub fn new(
        bet_type: &str,
        stake: i64,
        stop_loss: i64,
        stop_win: i64,
        max_rolls: usize,
        games: usize,
        rng: R,
    ) -> Result<Self> {
        let bet_type: BetType = bet_type.parse()?;
        let config = SimulationConfig {
            bet: BetConfig::new(bet_type, stake),
            game: GameConfig::new(stop_loss, stop_win, max_rolls),
            games,
        };
        Ok(Self::from_config(config, rng))
    }

    /// Build a simulator from typed configuration.
    ///
    /// # Panics
    ///
    /// Panics unless `stake > 0`, `stop_loss <= 0`, `stop_win >= 0`, `max_rolls >= 1` and
    /// `games >= 1`.
    pub fn from_config(config: SimulationConfig, rng: R) -> Self {
        check_contract(&config);
        Self { config, rng }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Play a single game from the shared source.
    pub fn play_game(&mut self) -> Result<GameRecord> {
        play_game(&self.config.bet, &self.config.game, &mut self.rng)
    }

    /// Run the configured number of games.
    pub fn run_batch(&mut self) -> Result<BatchResult> {
        self.run_batch_with(&mut ())
    }

    /// Run the configured number of games, reporting to `progress`.
    pub fn run_batch_with<P: Progress + ?Sized>(
        &mut self,
        progress: &mut P,
    ) -> Result<BatchResult> {
        let SimulationConfig { bet, game, .. } = self.config;
        let rng = &mut self.rng;
        run_sequential(&self.config, progress, |_| play_game(&bet, &game, &mut *rng))
    }

    pub fn into_rng(self) -> R {
        self.rng
    }
}

/// Run a batch where game `i` draws from stream `i` of `seed`.
///
/// # Panics
///
/// Panics under the same conditions as [`Simulator::from_config`].
pub fn run_batch_streams<P: Progress + ?Sized>(
    config: &SimulationConfig,
    seed: &Seed,
    progress: &mut P,
) -> Result<BatchResult> {
    check_contract(config);
    run_sequential(config, progress, |index| {
        play_game(&config.bet, &config.game, &mut game_rng(seed, index as u64))
    })
}

/// Parallel counterpart of [`run_batch_streams`]; returns an identical batch.
///
/// Games are scheduled in chunks; progress and cancellation are handled between chunks on the
/// calling thread.
#[cfg(feature = "parallel")]
pub fn run_batch_parallel<P: Progress + ?Sized>(
    config: &SimulationConfig,
    seed: &Seed,
    progress: &mut P,
) -> Result<BatchResult> {
    use rayon::prelude::*;

    check_contract(config);
    let total = config.games;
    let chunk = progress_interval(total) * rayon::current_num_threads().max(1);
    debug!(games = total, chunk, "Starting parallel batch");

    let mut batch = BatchResult::with_capacity(total);
    let mut start = 0;
    while start < total {
        if !progress.should_continue() {
            warn!(completed = start, total, "Batch cancelled");
            return Err(Error::Cancelled {
                completed: start,
                total,
            });
        }
        let end = (start + chunk).min(total);
        let records = (start..end)
            .into_par_iter()
            .map(|index| play_game(&config.bet, &config.game, &mut game_rng(seed, index as u64)))
            .collect::<Result<Vec<_>>>()?;
        for record in records {
            batch.push(record);
        }
        progress.on_progress(end, total);
        start = end;
    }

    debug!(games = batch.len(), "Finished parallel batch");
    Ok(batch)
}
