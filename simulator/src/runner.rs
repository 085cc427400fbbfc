//! Drives a batch in the configured mode.

use crate::config::Mode;
use crapsim_execution::{
    run_batch_parallel, run_batch_streams, BatchResult, Progress, Result, Seed,
    SimulationConfig, Simulator,
};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::info;

/// Logs batch progress at whole-percent steps.
#[derive(Debug, Default)]
pub struct LogProgress {
    last_percent: Option<usize>,
}

impl Progress for LogProgress {
    fn on_progress(&mut self, completed: usize, total: usize) {
        let percent = completed * 100 / total.max(1);
        if self.last_percent == Some(percent) {
            return;
        }
        self.last_percent = Some(percent);
        info!(completed, total, percent, "Simulating games");
    }
}

/// Run `config` with randomness derived from `seed`.
pub fn run<P: Progress + ?Sized>(
    config: &SimulationConfig,
    mode: Mode,
    seed: &Seed,
    progress: &mut P,
) -> Result<BatchResult> {
    match mode {
        Mode::Shared => {
            let rng = ChaCha20Rng::from_seed(*seed);
            Simulator::from_config(*config, rng).run_batch_with(progress)
        }
        Mode::Streams => run_batch_streams(config, seed, progress),
        Mode::Parallel => run_batch_parallel(config, seed, progress),
    }
}
