//! Crapsim simulation engine.
//!
//! The engine is three layers deep:
//! - [`resolve_bet`] turns one stake into a signed payout with a single uniform draw.
//! - [`play_game`] rolls until the running total reaches a stop threshold or the roll cap.
//! - [`Simulator`] (and the seeded stream runners) repeat games into a [`BatchResult`].
//!
//! ## Determinism requirements
//! - Never draw from a global or thread-local RNG; every draw comes from the handle passed in.
//! - A sequential batch consumes its source in game order, then roll order.
//! - Stream runs give game `i` its own ChaCha20 stream `i`, so sequential and parallel stream
//!   runs produce identical batches.
//!
//! ## Example
//! ```rust
//! use crapsim_execution::Simulator;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let rng = ChaCha20Rng::seed_from_u64(7);
//! let mut simulator = Simulator::new("Pass Line Bet", 10, -100, 50, 100, 1_000, rng)?;
//! let batch = simulator.run_batch()?;
//! assert_eq!(batch.len(), 1_000);
//! # Ok::<(), crapsim_execution::Error>(())
//! ```

pub mod batch;
pub mod bet;
pub mod game;
pub mod rng;

#[cfg(test)]
mod property_tests;

pub use batch::{progress_interval, run_batch_streams, Progress, Simulator, PROGRESS_INTERVAL};
#[cfg(feature = "parallel")]
pub use batch::run_batch_parallel;
pub use bet::{expected_value, resolve_bet, win_probability};
pub use crapsim_types::{
    BatchResult, BetConfig, BetType, Error, GameConfig, GameOutcome, GameRecord, Result,
    SimulationConfig,
};
pub use game::play_game;
pub use rng::{game_rng, Seed, SEED_LENGTH};
