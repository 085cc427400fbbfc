//! Types shared by the crapsim engine and its front-ends.
//!
//! Everything here is plain data: bet and game configuration, the record produced for each
//! simulated game, and the error type returned by the engine.

pub mod bet;
pub mod error;
pub mod game;

pub use bet::{BetConfig, BetType};
pub use error::{Error, Result};
pub use game::{BatchResult, GameConfig, GameOutcome, GameRecord, SimulationConfig};
