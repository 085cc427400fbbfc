use crate::bet::BetType;
use thiserror::Error as ThisError;

/// Errors raised by the simulation engine.
#[derive(Clone, Debug, ThisError, PartialEq, Eq)]
pub enum Error {
    #[error("invalid bet type: {0:?}")]
    InvalidBetType(String),
    #[error("unsupported operation: {0} is not implemented")]
    UnsupportedOperation(BetType),
    #[error("batch cancelled after {completed} of {total} games")]
    Cancelled { completed: usize, total: usize },
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
