//! Configuration, reporting and batch driving for the `crapsim` binary.

pub mod config;
pub mod report;
pub mod runner;

pub use config::{parse_seed, Config, Mode};
pub use report::{roll_trend, Report, RollMetric, RollStats, Summary};
pub use runner::{run, LogProgress};
