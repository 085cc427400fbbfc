//! Per-roll payout model.
//!
//! Each supported bet is an even-money Bernoulli trial. The win probability comes from the
//! published odds ratio `w/l` as `p = (w/l) / (w/l + 1)`.

use crapsim_types::{BetConfig, BetType, Error, Result};
use rand::Rng;

/// Pass line odds ratio (wins to losses).
pub const PASS_LINE_ODDS: (u32, u32) = (244, 251);

/// Don't pass odds ratio (wins to losses, bar-12 pushes excluded).
pub const DONT_PASS_ODDS: (u32, u32) = (949, 976);

fn odds(bet_type: BetType) -> Result<f64> {
    let (wins, losses) = match bet_type {
        BetType::PassLine => PASS_LINE_ODDS,
        BetType::DontPass => DONT_PASS_ODDS,
        BetType::FreeOdds => return Err(Error::UnsupportedOperation(bet_type)),
    };
    Ok(wins as f64 / losses as f64)
}

/// Probability that a single trial of `bet_type` wins.
pub fn win_probability(bet_type: BetType) -> Result<f64> {
    let odds = odds(bet_type)?;
    Ok(odds / (odds + 1.0))
}

/// Expected payout of one trial.
pub fn expected_value(bet: &BetConfig) -> Result<f64> {
    let p = win_probability(bet.bet_type)?;
    Ok(bet.stake as f64 * (2.0 * p - 1.0))
}

/// Resolve one trial, returning `+stake` on a win and `-stake` on a loss.
///
/// Consumes exactly one `f64` from `rng` for supported bets and none when the bet is
/// unsupported.
pub fn resolve_bet<R: Rng + ?Sized>(bet: &BetConfig, rng: &mut R) -> Result<i64> {
    let p = win_probability(bet.bet_type)?;
    let draw: f64 = rng.gen();
    if draw < p {
        Ok(bet.stake)
    } else {
        Ok(-bet.stake)
    }
}
