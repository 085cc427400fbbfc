//! Single-game state machine.

use crate::bet::resolve_bet;
use crapsim_types::{BetConfig, GameConfig, GameRecord, Result};
use rand::Rng;

/// Play one game: roll until the running total reaches `stop_loss` or `stop_win`
/// (inclusive), or until `max_rolls` rolls have been played.
pub fn play_game<R: Rng + ?Sized>(
    bet: &BetConfig,
    config: &GameConfig,
    rng: &mut R,
) -> Result<GameRecord> {
    let mut record = GameRecord::new(config);
    for _ in 0..config.max_rolls {
        let outcome = resolve_bet(bet, rng)?;
        record.push(outcome);
        if config.should_stop(record.result) {
            break;
        }
    }
    Ok(record)
}
