//! Property tests for the game and batch invariants.
//!
//! For any supported bet, stake, thresholds and roll cap:
//! 1. **Accounting**: a record's result is the sum of its rolls.
//! 2. **Stopping**: a game ends on the first roll whose running total reaches a threshold, or
//!    at the roll cap, and never earlier.
//! 3. **Payouts**: every roll is exactly `+stake` or `-stake`.
//! 4. **Determinism**: a fixed seed always yields the same batch.

use crate::{play_game, run_batch_streams, Simulator};
use crapsim_types::{BetConfig, BetType, GameConfig, SimulationConfig};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

// ─────────────────────────────────────────────────────────────────────────────
// Generators
// ─────────────────────────────────────────────────────────────────────────────

fn arb_bet() -> impl Strategy<Value = BetConfig> {
    (
        prop_oneof![Just(BetType::PassLine), Just(BetType::DontPass)],
        1i64..=100,
    )
        .prop_map(|(bet_type, stake)| BetConfig::new(bet_type, stake))
}

fn arb_game() -> impl Strategy<Value = GameConfig> {
    (-500i64..=0, 0i64..=500, 1usize..=200)
        .prop_map(|(stop_loss, stop_win, max_rolls)| GameConfig::new(stop_loss, stop_win, max_rolls))
}

fn arb_simulation() -> impl Strategy<Value = SimulationConfig> {
    (arb_bet(), arb_game(), 1usize..=40).prop_map(|(bet, game, games)| SimulationConfig {
        bet,
        game,
        games,
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Property: single-game invariants
// ─────────────────────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn prop_result_is_sum_of_rolls(bet in arb_bet(), game in arb_game(), seed in any::<u64>()) {
        let record = play_game(&bet, &game, &mut ChaCha20Rng::seed_from_u64(seed)).unwrap();
        prop_assert_eq!(record.result, record.rolls.iter().sum::<i64>());
    }

    #[test]
    fn prop_rolls_are_plus_or_minus_stake(bet in arb_bet(), game in arb_game(), seed in any::<u64>()) {
        let record = play_game(&bet, &game, &mut ChaCha20Rng::seed_from_u64(seed)).unwrap();
        prop_assert!(!record.rolls.is_empty());
        for outcome in &record.rolls {
            prop_assert!(*outcome == bet.stake || *outcome == -bet.stake);
        }
    }

    #[test]
    fn prop_game_stops_at_first_threshold(bet in arb_bet(), game in arb_game(), seed in any::<u64>()) {
        let record = play_game(&bet, &game, &mut ChaCha20Rng::seed_from_u64(seed)).unwrap();
        let totals: Vec<i64> = record.running_totals().collect();
        let (last, earlier) = totals.split_last().unwrap();

        prop_assert!(record.len() <= game.max_rolls);
        for total in earlier {
            prop_assert!(!game.should_stop(*total));
        }
        if record.len() < game.max_rolls {
            prop_assert!(game.should_stop(*last));
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Property: batch invariants
// ─────────────────────────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_batch_has_one_record_per_game(config in arb_simulation(), seed in any::<u64>()) {
        let mut simulator = Simulator::from_config(config, ChaCha20Rng::seed_from_u64(seed));
        let batch = simulator.run_batch().unwrap();
        prop_assert_eq!(batch.len(), config.games);
        for record in &batch {
            prop_assert_eq!(record.config(), config.game);
        }
    }

    #[test]
    fn prop_shared_source_is_deterministic(config in arb_simulation(), seed in any::<u64>()) {
        let a = Simulator::from_config(config, ChaCha20Rng::seed_from_u64(seed)).run_batch().unwrap();
        let b = Simulator::from_config(config, ChaCha20Rng::seed_from_u64(seed)).run_batch().unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_streams_are_deterministic(config in arb_simulation(), seed in prop::array::uniform32(any::<u8>())) {
        let a = run_batch_streams(&config, &seed, &mut ()).unwrap();
        let b = run_batch_streams(&config, &seed, &mut ()).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_single_roll_cap(bet in arb_bet(), games in 1usize..=100, seed in any::<u64>()) {
        let config = SimulationConfig { bet, game: GameConfig::new(-1_000, 1_000, 1), games };
        let batch = Simulator::from_config(config, ChaCha20Rng::seed_from_u64(seed)).run_batch().unwrap();
        prop_assert_eq!(batch.len(), games);
        prop_assert!(batch.iter().all(|record| record.len() == 1));
    }
}
