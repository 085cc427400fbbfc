use crapsim_execution::{
    play_game, run_batch_streams, BetConfig, BetType, Error, GameConfig, GameOutcome,
    SimulationConfig, Simulator,
};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

#[test]
fn construct_rejects_unknown_bet_type() {
    let rng = ChaCha20Rng::seed_from_u64(1);
    let result = Simulator::new("Field Bet", 50, -1_000, 500, 100, 10, rng);
    assert!(matches!(result, Err(Error::InvalidBetType(_))));
}

#[test]
fn construct_accepts_front_end_labels() {
    for label in ["Pass Line Bet", "Don't Pass Bet", "Free Odds Bet"] {
        let rng = ChaCha20Rng::seed_from_u64(1);
        assert!(Simulator::new(label, 50, -1_000, 500, 100, 10, rng).is_ok());
    }
}

#[test]
fn free_odds_batch_is_unsupported() {
    let rng = ChaCha20Rng::seed_from_u64(2);
    let mut simulator = Simulator::new("Free Odds Bet", 50, -1_000, 500, 100, 10, rng).unwrap();
    assert_eq!(
        simulator.run_batch(),
        Err(Error::UnsupportedOperation(BetType::FreeOdds))
    );
}

#[test]
fn one_unit_thresholds_end_every_game_after_one_roll() {
    let rng = ChaCha20Rng::seed_from_u64(3);
    let mut simulator = Simulator::new("pass-line", 10, -1, 1, 100, 1_000, rng).unwrap();
    let batch = simulator.run_batch().unwrap();
    assert_eq!(batch.len(), 1_000);
    for record in &batch {
        assert_eq!(record.rolls.len(), 1);
        assert!(record.result == 10 || record.result == -10);
    }
}

#[test]
fn default_front_end_configuration() {
    let rng = ChaCha20Rng::seed_from_u64(4);
    let mut simulator = Simulator::new("Pass Line Bet", 50, -1_000, 500, 100, 2_000, rng).unwrap();
    let batch = simulator.run_batch().unwrap();
    assert_eq!(batch.len(), 2_000);

    let mut counts = [0usize; 3];
    for record in &batch {
        assert_eq!(record.result, record.rolls.iter().sum::<i64>());
        assert!(record.rolls.len() <= 100);
        match record.outcome() {
            GameOutcome::Won => counts[0] += 1,
            GameOutcome::Lost => counts[1] += 1,
            GameOutcome::Incomplete => counts[2] += 1,
        }
    }
    // Stakes of 50 land exactly on both thresholds, so every category is reachable.
    assert!(counts.iter().all(|count| *count > 0), "counts: {counts:?}");
    assert_eq!(counts.iter().sum::<usize>(), 2_000);
}

#[test]
fn seeded_batches_are_bit_identical() {
    let run = |seed: u64| {
        let rng = ChaCha20Rng::seed_from_u64(seed);
        Simulator::new("dont-pass", 25, -250, 250, 200, 500, rng)
            .unwrap()
            .run_batch()
            .unwrap()
    };
    assert_eq!(run(77), run(77));
    assert_ne!(run(77), run(78));
}

#[test]
fn simulator_and_free_function_agree() {
    let bet = BetConfig::new(BetType::DontPass, 5);
    let game = GameConfig::new(-50, 50, 60);
    let mut simulator = Simulator::from_config(
        SimulationConfig {
            bet,
            game,
            games: 1,
        },
        ChaCha20Rng::seed_from_u64(5),
    );
    let expected = play_game(&bet, &game, &mut ChaCha20Rng::seed_from_u64(5)).unwrap();
    assert_eq!(simulator.play_game().unwrap(), expected);
}

#[test]
fn stream_batch_matches_per_game_streams() {
    let config = SimulationConfig {
        bet: BetConfig::new(BetType::PassLine, 10),
        game: GameConfig::new(-100, 100, 50),
        games: 25,
    };
    let seed = [3u8; 32];
    let batch = run_batch_streams(&config, &seed, &mut ()).unwrap();
    for (index, record) in batch.iter().enumerate() {
        let mut rng = crapsim_execution::game_rng(&seed, index as u64);
        assert_eq!(&play_game(&config.bet, &config.game, &mut rng).unwrap(), record);
    }
}
