//! Seeded random streams.
//!
//! A batch seed is 32 bytes. Game `i` of a stream run draws from ChaCha20 stream `i` of that
//! seed, which keeps games independent of each other and of how they are scheduled.

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// Length of a batch seed in bytes.
pub const SEED_LENGTH: usize = 32;

/// Batch seed.
pub type Seed = [u8; SEED_LENGTH];

/// Independent random stream for game `index`.
pub fn game_rng(seed: &Seed, index: u64) -> ChaCha20Rng {
    let mut rng = ChaCha20Rng::from_seed(*seed);
    rng.set_stream(index);
    rng
}
