//! Seedable randomness for cosmetic effects.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// RNG used for particle seeding, preloader progress and easter eggs.
pub type FolioRng = ChaCha8Rng;

/// Deterministic when `seed` is set, OS-seeded otherwise.
#[must_use]
pub fn rng_from_seed(seed: Option<u64>) -> FolioRng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}
