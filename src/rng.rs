//! Seeded RNG helper (§9, §10.6). The engine itself never creates an RNG —
//! callers own and seed one, so results stay reproducible end to end.

use rand::SeedableRng;
use rand::rngs::StdRng;

/// Build a deterministic RNG from a `u64` seed, for reproducible matches.
pub fn rng_from_seed(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
