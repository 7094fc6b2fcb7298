use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Short seeds stay below this so they are easy to read out of a log line.
pub const SEED8_LIMIT: u32 = 100_000_000;

/// A short, human-friendly seed (up to 8 decimal digits).
pub fn generate_seed8() -> u32 {
    rand::rng().random_range(0..SEED8_LIMIT)
}

/// Spread a short seed over all 64 bits before it seeds the generator.
pub fn expand_seed64(code: u32) -> u64 {
    splitmix64(u64::from(code))
}

/// One round of the SplitMix64 finalizer.
pub fn splitmix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    for (shift, multiplier) in [(30, 0xBF58_476D_1CE4_E5B9_u64), (27, 0x94D0_49BB_1331_11EB)] {
        z = (z ^ (z >> shift)).wrapping_mul(multiplier);
    }
    z ^ (z >> 31)
}

/// Random source for a field. A configured seed gives a reproducible animation,
/// otherwise a fresh seed is drawn and logged so a nice run can be replayed.
pub fn field_rng(seed: Option<u32>) -> StdRng {
    let seed = match seed {
        Some(seed) => seed,
        None => {
            let seed = generate_seed8();
            log::debug!("Using random field seed {seed}");
            seed
        }
    };
    StdRng::seed_from_u64(expand_seed64(seed))
}
