//! Deterministic RNG using PCG32 with BLAKE3 seed derivation.
//!
//! All stochastic behavior in the animator (blink scheduling, idle jitter,
//! background noise) flows through this module so a session seeded with the
//! same value replays identically. Component keys give each concern an
//! independent stream.

use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Creates a PCG32 RNG from a 32-bit seed.
///
/// The 32-bit seed is expanded to 64 bits by duplicating the value in both
/// halves, as required by PCG32's state initialization.
pub fn create_rng(seed: u32) -> Pcg32 {
    let seed64 = (seed as u64) | ((seed as u64) << 32);
    Pcg32::seed_from_u64(seed64)
}

/// Derives a seed for a specific component from the session seed.
///
/// Uses BLAKE3 to hash the base seed concatenated with the component key,
/// producing an independent seed per component.
///
/// # Arguments
/// * `base_seed` - The session's base seed
/// * `key` - A string identifier for the component (e.g. "blink", "jitter")
pub fn derive_component_seed(base_seed: u32, key: &str) -> u32 {
    let mut input = Vec::with_capacity(4 + key.len());
    input.extend_from_slice(&base_seed.to_le_bytes());
    input.extend_from_slice(key.as_bytes());

    let hash = blake3::hash(&input);
    let bytes: [u8; 4] = hash.as_bytes()[0..4].try_into().unwrap();
    u32::from_le_bytes(bytes)
}

/// Creates an RNG for a specific component of a session.
pub fn create_component_rng(base_seed: u32, key: &str) -> Pcg32 {
    create_rng(derive_component_seed(base_seed, key))
}
