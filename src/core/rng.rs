//! Deterministic Random Number Generator
//!
//! Xorshift128+ seeded through SplitMix64. One generator per session; the
//! same seed always yields the same draws.

use serde::{Serialize, Deserialize};
use sha2::{Sha256, Digest};
use std::f64::consts::TAU;

use super::vec2::Vector2D;

/// Deterministic PRNG using Xorshift128+ algorithm.
///
/// Every random draw in a session (spawn positions, asteroid drift,
/// alien paths) goes through one of these, so a session replays exactly
/// from its seed and input log.
///
/// # Example
///
/// ```
/// use asteroid_arena::core::rng::DeterministicRng;
///
/// let mut a = DeterministicRng::new(12345);
/// let mut b = DeterministicRng::new(12345);
/// assert_eq!(a.next_u64(), b.next_u64());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeterministicRng {
    state: [u64; 2],
}

impl Default for DeterministicRng {
    fn default() -> Self {
        Self::new(0)
    }
}

impl DeterministicRng {
    /// Create a new RNG from a 64-bit seed.
    ///
    /// Uses SplitMix64 to initialize the internal state, ensuring
    /// good distribution even from weak seeds.
    pub fn new(seed: u64) -> Self {
        let mut s = seed;
        let state0 = splitmix64(&mut s);
        let state1 = splitmix64(&mut s);

        // Ensure state is never all zeros
        let state = if state0 == 0 && state1 == 0 {
            [1, 1]
        } else {
            [state0, state1]
        };

        Self { state }
    }

    /// Generate the next 64-bit random value.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        let s0 = self.state[0];
        let mut s1 = self.state[1];
        let result = s0.wrapping_add(s1);

        s1 ^= s0;
        self.state[0] = s0.rotate_left(24) ^ s1 ^ (s1 << 16);
        self.state[1] = s1.rotate_left(37);

        result
    }

    /// Generate a float in range [0, 1).
    ///
    /// Uses the upper 53 bits so every output is exactly representable.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Generate a float in range [min, max).
    #[inline]
    pub fn next_f64_range(&mut self, min: f64, max: f64) -> f64 {
        if min >= max {
            return min;
        }
        min + self.next_f64() * (max - min)
    }

    /// Generate a float in range [-1, 1).
    #[inline]
    pub fn next_signed_unit(&mut self) -> f64 {
        self.next_f64() * 2.0 - 1.0
    }

    /// Either `1.0` or `-1.0` with equal probability.
    #[inline]
    pub fn next_sign(&mut self) -> f64 {
        if self.next_u64() >> 63 == 0 {
            1.0
        } else {
            -1.0
        }
    }

    /// Generate a random angle in [0, 2π).
    #[inline]
    pub fn random_angle(&mut self) -> f64 {
        self.next_f64() * TAU
    }

    /// Generate a random position inside a `width` x `height` screen.
    #[inline]
    pub fn random_position(&mut self, width: f64, height: f64) -> Vector2D {
        let x = self.next_f64() * width;
        let y = self.next_f64() * height;
        Vector2D::new(x, y)
    }

    /// Random vector with each component in [-magnitude, magnitude).
    #[inline]
    pub fn random_jitter(&mut self, magnitude: f64) -> Vector2D {
        let x = self.next_signed_unit() * magnitude;
        let y = self.next_signed_unit() * magnitude;
        Vector2D::new(x, y)
    }

    /// Raw generator state, folded into the world hash.
    pub fn state(&self) -> [u64; 2] {
        self.state
    }
}

/// SplitMix64 for seed initialization.
/// Produces well-distributed values from sequential seeds.
#[inline]
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

/// Derive a session seed from the session's owner and a registry nonce.
///
/// Two sessions for the same owner get distinct seeds as long as the
/// nonce differs; the same `(username, profile, nonce)` always yields
/// the same seed.
pub fn derive_session_seed(username: &str, profile: &str, nonce: u64) -> u64 {
    let mut hasher = Sha256::new();

    // Domain separator
    hasher.update(b"ASTEROID_ARENA_SEED_V1");

    // Length-prefix each field so ("ab", "c") and ("a", "bc") differ
    hasher.update((username.len() as u64).to_le_bytes());
    hasher.update(username.as_bytes());
    hasher.update((profile.len() as u64).to_le_bytes());
    hasher.update(profile.as_bytes());
    hasher.update(nonce.to_le_bytes());

    let hash = hasher.finalize();

    let mut seed = [0u8; 8];
    seed.copy_from_slice(&hash[0..8]);
    u64::from_le_bytes(seed)
}

// =============================================================================
// TESTS
// =============================================================================
