//! State Hashing for Verification
//!
//! Provides deterministic hashing of world state for:
//! - Replay validation (transcript checkpoints)
//! - Detecting accidental mutation (zero-dt steps must not change the hash)

use sha2::{Sha256, Digest};
use super::vec2::Vector2D;

/// Hash output type (256 bits / 32 bytes)
pub type StateHash = [u8; 32];

/// Deterministic hasher for world state.
///
/// Wraps SHA-256 with helpers for the engine's value types.
/// Order of updates is critical for determinism.
pub struct StateHasher {
    hasher: Sha256,
}

impl StateHasher {
    /// Create a new hasher with domain separator.
    pub fn new(domain: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(domain);
        Self { hasher }
    }

    /// Create hasher for world state.
    pub fn for_world_state() -> Self {
        Self::new(b"ASTEROID_ARENA_STATE_V1")
    }

    /// Update with a u8 value.
    #[inline]
    pub fn update_u8(&mut self, value: u8) {
        self.hasher.update([value]);
    }

    /// Update with a u32 value (little-endian).
    #[inline]
    pub fn update_u32(&mut self, value: u32) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with a u64 value (little-endian).
    #[inline]
    pub fn update_u64(&mut self, value: u64) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with an f64 value (raw IEEE-754 bits, little-endian).
    #[inline]
    pub fn update_f64(&mut self, value: f64) {
        self.update_u64(value.to_bits());
    }

    /// Update with a Vector2D.
    #[inline]
    pub fn update_vec2(&mut self, value: Vector2D) {
        self.update_f64(value.x);
        self.update_f64(value.y);
    }

    /// Update with a boolean.
    #[inline]
    pub fn update_bool(&mut self, value: bool) {
        self.update_u8(value as u8);
    }

    /// Finalize and return the hash.
    pub fn finalize(self) -> StateHash {
        self.hasher.finalize().into()
    }
}

/// Hash a session: frame counter and RNG state, then whatever `add_state`
/// feeds in.
pub fn compute_state_hash<F>(frame: u64, rng_state: [u64; 2], add_state: F) -> StateHash
where
    F: FnOnce(&mut StateHasher),
{
    let mut hasher = StateHasher::for_world_state();

    hasher.update_u64(frame);
    hasher.update_u64(rng_state[0]);
    hasher.update_u64(rng_state[1]);

    add_state(&mut hasher);

    hasher.finalize()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn hash_of(f: impl FnOnce(&mut StateHasher)) -> StateHash {
        let mut hasher = StateHasher::new(b"test");
        f(&mut hasher);
        hasher.finalize()
    }

    #[test]
    fn test_repeatable() {
        let fill = |h: &mut StateHasher| {
            h.update_u32(7);
            h.update_vec2(Vector2D::new(1.5, -2.0));
            h.update_bool(true);
        };
        assert_eq!(hash_of(fill), hash_of(fill));
    }

    #[test]
    fn test_field_order_changes_hash() {
        let xy = hash_of(|h| h.update_vec2(Vector2D::new(3.0, 4.0)));
        let yx = hash_of(|h| h.update_vec2(Vector2D::new(4.0, 3.0)));
        assert_ne!(xy, yx);
    }

    #[test]
    fn test_domain_separates() {
        let a = StateHasher::new(b"one").finalize();
        let b = StateHasher::new(b"two").finalize();
        assert_ne!(a, b);
    }

    #[test]
    fn test_signed_zero_is_distinct() {
        // Bit-level hashing: -0.0 and 0.0 are different states
        assert_ne!(hash_of(|h| h.update_f64(0.0)), hash_of(|h| h.update_f64(-0.0)));
    }

    #[test]
    fn test_frame_and_rng_prefix() {
        let base = compute_state_hash(10, [1, 2], |h| h.update_u8(3));
        assert_eq!(base, compute_state_hash(10, [1, 2], |h| h.update_u8(3)));
        assert_ne!(base, compute_state_hash(11, [1, 2], |h| h.update_u8(3)));
        assert_ne!(base, compute_state_hash(10, [2, 1], |h| h.update_u8(3)));
    }
}
