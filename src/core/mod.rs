//! Core deterministic primitives.
//!
//! Value types, the seeded PRNG, state hashing and the simulation
//! constants.

pub mod vec2;
pub mod rng;
pub mod hash;
pub mod consts;

// Re-export core types
pub use vec2::Vector2D;
pub use rng::DeterministicRng;
pub use hash::{StateHash, StateHasher, compute_state_hash};
