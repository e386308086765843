//! # Asteroid Arena
//!
//! Deterministic per-frame simulation of an asteroids-style arena: a ship,
//! asteroids that split, comets that turn into aliens, aliens that shoot and
//! burst, levels and scoring.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      ASTEROID ARENA                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── vec2.rs     - 2D vector                                 │
//! │  ├── rng.rs      - Seeded Xorshift128+ PRNG                  │
//! │  ├── hash.rs     - State hashing for verification            │
//! │  └── consts.rs   - Simulation constants                      │
//! │                                                              │
//! │  game/           - Game logic (deterministic)                │
//! │  ├── entity.rs   - Shared body, wrap-around                  │
//! │  ├── enemy.rs    - Asteroid / alien / bullet variants        │
//! │  ├── spaceship.rs- The player                                │
//! │  ├── state.rs    - GameManager session aggregate             │
//! │  ├── tick.rs     - Per-frame update                          │
//! │  └── snapshot.rs - Client-facing projection                  │
//! │                                                              │
//! │  replay/         - Transcripts and replay verification       │
//! │  session/        - Concurrent session registry (async)       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism
//!
//! The `core/` and `game/` modules are deterministic:
//! - No HashMap (BTreeMap and insertion-ordered pools only)
//! - No system time dependencies; time only advances through `dt`
//! - All randomness from one seeded Xorshift128+ per session
//!
//! Given the same seed, difficulty, level table and `(dt, inputs)` log, a
//! session reaches bit-identical state on the same platform.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;
pub mod replay;
pub mod session;

// Re-export commonly used types
pub use crate::core::vec2::Vector2D;
pub use crate::core::rng::DeterministicRng;
pub use crate::game::difficulty::Difficulty;
pub use crate::game::input::Input;
pub use crate::game::snapshot::WorldSnapshot;
pub use crate::game::state::GameManager;
pub use crate::game::tick::TickResult;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Nominal client frame rate (Hz)
pub const FRAME_RATE: u32 = 60;
