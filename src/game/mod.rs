//! Game Logic Module
//!
//! All simulation code. Deterministic given a seed and an input log.
//!
//! ## Module Structure
//!
//! - `hitbox`, `entity`: collision circles and the shared entity body
//! - `asteroid`, `alien`, `bullet`, `enemy`: the enemy variants
//! - `spaceship`: the player
//! - `difficulty`, `level`: per-session configuration
//! - `input`: player commands and wire parsing
//! - `pool`: entity storage with deferred removal/spawning
//! - `collision`: collision queries
//! - `state`: `GameManager`, the per-session aggregate
//! - `tick`: the per-frame step
//! - `snapshot`: client-facing projection
//! - `events`: events emitted by a step

pub mod hitbox;
pub mod entity;
pub mod asteroid;
pub mod alien;
pub mod bullet;
pub mod enemy;
pub mod spaceship;
pub mod difficulty;
pub mod level;
pub mod input;
pub mod pool;
pub mod collision;
pub mod events;
pub mod snapshot;
pub mod state;
pub mod tick;

// Re-export key types
pub use asteroid::{Asteroid, AsteroidSize};
pub use alien::Alien;
pub use bullet::Bullet;
pub use difficulty::Difficulty;
pub use enemy::{Enemy, EnemyType};
pub use events::{GameEvent, GameEventData};
pub use input::{FrameRecord, Input, parse_inputs};
pub use level::{LevelCounts, LevelTable};
pub use snapshot::WorldSnapshot;
pub use spaceship::Spaceship;
pub use state::{GameManager, SessionParams};
pub use tick::TickResult;
