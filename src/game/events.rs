//! Game Events
//!
//! Events generated during a step, for logging, clients and replay checks.

use serde::{Serialize, Deserialize};
use crate::game::asteroid::AsteroidSize;
use crate::game::enemy::EnemyType;

/// Game event data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEventData {
    /// An enemy reached zero health (or was shot down, for bullets)
    EnemyDestroyed {
        enemy_type: EnemyType,
        points: u64,
    },

    /// An asteroid broke into smaller pieces
    AsteroidSplit {
        from: AsteroidSize,
        children: AsteroidSize,
    },

    /// A destroyed comet became an alien
    CometTransformed,

    /// The player lost a life
    PlayerHit {
        lives_remaining: u32,
    },

    /// Enemy collection emptied
    LevelCompleted {
        level: u32,
        bonus: u64,
    },

    /// New wave spawned
    LevelStarted {
        level: u32,
        asteroids: u32,
        comets: u32,
        aliens: u32,
    },

    /// Player ran out of lives
    SessionEnded {
        score: u64,
        level: u32,
    },
}

/// A game event stamped with the frame it happened in.
///
/// Events of one step are listed in the order the step produced them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Frame when event occurred
    pub frame: u64,

    /// Event data
    pub data: GameEventData,
}

impl GameEvent {
    /// Create a new event.
    pub fn new(frame: u64, data: GameEventData) -> Self {
        Self { frame, data }
    }

    /// Create enemy destroyed event.
    pub fn enemy_destroyed(frame: u64, enemy_type: EnemyType, points: u64) -> Self {
        Self::new(frame, GameEventData::EnemyDestroyed { enemy_type, points })
    }

    /// Create asteroid split event.
    pub fn asteroid_split(frame: u64, from: AsteroidSize, children: AsteroidSize) -> Self {
        Self::new(frame, GameEventData::AsteroidSplit { from, children })
    }

    /// Create comet transformed event.
    pub fn comet_transformed(frame: u64) -> Self {
        Self::new(frame, GameEventData::CometTransformed)
    }

    /// Create player hit event.
    pub fn player_hit(frame: u64, lives_remaining: u32) -> Self {
        Self::new(frame, GameEventData::PlayerHit { lives_remaining })
    }

    /// Create level completed event.
    pub fn level_completed(frame: u64, level: u32, bonus: u64) -> Self {
        Self::new(frame, GameEventData::LevelCompleted { level, bonus })
    }

    /// Create level started event.
    pub fn level_started(frame: u64, level: u32, asteroids: u32, comets: u32, aliens: u32) -> Self {
        Self::new(frame, GameEventData::LevelStarted { level, asteroids, comets, aliens })
    }

    /// Create session ended event.
    pub fn session_ended(frame: u64, score: u64, level: u32) -> Self {
        Self::new(frame, GameEventData::SessionEnded { score, level })
    }
}
