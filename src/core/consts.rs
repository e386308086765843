//! Simulation Constants
//!
//! Every tunable number the engine uses. Positions and distances are in
//! screen units, times in seconds, angles in radians.

// =============================================================================
// SCREEN
// =============================================================================

/// Screen width (positions wrap to `[0, SCREEN_WIDTH)`)
pub const SCREEN_WIDTH: f64 = 1000.0;

/// Screen height (positions wrap to `[0, SCREEN_HEIGHT)`)
pub const SCREEN_HEIGHT: f64 = 1000.0;

// =============================================================================
// BULLETS
// =============================================================================

/// Max player bullets alive at once; extra shots are dropped
pub const MAX_BULLETS: usize = 10;

/// Seconds a bullet lives before despawning
pub const BULLET_LIFETIME: f64 = 2.0;

/// Bullet speed (units/s)
pub const BULLET_SPEED: f64 = 500.0;

/// Bullet hitbox radius
pub const BULLET_RADIUS: f64 = 5.0;

/// Base damage of every bullet (scaled by difficulty for player shots)
pub const BULLET_DAMAGE: u32 = 1;

// =============================================================================
// SPAWNING
// =============================================================================

/// Enemies never spawn closer than this to the player
pub const PROTECTED_DISTANCE: f64 = 300.0;

/// Placement attempts before settling for the last sample
pub const SPAWN_ATTEMPTS: u32 = 1000;

/// Per-axis cap on random asteroid velocity
pub const MAX_ASTEROID_SPEED: f64 = 100.0;

/// Comets drift this much faster than asteroids
pub const COMET_SPEED_FACTOR: f64 = 2.0;

// =============================================================================
// SCORING
// =============================================================================

/// Points for destroying an asteroid or comet (before level/difficulty scaling)
pub const SCORE_PER_ASTEROID: u64 = 10;

/// Points for destroying an alien
pub const SCORE_PER_ALIEN: u64 = 50;

/// Bonus for clearing a level
pub const SCORE_PER_LEVEL: u64 = 100;

// =============================================================================
// PLAYER SHIP
// =============================================================================

/// Thrust acceleration (units/s²)
pub const SHIP_ACCEL: f64 = 500.0;

/// Linear drag coefficient (per second)
pub const SHIP_DRAG: f64 = 1.0;

/// Turn rate (rad/s)
pub const SHIP_ROT_SPEED: f64 = 5.0;

/// Lives at session start
pub const SHIP_LIVES: u32 = 3;

/// Seconds of invincibility after a non-fatal hit
pub const INVINCIBILITY_WINDOW: f64 = 3.0;

/// Ship outline as `(offset_x, offset_y, radius)` relative to the ship center
pub const SHIP_HITBOXES: [(f64, f64, f64); 6] = [
    (0.0, 0.0, 15.0),
    (-10.0, 10.0, 15.0),
    (-10.0, -10.0, 15.0),
    (-23.0, -23.0, 3.0),
    (-23.0, 23.0, 3.0),
    (20.0, 0.0, 3.0),
];

// =============================================================================
// ALIEN
// =============================================================================

/// Alien starting health
pub const ALIEN_HEALTH: u32 = 15;

/// Alien hitbox radius
pub const ALIEN_RADIUS: f64 = 25.0;

/// Seconds between aimed shots
pub const ALIEN_SHOOT_INTERVAL: f64 = 3.0;

/// Seconds of patrol before the alien starts charging
pub const ALIEN_EXPLODE_INTERVAL: f64 = 15.0;

/// Seconds spent charging before the burst fires
pub const ALIEN_CHARGE_TIME: f64 = 3.0;

/// Angular ratio ω of the patrol ellipse
pub const PATH_OMEGA: f64 = 2.5;

/// Smallest patrol radius magnitude
pub const PATH_RADIUS_MIN: f64 = 25.0;

/// Largest patrol radius magnitude
pub const PATH_RADIUS_MAX: f64 = 350.0;

// =============================================================================
// LEVELS
// =============================================================================

/// Highest level an external level table may describe
pub const LEVEL_TABLE_MAX: u32 = 22;

/// Most enemies one external level entry may spawn
pub const LEVEL_ENEMY_LIMIT: u32 = 200;
