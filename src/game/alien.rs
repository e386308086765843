//! Aliens
//!
//! Patrol an elliptical path and attack in a fixed cycle:
//!
//! ```text
//! Patrolling ──(shot timer ≥ 3s)──▶ fire one aimed bullet ──▶ Patrolling
//!     │
//!     └──(explode timer ≥ 15s)──▶ Charging (frozen in place)
//!                                    │
//!                       (charge ≥ 3s)▼
//!                     burst of 8 bullets, new path ──▶ Patrolling
//! ```

use serde::{Serialize, Deserialize};

use crate::core::consts::{
    ALIEN_CHARGE_TIME, ALIEN_EXPLODE_INTERVAL, ALIEN_HEALTH, ALIEN_RADIUS,
    ALIEN_SHOOT_INTERVAL, BULLET_DAMAGE, PATH_OMEGA, PATH_RADIUS_MAX, PATH_RADIUS_MIN,
};
use crate::core::hash::StateHasher;
use crate::core::rng::DeterministicRng;
use crate::core::vec2::Vector2D;
use crate::game::bullet::Bullet;
use crate::game::entity::Body;

/// Burst directions: N, S, E, W, NE, NW, SE, SW.
const BURST_DIRECTIONS: [(f64, f64); 8] = [
    (0.0, 1.0),
    (0.0, -1.0),
    (1.0, 0.0),
    (-1.0, 0.0),
    (1.0, 1.0),
    (-1.0, 1.0),
    (1.0, -1.0),
    (-1.0, -1.0),
];

// =============================================================================
// PATH
// =============================================================================

/// Elliptical patrol path.
///
/// `x(t) = A·cos(t/ω) + (origin.x − A)`, `y(t) = B·sin(t/ω) + origin.y`,
/// so the path starts at `origin` when `t = 0`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Path {
    /// Where the alien stood when the path was drawn
    pub origin: Vector2D,
    /// Signed x radius
    pub radius_a: f64,
    /// Signed y radius
    pub radius_b: f64,
}

impl Path {
    /// Draw a path through `origin` with random radii.
    ///
    /// Each radius has magnitude in `[PATH_RADIUS_MIN, PATH_RADIUS_MAX)`
    /// and an independent random sign.
    pub fn random(origin: Vector2D, rng: &mut DeterministicRng) -> Self {
        let radius_a = rng.next_f64_range(PATH_RADIUS_MIN, PATH_RADIUS_MAX) * rng.next_sign();
        let radius_b = rng.next_f64_range(PATH_RADIUS_MIN, PATH_RADIUS_MAX) * rng.next_sign();
        Self { origin, radius_a, radius_b }
    }

    /// Unwrapped location `t` seconds along the path.
    pub fn location(&self, t: f64) -> Vector2D {
        let phase = t / PATH_OMEGA;
        Vector2D::new(
            self.radius_a * phase.cos() + (self.origin.x - self.radius_a),
            self.radius_b * phase.sin() + self.origin.y,
        )
    }
}

// =============================================================================
// ALIEN
// =============================================================================

/// A shooting enemy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Alien {
    /// Physical body
    pub body: Body,
    /// Remaining health
    pub health: u32,
    /// Current patrol path
    pub path: Path,
    /// Seconds travelled along `path`
    pub path_time: f64,
    /// Seconds since the last aimed shot
    pub time_since_shot: f64,
    /// Seconds since the last burst
    pub time_since_explode: f64,
    /// Seconds spent charging
    pub charge_time: f64,
    /// Frozen and charging a burst
    pub charging: bool,
}

impl Alien {
    /// Spawn an alien at `position` with a fresh random path.
    pub fn new(position: Vector2D, rng: &mut DeterministicRng) -> Self {
        let body = Body::circle(position, Vector2D::ZERO, ALIEN_RADIUS);
        let path = Path::random(body.position(), rng);

        Self {
            body,
            health: ALIEN_HEALTH,
            path,
            path_time: 0.0,
            time_since_shot: 0.0,
            time_since_explode: 0.0,
            charge_time: 0.0,
            charging: false,
        }
    }

    /// Patrol along the path, or sit still while charging.
    pub fn advance(&mut self, dt: f64) {
        if self.charging {
            self.charge_time += dt;
            return;
        }

        self.path_time += dt;
        self.body.set_position(self.path.location(self.path_time));
        self.time_since_shot += dt;
        self.time_since_explode += dt;
    }

    /// Start a new path from the current position.
    pub fn reset_path(&mut self, rng: &mut DeterministicRng) {
        self.path_time = 0.0;
        self.path = Path::random(self.body.position(), rng);
    }

    /// Run one step of the attack state machine.
    ///
    /// Returns the bullets fired this frame (0, 1 or 8).
    pub fn shoot(&mut self, player_position: Vector2D, rng: &mut DeterministicRng) -> Vec<Bullet> {
        if self.charging {
            return self.explode(rng);
        }

        if self.time_since_shot >= ALIEN_SHOOT_INTERVAL {
            self.time_since_shot = 0.0;
            let origin = self.body.position();
            return vec![Bullet::toward(origin, player_position - origin, BULLET_DAMAGE)];
        }

        if self.time_since_explode >= ALIEN_EXPLODE_INTERVAL {
            self.charging = true;
        }

        Vec::new()
    }

    fn explode(&mut self, rng: &mut DeterministicRng) -> Vec<Bullet> {
        if self.charge_time < ALIEN_CHARGE_TIME {
            return Vec::new();
        }

        self.charge_time = 0.0;
        self.time_since_explode = 0.0;
        self.time_since_shot = 0.0;
        self.charging = false;
        self.reset_path(rng);

        let origin = self.body.position();
        BURST_DIRECTIONS
            .iter()
            .map(|&(x, y)| Bullet::toward(origin, Vector2D::new(x, y), BULLET_DAMAGE))
            .collect()
    }

    pub(crate) fn hash_into(&self, hasher: &mut StateHasher) {
        self.body.hash_into(hasher);
        hasher.update_u32(self.health);
        hasher.update_vec2(self.path.origin);
        hasher.update_f64(self.path.radius_a);
        hasher.update_f64(self.path.radius_b);
        hasher.update_f64(self.path_time);
        hasher.update_f64(self.time_since_shot);
        hasher.update_f64(self.time_since_explode);
        hasher.update_f64(self.charge_time);
        hasher.update_bool(self.charging);
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn alien() -> (Alien, DeterministicRng) {
        let mut rng = DeterministicRng::new(42);
        let alien = Alien::new(Vector2D::new(200.0, 200.0), &mut rng);
        (alien, rng)
    }

    #[test]
    fn test_path_starts_at_origin() {
        let mut rng = DeterministicRng::new(1);
        let origin = Vector2D::new(300.0, 700.0);
        let path = Path::random(origin, &mut rng);
        assert!(path.location(0.0).approx_eq(origin, 1e-9));
    }

    #[test]
    fn test_path_radii_in_range() {
        let mut rng = DeterministicRng::new(99);
        for _ in 0..200 {
            let path = Path::random(Vector2D::ZERO, &mut rng);
            for r in [path.radius_a, path.radius_b] {
                assert!(r.abs() >= PATH_RADIUS_MIN && r.abs() < PATH_RADIUS_MAX);
            }
        }
    }

    #[test]
    fn test_aimed_shot_after_interval() {
        let (mut alien, mut rng) = alien();
        alien.advance(1.0);
        assert!(alien.shoot(Vector2D::new(500.0, 500.0), &mut rng).is_empty());

        alien.advance(2.0);
        let target = Vector2D::new(900.0, 100.0);
        let shots = alien.shoot(target, &mut rng);
        assert_eq!(shots.len(), 1);
        assert_eq!(alien.time_since_shot, 0.0);

        let expected = (target - alien.body.position()).angle();
        let got = shots[0].body.velocity.angle();
        assert!((expected - got).abs() < 1e-9);
    }

    #[test]
    fn test_charge_then_burst() {
        let (mut alien, mut rng) = alien();
        alien.time_since_explode = ALIEN_EXPLODE_INTERVAL;

        // Starting to charge fires nothing
        assert!(alien.shoot(Vector2D::ZERO, &mut rng).is_empty());
        assert!(alien.charging);

        // Frozen while charging
        let frozen_at = alien.body.position();
        alien.advance(2.0);
        assert_eq!(alien.body.position(), frozen_at);
        assert!(alien.shoot(Vector2D::ZERO, &mut rng).is_empty());

        alien.advance(1.0);
        let burst = alien.shoot(Vector2D::ZERO, &mut rng);
        assert_eq!(burst.len(), 8);
        assert!(!alien.charging);
        assert_eq!(alien.charge_time, 0.0);
        assert_eq!(alien.time_since_explode, 0.0);
        assert_eq!(alien.time_since_shot, 0.0);
        assert_eq!(alien.path_time, 0.0);
        assert_eq!(alien.path.origin, frozen_at);
        assert!(burst.iter().all(|b| b.body.position() == frozen_at));
    }

    #[test]
    fn test_shot_takes_priority_over_charge() {
        let (mut alien, mut rng) = alien();
        alien.time_since_shot = ALIEN_SHOOT_INTERVAL;
        alien.time_since_explode = ALIEN_EXPLODE_INTERVAL;

        assert_eq!(alien.shoot(Vector2D::ZERO, &mut rng).len(), 1);
        assert!(!alien.charging);
        assert!(alien.shoot(Vector2D::ZERO, &mut rng).is_empty());
        assert!(alien.charging);
    }
}
