//! Bullets
//!
//! Fired by the player (kept in the player bullet pool) and by aliens
//! (kept in the enemy pool, where they can themselves be shot down).

use serde::{Serialize, Deserialize};

use crate::core::consts::{BULLET_LIFETIME, BULLET_RADIUS, BULLET_SPEED};
use crate::core::hash::StateHasher;
use crate::core::vec2::Vector2D;
use crate::game::entity::Body;

/// Health of every bullet
pub const BULLET_HEALTH: u32 = 1;

/// A straight-flying projectile with a limited lifetime.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    /// Physical body
    pub body: Body,
    /// Remaining health (a bullet dies to any hit)
    pub health: u32,
    /// Seconds this bullet has been flying
    pub time_alive: f64,
    /// Base damage dealt on impact
    pub damage: u32,
}

impl Bullet {
    /// Fire from `position` along `orientation` (radians).
    pub fn new(position: Vector2D, orientation: f64, damage: u32) -> Self {
        let velocity = Vector2D::from_angle(orientation) * BULLET_SPEED;
        let mut body = Body::circle(position, velocity, BULLET_RADIUS);
        body.set_orientation(orientation);

        Self {
            body,
            health: BULLET_HEALTH,
            time_alive: 0.0,
            damage,
        }
    }

    /// Fire from `position` toward `direction` (need not be normalized).
    pub fn toward(position: Vector2D, direction: Vector2D, damage: u32) -> Self {
        Self::new(position, direction.angle(), damage)
    }

    /// Fly for `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.body.advance(dt);
        self.time_alive += dt;
    }

    /// Past its lifetime and due for despawn.
    #[inline]
    pub fn is_expired(&self) -> bool {
        self.time_alive > BULLET_LIFETIME
    }

    pub(crate) fn hash_into(&self, hasher: &mut StateHasher) {
        self.body.hash_into(hasher);
        hasher.update_u32(self.health);
        hasher.update_f64(self.time_alive);
        hasher.update_u32(self.damage);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_bullet_velocity_follows_orientation() {
        let bullet = Bullet::new(Vector2D::new(500.0, 500.0), FRAC_PI_2, 1);
        assert!(bullet.body.velocity.approx_eq(Vector2D::new(0.0, BULLET_SPEED), 1e-9));
        assert_eq!(bullet.body.hitboxes()[0].radius, BULLET_RADIUS);
    }

    #[test]
    fn test_toward_uses_atan2() {
        let bullet = Bullet::toward(Vector2D::new(100.0, 100.0), Vector2D::new(-3.0, 0.0), 1);
        assert!((bullet.body.orientation() - PI).abs() < 1e-12);
        assert!(bullet.body.velocity.approx_eq(Vector2D::new(-BULLET_SPEED, 0.0), 1e-9));
    }

    #[test]
    fn test_lifetime() {
        let mut bullet = Bullet::new(Vector2D::new(500.0, 500.0), 0.0, 1);
        bullet.advance(1.0);
        bullet.advance(1.0);
        // Exactly at the lifetime is still alive
        assert!(!bullet.is_expired());
        bullet.advance(0.01);
        assert!(bullet.is_expired());
    }

    #[test]
    fn test_advance_wraps() {
        let mut bullet = Bullet::new(Vector2D::new(990.0, 500.0), 0.0, 1);
        bullet.advance(0.1);
        assert!(bullet.body.position().approx_eq(Vector2D::new(40.0, 500.0), 1e-9));
    }
}
