//! Asteroids and Comets
//!
//! Drift in a straight line while spinning. Destroying a LARGE or MEDIUM
//! asteroid splits it; destroying a comet turns it into an alien.

use serde::{Serialize, Deserialize};

use crate::core::hash::StateHasher;
use crate::core::vec2::Vector2D;
use crate::game::entity::Body;

/// Asteroid size class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum AsteroidSize {
    /// 1 hp, radius 25, no children
    Small = 0,
    /// 5 hp, radius 50, splits into two SMALL
    Medium = 1,
    /// 10 hp, radius 100, splits into two MEDIUM
    Large = 2,
    /// 10 hp, radius 60, becomes an alien
    Comet = 3,
}

impl AsteroidSize {
    /// Starting health.
    pub fn health(self) -> u32 {
        match self {
            AsteroidSize::Small => 1,
            AsteroidSize::Medium => 5,
            AsteroidSize::Large => 10,
            AsteroidSize::Comet => 10,
        }
    }

    /// Hitbox radius.
    pub fn radius(self) -> f64 {
        match self {
            AsteroidSize::Small => 25.0,
            AsteroidSize::Medium => 50.0,
            AsteroidSize::Large => 100.0,
            AsteroidSize::Comet => 60.0,
        }
    }

    /// Size of the two children left behind, if any.
    pub fn split(self) -> Option<AsteroidSize> {
        match self {
            AsteroidSize::Large => Some(AsteroidSize::Medium),
            AsteroidSize::Medium => Some(AsteroidSize::Small),
            AsteroidSize::Small | AsteroidSize::Comet => None,
        }
    }

    /// Wire literal (`SMALL`, `MEDIUM`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            AsteroidSize::Small => "SMALL",
            AsteroidSize::Medium => "MEDIUM",
            AsteroidSize::Large => "LARGE",
            AsteroidSize::Comet => "COMET",
        }
    }
}

/// An asteroid or comet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Asteroid {
    /// Physical body
    pub body: Body,
    /// Remaining health
    pub health: u32,
    /// Size class (fixes health and radius)
    pub size: AsteroidSize,
    /// Spin (rad/s)
    pub rotational_velocity: f64,
}

impl Asteroid {
    /// Create an asteroid at full health for its size.
    pub fn new(
        position: Vector2D,
        velocity: Vector2D,
        orientation: f64,
        size: AsteroidSize,
        rotational_velocity: f64,
    ) -> Self {
        let mut body = Body::circle(position, velocity, size.radius());
        body.set_orientation(orientation);

        Self {
            body,
            health: size.health(),
            size,
            rotational_velocity,
        }
    }

    /// True for the COMET size.
    #[inline]
    pub fn is_comet(&self) -> bool {
        self.size == AsteroidSize::Comet
    }

    /// Drift then spin.
    pub fn advance(&mut self, dt: f64) {
        self.body.advance(dt);
        self.body.rotate(self.rotational_velocity * dt);
    }

    pub(crate) fn hash_into(&self, hasher: &mut StateHasher) {
        self.body.hash_into(hasher);
        hasher.update_u32(self.health);
        hasher.update_u8(self.size as u8);
        hasher.update_f64(self.rotational_velocity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_table() {
        assert_eq!(AsteroidSize::Small.health(), 1);
        assert_eq!(AsteroidSize::Medium.health(), 5);
        assert_eq!(AsteroidSize::Large.health(), 10);
        assert_eq!(AsteroidSize::Comet.health(), 10);

        assert_eq!(AsteroidSize::Small.radius(), 25.0);
        assert_eq!(AsteroidSize::Medium.radius(), 50.0);
        assert_eq!(AsteroidSize::Large.radius(), 100.0);
        assert_eq!(AsteroidSize::Comet.radius(), 60.0);
    }

    #[test]
    fn test_split_chain() {
        assert_eq!(AsteroidSize::Large.split(), Some(AsteroidSize::Medium));
        assert_eq!(AsteroidSize::Medium.split(), Some(AsteroidSize::Small));
        assert_eq!(AsteroidSize::Small.split(), None);
        assert_eq!(AsteroidSize::Comet.split(), None);
    }

    #[test]
    fn test_advance_moves_and_spins() {
        let mut asteroid = Asteroid::new(
            Vector2D::new(100.0, 100.0),
            Vector2D::new(10.0, 0.0),
            0.0,
            AsteroidSize::Large,
            0.5,
        );
        asteroid.advance(2.0);

        assert!(asteroid.body.position().approx_eq(Vector2D::new(120.0, 100.0), 1e-9));
        assert!((asteroid.body.orientation() - 1.0).abs() < 1e-12);
        assert!(asteroid.body.hitboxes()[0].center.approx_eq(asteroid.body.position(), 1e-9));
    }

    #[test]
    fn test_size_serializes_screaming() {
        assert_eq!(serde_json::to_string(&AsteroidSize::Large).unwrap(), "\"LARGE\"");
    }
}
