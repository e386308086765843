//! Enemies
//!
//! Closed set of hostile entities sharing one collection. Dispatch is by
//! `match`; whether an enemy fires is a capability (`can_shoot`), not a
//! type check at the call site.

use serde::{Serialize, Deserialize};

use crate::core::hash::StateHasher;
use crate::core::rng::DeterministicRng;
use crate::core::vec2::Vector2D;
use crate::game::alien::Alien;
use crate::game::asteroid::{Asteroid, AsteroidSize};
use crate::game::bullet::Bullet;
use crate::game::entity::Body;

/// Enemy type tag as seen by clients.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum EnemyType {
    /// SMALL/MEDIUM/LARGE asteroid
    Asteroid = 0,
    /// Comet (asteroid of size COMET)
    Comet = 1,
    /// Alien shooter
    Alien = 2,
    /// Bullet fired by an alien
    Bullet = 3,
}

/// Any hostile entity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Enemy {
    /// Asteroid or comet
    Asteroid(Asteroid),
    /// Alien shooter
    Alien(Alien),
    /// Alien bullet
    Bullet(Bullet),
}

impl Enemy {
    /// Type tag (comets report `Comet`).
    pub fn enemy_type(&self) -> EnemyType {
        match self {
            Enemy::Asteroid(a) if a.is_comet() => EnemyType::Comet,
            Enemy::Asteroid(_) => EnemyType::Asteroid,
            Enemy::Alien(_) => EnemyType::Alien,
            Enemy::Bullet(_) => EnemyType::Bullet,
        }
    }

    /// Physical body.
    pub fn body(&self) -> &Body {
        match self {
            Enemy::Asteroid(a) => &a.body,
            Enemy::Alien(a) => &a.body,
            Enemy::Bullet(b) => &b.body,
        }
    }

    /// Remaining health.
    pub fn health(&self) -> u32 {
        match self {
            Enemy::Asteroid(a) => a.health,
            Enemy::Alien(a) => a.health,
            Enemy::Bullet(b) => b.health,
        }
    }

    fn health_mut(&mut self) -> &mut u32 {
        match self {
            Enemy::Asteroid(a) => &mut a.health,
            Enemy::Alien(a) => &mut a.health,
            Enemy::Bullet(b) => &mut b.health,
        }
    }

    /// Apply `amount` damage, flooring health at zero.
    /// Negative amounts are ignored.
    pub fn take_damage(&mut self, amount: i64) {
        if amount < 0 {
            return;
        }
        let amount = u32::try_from(amount).unwrap_or(u32::MAX);
        let health = self.health_mut();
        *health = health.saturating_sub(amount);
    }

    /// Health has reached zero.
    #[inline]
    pub fn is_dead(&self) -> bool {
        self.health() == 0
    }

    /// Size class, for asteroids and comets.
    pub fn asteroid_size(&self) -> Option<AsteroidSize> {
        match self {
            Enemy::Asteroid(a) => Some(a.size),
            _ => None,
        }
    }

    /// Move for `dt` seconds (already scaled by difficulty).
    pub fn advance(&mut self, dt: f64) {
        match self {
            Enemy::Asteroid(a) => a.advance(dt),
            Enemy::Alien(a) => a.advance(dt),
            Enemy::Bullet(b) => b.advance(dt),
        }
    }

    /// Has a shoot behavior.
    #[inline]
    pub fn can_shoot(&self) -> bool {
        matches!(self, Enemy::Alien(_))
    }

    /// Run the shoot behavior, if any. Non-shooters return nothing.
    pub fn shoot(&mut self, player_position: Vector2D, rng: &mut DeterministicRng) -> Vec<Bullet> {
        match self {
            Enemy::Alien(a) => a.shoot(player_position, rng),
            _ => Vec::new(),
        }
    }

    /// Alien bullet past its lifetime.
    #[inline]
    pub fn is_expired_bullet(&self) -> bool {
        matches!(self, Enemy::Bullet(b) if b.is_expired())
    }

    pub(crate) fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_u8(self.enemy_type() as u8);
        match self {
            Enemy::Asteroid(a) => a.hash_into(hasher),
            Enemy::Alien(a) => a.hash_into(hasher),
            Enemy::Bullet(b) => b.hash_into(hasher),
        }
    }
}

impl From<Asteroid> for Enemy {
    fn from(asteroid: Asteroid) -> Self {
        Enemy::Asteroid(asteroid)
    }
}

impl From<Alien> for Enemy {
    fn from(alien: Alien) -> Self {
        Enemy::Alien(alien)
    }
}

impl From<Bullet> for Enemy {
    fn from(bullet: Bullet) -> Self {
        Enemy::Bullet(bullet)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn large() -> Enemy {
        Asteroid::new(Vector2D::new(100.0, 100.0), Vector2D::ZERO, 0.0, AsteroidSize::Large, 0.0).into()
    }

    #[test]
    fn test_type_tags() {
        let comet: Enemy =
            Asteroid::new(Vector2D::ZERO, Vector2D::ZERO, 0.0, AsteroidSize::Comet, 0.0).into();
        let bullet: Enemy = Bullet::new(Vector2D::ZERO, 0.0, 1).into();
        let mut rng = DeterministicRng::new(3);
        let alien: Enemy = Alien::new(Vector2D::ZERO, &mut rng).into();

        assert_eq!(large().enemy_type(), EnemyType::Asteroid);
        assert_eq!(comet.enemy_type(), EnemyType::Comet);
        assert_eq!(alien.enemy_type(), EnemyType::Alien);
        assert_eq!(bullet.enemy_type(), EnemyType::Bullet);

        assert!(alien.can_shoot());
        assert!(!comet.can_shoot());
        assert!(!bullet.can_shoot());
    }

    #[test]
    fn test_take_damage_floor() {
        let mut enemy = large();
        enemy.take_damage(3);
        assert_eq!(enemy.health(), 7);

        enemy.take_damage(-5);
        assert_eq!(enemy.health(), 7);

        enemy.take_damage(100);
        assert_eq!(enemy.health(), 0);
        assert!(enemy.is_dead());

        enemy.take_damage(i64::MAX);
        assert_eq!(enemy.health(), 0);
    }

    #[test]
    fn test_non_shooter_shoot_is_empty() {
        let mut rng = DeterministicRng::new(1);
        let mut enemy = large();
        assert!(enemy.shoot(Vector2D::new(500.0, 500.0), &mut rng).is_empty());
    }

    #[test]
    fn test_enemy_type_serializes_screaming() {
        assert_eq!(serde_json::to_string(&EnemyType::Comet).unwrap(), "\"COMET\"");
        assert_eq!(serde_json::to_string(&EnemyType::Bullet).unwrap(), "\"BULLET\"");
    }
}
