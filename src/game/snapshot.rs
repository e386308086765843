//! World Snapshot
//!
//! Read-only projection of a session for the rendering client. Field
//! names and order are the client's wire format:
//!
//! ```text
//! {"player":{"position","orientation","hitbox","lives","is_invincible"},
//!  "enemies":[{"type","position","orientation","hitbox","size"?}],
//!  "bullets":[{"position","orientation","hitbox"}],
//!  "score","level","time","is_running"}
//! ```

use serde::{Serialize, Deserialize};

use crate::core::vec2::Vector2D;
use crate::game::asteroid::AsteroidSize;
use crate::game::bullet::Bullet;
use crate::game::enemy::{Enemy, EnemyType};
use crate::game::hitbox::HitBox;
use crate::game::spaceship::Spaceship;
use crate::game::state::GameManager;

/// Player as seen by the client.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    /// Ship center
    pub position: Vector2D,
    /// Heading (radians)
    pub orientation: f64,
    /// Outline circles
    pub hitbox: Vec<HitBox>,
    /// Remaining lives
    pub lives: u32,
    /// Currently immune
    pub is_invincible: bool,
}

impl From<&Spaceship> for PlayerView {
    fn from(ship: &Spaceship) -> Self {
        Self {
            position: ship.body.position(),
            orientation: ship.body.orientation(),
            hitbox: ship.body.hitboxes().to_vec(),
            lives: ship.lives,
            is_invincible: ship.is_invincible(),
        }
    }
}

/// Enemy as seen by the client.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    /// Type tag
    #[serde(rename = "type")]
    pub enemy_type: EnemyType,
    /// Center
    pub position: Vector2D,
    /// Heading (radians)
    pub orientation: f64,
    /// Collision circles
    pub hitbox: Vec<HitBox>,
    /// Size class, only for `ASTEROID` entries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<AsteroidSize>,
}

impl From<&Enemy> for EnemyView {
    fn from(enemy: &Enemy) -> Self {
        let enemy_type = enemy.enemy_type();
        let body = enemy.body();
        let size = match enemy_type {
            EnemyType::Asteroid => enemy.asteroid_size(),
            _ => None,
        };

        Self {
            enemy_type,
            position: body.position(),
            orientation: body.orientation(),
            hitbox: body.hitboxes().to_vec(),
            size,
        }
    }
}

/// Player bullet as seen by the client.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BulletView {
    /// Center
    pub position: Vector2D,
    /// Heading (radians)
    pub orientation: f64,
    /// Collision circle
    pub hitbox: Vec<HitBox>,
}

impl From<&Bullet> for BulletView {
    fn from(bullet: &Bullet) -> Self {
        Self {
            position: bullet.body.position(),
            orientation: bullet.body.orientation(),
            hitbox: bullet.body.hitboxes().to_vec(),
        }
    }
}

/// Full world state for one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    /// The ship
    pub player: PlayerView,
    /// Enemies in collection order (alien bullets included)
    pub enemies: Vec<EnemyView>,
    /// Player bullets in firing order
    pub bullets: Vec<BulletView>,
    /// Score
    pub score: u64,
    /// Current level (1-based)
    pub level: u32,
    /// Elapsed seconds while running
    pub time: f64,
    /// False once the player is out of lives
    pub is_running: bool,
}

impl WorldSnapshot {
    /// Project a session.
    pub fn capture(state: &GameManager) -> Self {
        Self {
            player: PlayerView::from(&state.player),
            enemies: state.enemies.iter().map(EnemyView::from).collect(),
            bullets: state.player_bullets.iter().map(BulletView::from).collect(),
            score: state.score,
            level: state.level,
            time: state.elapsed_time,
            is_running: state.running,
        }
    }

    /// Serialize to the client's JSON format.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::asteroid::Asteroid;
    use crate::game::difficulty::Difficulty;

    #[test]
    fn test_snapshot_field_order() {
        let state = GameManager::new(Difficulty::Medium, 7);
        let json = state.snapshot().to_json().unwrap();

        let keys = ["\"player\"", "\"enemies\"", "\"bullets\"", "\"score\"", "\"level\"", "\"time\"", "\"is_running\""];
        let positions: Vec<usize> = keys.iter().map(|k| json.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));

        assert!(json.contains("\"is_invincible\":false"));
        assert!(json.contains("\"lives\":3"));
    }

    #[test]
    fn test_size_only_on_asteroids() {
        let mut state = GameManager::new(Difficulty::Medium, 7);
        state.enemies.clear();
        state.enemies.push(
            Asteroid::new(Vector2D::new(100.0, 100.0), Vector2D::ZERO, 0.0, AsteroidSize::Large, 0.0).into(),
        );
        state.enemies.push(
            Asteroid::new(Vector2D::new(100.0, 800.0), Vector2D::ZERO, 0.0, AsteroidSize::Comet, 0.0).into(),
        );

        let snapshot = state.snapshot();
        assert_eq!(snapshot.enemies[0].size, Some(AsteroidSize::Large));
        assert_eq!(snapshot.enemies[1].enemy_type, EnemyType::Comet);
        assert_eq!(snapshot.enemies[1].size, None);

        let json = snapshot.to_json().unwrap();
        assert!(json.contains(r#""type":"ASTEROID""#));
        assert!(json.contains(r#""size":"LARGE""#));
        assert!(json.contains(r#""type":"COMET""#));
        assert_eq!(json.matches("\"size\"").count(), 1);
    }

    #[test]
    fn test_snapshot_is_stable() {
        let state = GameManager::new(Difficulty::Hard, 11);
        assert_eq!(state.snapshot().to_json().unwrap(), state.snapshot().to_json().unwrap());
    }
}
