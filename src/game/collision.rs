//! Collision Detection
//!
//! Pure queries over the entity pools. Resolution (damage, scoring,
//! removal) happens in the tick.

use crate::game::bullet::Bullet;
use crate::game::enemy::Enemy;
use crate::game::pool::{EntityPool, Handle};
use crate::game::spaceship::Spaceship;

/// First live enemy, in pool order, that `bullet` overlaps.
pub fn first_enemy_hit(bullet: &Bullet, enemies: &EntityPool<Enemy>) -> Option<Handle> {
    enemies.handles().into_iter().find(|&handle| {
        enemies
            .get(handle)
            .is_some_and(|enemy| bullet.body.collides_with(enemy.body()))
    })
}

/// Every live enemy touching the player, in pool order.
pub fn enemies_touching_player(player: &Spaceship, enemies: &EntityPool<Enemy>) -> Vec<Handle> {
    enemies
        .handles()
        .into_iter()
        .filter(|&handle| {
            enemies
                .get(handle)
                .is_some_and(|enemy| player.body.collides_with(enemy.body()))
        })
        .collect()
}
