//! Player Spaceship
//!
//! Input-driven physics (thrust, turning, linear drag), lives, and the
//! invincibility window after a hit.

use serde::{Serialize, Deserialize};

use crate::core::consts::{
    BULLET_DAMAGE, INVINCIBILITY_WINDOW, SCREEN_HEIGHT, SCREEN_WIDTH,
    SHIP_ACCEL, SHIP_DRAG, SHIP_HITBOXES, SHIP_LIVES, SHIP_ROT_SPEED,
};
use crate::core::hash::StateHasher;
use crate::core::vec2::Vector2D;
use crate::game::bullet::Bullet;
use crate::game::entity::Body;
use crate::game::input::Input;

/// The player's ship.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Spaceship {
    /// Physical body (six-circle outline)
    pub body: Body,
    /// Remaining lives
    pub lives: u32,
    /// Seconds of invincibility left
    pub invincible_timer: f64,
}

impl Default for Spaceship {
    fn default() -> Self {
        Self::new()
    }
}

impl Spaceship {
    /// Ship at screen center, at rest, facing angle 0, with full lives.
    pub fn new() -> Self {
        let center = Vector2D::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0);
        let shape: Vec<(Vector2D, f64)> = SHIP_HITBOXES
            .iter()
            .map(|&(x, y, radius)| (Vector2D::new(x, y), radius))
            .collect();

        Self {
            body: Body::new(center, Vector2D::ZERO, &shape),
            lives: SHIP_LIVES,
            invincible_timer: 0.0,
        }
    }

    /// Apply one frame of inputs and move.
    ///
    /// Commands apply in order (each `Thrust` uses the heading at that
    /// point); drag applies once afterwards. `Fire` is handled by the
    /// caller.
    pub fn advance(&mut self, dt: f64, inputs: &[Input]) {
        for input in inputs {
            match input {
                Input::Thrust => {
                    let push = Vector2D::from_angle(self.body.orientation()) * (SHIP_ACCEL * dt);
                    self.body.velocity += push;
                }
                Input::TurnLeft => self.body.rotate(-SHIP_ROT_SPEED * dt),
                Input::TurnRight => self.body.rotate(SHIP_ROT_SPEED * dt),
                Input::Fire => {}
            }
        }

        self.body.velocity = self.body.velocity * (1.0 - SHIP_DRAG * dt);
        self.body.advance(dt);

        self.invincible_timer = (self.invincible_timer - dt).max(0.0);
    }

    /// Register a collision.
    ///
    /// Costs one life unless invincible. A non-fatal hit starts the
    /// invincibility window. Returns whether a life was lost.
    pub fn hit(&mut self) -> bool {
        if self.is_invincible() || self.lives == 0 {
            return false;
        }

        self.lives -= 1;
        if self.lives > 0 {
            self.invincible_timer = INVINCIBILITY_WINDOW;
        }
        true
    }

    /// Currently immune to hits.
    #[inline]
    pub fn is_invincible(&self) -> bool {
        self.invincible_timer > 0.0
    }

    /// No lives left.
    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.lives == 0
    }

    /// A bullet leaving the ship center along its heading.
    pub fn shoot(&self) -> Bullet {
        Bullet::new(self.body.position(), self.body.orientation(), BULLET_DAMAGE)
    }

    pub(crate) fn hash_into(&self, hasher: &mut StateHasher) {
        self.body.hash_into(hasher);
        hasher.update_u32(self.lives);
        hasher.update_f64(self.invincible_timer);
    }
}

// =============================================================================
// TESTS
// =============================================================================
