//! Spawnable Entity Body
//!
//! The physical part shared by every simulated object: a wrapped position,
//! a velocity, an orientation and a rigid set of hitbox circles.
//!
//! ## Hitbox rigidity
//!
//! Hitbox centers are stored as absolute positions. Moving the body
//! translates every center by the same delta the position moved (including
//! the jump across a screen edge), so local offsets never drift. Rotation
//! spins each center around the body position.

use std::f64::consts::TAU;
use serde::{Serialize, Deserialize};

use crate::core::consts::{SCREEN_WIDTH, SCREEN_HEIGHT};
use crate::core::hash::StateHasher;
use crate::core::vec2::Vector2D;
use crate::game::hitbox::HitBox;

/// Wrap a coordinate into `[0, max)`.
#[inline]
pub fn wrap_coordinate(value: f64, max: f64) -> f64 {
    let wrapped = value.rem_euclid(max);
    // rem_euclid can round up to exactly `max` for tiny negative inputs
    if wrapped >= max {
        0.0
    } else {
        wrapped
    }
}

/// Wrap a point onto the toroidal screen.
#[inline]
pub fn wrap_position(position: Vector2D) -> Vector2D {
    Vector2D::new(
        wrap_coordinate(position.x, SCREEN_WIDTH),
        wrap_coordinate(position.y, SCREEN_HEIGHT),
    )
}

/// Normalize an angle into `[0, 2π)`.
#[inline]
pub fn normalize_angle(radians: f64) -> f64 {
    wrap_coordinate(radians, TAU)
}

/// Position, motion and hitboxes of one entity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Body {
    position: Vector2D,
    orientation: f64,
    hitboxes: Vec<HitBox>,

    /// Velocity (units/s), independent of orientation
    pub velocity: Vector2D,
}

impl Body {
    /// Create a body at `position` (wrapped) facing angle 0.
    ///
    /// `shape` lists `(offset, radius)` pairs relative to the position.
    pub fn new(position: Vector2D, velocity: Vector2D, shape: &[(Vector2D, f64)]) -> Self {
        let position = wrap_position(position);
        let hitboxes = shape
            .iter()
            .map(|&(offset, radius)| HitBox::new(position + offset, radius))
            .collect();

        Self {
            position,
            orientation: 0.0,
            hitboxes,
            velocity,
        }
    }

    /// Create a body with a single hitbox centered on the position.
    pub fn circle(position: Vector2D, velocity: Vector2D, radius: f64) -> Self {
        Self::new(position, velocity, &[(Vector2D::ZERO, radius)])
    }

    /// Current position, always inside the screen.
    #[inline]
    pub fn position(&self) -> Vector2D {
        self.position
    }

    /// Current orientation in `[0, 2π)`.
    #[inline]
    pub fn orientation(&self) -> f64 {
        self.orientation
    }

    /// Hitbox circles in construction order.
    #[inline]
    pub fn hitboxes(&self) -> &[HitBox] {
        &self.hitboxes
    }

    /// Move to `position` (wrapped), dragging every hitbox by the same delta.
    pub fn set_position(&mut self, position: Vector2D) {
        let wrapped = wrap_position(position);
        let delta = wrapped - self.position;
        for hitbox in &mut self.hitboxes {
            hitbox.translate(delta);
        }
        self.position = wrapped;
    }

    /// Advance position by `velocity * dt`.
    #[inline]
    pub fn advance(&mut self, dt: f64) {
        self.set_position(self.position + self.velocity * dt);
    }

    /// Set the orientation without touching hitboxes.
    ///
    /// Only meaningful for bodies whose hitboxes sit on the position
    /// (bullets, asteroids); shaped bodies turn with `rotate`.
    pub fn set_orientation(&mut self, radians: f64) {
        self.orientation = normalize_angle(radians);
    }

    /// Turn by `radians`: orientation first, then every hitbox around the position.
    pub fn rotate(&mut self, radians: f64) {
        self.orientation = normalize_angle(self.orientation + radians);
        let pivot = self.position;
        for hitbox in &mut self.hitboxes {
            hitbox.rotate_around(pivot, radians);
        }
    }

    /// True iff any circle of `self` overlaps any circle of `other`.
    pub fn collides_with(&self, other: &Body) -> bool {
        self.hitboxes
            .iter()
            .any(|a| other.hitboxes.iter().any(|b| a.overlaps(b)))
    }

    /// Offsets of each hitbox from the position.
    pub fn local_offsets(&self) -> Vec<Vector2D> {
        self.hitboxes
            .iter()
            .map(|hb| hb.center - self.position)
            .collect()
    }

    /// Feed this body into a state hash.
    pub fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_vec2(self.position);
        hasher.update_vec2(self.velocity);
        hasher.update_f64(self.orientation);
        hasher.update_u32(self.hitboxes.len() as u32);
        for hitbox in &self.hitboxes {
            hasher.update_vec2(hitbox.center);
            hasher.update_f64(hitbox.radius);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn shaped() -> Body {
        Body::new(
            Vector2D::new(500.0, 500.0),
            Vector2D::ZERO,
            &[(Vector2D::ZERO, 15.0), (Vector2D::new(20.0, 0.0), 3.0)],
        )
    }

    #[test]
    fn test_wrap_coordinate() {
        assert_eq!(wrap_coordinate(1005.0, 1000.0), 5.0);
        assert_eq!(wrap_coordinate(-5.0, 1000.0), 995.0);
        assert_eq!(wrap_coordinate(1000.0, 1000.0), 0.0);
        assert_eq!(wrap_coordinate(-2500.0, 1000.0), 500.0);

        let tiny = wrap_coordinate(-1e-17, 1000.0);
        assert!((0.0..1000.0).contains(&tiny));
    }

    #[test]
    fn test_new_body_wraps_and_places_hitboxes() {
        let body = Body::new(
            Vector2D::new(1010.0, -10.0),
            Vector2D::ZERO,
            &[(Vector2D::new(5.0, 0.0), 1.0)],
        );
        assert_eq!(body.position(), Vector2D::new(10.0, 990.0));
        assert_eq!(body.hitboxes()[0].center, Vector2D::new(15.0, 990.0));
    }

    #[test]
    fn test_set_position_drags_hitboxes_across_wrap() {
        let mut body = shaped();
        body.set_position(Vector2D::new(1003.0, 500.0));

        assert!(body.position().approx_eq(Vector2D::new(3.0, 500.0), 1e-9));
        let offsets = body.local_offsets();
        assert!(offsets[0].approx_eq(Vector2D::ZERO, 1e-9));
        assert!(offsets[1].approx_eq(Vector2D::new(20.0, 0.0), 1e-9));
    }

    #[test]
    fn test_rotate_orientation_and_hitboxes() {
        let mut body = shaped();
        body.rotate(FRAC_PI_2);

        assert!((body.orientation() - FRAC_PI_2).abs() < 1e-12);
        let nose = body.local_offsets()[1];
        assert!(nose.approx_eq(Vector2D::new(0.0, 20.0), 1e-9));
    }

    #[test]
    fn test_rotate_negative_stays_in_range() {
        let mut body = shaped();
        body.rotate(-FRAC_PI_2);
        assert!((body.orientation() - 3.0 * FRAC_PI_2).abs() < 1e-12);
        assert!(body.orientation() < TAU);
    }

    #[test]
    fn test_full_turn_restores_offsets() {
        let mut body = shaped();
        let before = body.local_offsets();

        body.rotate(PI / 3.0);
        body.set_position(Vector2D::new(-40.0, 1200.0));
        body.rotate(PI);
        body.rotate(2.0 * PI / 3.0);

        for (a, b) in before.iter().zip(body.local_offsets()) {
            assert!(a.approx_eq(b, 1e-9));
        }
    }

    #[test]
    fn test_collides_with() {
        let a = Body::circle(Vector2D::new(100.0, 100.0), Vector2D::ZERO, 10.0);
        let near = Body::circle(Vector2D::new(115.0, 100.0), Vector2D::ZERO, 10.0);
        let far = Body::circle(Vector2D::new(130.0, 100.0), Vector2D::ZERO, 10.0);

        assert!(a.collides_with(&near));
        assert!(!a.collides_with(&far));
    }

    #[test]
    fn test_advance() {
        let mut body = Body::circle(Vector2D::new(995.0, 10.0), Vector2D::new(100.0, -200.0), 5.0);
        body.advance(0.1);
        assert!(body.position().approx_eq(Vector2D::new(5.0, 990.0), 1e-9));
        assert!(body.hitboxes()[0].center.approx_eq(body.position(), 1e-9));
    }
}
