//! Hitbox circles.

use serde::{Serialize, Deserialize};
use crate::core::vec2::Vector2D;

/// One collision circle.
///
/// `center` is an absolute screen position that moves rigidly with the
/// owning entity. Serializes as `{"position": .., "radius": ..}`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HitBox {
    /// Absolute center
    #[serde(rename = "position")]
    pub center: Vector2D,
    /// Radius (fixed after construction)
    pub radius: f64,
}

impl HitBox {
    /// Create a hitbox. Negative radii are clamped to zero.
    pub fn new(center: Vector2D, radius: f64) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
        }
    }

    /// Strict circle overlap: centers closer than the sum of radii.
    /// Touching circles do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &HitBox) -> bool {
        let reach = self.radius + other.radius;
        self.center.distance_squared(other.center) < reach * reach
    }

    /// Move the center by `delta`.
    #[inline]
    pub fn translate(&mut self, delta: Vector2D) {
        self.center += delta;
    }

    /// Rotate the center around `pivot`.
    #[inline]
    pub fn rotate_around(&mut self, pivot: Vector2D, radians: f64) {
        self.center = self.center.rotate_around(pivot, radians);
    }
}
