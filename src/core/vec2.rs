//! 2D Vector
//!
//! Plain `f64` vector used for positions, velocities and hitbox centers.
//! Serializes as `{"x": .., "y": ..}` to match the snapshot wire format.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};
use serde::{Serialize, Deserialize};

/// 2D vector with `f64` components.
#[derive(Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2D {
    /// X component
    pub x: f64,
    /// Y component
    pub y: f64,
}

impl Vector2D {
    /// Zero vector
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new vector.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing along `angle` (radians).
    #[inline]
    pub fn from_angle(angle: f64) -> Self {
        Self {
            x: angle.cos(),
            y: angle.sin(),
        }
    }

    /// Scale by a scalar.
    #[inline]
    pub fn scale(self, scalar: f64) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }

    /// Squared length (avoids sqrt - prefer this for comparisons).
    #[inline]
    pub fn length_squared(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Length (magnitude).
    #[inline]
    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Squared distance to another point.
    #[inline]
    pub fn distance_squared(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Distance to another point. Prefer `distance_squared` when possible.
    #[inline]
    pub fn distance(self, other: Self) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Angle of this vector in radians, as `atan2(y, x)`.
    #[inline]
    pub fn angle(self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Rotate around the origin by `radians` (counter-clockwise in a y-up frame).
    #[inline]
    pub fn rotate(self, radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }

    /// Rotate around `pivot` by `radians`.
    #[inline]
    pub fn rotate_around(self, pivot: Self, radians: f64) -> Self {
        (self - pivot).rotate(radians) + pivot
    }

    /// Dot product with another vector.
    #[inline]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Approximate equality, for tests and invariants over float math.
    #[inline]
    pub fn approx_eq(self, other: Self, epsilon: f64) -> bool {
        (self.x - other.x).abs() <= epsilon && (self.y - other.y).abs() <= epsilon
    }
}

impl Add for Vector2D {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector2D {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vector2D {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vector2D {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f64) -> Self {
        self.scale(rhs)
    }
}

impl Neg for Vector2D {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl fmt::Debug for Vector2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vec2({:.3}, {:.3})", self.x, self.y)
    }
}

impl fmt::Display for Vector2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_vec2_add_sub() {
        let a = Vector2D::new(3.0, 4.0);
        let b = Vector2D::new(1.0, 2.0);
        assert_eq!(a + b, Vector2D::new(4.0, 6.0));
        assert_eq!(a - b, Vector2D::new(2.0, 2.0));
        assert_eq!(-a, Vector2D::new(-3.0, -4.0));
    }

    #[test]
    fn test_vec2_length() {
        // 3-4-5 triangle
        let v = Vector2D::new(3.0, 4.0);
        assert_eq!(v.length_squared(), 25.0);
        assert_eq!(v.length(), 5.0);
        assert_eq!(Vector2D::ZERO.distance(v), 5.0);
    }

    #[test]
    fn test_vec2_rotate_quarter_turn() {
        let v = Vector2D::new(1.0, 0.0);
        let r = v.rotate(FRAC_PI_2);
        assert!(r.approx_eq(Vector2D::new(0.0, 1.0), 1e-12));
    }

    #[test]
    fn test_vec2_rotate_around_pivot() {
        let pivot = Vector2D::new(10.0, 10.0);
        let p = Vector2D::new(12.0, 10.0);
        let r = p.rotate_around(pivot, PI);
        assert!(r.approx_eq(Vector2D::new(8.0, 10.0), 1e-9));
        // Pivot itself never moves
        assert!(pivot.rotate_around(pivot, 1.234).approx_eq(pivot, 1e-12));
    }

    #[test]
    fn test_vec2_angle_matches_atan2() {
        let v = Vector2D::new(-1.0, 1.0);
        assert!((v.angle() - 3.0 * PI / 4.0).abs() < 1e-12);
        assert!(Vector2D::from_angle(v.angle()).approx_eq(Vector2D::new(-1.0, 1.0).scale(1.0 / 2f64.sqrt()), 1e-12));
    }

    #[test]
    fn test_vec2_json_shape() {
        let json = serde_json::to_string(&Vector2D::new(1.5, -2.0)).unwrap();
        assert_eq!(json, r#"{"x":1.5,"y":-2.0}"#);
    }
}
