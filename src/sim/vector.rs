//! 2D vector and rotation-matrix primitives
//!
//! Floating point uses `glam` directly. The fixed-point types carry their
//! scaling factor as a const generic, so two operands with different factors
//! cannot be combined in one expression: the mismatch is a type error.

use glam::{Mat2, Vec2};
use serde::{Deserialize, Serialize};

/// Numeric representation used for the craft polygon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NumericPolicy {
    #[default]
    Float,
    /// Offsets are quantized to `1 / FIXED_SCALE` after every rotation
    Fixed,
}

/// Scaling factor used when `NumericPolicy::Fixed` is selected
pub const FIXED_SCALE: i32 = 256;

/// Left-multiply `vector` by a 2x2 matrix
#[inline]
pub fn rotate(matrix: &Mat2, vector: Vec2) -> Vec2 {
    *matrix * vector
}

#[inline]
pub fn magnitude(v: Vec2) -> f32 {
    v.dot(v).sqrt()
}

/// Divide by a known magnitude; a non-positive magnitude yields the zero vector
#[inline]
pub fn normalize(v: Vec2, magnitude: f32) -> Vec2 {
    if magnitude > 0.0 {
        v / magnitude
    } else {
        Vec2::ZERO
    }
}

/// Precomputed rotation matrices for one angular step in both directions.
///
/// Screen coordinates are left-handed (y grows downward), so a positive angle
/// turns clockwise on screen.
#[derive(Debug, Clone, Copy)]
pub struct RotationPair {
    pub ccw: Mat2,
    pub cw: Mat2,
}

impl RotationPair {
    pub fn from_degrees(step: f32) -> Self {
        let radians = step.to_radians();
        Self {
            ccw: Mat2::from_angle(-radians),
            cw: Mat2::from_angle(radians),
        }
    }

    pub fn matrix(&self, ccw: bool) -> &Mat2 {
        if ccw { &self.ccw } else { &self.cw }
    }
}

/// Fixed-point vector, each component stored as `value * SCALE`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedVec2<const SCALE: i32> {
    pub x: i32,
    pub y: i32,
}

impl<const SCALE: i32> FixedVec2<SCALE> {
    pub const ZERO: Self = Self { x: 0, y: 0 };

    pub fn from_raw(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn from_vec2(v: Vec2) -> Self {
        Self {
            x: (v.x * SCALE as f32).round() as i32,
            y: (v.y * SCALE as f32).round() as i32,
        }
    }

    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32) / SCALE as f32
    }

    /// Dot product, rescaled once so the result carries `SCALE`
    pub fn dot(self, other: Self) -> i32 {
        let raw = self.x as i64 * other.x as i64 + self.y as i64 * other.y as i64;
        (raw / SCALE as i64) as i32
    }

    /// Magnitude carrying `SCALE`
    pub fn magnitude(self) -> i32 {
        let raw = self.x as i64 * self.x as i64 + self.y as i64 * self.y as i64;
        (raw as f64).sqrt().round() as i32
    }

    /// Divide by a scaled magnitude; non-positive magnitude yields zero
    pub fn normalize(self, magnitude: i32) -> Self {
        if magnitude > 0 {
            Self {
                x: (self.x as i64 * SCALE as i64 / magnitude as i64) as i32,
                y: (self.y as i64 * SCALE as i64 / magnitude as i64) as i32,
            }
        } else {
            Self::ZERO
        }
    }
}

/// Fixed-point 2x2 matrix stored as two columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedMat2<const SCALE: i32> {
    pub col0: FixedVec2<SCALE>,
    pub col1: FixedVec2<SCALE>,
}

impl<const SCALE: i32> FixedMat2<SCALE> {
    pub fn from_mat2(m: &Mat2) -> Self {
        Self {
            col0: FixedVec2::from_vec2(m.x_axis),
            col1: FixedVec2::from_vec2(m.y_axis),
        }
    }

    /// Left-multiply a vector with the same scaling factor
    pub fn rotate(&self, v: FixedVec2<SCALE>) -> FixedVec2<SCALE> {
        let row0 = FixedVec2::<SCALE>::from_raw(self.col0.x, self.col1.x);
        let row1 = FixedVec2::<SCALE>::from_raw(self.col0.y, self.col1.y);
        FixedVec2::from_raw(row0.dot(v), row1.dot(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn test_normalize_zero_magnitude() {
        assert_eq!(normalize(Vec2::new(3.0, 4.0), 0.0), Vec2::ZERO);
        assert_eq!(normalize(Vec2::new(3.0, 4.0), -1.0), Vec2::ZERO);
        let n = normalize(Vec2::new(3.0, 4.0), 5.0);
        assert!((n - Vec2::new(0.6, 0.8)).length() < EPS);
    }

    #[test]
    fn test_magnitude() {
        assert!((magnitude(Vec2::new(3.0, 4.0)) - 5.0).abs() < EPS);
        assert_eq!(magnitude(Vec2::ZERO), 0.0);
    }

    #[test]
    fn test_rotation_pair_inverse() {
        let pair = RotationPair::from_degrees(15.0);
        let v = Vec2::new(0.0, -10.0);
        let back = rotate(&pair.cw, rotate(&pair.ccw, v));
        assert!((back - v).length() < EPS);
    }

    #[test]
    fn test_cw_quarter_turn_is_screen_clockwise() {
        // Nose pointing up (negative y) turns right (positive x) on a y-down screen
        let pair = RotationPair::from_degrees(90.0);
        let v = rotate(&pair.cw, Vec2::new(0.0, -1.0));
        assert!((v - Vec2::new(1.0, 0.0)).length() < EPS);
    }

    #[test]
    fn test_fixed_matches_float_rotation() {
        let pair = RotationPair::from_degrees(15.0);
        let fixed = FixedMat2::<FIXED_SCALE>::from_mat2(&pair.ccw);
        let v = Vec2::new(7.0, 10.0);

        let expected = rotate(&pair.ccw, v);
        let got = fixed.rotate(FixedVec2::from_vec2(v)).to_vec2();
        assert!((expected - got).length() < 0.1);
    }

    #[test]
    fn test_fixed_magnitude_and_normalize() {
        let v = FixedVec2::<FIXED_SCALE>::from_vec2(Vec2::new(3.0, 4.0));
        let mag = v.magnitude();
        assert_eq!(mag, 5 * FIXED_SCALE);
        let n = v.normalize(mag).to_vec2();
        assert!((n - Vec2::new(0.6, 0.8)).length() < 0.01);
        assert_eq!(v.normalize(0), FixedVec2::ZERO);
    }

    #[test]
    fn test_fixed_dot_carries_scale() {
        let a = FixedVec2::<16>::from_vec2(Vec2::new(2.0, 0.0));
        let b = FixedVec2::<16>::from_vec2(Vec2::new(3.0, 1.0));
        assert_eq!(a.dot(b), 6 * 16);
    }
}
