// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! 2D vector math
//!
//! All gameplay math runs on [`Vec2`], a plain f32 pair with the operator
//! set the physics and collision code needs. The coordinate convention is
//! +y up: gravity points toward negative y, floors push along positive y.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// Vectors shorter than this are treated as zero-length by [`Vec2::normalized`]
pub const NORMALIZE_EPSILON: f32 = 1e-6;

/// A 2D vector with f32 components
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    /// Horizontal component
    pub x: f32,
    /// Vertical component (+y is up)
    pub y: f32,
}

impl Vec2 {
    /// The zero vector
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    /// Create a new vector
    pub const fn new(x: f32, y: f32) -> Self {
        Vec2 { x, y }
    }

    /// Dot product with another vector
    pub fn dot(&self, other: Vec2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Squared length, avoiding the square root
    pub fn length_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    /// Euclidean length
    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Unit vector in the same direction
    ///
    /// Returns the zero vector when the length is below
    /// [`NORMALIZE_EPSILON`], so callers never divide by zero.
    pub fn normalized(&self) -> Vec2 {
        let len = self.length();
        if len < NORMALIZE_EPSILON {
            Vec2::ZERO
        } else {
            Vec2::new(self.x / len, self.y / len)
        }
    }

    /// Check that both components are finite (not NaN or infinity)
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x + other.x, self.y + other.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, other: Vec2) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, other: Vec2) {
        self.x -= other.x;
        self.y -= other.y;
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, factor: f32) -> Vec2 {
        Vec2::new(self.x * factor, self.y * factor)
    }
}

impl MulAssign<f32> for Vec2 {
    fn mul_assign(&mut self, factor: f32) {
        self.x *= factor;
        self.y *= factor;
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

// Scenes carry vectors as two-element arrays, so serialize as a pair
// rather than a field map.
impl Serialize for Vec2 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.x, self.y).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Vec2 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (x, y) = <(f32, f32)>::deserialize(deserializer)?;
        Ok(Vec2::new(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(3.0, -1.0);
        assert_eq!(a + b, Vec2::new(4.0, 1.0));
        assert_eq!(a - b, Vec2::new(-2.0, 3.0));
        assert_eq!(a * 2.0, Vec2::new(2.0, 4.0));
        assert_eq!(-a, Vec2::new(-1.0, -2.0));
    }

    #[test]
    fn test_assign_ops() {
        let mut v = Vec2::new(1.0, 1.0);
        v += Vec2::new(2.0, 3.0);
        assert_eq!(v, Vec2::new(3.0, 4.0));
        v -= Vec2::new(1.0, 1.0);
        assert_eq!(v, Vec2::new(2.0, 3.0));
        v *= 0.5;
        assert_eq!(v, Vec2::new(1.0, 1.5));
    }

    #[test]
    fn test_dot_and_length() {
        let v = Vec2::new(3.0, 4.0);
        assert_eq!(v.length_squared(), 25.0);
        assert_eq!(v.length(), 5.0);
        assert_eq!(v.dot(Vec2::new(1.0, 0.0)), 3.0);
    }

    #[test]
    fn test_normalized() {
        let v = Vec2::new(0.0, 10.0).normalized();
        assert!((v.y - 1.0).abs() < 1e-6);
        assert_eq!(v.x, 0.0);
    }

    #[test]
    fn test_normalized_zero_vector() {
        assert_eq!(Vec2::ZERO.normalized(), Vec2::ZERO);
        assert_eq!(Vec2::new(1e-9, -1e-9).normalized(), Vec2::ZERO);
    }

    #[test]
    fn test_is_valid() {
        assert!(Vec2::new(1.0, 2.0).is_valid());
        assert!(!Vec2::new(f32::NAN, 0.0).is_valid());
        assert!(!Vec2::new(0.0, f32::INFINITY).is_valid());
    }

    #[test]
    fn test_serde_array_form() {
        let v: Vec2 = serde_json::from_str("[1.5, -2.0]").unwrap();
        assert_eq!(v, Vec2::new(1.5, -2.0));
        assert_eq!(serde_json::to_string(&v).unwrap(), "[1.5,-2.0]");
    }
}
