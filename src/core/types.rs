//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Unique identifier for districts
///
/// `NO_LINK` (`u32::MAX`) is reserved and never names a real district.
pub type Uid = u32;

/// 2D vector / position on the town plane
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Dot product
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Euclidean length
    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Both coordinates are neither NaN nor infinite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn distance(&self, other: &Self) -> f64 {
        (*other - *self).norm()
    }

    /// Vector projection of `self` onto `onto`
    ///
    /// Undefined for a zero `onto` (the result is NaN); callers must check.
    pub fn project(&self, onto: &Self) -> Self {
        *onto * (self.dot(onto) / onto.dot(onto))
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl std::ops::Mul<f64> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self { x: self.x * rhs, y: self.y * rhs }
    }
}

impl std::ops::Neg for Vec2 {
    type Output = Self;
    fn neg(self) -> Self {
        Self { x: -self.x, y: -self.y }
    }
}

impl std::fmt::Display for Vec2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec2_arithmetic() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(3.0, -1.0);
        assert_eq!(a + b, Vec2::new(4.0, 1.0));
        assert_eq!(a - b, Vec2::new(-2.0, 3.0));
        assert_eq!(a * 2.0, Vec2::new(2.0, 4.0));
        assert_eq!(-a, Vec2::new(-1.0, -2.0));
        assert_eq!(a.dot(&b), 1.0);
    }

    #[test]
    fn test_vec2_norm() {
        assert_eq!(Vec2::new(3.0, 4.0).norm(), 5.0);
        assert_eq!(Vec2::ZERO.norm(), 0.0);
        assert_eq!(Vec2::new(1.0, 1.0).distance(&Vec2::new(4.0, 5.0)), 5.0);
    }

    #[test]
    fn test_vec2_project() {
        let v = Vec2::new(3.0, 4.0);
        let onto = Vec2::new(10.0, 0.0);
        assert_eq!(v.project(&onto), Vec2::new(3.0, 0.0));

        // Projection onto a perpendicular vector collapses to zero
        let perp = Vec2::new(0.0, 2.0);
        assert_eq!(Vec2::new(5.0, 0.0).project(&perp), Vec2::new(0.0, 0.0));
    }

    #[test]
    fn test_vec2_display() {
        assert_eq!(Vec2::new(1.5, -2.0).to_string(), "(1.5, -2)");
    }
}
