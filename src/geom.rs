use std::fmt::Display;
use std::ops::Add;
use std::ops::AddAssign;
use std::ops::Div;
use std::ops::Mul;
use std::ops::Neg;
use std::ops::Sub;

use serde::Deserialize;
use serde::Serialize;

/// Shared cutoff for "effectively zero" comparisons.
///
/// Used for parallel-edge detection, degenerate-triangle detection, the
/// boundary bias in the prism inside/outside test, and the tracer's
/// self-intersection guard.
pub const EPSILON: f64 = 1e-7;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Point2(f64, f64);

impl Point2 {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Point2(x, y)
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.0
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.1
    }

    #[cfg(test)]
    #[inline]
    pub fn rel_eq(&self, other: &Self, epsilon: f64) -> bool {
        (self.0 - other.0).abs() < epsilon && (self.1 - other.1).abs() < epsilon
    }
}

impl From<[f64; 2]> for Point2 {
    fn from(arr: [f64; 2]) -> Self {
        Point2(arr[0], arr[1])
    }
}

impl Default for Point2 {
    fn default() -> Self {
        Point2(0.0, 0.0)
    }
}

impl Display for Point2 {
    fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Vec2(f64, f64);

impl Display for Vec2 {
    fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

impl Vec2 {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Vec2(x, y)
    }

    /// The unit vector at `angle` radians from the positive x-axis.
    #[inline]
    pub fn from_angle(angle: f64) -> Self {
        Vec2(angle.cos(), angle.sin())
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.0
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.1
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.square_length().sqrt()
    }

    #[inline]
    pub fn square_length(&self) -> f64 {
        self.0 * self.0 + self.1 * self.1
    }

    #[inline]
    pub fn dot(&self, other: &Self) -> f64 {
        self.0 * other.0 + self.1 * other.1
    }

    /// The scalar (z-component) cross product of two plane vectors.
    ///
    /// Zero iff the vectors are parallel or one of them is zero.
    #[inline]
    pub fn cross(&self, other: &Self) -> f64 {
        self.0 * other.1 - self.1 * other.0
    }

    /// Return this vector scaled to unit length.
    ///
    /// A near-zero vector (length below `EPSILON`) has no well-defined
    /// direction and normalizes to the zero vector; callers must treat a
    /// zero result as a degenerate direction.
    #[inline]
    pub fn unit(&self) -> Self {
        let len = self.length();
        if len < EPSILON {
            return Vec2::default();
        }
        *self / len
    }

    /// Rotate by `theta` radians (counter-clockwise in a right-handed frame).
    #[inline]
    pub fn rotate(&self, theta: f64) -> Self {
        let cos = theta.cos();
        let sin = theta.sin();
        Vec2(self.0 * cos - self.1 * sin, self.0 * sin + self.1 * cos)
    }

    #[cfg(test)]
    #[inline]
    pub fn rel_eq(&self, other: &Self, epsilon: f64) -> bool {
        (self.0 - other.0).abs() < epsilon && (self.1 - other.1).abs() < epsilon
    }
}

impl From<[f64; 2]> for Vec2 {
    fn from(arr: [f64; 2]) -> Self {
        Vec2(arr[0], arr[1])
    }
}

impl Default for Vec2 {
    fn default() -> Self {
        Vec2(0.0, 0.0)
    }
}

impl Add<Vec2> for Point2 {
    type Output = Self;

    #[inline]
    fn add(self, other: Vec2) -> Self {
        Point2(self.0 + other.0, self.1 + other.1)
    }
}

impl AddAssign<Vec2> for Point2 {
    fn add_assign(&mut self, other: Vec2) {
        self.0 += other.0;
        self.1 += other.1;
    }
}

impl Sub for Point2 {
    type Output = Vec2;

    #[inline]
    fn sub(self, other: Self) -> Vec2 {
        Vec2(self.0 - other.0, self.1 - other.1)
    }
}

impl Add for Vec2 {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Vec2(self.0 + other.0, self.1 + other.1)
    }
}

impl Sub for Vec2 {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Vec2(self.0 - other.0, self.1 - other.1)
    }
}

impl Neg for Vec2 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Vec2(-self.0, -self.1)
    }
}

impl Mul<Vec2> for f64 {
    type Output = Vec2;

    #[inline]
    fn mul(self, v: Vec2) -> Vec2 {
        Vec2(v.0 * self, v.1 * self)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;

    #[inline]
    fn mul(self, c: f64) -> Self {
        Vec2(self.0 * c, self.1 * c)
    }
}

impl Div<f64> for Vec2 {
    type Output = Self;

    #[inline]
    fn div(self, c: f64) -> Self {
        Vec2(self.0 / c, self.1 / c)
    }
}
