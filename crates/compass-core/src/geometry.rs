//! Coordinate value types for geometric constructions.
//!
//! This module provides the plain value types every other part of Compass
//! builds on.
//!
//! # Overview
//!
//! - [`Point2`] - A 2D coordinate, also used as a direction vector
//! - [`Point3`] - A 3D coordinate, also used as a direction vector
//! - [`deg_to_rad`] / [`rad_to_deg`] - Angle unit conversions
//!
//! # Coordinate System
//!
//! Compass uses the mathematical convention:
//!
//! ```text
//!    +Y
//!     ▲
//!     │
//!     │
//!   (0,0) ────────► +X
//! ```
//!
//! Positive angles rotate counter-clockwise and are expressed in degrees at
//! every public boundary.

use std::fmt;

/// Converts an angle from degrees to radians.
pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees.to_radians()
}

/// Converts an angle from radians to degrees.
pub fn rad_to_deg(radians: f64) -> f64 {
    radians.to_degrees()
}

/// A 2D point in construction space.
///
/// Points are immutable values; every operation returns a new point.
///
/// # Examples
///
/// ```
/// # use compass_core::geometry::Point2;
/// let p1 = Point2::new(10.0, 20.0);
/// let p2 = Point2::new(5.0, 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
///
/// let mid = p1.midpoint(p2);
/// assert_eq!(mid.x(), 7.5);
/// assert_eq!(mid.y(), 12.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point2 {
    x: f64,
    y: f64,
}

impl Point2 {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// A point with both coordinates set to NaN.
    ///
    /// Used as the resolved value of an intersection that found nothing.
    pub fn nan() -> Self {
        Self::new(f64::NAN, f64::NAN)
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
        self.y
    }

    /// Returns `true` when both coordinates are finite numbers.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point2) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    /// Subtracts another point from this point, returning a new point.
    ///
    /// `end.sub_point(start)` is the direction vector from `start` to `end`.
    pub fn sub_point(self, other: Point2) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }

    /// Multiplies both coordinates by the given factor.
    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    /// Calculates the midpoint between this point and another point
    pub fn midpoint(self, other: Point2) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Linear interpolation: `t = 0` yields `self`, `t = 1` yields `other`.
    pub fn lerp(self, other: Point2, t: f64) -> Self {
        Self::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    /// Dot product, treating both points as vectors.
    pub fn dot(self, other: Point2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Scalar (z-component) cross product, treating both points as vectors.
    ///
    /// Positive when `other` lies counter-clockwise of `self`.
    pub fn cross(self, other: Point2) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Calculates the Euclidean length of the vector from the origin.
    pub fn hypot(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Squared length, avoiding the square root.
    pub fn length_squared(self) -> f64 {
        self.dot(self)
    }

    /// Distance between two points.
    pub fn distance(self, other: Point2) -> f64 {
        other.sub_point(self).hypot()
    }

    /// Returns the vector rotated by +90 degrees.
    pub fn perpendicular(self) -> Self {
        Self::new(-self.y, self.x)
    }

    /// Unit vector in the same direction, or `None` for a (near) zero vector.
    pub fn normalize(self) -> Option<Self> {
        let len = self.hypot();
        if len < 1e-10 {
            None
        } else {
            Some(self.scale(1.0 / len))
        }
    }

    /// Returns `true` when both coordinates are within `epsilon` of `other`'s.
    pub fn approx_eq(self, other: Point2, epsilon: f64) -> bool {
        (self.x - other.x).abs() < epsilon && (self.y - other.y).abs() < epsilon
    }

    /// Returns the coordinates as `[x, y]`.
    pub fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }
}

impl From<(f64, f64)> for Point2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Point2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A 3D point, also used as a direction vector.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point3 {
    x: f64,
    y: f64,
    z: f64,
}

impl Point3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn x(self) -> f64 {
        self.x
    }

    pub fn y(self) -> f64 {
        self.y
    }

    pub fn z(self) -> f64 {
        self.z
    }

    pub fn add_point(self, other: Point3) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    pub fn sub_point(self, other: Point3) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor, self.z * factor)
    }

    pub fn dot(self, other: Point3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Point3) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Euclidean length of the vector.
    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn distance(self, other: Point3) -> f64 {
        other.sub_point(self).length()
    }

    /// Unit vector in the same direction, or `None` for a (near) zero vector.
    pub fn normalize(self) -> Option<Self> {
        let len = self.length();
        if len < 1e-10 {
            None
        } else {
            Some(self.scale(1.0 / len))
        }
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<Point2> for Point3 {
    /// Lifts a 2D point into the `z = 0` plane.
    fn from(p: Point2) -> Self {
        Self::new(p.x(), p.y(), 0.0)
    }
}

impl fmt::Display for Point3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
