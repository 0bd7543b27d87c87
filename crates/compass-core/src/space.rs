//! 3D primitives and the distance/angle measures between them.
//!
//! # Overview
//!
//! - [`Line3`] - A directed 3D line through two points
//! - [`Plane`] - A plane given by a point on it and a normal vector
//! - [`SpaceShape`] - Tagged union over the 3D shapes
//! - [`distance`] - Distance between any supported pair of 3D shapes
//! - [`angle_between`] - Angle between two lines or two planes
//!
//! Lines are infinite for every measure in this module.

use std::fmt;

use crate::{
    error::{GeometryError, Result},
    geometry::{Point3, rad_to_deg},
    shape::{AtomicValues, GeometryType},
};

/// Magnitude below which a direction or normal vector counts as zero.
pub const ZERO_VECTOR_EPSILON: f64 = 1e-6;

/// Normal length below which a constructed plane is rejected.
const PLANE_CONSTRUCTION_EPSILON: f64 = 1e-4;

/// Relative cross-product magnitude above which two planes intersect.
const PLANE_PARALLEL_RATIO: f64 = 1e-3;

/// A directed line (or vector) in 3D.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line3 {
    start: Point3,
    end: Point3,
}

impl Line3 {
    pub fn new(start: Point3, end: Point3) -> Self {
        Self { start, end }
    }

    pub fn start(self) -> Point3 {
        self.start
    }

    pub fn end(self) -> Point3 {
        self.end
    }

    /// Direction vector `end - start`.
    pub fn direction(self) -> Point3 {
        self.end.sub_point(self.start)
    }

    pub fn length(self) -> f64 {
        self.direction().length()
    }
}

impl AtomicValues for Point3 {
    fn atomic_values(&self) -> Vec<f64> {
        self.to_array().to_vec()
    }
}

impl AtomicValues for Line3 {
    fn atomic_values(&self) -> Vec<f64> {
        let [x1, y1, z1] = self.start.to_array();
        let [x2, y2, z2] = self.end.to_array();
        vec![x1, y1, z1, x2, y2, z2]
    }
}

/// A plane through `point` with the (not necessarily unit) `normal`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    point: Point3,
    normal: Point3,
}

impl Plane {
    /// Creates a plane from a point and a normal, without validating the normal.
    pub fn new(point: Point3, normal: Point3) -> Self {
        Self { point, normal }
    }

    /// The plane through three points, with normal `(p2 - p1) × (p3 - p1)`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroNormal`] when the points are collinear.
    pub fn from_three_points(p1: Point3, p2: Point3, p3: Point3) -> Result<Self> {
        let normal = p2.sub_point(p1).cross(p3.sub_point(p1));
        if normal.length() < PLANE_CONSTRUCTION_EPSILON {
            return Err(GeometryError::ZeroNormal);
        }
        Ok(Self::new(p1, normal))
    }

    /// The plane `a·x + b·y + c·z + d = 0`, anchored at the foot of the
    /// perpendicular from the origin.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroNormal`] when `(a, b, c)` is (near) zero.
    pub fn from_equation(a: f64, b: f64, c: f64, d: f64) -> Result<Self> {
        let normal = Point3::new(a, b, c);
        if normal.length() < PLANE_CONSTRUCTION_EPSILON {
            return Err(GeometryError::ZeroNormal);
        }
        let t = d / normal.dot(normal);
        Ok(Self::new(normal.scale(-t), normal))
    }

    pub fn point(self) -> Point3 {
        self.point
    }

    pub fn normal(self) -> Point3 {
        self.normal
    }
}

impl AtomicValues for Plane {
    fn atomic_values(&self) -> Vec<f64> {
        let [px, py, pz] = self.point.to_array();
        let [nx, ny, nz] = self.normal.to_array();
        vec![px, py, pz, nx, ny, nz]
    }
}

/// A resolved 3D shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpaceShape {
    Point(Point3),
    Line(Line3),
    Plane(Plane),
}

impl SpaceShape {
    /// The shared geometry tag; planes have none.
    pub fn geometry_type(&self) -> Option<GeometryType> {
        match self {
            Self::Point(_) => Some(GeometryType::Point),
            Self::Line(_) => Some(GeometryType::Line),
            Self::Plane(_) => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Point(_) => "point3d",
            Self::Line(_) => "line3d",
            Self::Plane(_) => "plane3d",
        }
    }
}

impl AtomicValues for SpaceShape {
    fn atomic_values(&self) -> Vec<f64> {
        match self {
            Self::Point(p) => p.atomic_values(),
            Self::Line(line) => line.atomic_values(),
            Self::Plane(plane) => plane.atomic_values(),
        }
    }
}

impl fmt::Display for SpaceShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Point(p) => write!(f, "point3d{p}"),
            Self::Line(line) => write!(f, "line3d[{} -> {}]", line.start, line.end),
            Self::Plane(plane) => {
                write!(f, "plane3d[point={}, normal={}]", plane.point, plane.normal)
            }
        }
    }
}

/// Perpendicular distance from `point` to the infinite line.
///
/// A degenerate line is treated as the single point at its start.
pub fn point_line_distance(point: Point3, line: Line3) -> f64 {
    let u = line.direction();
    let pq = point.sub_point(line.start);
    let u_mag = u.length();
    if u_mag < ZERO_VECTOR_EPSILON {
        return pq.length();
    }
    pq.cross(u).length() / u_mag
}

/// Perpendicular distance from `point` to the plane: `|u·n − c·n| / ‖n‖`.
///
/// # Errors
///
/// Returns [`GeometryError::ZeroNormal`] when the plane's normal is (near) zero.
pub fn point_plane_distance(point: Point3, plane: Plane) -> Result<f64> {
    let n = plane.normal;
    let n_mag = n.length();
    if n_mag < ZERO_VECTOR_EPSILON {
        return Err(GeometryError::ZeroNormal);
    }
    Ok((point.dot(n) - plane.point.dot(n)).abs() / n_mag)
}

/// Distance between two infinite lines.
///
/// Parallel lines (`‖b × d‖` below [`ZERO_VECTOR_EPSILON`]) use
/// `‖AC × b‖ / ‖b‖`; skew lines use `|AC · (b × d)| / ‖b × d‖`.
pub fn line_line_distance(l1: Line3, l2: Line3) -> f64 {
    let b = l1.direction();
    let d = l2.direction();
    let ac = l2.start.sub_point(l1.start);
    let normal = b.cross(d);
    let normal_mag = normal.length();

    if normal_mag >= ZERO_VECTOR_EPSILON {
        return ac.dot(normal).abs() / normal_mag;
    }
    let b_mag = b.length();
    if b_mag < ZERO_VECTOR_EPSILON {
        return ac.length();
    }
    ac.cross(b).length() / b_mag
}

/// Distance between two planes; zero unless they are parallel.
///
/// # Errors
///
/// Returns [`GeometryError::ZeroNormal`] when either normal is (near) zero.
pub fn plane_plane_distance(p1: Plane, p2: Plane) -> Result<f64> {
    let (n1_mag, n2_mag) = (p1.normal.length(), p2.normal.length());
    if n1_mag < ZERO_VECTOR_EPSILON || n2_mag < ZERO_VECTOR_EPSILON {
        return Err(GeometryError::ZeroNormal);
    }
    if p1.normal.cross(p2.normal).length() > PLANE_PARALLEL_RATIO * n1_mag * n2_mag {
        return Ok(0.0);
    }
    let n = p1.normal.scale(1.0 / n1_mag);
    Ok((p1.point.dot(n) - p2.point.dot(n)).abs())
}

/// Distance between any two 3D shapes, dispatching on the unordered pair.
///
/// # Errors
///
/// Returns [`GeometryError::ZeroNormal`] for planes with a zero normal and
/// [`GeometryError::Degenerate`] for the unsupported line/plane pair.
pub fn distance(a: SpaceShape, b: SpaceShape) -> Result<f64> {
    use SpaceShape as S;

    match (a, b) {
        (S::Point(p), S::Point(q)) => Ok(p.distance(q)),
        (S::Point(p), S::Line(line)) | (S::Line(line), S::Point(p)) => {
            Ok(point_line_distance(p, line))
        }
        (S::Point(p), S::Plane(plane)) | (S::Plane(plane), S::Point(p)) => {
            point_plane_distance(p, plane)
        }
        (S::Line(l1), S::Line(l2)) => Ok(line_line_distance(l1, l2)),
        (S::Plane(p1), S::Plane(p2)) => plane_plane_distance(p1, p2),
        (S::Line(_), S::Plane(_)) | (S::Plane(_), S::Line(_)) => Err(
            GeometryError::Degenerate("distance between a line and a plane is not supported"),
        ),
    }
}

/// Unsigned angle between two vectors in degrees, in `[0, 180]`.
///
/// # Errors
///
/// Returns [`GeometryError::ZeroLength`] when either vector is (near) zero.
pub fn vector_angle(u: Point3, v: Point3) -> Result<f64> {
    let mags = u.length() * v.length();
    if u.length() < ZERO_VECTOR_EPSILON || v.length() < ZERO_VECTOR_EPSILON {
        return Err(GeometryError::ZeroLength);
    }
    Ok(rad_to_deg((u.dot(v) / mags).clamp(-1.0, 1.0).acos()))
}

/// Angle between two lines (in `[0, 180]`) or the dihedral angle between two
/// planes (in `[0, 90]`).
///
/// # Errors
///
/// Returns an error for zero-length directions or normals, and
/// [`GeometryError::Degenerate`] for any other pair of shapes.
pub fn angle_between(a: SpaceShape, b: SpaceShape) -> Result<f64> {
    match (a, b) {
        (SpaceShape::Line(l1), SpaceShape::Line(l2)) => {
            vector_angle(l1.direction(), l2.direction())
        }
        (SpaceShape::Plane(p1), SpaceShape::Plane(p2)) => {
            let degrees = vector_angle(p1.normal, p2.normal).map_err(|_| GeometryError::ZeroNormal)?;
            Ok(degrees.min(180.0 - degrees))
        }
        _ => Err(GeometryError::Degenerate(
            "angle is defined between two lines or two planes",
        )),
    }
}
