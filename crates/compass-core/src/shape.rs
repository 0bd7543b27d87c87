//! Resolved 2D shapes and the capability traits used to dispatch on them.
//!
//! # Overview
//!
//! - [`GeometryType`] - The closed set of geometry tags every dispatch matches on
//! - [`Shape`] - Tagged union over the concrete shape types
//! - [`Line`], [`Circle`], [`Arc`], [`Polygon`], [`Angle`], [`Plot`] - Shape payloads
//! - [`PointLike`], [`LineLike`], [`CircleLike`], [`PolygonLike`] - Capability
//!   traits; operations ask a [`Shape`] for a capability instead of probing for
//!   individual accessors
//!
//! All shapes are immutable once built. Transforms produce new shapes.

use std::{fmt, sync::Arc as SharedFn};

use serde::Serialize;

use crate::{
    error::{GeometryError, Result},
    geometry::{Point2, deg_to_rad, rad_to_deg},
};

/// Tolerance, in degrees, within which an [`Angle`] is reported as right.
pub const RIGHT_ANGLE_TOLERANCE: f64 = 0.5;

/// Default arc radius for an [`Angle`] marker.
pub const DEFAULT_ANGLE_RADIUS: f64 = 0.8;

/// The geometry tag of a resolved value.
///
/// Every multi-shape operation matches exhaustively on this enum; a pure
/// scalar has no geometry type at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GeometryType {
    Point,
    Line,
    Circle,
    Polygon,
    Plot,
    Angle,
}

impl GeometryType {
    /// Returns the lowercase tag name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Point => "point",
            Self::Line => "line",
            Self::Circle => "circle",
            Self::Polygon => "polygon",
            Self::Plot => "plot",
            Self::Angle => "angle",
        }
    }
}

impl fmt::Display for GeometryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Flat numeric projection of a value.
///
/// This is the accessor arithmetic composition and equality are built on.
pub trait AtomicValues {
    fn atomic_values(&self) -> Vec<f64>;
}

/// Anything that sits at a single position.
pub trait PointLike: AtomicValues {
    /// The position of the shape.
    ///
    /// The default reads the first two atomic values; missing values read as NaN.
    fn position(&self) -> Point2 {
        let values = self.atomic_values();
        let at = |i: usize| values.get(i).copied().unwrap_or(f64::NAN);
        Point2::new(at(0), at(1))
    }
}

/// Anything with a directed start → end extent.
pub trait LineLike {
    /// Start and end of the extent.
    fn endpoints(&self) -> (Point2, Point2);

    /// The extent as a plain [`Line`].
    fn to_line(&self) -> Line {
        let (start, end) = self.endpoints();
        Line::new(start, end)
    }

    /// Direction vector `end - start`.
    fn direction(&self) -> Point2 {
        let (start, end) = self.endpoints();
        end.sub_point(start)
    }

    /// Length of the extent.
    fn length(&self) -> f64 {
        self.direction().hypot()
    }
}

/// Anything with a center and a radius.
pub trait CircleLike {
    fn center(&self) -> Point2;
    fn radius(&self) -> f64;

    fn to_circle(&self) -> Circle {
        Circle::new(self.center(), self.radius())
    }
}

/// Anything with an ordered, closed vertex list.
pub trait PolygonLike {
    /// Vertices with the first vertex repeated at the end.
    fn closed_vertices(&self) -> &[Point2];

    /// Vertices without the closing repeat.
    fn unique_vertices(&self) -> &[Point2] {
        let vertices = self.closed_vertices();
        &vertices[..vertices.len().saturating_sub(1)]
    }
}

impl AtomicValues for Point2 {
    fn atomic_values(&self) -> Vec<f64> {
        vec![self.x(), self.y()]
    }
}

impl PointLike for Point2 {
    fn position(&self) -> Point2 {
        *self
    }
}

/// A line through two points; also used for segments and vectors.
///
/// Whether the line is treated as infinite or bounded is decided by the
/// consuming algorithm, not by the type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    start: Point2,
    end: Point2,
}

impl Line {
    pub fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    pub fn start(self) -> Point2 {
        self.start
    }

    pub fn end(self) -> Point2 {
        self.end
    }

    /// The point at parameter `t` along the line (`0` = start, `1` = end).
    pub fn point_at(self, t: f64) -> Point2 {
        self.start.lerp(self.end, t)
    }

    pub fn midpoint(self) -> Point2 {
        self.start.midpoint(self.end)
    }
}

impl LineLike for Line {
    fn endpoints(&self) -> (Point2, Point2) {
        (self.start, self.end)
    }
}

impl AtomicValues for Line {
    fn atomic_values(&self) -> Vec<f64> {
        vec![self.start.x(), self.start.y(), self.end.x(), self.end.y()]
    }
}

/// A circle. The radius is stored as given and may be negative after a
/// scale by a negative factor; algorithms use its absolute value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    center: Point2,
    radius: f64,
}

impl Circle {
    pub fn new(center: Point2, radius: f64) -> Self {
        Self { center, radius }
    }
}

impl CircleLike for Circle {
    fn center(&self) -> Point2 {
        self.center
    }

    fn radius(&self) -> f64 {
        self.radius
    }
}

impl AtomicValues for Circle {
    fn atomic_values(&self) -> Vec<f64> {
        vec![self.center.x(), self.center.y(), self.radius]
    }
}

/// A circular arc given by center, radius, start angle and sweep (degrees).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    center: Point2,
    radius: f64,
    start_angle: f64,
    sweep: f64,
}

impl Arc {
    pub fn new(center: Point2, radius: f64, start_angle: f64, sweep: f64) -> Self {
        Self {
            center,
            radius,
            start_angle,
            sweep,
        }
    }

    /// Start angle in degrees.
    pub fn start_angle(self) -> f64 {
        self.start_angle
    }

    /// Sweep in degrees; negative sweeps run clockwise.
    pub fn sweep(self) -> f64 {
        self.sweep
    }

    pub fn start_point(self) -> Point2 {
        self.point_at_angle(self.start_angle)
    }

    pub fn end_point(self) -> Point2 {
        self.point_at_angle(self.start_angle + self.sweep)
    }

    /// Returns a copy with a different center, radius and start angle.
    pub fn with_frame(self, center: Point2, radius: f64, start_angle: f64) -> Self {
        Self {
            center,
            radius,
            start_angle,
            sweep: self.sweep,
        }
    }

    fn point_at_angle(self, degrees: f64) -> Point2 {
        let rad = deg_to_rad(degrees);
        Point2::new(
            self.center.x() + self.radius * rad.cos(),
            self.center.y() + self.radius * rad.sin(),
        )
    }
}

impl CircleLike for Arc {
    fn center(&self) -> Point2 {
        self.center
    }

    fn radius(&self) -> f64 {
        self.radius
    }
}

impl LineLike for Arc {
    fn endpoints(&self) -> (Point2, Point2) {
        (self.start_point(), self.end_point())
    }
}

impl AtomicValues for Arc {
    fn atomic_values(&self) -> Vec<f64> {
        vec![self.center.x(), self.center.y(), self.radius]
    }
}

/// A closed polygon.
///
/// The vertex list always ends with a copy of its first vertex.
///
/// # Examples
///
/// ```
/// # use compass_core::{geometry::Point2, shape::{Polygon, PolygonLike}};
/// let triangle = Polygon::new(vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(4.0, 0.0),
///     Point2::new(0.0, 3.0),
/// ])
/// .unwrap();
///
/// assert_eq!(triangle.closed_vertices().len(), 4);
/// assert_eq!(triangle.closed_vertices().first(), triangle.closed_vertices().last());
/// assert!(triangle.is_triangle());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point2>,
}

impl Polygon {
    /// Builds a polygon, closing it if the last vertex differs from the first.
    ///
    /// The closing check is exact equality.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] for fewer than three vertices.
    pub fn new(mut vertices: Vec<Point2>) -> Result<Self> {
        if vertices.len() < 3 {
            return Err(GeometryError::Degenerate("polygon needs at least 3 vertices"));
        }
        if vertices.first() != vertices.last() {
            vertices.push(vertices[0]);
        }
        Ok(Self { vertices })
    }

    /// Returns `true` when the polygon has exactly three distinct corners.
    pub fn is_triangle(&self) -> bool {
        self.unique_vertices().len() == 3
    }

    /// Applies `f` to every vertex, keeping the closing invariant.
    pub fn map_vertices(&self, f: impl Fn(Point2) -> Point2) -> Self {
        Self {
            vertices: self.vertices.iter().map(|&v| f(v)).collect(),
        }
    }
}

impl PolygonLike for Polygon {
    fn closed_vertices(&self) -> &[Point2] {
        &self.vertices
    }
}

impl AtomicValues for Polygon {
    fn atomic_values(&self) -> Vec<f64> {
        self.vertices.iter().flat_map(|v| v.to_array()).collect()
    }
}

/// An angle marker at `vertex` between the arms towards `p1` and `p2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Angle {
    vertex: Point2,
    p1: Point2,
    p2: Point2,
    radius: f64,
}

impl Angle {
    /// Creates an angle marker; a non-positive radius falls back to
    /// [`DEFAULT_ANGLE_RADIUS`].
    pub fn new(vertex: Point2, p1: Point2, p2: Point2, radius: f64) -> Self {
        let radius = if radius > 0.0 {
            radius
        } else {
            DEFAULT_ANGLE_RADIUS
        };
        Self {
            vertex,
            p1,
            p2,
            radius,
        }
    }

    pub fn vertex(self) -> Point2 {
        self.vertex
    }

    pub fn p1(self) -> Point2 {
        self.p1
    }

    pub fn p2(self) -> Point2 {
        self.p2
    }

    pub fn radius(self) -> f64 {
        self.radius
    }

    /// The interior angle in degrees, in `[0, 180]`.
    ///
    /// A zero-length arm measures as 0.
    pub fn degrees(self) -> f64 {
        let a = self.p1.sub_point(self.vertex);
        let b = self.p2.sub_point(self.vertex);
        let mags = a.hypot() * b.hypot();
        if mags < 1e-10 {
            return 0.0;
        }
        rad_to_deg((a.dot(b) / mags).clamp(-1.0, 1.0).acos())
    }

    pub fn is_right(self) -> bool {
        (self.degrees() - 90.0).abs() < RIGHT_ANGLE_TOLERANCE
    }

    /// Returns a copy with every defining point mapped through `f`.
    pub fn map_points(self, f: impl Fn(Point2) -> Point2) -> Self {
        Self {
            vertex: f(self.vertex),
            p1: f(self.p1),
            p2: f(self.p2),
            radius: self.radius,
        }
    }
}

impl AtomicValues for Angle {
    fn atomic_values(&self) -> Vec<f64> {
        [self.vertex, self.p1, self.p2]
            .iter()
            .flat_map(|p| p.to_array())
            .collect()
    }
}

/// A pre-compiled single-variable function handle.
pub type PlotFn = SharedFn<dyn Fn(f64) -> f64 + Send + Sync>;

/// The graph of `y = f(x)`, optionally restricted to a domain.
#[derive(Clone)]
pub struct Plot {
    function: PlotFn,
    domain: Option<(f64, f64)>,
}

impl Plot {
    pub fn new(function: PlotFn) -> Self {
        Self {
            function,
            domain: None,
        }
    }

    /// Restricts the plot to `[min, max]`; the bounds are reordered if needed.
    pub fn with_domain(mut self, min: f64, max: f64) -> Self {
        self.domain = Some((min.min(max), min.max(max)));
        self
    }

    pub fn eval(&self, x: f64) -> f64 {
        (self.function)(x)
    }

    pub fn domain(&self) -> Option<(f64, f64)> {
        self.domain
    }

    /// The domain clipped to `range`, or `None` when they do not overlap.
    pub fn clip(&self, range: (f64, f64)) -> Option<(f64, f64)> {
        let (lo, hi) = match self.domain {
            Some((min, max)) => (min.max(range.0), max.min(range.1)),
            None => range,
        };
        (lo <= hi).then_some((lo, hi))
    }

    /// Samples the plot at `count` evenly spaced x values over `range`,
    /// skipping non-finite results.
    pub fn sample(&self, range: (f64, f64), count: usize) -> Vec<Point2> {
        let Some((lo, hi)) = self.clip(range) else {
            return Vec::new();
        };
        let steps = count.max(2) - 1;
        let step = (hi - lo) / steps as f64;
        (0..=steps)
            .map(|i| {
                let x = lo + step * i as f64;
                Point2::new(x, self.eval(x))
            })
            .filter(|p| p.is_finite())
            .collect()
    }
}

impl fmt::Debug for Plot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plot")
            .field("domain", &self.domain)
            .finish_non_exhaustive()
    }
}

/// A resolved 2D shape.
#[derive(Debug, Clone)]
pub enum Shape {
    Point(Point2),
    Line(Line),
    Circle(Circle),
    Arc(Arc),
    Polygon(Polygon),
    Plot(Plot),
    Angle(Angle),
}

impl Shape {
    /// The geometry tag. Arcs report [`GeometryType::Circle`].
    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Self::Point(_) => GeometryType::Point,
            Self::Line(_) => GeometryType::Line,
            Self::Circle(_) | Self::Arc(_) => GeometryType::Circle,
            Self::Polygon(_) => GeometryType::Polygon,
            Self::Plot(_) => GeometryType::Plot,
            Self::Angle(_) => GeometryType::Angle,
        }
    }

    /// Short lowercase name of the concrete variant.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Arc(_) => "arc",
            other => other.geometry_type().name(),
        }
    }

    /// Start and end of the shape's extent, for shapes that have one.
    ///
    /// A point starts and ends at itself. Lines and arcs use their
    /// endpoints; polygons run from the first vertex to the last distinct
    /// vertex.
    pub fn extent(&self) -> Option<(Point2, Point2)> {
        match self {
            Self::Point(p) => Some((*p, *p)),
            Self::Line(line) => Some(line.endpoints()),
            Self::Arc(arc) => Some(arc.endpoints()),
            Self::Polygon(polygon) => {
                let unique = polygon.unique_vertices();
                Some((*unique.first()?, *unique.last()?))
            }
            Self::Circle(_) | Self::Plot(_) | Self::Angle(_) => None,
        }
    }

    pub fn as_point_like(&self) -> Option<&dyn PointLike> {
        match self {
            Self::Point(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_line_like(&self) -> Option<&dyn LineLike> {
        match self {
            Self::Line(line) => Some(line),
            Self::Arc(arc) => Some(arc),
            _ => None,
        }
    }

    pub fn as_circle_like(&self) -> Option<&dyn CircleLike> {
        match self {
            Self::Circle(circle) => Some(circle),
            Self::Arc(arc) => Some(arc),
            _ => None,
        }
    }

    pub fn as_polygon_like(&self) -> Option<&dyn PolygonLike> {
        match self {
            Self::Polygon(polygon) => Some(polygon),
            _ => None,
        }
    }

    /// Returns `true` when every coordinate is finite.
    pub fn is_finite(&self) -> bool {
        self.atomic_values().iter().all(|v| v.is_finite())
    }
}

impl AtomicValues for Shape {
    /// Plots have no finite numeric projection and yield an empty list.
    fn atomic_values(&self) -> Vec<f64> {
        match self {
            Self::Point(p) => p.atomic_values(),
            Self::Line(line) => line.atomic_values(),
            Self::Circle(circle) => circle.atomic_values(),
            Self::Arc(arc) => arc.atomic_values(),
            Self::Polygon(polygon) => polygon.atomic_values(),
            Self::Plot(_) => Vec::new(),
            Self::Angle(angle) => angle.atomic_values(),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Point(p) => write!(f, "point{p}"),
            Self::Line(line) => write!(f, "line[{} -> {}]", line.start, line.end),
            Self::Circle(circle) => {
                write!(f, "circle[center={}, r={}]", circle.center, circle.radius)
            }
            Self::Arc(arc) => write!(
                f,
                "arc[center={}, r={}, from {}° sweep {}°]",
                arc.center, arc.radius, arc.start_angle, arc.sweep
            ),
            Self::Polygon(polygon) => {
                write!(f, "polygon[")?;
                for (i, v) in polygon.unique_vertices().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, "]")
            }
            Self::Plot(plot) => match plot.domain {
                Some((min, max)) => write!(f, "plot[{min}..{max}]"),
                None => write!(f, "plot"),
            },
            Self::Angle(angle) => write!(f, "angle[{:.4}°]", angle.degrees()),
        }
    }
}
