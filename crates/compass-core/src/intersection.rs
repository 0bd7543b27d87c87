//! Intersections between lines, segments, circles and polygons.
//!
//! Every function is pure and total over its inputs: "no intersection" is an
//! empty result, never an error.
//!
//! # Decision boundaries
//!
//! - Lines are parallel when the cross product of their directions is below
//!   [`PARALLEL_EPSILON`]. Coincident lines are reported as parallel.
//! - A line–circle discriminant within `±`[`TANGENT_EPSILON`] is a tangent.
//! - Circle–circle case splits use [`TANGENT_EPSILON`] on center distances.
//! - Line–polygon results closer than [`DEDUP_EPSILON`] are merged.

use crate::{
    geometry::Point2,
    shape::{Circle, CircleLike, Line},
};

/// Cross-product threshold below which two directions count as parallel.
pub const PARALLEL_EPSILON: f64 = 1e-10;

/// Threshold for tangency tests on discriminants and center distances.
pub const TANGENT_EPSILON: f64 = 1e-10;

/// Distance below which two line–polygon hits are the same point.
pub const DEDUP_EPSILON: f64 = 1e-8;

/// Intersection of two infinite lines.
///
/// Returns `None` when the lines are parallel, including when they coincide.
///
/// # Examples
///
/// ```
/// # use compass_core::{geometry::Point2, intersection::line_line, shape::Line};
/// let horizontal = Line::new(Point2::new(-5.0, 0.0), Point2::new(5.0, 0.0));
/// let vertical = Line::new(Point2::new(0.0, -5.0), Point2::new(0.0, 5.0));
/// let hit = line_line(horizontal, vertical).unwrap();
/// assert!(hit.approx_eq(Point2::new(0.0, 0.0), 1e-12));
/// ```
pub fn line_line(l1: Line, l2: Line) -> Option<Point2> {
    let (t, _) = line_parameters(l1, l2)?;
    Some(l1.point_at(t))
}

/// Intersection of two bounded segments; both parameters must lie in `[0, 1]`.
pub fn segment_segment(s1: Line, s2: Line) -> Option<Point2> {
    let (t, u) = line_parameters(s1, s2)?;
    (unit_interval(t) && unit_interval(u)).then(|| s1.point_at(t))
}

/// Intersection of an infinite line with a bounded segment.
///
/// The hit is computed from the segment's parametrization.
pub fn line_segment(line: Line, segment: Line) -> Option<Point2> {
    let (_, u) = line_parameters(line, segment)?;
    unit_interval(u).then(|| segment.point_at(u))
}

/// Parameters `(t, u)` of the crossing along `l1` and `l2`.
fn line_parameters(l1: Line, l2: Line) -> Option<(f64, f64)> {
    let d1 = l1.end().sub_point(l1.start());
    let d2 = l2.end().sub_point(l2.start());
    let cross = d1.cross(d2);
    if cross.abs() < PARALLEL_EPSILON {
        return None;
    }
    let offset = l2.start().sub_point(l1.start());
    let t = offset.cross(d2) / cross;
    let u = offset.cross(d1) / cross;
    Some((t, u))
}

fn unit_interval(t: f64) -> bool {
    (0.0..=1.0).contains(&t)
}

/// Parameters along `line` where it meets the circle, in ascending order.
fn circle_parameters(line: Line, circle: Circle) -> Vec<f64> {
    let d = line.end().sub_point(line.start());
    let f = line.start().sub_point(circle.center());

    let a = d.length_squared();
    if a < 1e-20 {
        return Vec::new();
    }
    let b = 2.0 * f.dot(d);
    let c = f.length_squared() - circle.radius() * circle.radius();
    let discriminant = b * b - 4.0 * a * c;

    if discriminant < -TANGENT_EPSILON {
        Vec::new()
    } else if discriminant < TANGENT_EPSILON {
        vec![-b / (2.0 * a)]
    } else {
        let root = discriminant.sqrt();
        vec![(-b - root) / (2.0 * a), (-b + root) / (2.0 * a)]
    }
}

/// Intersections of an infinite line with a circle.
///
/// Returns 0, 1 (tangent) or 2 points, ordered along the line's own
/// start → end parametrization.
pub fn line_circle(line: Line, circle: Circle) -> Vec<Point2> {
    circle_parameters(line, circle)
        .into_iter()
        .map(|t| line.point_at(t))
        .collect()
}

/// Intersections of a bounded segment with a circle.
pub fn segment_circle(segment: Line, circle: Circle) -> Vec<Point2> {
    circle_parameters(segment, circle)
        .into_iter()
        .filter(|&t| unit_interval(t))
        .map(|t| segment.point_at(t))
        .collect()
}

/// Intersections of two circles.
///
/// Radii are taken by absolute value. The cases, in order:
///
/// - concentric centers: no points, even for identical circles
/// - separated (`d > r1 + r2`): no points
/// - nested (`d < |r1 - r2|`): no points
/// - external tangent: one point on the center line
/// - internal tangent: one point, on the far side of the larger circle
/// - otherwise two points at `±α` from the center-to-center bearing, `+α` first
///
/// # Examples
///
/// ```
/// # use compass_core::{geometry::Point2, intersection::circle_circle, shape::Circle};
/// let a = Circle::new(Point2::new(-2.0, 0.0), 5.0);
/// let b = Circle::new(Point2::new(2.0, 0.0), 5.0);
/// let points = circle_circle(a, b);
/// assert_eq!(points.len(), 2);
/// assert!((points[0].y() - 21f64.sqrt()).abs() < 1e-9);
/// ```
pub fn circle_circle(c1: Circle, c2: Circle) -> Vec<Point2> {
    let r1 = c1.radius().abs();
    let r2 = c2.radius().abs();
    let delta = c2.center().sub_point(c1.center());
    let d = delta.hypot();

    if d < TANGENT_EPSILON {
        return Vec::new();
    }
    if d > r1 + r2 + TANGENT_EPSILON {
        return Vec::new();
    }
    if d < (r1 - r2).abs() - TANGENT_EPSILON {
        return Vec::new();
    }

    if (d - (r1 + r2)).abs() < TANGENT_EPSILON {
        return vec![c1.center().add_point(delta.scale(r1 / d))];
    }

    if (d - (r1 - r2).abs()).abs() < TANGENT_EPSILON {
        let offset = delta.scale(r1 / d);
        let point = if r1 > r2 {
            c1.center().add_point(offset)
        } else {
            c1.center().sub_point(offset)
        };
        return vec![point];
    }

    let cos_alpha = (r1 * r1 + d * d - r2 * r2) / (2.0 * r1 * d);
    let alpha = cos_alpha.clamp(-1.0, 1.0).acos();
    let base = delta.y().atan2(delta.x());

    [base + alpha, base - alpha]
        .into_iter()
        .map(|angle| {
            Point2::new(
                c1.center().x() + r1 * angle.cos(),
                c1.center().y() + r1 * angle.sin(),
            )
        })
        .collect()
}

/// Intersections of an infinite line with a polygon's edges.
///
/// Each edge between consecutive vertices (wrapping around) is tested as a
/// bounded segment. Points closer than [`DEDUP_EPSILON`] to an earlier hit are
/// dropped, so a crossing through a shared vertex is reported once. A
/// zero-length closing edge contributes nothing.
pub fn line_polygon(line: Line, vertices: &[Point2]) -> Vec<Point2> {
    let n = vertices.len();
    let mut hits: Vec<Point2> = Vec::new();

    for i in 0..n {
        let edge = Line::new(vertices[i], vertices[(i + 1) % n]);
        let Some(hit) = line_segment(line, edge) else {
            continue;
        };
        if !hits.iter().any(|p| p.approx_eq(hit, DEDUP_EPSILON)) {
            hits.push(hit);
        }
    }

    hits
}

/// Returns `true` when `point` lies on the segment within `tolerance`.
pub fn is_point_on_segment(point: Point2, segment: Line, tolerance: f64) -> bool {
    let (a, b) = (segment.start(), segment.end());
    let within = |v: f64, lo: f64, hi: f64| v >= lo.min(hi) - tolerance && v <= lo.max(hi) + tolerance;
    if !within(point.x(), a.x(), b.x()) || !within(point.y(), a.y(), b.y()) {
        return false;
    }

    let d = b.sub_point(a);
    let len_sq = d.length_squared();
    if len_sq < 1e-20 {
        return point.distance(a) <= tolerance;
    }

    let distance = point.sub_point(a).cross(d).abs() / len_sq.sqrt();
    distance <= tolerance
}

/// The point of the segment closest to `point`.
pub fn closest_point_on_segment(point: Point2, segment: Line) -> Point2 {
    let d = segment.end().sub_point(segment.start());
    let len_sq = d.length_squared();
    if len_sq < 1e-20 {
        return segment.start();
    }
    let t = (point.sub_point(segment.start()).dot(d) / len_sq).clamp(0.0, 1.0);
    segment.point_at(t)
}
