//! Circle constructions: points, tangents, normals, chords and circles
//! built from other points.
//!
//! Angles are in degrees, measured counter-clockwise from +X.

use std::f64::consts::PI;

use crate::{
    geometry::{Point2, deg_to_rad, rad_to_deg},
    shape::{Circle, CircleLike, Line},
    triangle::Triangle,
};

/// Default tangent segment length.
pub const DEFAULT_TANGENT_LENGTH: f64 = 2.0;

/// Where a normal segment sits relative to the circle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NormalPlacement {
    /// Centred on the circle.
    #[default]
    Center,
    /// Ends on the circle, pointing inward.
    Inside,
    /// Starts on the circle, pointing outward.
    Outside,
}

/// The point of the circle at `angle_deg`.
pub fn point_at_angle(circle: &(impl CircleLike + ?Sized), angle_deg: f64) -> Point2 {
    let rad = deg_to_rad(angle_deg);
    let center = circle.center();
    Point2::new(
        center.x() + circle.radius() * rad.cos(),
        center.y() + circle.radius() * rad.sin(),
    )
}

/// Bearing of `point` as seen from `center`, in `[0, 360)` degrees.
pub fn angle_of_point(center: Point2, point: Point2) -> f64 {
    let d = point.sub_point(center);
    rad_to_deg(d.y().atan2(d.x())).rem_euclid(360.0)
}

/// Tangent segment of `length` centred on the touch point at `angle_deg`.
///
/// The segment runs in the counter-clockwise direction of travel.
pub fn tangent_at_angle(
    circle: &(impl CircleLike + ?Sized),
    angle_deg: f64,
    length: f64,
) -> Line {
    let rad = deg_to_rad(angle_deg);
    let touch = point_at_angle(circle, angle_deg);
    let half = Point2::new(-rad.sin(), rad.cos()).scale(length / 2.0);
    Line::new(touch.sub_point(half), touch.add_point(half))
}

/// Normal segment through the point at `angle_deg`.
///
/// `length` defaults to the diameter.
pub fn normal_at_angle(
    circle: &(impl CircleLike + ?Sized),
    angle_deg: f64,
    length: Option<f64>,
    placement: NormalPlacement,
) -> Line {
    let rad = deg_to_rad(angle_deg);
    let dir = Point2::new(rad.cos(), rad.sin());
    let touch = point_at_angle(circle, angle_deg);
    let total = length.unwrap_or(circle.radius() * 2.0);
    let (from, to) = match placement {
        NormalPlacement::Center => (-total / 2.0, total / 2.0),
        NormalPlacement::Inside => (-total, 0.0),
        NormalPlacement::Outside => (0.0, total),
    };
    Line::new(
        touch.add_point(dir.scale(from)),
        touch.add_point(dir.scale(to)),
    )
}

/// The chord between the points at two angles.
pub fn chord(
    circle: &(impl CircleLike + ?Sized),
    angle1_deg: f64,
    angle2_deg: f64,
) -> Line {
    Line::new(
        point_at_angle(circle, angle1_deg),
        point_at_angle(circle, angle2_deg),
    )
}

/// Length of the chord subtending `angle_deg`.
pub fn chord_length(radius: f64, angle_deg: f64) -> f64 {
    2.0 * radius * (deg_to_rad(angle_deg) / 2.0).sin()
}

pub fn arc_length(radius: f64, angle_deg: f64) -> f64 {
    radius * deg_to_rad(angle_deg)
}

pub fn sector_area(radius: f64, angle_deg: f64) -> f64 {
    radius * radius * deg_to_rad(angle_deg) / 2.0
}

/// Area between a chord and its arc.
pub fn segment_area(radius: f64, angle_deg: f64) -> f64 {
    let rad = deg_to_rad(angle_deg);
    radius * radius / 2.0 * (rad - rad.sin())
}

/// The circle through three points (the circumcircle of their triangle).
///
/// Collinear points give the centroid as center and an infinite radius.
pub fn from_three_points(p1: Point2, p2: Point2, p3: Point2) -> Circle {
    let triangle = Triangle::new(p1, p2, p3);
    Circle::new(triangle.circumcenter(), triangle.circumradius())
}

/// The circle with `p1`–`p2` as a diameter.
pub fn from_diameter(p1: Point2, p2: Point2) -> Circle {
    Circle::new(p1.midpoint(p2), p1.distance(p2) / 2.0)
}

pub fn from_center_and_point(center: Point2, on_circle: Point2) -> Circle {
    Circle::new(center, center.distance(on_circle))
}

/// Returns `true` when `point` lies inside or on the circle.
pub fn contains_point(
    circle: &(impl CircleLike + ?Sized),
    point: Point2,
    tolerance: f64,
) -> bool {
    point.distance(circle.center()) <= circle.radius().abs() + tolerance
}

/// The common external tangents of two circles.
///
/// Each line runs from its touch point on `c1` to its touch point on `c2`.
/// Returns no lines for concentric circles or when one circle contains the
/// other, one line when they touch internally, otherwise two.
pub fn external_tangent_lines(
    c1: &(impl CircleLike + ?Sized),
    c2: &(impl CircleLike + ?Sized),
) -> Vec<Line> {
    let (r1, r2) = (c1.radius().abs(), c2.radius().abs());
    tangent_lines(c1.center(), r1, c2.center(), r2, r1 - r2, 1.0)
}

/// The common internal (crossing) tangents of two circles.
///
/// Returns no lines when the circles overlap or are concentric, one line when
/// they touch externally, otherwise two.
pub fn internal_tangent_lines(
    c1: &(impl CircleLike + ?Sized),
    c2: &(impl CircleLike + ?Sized),
) -> Vec<Line> {
    let (r1, r2) = (c1.radius().abs(), c2.radius().abs());
    let d = c1.center().distance(c2.center());
    if d < r1 + r2 - 1e-10 {
        return Vec::new();
    }
    tangent_lines(c1.center(), r1, c2.center(), r2, r1 + r2, -1.0)
}

/// Shared tangent construction. `side` is `+1` when the second touch point
/// lies on the same side as the first, `-1` for crossing tangents.
fn tangent_lines(
    center1: Point2,
    r1: f64,
    center2: Point2,
    r2: f64,
    radius_term: f64,
    side: f64,
) -> Vec<Line> {
    let delta = center2.sub_point(center1);
    let d = delta.hypot();
    if d < 1e-10 {
        return Vec::new();
    }
    let sin_a = radius_term / d;
    if sin_a.abs() > 1.0 + 1e-10 {
        return Vec::new();
    }
    let a = sin_a.clamp(-1.0, 1.0).asin();
    let base = delta.y().atan2(delta.x());

    let mut angles = vec![base + PI / 2.0 - a];
    if (sin_a.abs() - 1.0).abs() > 1e-10 {
        angles.push(base - PI / 2.0 + a);
    }

    angles
        .into_iter()
        .map(|angle| {
            let dir = Point2::new(angle.cos(), angle.sin());
            Line::new(
                center1.add_point(dir.scale(r1)),
                center2.add_point(dir.scale(side * r2)),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use super::*;
    use crate::shape::LineLike;

    fn unit_circle_at(x: f64, y: f64, r: f64) -> Circle {
        Circle::new(Point2::new(x, y), r)
    }

    #[test]
    fn test_point_and_angle_round_trip() {
        let c = unit_circle_at(1.0, 1.0, 2.0);
        let p = point_at_angle(&c, 90.0);
        assert!(p.approx_eq(Point2::new(1.0, 3.0), 1e-12));
        assert!(approx_eq!(f64, angle_of_point(c.center(), p), 90.0, epsilon = 1e-12));
        assert!(approx_eq!(
            f64,
            angle_of_point(Point2::default(), Point2::new(0.0, -1.0)),
            270.0
        ));
    }

    #[test]
    fn test_tangent_at_angle() {
        let tangent = tangent_at_angle(&unit_circle_at(0.0, 0.0, 5.0), 0.0, 2.0);
        assert!(tangent.start().approx_eq(Point2::new(5.0, -1.0), 1e-12));
        assert!(tangent.end().approx_eq(Point2::new(5.0, 1.0), 1e-12));
    }

    #[test]
    fn test_normal_placements() {
        let c = unit_circle_at(0.0, 0.0, 2.0);
        let center = normal_at_angle(&c, 0.0, None, NormalPlacement::Center);
        assert!(center.start().approx_eq(Point2::new(0.0, 0.0), 1e-12));
        assert!(center.end().approx_eq(Point2::new(4.0, 0.0), 1e-12));

        let outside = normal_at_angle(&c, 0.0, Some(1.0), NormalPlacement::Outside);
        assert!(outside.start().approx_eq(Point2::new(2.0, 0.0), 1e-12));
        assert!(outside.end().approx_eq(Point2::new(3.0, 0.0), 1e-12));

        let inside = normal_at_angle(&c, 0.0, Some(1.0), NormalPlacement::Inside);
        assert!(inside.end().approx_eq(Point2::new(2.0, 0.0), 1e-12));
    }

    #[test]
    fn test_chord_and_arc_measures() {
        let c = unit_circle_at(0.0, 0.0, 1.0);
        assert!(approx_eq!(f64, chord(&c, 0.0, 180.0).length(), 2.0, epsilon = 1e-12));
        assert!(approx_eq!(f64, chord_length(1.0, 180.0), 2.0, epsilon = 1e-12));
        assert!(approx_eq!(f64, arc_length(2.0, 180.0), 2.0 * PI));
        assert!(approx_eq!(f64, sector_area(1.0, 360.0), PI));
        assert!(approx_eq!(f64, segment_area(1.0, 180.0), PI / 2.0, epsilon = 1e-12));
    }

    #[test]
    fn test_circle_constructions() {
        let c = from_three_points(
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(-1.0, 0.0),
        );
        assert!(c.center().approx_eq(Point2::default(), 1e-12));
        assert!(approx_eq!(f64, c.radius(), 1.0, epsilon = 1e-12));

        let d = from_diameter(Point2::new(0.0, 0.0), Point2::new(4.0, 0.0));
        assert_eq!(d.center(), Point2::new(2.0, 0.0));
        assert_eq!(d.radius(), 2.0);

        let e = from_center_and_point(Point2::new(1.0, 1.0), Point2::new(4.0, 5.0));
        assert_eq!(e.radius(), 5.0);
        assert!(contains_point(&e, Point2::new(4.0, 5.0), 1e-8));
        assert!(!contains_point(&e, Point2::new(10.0, 5.0), 1e-8));
    }

    #[test]
    fn test_external_tangents_of_equal_circles() {
        let lines = external_tangent_lines(
            &unit_circle_at(0.0, 0.0, 1.0),
            &unit_circle_at(5.0, 0.0, 1.0),
        );
        assert_eq!(lines.len(), 2);
        assert!(lines[0].start().approx_eq(Point2::new(0.0, 1.0), 1e-12));
        assert!(lines[0].end().approx_eq(Point2::new(5.0, 1.0), 1e-12));
        assert!(lines[1].start().approx_eq(Point2::new(0.0, -1.0), 1e-12));
    }

    #[test]
    fn test_external_tangents_nested_and_touching() {
        let nested = external_tangent_lines(
            &unit_circle_at(0.0, 0.0, 10.0),
            &unit_circle_at(1.0, 0.0, 2.0),
        );
        assert!(nested.is_empty());

        let touching = external_tangent_lines(
            &unit_circle_at(0.0, 0.0, 10.0),
            &unit_circle_at(5.0, 0.0, 5.0),
        );
        assert_eq!(touching.len(), 1);
    }

    #[test]
    fn test_internal_tangents() {
        let lines = internal_tangent_lines(
            &unit_circle_at(0.0, 0.0, 1.0),
            &unit_circle_at(4.0, 0.0, 1.0),
        );
        assert_eq!(lines.len(), 2);
        for line in &lines {
            // Crossing tangents pass through the midpoint between equal circles.
            let mid = line.start().midpoint(line.end());
            assert!(mid.approx_eq(Point2::new(2.0, 0.0), 1e-12));
        }

        let overlapping = internal_tangent_lines(
            &unit_circle_at(0.0, 0.0, 2.0),
            &unit_circle_at(1.0, 0.0, 2.0),
        );
        assert!(overlapping.is_empty());

        let touching = internal_tangent_lines(
            &unit_circle_at(0.0, 0.0, 1.0),
            &unit_circle_at(2.0, 0.0, 1.0),
        );
        assert_eq!(touching.len(), 1);
    }
}
