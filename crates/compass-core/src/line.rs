//! Point/line relations on the infinite line through two points.
//!
//! None of these functions treat the [`Line`] as a bounded segment; see
//! [`crate::intersection`] for segment tests.

use crate::{
    geometry::{Point2, deg_to_rad},
    shape::{Line, LineLike},
};

/// Squared length below which a line is treated as a single point.
const DEGENERATE_LENGTH_SQ: f64 = 1e-10;

/// Tolerance used by the parallel/perpendicular predicates.
pub const DIRECTION_EPSILON: f64 = 1e-8;

/// Parameter `t` of the foot of the perpendicular from `point`, so that the
/// foot is `line.point_at(t)`. Degenerate lines yield `0`.
pub fn projection_parameter(point: Point2, line: Line) -> f64 {
    let d = line.direction();
    let len_sq = d.length_squared();
    if len_sq < DEGENERATE_LENGTH_SQ {
        return 0.0;
    }
    point.sub_point(line.start()).dot(d) / len_sq
}

/// Orthogonal projection of `point` onto the line.
///
/// A degenerate line projects everything onto its start point.
pub fn project_point(point: Point2, line: Line) -> Point2 {
    line.point_at(projection_parameter(point, line))
}

/// Mirror image of `point` across the line: `2 · projection − point`.
///
/// # Examples
///
/// ```
/// # use compass_core::{geometry::Point2, line::reflect_point, shape::Line};
/// let x_axis = Line::new(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0));
/// assert_eq!(reflect_point(Point2::new(5.0, 10.0), x_axis), Point2::new(5.0, -10.0));
/// ```
pub fn reflect_point(point: Point2, line: Line) -> Point2 {
    project_point(point, line).scale(2.0).sub_point(point)
}

/// Perpendicular distance from `point` to the line.
pub fn distance_to_point(line: Line, point: Point2) -> f64 {
    point.distance(project_point(point, line))
}

/// A line perpendicular to `line`, centred on `point`.
///
/// The new line has the given `length`, or the source line's length when
/// `None`.
pub fn perpendicular_through(line: Line, point: Point2, length: Option<f64>) -> Line {
    let dir = line.direction().normalize().unwrap_or_default().perpendicular();
    centred_line(point, dir, length.unwrap_or_else(|| line.length()))
}

/// A line parallel to `line`, centred on `point`.
pub fn parallel_through(line: Line, point: Point2, length: Option<f64>) -> Line {
    let dir = line.direction().normalize().unwrap_or_default();
    centred_line(point, dir, length.unwrap_or_else(|| line.length()))
}

fn centred_line(center: Point2, unit: Point2, length: f64) -> Line {
    let half = unit.scale(length / 2.0);
    Line::new(center.sub_point(half), center.add_point(half))
}

/// Keeps the start and moves the end to `start + proportion · direction`.
pub fn extend(line: Line, proportion: f64) -> Line {
    Line::new(line.start(), line.point_at(proportion))
}

/// Moves both ends along the line's own parametrization.
pub fn extend_both(line: Line, start_proportion: f64, end_proportion: f64) -> Line {
    Line::new(line.point_at(start_proportion), line.point_at(end_proportion))
}

/// A line of `length` from `origin` at `angle_deg` from the +X axis.
pub fn from_polar(length: f64, angle_deg: f64, origin: Point2) -> Line {
    let rad = deg_to_rad(angle_deg);
    Line::new(
        origin,
        origin.add_point(Point2::new(length * rad.cos(), length * rad.sin())),
    )
}

pub fn are_parallel(l1: Line, l2: Line) -> bool {
    l1.direction().cross(l2.direction()).abs() < DIRECTION_EPSILON
}

pub fn are_perpendicular(l1: Line, l2: Line) -> bool {
    l1.direction().dot(l2.direction()).abs() < DIRECTION_EPSILON
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use super::*;

    fn x_axis() -> Line {
        Line::new(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0))
    }

    #[test]
    fn test_project_point() {
        assert_eq!(project_point(Point2::new(3.0, 7.0), x_axis()), Point2::new(3.0, 0.0));

        let diagonal = Line::new(Point2::new(0.0, 0.0), Point2::new(1.0, 1.0));
        let foot = project_point(Point2::new(2.0, 0.0), diagonal);
        assert!(foot.approx_eq(Point2::new(1.0, 1.0), 1e-12));
    }

    #[test]
    fn test_project_onto_degenerate_line() {
        let dot = Line::new(Point2::new(2.0, 2.0), Point2::new(2.0, 2.0));
        assert_eq!(project_point(Point2::new(5.0, 5.0), dot), Point2::new(2.0, 2.0));
        assert_eq!(projection_parameter(Point2::new(5.0, 5.0), dot), 0.0);
    }

    #[test]
    fn test_reflect_point() {
        assert_eq!(reflect_point(Point2::new(5.0, 10.0), x_axis()), Point2::new(5.0, -10.0));

        let diagonal = Line::new(Point2::new(0.0, 0.0), Point2::new(1.0, 1.0));
        let mirrored = reflect_point(Point2::new(3.0, 1.0), diagonal);
        assert!(mirrored.approx_eq(Point2::new(1.0, 3.0), 1e-12));
    }

    #[test]
    fn test_distance_to_point() {
        assert!(approx_eq!(
            f64,
            distance_to_point(x_axis(), Point2::new(-20.0, -4.0)),
            4.0
        ));
    }

    #[test]
    fn test_perpendicular_and_parallel_through() {
        let perp = perpendicular_through(x_axis(), Point2::new(5.0, 0.0), Some(4.0));
        assert!(perp.start().approx_eq(Point2::new(5.0, -2.0), 1e-12));
        assert!(perp.end().approx_eq(Point2::new(5.0, 2.0), 1e-12));
        assert!(are_perpendicular(perp, x_axis()));

        let para = parallel_through(x_axis(), Point2::new(0.0, 3.0), None);
        assert!(approx_eq!(f64, para.length(), 10.0));
        assert!(are_parallel(para, x_axis()));
    }

    #[test]
    fn test_extend_and_polar() {
        let line = extend(x_axis(), 1.5);
        assert_eq!(line.end(), Point2::new(15.0, 0.0));

        let both = extend_both(x_axis(), -0.5, 1.5);
        assert_eq!(both.start(), Point2::new(-5.0, 0.0));
        assert_eq!(both.end(), Point2::new(15.0, 0.0));

        let polar = from_polar(2.0, 90.0, Point2::new(1.0, 1.0));
        assert!(polar.end().approx_eq(Point2::new(1.0, 3.0), 1e-12));
    }
}
