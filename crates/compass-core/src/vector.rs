//! Direction-vector arithmetic on start → end pairs.
//!
//! A vector here is a [`Line`] read as a directed arrow. Results that are
//! themselves vectors are anchored at a meaningful start point so they can be
//! drawn.

use crate::{
    error::{GeometryError, Result},
    geometry::{Point2, rad_to_deg},
    shape::{Line, LineLike},
};

const ZERO_MAGNITUDE_SQ: f64 = 1e-20;

/// Unit direction of the vector.
///
/// # Errors
///
/// Returns [`GeometryError::ZeroLength`] for a zero-length vector.
pub fn unit(v: Line) -> Result<Point2> {
    v.direction().normalize().ok_or(GeometryError::ZeroLength)
}

pub fn magnitude(v: Line) -> f64 {
    v.length()
}

/// Direction angle in degrees, in `[0, 360)`.
pub fn angle(v: Line) -> f64 {
    let d = v.direction();
    rad_to_deg(d.y().atan2(d.x())).rem_euclid(360.0)
}

pub fn dot(a: Line, b: Line) -> f64 {
    a.direction().dot(b.direction())
}

/// Scalar cross product; positive when `b` turns counter-clockwise from `a`.
pub fn cross(a: Line, b: Line) -> f64 {
    a.direction().cross(b.direction())
}

/// Unsigned angle between two vectors in degrees, in `[0, 180]`.
///
/// A zero-length operand yields `0`.
pub fn angle_between(a: Line, b: Line) -> f64 {
    let (da, db) = (a.direction(), b.direction());
    let mags = da.hypot() * db.hypot();
    if da.hypot() < 1e-10 || db.hypot() < 1e-10 {
        return 0.0;
    }
    rad_to_deg((da.dot(db) / mags).clamp(-1.0, 1.0).acos())
}

/// Signed angle from `a` to `b` in degrees, in `[-180, 180]`.
pub fn signed_angle_between(a: Line, b: Line) -> f64 {
    let (da, db) = (a.direction(), b.direction());
    rad_to_deg(da.cross(db).atan2(da.dot(db)))
}

/// Vector projection of `a` onto `b`.
///
/// The result is anchored at `b`'s start together with its signed scalar
/// length (negative when `a` points against `b`). A zero-length `b` projects
/// to a zero vector at its start.
pub fn project_onto(a: Line, b: Line) -> (Line, f64) {
    let db = b.direction();
    let mag_sq = db.length_squared();
    if mag_sq < ZERO_MAGNITUDE_SQ {
        return (Line::new(b.start(), b.start()), 0.0);
    }
    let scalar = a.direction().dot(db) / mag_sq;
    let projection = db.scale(scalar);
    (
        Line::new(b.start(), b.start().add_point(projection)),
        projection.hypot() * scalar.signum(),
    )
}

/// Splits `a` into components parallel and perpendicular to `b`.
///
/// The parallel part starts at `b`'s start and the perpendicular part starts
/// where the parallel part ends.
pub fn decompose(a: Line, b: Line) -> (Line, Line) {
    let da = a.direction();
    let db = b.direction();
    let origin = b.start();
    let mag_sq = db.length_squared();

    let parallel = if mag_sq < ZERO_MAGNITUDE_SQ {
        Point2::default()
    } else {
        db.scale(da.dot(db) / mag_sq)
    };
    let perpendicular = da.sub_point(parallel);
    let joint = origin.add_point(parallel);

    (
        Line::new(origin, joint),
        Line::new(joint, joint.add_point(perpendicular)),
    )
}
