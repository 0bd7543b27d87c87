//! 3D constructors and measurements.

use compass_core::{
    error::GeometryError,
    geometry::Point3,
    shape::Shape,
    space::{self, Line3, Plane, SpaceShape, ZERO_VECTOR_EPSILON},
};

use super::{Call, Outcome};
use crate::{
    error::{ExpressionError, Result},
    value::Value,
};

/// A 3D operand. 2D points and lines are lifted onto the `z = 0` plane.
fn space_operand(call: &Call<'_>, i: usize) -> Result<SpaceShape> {
    match call.args[i].value() {
        Value::Space(shape) => Ok(*shape),
        Value::Shape(Shape::Point(p)) => Ok(SpaceShape::Point((*p).into())),
        Value::Shape(Shape::Line(line)) => Ok(SpaceShape::Line(Line3::new(
            line.start().into(),
            line.end().into(),
        ))),
        other => Err(call.type_error(format!(
            "argument {} must be a 3D point, line or plane, got {}",
            i + 1,
            other.kind_name()
        ))),
    }
}

fn space_point(call: &Call<'_>, i: usize, what: &str) -> Result<Point3> {
    match space_operand(call, i)? {
        SpaceShape::Point(p) => Ok(p),
        other => Err(call.type_error(format!("{what} must be a 3D point, got {}", other.kind_name()))),
    }
}

/// Lifts a geometry error from a 3D measurement: an unsupported pair is a
/// type error, a degenerate vector a domain error.
fn measure_error(call: &Call<'_>, err: GeometryError) -> ExpressionError {
    match err {
        GeometryError::Degenerate(message) => call.type_error(message),
        other => call.geometry_error(other),
    }
}

/// `point3d(x, y, z)` or `point3d(point, z)`.
pub fn point3d(call: &Call<'_>) -> Result<Outcome> {
    match call.flatten().as_slice() {
        &[x, y, z] => Ok(Value::Space(SpaceShape::Point(Point3::new(x, y, z))).into()),
        other => Err(call.arity_error(format!("expected 3 coordinates, got {}", other.len()))),
    }
}

/// `line3d(p, q)` or six coordinates.
pub fn line3d(call: &Call<'_>) -> Result<Outcome> {
    match call.flatten().as_slice() {
        &[x1, y1, z1, x2, y2, z2] => Ok(Value::Space(SpaceShape::Line(Line3::new(
            Point3::new(x1, y1, z1),
            Point3::new(x2, y2, z2),
        )))
        .into()),
        other => Err(call.arity_error(format!("expected 6 coordinates, got {}", other.len()))),
    }
}

/// `plane3d(a, b, c, d)`, `plane3d(p1, p2, p3)` or `plane3d(point, normal)`.
///
/// The normal may be given as a point (read as a vector from the origin) or
/// as a line, whose direction is used.
pub fn plane3d(call: &Call<'_>) -> Result<Outcome> {
    let plane = match call.args.len() {
        4 => {
            let a = call.scalar(0, "a")?;
            let b = call.scalar(1, "b")?;
            let c = call.scalar(2, "c")?;
            let d = call.scalar(3, "d")?;
            Plane::from_equation(a, b, c, d).map_err(|e| call.geometry_error(e))?
        }
        3 => {
            let p1 = space_point(call, 0, "first point")?;
            let p2 = space_point(call, 1, "second point")?;
            let p3 = space_point(call, 2, "third point")?;
            Plane::from_three_points(p1, p2, p3).map_err(|e| call.geometry_error(e))?
        }
        2 => {
            let point = space_point(call, 0, "point")?;
            let normal = match space_operand(call, 1)? {
                SpaceShape::Point(n) => n,
                SpaceShape::Line(line) => line.direction(),
                SpaceShape::Plane(_) => {
                    return Err(call.type_error("normal must be a point or a line, got plane3d"));
                }
            };
            if normal.length() < ZERO_VECTOR_EPSILON {
                return Err(call.geometry_error(GeometryError::ZeroNormal));
            }
            Plane::new(point, normal)
        }
        n => {
            return Err(call.arity_error(format!(
                "expected an equation, three points, or a point and a normal, got {n} arguments"
            )));
        }
    };
    Ok(Value::Space(SpaceShape::Plane(plane)).into())
}

pub fn distance3d(call: &Call<'_>) -> Result<Outcome> {
    call.expect_args(2, 2, "two 3D shapes")?;
    let (a, b) = (space_operand(call, 0)?, space_operand(call, 1)?);
    let distance = space::distance(a, b).map_err(|e| measure_error(call, e))?;
    Ok(Value::Scalar(distance).into())
}

/// Angle in degrees between two lines or two planes.
pub fn angle3d(call: &Call<'_>) -> Result<Outcome> {
    call.expect_args(2, 2, "two lines or two planes")?;
    let (a, b) = (space_operand(call, 0)?, space_operand(call, 1)?);
    let degrees = space::angle_between(a, b).map_err(|e| measure_error(call, e))?;
    Ok(Value::Scalar(degrees).into())
}
