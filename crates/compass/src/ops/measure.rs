//! Lengths and vector products.

use compass_core::{
    error::GeometryError,
    geometry::{Point2, Point3},
    shape::{Line, LineLike, Shape},
    space::{Line3, SpaceShape, ZERO_VECTOR_EPSILON},
    vector,
};

use super::{Call, Outcome};
use crate::{error::Result, value::Value};

/// A directed operand of `dot`, `cross` or `uv`.
///
/// Extent-bearing shapes point from start to end; a point is read as the
/// vector from the origin.
enum Direction {
    Flat(Line),
    Space(Line3),
}

fn direction(call: &Call<'_>, i: usize) -> Result<Direction> {
    let value = call.args[i].value();
    if let Some(p) = value.as_point() {
        return Ok(Direction::Flat(Line::new(Point2::default(), p)));
    }
    if let Some((start, end)) = value.extent() {
        return Ok(Direction::Flat(Line::new(start, end)));
    }
    match value {
        Value::Space(SpaceShape::Line(line)) => Ok(Direction::Space(*line)),
        Value::Space(SpaceShape::Point(p)) => {
            Ok(Direction::Space(Line3::new(Point3::default(), *p)))
        }
        other => Err(call.type_error(format!("{} has no direction", other.kind_name()))),
    }
}

fn directions(call: &Call<'_>) -> Result<(Direction, Direction)> {
    call.expect_args(2, 2, "two vectors")?;
    Ok((direction(call, 0)?, direction(call, 1)?))
}

fn check_flat(call: &Call<'_>, v: Line) -> Result<()> {
    if v.length() < ZERO_VECTOR_EPSILON {
        return Err(call.geometry_error(GeometryError::ZeroLength));
    }
    Ok(())
}

fn check_space(call: &Call<'_>, v: Line3) -> Result<()> {
    if v.length() < ZERO_VECTOR_EPSILON {
        return Err(call.geometry_error(GeometryError::ZeroLength));
    }
    Ok(())
}

/// `distance` and `mag`: the extent length of one shape, the distance
/// between two points, or the magnitude of `(x, y)`.
pub fn distance(call: &Call<'_>) -> Result<Outcome> {
    call.expect_args(1, 2, "a shape, two points, or two numbers")?;

    let length = if call.args.len() == 1 {
        let value = call.args[0].value();
        match (value, value.extent()) {
            (Value::Shape(Shape::Point(p)), _) => p.hypot(),
            (_, Some((start, end))) => vector::magnitude(Line::new(start, end)),
            (Value::Space(SpaceShape::Line(line)), None) => line.length(),
            _ => {
                return Err(call.type_error(format!("{} has no length", value.kind_name())));
            }
        }
    } else if call.is_scalar(0) && call.is_scalar(1) {
        let x = call.scalar(0, "x")?;
        let y = call.scalar(1, "y")?;
        x.hypot(y)
    } else if call.is_point(0) && call.is_point(1) {
        call.point(0, "first point")?.distance(call.point(1, "second point")?)
    } else {
        match (call.args[0].value(), call.args[1].value()) {
            (Value::Space(SpaceShape::Point(p)), Value::Space(SpaceShape::Point(q))) => {
                p.distance(*q)
            }
            (a, b) => {
                return Err(call.type_error(format!(
                    "expected two points or two numbers, got {} and {}",
                    a.kind_name(),
                    b.kind_name()
                )));
            }
        }
    };
    Ok(Value::Scalar(length).into())
}

pub fn dot(call: &Call<'_>) -> Result<Outcome> {
    let product = match directions(call)? {
        (Direction::Flat(a), Direction::Flat(b)) => {
            check_flat(call, a)?;
            check_flat(call, b)?;
            vector::dot(a, b)
        }
        (Direction::Space(a), Direction::Space(b)) => {
            check_space(call, a)?;
            check_space(call, b)?;
            a.direction().dot(b.direction())
        }
        _ => return Err(call.type_error("cannot mix 2D and 3D vectors")),
    };
    Ok(Value::Scalar(product).into())
}

/// The 2D cross product is a scalar; the 3D one is a vector drawn from the
/// origin.
pub fn cross(call: &Call<'_>) -> Result<Outcome> {
    let value = match directions(call)? {
        (Direction::Flat(a), Direction::Flat(b)) => Value::Scalar(vector::cross(a, b)),
        (Direction::Space(a), Direction::Space(b)) => {
            let product = a.direction().cross(b.direction());
            Value::Space(SpaceShape::Line(Line3::new(Point3::default(), product)))
        }
        _ => return Err(call.type_error("cannot mix 2D and 3D vectors")),
    };
    Ok(value.into())
}

/// Unit vector anchored at the start of its operand.
pub fn unit_vector(call: &Call<'_>) -> Result<Outcome> {
    call.expect_args(1, 1, "one vector")?;
    let value = match direction(call, 0)? {
        Direction::Flat(v) => {
            let unit = vector::unit(v).map_err(|e| call.geometry_error(e))?;
            Value::Shape(Shape::Line(Line::new(v.start(), v.start().add_point(unit))))
        }
        Direction::Space(v) => {
            let unit = v
                .direction()
                .normalize()
                .ok_or_else(|| call.geometry_error(GeometryError::ZeroLength))?;
            Value::Space(SpaceShape::Line(Line3::new(v.start(), v.start().add_point(unit))))
        }
    };
    Ok(value.into())
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use crate::{
        ast::Op,
        context::ExpressionContext,
        error::ErrorKind,
        ops::test_support::{builder, eval},
    };

    fn scalar_of(resolved: &crate::value::Resolved) -> f64 {
        resolved.value().as_scalar().unwrap()
    }

    #[test]
    fn test_distance_forms() {
        let ctx = ExpressionContext::new();
        let mut ast = builder();

        let line = ast.call_numbers(Op::Line, &[0.0, 0.0, 3.0, 4.0]);
        let single = eval(ast.call(Op::Distance, vec![line]), &ctx).unwrap();
        assert!(approx_eq!(f64, scalar_of(&single), 5.0));

        let p = ast.call_numbers(Op::Point, &[1.0, 1.0]);
        let q = ast.call_numbers(Op::Point, &[4.0, 5.0]);
        let pair = eval(ast.call(Op::Distance, vec![p, q]), &ctx).unwrap();
        assert!(approx_eq!(f64, scalar_of(&pair), 5.0));

        let p = ast.call_numbers(Op::Point, &[3.0, 4.0]);
        let from_origin = eval(ast.call(Op::Mag, vec![p]), &ctx).unwrap();
        assert!(approx_eq!(f64, scalar_of(&from_origin), 5.0));

        let magnitude = eval(ast.call_numbers(Op::Mag, &[6.0, 8.0]), &ctx).unwrap();
        assert!(approx_eq!(f64, scalar_of(&magnitude), 10.0));
        assert!(!magnitude.can_play());
    }

    #[test]
    fn test_distance_between_3d_points() {
        let mut ast = builder();
        let p = ast.call_numbers(Op::Point3d, &[1.0, 2.0, 3.0]);
        let q = ast.call_numbers(Op::Point3d, &[3.0, 5.0, 9.0]);
        let resolved = eval(ast.call(Op::Distance, vec![p, q]), &ExpressionContext::new()).unwrap();
        assert!(approx_eq!(f64, scalar_of(&resolved), 7.0));
    }

    #[test]
    fn test_distance_of_circle_is_a_type_error() {
        let mut ast = builder();
        let circle = ast.call_numbers(Op::Circle, &[0.0, 0.0, 1.0]);
        let err = eval(ast.call(Op::Distance, vec![circle]), &ExpressionContext::new())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
    }

    #[test]
    fn test_dot_2d_and_3d() {
        let ctx = ExpressionContext::new();
        let mut ast = builder();

        let a = ast.call_numbers(Op::Vec, &[1.0, 1.0, 3.0, 1.0]);
        let b = ast.call_numbers(Op::Vec, &[0.0, 0.0, 3.0, 4.0]);
        let flat = eval(ast.call(Op::Dot, vec![a, b]), &ctx).unwrap();
        assert!(approx_eq!(f64, scalar_of(&flat), 6.0));

        let a = ast.call_numbers(Op::Line3d, &[0.0, 0.0, 0.0, 1.0, 2.0, 3.0]);
        let b = ast.call_numbers(Op::Line3d, &[1.0, 1.0, 1.0, 2.0, 1.0, 0.0]);
        let space = eval(ast.call(Op::Dot, vec![a, b]), &ctx).unwrap();
        assert!(approx_eq!(f64, scalar_of(&space), -2.0));
    }

    #[test]
    fn test_dot_rejects_zero_and_mixed_vectors() {
        let ctx = ExpressionContext::new();
        let mut ast = builder();

        let zero = ast.call_numbers(Op::Vec, &[1.0, 1.0, 1.0, 1.0]);
        let b = ast.call_numbers(Op::Vec, &[0.0, 0.0, 3.0, 4.0]);
        assert_eq!(
            eval(ast.call(Op::Dot, vec![zero, b]), &ctx).unwrap_err().kind(),
            ErrorKind::Domain
        );

        let a = ast.call_numbers(Op::Vec, &[0.0, 0.0, 1.0, 0.0]);
        let b = ast.call_numbers(Op::Line3d, &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
        assert_eq!(
            eval(ast.call(Op::Dot, vec![a, b]), &ctx).unwrap_err().kind(),
            ErrorKind::Type
        );
    }

    #[test]
    fn test_cross() {
        let ctx = ExpressionContext::new();
        let mut ast = builder();

        let a = ast.call_numbers(Op::Vec, &[0.0, 0.0, 1.0, 0.0]);
        let b = ast.call_numbers(Op::Vec, &[0.0, 0.0, 0.0, 2.0]);
        let flat = eval(ast.call(Op::Cross, vec![a, b]), &ctx).unwrap();
        assert!(approx_eq!(f64, scalar_of(&flat), 2.0));

        let a = ast.call_numbers(Op::Line3d, &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
        let b = ast.call_numbers(Op::Line3d, &[0.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
        let space = eval(ast.call(Op::Cross, vec![a, b]), &ctx).unwrap();
        assert_eq!(space.atomic_values(), vec![0.0, 0.0, 0.0, 0.0, 0.0, 1.0]);
        assert!(space.can_play());
    }

    #[test]
    fn test_unit_vector() {
        let ctx = ExpressionContext::new();
        let mut ast = builder();

        let v = ast.call_numbers(Op::Vec, &[1.0, 1.0, 4.0, 5.0]);
        let unit = eval(ast.call(Op::Uv, vec![v]), &ctx).unwrap();
        let values = unit.atomic_values();
        assert!(approx_eq!(f64, values[2], 1.6, epsilon = 1e-12));
        assert!(approx_eq!(f64, values[3], 1.8, epsilon = 1e-12));

        let zero = ast.call_numbers(Op::Vec, &[2.0, 2.0, 2.0, 2.0]);
        let err = eval(ast.call(Op::Uv, vec![zero]), &ctx).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Domain);
    }
}
