//! Points and lines constructed from other shapes.

use compass_core::{
    circle,
    geometry::{Point2, deg_to_rad},
    line,
    shape::{CircleLike, Line, PolygonLike, Shape},
    triangle::Triangle,
};

use super::{Call, Outcome};
use crate::{error::Result, value::Value};

/// Step of the central difference used for plot tangents.
const TANGENT_STEP: f64 = 1e-4;

fn point_value(p: Point2) -> Value {
    Value::Shape(Shape::Point(p))
}

fn line_value(line: Line) -> Value {
    Value::Shape(Shape::Line(line))
}

fn circle_like<'a>(call: &'a Call<'_>, i: usize) -> Result<&'a dyn CircleLike> {
    let shape = call.shape(i, "first argument")?;
    shape
        .as_circle_like()
        .ok_or_else(|| call.type_error(format!("expected a circle, got {}", shape.kind_name())))
}

/// Projects a point onto the infinite line through a Line-typed operand.
/// The operands may come in either order.
pub fn project(call: &Call<'_>) -> Result<Outcome> {
    call.expect_args(2, 2, "a line and a point")?;
    let (line_at, point_at) = match (call.args[0].value(), call.args[1].value()) {
        (Value::Shape(Shape::Line(_)), Value::Shape(Shape::Point(_))) => (0, 1),
        (Value::Shape(Shape::Point(_)), Value::Shape(Shape::Line(_))) => (1, 0),
        (a, b) => {
            return Err(call.type_error(format!(
                "expected a line and a point, got {} and {}",
                a.kind_name(),
                b.kind_name()
            )));
        }
    };
    let target = call.line(line_at, "line")?;
    let point = call.point(point_at, "point")?;
    let projected = line::project_point(point, target);
    Ok(Outcome::derived(point_value(projected), call.origin_of(point_at)))
}

/// `mid(shape)` or `mid(p1, p2)`.
///
/// A point yields itself, a circle its center, a line or arc the midpoint of
/// its endpoints,
/// a triangle its incenter and any other polygon the centroid of its
/// vertices.
pub fn mid(call: &Call<'_>) -> Result<Outcome> {
    call.expect_args(1, 2, "a shape or two points")?;
    if call.args.len() == 2 {
        let p = call.point(0, "first point")?;
        let q = call.point(1, "second point")?;
        return Ok(point_value(p.midpoint(q)).into());
    }

    let shape = call.shape(0, "argument")?;
    let point = match shape {
        Shape::Point(p) => *p,
        Shape::Circle(c) => c.center(),
        Shape::Line(l) => l.midpoint(),
        Shape::Arc(arc) => arc.start_point().midpoint(arc.end_point()),
        Shape::Polygon(polygon) => {
            let vertices = polygon.unique_vertices();
            if let &[a, b, c] = vertices {
                Triangle::new(a, b, c).incenter()
            } else {
                let sum = vertices
                    .iter()
                    .fold(Point2::default(), |acc, &v| acc.add_point(v));
                sum.scale(1.0 / vertices.len() as f64)
            }
        }
        other => {
            return Err(call.type_error(format!("cannot take the middle of a {}", other.kind_name())));
        }
    };
    Ok(point_value(point).into())
}

/// Walks `ratio` of the way around a closed vertex list.
fn point_along_perimeter(vertices: &[Point2], ratio: f64) -> Point2 {
    let lengths: Vec<f64> = vertices.windows(2).map(|w| w[0].distance(w[1])).collect();
    let perimeter: f64 = lengths.iter().sum();
    if perimeter <= 0.0 {
        return vertices[0];
    }

    let mut remaining = ratio.clamp(0.0, 1.0) * perimeter;
    for (edge, length) in vertices.windows(2).zip(&lengths) {
        if remaining <= *length {
            let t = if *length > 0.0 { remaining / length } else { 0.0 };
            return edge[0].lerp(edge[1], t);
        }
        remaining -= length;
    }
    vertices[vertices.len() - 1]
}

/// `pointatratio(shape, t)` or `pointatratio(p1, p2, t)`.
pub fn point_at_ratio(call: &Call<'_>) -> Result<Outcome> {
    call.expect_args(2, 3, "a shape and a ratio, or two points and a ratio")?;
    if call.args.len() == 3 {
        let p = call.point(0, "first point")?;
        let q = call.point(1, "second point")?;
        let t = call.scalar(2, "ratio")?;
        return Ok(point_value(p.lerp(q, t)).into());
    }

    let t = call.scalar(1, "ratio")?;
    let point = match call.shape(0, "first argument")? {
        Shape::Line(l) => l.point_at(t),
        Shape::Arc(arc) => circle::point_at_angle(arc, arc.start_angle() + t * arc.sweep()),
        Shape::Circle(c) => circle::point_at_angle(c, t * 360.0),
        Shape::Polygon(polygon) => point_along_perimeter(polygon.closed_vertices(), t),
        other => {
            return Err(call.type_error(format!("cannot take a ratio along a {}", other.kind_name())));
        }
    };
    Ok(point_value(point).into())
}

/// `pointoncircle(circle, angleDeg)`
pub fn point_on_circle(call: &Call<'_>) -> Result<Outcome> {
    call.expect_args(2, 2, "a circle and an angle")?;
    let c = circle_like(call, 0)?;
    let angle = call.scalar(1, "angle")?;
    Ok(point_value(circle::point_at_angle(c, angle)).into())
}

/// `polarpoint(r, angleDeg, [origin])`
pub fn polar_point(call: &Call<'_>) -> Result<Outcome> {
    call.expect_args(2, 3, "a radius, an angle and an optional origin")?;
    let r = call.scalar(0, "radius")?;
    let angle = deg_to_rad(call.scalar(1, "angle")?);
    let origin = if call.args.len() == 3 {
        call.point(2, "origin")?
    } else {
        Point2::default()
    };
    let offset = Point2::new(angle.cos(), angle.sin()).scale(r);
    Ok(point_value(origin.add_point(offset)).into())
}

/// `tangent(circle, angleDeg, [length])` or `tangent(plot, x, [length])`.
///
/// Both forms yield a segment centred on the touch point.
pub fn tangent(call: &Call<'_>) -> Result<Outcome> {
    call.expect_args(2, 3, "a circle or plot, a position and an optional length")?;
    let length = if call.args.len() == 3 {
        call.scalar(2, "length")?
    } else {
        call.config.defaults().tangent_length()
    };
    let at = call.scalar(1, "position")?;

    let line = match call.shape(0, "first argument")? {
        Shape::Plot(plot) => {
            let y = plot.eval(at);
            let slope = (plot.eval(at + TANGENT_STEP) - plot.eval(at - TANGENT_STEP))
                / (2.0 * TANGENT_STEP);
            if !y.is_finite() || !slope.is_finite() {
                return Err(call.domain_error(format!("plot has no tangent at x = {at}")));
            }
            let touch = Point2::new(at, y);
            let half = Point2::new(1.0, slope)
                .normalize()
                .unwrap_or(Point2::new(1.0, 0.0))
                .scale(length / 2.0);
            Line::new(touch.sub_point(half), touch.add_point(half))
        }
        shape => {
            let c = shape.as_circle_like().ok_or_else(|| {
                call.type_error(format!("expected a circle or plot, got {}", shape.kind_name()))
            })?;
            circle::tangent_at_angle(c, at, length)
        }
    };
    Ok(line_value(line).into())
}

/// `perp(line, point)`: the perpendicular through `point`, as long as `line`.
pub fn perpendicular(call: &Call<'_>) -> Result<Outcome> {
    call.expect_args(2, 2, "a line and a point")?;
    let source = call.line(0, "first argument")?;
    let through = call.point(1, "second argument")?;
    Ok(line_value(line::perpendicular_through(source, through, None)).into())
}

/// `para(line, point)`: the parallel through `point`, as long as `line`.
pub fn parallel(call: &Call<'_>) -> Result<Outcome> {
    call.expect_args(2, 2, "a line and a point")?;
    let source = call.line(0, "first argument")?;
    let through = call.point(1, "second argument")?;
    Ok(line_value(line::parallel_through(source, through, None)).into())
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use super::*;
    use crate::{
        ast::Op,
        context::{ExpressionContext, NumericScope},
        error::ErrorKind,
        ops::test_support::{builder, define, eval},
    };

    fn close(actual: Vec<f64>, expected: &[f64]) -> bool {
        actual.len() == expected.len()
            && actual
                .iter()
                .zip(expected)
                .all(|(a, b)| approx_eq!(f64, *a, *b, epsilon = 1e-9))
    }

    #[test]
    fn test_project_in_either_order() {
        let mut ctx = ExpressionContext::new();
        let mut ast = builder();
        let p = ast.call_numbers(Op::Point, &[3.0, 4.0]);
        define("P", p, &mut ctx);

        let line = ast.call_numbers(Op::Line, &[0.0, 0.0, 10.0, 0.0]);
        let p = ast.var("P");
        let resolved = eval(ast.call(Op::Project, vec![line, p]), &ctx).unwrap();
        assert!(close(resolved.atomic_values(), &[3.0, 0.0]));
        assert_eq!(resolved.origin().unwrap().source(), ctx.handle_of("P"));

        let line = ast.call_numbers(Op::Line, &[0.0, 0.0, 10.0, 0.0]);
        let p = ast.var("P");
        let swapped = eval(ast.call(Op::Project, vec![p, line]), &ctx).unwrap();
        assert!(swapped.approx_eq(&resolved, 1e-12));
    }

    #[test]
    fn test_project_needs_a_line_and_a_point() {
        let mut ast = builder();
        let circle = ast.call_numbers(Op::Circle, &[0.0, 0.0, 1.0]);
        let p = ast.call_numbers(Op::Point, &[3.0, 4.0]);
        let err = eval(ast.call(Op::Project, vec![circle, p]), &ExpressionContext::new())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
    }

    #[test]
    fn test_mid() {
        let ctx = ExpressionContext::new();
        let mut ast = builder();

        let triangle = ast.call_numbers(Op::Polygon, &[0.0, 0.0, 4.0, 0.0, 0.0, 3.0]);
        let incenter = eval(ast.call(Op::Mid, vec![triangle]), &ctx).unwrap();
        assert!(close(incenter.atomic_values(), &[1.0, 1.0]));

        let square = ast.call_numbers(Op::Polygon, &[0.0, 0.0, 2.0, 0.0, 2.0, 2.0, 0.0, 2.0]);
        let centroid = eval(ast.call(Op::Mid, vec![square]), &ctx).unwrap();
        assert!(close(centroid.atomic_values(), &[1.0, 1.0]));

        let circle = ast.call_numbers(Op::Circle, &[5.0, -1.0, 2.0]);
        let center = eval(ast.call(Op::Mid, vec![circle]), &ctx).unwrap();
        assert!(close(center.atomic_values(), &[5.0, -1.0]));

        let p = ast.call_numbers(Op::Point, &[0.0, 0.0]);
        let q = ast.call_numbers(Op::Point, &[4.0, 2.0]);
        let midpoint = eval(ast.call(Op::Mid, vec![p, q]), &ctx).unwrap();
        assert!(close(midpoint.atomic_values(), &[2.0, 1.0]));
    }

    #[test]
    fn test_mid_of_a_point_is_the_point() {
        let ctx = ExpressionContext::new();
        let mut ast = builder();

        let p = ast.call_numbers(Op::Point, &[-3.0, 7.5]);
        let resolved = eval(ast.call(Op::Mid, vec![p]), &ctx).unwrap();
        assert!(close(resolved.atomic_values(), &[-3.0, 7.5]));

        let l1 = ast.call_numbers(Op::Line, &[-5.0, 1.0, 5.0, 1.0]);
        let l2 = ast.call_numbers(Op::Line, &[2.0, -5.0, 2.0, 5.0]);
        let crossing = ast.call(Op::Intersect, vec![l1, l2]);
        let resolved = eval(ast.call(Op::Mid, vec![crossing]), &ctx).unwrap();
        assert!(close(resolved.atomic_values(), &[2.0, 1.0]));
    }

    #[test]
    fn test_point_at_ratio() {
        let ctx = ExpressionContext::new();
        let mut ast = builder();

        let line = ast.call_numbers(Op::Line, &[0.0, 0.0, 10.0, 20.0]);
        let t = ast.number(0.25);
        let on_line = eval(ast.call(Op::PointAtRatio, vec![line, t]), &ctx).unwrap();
        assert!(close(on_line.atomic_values(), &[2.5, 5.0]));

        let square = ast.call_numbers(Op::Polygon, &[0.0, 0.0, 2.0, 0.0, 2.0, 2.0, 0.0, 2.0]);
        let t = ast.number(0.375);
        let on_square = eval(ast.call(Op::PointAtRatio, vec![square, t]), &ctx).unwrap();
        assert!(close(on_square.atomic_values(), &[2.0, 1.0]));

        let p = ast.call_numbers(Op::Point, &[0.0, 0.0]);
        let q = ast.call_numbers(Op::Point, &[4.0, 4.0]);
        let t = ast.number(0.5);
        let between = eval(ast.call(Op::PointAtRatio, vec![p, q, t]), &ctx).unwrap();
        assert!(close(between.atomic_values(), &[2.0, 2.0]));
    }

    #[test]
    fn test_point_on_circle_and_polar_point() {
        let ctx = ExpressionContext::new();
        let mut ast = builder();

        let circle = ast.call_numbers(Op::Circle, &[1.0, 1.0, 2.0]);
        let angle = ast.number(90.0);
        let on_circle = eval(ast.call(Op::PointOnCircle, vec![circle, angle]), &ctx).unwrap();
        assert!(close(on_circle.atomic_values(), &[1.0, 3.0]));

        let polar = eval(ast.call_numbers(Op::PolarPoint, &[2.0, 180.0]), &ctx).unwrap();
        assert!(close(polar.atomic_values(), &[-2.0, 0.0]));

        let r = ast.number(1.0);
        let angle = ast.number(0.0);
        let origin = ast.call_numbers(Op::Point, &[5.0, 5.0]);
        let shifted = eval(ast.call(Op::PolarPoint, vec![r, angle, origin]), &ctx).unwrap();
        assert!(close(shifted.atomic_values(), &[6.0, 5.0]));
    }

    #[test]
    fn test_tangent_to_circle_uses_default_length() {
        let mut ast = builder();
        let circle = ast.call_numbers(Op::Circle, &[0.0, 0.0, 1.0]);
        let angle = ast.number(0.0);
        let resolved = eval(ast.call(Op::Tangent, vec![circle, angle]), &ExpressionContext::new())
            .unwrap();
        assert!(close(resolved.atomic_values(), &[1.0, -1.0, 1.0, 1.0]));
    }

    #[test]
    fn test_tangent_to_plot() {
        let ctx = ExpressionContext::new();
        let mut ast = builder();
        let f = ast.function(|x: f64, _: &NumericScope| x * x);
        let plot = ast.call(Op::Plot, vec![f]);
        let x = ast.number(1.0);
        let length = ast.number(5f64.sqrt() * 2.0);
        let resolved = eval(ast.call(Op::Tangent, vec![plot, x, length]), &ctx).unwrap();
        // Slope 2 at x = 1: the segment spans one unit of x on either side.
        let values = resolved.atomic_values();
        assert!(approx_eq!(f64, values[0], 0.0, epsilon = 1e-6));
        assert!(approx_eq!(f64, values[1], -1.0, epsilon = 1e-6));
        assert!(approx_eq!(f64, values[2], 2.0, epsilon = 1e-6));
        assert!(approx_eq!(f64, values[3], 3.0, epsilon = 1e-6));

        let f = ast.function(|x: f64, _: &NumericScope| x.ln());
        let plot = ast.call(Op::Plot, vec![f]);
        let x = ast.number(-1.0);
        let err = eval(ast.call(Op::Tangent, vec![plot, x]), &ctx).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Domain);
    }

    #[test]
    fn test_perpendicular_and_parallel() {
        let ctx = ExpressionContext::new();
        let mut ast = builder();

        let line = ast.call_numbers(Op::Line, &[0.0, 0.0, 4.0, 0.0]);
        let p = ast.call_numbers(Op::Point, &[1.0, 1.0]);
        let perp = eval(ast.call(Op::Perp, vec![line, p]), &ctx).unwrap();
        assert!(close(perp.atomic_values(), &[1.0, -1.0, 1.0, 3.0]));

        let line = ast.call_numbers(Op::Line, &[0.0, 0.0, 4.0, 0.0]);
        let p = ast.call_numbers(Op::Point, &[1.0, 1.0]);
        let para = eval(ast.call(Op::Para, vec![line, p]), &ctx).unwrap();
        assert!(close(para.atomic_values(), &[-1.0, 1.0, 3.0, 1.0]));
    }

    #[test]
    fn test_point_along_degenerate_perimeter() {
        let p = Point2::new(1.0, 1.0);
        assert_eq!(point_along_perimeter(&[p, p, p, p], 0.5), p);
    }
}
