//! Constructors for graphs and 2D primitive shapes.

use std::sync::Arc as SharedFn;

use log::warn;

use compass_core::{
    circle,
    geometry::Point2,
    intersection,
    shape::{Angle, Arc, Circle, CircleLike, Line, Plot, Polygon, Shape},
};

use super::{Call, Outcome};
use crate::{
    error::Result,
    value::{Graph, Value},
};

fn range_at(call: &Call<'_>, values: &[f64], i: usize, default: (f64, f64)) -> Result<(f64, f64)> {
    let Some(&[min, max]) = values.get(i..i + 2) else {
        return Ok(default);
    };
    if min >= max {
        return Err(call.domain_error(format!("range [{min}, {max}] is empty")));
    }
    Ok((min, max))
}

fn scalars(call: &Call<'_>) -> Result<Vec<f64>> {
    (0..call.args.len())
        .map(|i| call.scalar(i, "graph argument"))
        .collect()
}

/// `g2d(row1, col1, row2, col2, [xmin, xmax, [ymin, ymax, [grid]]])`
pub fn graph_2d(call: &Call<'_>) -> Result<Outcome> {
    let values = scalars(call)?;
    if !matches!(values.len(), 4 | 6 | 8 | 9) {
        return Err(call.arity_error(format!(
            "expected 4 cell values plus optional ranges, got {}",
            values.len()
        )));
    }
    let viewport = call.config.defaults().viewport();
    let cells = [values[0], values[1], values[2], values[3]];
    let x = range_at(call, &values, 4, viewport.x())?;
    let y = range_at(call, &values, 6, viewport.y())?;
    let grid = values.get(8).is_some_and(|&g| g != 0.0);
    Ok(Value::Graph(Graph::new_2d(cells, x, y).with_grid(grid)).into())
}

/// `g3d(row1, col1, row2, col2, [xmin, xmax, [ymin, ymax, [zmin, zmax, [grid]]]])`
pub fn graph_3d(call: &Call<'_>) -> Result<Outcome> {
    let values = scalars(call)?;
    if !matches!(values.len(), 4 | 6 | 8 | 10 | 11) {
        return Err(call.arity_error(format!(
            "expected 4 cell values plus optional ranges, got {}",
            values.len()
        )));
    }
    let viewport = call.config.defaults().viewport();
    let cells = [values[0], values[1], values[2], values[3]];
    let x = range_at(call, &values, 4, viewport.x())?;
    let y = range_at(call, &values, 6, viewport.y())?;
    let z = range_at(call, &values, 8, viewport.z())?;
    let grid = values.get(10).is_some_and(|&g| g != 0.0);
    Ok(Value::Graph(Graph::new_3d(cells, x, y, z).with_grid(grid)).into())
}

pub fn point(call: &Call<'_>) -> Result<Outcome> {
    match call.flatten().as_slice() {
        &[x, y] => Ok(Value::Shape(Shape::Point(Point2::new(x, y))).into()),
        other => Err(call.arity_error(format!("expected 2 coordinates, got {}", other.len()))),
    }
}

/// `line` and `vec`: four coordinates or two points.
pub fn line(call: &Call<'_>) -> Result<Outcome> {
    match call.flatten().as_slice() {
        &[x1, y1, x2, y2] => Ok(Value::Shape(Shape::Line(Line::new(
            Point2::new(x1, y1),
            Point2::new(x2, y2),
        )))
        .into()),
        other => Err(call.arity_error(format!("expected 4 coordinates, got {}", other.len()))),
    }
}

/// `circle(cx, cy, r)`, `circle(center, r)` or `circle(p1, p2, p3)`.
pub fn circle(call: &Call<'_>) -> Result<Outcome> {
    if call.args.len() == 3 && (0..3).all(|i| call.is_point(i)) {
        let p1 = call.point(0, "first point")?;
        let p2 = call.point(1, "second point")?;
        let p3 = call.point(2, "third point")?;
        let circle = circle::from_three_points(p1, p2, p3);
        if !circle.radius().is_finite() {
            return Err(call.domain_error("points are collinear"));
        }
        return Ok(Value::Shape(Shape::Circle(circle)).into());
    }

    match call.flatten().as_slice() {
        &[cx, cy, r] => {
            if r < 0.0 {
                return Err(call.domain_error(format!("radius must not be negative, got {r}")));
            }
            Ok(Value::Shape(Shape::Circle(Circle::new(Point2::new(cx, cy), r))).into())
        }
        other => Err(call.arity_error(format!(
            "expected center and radius (3 values), got {}",
            other.len()
        ))),
    }
}

/// `arc(cx, cy, r, startDeg, sweepDeg)`
pub fn arc(call: &Call<'_>) -> Result<Outcome> {
    match call.flatten().as_slice() {
        &[cx, cy, r, start, sweep] => {
            if r < 0.0 {
                return Err(call.domain_error(format!("radius must not be negative, got {r}")));
            }
            Ok(Value::Shape(Shape::Arc(Arc::new(Point2::new(cx, cy), r, start, sweep))).into())
        }
        other => Err(call.arity_error(format!(
            "expected center, radius, start and sweep (5 values), got {}",
            other.len()
        ))),
    }
}

pub fn polygon(call: &Call<'_>) -> Result<Outcome> {
    let values = call.flatten();
    if values.len() % 2 != 0 {
        return Err(call.arity_error(format!(
            "expected an even number of coordinates, got {}",
            values.len()
        )));
    }
    let vertices: Vec<Point2> = values
        .chunks_exact(2)
        .map(|c| Point2::new(c[0], c[1]))
        .collect();
    let polygon = Polygon::new(vertices)
        .map_err(|_| call.arity_error(format!("expected at least 3 vertices, got {}", values.len() / 2)))?;
    Ok(Value::Shape(Shape::Polygon(polygon)).into())
}

/// `plot(function, [domainMin, domainMax])`
///
/// The function is bound to a snapshot of the numeric variables in scope, so
/// later rebinding does not change an already resolved plot.
pub fn plot(call: &Call<'_>) -> Result<Outcome> {
    call.expect_args(1, 3, "a function and an optional domain")?;
    let Value::Function(handle) = call.args[0].value() else {
        return Err(call.type_error(format!(
            "first argument must be a function, got {}",
            call.args[0].value().kind_name()
        )));
    };

    let scope = call.ctx.snapshot_numeric_scope();
    let handle = handle.clone();
    let plot = Plot::new(SharedFn::new(move |x| handle.eval(x, &scope)));

    let plot = match call.args.len() {
        1 => plot,
        3 => {
            let min = call.scalar(1, "domain minimum")?;
            let max = call.scalar(2, "domain maximum")?;
            plot.with_domain(min, max)
        }
        _ => return Err(call.arity_error("domain needs both a minimum and a maximum")),
    };
    Ok(Value::Shape(Shape::Plot(plot)).into())
}

/// `angle(vertex, p1, p2, [radius])` or `angle(line1, line2, [radius])`.
///
/// In the two-line form the vertex is where the lines cross and each arm
/// points at the endpoint of its line farther from the vertex.
pub fn angle(call: &Call<'_>) -> Result<Outcome> {
    let values = call.flatten();
    let point = |i: usize| Point2::new(values[i], values[i + 1]);

    let (vertex, p1, p2, radius) = match values.len() {
        6 | 7 => (point(0), point(2), point(4), values.get(6).copied()),
        8 | 9 => {
            let l1 = Line::new(point(0), point(2));
            let l2 = Line::new(point(4), point(6));
            let vertex = intersection::line_line(l1, l2)
                .ok_or_else(|| call.domain_error("lines are parallel"))?;
            (
                vertex,
                farther_endpoint(l1, vertex),
                farther_endpoint(l2, vertex),
                values.get(8).copied(),
            )
        }
        n => {
            return Err(call.arity_error(format!(
                "expected three points or two lines plus an optional radius, got {n} values"
            )));
        }
    };

    let default_radius = call.config.defaults().angle_radius();
    let radius = match radius {
        Some(r) if r > 0.0 => r,
        Some(r) => {
            warn!(node = call.node_id.to_string(), radius = r; "Non-positive angle radius, using default");
            default_radius
        }
        None => default_radius,
    };
    Ok(Value::Shape(Shape::Angle(Angle::new(vertex, p1, p2, radius))).into())
}

fn farther_endpoint(line: Line, from: Point2) -> Point2 {
    if line.start().distance(from) >= line.end().distance(from) {
        line.start()
    } else {
        line.end()
    }
}
