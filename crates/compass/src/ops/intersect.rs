//! `intersect(a, b, [index])`
//!
//! Dispatches on the unordered pair of operand kinds and picks the
//! `index`-th (1-based) point of the ordered result. Asking for a point past
//! the end is not an error: the result is a NaN point that cannot play.

use log::{debug, warn};

use compass_core::{
    geometry::Point2,
    intersection,
    roots,
    shape::{Circle, CircleLike, Line, Plot, PolygonLike, Shape},
};

use super::{Call, Outcome};
use crate::{error::Result, value::Value};

enum Operand<'a> {
    Line(Line),
    /// Arcs intersect as their full circle.
    Circle(Circle),
    Polygon(&'a [Point2]),
    Plot(&'a Plot),
}

fn operand<'a>(call: &'a Call<'_>, i: usize) -> Result<Operand<'a>> {
    let value = call.args[i].value();
    match value {
        Value::Shape(Shape::Line(line)) => Ok(Operand::Line(*line)),
        Value::Shape(Shape::Circle(circle)) => Ok(Operand::Circle(*circle)),
        Value::Shape(Shape::Arc(arc)) => Ok(Operand::Circle(arc.to_circle())),
        Value::Shape(Shape::Polygon(polygon)) => Ok(Operand::Polygon(polygon.closed_vertices())),
        Value::Shape(Shape::Plot(plot)) => Ok(Operand::Plot(plot)),
        other => Err(call.type_error(format!("cannot intersect a {}", other.kind_name()))),
    }
}

/// The 1-based index argument, floored.
fn index(call: &Call<'_>) -> Result<usize> {
    if call.args.len() < 3 {
        return Ok(1);
    }
    let index = call.scalar(2, "index")?.floor();
    if index.is_nan() || index < 1.0 {
        return Err(call.index_error(format!("index must be at least 1, got {index}")));
    }
    Ok(index as usize)
}

pub fn intersect(call: &Call<'_>) -> Result<Outcome> {
    call.expect_args(2, 3, "two shapes and an optional index")?;
    let index = index(call)?;

    let points = match (operand(call, 0)?, operand(call, 1)?) {
        (Operand::Line(l1), Operand::Line(l2)) => {
            intersection::line_line(l1, l2).into_iter().collect()
        }
        (Operand::Line(line), Operand::Circle(circle))
        | (Operand::Circle(circle), Operand::Line(line)) => intersection::line_circle(line, circle),
        (Operand::Circle(c1), Operand::Circle(c2)) => intersection::circle_circle(c1, c2),
        (Operand::Line(line), Operand::Polygon(vertices))
        | (Operand::Polygon(vertices), Operand::Line(line)) => {
            intersection::line_polygon(line, vertices)
        }
        (Operand::Plot(f), Operand::Plot(g)) => roots::find_intersections(
            f,
            g,
            call.x_range(),
            &call.config.roots().to_finder_config(),
        ),
        _ => {
            return Err(call.type_error(format!(
                "invalid combination: {} and {}",
                call.args[0].value().kind_name(),
                call.args[1].value().kind_name()
            )));
        }
    };

    debug!(node = call.node_id.to_string(), found = points.len(), index; "Intersection resolved");

    let point = match points.get(index - 1) {
        Some(point) => *point,
        None => {
            warn!(
                node = call.node_id.to_string(),
                found = points.len(),
                index;
                "Intersection index out of range, result cannot play"
            );
            Point2::nan()
        }
    };
    Ok(Value::Shape(Shape::Point(point)).into())
}
