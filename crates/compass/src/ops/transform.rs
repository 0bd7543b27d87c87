//! `reflect`, `rotate`, `scale` and `translate`.
//!
//! With one shape argument a transform resolves to the transformed shape.
//! With several it runs in batch mode and resolves to a collection holding
//! one result per shape, in argument order. Either every shape transforms or
//! the whole call fails.
//!
//! Each result remembers the shape it came from (and the variable it was
//! read from, if any) so the transition can be replayed.

use std::ops::Range;

use log::trace;

use compass_core::{
    geometry::Point2,
    shape::{LineLike, Shape},
    transform::Transformation,
};

use super::{Call, Outcome};
use crate::{
    error::Result,
    value::{Resolved, Value},
};

/// Mirrors shorter than this cannot define a reflection.
const MIN_MIRROR_LENGTH: f64 = 1e-10;

fn transformed(call: &Call<'_>, i: usize, t: &Transformation) -> Result<Shape> {
    let value = call.args[i].value();
    value
        .as_shape()
        .and_then(|shape| shape.transformed(t))
        .ok_or_else(|| call.type_error(format!("cannot transform a {}", value.kind_name())))
}

fn apply(call: &Call<'_>, shapes: Range<usize>, t: Transformation) -> Result<Outcome> {
    if shapes.is_empty() {
        return Err(call.arity_error("expected at least one shape"));
    }

    if shapes.len() == 1 {
        let i = shapes.start;
        let shape = transformed(call, i, &t)?;
        return Ok(Outcome::derived(Value::Shape(shape), call.origin_of(i)));
    }

    let items = shapes
        .map(|i| {
            let shape = transformed(call, i, &t)?;
            trace!(node = call.node_id.to_string(), item = i, shape = shape.to_string(); "Batch item transformed");
            Ok(Resolved::new(call.node_id, Value::Shape(shape))
                .with_op(call.op)
                .with_origin(Some(call.origin_of(i))))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Value::Collection(items).into())
}

/// Trailing arguments of `rotate` and `scale`.
struct Pivot {
    amount: f64,
    center: Point2,
    /// Shapes occupy `0..shapes_end`.
    shapes_end: usize,
}

/// Scans from the end for the optional center and the angle or factor.
///
/// A trailing point is the center. Otherwise two trailing numbers are the
/// center coordinates, but only when a third number precedes them to serve
/// as the angle or factor. Otherwise the center is the origin.
fn scan_pivot(call: &Call<'_>, what: &str) -> Result<Pivot> {
    let n = call.args.len();
    if n < 2 {
        return Err(call.arity_error(format!("expected shapes followed by a {what}")));
    }

    let (center, end) = if call.is_point(n - 1) {
        (call.point(n - 1, "center")?, n - 1)
    } else if n >= 3 && call.is_scalar(n - 1) && call.is_scalar(n - 2) && call.is_scalar(n - 3) {
        let cx = call.scalar(n - 2, "center x")?;
        let cy = call.scalar(n - 1, "center y")?;
        (Point2::new(cx, cy), n - 2)
    } else {
        (Point2::default(), n)
    };

    if end == 0 {
        return Err(call.arity_error(format!("expected shapes followed by a {what}")));
    }
    let amount = call.scalar(end - 1, what)?;
    Ok(Pivot {
        amount,
        center,
        shapes_end: end - 1,
    })
}

/// `reflect(mirror, shape, [shape...])`
pub fn reflect(call: &Call<'_>) -> Result<Outcome> {
    if call.args.len() < 2 {
        return Err(call.arity_error("expected a mirror line followed by shapes"));
    }
    let mirror = call.line(0, "mirror")?;
    if mirror.length() < MIN_MIRROR_LENGTH {
        return Err(call.domain_error("mirror line has zero length"));
    }
    apply(call, 1..call.args.len(), Transformation::Reflect { mirror })
}

/// `rotate(shape..., angleDeg, [center | cx, cy])`
pub fn rotate(call: &Call<'_>) -> Result<Outcome> {
    let pivot = scan_pivot(call, "angle")?;
    let t = Transformation::Rotate {
        angle: pivot.amount,
        center: pivot.center,
    };
    apply(call, 0..pivot.shapes_end, t)
}

/// `scale(shape..., factor, [center | cx, cy])`
pub fn scale(call: &Call<'_>) -> Result<Outcome> {
    let pivot = scan_pivot(call, "factor")?;
    let t = Transformation::Scale {
        factor: pivot.amount,
        center: pivot.center,
    };
    apply(call, 0..pivot.shapes_end, t)
}

/// `translate(shape..., dx, dy)`
pub fn translate(call: &Call<'_>) -> Result<Outcome> {
    let n = call.args.len();
    if n < 3 {
        return Err(call.arity_error("expected shapes followed by dx and dy"));
    }
    let dx = call.scalar(n - 2, "dx")?;
    let dy = call.scalar(n - 1, "dy")?;
    apply(
        call,
        0..n - 2,
        Transformation::Translate {
            offset: Point2::new(dx, dy),
        },
    )
}
