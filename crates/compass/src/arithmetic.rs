//! Arithmetic between scalar and point results.
//!
//! Operands are classified by the length of their atomic values: one value
//! is a scalar, two values a 2D point. Everything else is rejected.
//!
//! | op  | scalar∘scalar | point∘point | point∘scalar | scalar∘point |
//! |-----|---------------|-------------|--------------|--------------|
//! | `+` `-` | scalar    | point       | point        | error        |
//! | `*` | scalar        | error       | point        | point        |
//! | `/` | scalar        | error       | point        | error        |
//! | `^` | scalar        | error       | error        | error        |
//!
//! Division follows IEEE semantics; dividing by zero yields an infinite or
//! NaN result rather than an error.

use compass_core::{
    geometry::Point2,
    shape::{AtomicValues, Shape},
};

use crate::{ast::BinaryOp, value::Value};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Operand {
    Scalar(f64),
    Point(Point2),
}

impl Operand {
    fn classify(value: &Value) -> Option<Self> {
        match value.atomic_values().as_slice() {
            [s] => Some(Self::Scalar(*s)),
            [x, y] => Some(Self::Point(Point2::new(*x, *y))),
            _ => None,
        }
    }
}

/// Applies `op` to two resolved values.
///
/// # Errors
///
/// Returns a message naming the unsupported combination.
pub fn apply(op: BinaryOp, lhs: &Value, rhs: &Value) -> Result<Value, String> {
    use Operand::{Point, Scalar};

    let unsupported = || {
        let verb = match op {
            BinaryOp::Add => "add",
            BinaryOp::Sub => "subtract",
            BinaryOp::Mul => "multiply",
            BinaryOp::Div => "divide",
            BinaryOp::Pow => "raise",
        };
        format!(
            "Cannot {verb} these values ({} {} {})",
            lhs.kind_name(),
            op.symbol(),
            rhs.kind_name()
        )
    };

    let (Some(a), Some(b)) = (Operand::classify(lhs), Operand::classify(rhs)) else {
        return Err(unsupported());
    };

    let result = match (op, a, b) {
        (BinaryOp::Add, Scalar(x), Scalar(y)) => Scalar(x + y),
        (BinaryOp::Add, Point(p), Point(q)) => Point(p.add_point(q)),
        (BinaryOp::Add, Point(p), Scalar(s)) => Point(p.add_point(Point2::new(s, s))),

        (BinaryOp::Sub, Scalar(x), Scalar(y)) => Scalar(x - y),
        (BinaryOp::Sub, Point(p), Point(q)) => Point(p.sub_point(q)),
        (BinaryOp::Sub, Point(p), Scalar(s)) => Point(p.sub_point(Point2::new(s, s))),

        (BinaryOp::Mul, Scalar(x), Scalar(y)) => Scalar(x * y),
        (BinaryOp::Mul, Point(p), Scalar(s)) | (BinaryOp::Mul, Scalar(s), Point(p)) => {
            Point(p.scale(s))
        }

        (BinaryOp::Div, Scalar(x), Scalar(y)) => Scalar(x / y),
        (BinaryOp::Div, Point(p), Scalar(s)) => Point(Point2::new(p.x() / s, p.y() / s)),
        (BinaryOp::Div, Point(_), Point(_)) => {
            return Err("Cannot divide point by point".to_string());
        }

        (BinaryOp::Pow, Scalar(x), Scalar(y)) => Scalar(x.powf(y)),
        (BinaryOp::Pow, _, _) => return Err("Power not supported for points".to_string()),

        _ => return Err(unsupported()),
    };

    Ok(match result {
        Scalar(v) => Value::Scalar(v),
        Point(p) => Value::Shape(Shape::Point(p)),
    })
}
