//! `item(collection, index)`: one member of a batch result.

use super::{Call, Outcome};
use crate::{error::Result, value::Value};

pub fn item(call: &Call<'_>) -> Result<Outcome> {
    call.expect_args(2, 2, "a collection and an index")?;
    let Value::Collection(items) = call.args[0].value() else {
        return Err(call.type_error(format!(
            "{} is not a collection (single shape mode)",
            call.args[0].value().kind_name()
        )));
    };

    let index = call.scalar(1, "index")?.floor();
    if index.is_nan() || index < 0.0 || index >= items.len() as f64 {
        return Err(call.index_error(format!(
            "index {index} is out of bounds for a collection of {}",
            items.len()
        )));
    }

    // The member keeps its own origin so it can be transformed again and
    // still animate from the shape the batch started with.
    let member = &items[index as usize];
    Ok(Outcome {
        value: member.value().clone(),
        origin: member.origin().cloned(),
    })
}

#[cfg(test)]
mod tests {
    use compass_core::shape::AtomicValues;

    use crate::{
        ast::Op,
        context::ExpressionContext,
        error::ErrorKind,
        ops::test_support::{builder, define, eval},
    };

    fn batch(ctx: &mut ExpressionContext) {
        let mut ast = builder();
        let a = ast.call_numbers(Op::Point, &[1.0, 0.0]);
        let b = ast.call_numbers(Op::Point, &[0.0, 1.0]);
        let dx = ast.number(1.0);
        let dy = ast.number(1.0);
        let expr = ast.call(Op::Translate, vec![a, b, dx, dy]);
        define("B", expr, ctx);
    }

    #[test]
    fn test_item_selects_member() {
        let mut ctx = ExpressionContext::new();
        batch(&mut ctx);

        let mut ast = builder();
        let b = ast.var("B");
        let index = ast.number(1.0);
        let resolved = eval(ast.call(Op::Item, vec![b, index]), &ctx).unwrap();
        assert_eq!(resolved.atomic_values(), vec![1.0, 2.0]);
        assert_eq!(resolved.op(), Some(Op::Item));
        let origin = resolved.origin().unwrap();
        assert_eq!(origin.op(), Op::Translate);
        assert_eq!(origin.original().atomic_values(), vec![0.0, 1.0]);
    }

    #[test]
    fn test_item_can_be_transformed_again() {
        let mut ctx = ExpressionContext::new();
        batch(&mut ctx);

        let mut ast = builder();
        let b = ast.var("B");
        let index = ast.number(0.0);
        let member = ast.call(Op::Item, vec![b, index]);
        let angle = ast.number(90.0);
        let rotated = eval(ast.call(Op::Rotate, vec![member, angle]), &ctx).unwrap();
        let values = rotated.atomic_values();
        assert!((values[0] + 1.0).abs() < 1e-12);
        assert!((values[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_item_errors() {
        let mut ctx = ExpressionContext::new();
        batch(&mut ctx);
        let mut ast = builder();

        let b = ast.var("B");
        let past_end = ast.number(2.0);
        assert_eq!(
            eval(ast.call(Op::Item, vec![b, past_end]), &ctx).unwrap_err().kind(),
            ErrorKind::Index
        );

        let b = ast.var("B");
        let negative = ast.number(-1.0);
        assert_eq!(
            eval(ast.call(Op::Item, vec![b, negative]), &ctx).unwrap_err().kind(),
            ErrorKind::Index
        );

        let b = ast.var("B");
        let text = ast.text("first");
        assert_eq!(
            eval(ast.call(Op::Item, vec![b, text]), &ctx).unwrap_err().kind(),
            ErrorKind::Type
        );

        let single = ast.call_numbers(Op::Point, &[1.0, 1.0]);
        let zero = ast.number(0.0);
        let err = eval(ast.call(Op::Item, vec![single, zero]), &ctx).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
        assert!(err.message().contains("single shape mode"));
    }
}
