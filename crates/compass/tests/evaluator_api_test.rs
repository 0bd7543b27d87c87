//! Integration tests for the Evaluator API
//!
//! These tests drive whole constructions through the public surface: build
//! a tree, define variables, resolve, query, and turn results into commands.

use std::{fs, io::Write};

use float_cmp::approx_eq;
use tempfile::NamedTempFile;

use compass::{
    AstBuilder, ErrorKind, Evaluator, ExpressionContext, Op, Value,
    ast::StyleKey,
    command::DrawShape,
    config::{ConfigError, load_config},
    context::NumericScope,
    shape::GeometryType,
};

fn close(actual: &[f64], expected: &[f64]) -> bool {
    actual.len() == expected.len()
        && actual
            .iter()
            .zip(expected)
            .all(|(a, b)| approx_eq!(f64, *a, *b, epsilon = 1e-9))
}

#[test]
fn test_evaluator_api_exists() {
    let evaluator = Evaluator::default();
    assert_eq!(evaluator.config().tolerance().equality(), 1e-9);
}

#[test]
fn test_triangle_construction() {
    let evaluator = Evaluator::default();
    let mut ctx = ExpressionContext::new();
    let mut ast = AstBuilder::new();

    for (name, x, y) in [("A", 0.0, 0.0), ("B", 4.0, 0.0), ("C", 0.0, 3.0)] {
        let p = ast.call_numbers(Op::Point, &[x, y]);
        evaluator.define(name, p, &mut ctx).expect("point resolves");
    }

    let vertices = ["A", "B", "C"].map(|n| ast.var(n)).to_vec();
    let triangle = ast.call(Op::Polygon, vertices);
    evaluator
        .define("T", triangle, &mut ctx)
        .expect("polygon resolves");

    let t = ctx.lookup("T").expect("T is bound");
    assert_eq!(t.geometry_type(), Some(GeometryType::Polygon));
    let values = t.atomic_values();
    assert_eq!(values.len(), 8);
    assert_eq!(values[..2], values[6..]);

    let t = ast.var("T");
    let incenter = evaluator
        .resolve(ast.call(Op::Mid, vec![t]), &ctx)
        .expect("mid resolves");
    assert!(close(&incenter.atomic_values(), &[1.0, 1.0]));
}

#[test]
fn test_intersections() {
    let evaluator = Evaluator::default();
    let ctx = ExpressionContext::new();
    let mut ast = AstBuilder::new();

    let horizontal = ast.call_numbers(Op::Line, &[-5.0, 0.0, 5.0, 0.0]);
    let vertical = ast.call_numbers(Op::Line, &[0.0, -5.0, 0.0, 5.0]);
    let origin = evaluator
        .resolve(ast.call(Op::Intersect, vec![horizontal, vertical]), &ctx)
        .expect("lines intersect");
    assert!(close(&origin.atomic_values(), &[0.0, 0.0]));

    let c1 = ast.call_numbers(Op::Circle, &[-2.0, 0.0, 5.0]);
    let c2 = ast.call_numbers(Op::Circle, &[2.0, 0.0, 5.0]);
    let top = evaluator
        .resolve(ast.call(Op::Intersect, vec![c1, c2]), &ctx)
        .expect("circles intersect");
    let values = top.atomic_values();
    assert!(approx_eq!(f64, values[0], 0.0, epsilon = 1e-9));
    assert!(approx_eq!(f64, values[1].abs(), 21f64.sqrt(), epsilon = 1e-9));
}

#[test]
fn test_missing_intersection_is_soft() {
    let evaluator = Evaluator::default();
    let ctx = ExpressionContext::new();
    let mut ast = AstBuilder::new();

    // Concentric circles never report intersection points.
    let c1 = ast.call_numbers(Op::Circle, &[0.0, 0.0, 5.0]);
    let c2 = ast.call_numbers(Op::Circle, &[0.0, 0.0, 10.0]);
    let index = ast.number(3.0);
    let result = evaluator
        .resolve(ast.call(Op::Intersect, vec![c1, c2, index]), &ctx)
        .expect("a missing intersection is not an error");

    assert!(!result.can_play());
    assert!(evaluator.command(&result).is_none());
}

#[test]
fn test_rotation_round_trip() {
    let evaluator = Evaluator::default();
    let mut ctx = ExpressionContext::new();
    let mut ast = AstBuilder::new();

    let square = ast.call_numbers(Op::Polygon, &[1.0, 1.0, 3.0, 1.0, 3.0, 3.0, 1.0, 3.0]);
    evaluator.define("S", square, &mut ctx).unwrap();

    let s = ast.var("S");
    let angle = ast.number(360.0);
    let center = ast.call_numbers(Op::Point, &[-4.0, 2.0]);
    let turned = evaluator
        .resolve(ast.call(Op::Rotate, vec![s, angle, center]), &ctx)
        .unwrap();

    assert!(evaluator.equals(&turned, ctx.lookup("S").unwrap()));
}

#[test]
fn test_transform_command_carries_transition() {
    let evaluator = Evaluator::default();
    let mut ctx = ExpressionContext::new();
    let mut ast = AstBuilder::new();

    let circle = ast.call_numbers(Op::Circle, &[0.0, 0.0, 1.0]);
    let handle = evaluator.define("C", circle, &mut ctx).unwrap();

    let c = ast.var("C");
    let red = ast.text("red");
    let color = ast.style(StyleKey::Color, red);
    let dx = ast.number(3.0);
    let dy = ast.number(0.0);
    let moved = evaluator
        .resolve(ast.call(Op::Translate, vec![c, color, dx, dy]), &ctx)
        .unwrap();

    let command = evaluator.command(&moved).expect("moved circle draws");
    assert_eq!(
        command.shape(),
        &DrawShape::Circle {
            center: [3.0, 0.0],
            radius: 1.0
        }
    );
    assert!(command.style().color().is_some());

    let transition = command.transition().expect("transform has a transition");
    assert_eq!(transition.op(), Op::Translate);
    assert_eq!(transition.source(), Some(handle));
    assert_eq!(
        transition.from(),
        &DrawShape::Circle {
            center: [0.0, 0.0],
            radius: 1.0
        }
    );
}

#[test]
fn test_batch_then_item() {
    let evaluator = Evaluator::default();
    let mut ctx = ExpressionContext::new();
    let mut ast = AstBuilder::new();

    let mirror = ast.call_numbers(Op::Line, &[0.0, 0.0, 10.0, 0.0]);
    let p = ast.call_numbers(Op::Point, &[5.0, 10.0]);
    let l = ast.call_numbers(Op::Line, &[0.0, 1.0, 2.0, 3.0]);
    evaluator
        .define("R", ast.call(Op::Reflect, vec![mirror, p, l]), &mut ctx)
        .unwrap();

    let batch = ctx.lookup("R").unwrap();
    assert!(batch.is_batch());
    let command = evaluator.command(batch).expect("batch draws");
    let DrawShape::Group { items } = command.shape() else {
        panic!("expected a group, got {:?}", command.shape());
    };
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|item| item.transition().is_some()));

    let r = ast.var("R");
    let second = ast.number(1.0);
    let line = evaluator
        .resolve(ast.call(Op::Item, vec![r, second]), &ctx)
        .unwrap();
    assert!(close(&line.atomic_values(), &[0.0, -1.0, 2.0, -3.0]));

    let r = ast.var("R");
    let third = ast.number(2.0);
    let err = evaluator
        .resolve(ast.call(Op::Item, vec![r, third]), &ctx)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Index);
}

#[test]
fn test_arithmetic_composes_with_shapes() {
    let evaluator = Evaluator::default();
    let mut ctx = ExpressionContext::new();
    let mut ast = AstBuilder::new();

    let p = ast.call_numbers(Op::Point, &[1.0, 2.0]);
    evaluator.define("P", p, &mut ctx).unwrap();
    let q = ast.call_numbers(Op::Point, &[3.0, -1.0]);
    evaluator.define("Q", q, &mut ctx).unwrap();

    let p = ast.var("P");
    let q = ast.var("Q");
    let sum = ast.binary(compass::ast::BinaryOp::Add, p, q);
    let half = ast.number(2.0);
    let mean = ast.binary(compass::ast::BinaryOp::Div, sum, half);
    let line = ast.var("P");
    let through = ast.call(Op::Line, vec![line, mean]);

    let resolved = evaluator.resolve(through, &ctx).unwrap();
    assert!(close(&resolved.atomic_values(), &[1.0, 2.0, 2.0, 0.5]));
}

#[test]
fn test_errors_name_the_failing_node() {
    let evaluator = Evaluator::default();
    let ctx = ExpressionContext::new();
    let mut ast = AstBuilder::new();

    let zero = ast.call_numbers(Op::Vec, &[1.0, 1.0, 1.0, 1.0]);
    let uv = ast.call(Op::Uv, vec![zero]);
    let id = uv.id();
    let outer = ast.call(Op::Mid, vec![uv]);

    let err = evaluator.resolve(outer, &ctx).unwrap_err();
    assert_eq!(err.node_id(), id);
    assert_eq!(err.kind(), ErrorKind::Domain);
    assert!(err.to_string().starts_with(&format!("domain error at node {id}: uv()")));
}

#[test]
fn test_failed_define_leaves_context_untouched() {
    let evaluator = Evaluator::default();
    let mut ctx = ExpressionContext::new();
    let mut ast = AstBuilder::new();

    let bad = ast.call_numbers(Op::Point, &[1.0]);
    assert!(evaluator.define("P", bad, &mut ctx).is_err());
    assert!(ctx.is_empty());
}

#[test]
fn test_plot_intersection_within_graph() {
    let evaluator = Evaluator::default();
    let ctx = ExpressionContext::new();
    let mut ast = AstBuilder::new();

    let sine = ast.function(|x: f64, _: &NumericScope| x.sin());
    let f = ast.call(Op::Plot, vec![sine]);
    let zero = ast.function(|_: f64, _: &NumericScope| 0.0);
    let g = ast.call(Op::Plot, vec![zero]);

    // Only the root at π lies inside [2, 4].
    let graph = ast.call_numbers(Op::G2d, &[0.0, 0.0, 1.0, 1.0, 2.0, 4.0]);
    let result = evaluator
        .resolve(ast.call(Op::Intersect, vec![graph, f, g]), &ctx)
        .unwrap();
    let values = result.atomic_values();
    assert!(approx_eq!(f64, values[0], std::f64::consts::PI, epsilon = 1e-8));
    assert!(result.graph().is_some());
}

#[test]
fn test_config_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
        [tolerance]
        equality = 0.5

        [defaults]
        tangent_length = 4.0
        "#
    )
    .unwrap();

    let config = load_config(file.path()).expect("config loads");
    let evaluator = Evaluator::new(config);
    let ctx = ExpressionContext::new();
    let mut ast = AstBuilder::new();

    let circle = ast.call_numbers(Op::Circle, &[0.0, 0.0, 1.0]);
    let angle = ast.number(90.0);
    let tangent = evaluator
        .resolve(ast.call(Op::Tangent, vec![circle, angle]), &ctx)
        .unwrap();
    assert!(close(&tangent.atomic_values(), &[2.0, 1.0, -2.0, 1.0]));

    let a = evaluator.resolve(ast.call_numbers(Op::Point, &[0.0, 0.0]), &ctx).unwrap();
    let b = evaluator.resolve(ast.call_numbers(Op::Point, &[0.2, 0.3]), &ctx).unwrap();
    assert!(evaluator.equals(&a, &b));
}

#[test]
fn test_invalid_config_file() {
    let file = NamedTempFile::new().unwrap();
    fs::write(file.path(), "[roots]\nsamples = 1\n").unwrap();
    assert!(matches!(
        load_config(file.path()),
        Err(ConfigError::Validation(_))
    ));

    assert!(matches!(
        load_config("/nonexistent/compass.toml"),
        Err(ConfigError::Io(_))
    ));
}

#[test]
fn test_three_dimensional_measures() {
    let evaluator = Evaluator::default();
    let mut ctx = ExpressionContext::new();
    let mut ast = AstBuilder::new();

    let g3 = ast.call_numbers(Op::G3d, &[0.0, 0.0, 1.0, 1.0]);
    let a = ast.call_numbers(Op::Point3d, &[0.0, 0.0, 0.0]);
    let b = ast.call_numbers(Op::Point3d, &[1.0, 0.0, 0.0]);
    let c = ast.call_numbers(Op::Point3d, &[0.0, 1.0, 0.0]);
    evaluator
        .define("floor", ast.call(Op::Plane3d, vec![g3, a, b, c]), &mut ctx)
        .unwrap();

    let floor = ctx.lookup("floor").unwrap();
    assert!(floor.can_play());
    assert!(matches!(
        evaluator.command(floor).map(|c| c.shape().clone()),
        Some(DrawShape::Plane3d { .. })
    ));

    let floor = ast.var("floor");
    let p = ast.call_numbers(Op::Point3d, &[2.0, 2.0, -6.0]);
    let d = evaluator
        .resolve(ast.call(Op::Distance3d, vec![floor, p]), &ctx)
        .unwrap();
    assert!(matches!(d.value(), Value::Scalar(v) if approx_eq!(f64, *v, 6.0)));
    assert!(evaluator.command(&d).is_none());
}
