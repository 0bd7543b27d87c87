//! Operation dispatch.
//!
//! Every call node is resolved in three steps: style arguments are split off,
//! the remaining arguments are resolved in order, and an optional leading
//! graph argument is taken off the front. What is left is handed to the
//! operation as a [`Call`].

mod construct;
mod intersect;
mod item;
mod measure;
mod primitives;
mod space;
mod transform;

use compass_core::{
    error::GeometryError,
    geometry::Point2,
    shape::{AtomicValues, Line, Shape},
};

use crate::{
    ast::{NodeId, Op},
    config::EngineConfig,
    context::{ExpressionContext, ShapeHandle},
    error::{ExpressionError, Result},
    value::{Graph, Origin, Resolved, Value},
};

/// A resolved geometric argument.
#[derive(Debug, Clone)]
pub(crate) struct Arg {
    pub node_id: NodeId,
    pub resolved: Resolved,
    /// Set when the argument was a variable reference.
    pub source: Option<ShapeHandle>,
}

impl Arg {
    pub fn value(&self) -> &Value {
        self.resolved.value()
    }
}

/// The result of an operation before style and graph are attached.
#[derive(Debug)]
pub(crate) struct Outcome {
    pub value: Value,
    pub origin: Option<Origin>,
}

impl Outcome {
    pub fn derived(value: Value, origin: Origin) -> Self {
        Self {
            value,
            origin: Some(origin),
        }
    }
}

impl From<Value> for Outcome {
    fn from(value: Value) -> Self {
        Self {
            value,
            origin: None,
        }
    }
}

/// A call whose arguments are resolved and stripped of style and graph.
pub(crate) struct Call<'a> {
    pub op: Op,
    pub node_id: NodeId,
    pub args: Vec<Arg>,
    pub graph: Option<Graph>,
    pub config: &'a EngineConfig,
    pub ctx: &'a ExpressionContext,
}

impl Call<'_> {
    pub fn arity_error(&self, message: impl AsRef<str>) -> ExpressionError {
        ExpressionError::arity(self.node_id, format!("{}(): {}", self.op, message.as_ref()))
    }

    pub fn type_error(&self, message: impl AsRef<str>) -> ExpressionError {
        ExpressionError::type_mismatch(self.node_id, format!("{}(): {}", self.op, message.as_ref()))
    }

    pub fn domain_error(&self, message: impl AsRef<str>) -> ExpressionError {
        ExpressionError::domain(self.node_id, format!("{}(): {}", self.op, message.as_ref()))
    }

    pub fn index_error(&self, message: impl AsRef<str>) -> ExpressionError {
        ExpressionError::index(self.node_id, format!("{}(): {}", self.op, message.as_ref()))
    }

    pub fn geometry_error(&self, err: GeometryError) -> ExpressionError {
        ExpressionError::from_geometry(self.node_id, self.op, err)
    }

    /// Fails unless the argument count lies in `min..=max`.
    pub fn expect_args(&self, min: usize, max: usize, usage: &str) -> Result<()> {
        let n = self.args.len();
        if n < min || n > max {
            return Err(self.arity_error(format!("expected {usage}, got {n} argument(s)")));
        }
        Ok(())
    }

    pub fn scalar(&self, i: usize, what: &str) -> Result<f64> {
        let arg = &self.args[i];
        arg.value().as_scalar().ok_or_else(|| {
            self.type_error(format!("{what} must be a number, got {}", arg.value().kind_name()))
        })
    }

    pub fn point(&self, i: usize, what: &str) -> Result<Point2> {
        let arg = &self.args[i];
        arg.value().as_point().ok_or_else(|| {
            self.type_error(format!("{what} must be a point, got {}", arg.value().kind_name()))
        })
    }

    pub fn shape(&self, i: usize, what: &str) -> Result<&Shape> {
        let arg = &self.args[i];
        arg.value().as_shape().ok_or_else(|| {
            self.type_error(format!("{what} must be a shape, got {}", arg.value().kind_name()))
        })
    }

    /// A Line-typed argument.
    pub fn line(&self, i: usize, what: &str) -> Result<Line> {
        match self.args[i].value() {
            Value::Shape(Shape::Line(line)) => Ok(*line),
            other => Err(self.type_error(format!("{what} must be a line, got {}", other.kind_name()))),
        }
    }

    pub fn is_scalar(&self, i: usize) -> bool {
        matches!(self.args.get(i).map(Arg::value), Some(Value::Scalar(_)))
    }

    pub fn is_point(&self, i: usize) -> bool {
        self.args.get(i).and_then(|a| a.value().as_point()).is_some()
    }

    /// Atomic values of every argument, concatenated in order.
    pub fn flatten(&self) -> Vec<f64> {
        self.args.iter().flat_map(|a| a.value().atomic_values()).collect()
    }

    /// The x-range used for plot sampling and root finding.
    pub fn x_range(&self) -> (f64, f64) {
        self.graph
            .as_ref()
            .map_or_else(|| self.config.defaults().viewport().x(), Graph::x_range)
    }

    /// Builds the origin record for a shape derived from argument `i`.
    pub fn origin_of(&self, i: usize) -> Origin {
        let arg = &self.args[i];
        Origin::new(self.op, arg.source, arg.value().clone())
    }
}

/// Runs the operation named by `call.op`.
pub(crate) fn dispatch(call: &Call<'_>) -> Result<Outcome> {
    match call.op {
        Op::G2d => primitives::graph_2d(call),
        Op::G3d => primitives::graph_3d(call),
        Op::Point => primitives::point(call),
        Op::Line | Op::Vec => primitives::line(call),
        Op::Circle => primitives::circle(call),
        Op::Arc => primitives::arc(call),
        Op::Polygon => primitives::polygon(call),
        Op::Plot => primitives::plot(call),
        Op::Angle => primitives::angle(call),
        Op::Point3d => space::point3d(call),
        Op::Line3d => space::line3d(call),
        Op::Plane3d => space::plane3d(call),
        Op::Distance3d => space::distance3d(call),
        Op::Angle3d => space::angle3d(call),
        Op::Intersect => intersect::intersect(call),
        Op::Reflect => transform::reflect(call),
        Op::Rotate => transform::rotate(call),
        Op::Scale => transform::scale(call),
        Op::Translate => transform::translate(call),
        Op::Distance | Op::Mag => measure::distance(call),
        Op::Dot => measure::dot(call),
        Op::Cross => measure::cross(call),
        Op::Uv => measure::unit_vector(call),
        Op::Project => construct::project(call),
        Op::Mid => construct::mid(call),
        Op::PointAtRatio => construct::point_at_ratio(call),
        Op::PointOnCircle => construct::point_on_circle(call),
        Op::PolarPoint => construct::polar_point(call),
        Op::Tangent => construct::tangent(call),
        Op::Perp => construct::perpendicular(call),
        Op::Para => construct::parallel(call),
        Op::Item => item::item(call),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Helpers for resolving small expression trees in operation tests.

    use crate::{
        ast::{AstBuilder, Expr},
        config::EngineConfig,
        context::ExpressionContext,
        error::Result,
        resolve::Resolver,
        value::Resolved,
    };

    pub fn eval(expr: Expr, ctx: &ExpressionContext) -> Result<Resolved> {
        let config = EngineConfig::default();
        Resolver::new(&config, ctx).resolve(expr)
    }

    /// Resolves `expr` and binds it to `name`.
    pub fn define(name: &str, expr: Expr, ctx: &mut ExpressionContext) {
        let resolved = eval(expr, ctx).expect("definition resolves");
        ctx.bind(name, resolved);
    }

    pub fn builder() -> AstBuilder {
        AstBuilder::new()
    }
}
