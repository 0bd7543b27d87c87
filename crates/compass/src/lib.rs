//! Compass - the evaluation core of a geometric construction language.
//!
//! Resolves trees of expression nodes (points, lines, circles, polygons,
//! plots, planes and the operations between them) against a variable
//! environment, producing immutable numeric geometry and render-ready
//! command descriptors. Parsing source text and drawing are left to the
//! caller.

pub mod ast;
pub mod command;
pub mod config;
pub mod context;
pub mod error;
pub mod style;
pub mod value;

mod arithmetic;
mod ops;
mod resolve;

pub use compass_core::{color, geometry, identifier, shape, space};

pub use ast::{AstBuilder, Expr, NodeId, Op};
pub use command::{CommandDescriptor, CommandOptions};
pub use context::{ExpressionContext, ShapeHandle};
pub use error::{CompassError, ErrorKind, ExpressionError};
pub use value::{Resolved, Value};

use log::{debug, info};

use config::EngineConfig;
use resolve::Resolver;

/// Entry point for resolving expression trees.
///
/// # Examples
///
/// ```
/// use compass::{AstBuilder, Evaluator, ExpressionContext, Op};
///
/// let evaluator = Evaluator::default();
/// let mut ctx = ExpressionContext::new();
/// let mut ast = AstBuilder::new();
///
/// let circle = ast.call_numbers(Op::Circle, &[0.0, 0.0, 5.0]);
/// evaluator.define("C", circle, &mut ctx).expect("circle resolves");
///
/// let c = ast.var("C");
/// let angle = ast.number(90.0);
/// let top = ast.call(Op::PointOnCircle, vec![c, angle]);
/// let top = evaluator.resolve(top, &ctx).expect("point resolves");
///
/// let values = top.atomic_values();
/// assert!((values[1] - 5.0).abs() < 1e-9);
/// assert!(evaluator.command(&top).is_some());
/// ```
#[derive(Debug, Default)]
pub struct Evaluator {
    config: EngineConfig,
}

impl Evaluator {
    /// Create an evaluator with the given configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Resolve an expression tree against `ctx`.
    ///
    /// The tree is consumed; the returned value is immutable.
    ///
    /// # Errors
    ///
    /// Returns an [`ExpressionError`] naming the node that failed: wrong
    /// argument count, wrong operand type, a degenerate input, or an index
    /// out of range. An intersection without the requested point is not an
    /// error; it resolves to a value that cannot play.
    pub fn resolve(&self, expr: Expr, ctx: &ExpressionContext) -> Result<Resolved, ExpressionError> {
        info!(node = expr.id().to_string(); "Resolving expression");
        let resolved = Resolver::new(&self.config, ctx).resolve(expr)?;
        debug!(
            node = resolved.node_id().to_string(),
            kind = resolved.value().kind_name(),
            can_play = resolved.can_play();
            "Expression resolved"
        );
        Ok(resolved)
    }

    /// Resolve `expr` and bind the result to `name`.
    ///
    /// Rebinding an existing name keeps its handle.
    ///
    /// # Errors
    ///
    /// Returns the resolution error; `ctx` is left untouched in that case.
    pub fn define(
        &self,
        name: &str,
        expr: Expr,
        ctx: &mut ExpressionContext,
    ) -> Result<ShapeHandle, ExpressionError> {
        info!(name; "Defining variable");
        let resolved = self.resolve(expr, ctx)?;
        Ok(ctx.bind(name, resolved))
    }

    /// The render command for a resolved value, using the configured
    /// viewport and plot sampling.
    pub fn command(&self, resolved: &Resolved) -> Option<CommandDescriptor> {
        resolved.to_command(&CommandOptions::from_config(&self.config))
    }

    /// Structural equality within the configured tolerance.
    pub fn equals(&self, a: &Resolved, b: &Resolved) -> bool {
        a.approx_eq(b, self.config.tolerance().equality())
    }
}
