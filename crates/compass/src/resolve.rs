//! Bottom-up resolution of expression trees.

use log::{debug, trace};

use crate::{
    arithmetic,
    ast::{Expr, ExprKind, NodeId, Op},
    config::EngineConfig,
    context::ExpressionContext,
    error::{ExpressionError, Result},
    ops::{self, Arg, Call},
    style::{self, StyleArg, StyleOptions},
    value::{Graph, Resolved, Value},
};

/// Resolves expressions against one context.
///
/// Borrows the context immutably: nothing is bound while a tree is being
/// resolved.
pub(crate) struct Resolver<'a> {
    config: &'a EngineConfig,
    ctx: &'a ExpressionContext,
}

impl<'a> Resolver<'a> {
    pub fn new(config: &'a EngineConfig, ctx: &'a ExpressionContext) -> Self {
        Self { config, ctx }
    }

    /// Consumes an unresolved tree and returns its resolved value.
    pub fn resolve(&self, expr: Expr) -> Result<Resolved> {
        let id = expr.id();
        match expr.into_kind() {
            ExprKind::Number(v) => Ok(Resolved::new(id, Value::Scalar(v))),
            ExprKind::Text(text) => Ok(Resolved::new(id, Value::Text(text))),
            ExprKind::Variable(name) => self
                .ctx
                .lookup(name)
                .map(|bound| bound.clone().with_node_id(id))
                .ok_or_else(|| ExpressionError::type_mismatch(id, format!("undefined variable `{name}`"))),
            ExprKind::Style { key, .. } => Err(ExpressionError::type_mismatch(
                id,
                format!("style `{key}` is only valid as a call argument"),
            )),
            ExprKind::Binary { op, lhs, rhs } => {
                let lhs = self.resolve(*lhs)?;
                let rhs = self.resolve(*rhs)?;
                let value = arithmetic::apply(op, lhs.value(), rhs.value())
                    .map_err(|message| ExpressionError::type_mismatch(id, message))?;
                Ok(Resolved::new(id, value))
            }
            ExprKind::Call { op, args } => self.resolve_call(id, op, args),
            ExprKind::Function(handle) => Ok(Resolved::new(id, Value::Function(handle))),
        }
    }

    fn resolve_call(&self, node_id: NodeId, op: Op, args: Vec<Expr>) -> Result<Resolved> {
        debug!(node = node_id.to_string(), op = op.name(), args = args.len(); "Resolving call");

        let (styles, geometric) = style::partition(args);
        let style = self.resolve_style(node_id, styles)?;

        let args = geometric
            .into_iter()
            .map(|expr| self.resolve_arg(expr))
            .collect::<Result<Vec<_>>>()?;
        let (graph, args) = take_graph(node_id, op, args)?;

        let call = Call {
            op,
            node_id,
            args,
            graph,
            config: self.config,
            ctx: self.ctx,
        };
        let outcome = ops::dispatch(&call)?;

        // Batch members render on their own, so they carry the call's style
        // and graph too.
        let value = match outcome.value {
            Value::Collection(items) => Value::Collection(
                items
                    .into_iter()
                    .map(|item| item.with_style(style.clone()).with_graph(graph))
                    .collect(),
            ),
            value => value,
        };
        trace!(node = node_id.to_string(), value = value.to_string(); "Resolved call");

        Ok(Resolved::new(node_id, value)
            .with_op(op)
            .with_style(style)
            .with_graph(graph)
            .with_origin(outcome.origin))
    }

    fn resolve_style(&self, node_id: NodeId, styles: Vec<StyleArg>) -> Result<StyleOptions> {
        let mut options = StyleOptions::default();
        for StyleArg { key, value } in styles {
            let resolved = self.resolve(value)?;
            options
                .apply(key, resolved.value())
                .map_err(|message| ExpressionError::type_mismatch(node_id, message))?;
        }
        Ok(options)
    }

    fn resolve_arg(&self, expr: Expr) -> Result<Arg> {
        let node_id = expr.id();
        let source = match expr.kind() {
            ExprKind::Variable(name) => self.ctx.handle_of(*name),
            _ => None,
        };
        let resolved = self.resolve(expr)?;
        Ok(Arg {
            node_id,
            resolved,
            source,
        })
    }
}

/// Removes a leading graph argument, checking that `op` can draw into it.
fn take_graph(node_id: NodeId, op: Op, mut args: Vec<Arg>) -> Result<(Option<Graph>, Vec<Arg>)> {
    let graph = match args.first().map(Arg::value) {
        Some(Value::Graph(graph)) => *graph,
        _ => return Ok((None, args)),
    };

    match op.graph_dimension() {
        None => Err(ExpressionError::type_mismatch(
            node_id,
            format!("{op}() does not take a graph argument"),
        )),
        Some(allowed) if !allowed.contains(&graph.dimension()) => {
            Err(ExpressionError::type_mismatch(
                node_id,
                format!("{op}() cannot draw into a {} graph", args[0].value().kind_name()),
            ))
        }
        Some(_) => {
            args.remove(0);
            Ok((Some(graph), args))
        }
    }
}
