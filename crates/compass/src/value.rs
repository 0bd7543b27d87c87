//! Resolved values and the uniform query interface over them.
//!
//! # Overview
//!
//! - [`Value`] - What a node resolved to: a number, a shape, a graph, ...
//! - [`Resolved`] - A value together with its node id, style, graph and origin
//! - [`Origin`] - The source of a derived shape, kept for animation replay
//! - [`Graph`] - A 2D or 3D graph cell with its axis ranges

use std::fmt;

use compass_core::{
    geometry::Point2,
    shape::{AtomicValues, GeometryType, Shape},
    space::SpaceShape,
};

use crate::{
    ast::{Dimension, FunctionHandle, NodeId, Op},
    context::ShapeHandle,
    style::StyleOptions,
};

/// A graph cell that shapes are drawn into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Graph {
    dimension: Dimension,
    /// Layout cells as `[row1, col1, row2, col2]`.
    cells: [f64; 4],
    x_range: (f64, f64),
    y_range: (f64, f64),
    z_range: Option<(f64, f64)>,
    show_grid: bool,
}

impl Graph {
    pub fn new_2d(cells: [f64; 4], x_range: (f64, f64), y_range: (f64, f64)) -> Self {
        Self {
            dimension: Dimension::Two,
            cells,
            x_range,
            y_range,
            z_range: None,
            show_grid: false,
        }
    }

    pub fn new_3d(
        cells: [f64; 4],
        x_range: (f64, f64),
        y_range: (f64, f64),
        z_range: (f64, f64),
    ) -> Self {
        Self {
            dimension: Dimension::Three,
            cells,
            x_range,
            y_range,
            z_range: Some(z_range),
            show_grid: false,
        }
    }

    pub fn with_grid(mut self, show_grid: bool) -> Self {
        self.show_grid = show_grid;
        self
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn cells(&self) -> [f64; 4] {
        self.cells
    }

    pub fn x_range(&self) -> (f64, f64) {
        self.x_range
    }

    pub fn y_range(&self) -> (f64, f64) {
        self.y_range
    }

    pub fn z_range(&self) -> Option<(f64, f64)> {
        self.z_range
    }

    pub fn show_grid(&self) -> bool {
        self.show_grid
    }
}

/// What an expression node resolved to.
#[derive(Debug, Clone)]
pub enum Value {
    Scalar(f64),
    Text(String),
    Shape(Shape),
    Space(SpaceShape),
    Graph(Graph),
    /// A pre-compiled function, only meaningful as a `plot` argument.
    Function(FunctionHandle),
    /// The ordered results of a batch-mode transform.
    Collection(Vec<Resolved>),
}

impl Value {
    /// The geometry tag; scalars, text, graphs and collections have none.
    pub fn geometry_type(&self) -> Option<GeometryType> {
        match self {
            Self::Shape(shape) => Some(shape.geometry_type()),
            Self::Space(shape) => shape.geometry_type(),
            Self::Scalar(_)
            | Self::Text(_)
            | Self::Graph(_)
            | Self::Function(_)
            | Self::Collection(_) => None,
        }
    }

    /// Short name used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "number",
            Self::Text(_) => "text",
            Self::Shape(shape) => shape.kind_name(),
            Self::Space(shape) => shape.kind_name(),
            Self::Graph(graph) => match graph.dimension {
                Dimension::Two => "g2d",
                Dimension::Three => "g3d",
            },
            Self::Function(_) => "function",
            Self::Collection(_) => "collection",
        }
    }

    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_shape(&self) -> Option<&Shape> {
        match self {
            Self::Shape(shape) => Some(shape),
            _ => None,
        }
    }

    /// The position of a 2D point value.
    pub fn as_point(&self) -> Option<Point2> {
        match self {
            Self::Shape(Shape::Point(p)) => Some(*p),
            _ => None,
        }
    }

    pub fn as_space(&self) -> Option<&SpaceShape> {
        match self {
            Self::Space(shape) => Some(shape),
            _ => None,
        }
    }

    /// Start and end of the value's extent, for extent-bearing shapes.
    pub fn extent(&self) -> Option<(Point2, Point2)> {
        self.as_shape().and_then(Shape::extent)
    }

    /// Returns `true` when a renderer has something to draw.
    ///
    /// Scalars, text, graphs and shapes with non-finite coordinates (such as
    /// an intersection that found nothing) cannot be played.
    pub fn can_play(&self) -> bool {
        match self {
            Self::Shape(Shape::Plot(_)) => true,
            Self::Shape(shape) => shape.is_finite(),
            Self::Space(shape) => shape.atomic_values().iter().all(|v| v.is_finite()),
            Self::Collection(items) => !items.is_empty() && items.iter().all(Resolved::can_play),
            Self::Scalar(_) | Self::Text(_) | Self::Graph(_) | Self::Function(_) => false,
        }
    }

    /// Structural equality: same geometry type and every atomic value
    /// within `tolerance`.
    pub fn approx_eq(&self, other: &Value, tolerance: f64) -> bool {
        if self.geometry_type() != other.geometry_type() {
            return false;
        }
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Text(_), _) | (_, Self::Text(_)) => false,
            (Self::Space(a), Self::Space(b)) if a.kind_name() != b.kind_name() => false,
            _ => {
                let (a, b) = (self.atomic_values(), other.atomic_values());
                a.len() == b.len() && a.iter().zip(&b).all(|(x, y)| (x - y).abs() <= tolerance)
            }
        }
    }
}

impl AtomicValues for Value {
    /// Collections flatten their items in order; text, graphs and functions
    /// have no numeric projection.
    fn atomic_values(&self) -> Vec<f64> {
        match self {
            Self::Scalar(v) => vec![*v],
            Self::Shape(shape) => shape.atomic_values(),
            Self::Space(shape) => shape.atomic_values(),
            Self::Collection(items) => items.iter().flat_map(Resolved::atomic_values).collect(),
            Self::Text(_) | Self::Graph(_) | Self::Function(_) => Vec::new(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(v) => write!(f, "{v}"),
            Self::Text(text) => write!(f, "\"{text}\""),
            Self::Shape(shape) => write!(f, "{shape}"),
            Self::Space(shape) => write!(f, "{shape}"),
            Self::Graph(graph) => write!(
                f,
                "{}[x={:?}, y={:?}]",
                self.kind_name(),
                graph.x_range,
                graph.y_range
            ),
            Self::Function(_) => write!(f, "function"),
            Self::Collection(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item.value)?;
                }
                write!(f, "]")
            }
        }
    }
}

/// Where a derived shape came from.
#[derive(Debug, Clone)]
pub struct Origin {
    op: Op,
    source: Option<ShapeHandle>,
    original: Value,
}

impl Origin {
    pub fn new(op: Op, source: Option<ShapeHandle>, original: Value) -> Self {
        Self {
            op,
            source,
            original,
        }
    }

    /// The operation that derived the shape.
    pub fn op(&self) -> Op {
        self.op
    }

    /// The bound variable the original shape was read from, if any.
    pub fn source(&self) -> Option<ShapeHandle> {
        self.source
    }

    /// The untouched input shape.
    pub fn original(&self) -> &Value {
        &self.original
    }
}

/// A fully resolved expression node.
///
/// Immutable once built; every accessor is a pure read.
#[derive(Debug, Clone)]
pub struct Resolved {
    node_id: NodeId,
    op: Option<Op>,
    value: Value,
    style: StyleOptions,
    graph: Option<Graph>,
    origin: Option<Box<Origin>>,
}

impl Resolved {
    pub fn new(node_id: NodeId, value: Value) -> Self {
        Self {
            node_id,
            op: None,
            value,
            style: StyleOptions::default(),
            graph: None,
            origin: None,
        }
    }

    pub fn with_op(mut self, op: Op) -> Self {
        self.op = Some(op);
        self
    }

    pub fn with_style(mut self, style: StyleOptions) -> Self {
        self.style = style;
        self
    }

    pub fn with_graph(mut self, graph: Option<Graph>) -> Self {
        self.graph = graph;
        self
    }

    pub fn with_origin(mut self, origin: Option<Origin>) -> Self {
        self.origin = origin.map(Box::new);
        self
    }

    pub(crate) fn with_node_id(mut self, node_id: NodeId) -> Self {
        self.node_id = node_id;
        self
    }

    pub fn node_id(&self) -> NodeId {
        self.node_id
    }

    /// The operation that produced the value; `None` for literals and
    /// arithmetic results.
    pub fn op(&self) -> Option<Op> {
        self.op
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    pub fn style(&self) -> &StyleOptions {
        &self.style
    }

    pub fn graph(&self) -> Option<&Graph> {
        self.graph.as_ref()
    }

    pub fn origin(&self) -> Option<&Origin> {
        self.origin.as_deref()
    }

    pub fn geometry_type(&self) -> Option<GeometryType> {
        self.value.geometry_type()
    }

    pub fn atomic_values(&self) -> Vec<f64> {
        self.value.atomic_values()
    }

    /// Start of the extent of a point, line, arc or polygon.
    pub fn start_value(&self) -> Option<Point2> {
        self.value.extent().map(|(start, _)| start)
    }

    /// End of the extent of a point, line, arc or polygon.
    pub fn end_value(&self) -> Option<Point2> {
        self.value.extent().map(|(_, end)| end)
    }

    pub fn can_play(&self) -> bool {
        self.value.can_play()
    }

    /// Returns `true` for the collection produced by a batch-mode transform.
    pub fn is_batch(&self) -> bool {
        matches!(self.value, Value::Collection(_))
    }

    pub fn approx_eq(&self, other: &Resolved, tolerance: f64) -> bool {
        self.value.approx_eq(&other.value, tolerance)
    }
}

impl fmt::Display for Resolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
