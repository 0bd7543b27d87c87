//! Render-ready descriptors handed to the drawing layer.
//!
//! A [`CommandDescriptor`] carries a shape kind, its coordinates and the style
//! overrides of the node that produced it. Derived shapes also carry a
//! [`Transition`] describing the shape they were derived from, so an animator
//! can interpolate between the two. Descriptors serialize with serde; the
//! core never draws anything itself.

use serde::Serialize;

use compass_core::{
    geometry::Point2,
    shape::{CircleLike, PolygonLike, Shape},
    space::SpaceShape,
};

use crate::{
    ast::{NodeId, Op},
    config::EngineConfig,
    context::ShapeHandle,
    style::StyleOptions,
    value::{Resolved, Value},
};

/// Options that affect how shapes become commands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommandOptions {
    /// x-range plots are sampled over when their node has no graph.
    pub x_range: (f64, f64),
    /// Number of samples in a plot polyline.
    pub plot_samples: usize,
}

impl CommandOptions {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            x_range: config.defaults().viewport().x(),
            plot_samples: config.defaults().plot_samples(),
        }
    }
}

impl Default for CommandOptions {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

/// The geometry of a command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawShape {
    Point {
        at: [f64; 2],
    },
    Line {
        from: [f64; 2],
        to: [f64; 2],
        /// Drawn with an arrow head (vectors).
        arrow: bool,
    },
    Circle {
        center: [f64; 2],
        radius: f64,
    },
    Arc {
        center: [f64; 2],
        radius: f64,
        start_angle: f64,
        sweep: f64,
    },
    Polygon {
        vertices: Vec<[f64; 2]>,
    },
    /// A sampled plot.
    Polyline {
        points: Vec<[f64; 2]>,
    },
    Angle {
        vertex: [f64; 2],
        p1: [f64; 2],
        p2: [f64; 2],
        radius: f64,
        degrees: f64,
        right: bool,
    },
    Point3d {
        at: [f64; 3],
    },
    Line3d {
        from: [f64; 3],
        to: [f64; 3],
    },
    Plane3d {
        point: [f64; 3],
        normal: [f64; 3],
    },
    /// The members of a batch-mode result, played as one step.
    Group {
        items: Vec<CommandDescriptor>,
    },
}

impl DrawShape {
    /// Builds the draw shape of a single value; `None` when it has no
    /// drawable geometry.
    pub fn from_value(
        value: &Value,
        arrow: bool,
        x_range: (f64, f64),
        options: &CommandOptions,
    ) -> Option<Self> {
        match value {
            Value::Shape(shape) => Some(Self::from_shape(shape, arrow, x_range, options)),
            Value::Space(shape) => Some(Self::from_space(shape)),
            _ => None,
        }
    }

    fn from_shape(
        shape: &Shape,
        arrow: bool,
        x_range: (f64, f64),
        options: &CommandOptions,
    ) -> Self {
        match shape {
            Shape::Point(p) => Self::Point { at: p.to_array() },
            Shape::Line(line) => Self::Line {
                from: line.start().to_array(),
                to: line.end().to_array(),
                arrow,
            },
            Shape::Circle(circle) => Self::Circle {
                center: circle.center().to_array(),
                radius: circle.radius(),
            },
            Shape::Arc(arc) => Self::Arc {
                center: arc.center().to_array(),
                radius: arc.radius(),
                start_angle: arc.start_angle(),
                sweep: arc.sweep(),
            },
            Shape::Polygon(polygon) => Self::Polygon {
                vertices: to_arrays(polygon.closed_vertices()),
            },
            Shape::Plot(plot) => Self::Polyline {
                points: to_arrays(&plot.sample(x_range, options.plot_samples)),
            },
            Shape::Angle(angle) => Self::Angle {
                vertex: angle.vertex().to_array(),
                p1: angle.p1().to_array(),
                p2: angle.p2().to_array(),
                radius: angle.radius(),
                degrees: angle.degrees(),
                right: angle.is_right(),
            },
        }
    }

    fn from_space(shape: &SpaceShape) -> Self {
        match shape {
            SpaceShape::Point(p) => Self::Point3d { at: p.to_array() },
            SpaceShape::Line(line) => Self::Line3d {
                from: line.start().to_array(),
                to: line.end().to_array(),
            },
            SpaceShape::Plane(plane) => Self::Plane3d {
                point: plane.point().to_array(),
                normal: plane.normal().to_array(),
            },
        }
    }
}

fn to_arrays(points: &[Point2]) -> Vec<[f64; 2]> {
    points.iter().map(|p| p.to_array()).collect()
}

/// The source side of an animated derivation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transition {
    op: Op,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<ShapeHandle>,
    from: DrawShape,
}

impl Transition {
    pub fn op(&self) -> Op {
        self.op
    }

    pub fn source(&self) -> Option<ShapeHandle> {
        self.source
    }

    pub fn from(&self) -> &DrawShape {
        &self.from
    }
}

/// A render-ready record for one resolved node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandDescriptor {
    node: NodeId,
    shape: DrawShape,
    #[serde(skip_serializing_if = "StyleOptions::is_empty")]
    style: StyleOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    transition: Option<Transition>,
}

impl CommandDescriptor {
    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn shape(&self) -> &DrawShape {
        &self.shape
    }

    pub fn style(&self) -> &StyleOptions {
        &self.style
    }

    pub fn transition(&self) -> Option<&Transition> {
        self.transition.as_ref()
    }
}

impl Resolved {
    /// Converts the node into a render command.
    ///
    /// Returns `None` when there is nothing to draw: scalars, text, graphs,
    /// and shapes that cannot play (such as an intersection that found no
    /// point). A `None` command is not an error.
    pub fn to_command(&self, options: &CommandOptions) -> Option<CommandDescriptor> {
        if !self.can_play() {
            return None;
        }
        let x_range = self.graph().map_or(options.x_range, |g| g.x_range());
        let arrow = self.op() == Some(Op::Vec);

        let shape = match self.value() {
            Value::Collection(items) => DrawShape::Group {
                items: items
                    .iter()
                    .filter_map(|item| item.to_command(options))
                    .collect(),
            },
            value => DrawShape::from_value(value, arrow, x_range, options)?,
        };

        let transition = self.origin().and_then(|origin| {
            let from = DrawShape::from_value(origin.original(), arrow, x_range, options)?;
            Some(Transition {
                op: origin.op(),
                source: origin.source(),
                from,
            })
        });

        Some(CommandDescriptor {
            node: self.node_id(),
            shape,
            style: self.style().clone(),
            transition,
        })
    }
}
