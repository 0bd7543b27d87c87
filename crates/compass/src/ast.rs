//! The unresolved expression tree.
//!
//! An external surface parser produces [`Expr`] trees; [`AstBuilder`] stands
//! in for it in tests and embedding code by handing out sequential
//! [`NodeId`]s.
//!
//! # Overview
//!
//! - [`Expr`] / [`ExprKind`] - An expression node and its payload
//! - [`Op`] - Every callable operation, parsed from its surface name
//! - [`BinaryOp`] - The arithmetic operators
//! - [`StyleKey`] - The style-override argument names
//! - [`ScopedFunction`] / [`FunctionHandle`] - Pre-compiled plot functions

use std::{fmt, str::FromStr, sync::Arc};

use serde::Serialize;
use thiserror::Error;

use compass_core::identifier::Id;

use crate::context::NumericScope;

/// Identifies an expression node in error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(u32);

impl NodeId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The surface name did not match any operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown operation `{0}`")]
pub struct UnknownName(pub String);

/// Whether an operation draws into a 2D graph, a 3D graph, or neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Two,
    Three,
}

macro_rules! ops {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// A callable operation.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        #[serde(rename_all = "lowercase")]
        pub enum Op {
            $($variant),+
        }

        impl Op {
            /// The surface name of the operation.
            pub fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name),+
                }
            }
        }

        impl FromStr for Op {
            type Err = UnknownName;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok(Self::$variant),)+
                    _ => Err(UnknownName(s.to_string())),
                }
            }
        }
    };
}

ops! {
    G2d => "g2d",
    G3d => "g3d",
    Point => "point",
    Line => "line",
    Vec => "vec",
    Circle => "circle",
    Arc => "arc",
    Polygon => "polygon",
    Plot => "plot",
    Angle => "angle",
    Point3d => "point3d",
    Line3d => "line3d",
    Plane3d => "plane3d",
    Intersect => "intersect",
    Project => "project",
    Reflect => "reflect",
    Rotate => "rotate",
    Scale => "scale",
    Translate => "translate",
    Distance => "distance",
    Mag => "mag",
    Dot => "dot",
    Cross => "cross",
    Uv => "uv",
    Mid => "mid",
    PointAtRatio => "pointatratio",
    PointOnCircle => "pointoncircle",
    PolarPoint => "polarpoint",
    Tangent => "tangent",
    Item => "item",
    Distance3d => "distance3d",
    Angle3d => "angle3d",
    Perp => "perp",
    Para => "para",
}

impl Op {
    /// The kind of graph an optional leading graph argument must be.
    ///
    /// `None` means the operation takes no graph argument at all (the graph
    /// constructors themselves); measuring operations that work in both
    /// dimensions accept either.
    pub fn graph_dimension(self) -> Option<&'static [Dimension]> {
        const TWO: &[Dimension] = &[Dimension::Two];
        const THREE: &[Dimension] = &[Dimension::Three];
        const EITHER: &[Dimension] = &[Dimension::Two, Dimension::Three];

        match self {
            Self::G2d | Self::G3d => None,
            Self::Point3d | Self::Line3d | Self::Plane3d | Self::Distance3d | Self::Angle3d => {
                Some(THREE)
            }
            Self::Dot | Self::Cross | Self::Uv | Self::Item => Some(EITHER),
            _ => Some(TWO),
        }
    }

    /// Returns `true` for the transforms that support batch mode.
    pub fn is_transform(self) -> bool {
        matches!(
            self,
            Self::Reflect | Self::Rotate | Self::Scale | Self::Translate
        )
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
            Self::Pow => '^',
        }
    }
}

/// A style-override argument name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleKey {
    /// `c`
    Color,
    /// `f`
    FontSize,
    /// `s`
    StrokeWidth,
    /// `fc`
    FillColor,
    /// `so`
    StrokeOpacity,
    /// `fo`
    FillOpacity,
}

impl StyleKey {
    pub fn name(self) -> &'static str {
        match self {
            Self::Color => "c",
            Self::FontSize => "f",
            Self::StrokeWidth => "s",
            Self::FillColor => "fc",
            Self::StrokeOpacity => "so",
            Self::FillOpacity => "fo",
        }
    }
}

impl FromStr for StyleKey {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "c" => Ok(Self::Color),
            "f" => Ok(Self::FontSize),
            "s" => Ok(Self::StrokeWidth),
            "fc" => Ok(Self::FillColor),
            "so" => Ok(Self::StrokeOpacity),
            "fo" => Ok(Self::FillOpacity),
            _ => Err(UnknownName(s.to_string())),
        }
    }
}

impl fmt::Display for StyleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A pre-compiled single-variable function, evaluated with the numeric
/// variables that were bound when its plot was resolved.
pub trait ScopedFunction: Send + Sync {
    fn eval(&self, x: f64, scope: &NumericScope) -> f64;
}

impl<F> ScopedFunction for F
where
    F: Fn(f64, &NumericScope) -> f64 + Send + Sync,
{
    fn eval(&self, x: f64, scope: &NumericScope) -> f64 {
        self(x, scope)
    }
}

/// A shared [`ScopedFunction`].
#[derive(Clone)]
pub struct FunctionHandle(Arc<dyn ScopedFunction>);

impl FunctionHandle {
    pub fn new(function: impl ScopedFunction + 'static) -> Self {
        Self(Arc::new(function))
    }

    pub fn eval(&self, x: f64, scope: &NumericScope) -> f64 {
        self.0.eval(x, scope)
    }
}

impl fmt::Debug for FunctionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FunctionHandle(..)")
    }
}

/// An unresolved expression node.
#[derive(Debug, Clone)]
pub struct Expr {
    id: NodeId,
    kind: ExprKind,
}

/// The payload of an [`Expr`].
#[derive(Debug, Clone)]
pub enum ExprKind {
    Number(f64),
    Text(String),
    /// A reference to a variable bound in the expression context.
    Variable(Id),
    /// A style override such as `c("red")`; only valid as a call argument.
    Style {
        key: StyleKey,
        value: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Call {
        op: Op,
        args: Vec<Expr>,
    },
    Function(FunctionHandle),
}

impl Expr {
    pub fn new(id: NodeId, kind: ExprKind) -> Self {
        Self { id, kind }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> &ExprKind {
        &self.kind
    }

    pub fn into_kind(self) -> ExprKind {
        self.kind
    }

    /// The style key when this node is a style override.
    pub fn style_key(&self) -> Option<StyleKey> {
        match &self.kind {
            ExprKind::Style { key, .. } => Some(*key),
            _ => None,
        }
    }
}

/// Builds expression trees with sequential node ids.
///
/// # Examples
///
/// ```
/// use compass::ast::{AstBuilder, Op};
///
/// let mut ast = AstBuilder::new();
/// let x = ast.number(3.0);
/// let y = ast.number(4.0);
/// let p = ast.call(Op::Point, vec![x, y]);
/// assert_eq!(p.id().to_string(), "2");
/// ```
#[derive(Debug, Default)]
pub struct AstBuilder {
    next: u32,
}

impl AstBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn node(&mut self, kind: ExprKind) -> Expr {
        let id = NodeId(self.next);
        self.next += 1;
        Expr::new(id, kind)
    }

    pub fn number(&mut self, value: f64) -> Expr {
        self.node(ExprKind::Number(value))
    }

    pub fn text(&mut self, value: impl Into<String>) -> Expr {
        self.node(ExprKind::Text(value.into()))
    }

    pub fn var(&mut self, name: &str) -> Expr {
        self.node(ExprKind::Variable(Id::new(name)))
    }

    pub fn style(&mut self, key: StyleKey, value: Expr) -> Expr {
        self.node(ExprKind::Style {
            key,
            value: Box::new(value),
        })
    }

    pub fn binary(&mut self, op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
        self.node(ExprKind::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        })
    }

    pub fn call(&mut self, op: Op, args: Vec<Expr>) -> Expr {
        self.node(ExprKind::Call { op, args })
    }

    pub fn function(&mut self, function: impl ScopedFunction + 'static) -> Expr {
        self.node(ExprKind::Function(FunctionHandle::new(function)))
    }

    /// Shorthand for a call whose arguments are all numbers.
    pub fn call_numbers(&mut self, op: Op, values: &[f64]) -> Expr {
        let args = values.iter().map(|&v| self.number(v)).collect();
        self.call(op, args)
    }
}
