//! Error types for expression resolution.
//!
//! [`ExpressionError`] is the single error raised while resolving an
//! expression tree; [`CompassError`] wraps it together with configuration
//! loading failures for callers that do both.

use std::fmt;

use thiserror::Error;

use compass_core::error::GeometryError;

use crate::{
    ast::{NodeId, Op},
    config::ConfigError,
};

/// The category of a resolution failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Wrong number of geometric arguments.
    Arity,
    /// An operand of the wrong geometry type, or an unknown reference.
    Type,
    /// Mathematically undefined input (zero-length vectors, zero normals).
    Domain,
    /// A collection or intersection index out of range.
    Index,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Arity => "arity",
            Self::Type => "type",
            Self::Domain => "domain",
            Self::Index => "index",
        })
    }
}

/// A failure raised while resolving the node `node_id`.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind} error at node {node_id}: {message}")]
pub struct ExpressionError {
    node_id: NodeId,
    kind: ErrorKind,
    message: String,
}

impl ExpressionError {
    pub fn new(node_id: NodeId, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            node_id,
            kind,
            message: message.into(),
        }
    }

    pub fn arity(node_id: NodeId, message: impl Into<String>) -> Self {
        Self::new(node_id, ErrorKind::Arity, message)
    }

    pub fn type_mismatch(node_id: NodeId, message: impl Into<String>) -> Self {
        Self::new(node_id, ErrorKind::Type, message)
    }

    pub fn domain(node_id: NodeId, message: impl Into<String>) -> Self {
        Self::new(node_id, ErrorKind::Domain, message)
    }

    pub fn index(node_id: NodeId, message: impl Into<String>) -> Self {
        Self::new(node_id, ErrorKind::Index, message)
    }

    /// Wraps a geometry library failure raised by `op` as a domain error.
    pub fn from_geometry(node_id: NodeId, op: Op, err: GeometryError) -> Self {
        Self::domain(node_id, format!("{op}(): {err}"))
    }

    pub fn node_id(&self) -> NodeId {
        self.node_id
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Result alias used throughout the engine.
pub type Result<T, E = ExpressionError> = std::result::Result<T, E>;

/// The top-level error type for callers that load configuration and
/// resolve expressions.
#[derive(Debug, Error)]
pub enum CompassError {
    #[error(transparent)]
    Expression(#[from] ExpressionError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
