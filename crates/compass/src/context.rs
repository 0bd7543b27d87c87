//! The variable environment an expression tree is resolved against.

use std::{collections::BTreeMap, fmt};

use indexmap::IndexMap;
use log::trace;
use serde::Serialize;

use compass_core::identifier::Id;

use crate::value::{Resolved, Value};

/// Names of every bound scalar variable mapped to its value.
pub type NumericScope = BTreeMap<String, f64>;

/// An owned back-reference to a bound variable.
///
/// Handles stay valid for the lifetime of the context they came from;
/// rebinding a name keeps its handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ShapeHandle(usize);

impl ShapeHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ShapeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "&{}", self.0)
    }
}

/// A flat table of named, resolved values.
///
/// Written between resolution passes and only read during one.
#[derive(Debug, Clone, Default)]
pub struct ExpressionContext {
    bindings: IndexMap<Id, Resolved>,
}

impl ExpressionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `value` to `name`, replacing any previous binding in place.
    pub fn bind(&mut self, name: impl Into<Id>, value: Resolved) -> ShapeHandle {
        let name = name.into();
        let (index, previous) = self.bindings.insert_full(name, value);
        trace!(name = name.to_string(), index, rebound = previous.is_some(); "Bound variable");
        ShapeHandle(index)
    }

    pub fn lookup(&self, name: impl Into<Id>) -> Option<&Resolved> {
        self.bindings.get(&name.into())
    }

    /// The handle of a bound name.
    pub fn handle_of(&self, name: impl Into<Id>) -> Option<ShapeHandle> {
        self.bindings.get_index_of(&name.into()).map(ShapeHandle)
    }

    /// The name and value behind a handle.
    pub fn get(&self, handle: ShapeHandle) -> Option<(Id, &Resolved)> {
        self.bindings
            .get_index(handle.0)
            .map(|(name, value)| (*name, value))
    }

    /// Every bound scalar, keyed by variable name.
    pub fn snapshot_numeric_scope(&self) -> NumericScope {
        self.bindings
            .iter()
            .filter_map(|(name, resolved)| match resolved.value() {
                Value::Scalar(v) => Some((name.to_string(), *v)),
                _ => None,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Bindings in the order they were first made.
    pub fn iter(&self) -> impl Iterator<Item = (Id, &Resolved)> {
        self.bindings.iter().map(|(name, value)| (*name, value))
    }
}
