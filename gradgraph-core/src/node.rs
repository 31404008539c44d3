// gradgraph-core/src/node.rs

use crate::autograd::BackwardOp;
use crate::ops::Operation;
use std::fmt;

/// Stable index of a node inside a [`Graph`](crate::graph::Graph) arena.
///
/// Ids are handed out in creation order, so every parent of a node has a strictly
/// smaller id than the node itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A vertex of the computation graph.
///
/// Leaf nodes carry a literal value and no operation. Derived nodes carry the
/// [`Operation`] that produced their value together with the ids of its operands.
/// Gradients of the in-flight backward pass are not stored here; only the
/// end-to-end `accumulated_grad` of a leaf survives a pass.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) value: f64,
    pub(crate) name: Option<String>,
    pub(crate) parents: Vec<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) operation: Option<Operation>,
    pub(crate) accumulated_grad: Option<f64>,
}

impl Node {
    pub(crate) fn leaf(value: f64, name: Option<String>) -> Self {
        Node {
            value,
            name,
            parents: Vec::new(),
            children: Vec::new(),
            operation: None,
            accumulated_grad: None,
        }
    }

    pub(crate) fn derived(value: f64, parents: Vec<NodeId>, operation: Operation) -> Self {
        Node {
            value,
            name: Some(operation.name().to_string()),
            parents,
            children: Vec::new(),
            operation: Some(operation),
            accumulated_grad: None,
        }
    }

    /// Forward value, fixed at construction.
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// A node is a leaf iff it was not produced by an operation.
    pub fn is_leaf(&self) -> bool {
        self.operation.is_none()
    }

    pub fn parents(&self) -> &[NodeId] {
        &self.parents
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn operation(&self) -> Option<&Operation> {
        self.operation.as_ref()
    }

    /// Derivative of the last traversal root with respect to this leaf.
    pub fn accumulated_grad(&self) -> Option<f64> {
        self.accumulated_grad
    }
}
