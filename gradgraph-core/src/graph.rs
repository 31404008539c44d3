// gradgraph-core/src/graph.rs

use crate::autograd::{BackwardOp, Gradients};
use crate::error::GradGraphError;
use crate::node::{Node, NodeId};
use crate::ops::{OpKind, Operand, Operation};

/// Name given to leaves created from literal operands.
pub const LITERAL_NAME: &str = "input";

/// Arena owning every node of a computation graph.
///
/// The graph only grows: leaves are created with [`Graph::leaf`], derived nodes with
/// [`Graph::apply`] or one of its shorthands. A node's parents always have smaller
/// ids than the node, which keeps the parent/child relation acyclic by construction.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    // Bumped by every truncate that removes nodes; ids handed out before a bump
    // may now name different nodes.
    generation: u64,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of truncations that actually removed nodes.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Creates a named leaf node. Always succeeds.
    pub fn leaf(&mut self, value: f64, name: &str) -> NodeId {
        self.push(Node::leaf(value, Some(name.to_string())))
    }

    /// Creates a leaf node without a diagnostic name.
    pub fn unnamed_leaf(&mut self, value: f64) -> NodeId {
        self.push(Node::leaf(value, None))
    }

    /// Builds a derived node.
    ///
    /// Literal operands are coerced into fresh leaves, the operation snapshots the
    /// current operand values, the forward value is evaluated eagerly, and the new
    /// node is registered as a child of every operand.
    ///
    /// Nothing is added to the graph when the call fails.
    pub fn apply<I>(&mut self, kind: OpKind, operands: I) -> Result<NodeId, GradGraphError>
    where
        I: IntoIterator,
        I::Item: Into<Operand>,
    {
        let operands: Vec<Operand> = operands.into_iter().map(Into::into).collect();
        if operands.is_empty() {
            return Err(GradGraphError::topology(format!(
                "{:?} was applied to no operands",
                kind
            )));
        }

        let mut values = Vec::with_capacity(operands.len());
        for operand in &operands {
            match operand {
                Operand::Node(id) => values.push(self.check(*id)?.value),
                Operand::Literal(value) => values.push(*value),
            }
        }
        let operation = Operation::capture(kind, &values)?;
        let value = operation.evaluate();

        let parents: Vec<NodeId> = operands
            .into_iter()
            .map(|operand| match operand {
                Operand::Node(id) => id,
                Operand::Literal(value) => self.leaf(value, LITERAL_NAME),
            })
            .collect();

        let id = self.push(Node::derived(value, parents.clone(), operation));
        for parent in parents {
            self.link(parent, id)?;
        }
        log::trace!("created {} = {} ({:?})", id, value, kind);
        Ok(id)
    }

    pub fn add(
        &mut self,
        a: impl Into<Operand>,
        b: impl Into<Operand>,
    ) -> Result<NodeId, GradGraphError> {
        self.apply(OpKind::Sum, [a.into(), b.into()])
    }

    pub fn mul(
        &mut self,
        a: impl Into<Operand>,
        b: impl Into<Operand>,
    ) -> Result<NodeId, GradGraphError> {
        self.apply(OpKind::Product, [a.into(), b.into()])
    }

    pub fn pow(
        &mut self,
        base: impl Into<Operand>,
        exponent: f64,
    ) -> Result<NodeId, GradGraphError> {
        self.apply(OpKind::Power { exponent }, [base.into()])
    }

    pub fn relu(&mut self, x: impl Into<Operand>) -> Result<NodeId, GradGraphError> {
        self.apply(OpKind::Relu, [x.into()])
    }

    /// Row-by-column product `sum(row[i] * col[i])`.
    pub fn matmul<R, C>(&mut self, row: R, col: C) -> Result<NodeId, GradGraphError>
    where
        R: IntoIterator,
        R::Item: Into<Operand>,
        C: IntoIterator,
        C::Item: Into<Operand>,
    {
        let mut operands: Vec<Operand> = row.into_iter().map(Into::into).collect();
        let row_len = operands.len();
        operands.extend(col.into_iter().map(Into::into));
        let col_len = operands.len() - row_len;
        if row_len != col_len {
            return Err(GradGraphError::topology(format!(
                "Matmul row has {} entries but column has {}",
                row_len, col_len
            )));
        }
        self.apply(OpKind::MatMul, operands)
    }

    pub fn node(&self, id: NodeId) -> Result<&Node, GradGraphError> {
        self.check(id)
    }

    pub fn value(&self, id: NodeId) -> Result<f64, GradGraphError> {
        Ok(self.check(id)?.value)
    }

    pub fn name(&self, id: NodeId) -> Result<Option<&str>, GradGraphError> {
        Ok(self.check(id)?.name())
    }

    pub fn is_leaf(&self, id: NodeId) -> Result<bool, GradGraphError> {
        Ok(self.check(id)?.is_leaf())
    }

    pub fn parents(&self, id: NodeId) -> Result<&[NodeId], GradGraphError> {
        Ok(&self.check(id)?.parents)
    }

    pub fn children(&self, id: NodeId) -> Result<&[NodeId], GradGraphError> {
        Ok(&self.check(id)?.children)
    }

    pub fn accumulated_grad(&self, id: NodeId) -> Result<Option<f64>, GradGraphError> {
        Ok(self.check(id)?.accumulated_grad)
    }

    /// Ids of all leaf nodes, in creation order.
    pub fn leaves(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.is_leaf())
            .map(|(index, _)| NodeId(index))
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId(index), node))
    }

    /// Overwrites the value of a leaf. Derived values are fixed at construction,
    /// so the graph above a changed leaf must be rebuilt to observe the new value.
    pub fn set_leaf_value(&mut self, id: NodeId, value: f64) -> Result<(), GradGraphError> {
        let node = self.check_leaf_mut(id, "set_leaf_value")?;
        node.value = value;
        Ok(())
    }

    pub fn set_accumulated_grad(
        &mut self,
        id: NodeId,
        grad: Option<f64>,
    ) -> Result<(), GradGraphError> {
        let node = self.check_leaf_mut(id, "set_accumulated_grad")?;
        node.accumulated_grad = grad;
        Ok(())
    }

    /// Drops every node with an id `>= len`, together with the child links that
    /// pointed at them. Leaves created before `len` keep their values and gradients.
    /// Removing nodes bumps [`Graph::generation`].
    pub fn truncate(&mut self, len: usize) {
        if len >= self.nodes.len() {
            return;
        }
        log::debug!("truncating graph from {} to {} nodes", self.nodes.len(), len);
        self.nodes.truncate(len);
        self.generation += 1;
        for node in &mut self.nodes {
            node.children.retain(|child| child.0 < len);
        }
    }

    // Leaves the pass did not reach are cleared.
    pub(crate) fn commit_gradients(&mut self, gradients: &Gradients) {
        for (index, node) in self.nodes.iter_mut().enumerate() {
            if node.is_leaf() {
                node.accumulated_grad = gradients.accumulated_grad(NodeId(index));
            }
        }
    }

    /// Records `child` as a consumer of `parent`. Linking the same pair twice is a no-op.
    pub(crate) fn link(&mut self, parent: NodeId, child: NodeId) -> Result<(), GradGraphError> {
        self.check(parent)?;
        self.check(child)?;
        if parent >= child {
            return Err(GradGraphError::topology(format!(
                "linking {} as a parent of {} would create a cycle",
                parent, child
            )));
        }
        let child_node = &mut self.nodes[child.0];
        if !child_node.parents.contains(&parent) {
            child_node.parents.push(parent);
        }
        let parent_node = &mut self.nodes[parent.0];
        if !parent_node.children.contains(&child) {
            parent_node.children.push(child);
        }
        Ok(())
    }

    /// Re-snapshots the operation of an existing derived node from the current values
    /// of its parents. Links are left untouched.
    pub(crate) fn recapture(&mut self, id: NodeId, kind: OpKind) -> Result<(), GradGraphError> {
        let node = self.check(id)?;
        if node.is_leaf() {
            return Err(GradGraphError::topology(format!(
                "cannot attach an operation to leaf {}",
                id
            )));
        }
        let values: Vec<f64> = node
            .parents
            .iter()
            .map(|parent| self.nodes[parent.0].value)
            .collect();
        let operation = Operation::capture(kind, &values)?;
        let node = &mut self.nodes[id.0];
        node.value = operation.evaluate();
        node.operation = Some(operation);
        Ok(())
    }

    pub(crate) fn check(&self, id: NodeId) -> Result<&Node, GradGraphError> {
        self.nodes.get(id.0).ok_or_else(|| {
            GradGraphError::topology(format!(
                "node {} does not exist in a graph of {} nodes",
                id,
                self.nodes.len()
            ))
        })
    }

    fn check_leaf_mut(&mut self, id: NodeId, context: &str) -> Result<&mut Node, GradGraphError> {
        if !self.check(id)?.is_leaf() {
            return Err(GradGraphError::NotALeaf {
                node: id,
                context: context.to_string(),
            });
        }
        Ok(&mut self.nodes[id.0])
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }
}
