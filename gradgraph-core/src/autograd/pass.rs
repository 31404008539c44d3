// gradgraph-core/src/autograd/pass.rs

use crate::autograd::{BackwardOp, BackwardOptions, PathMode};
use crate::error::GradGraphError;
use crate::graph::Graph;
use crate::node::NodeId;
use std::collections::{HashMap, HashSet};

/// Traversal marker of a node during path accumulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisitState {
    #[default]
    Unvisited,
    /// On the traversal stack, with parents still to explore.
    InProgress,
    /// All parents explored.
    Done,
}

/// Result of a backward call.
///
/// Holds the local gradient recorded for every ancestor of the root and the
/// accumulated gradient of every reached leaf. The accumulated values are also
/// written to the leaves of the graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradients {
    root: NodeId,
    local: HashMap<NodeId, f64>,
    accumulated: HashMap<NodeId, f64>,
}

impl Gradients {
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Derivative of the consumer of `id` with respect to `id`. For the root this is `1.0`.
    pub fn local_grad(&self, id: NodeId) -> Option<f64> {
        self.local.get(&id).copied()
    }

    /// Derivative of the root with respect to the leaf `id`.
    pub fn accumulated_grad(&self, id: NodeId) -> Option<f64> {
        self.accumulated.get(&id).copied()
    }

    /// Reached leaves and their accumulated gradients, in id order.
    pub fn leaves(&self) -> Vec<(NodeId, f64)> {
        let mut leaves: Vec<(NodeId, f64)> =
            self.accumulated.iter().map(|(id, grad)| (*id, *grad)).collect();
        leaves.sort_by_key(|(id, _)| *id);
        leaves
    }
}

/// State of one backward invocation.
///
/// The pass borrows the graph immutably; nothing in the graph changes until the
/// caller commits the returned [`Gradients`]. Dropping the pass discards every
/// local gradient, visit marker and the traversal stack, whichever way the call ends.
#[derive(Debug)]
pub struct BackwardPass<'g> {
    graph: &'g Graph,
    root: NodeId,
    options: BackwardOptions,
    local_grads: HashMap<NodeId, f64>,
    // (consumer, operand position) -> d consumer / d operand
    edge_grads: HashMap<(NodeId, usize), f64>,
    states: HashMap<NodeId, VisitState>,
    stack: Vec<NodeId>,
    accumulated: HashMap<NodeId, f64>,
    propagated: bool,
}

impl<'g> BackwardPass<'g> {
    /// Prepares a pass rooted at `root`, after validating the topology of its ancestry.
    pub fn new(
        graph: &'g Graph,
        root: NodeId,
        options: BackwardOptions,
    ) -> Result<Self, GradGraphError> {
        validate_ancestry(graph, root)?;
        Ok(BackwardPass {
            graph,
            root,
            options,
            local_grads: HashMap::new(),
            edge_grads: HashMap::new(),
            states: HashMap::new(),
            stack: Vec::new(),
            accumulated: HashMap::new(),
            propagated: false,
        })
    }

    /// Runs both phases and hands back the gradients.
    pub fn run(mut self) -> Result<Gradients, GradGraphError> {
        self.propagate_local()?;
        self.traverse()?;
        Ok(Gradients {
            root: self.root,
            local: self.local_grads,
            accumulated: self.accumulated,
        })
    }

    /// Phase 1: records, for every ancestor of the root, the derivative of its
    /// consumer with respect to it. The root is seeded with `1.0`.
    pub fn propagate_local(&mut self) -> Result<(), GradGraphError> {
        self.local_grads.clear();
        self.edge_grads.clear();
        match self.options.path_mode {
            PathMode::LastVisit => self.propagate_from(self.root)?,
            PathMode::Summed => self.propagate_edges(self.root)?,
        }
        self.local_grads.insert(self.root, 1.0);
        self.propagated = true;
        Ok(())
    }

    // Visits a node once per incoming path; the last consumer wins. Parents are pushed
    // in reverse so they pop in parent-list order (pre-order).
    fn propagate_from(&mut self, root: NodeId) -> Result<(), GradGraphError> {
        let graph = self.graph;
        let mut pending = vec![root];
        while let Some(id) = pending.pop() {
            let node = graph.check(id)?;
            let Some(operation) = node.operation() else {
                continue;
            };
            let gradients = checked_gradients(id, operation, node.parents())?;
            for (parent, gradient) in node.parents().iter().zip(gradients) {
                self.local_grads.insert(*parent, gradient);
            }
            pending.extend(node.parents().iter().rev());
        }
        Ok(())
    }

    // Expands every derived node once, keeping one gradient per edge.
    fn propagate_edges(&mut self, root: NodeId) -> Result<(), GradGraphError> {
        let graph = self.graph;
        let mut expanded = HashSet::new();
        let mut pending = vec![root];
        while let Some(id) = pending.pop() {
            let node = graph.check(id)?;
            let Some(operation) = node.operation() else {
                continue;
            };
            if !expanded.insert(id) {
                continue;
            }
            let gradients = checked_gradients(id, operation, node.parents())?;
            for (position, (parent, gradient)) in
                node.parents().iter().zip(gradients).enumerate()
            {
                *self.local_grads.entry(*parent).or_insert(0.0) += gradient;
                self.edge_grads.insert((id, position), gradient);
            }
            pending.extend(node.parents().iter().rev());
        }
        Ok(())
    }

    /// Phase 2: writes an accumulated gradient for every leaf reachable from the root.
    /// Visit markers and the stack are reset before returning, on success or failure.
    pub fn traverse(&mut self) -> Result<(), GradGraphError> {
        if !self.propagated {
            return Err(GradGraphError::stale(
                "path accumulation started before local gradients were propagated",
            ));
        }
        self.accumulated.clear();
        let result = match self.options.path_mode {
            PathMode::LastVisit => self.walk_paths(),
            PathMode::Summed => self.sum_paths(),
        };
        self.reset();
        result
    }

    fn walk_paths(&mut self) -> Result<(), GradGraphError> {
        let graph = self.graph;
        if graph.check(self.root)?.is_leaf() {
            self.set_state(self.root, VisitState::Done);
            self.accumulate_leaf(self.root)?;
            return Ok(());
        }

        self.set_state(self.root, VisitState::InProgress);
        self.stack.push(self.root);

        while let Some(&current) = self.stack.last() {
            let parents = graph.check(current)?.parents();
            if let Some(parent) = parents
                .iter()
                .find(|parent| self.state(**parent) == VisitState::InProgress)
            {
                return Err(GradGraphError::stale(format!(
                    "{} is already on the traversal stack when reached from {}",
                    parent, current
                )));
            }
            let next = parents
                .iter()
                .copied()
                .find(|parent| self.state(*parent) == VisitState::Unvisited);

            match next {
                None => {
                    self.set_state(current, VisitState::Done);
                    self.stack.pop();
                }
                Some(next) => {
                    if graph.check(next)?.is_leaf() {
                        self.set_state(next, VisitState::Done);
                        self.accumulate_leaf(next)?;
                    } else {
                        self.set_state(next, VisitState::InProgress);
                        self.stack.push(next);
                    }
                }
            }
        }
        Ok(())
    }

    // Node ids are a topological order (parents before children), so a sweep from the
    // root down to id 0 sees every consumer before its operands.
    fn sum_paths(&mut self) -> Result<(), GradGraphError> {
        let graph = self.graph;
        let mut reachable = Vec::new();
        self.stack.push(self.root);
        while let Some(current) = self.stack.pop() {
            if self.state(current) != VisitState::Unvisited {
                continue;
            }
            self.set_state(current, VisitState::Done);
            reachable.push(current);
            for parent in graph.check(current)?.parents() {
                if self.state(*parent) == VisitState::Unvisited {
                    self.stack.push(*parent);
                }
            }
        }
        reachable.sort_unstable_by(|a, b| b.cmp(a));

        let mut adjoints: HashMap<NodeId, f64> = HashMap::new();
        adjoints.insert(self.root, 1.0);
        for id in reachable {
            let adjoint = adjoints.get(&id).copied().unwrap_or(0.0);
            let node = graph.check(id)?;
            if node.is_leaf() {
                log::trace!("accumulated gradient of {} is {}", id, adjoint);
                self.accumulated.insert(id, adjoint);
                continue;
            }
            for (position, parent) in node.parents().iter().enumerate() {
                let edge = self.edge_grads.get(&(id, position)).copied().ok_or_else(|| {
                    GradGraphError::stale(format!(
                        "no local gradient recorded for operand {} of {}",
                        position, id
                    ))
                })?;
                *adjoints.entry(*parent).or_insert(0.0) += adjoint * edge;
            }
        }
        Ok(())
    }

    /// Sets the accumulated gradient of `leaf` to the product of the local gradients
    /// of every node on the traversal stack, `leaf` included.
    ///
    /// Fails with [`GradGraphError::NotALeaf`] on a derived node; a derived node
    /// reaching this point means the traversal itself is broken.
    pub fn accumulate_leaf(&mut self, leaf: NodeId) -> Result<f64, GradGraphError> {
        if !self.graph.check(leaf)?.is_leaf() {
            return Err(GradGraphError::NotALeaf {
                node: leaf,
                context: "path accumulation".to_string(),
            });
        }
        self.stack.push(leaf);
        let product = self.stack_product();
        self.stack.pop();
        let gradient = product?;

        if log::log_enabled!(log::Level::Trace) {
            let path: Vec<String> = self
                .stack
                .iter()
                .chain(std::iter::once(&leaf))
                .map(|id| match self.graph.check(*id).ok().and_then(|node| node.name()) {
                    Some(name) => format!("{}({})", name, id),
                    None => id.to_string(),
                })
                .collect();
            log::trace!("path {} -> accumulated gradient {}", path.join(" <- "), gradient);
        }
        self.accumulated.insert(leaf, gradient);
        Ok(gradient)
    }

    fn stack_product(&self) -> Result<f64, GradGraphError> {
        self.stack.iter().try_fold(1.0, |product, id| {
            self.local_grads
                .get(id)
                .map(|local| product * local)
                .ok_or_else(|| {
                    GradGraphError::stale(format!("no local gradient recorded for {}", id))
                })
        })
    }

    /// Visit marker of `id`; nodes never touched are `Unvisited`.
    pub fn state(&self, id: NodeId) -> VisitState {
        self.states.get(&id).copied().unwrap_or_default()
    }

    pub fn local_grad(&self, id: NodeId) -> Option<f64> {
        self.local_grads.get(&id).copied()
    }

    pub fn accumulated_grad(&self, id: NodeId) -> Option<f64> {
        self.accumulated.get(&id).copied()
    }

    fn set_state(&mut self, id: NodeId, state: VisitState) {
        self.states.insert(id, state);
    }

    fn reset(&mut self) {
        self.states.clear();
        self.stack.clear();
    }
}

fn checked_gradients(
    id: NodeId,
    operation: &dyn BackwardOp,
    parents: &[NodeId],
) -> Result<Vec<f64>, GradGraphError> {
    let gradients = operation.local_gradients();
    if gradients.len() != parents.len() {
        return Err(GradGraphError::topology(format!(
            "{} ({}) returned {} local gradients for {} parents",
            id,
            operation.name(),
            gradients.len(),
            parents.len()
        )));
    }
    Ok(gradients)
}

// Checks every node reachable from `root` before any gradient is computed.
fn validate_ancestry(graph: &Graph, root: NodeId) -> Result<(), GradGraphError> {
    let mut seen = HashSet::new();
    let mut pending = vec![root];
    while let Some(id) = pending.pop() {
        if !seen.insert(id) {
            continue;
        }
        let node = graph.check(id)?;
        match node.operation() {
            None if !node.parents().is_empty() => {
                return Err(GradGraphError::topology(format!(
                    "leaf {} has {} parents",
                    id,
                    node.parents().len()
                )));
            }
            None => {}
            Some(operation) => {
                if operation.arity() != node.parents().len() {
                    return Err(GradGraphError::topology(format!(
                        "{} ({}) expects {} operands but has {} parents",
                        id,
                        operation.name(),
                        operation.arity(),
                        node.parents().len()
                    )));
                }
            }
        }
        for parent in node.parents() {
            graph.check(*parent)?;
            if *parent >= id {
                return Err(GradGraphError::topology(format!(
                    "{} lists {} as a parent, which would close a cycle",
                    id, parent
                )));
            }
            pending.push(*parent);
        }
    }
    Ok(())
}

impl Graph {
    /// Propagates gradients from `root` with the default [`BackwardOptions`].
    pub fn backward(&mut self, root: NodeId) -> Result<Gradients, GradGraphError> {
        self.backward_with(root, BackwardOptions::default())
    }

    /// Propagates gradients from `root` and stores the accumulated gradient on every
    /// leaf of the graph. Leaves the root does not reach are cleared to `None`.
    ///
    /// On error no leaf is modified.
    pub fn backward_with(
        &mut self,
        root: NodeId,
        options: BackwardOptions,
    ) -> Result<Gradients, GradGraphError> {
        log::debug!("backward from {} ({:?})", root, options.path_mode);
        let gradients = BackwardPass::new(self, root, options)?.run()?;
        self.commit_gradients(&gradients);
        log::debug!(
            "backward from {} reached {} leaves",
            root,
            gradients.accumulated.len()
        );
        Ok(gradients)
    }
}
