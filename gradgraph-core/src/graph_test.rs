#[cfg(test)]
mod tests {
    use crate::error::GradGraphError;
    use crate::graph::{Graph, LITERAL_NAME};
    use crate::node::NodeId;
    use crate::ops::{OpKind, Operand};
    use approx::assert_relative_eq;

    #[test]
    fn test_leaf_creation() {
        let mut graph = Graph::new();
        assert!(graph.is_empty());
        let x = graph.leaf(-2.0, "X");
        let anon = graph.unnamed_leaf(1.0);
        assert_eq!(graph.len(), 2);

        let node = graph.node(x).unwrap();
        assert!(node.is_leaf());
        assert_eq!(node.value(), -2.0);
        assert_eq!(node.name(), Some("X"));
        assert!(node.parents().is_empty());
        assert!(node.operation().is_none());
        assert_eq!(node.accumulated_grad(), None);
        assert_eq!(graph.name(anon).unwrap(), None);
    }

    #[test]
    fn test_apply_links_children() -> Result<(), GradGraphError> {
        let mut graph = Graph::new();
        let x = graph.leaf(1.0, "x");
        let y = graph.leaf(2.0, "y");
        let a = graph.add(x, y)?;
        let b = graph.mul(x, a)?;

        assert_eq!(graph.children(x)?, &[a, b]);
        assert_eq!(graph.children(y)?, &[a]);
        assert_eq!(graph.children(a)?, &[b]);
        assert!(graph.children(b)?.is_empty());
        assert_eq!(graph.parents(b)?, &[x, a]);
        assert!(!graph.is_leaf(b)?);
        assert!(graph.node(b)?.operation().is_some());
        Ok(())
    }

    #[test]
    fn test_closed_form_forward_values() -> Result<(), GradGraphError> {
        // relu(x * y + z^2) - with x = 1.5, y = -2, z = 3 -> relu(-3 + 9) = 6
        let mut graph = Graph::new();
        let x = graph.leaf(1.5, "x");
        let y = graph.leaf(-2.0, "y");
        let z = graph.leaf(3.0, "z");
        let xy = graph.mul(x, y)?;
        let z2 = graph.pow(z, 2.0)?;
        let s = graph.add(xy, z2)?;
        let out = graph.relu(s)?;
        assert_relative_eq!(graph.value(out)?, 6.0);

        let negative = graph.mul(s, -1.0)?;
        let clipped = graph.relu(negative)?;
        assert_eq!(graph.value(clipped)?, 0.0);
        Ok(())
    }

    #[test]
    fn test_literal_operands_become_leaves() -> Result<(), GradGraphError> {
        let mut graph = Graph::new();
        let out = graph.apply(OpKind::Product, [Operand::Literal(4.0), Operand::Literal(0.5)])?;
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.value(out)?, 2.0);
        for parent in graph.parents(out)? {
            assert!(graph.is_leaf(*parent)?);
            assert_eq!(graph.name(*parent)?, Some(LITERAL_NAME));
        }
        assert_eq!(graph.leaves().count(), 2);
        Ok(())
    }

    #[test]
    fn test_unknown_operand_is_rejected_without_side_effects() {
        let mut graph = Graph::new();
        graph.leaf(1.0, "x");
        let result = graph.add(5.0, NodeId(42));
        assert!(matches!(result, Err(GradGraphError::InvalidTopology { .. })));
        assert_eq!(graph.len(), 1);
        assert!(graph.value(NodeId(42)).is_err());
    }

    #[test]
    fn test_apply_without_operands() {
        let mut graph = Graph::new();
        let result = graph.apply(OpKind::Sum, Vec::<Operand>::new());
        assert!(matches!(result, Err(GradGraphError::InvalidTopology { .. })));
    }

    #[test]
    fn test_link_is_idempotent_and_acyclic() -> Result<(), GradGraphError> {
        let mut graph = Graph::new();
        let x = graph.leaf(1.0, "x");
        let y = graph.relu(x)?;
        graph.link(x, y)?;
        graph.link(x, y)?;
        assert_eq!(graph.children(x)?, &[y]);
        assert_eq!(graph.parents(y)?, &[x]);

        let result = graph.link(y, x);
        assert!(matches!(result, Err(GradGraphError::InvalidTopology { .. })));
        let result = graph.link(x, x);
        assert!(matches!(result, Err(GradGraphError::InvalidTopology { .. })));
        Ok(())
    }

    #[test]
    fn test_set_leaf_value_rejects_derived_nodes() -> Result<(), GradGraphError> {
        let mut graph = Graph::new();
        let x = graph.leaf(1.0, "x");
        let y = graph.pow(x, 2.0)?;
        graph.set_leaf_value(x, 3.0)?;
        assert_eq!(graph.value(x)?, 3.0);
        // The derived value is a snapshot and is not recomputed.
        assert_eq!(graph.value(y)?, 1.0);

        let result = graph.set_leaf_value(y, 0.0);
        assert!(matches!(result, Err(GradGraphError::NotALeaf { node, .. }) if node == y));
        let result = graph.set_accumulated_grad(y, Some(1.0));
        assert!(matches!(result, Err(GradGraphError::NotALeaf { .. })));
        Ok(())
    }

    #[test]
    fn test_recapture_updates_value_not_links() -> Result<(), GradGraphError> {
        let mut graph = Graph::new();
        let x = graph.leaf(4.0, "x");
        let loss = graph.apply(OpKind::Difference { target: 1.0 }, [x])?;
        assert_eq!(graph.value(loss)?, 3.0);
        graph.recapture(loss, OpKind::Difference { target: 10.0 })?;
        assert_eq!(graph.value(loss)?, -6.0);
        assert_eq!(graph.children(x)?, &[loss]);
        assert_eq!(graph.parents(loss)?, &[x]);

        let result = graph.recapture(x, OpKind::Relu);
        assert!(matches!(result, Err(GradGraphError::InvalidTopology { .. })));
        Ok(())
    }

    #[test]
    fn test_truncate_drops_derived_nodes() -> Result<(), GradGraphError> {
        let mut graph = Graph::new();
        let w = graph.leaf(2.0, "w");
        let mark = graph.len();
        let a = graph.mul(w, 3.0)?;
        graph.relu(a)?;
        assert_eq!(graph.len(), 4);

        graph.truncate(mark);
        assert_eq!(graph.len(), 1);
        assert!(graph.children(w)?.is_empty());
        assert_eq!(graph.value(w)?, 2.0);
        assert_eq!(graph.generation(), 1);

        let again = graph.mul(w, 3.0)?;
        assert_eq!(graph.children(w)?, &[again]);
        // Truncating past the end is a no-op.
        graph.truncate(100);
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.generation(), 1);
        Ok(())
    }
}
