#[cfg(test)]
mod tests {
    use crate::autograd::grad_check::check_grad;
    use crate::autograd::{BackwardOp, BackwardOptions};
    use crate::error::GradGraphError;
    use crate::graph::Graph;
    use crate::ops::arithmetic::AddOp;
    use crate::ops::{OpKind, Operation};

    #[test]
    fn test_add_forward() -> Result<(), GradGraphError> {
        let mut graph = Graph::new();
        let a = graph.leaf(1.5, "a");
        let b = graph.leaf(-4.0, "b");
        let c = graph.add(a, b)?;
        assert_eq!(graph.value(c)?, -2.5);
        assert_eq!(graph.name(c)?, Some("Add"));
        assert_eq!(graph.parents(c)?, &[a, b]);
        Ok(())
    }

    #[test]
    fn test_add_local_gradients() -> Result<(), GradGraphError> {
        let op = AddOp::capture(&[3.0, 7.0])?;
        assert_eq!(op.evaluate(), 10.0);
        assert_eq!(op.local_gradients(), vec![1.0, 1.0]);
        assert_eq!(op.arity(), 2);
        Ok(())
    }

    #[test]
    fn test_add_wrong_arity() {
        let result = Operation::capture(OpKind::Sum, &[1.0]);
        assert!(matches!(result, Err(GradGraphError::InvalidTopology { .. })));
        let result = Operation::capture(OpKind::Sum, &[1.0, 2.0, 3.0]);
        assert!(matches!(result, Err(GradGraphError::InvalidTopology { .. })));
    }

    #[test]
    fn test_add_backward_grad_check() {
        let func = |graph: &mut Graph, x: &[crate::NodeId]| graph.add(x[0], x[1]);
        let result = check_grad(func, &[0.25, -3.0], BackwardOptions::summed(), 1e-6, 1e-6, 1e-5);
        assert!(result.is_ok(), "Add grad check failed: {:?}", result.err());
    }
}
