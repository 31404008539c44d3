#[cfg(test)]
mod tests {
    use crate::autograd::grad_check::check_grad;
    use crate::autograd::{BackwardOp, BackwardOptions};
    use crate::error::GradGraphError;
    use crate::graph::Graph;
    use crate::ops::arithmetic::MulOp;
    use crate::NodeId;
    use approx::assert_relative_eq;

    #[test]
    fn test_mul_forward() -> Result<(), GradGraphError> {
        let mut graph = Graph::new();
        let a = graph.leaf(3.0, "a");
        let b = graph.leaf(-4.0, "b");
        let c = graph.mul(a, b)?;
        assert_eq!(graph.value(c)?, -12.0);
        assert_eq!(graph.name(c)?, Some("Multiply"));
        Ok(())
    }

    #[test]
    fn test_mul_local_gradients_swap_operands() -> Result<(), GradGraphError> {
        let op = MulOp::capture(&[3.0, -4.0])?;
        assert_eq!(op.local_gradients(), vec![-4.0, 3.0]);
        Ok(())
    }

    #[test]
    fn test_mul_gradients_use_captured_values() -> Result<(), GradGraphError> {
        let mut graph = Graph::new();
        let a = graph.leaf(2.0, "a");
        let b = graph.leaf(5.0, "b");
        let c = graph.mul(a, b)?;
        // Changing a leaf after construction does not touch the snapshot.
        graph.set_leaf_value(a, 100.0)?;
        assert_eq!(graph.value(c)?, 10.0);
        graph.backward(c)?;
        assert_relative_eq!(graph.accumulated_grad(a)?.unwrap(), 5.0);
        assert_relative_eq!(graph.accumulated_grad(b)?.unwrap(), 2.0);
        Ok(())
    }

    #[test]
    fn test_mul_backward_grad_check() {
        let func = |graph: &mut Graph, x: &[NodeId]| graph.mul(x[0], x[1]);
        let result = check_grad(func, &[1.5, -2.0], BackwardOptions::summed(), 1e-6, 1e-6, 1e-5);
        assert!(result.is_ok(), "Multiply grad check failed: {:?}", result.err());
    }
}
