#[cfg(test)]
mod tests {
    use crate::error::GradGraphError;
    use crate::graph::Graph;
    use crate::node::NodeId;
    use crate::optim::{Direction, Optimizer, SgdConfig, SgdOptimizer};
    use crate::utils::testing::chain_rule_graph;
    use approx::assert_relative_eq;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_sgd_step_descends() -> Result<(), GradGraphError> {
        init_logger();
        let (mut graph, [x, y, z, q, f]) = chain_rule_graph();
        graph.backward(f)?;

        // q is not a leaf and is skipped with a warning.
        let mut optimizer = SgdOptimizer::new([x, y, z, q], SgdConfig::new(0.1)?);
        let updated = optimizer.step(&mut graph)?;
        assert_eq!(updated, 3);
        assert_relative_eq!(graph.value(x)?, -1.6, epsilon = 1e-12);
        assert_relative_eq!(graph.value(y)?, 5.4, epsilon = 1e-12);
        assert_relative_eq!(graph.value(z)?, -4.3, epsilon = 1e-12);
        assert_eq!(graph.value(q)?, 3.0);
        Ok(())
    }

    #[test]
    fn test_sgd_step_ascends() -> Result<(), GradGraphError> {
        let (mut graph, [x, _, z, _, f]) = chain_rule_graph();
        graph.backward(f)?;
        let config = SgdConfig::new(0.1)?.with_direction(Direction::Ascent);
        let mut optimizer = SgdOptimizer::new([x, z], config);
        optimizer.step(&mut graph)?;
        assert_relative_eq!(graph.value(x)?, -2.4, epsilon = 1e-12);
        assert_relative_eq!(graph.value(z)?, -3.7, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn test_sgd_skips_leaves_without_gradient() -> Result<(), GradGraphError> {
        let mut graph = Graph::new();
        let a = graph.leaf(1.0, "a");
        let unused = graph.leaf(5.0, "unused");
        let out = graph.mul(a, 2.0)?;
        graph.backward(out)?;

        let mut optimizer = SgdOptimizer::new([a, unused], SgdConfig::new(0.5)?);
        assert_eq!(optimizer.step(&mut graph)?, 1);
        assert_eq!(graph.value(a)?, 0.0);
        assert_eq!(graph.value(unused)?, 5.0);
        Ok(())
    }

    #[test]
    fn test_sgd_zero_grad() -> Result<(), GradGraphError> {
        init_logger();
        let (mut graph, [x, y, z, q, f]) = chain_rule_graph();
        graph.backward(f)?;
        let mut optimizer = SgdOptimizer::new([x, y, z, q], SgdConfig::default());
        optimizer.zero_grad(&mut graph)?;
        for leaf in [x, y, z] {
            assert_eq!(graph.accumulated_grad(leaf)?, Some(0.0));
        }
        // A zeroed step leaves values in place.
        assert_eq!(optimizer.step(&mut graph)?, 3);
        assert_eq!(graph.value(x)?, -2.0);
        assert_eq!(optimizer.params(), &[x, y, z, q]);
        Ok(())
    }

    #[test]
    fn test_sgd_unknown_param_updates_nothing() -> Result<(), GradGraphError> {
        let (mut graph, [x, y, _, _, f]) = chain_rule_graph();
        graph.backward(f)?;
        let missing = NodeId(99);
        let mut optimizer = SgdOptimizer::new([x, missing, y], SgdConfig::new(0.1)?);

        let result = optimizer.step(&mut graph);
        assert!(matches!(result, Err(GradGraphError::InvalidTopology { .. })));
        assert_eq!(graph.value(x)?, -2.0);
        assert_eq!(graph.value(y)?, 5.0);

        let result = optimizer.zero_grad(&mut graph);
        assert!(matches!(result, Err(GradGraphError::InvalidTopology { .. })));
        assert_eq!(graph.accumulated_grad(x)?, Some(-4.0));
        Ok(())
    }

    #[test]
    fn test_sgd_config_validation() {
        assert_eq!(SgdConfig::default().learning_rate(), 0.001);
        assert_eq!(SgdConfig::default().direction(), Direction::Descent);
        for lr in [0.0, -0.1, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                SgdConfig::new(lr),
                Err(GradGraphError::InvalidConfig { .. })
            ));
        }

        let (_, [x, ..]) = chain_rule_graph();
        let mut optimizer = SgdOptimizer::new([x], SgdConfig::default());
        assert!(optimizer.set_learning_rate(-1.0).is_err());
        assert_eq!(optimizer.config().learning_rate(), 0.001);
        optimizer.set_learning_rate(0.5).unwrap();
        assert_eq!(optimizer.config().learning_rate(), 0.5);
    }
}
