#[cfg(test)]
mod tests {
    use crate::error::GradGraphError;
    use crate::graph::Graph;
    use crate::nn::layers::Linear;
    use crate::nn::module::Module;
    use crate::ops::Operand;
    use crate::utils::testing::check_grads_near;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fixed_linear(graph: &mut Graph) -> Linear {
        let w0 = graph.leaf(0.5, "w0");
        let w1 = graph.leaf(-1.0, "w1");
        let b = graph.leaf(2.0, "b");
        Linear::from_parameters(vec![w0, w1], Some(b))
    }

    #[test]
    fn test_linear_forward_and_backward() -> Result<(), GradGraphError> {
        let mut graph = Graph::new();
        let linear = fixed_linear(&mut graph);
        let out = linear.forward(&mut graph, &[Operand::Literal(4.0), Operand::Literal(1.0)])?;
        // 0.5 * 4 - 1 * 1 + 2
        assert_eq!(graph.value(out)?, 3.0);

        graph.backward(out)?;
        let params = linear.parameters();
        check_grads_near(&graph, &[(params[0], 4.0), (params[1], 1.0), (params[2], 1.0)], 1e-12);
        Ok(())
    }

    #[test]
    fn test_linear_relu_clips_negative_output() -> Result<(), GradGraphError> {
        let mut graph = Graph::new();
        let linear = fixed_linear(&mut graph).with_relu(true);
        let out = linear.forward(&mut graph, &[0.0.into(), 5.0.into()])?;
        assert_eq!(graph.value(out)?, 0.0);

        graph.backward(out)?;
        check_grads_near(&graph, &[(linear.weights()[1], 0.0)], 1e-12);
        Ok(())
    }

    #[test]
    fn test_linear_input_count_mismatch() {
        let mut graph = Graph::new();
        let linear = fixed_linear(&mut graph);
        let before = graph.len();
        let result = linear.forward(&mut graph, &[1.0.into()]);
        assert!(matches!(result, Err(GradGraphError::InvalidTopology { .. })));
        assert_eq!(graph.len(), before);
    }

    #[test]
    fn test_linear_new_initialization() -> Result<(), GradGraphError> {
        let mut graph = Graph::new();
        let mut rng = StdRng::seed_from_u64(3);
        let linear = Linear::new(&mut graph, 4, true, &mut rng)?;
        assert_eq!(linear.in_features(), 4);
        assert_eq!(linear.parameters().len(), 5);
        let bias = linear.bias().expect("bias requested");
        assert_eq!(graph.value(bias)?, 0.0);
        for w in linear.weights() {
            assert!(graph.value(*w)?.abs() <= 0.5);
        }

        let no_bias = Linear::new(&mut graph, 2, false, &mut rng)?;
        assert!(no_bias.bias().is_none());
        assert_eq!(no_bias.parameters().len(), 2);

        let result = Linear::new(&mut graph, 0, true, &mut rng);
        assert!(matches!(result, Err(GradGraphError::InvalidConfig { .. })));
        Ok(())
    }

    #[test]
    fn test_named_parameters() {
        let mut graph = Graph::new();
        let w = graph.leaf(1.0, "weight");
        let b = graph.unnamed_leaf(0.0);
        let linear = Linear::from_parameters(vec![w], Some(b));
        let named = linear.named_parameters(&graph);
        assert_eq!(
            named,
            vec![("weight".to_string(), w), ("param1".to_string(), b)]
        );
    }
}
