use crate::graph::Graph;
use crate::node::NodeId;

/// Checks that every `(leaf, expected)` pair matches the accumulated gradient on the graph.
/// Panics with the offending node if a gradient is missing or differs by more than `tolerance`.
pub fn check_grads_near(graph: &Graph, expected: &[(NodeId, f64)], tolerance: f64) {
    for (leaf, want) in expected {
        let got = graph
            .accumulated_grad(*leaf)
            .expect("Unknown node in check_grads_near")
            .unwrap_or_else(|| panic!("No accumulated gradient on {}", leaf));
        let diff = (got - want).abs();
        if diff > tolerance {
            panic!(
                "Gradient mismatch at {}: actual={:?}, expected={:?}, diff={:?}, tolerance={:?}",
                leaf, got, want, diff, tolerance
            );
        }
    }
}

/// Builds the graph `F = (X + Y) * Z` with `X = -2`, `Y = 5`, `Z = -4`.
/// Returns the graph and the ids `[X, Y, Z, Q, F]`.
pub fn chain_rule_graph() -> (Graph, [NodeId; 5]) {
    let mut graph = Graph::new();
    let x = graph.leaf(-2.0, "X");
    let y = graph.leaf(5.0, "Y");
    let z = graph.leaf(-4.0, "Z");
    let q = graph.add(x, y).expect("Add on fresh leaves");
    let f = graph.mul(q, z).expect("Multiply on fresh leaves");
    (graph, [x, y, z, q, f])
}
