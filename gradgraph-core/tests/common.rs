use gradgraph_core::{Graph, NodeId};

#[allow(dead_code)]
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Accumulated gradient of `id`, panicking with the node if it is missing.
#[allow(dead_code)]
pub fn grad(graph: &Graph, id: NodeId) -> f64 {
    graph
        .accumulated_grad(id)
        .expect("Unknown node")
        .unwrap_or_else(|| panic!("No gradient on {}", id))
}
