//! 承载流量的弧构成的 petgraph 视图。
use petgraph::dot::Dot;
use petgraph::graph::DiGraph;

use crate::net::core::FlowNetwork;
use crate::net::index_vec::Idx;
use crate::numeric::{Capacity, Cost};

/// Graph of the edges actually carrying flow, labeled `flow/cap @cost`.
///
/// Every vertex is kept so the rendering shows isolated vertices too;
/// zero-flow edges are dropped.
pub fn solution_graph<C, D>(network: &FlowNetwork<C, D>) -> DiGraph<String, String>
where
    C: Capacity,
    D: Cost,
{
    let mut graph = DiGraph::new();
    let nodes: Vec<_> = network
        .vertices()
        .map(|vertex| graph.add_node(vertex.to_string()))
        .collect();

    for (id, edge) in network.edges() {
        let flow = network.flow_on(id);
        if flow > C::zero() {
            graph.add_edge(
                nodes[edge.from.index()],
                nodes[edge.to.index()],
                format!("{:?}/{:?} @{:?}", flow, edge.capacity, edge.cost),
            );
        }
    }
    graph
}

/// Graphviz rendering of [`solution_graph`].
pub fn solution_dot<C, D>(network: &FlowNetwork<C, D>) -> String
where
    C: Capacity,
    D: Cost,
{
    format!("{}", Dot::new(&solution_graph(network)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::ids::VertexId;
    use crate::solver::MinCostFlow;

    #[test]
    fn keeps_only_flow_carrying_edges() {
        let mut net: FlowNetwork<i32, i64> = FlowNetwork::with_vertices(3);
        let (s, m, t) = (VertexId::new(0), VertexId::new(1), VertexId::new(2));
        net.add_edge(s, m, 4, 1);
        net.add_edge(m, t, 4, 1);
        net.add_edge(s, t, 4, 5);

        let mut solver = MinCostFlow::new(net, s, t);
        solver.max_flow(4);

        let graph = solution_graph(solver.network());
        assert_eq!(graph.node_count(), 3);
        // Only the cheap two-edge chain carries flow at this point.
        assert_eq!(graph.edge_count(), 2);

        let dot = solution_dot(solver.network());
        assert!(dot.contains("4/4 @1"));
        assert!(!dot.contains("@5"));
    }
}
