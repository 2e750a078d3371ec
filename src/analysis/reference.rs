//! 独立参考解算器: SPFA 增广到饱和的暴力最小费用最大流。
use std::cmp::Ordering;
use std::collections::VecDeque;

use crate::net::core::FlowNetwork;
use crate::net::ids::VertexId;
use crate::net::index_vec::IndexVec;
use crate::net::structure::{ArcRef, FlowTotals};
use crate::numeric::{Capacity, Cost};

/// Min-cost max flow by repeated SPFA augmentation, used as an oracle.
///
/// Deliberately shares nothing with the potential-based solver beyond the
/// network type: every phase reruns a queue-based Bellman-Ford relaxation
/// over real (not reduced) costs, so negative edge costs need no seeding.
/// Quadratic-ish and only suitable for the small instances the test
/// generator produces.
pub fn min_cost_max_flow_spfa<C, D>(
    mut network: FlowNetwork<C, D>,
    source: VertexId,
    sink: VertexId,
) -> FlowTotals<C, D>
where
    C: Capacity,
    D: Cost,
{
    assert!(source != sink, "source {} equals sink", source);
    let mut totals = FlowTotals::new(C::zero(), D::zero());

    while let Some((pred, path_cost)) = spfa(&network, source, sink) {
        let mut bottleneck = C::max_value();
        let mut vertex = sink;
        while vertex != source {
            let handle = pred[vertex].expect("augmenting path reaches the source");
            bottleneck = bottleneck.min(network.arc(handle).capacity);
            vertex = handle.tail;
        }

        let mut vertex = sink;
        while vertex != source {
            let handle = pred[vertex].expect("augmenting path reaches the source");
            network.push(handle, bottleneck);
            vertex = handle.tail;
        }

        totals.flow += bottleneck;
        totals.cost += path_cost * bottleneck.to_cost::<D>();
    }
    totals
}

/// One shortest-path phase over real costs; `None` when the sink is
/// unreachable in the residual network.
fn spfa<C, D>(
    network: &FlowNetwork<C, D>,
    source: VertexId,
    sink: VertexId,
) -> Option<(IndexVec<VertexId, Option<ArcRef>>, D)>
where
    C: Capacity,
    D: Cost,
{
    let count = network.vertex_count();
    let mut dist = IndexVec::from_elem(D::infinite(), count);
    let mut pred: IndexVec<VertexId, Option<ArcRef>> = IndexVec::from_elem(None, count);
    let mut queued = IndexVec::from_elem(false, count);
    let mut queue = VecDeque::new();

    dist[source] = D::zero();
    queued[source] = true;
    queue.push_back(source);

    while let Some(vertex) = queue.pop_front() {
        queued[vertex] = false;
        for (handle, arc) in network.out_arcs(vertex) {
            if arc.capacity.is_zero() {
                continue;
            }
            let candidate = dist[vertex] + arc.cost;
            if candidate.total_order(dist[arc.to]) == Ordering::Less {
                dist[arc.to] = candidate;
                pred[arc.to] = Some(handle);
                if !queued[arc.to] {
                    queued[arc.to] = true;
                    queue.push_back(arc.to);
                }
            }
        }
    }

    if dist[sink] == D::infinite() {
        None
    } else {
        Some((pred, dist[sink]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex(raw: u32) -> VertexId {
        VertexId::new(raw)
    }

    #[test]
    fn saturates_the_cheap_path_first() {
        let mut net: FlowNetwork<i32, i64> = FlowNetwork::with_vertices(3);
        net.add_edge(vertex(0), vertex(1), 4, 1);
        net.add_edge(vertex(1), vertex(2), 4, 1);
        net.add_edge(vertex(0), vertex(2), 4, 5);

        let totals = min_cost_max_flow_spfa(net, vertex(0), vertex(2));
        assert_eq!(totals.flow, 8);
        assert_eq!(totals.cost, 4 * 2 + 4 * 5);
    }

    #[test]
    fn handles_negative_costs_without_seeding() {
        let mut net: FlowNetwork<i32, i64> = FlowNetwork::with_vertices(3);
        net.add_edge(vertex(0), vertex(1), 3, 4);
        net.add_edge(vertex(1), vertex(2), 3, -2);
        net.add_edge(vertex(0), vertex(2), 3, 3);

        let totals = min_cost_max_flow_spfa(net, vertex(0), vertex(2));
        assert_eq!(totals.flow, 6);
        assert_eq!(totals.cost, 3 * 2 + 3 * 3);
    }

    #[test]
    fn disconnected_sink_yields_zero_totals() {
        let mut net: FlowNetwork<i32, i64> = FlowNetwork::with_vertices(3);
        net.add_edge(vertex(0), vertex(1), 5, 1);

        let totals = min_cost_max_flow_spfa(net, vertex(0), vertex(2));
        assert_eq!(totals.flow, 0);
        assert_eq!(totals.cost, 0);
    }
}
