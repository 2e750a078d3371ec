//! 势函数维护: Bellman-Ford 种子与约化费用 Dijkstra 刷新。
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::net::core::FlowNetwork;
use crate::net::ids::VertexId;
use crate::net::index_vec::IndexVec;
use crate::net::structure::ArcRef;
use crate::numeric::{Capacity, Cost};

/// Per-vertex potentials keeping every positive-capacity residual arc at a
/// non-negative reduced cost `cost(u, v) + dual[u] - dual[v]`.
pub(crate) struct Potentials<D> {
    values: IndexVec<VertexId, D>,
}

/// Shortest augmenting path found by a refresh: one predecessor arc per
/// relaxed vertex, the real per-unit cost of the path and its bottleneck.
pub(crate) struct AugmentingPath<C, D> {
    pub(crate) pred: IndexVec<VertexId, Option<ArcRef>>,
    pub(crate) marginal: D,
    pub(crate) bottleneck: C,
}

/// Min-heap entry keyed by tentative reduced distance.
struct QueueEntry<D> {
    dist: D,
    vertex: VertexId,
}

impl<D: Cost> PartialEq for QueueEntry<D> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<D: Cost> Eq for QueueEntry<D> {}

impl<D: Cost> PartialOrd for QueueEntry<D> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<D: Cost> Ord for QueueEntry<D> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed, so the std max-heap pops the smallest distance first.
        other
            .dist
            .total_order(self.dist)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

impl<D: Cost> Potentials<D> {
    pub(crate) fn new(count: usize) -> Self {
        Self {
            values: IndexVec::from_elem(D::zero(), count),
        }
    }

    pub(crate) fn value(&self, vertex: VertexId) -> D {
        self.values[vertex]
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = D> + '_ {
        self.values.iter().copied()
    }

    /// Bellman-Ford seed for networks that may contain negative-cost edges.
    ///
    /// Runs up to `|V|` relaxation rounds from the source over positive
    /// capacity arcs and adopts the distances as initial potentials. Vertices
    /// the source cannot reach keep a zero potential. A further improvement
    /// after the rounds means a negative-cost cycle is reachable, which the
    /// solver's precondition forbids.
    pub(crate) fn seed_negative<C: Capacity>(
        &mut self,
        network: &FlowNetwork<C, D>,
        source: VertexId,
    ) {
        let count = network.vertex_count();
        let mut dist = IndexVec::from_elem(D::infinite(), count);
        dist[source] = D::zero();
        for _ in 0..count {
            if !relax_all(network, &mut dist) {
                break;
            }
        }
        assert!(
            !relax_all(network, &mut dist),
            "negative-cost cycle reachable from source {}",
            source
        );

        for (vertex, &found) in dist.iter_enumerated() {
            if found != D::infinite() {
                self.values[vertex] = found;
            }
        }
        log::debug!("seeded potentials from {} over {} vertices", source, count);
    }

    /// One Dijkstra phase over reduced costs.
    ///
    /// Finalizes distances until the sink pops, updates the potentials of
    /// every finalized vertex by `dist[v] - dist[sink]` so the invariant
    /// holds again afterwards, and reconstructs the discovered path. Returns
    /// `None` when the sink is unreachable in the residual network.
    pub(crate) fn refresh<C: Capacity>(
        &mut self,
        network: &FlowNetwork<C, D>,
        source: VertexId,
        sink: VertexId,
    ) -> Option<AugmentingPath<C, D>> {
        let count = network.vertex_count();
        let mut dist = IndexVec::from_elem(D::infinite(), count);
        let mut pred: IndexVec<VertexId, Option<ArcRef>> = IndexVec::from_elem(None, count);
        let mut visited = IndexVec::from_elem(false, count);
        let mut queue = BinaryHeap::new();
        dist[source] = D::zero();
        queue.push(QueueEntry {
            dist: D::zero(),
            vertex: source,
        });

        while let Some(QueueEntry { vertex, .. }) = queue.pop() {
            if vertex == sink {
                break;
            }
            if visited[vertex] {
                continue;
            }
            visited[vertex] = true;
            for (handle, arc) in network.out_arcs(vertex) {
                if visited[arc.to] || arc.capacity.is_zero() {
                    continue;
                }
                let candidate =
                    dist[vertex] + arc.cost + self.values[vertex] - self.values[arc.to];
                if candidate.total_order(dist[arc.to]) == Ordering::Less {
                    dist[arc.to] = candidate;
                    pred[arc.to] = Some(handle);
                    queue.push(QueueEntry {
                        dist: candidate,
                        vertex: arc.to,
                    });
                }
            }
        }

        if dist[sink] == D::infinite() {
            log::debug!("no augmenting path from {} to {}", source, sink);
            return None;
        }

        for (vertex, &done) in visited.iter_enumerated() {
            if done {
                let delta = dist[vertex] - dist[sink];
                self.values[vertex] += delta;
            }
        }

        let marginal = self.values[sink] - self.values[source];
        assert!(
            marginal.total_order(D::zero()) != Ordering::Less,
            "negative marginal cost {:?} breaks dual feasibility",
            marginal
        );

        let mut bottleneck = C::max_value();
        let mut vertex = sink;
        while vertex != source {
            let handle = pred[vertex].expect("augmenting path reaches the source");
            bottleneck = bottleneck.min(network.arc(handle).capacity);
            vertex = handle.tail;
        }

        log::debug!(
            "refresh: marginal cost {:?}, bottleneck {:?}",
            marginal,
            bottleneck
        );
        Some(AugmentingPath {
            pred,
            marginal,
            bottleneck,
        })
    }
}

/// One relaxation round over every positive-capacity arc; reports whether
/// any distance improved.
fn relax_all<C: Capacity, D: Cost>(
    network: &FlowNetwork<C, D>,
    dist: &mut IndexVec<VertexId, D>,
) -> bool {
    let mut improved = false;
    for vertex in network.vertices() {
        if dist[vertex] == D::infinite() {
            continue;
        }
        for (_, arc) in network.out_arcs(vertex) {
            if arc.capacity.is_zero() {
                continue;
            }
            let candidate = dist[vertex] + arc.cost;
            if candidate.total_order(dist[arc.to]) == Ordering::Less {
                dist[arc.to] = candidate;
                improved = true;
            }
        }
    }
    improved
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex(raw: u32) -> VertexId {
        VertexId::new(raw)
    }

    #[test]
    fn refresh_finds_cheapest_path_and_bottleneck() {
        let mut net: FlowNetwork<i32, i64> = FlowNetwork::with_vertices(3);
        net.add_edge(vertex(0), vertex(1), 4, 1);
        net.add_edge(vertex(1), vertex(2), 2, 1);
        net.add_edge(vertex(0), vertex(2), 9, 7);

        let mut potentials = Potentials::new(3);
        let path = potentials.refresh(&net, vertex(0), vertex(2)).unwrap();
        assert_eq!(path.marginal, 2);
        assert_eq!(path.bottleneck, 2);
        assert_eq!(path.pred[vertex(2)].unwrap().tail, vertex(1));
        assert_eq!(path.pred[vertex(1)].unwrap().tail, vertex(0));
    }

    #[test]
    fn refresh_returns_none_when_sink_unreachable() {
        let mut net: FlowNetwork<i32, i64> = FlowNetwork::with_vertices(3);
        net.add_edge(vertex(0), vertex(1), 1, 1);

        let mut potentials = Potentials::new(3);
        assert!(potentials.refresh(&net, vertex(0), vertex(2)).is_none());
    }

    #[test]
    fn refresh_treats_saturated_arcs_as_absent() {
        let mut net: FlowNetwork<i32, i64> = FlowNetwork::with_vertices(2);
        let edge = net.add_edge(vertex(0), vertex(1), 1, 1);
        net.push(net.edge(edge).forward, 1);

        let mut potentials = Potentials::new(2);
        assert!(potentials.refresh(&net, vertex(0), vertex(1)).is_none());
    }

    #[test]
    fn seed_adopts_shortest_distances() {
        // Negative edge on the cheap branch; the path total stays positive.
        let mut net: FlowNetwork<i32, i64> = FlowNetwork::with_vertices(3);
        net.add_edge(vertex(0), vertex(1), 4, 5);
        net.add_edge(vertex(1), vertex(2), 4, -3);

        let mut potentials = Potentials::new(3);
        potentials.seed_negative(&net, vertex(0));
        assert_eq!(potentials.value(vertex(0)), 0);
        assert_eq!(potentials.value(vertex(1)), 5);
        assert_eq!(potentials.value(vertex(2)), 2);

        let path = potentials.refresh(&net, vertex(0), vertex(2)).unwrap();
        assert_eq!(path.marginal, 2);
        assert_eq!(path.bottleneck, 4);
    }

    #[test]
    fn seed_leaves_unreachable_vertices_at_zero() {
        let mut net: FlowNetwork<i32, i64> = FlowNetwork::with_vertices(3);
        net.add_edge(vertex(0), vertex(1), 1, -4);

        let mut potentials = Potentials::new(3);
        potentials.seed_negative(&net, vertex(0));
        assert_eq!(potentials.value(vertex(1)), -4);
        assert_eq!(potentials.value(vertex(2)), 0);
    }

    #[test]
    #[should_panic(expected = "negative-cost cycle")]
    fn seed_rejects_reachable_negative_cycle() {
        let mut net: FlowNetwork<i32, i64> = FlowNetwork::with_vertices(3);
        net.add_edge(vertex(0), vertex(1), 1, 1);
        net.add_edge(vertex(1), vertex(2), 1, -5);
        net.add_edge(vertex(2), vertex(1), 1, 2);

        let mut potentials = Potentials::new(3);
        potentials.seed_negative(&net, vertex(0));
    }

    #[test]
    fn seed_ignores_unreachable_negative_cycle() {
        let mut net: FlowNetwork<i32, i64> = FlowNetwork::with_vertices(4);
        net.add_edge(vertex(0), vertex(1), 1, 3);
        net.add_edge(vertex(2), vertex(3), 1, -5);
        net.add_edge(vertex(3), vertex(2), 1, 2);

        let mut potentials = Potentials::new(4);
        potentials.seed_negative(&net, vertex(0));
        assert_eq!(potentials.value(vertex(1)), 3);
        assert_eq!(potentials.value(vertex(2)), 0);
        assert_eq!(potentials.value(vertex(3)), 0);
    }
}
