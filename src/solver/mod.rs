//! # 最小费用流解算器（Successive Shortest Paths）
//!
//! 连续最短增广路算法，配合顶点势函数（Johnson 技巧）：
//!
//! 1. 可选的 Bellman-Ford 种子消化负费用边；
//! 2. 每个阶段在约化费用上跑 Dijkstra 刷新势函数并找出最短增广路；
//! 3. 沿前驱链推流，瓶颈耗尽时惰性刷新。
//!
//! 由于约化费用始终非负，逐阶段的单位边际费用单调不减，推满后的总费用
//! 即给定流量下的最小费用。解算器独占其残量网络，单线程同步执行。
//!
//! ## 示例
//!
//! ```rust
//! use RustMCF::net::{FlowNetwork, VertexId};
//! use RustMCF::solver::MinCostFlow;
//!
//! let mut net: FlowNetwork<i32, i64> = FlowNetwork::with_vertices(3);
//! let (s, m, t) = (VertexId::new(0), VertexId::new(1), VertexId::new(2));
//! net.add_edge(s, m, 4, 1);
//! net.add_edge(m, t, 4, 1);
//! net.add_edge(s, t, 4, 5);
//!
//! let mut solver = MinCostFlow::new(net, s, t);
//! solver.max_flow(i32::MAX);
//! assert_eq!(solver.total_flow(), 8);
//! assert_eq!(solver.total_cost(), 4 * 2 + 4 * 5);
//! ```

mod potential;

use crate::net::core::FlowNetwork;
use crate::net::ids::VertexId;
use crate::net::index_vec::{Idx, IndexVec};
use crate::net::io::SolveReport;
use crate::net::structure::FlowTotals;
use crate::numeric::{Capacity, Cost};

use potential::{AugmentingPath, Potentials};

/// Min-cost flow solver over a residual [`FlowNetwork`].
///
/// Construction takes ownership of the fully built network and runs the
/// first shortest-path phase; [`single_flow`] and [`max_flow`] then push
/// flow along the currently cheapest augmenting path, refreshing the
/// potentials only when that path's bottleneck saturates. Totals and final
/// potentials are read back through accessors; the potentials double as an
/// LP duality certificate for the computed cost.
///
/// [`single_flow`]: MinCostFlow::single_flow
/// [`max_flow`]: MinCostFlow::max_flow
pub struct MinCostFlow<C, D> {
    network: FlowNetwork<C, D>,
    source: VertexId,
    sink: VertexId,
    potentials: Potentials<D>,
    /// Cheapest augmenting path of the current phase; `None` once the sink
    /// is unreachable in the residual network.
    current: Option<AugmentingPath<C, D>>,
    totals: FlowTotals<C, D>,
    /// Vertices reachable from the source before any flow was pushed.
    seed_reach: IndexVec<VertexId, bool>,
}

impl<C, D> MinCostFlow<C, D>
where
    C: Capacity,
    D: Cost,
{
    /// Solver for a network whose edge costs are all non-negative.
    pub fn new(network: FlowNetwork<C, D>, source: VertexId, sink: VertexId) -> Self {
        Self::build(network, source, sink, false)
    }

    /// Solver for a network that may contain negative-cost edges.
    ///
    /// Seeds the potentials with a Bellman-Ford pass before the first
    /// Dijkstra phase. Precondition: no negative-cost cycle is reachable
    /// from the source; a reachable one fails the seed's assertion.
    pub fn with_negative_costs(
        network: FlowNetwork<C, D>,
        source: VertexId,
        sink: VertexId,
    ) -> Self {
        Self::build(network, source, sink, true)
    }

    fn build(
        network: FlowNetwork<C, D>,
        source: VertexId,
        sink: VertexId,
        negative: bool,
    ) -> Self {
        assert!(source != sink, "source {} equals sink", source);
        assert!(
            source.index() < network.vertex_count() && sink.index() < network.vertex_count(),
            "source {} or sink {} outside {} vertices",
            source,
            sink,
            network.vertex_count()
        );

        let mut potentials = Potentials::new(network.vertex_count());
        if negative {
            potentials.seed_negative(&network, source);
        }
        let seed_reach = network.reachable_from(source);

        let mut solver = Self {
            network,
            source,
            sink,
            potentials,
            current: None,
            totals: FlowTotals::new(C::zero(), D::zero()),
            seed_reach,
        };
        solver.refresh();
        solver
    }

    fn refresh(&mut self) {
        self.current = self
            .potentials
            .refresh(&self.network, self.source, self.sink);
    }

    /// Pushes up to `requested` units along the current cheapest path.
    ///
    /// Returns the amount actually pushed: `min(requested, bottleneck)`, or
    /// zero once no augmenting path remains. Saturating the bottleneck
    /// triggers the next shortest-path phase.
    pub fn single_flow(&mut self, requested: C) -> C {
        let Some(path) = self.current.as_mut() else {
            return C::zero();
        };
        let pushed = requested.min(path.bottleneck);
        if pushed.is_zero() {
            return C::zero();
        }

        let marginal = path.marginal;
        let mut vertex = self.sink;
        while vertex != self.source {
            let handle = path.pred[vertex].expect("recorded path reaches the source");
            self.network.push(handle, pushed);
            vertex = handle.tail;
        }
        path.bottleneck -= pushed;
        let saturated = path.bottleneck.is_zero();

        self.totals.flow += pushed;
        self.totals.cost += marginal * pushed.to_cost::<D>();
        log::trace!(
            "pushed {:?} units at marginal cost {:?}, totals now {:?}",
            pushed,
            marginal,
            self.totals
        );

        if saturated {
            self.refresh();
        }
        pushed
    }

    /// Pushes up to `limit` units in total, phase by phase.
    ///
    /// Stops when the limit is met or no augmenting path remains; in the
    /// latter case the totals hold the min-cost max flow. Calling again
    /// after exhaustion pushes nothing and leaves the totals unchanged.
    pub fn max_flow(&mut self, limit: C) {
        let mut remaining = limit;
        while remaining > C::zero() {
            let pushed = self.single_flow(remaining);
            if pushed.is_zero() {
                break;
            }
            remaining -= pushed;
        }
        log::debug!(
            "max_flow({:?}) done: {:?} units for cost {:?}",
            limit,
            self.totals.flow,
            self.totals.cost
        );
    }

    /// Total units pushed so far.
    pub fn total_flow(&self) -> C {
        self.totals.flow
    }

    /// Total cost paid for the pushed units.
    pub fn total_cost(&self) -> D {
        self.totals.cost
    }

    pub fn totals(&self) -> FlowTotals<C, D> {
        self.totals
    }

    /// Real per-unit cost of the current phase's path, `None` after
    /// exhaustion.
    pub fn marginal_cost(&self) -> Option<D> {
        self.current.as_ref().map(|path| path.marginal)
    }

    /// Remaining bottleneck capacity of the current phase's path.
    pub fn path_capacity(&self) -> Option<C> {
        self.current.as_ref().map(|path| path.bottleneck)
    }

    /// Whether an augmenting path is still available.
    pub fn has_augmenting_path(&self) -> bool {
        self.current.is_some()
    }

    /// Final potential (dual variable) of `vertex`.
    pub fn potential(&self, vertex: VertexId) -> D {
        self.potentials.value(vertex)
    }

    /// All potentials in vertex order.
    pub fn potentials(&self) -> impl Iterator<Item = D> + '_ {
        self.potentials.iter()
    }

    /// Whether `vertex` was reachable from the source before any flow was
    /// pushed; unreachable vertices keep a meaningless zero potential and
    /// are excluded from duality certificates.
    pub fn initially_reachable(&self, vertex: VertexId) -> bool {
        self.seed_reach[vertex]
    }

    pub fn source(&self) -> VertexId {
        self.source
    }

    pub fn sink(&self) -> VertexId {
        self.sink
    }

    pub fn network(&self) -> &FlowNetwork<C, D> {
        &self.network
    }

    /// Serializable summary of the solve for external tools.
    pub fn report(&self) -> SolveReport<C, D> {
        SolveReport::collect(
            &self.network,
            self.source,
            self.sink,
            self.totals.flow,
            self.totals.cost,
            self.potentials.iter(),
        )
    }
}
