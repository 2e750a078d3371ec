//! 残量网络运行时: 弧对构造、推流语义与连通性诊断。
use std::collections::VecDeque;
use std::fmt::{self, Write as FmtWrite};
use std::fs;
use std::path::Path;

use smallvec::SmallVec;

use crate::net::ids::{EdgeId, VertexId};
use crate::net::index_vec::{Idx, IndexVec};
use crate::net::structure::{Arc, ArcRef, EdgeRecord};
use crate::numeric::{Capacity, Cost};

/// Adjacency row of residual arcs; most vertices carry only a few.
pub type ArcRow<C, D> = SmallVec<[Arc<C, D>; 4]>;

/// 流网络连通性诊断报告
#[derive(Debug, Clone, Default)]
pub struct DiagnosticReport {
    /// 源点不可达的顶点
    pub unreachable_vertices: Vec<VertexId>,
    /// 容量为零、永远不承载流的边
    pub zero_capacity_edges: Vec<EdgeId>,
    /// 负费用边条数
    pub negative_cost_edges: usize,
    /// 汇点是否从源点可达
    pub sink_reachable: bool,
    /// 总顶点数
    pub total_vertices: usize,
    /// 总边数
    pub total_edges: usize,
}

impl DiagnosticReport {
    /// 是否存在需要关注的问题
    pub fn has_issues(&self) -> bool {
        !self.unreachable_vertices.is_empty()
            || !self.zero_capacity_edges.is_empty()
            || !self.sink_reachable
    }
}

/// Directed flow network in residual form.
///
/// Construction appends forward/reverse arc pairs; afterwards [`push`] is the
/// only mutation: it moves residual capacity from an arc to its pair, so the
/// pair's combined capacity is conserved for the life of the network. The
/// original edges are kept in insertion order for flow readback and
/// certification.
///
/// [`push`]: FlowNetwork::push
#[derive(Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FlowNetwork<C, D> {
    adjacency: IndexVec<VertexId, ArcRow<C, D>>,
    edges: IndexVec<EdgeId, EdgeRecord<C, D>>,
}

impl<C, D> fmt::Debug for FlowNetwork<C, D>
where
    C: fmt::Debug,
    D: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlowNetwork")
            .field("adjacency", &self.adjacency)
            .field("edges", &self.edges)
            .finish()
    }
}

impl<C, D> FlowNetwork<C, D>
where
    C: Capacity,
    D: Cost,
{
    pub fn new() -> Self {
        Self {
            adjacency: IndexVec::new(),
            edges: IndexVec::new(),
        }
    }

    pub fn with_vertices(count: usize) -> Self {
        Self {
            adjacency: IndexVec::from_elem(ArcRow::new(), count),
            edges: IndexVec::new(),
        }
    }

    pub fn add_vertex(&mut self) -> VertexId {
        self.adjacency.push(ArcRow::new())
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn vertices(&self) -> impl Iterator<Item = VertexId> {
        self.adjacency.indices()
    }

    /// Appends the forward/reverse arc pair for one directed edge in O(1).
    ///
    /// The forward arc carries `capacity` and `cost`; its pair starts at
    /// capacity zero with the cost negated. Costs may have either sign,
    /// capacity must not be negative.
    pub fn add_edge(&mut self, from: VertexId, to: VertexId, capacity: C, cost: D) -> EdgeId {
        assert!(
            from.index() < self.adjacency.len(),
            "tail vertex {} out of range ({} vertices)",
            from,
            self.adjacency.len()
        );
        assert!(
            to.index() < self.adjacency.len(),
            "head vertex {} out of range ({} vertices)",
            to,
            self.adjacency.len()
        );
        assert!(
            capacity >= C::zero(),
            "edge capacity must be non-negative, got {:?}",
            capacity
        );

        let forward_slot = self.adjacency[from].len() as u32;
        // A self-loop lands both arcs in the same row, one slot apart.
        let reverse_slot = if from == to {
            forward_slot + 1
        } else {
            self.adjacency[to].len() as u32
        };
        self.adjacency[from].push(Arc::new(to, capacity, cost, reverse_slot));
        self.adjacency[to].push(Arc::new(from, C::zero(), -cost, forward_slot));

        self.edges.push(EdgeRecord {
            from,
            to,
            capacity,
            cost,
            forward: ArcRef::new(from, forward_slot),
        })
    }

    pub fn arc(&self, handle: ArcRef) -> &Arc<C, D> {
        &self.adjacency[handle.tail][handle.slot as usize]
    }

    /// Handle of the paired arc.
    pub fn rev(&self, handle: ArcRef) -> ArcRef {
        let arc = self.arc(handle);
        ArcRef::new(arc.to, arc.rev)
    }

    /// Arcs leaving `vertex`, with their handles, in row order.
    pub fn out_arcs(&self, vertex: VertexId) -> impl Iterator<Item = (ArcRef, &Arc<C, D>)> {
        self.adjacency[vertex]
            .iter()
            .enumerate()
            .map(move |(slot, arc)| (ArcRef::new(vertex, slot as u32), arc))
    }

    /// Moves `amount` units of residual capacity from `handle` to its pair.
    ///
    /// This is the sole mutation after construction; the pushed amount must
    /// not exceed the arc's remaining capacity.
    pub fn push(&mut self, handle: ArcRef, amount: C) {
        let pair = {
            let arc = &mut self.adjacency[handle.tail][handle.slot as usize];
            arc.capacity = arc
                .capacity
                .checked_sub(&amount)
                .expect("pushed amount must not exceed residual capacity");
            ArcRef::new(arc.to, arc.rev)
        };
        self.adjacency[pair.tail][pair.slot as usize].capacity += amount;
    }

    pub fn edge(&self, edge: EdgeId) -> &EdgeRecord<C, D> {
        &self.edges[edge]
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &EdgeRecord<C, D>)> {
        self.edges.iter_enumerated()
    }

    /// Remaining capacity of an original edge.
    pub fn residual(&self, edge: EdgeId) -> C {
        self.arc(self.edges[edge].forward).capacity
    }

    /// Flow currently carried by an original edge, read from its pair.
    pub fn flow_on(&self, edge: EdgeId) -> C {
        self.arc(self.rev(self.edges[edge].forward)).capacity
    }

    /// Vertices reachable from `start` over arcs with positive residual
    /// capacity.
    pub fn reachable_from(&self, start: VertexId) -> IndexVec<VertexId, bool> {
        let mut reached = IndexVec::from_elem(false, self.adjacency.len());
        let mut queue = VecDeque::new();
        reached[start] = true;
        queue.push_back(start);
        while let Some(vertex) = queue.pop_front() {
            for (_, arc) in self.out_arcs(vertex) {
                if arc.capacity > C::zero() && !reached[arc.to] {
                    reached[arc.to] = true;
                    queue.push_back(arc.to);
                }
            }
        }
        reached
    }

    /// 诊断连通性: 源点可达性、零容量边与负费用边统计
    pub fn diagnose(&self, source: VertexId, sink: VertexId) -> DiagnosticReport {
        let reached = self.reachable_from(source);
        let unreachable_vertices = reached
            .iter_enumerated()
            .filter(|&(_, &ok)| !ok)
            .map(|(v, _)| v)
            .collect();
        let zero_capacity_edges = self
            .edges
            .iter_enumerated()
            .filter(|(_, e)| e.capacity.is_zero())
            .map(|(id, _)| id)
            .collect();
        let negative_cost_edges = self
            .edges
            .iter()
            .filter(|e| e.cost.total_order(D::zero()) == std::cmp::Ordering::Less)
            .count();

        DiagnosticReport {
            unreachable_vertices,
            zero_capacity_edges,
            negative_cost_edges,
            sink_reachable: reached[sink],
            total_vertices: self.vertex_count(),
            total_edges: self.edge_count(),
        }
    }

    /// 打印诊断报告到日志
    pub fn log_diagnostics(&self, source: VertexId, sink: VertexId) {
        let report = self.diagnose(source, sink);

        if report.has_issues() {
            log::warn!("=== 流网络连通性诊断报告 ===");
            log::warn!(
                "总计: {} 个顶点, {} 条边",
                report.total_vertices,
                report.total_edges
            );
            if !report.sink_reachable {
                log::warn!("汇点 {} 从源点 {} 不可达，最大流为零", sink, source);
            }
            if !report.unreachable_vertices.is_empty() {
                log::warn!(
                    "源点不可达顶点 {} 个: {:?}",
                    report.unreachable_vertices.len(),
                    report.unreachable_vertices
                );
            }
            if !report.zero_capacity_edges.is_empty() {
                log::warn!("零容量边 {} 条", report.zero_capacity_edges.len());
            }
            if report.negative_cost_edges > 0 {
                log::warn!(
                    "负费用边 {} 条，求解需启用 Bellman-Ford 种子",
                    report.negative_cost_edges
                );
            }
            log::warn!("=== 诊断报告结束 ===");
        } else {
            log::info!("流网络连通性检查通过");
        }
    }

    pub fn to_dot(&self) -> String {
        let mut dot = String::new();
        let _ = writeln!(&mut dot, "digraph FlowNetwork {{");
        let _ = writeln!(&mut dot, "    rankdir=LR;");
        let _ = writeln!(&mut dot, "    node [fontname=\"Helvetica\", shape=circle];");

        for vertex in self.adjacency.indices() {
            let _ = writeln!(&mut dot, "    {};", vertex);
        }

        for (edge_id, edge) in self.edges.iter_enumerated() {
            let flow = self.flow_on(edge_id);
            let _ = writeln!(
                &mut dot,
                "    {} -> {} [label=\"{:?}/{:?} @{:?}\"];",
                edge.from, edge.to, flow, edge.capacity, edge.cost
            );
        }

        let _ = writeln!(&mut dot, "}}");
        dot
    }

    pub fn write_dot<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_dot())
    }
}

impl<C, D> Default for FlowNetwork<C, D>
where
    C: Capacity,
    D: Cost,
{
    fn default() -> Self {
        Self::new()
    }
}
