//! 残量网络静态结构元素：弧、弧句柄与原始边记录。
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::net::ids::VertexId;

/// One directed arc of the residual network.
///
/// Every edge inserted by the caller materializes as a forward arc carrying
/// the full capacity plus a paired reverse arc with capacity 0 and negated
/// cost. `rev` is the slot of the pair inside `to`'s adjacency row.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Arc<C, D> {
    pub to: VertexId,
    pub capacity: C,
    pub cost: D,
    pub rev: u32,
}

impl<C, D> Arc<C, D> {
    pub fn new(to: VertexId, capacity: C, cost: D, rev: u32) -> Self {
        Self {
            to,
            capacity,
            cost,
            rev,
        }
    }
}

impl<C, D> fmt::Debug for Arc<C, D>
where
    C: fmt::Debug,
    D: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arc")
            .field("to", &self.to)
            .field("capacity", &self.capacity)
            .field("cost", &self.cost)
            .field("rev", &self.rev)
            .finish()
    }
}

/// Stable handle to one residual arc: the adjacency row it lives in plus its
/// slot within that row. Rows only grow, so handles stay valid for the life
/// of the network.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArcRef {
    pub tail: VertexId,
    pub slot: u32,
}

impl ArcRef {
    pub fn new(tail: VertexId, slot: u32) -> Self {
        Self { tail, slot }
    }
}

impl fmt::Debug for ArcRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ArcRef({}#{})", self.tail, self.slot)
    }
}

/// A caller-inserted edge as originally stated, kept in insertion order for
/// flow readback, optimality certificates and reports.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct EdgeRecord<C, D> {
    pub from: VertexId,
    pub to: VertexId,
    pub capacity: C,
    pub cost: D,
    pub forward: ArcRef,
}

impl<C, D> fmt::Debug for EdgeRecord<C, D>
where
    C: fmt::Debug,
    D: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EdgeRecord")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("capacity", &self.capacity)
            .field("cost", &self.cost)
            .finish()
    }
}

/// Running totals of a solve: units pushed and cost paid for them.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlowTotals<C, D> {
    pub flow: C,
    pub cost: D,
}

impl<C, D> FlowTotals<C, D> {
    pub fn new(flow: C, cost: D) -> Self {
        Self { flow, cost }
    }
}
