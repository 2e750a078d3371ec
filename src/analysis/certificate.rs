//! LP 对偶最优性证书与流守恒审计。
use std::collections::HashMap;

use itertools::Itertools;
use thiserror::Error;

use crate::net::core::FlowNetwork;
use crate::net::ids::VertexId;
use crate::numeric::{Capacity, Cost};
use crate::solver::MinCostFlow;

/// Symmetric relative comparison: `|x - y| <= rel * max(|x|, |y|)`.
///
/// Any NaN operand fails; two exact zeros pass. Symmetric in its first two
/// arguments, so the verdict does not depend on which side is "expected".
pub fn approx_eq(x: f64, y: f64, rel: f64) -> bool {
    if x.is_nan() || y.is_nan() {
        return false;
    }
    (x - y).abs() <= rel * x.abs().max(y.abs())
}

fn relative_gap(x: f64, y: f64) -> f64 {
    let scale = x.abs().max(y.abs());
    if scale == 0.0 {
        0.0
    } else {
        (x - y).abs() / scale
    }
}

/// Stated solve cost disagrees with the independently derived dual value.
#[derive(Debug, Error)]
#[error("stated cost {stated:?} disagrees with dual certificate {derived:?} (relative gap {gap:.3e})")]
pub struct CertificateError<D: std::fmt::Debug> {
    pub stated: D,
    pub derived: D,
    pub gap: f64,
}

/// The solve cost recomputed from the final potentials alone.
///
/// By LP duality the cost of a min-cost flow equals
/// `(dual[t] - dual[s]) * flow - Σ_e max(0, (dual[to] - dual[from]) - cost) * cap`
/// over the originally inserted edges. The sum skips zero-capacity edges and
/// edges whose tail the source could never reach (their potentials are
/// meaningless zeros). A mismatch means the potential maintenance broke dual
/// feasibility somewhere, not that the instance is infeasible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimalityCertificate<D> {
    /// Cost the solver accumulated while pushing.
    pub stated: D,
    /// Cost derived from the duality formula.
    pub derived: D,
}

impl<D: Cost> OptimalityCertificate<D> {
    /// Exact agreement, for integer cost types.
    pub fn check_exact(&self) -> Result<(), CertificateError<D>> {
        if self.stated == self.derived {
            Ok(())
        } else {
            Err(self.mismatch())
        }
    }

    /// Agreement within a relative tolerance, for floating cost types.
    pub fn check_within(&self, rel: f64) -> Result<(), CertificateError<D>> {
        if approx_eq(self.stated.to_f64(), self.derived.to_f64(), rel) {
            Ok(())
        } else {
            Err(self.mismatch())
        }
    }

    fn mismatch(&self) -> CertificateError<D> {
        CertificateError {
            stated: self.stated,
            derived: self.derived,
            gap: relative_gap(self.stated.to_f64(), self.derived.to_f64()),
        }
    }
}

/// Derives the dual certificate for a completed solve.
pub fn certificate<C, D>(solver: &MinCostFlow<C, D>) -> OptimalityCertificate<D>
where
    C: Capacity,
    D: Cost,
{
    let network = solver.network();
    let gain = solver.potential(solver.sink()) - solver.potential(solver.source());
    let mut derived = gain * solver.total_flow().to_cost::<D>();

    for (_, edge) in network.edges() {
        if edge.capacity.is_zero() || !solver.initially_reachable(edge.from) {
            continue;
        }
        let slack = (solver.potential(edge.to) - solver.potential(edge.from)) - edge.cost;
        if slack.total_order(D::zero()) == std::cmp::Ordering::Greater {
            derived -= slack * edge.capacity.to_cost::<D>();
        }
    }

    OptimalityCertificate {
        stated: solver.total_cost(),
        derived,
    }
}

/// A vertex other than the endpoints gained or lost flow.
#[derive(Debug, Error)]
#[error("vertex {vertex} is imbalanced: inflow {inflow:?}, outflow {outflow:?}")]
pub struct ConservationError<C: std::fmt::Debug> {
    pub vertex: VertexId,
    pub inflow: C,
    pub outflow: C,
}

/// Checks that inflow equals outflow at every vertex except the endpoints.
///
/// Holds after any sequence of pushes, complete or not, because each push
/// moves the same amount across every edge of one source-to-sink path.
pub fn audit_conservation<C, D>(
    network: &FlowNetwork<C, D>,
    source: VertexId,
    sink: VertexId,
) -> Result<(), ConservationError<C>>
where
    C: Capacity,
    D: Cost,
{
    let inflow: HashMap<VertexId, C> = network
        .edges()
        .map(|(id, edge)| (edge.to, network.flow_on(id)))
        .into_grouping_map()
        .sum();
    let outflow: HashMap<VertexId, C> = network
        .edges()
        .map(|(id, edge)| (edge.from, network.flow_on(id)))
        .into_grouping_map()
        .sum();

    for vertex in network.vertices() {
        if vertex == source || vertex == sink {
            continue;
        }
        let incoming = inflow.get(&vertex).copied().unwrap_or_else(C::zero);
        let outgoing = outflow.get(&vertex).copied().unwrap_or_else(C::zero);
        if incoming != outgoing {
            return Err(ConservationError {
                vertex,
                inflow: incoming,
                outflow: outgoing,
            });
        }
    }
    Ok(())
}
