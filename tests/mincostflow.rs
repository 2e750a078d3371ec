//! 整数费用的端到端检验：参考解算器对照、对偶证书与守恒审计。
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use RustMCF::analysis::{
    GeneratorConfig, NetworkGenerator, audit_conservation, certificate, min_cost_max_flow_spfa,
};
use RustMCF::net::io::parse_dimacs;
use RustMCF::net::{FlowNetwork, VertexId};
use RustMCF::solver::MinCostFlow;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn vertex(raw: u32) -> VertexId {
    VertexId::new(raw)
}

fn solve_to_exhaustion(
    network: FlowNetwork<i32, i64>,
    source: VertexId,
    sink: VertexId,
    negative: bool,
) -> MinCostFlow<i32, i64> {
    let mut solver = if negative {
        MinCostFlow::with_negative_costs(network, source, sink)
    } else {
        MinCostFlow::new(network, source, sink)
    };
    solver.max_flow(i32::MAX);
    solver
}

/// Regression for a historic seeding bug: no edge out of the source is
/// negative, yet the residual reverse arcs are, so a solver that mishandles
/// the Bellman-Ford seed computes the wrong cost here.
#[test]
fn negative_seed_regression() {
    init_logging();
    let mut net: FlowNetwork<i32, i64> = FlowNetwork::with_vertices(3);
    net.add_edge(vertex(1), vertex(0), 86, 58);
    net.add_edge(vertex(1), vertex(0), 82, 65);
    net.add_edge(vertex(2), vertex(1), 79, 100);
    net.add_edge(vertex(2), vertex(1), 90, 42);

    let reference = min_cost_max_flow_spfa(net.clone(), vertex(1), vertex(0));
    let solver = solve_to_exhaustion(net, vertex(1), vertex(0), true);

    assert_eq!(solver.total_flow(), 168);
    assert_eq!(solver.total_cost(), 86 * 58 + 82 * 65);
    assert_eq!(solver.total_flow(), reference.flow);
    assert_eq!(solver.total_cost(), reference.cost);
    certificate(&solver).check_exact().unwrap();
}

#[test]
fn disconnected_endpoints_yield_zero_totals() {
    init_logging();
    let mut net: FlowNetwork<i32, i64> = FlowNetwork::with_vertices(4);
    net.add_edge(vertex(0), vertex(1), 10, 1);
    net.add_edge(vertex(2), vertex(3), 10, 1);

    let solver = solve_to_exhaustion(net, vertex(0), vertex(3), false);
    assert_eq!(solver.total_flow(), 0);
    assert_eq!(solver.total_cost(), 0);
    certificate(&solver).check_exact().unwrap();
}

#[test]
fn exhausted_solver_stays_exhausted() {
    init_logging();
    let mut net: FlowNetwork<i32, i64> = FlowNetwork::with_vertices(2);
    net.add_edge(vertex(0), vertex(1), 9, 3);

    let mut solver = solve_to_exhaustion(net, vertex(0), vertex(1), false);
    let before = solver.totals();

    solver.max_flow(i32::MAX);
    assert_eq!(solver.single_flow(1), 0);
    assert_eq!(solver.totals(), before);
}

#[test]
fn conservation_holds_mid_solve() {
    init_logging();
    let mut generator = NetworkGenerator::from_seed(2024, GeneratorConfig::small());
    for _ in 0..100 {
        let instance = generator.integer_instance();
        let mut solver = MinCostFlow::new(instance.network, instance.source, instance.sink);
        // Arbitrary stop-and-go schedule; conservation must hold throughout.
        for quantum in [1, 3, 1, 7, 2] {
            solver.single_flow(quantum);
            audit_conservation(solver.network(), solver.source(), solver.sink()).unwrap();
        }
    }
}

#[test]
fn marginal_cost_never_decreases() {
    init_logging();
    let mut generator = NetworkGenerator::from_seed(99, GeneratorConfig::small());
    for _ in 0..100 {
        let instance = generator.integer_instance();
        let mut solver = MinCostFlow::new(instance.network, instance.source, instance.sink);
        let mut last = i64::MIN;
        while let Some(marginal) = solver.marginal_cost() {
            assert!(marginal >= last, "marginal {} after {}", marginal, last);
            last = marginal;
            solver.single_flow(1);
        }
    }
}

#[test]
fn stress_small_against_reference() {
    init_logging();
    let mut generator = NetworkGenerator::from_seed(1, GeneratorConfig::small());
    for round in 0..400 {
        let instance = generator.integer_instance();
        let reference =
            min_cost_max_flow_spfa(instance.network.clone(), instance.source, instance.sink);
        let solver =
            solve_to_exhaustion(instance.network, instance.source, instance.sink, false);

        assert_eq!(solver.total_flow(), reference.flow, "round {round}");
        assert_eq!(solver.total_cost(), reference.cost, "round {round}");
        certificate(&solver).check_exact().unwrap();
        audit_conservation(solver.network(), solver.source(), solver.sink()).unwrap();
    }
}

#[test]
fn stress_large_against_reference() {
    init_logging();
    let mut generator = NetworkGenerator::from_seed(2, GeneratorConfig::default());
    for round in 0..60 {
        let instance = generator.integer_instance();
        let reference =
            min_cost_max_flow_spfa(instance.network.clone(), instance.source, instance.sink);
        let solver =
            solve_to_exhaustion(instance.network, instance.source, instance.sink, false);

        assert_eq!(solver.total_flow(), reference.flow, "round {round}");
        assert_eq!(solver.total_cost(), reference.cost, "round {round}");
        certificate(&solver).check_exact().unwrap();
    }
}

/// Two-layer random graphs with negative second-hop costs. The first hop
/// always costs more than any second hop is negative, so every augmenting
/// path stays non-negative in total while the residual network is full of
/// negative arcs; the seeded solver must agree with the oracle.
#[test]
fn stress_negative_costs_on_layered_graphs() {
    init_logging();
    let mut rng = StdRng::seed_from_u64(77);
    for round in 0..200 {
        let mids = rng.random_range(1..=6usize);
        let n = mids + 2;
        let mut net: FlowNetwork<i32, i64> = FlowNetwork::with_vertices(n);
        let source = vertex(0);
        let sink = vertex(n as u32 - 1);
        for mid in 1..=mids {
            let mid = vertex(mid as u32);
            for _ in 0..rng.random_range(0..=2usize) {
                net.add_edge(source, mid, rng.random_range(0..=50), rng.random_range(30..=60i64));
            }
            for _ in 0..rng.random_range(0..=2usize) {
                net.add_edge(mid, sink, rng.random_range(0..=50), rng.random_range(-30..=30i64));
            }
        }

        let reference = min_cost_max_flow_spfa(net.clone(), source, sink);
        let solver = solve_to_exhaustion(net, source, sink, true);

        assert_eq!(solver.total_flow(), reference.flow, "round {round}");
        assert_eq!(solver.total_cost(), reference.cost, "round {round}");
        certificate(&solver).check_exact().unwrap();
    }
}

#[test]
fn limited_solve_pays_the_cheapest_units_first() {
    init_logging();
    let mut net: FlowNetwork<i32, i64> = FlowNetwork::with_vertices(2);
    net.add_edge(vertex(0), vertex(1), 5, 2);
    net.add_edge(vertex(0), vertex(1), 5, 9);

    let mut solver = MinCostFlow::new(net, vertex(0), vertex(1));
    solver.max_flow(7);
    assert_eq!(solver.total_flow(), 7);
    assert_eq!(solver.total_cost(), 5 * 2 + 2 * 9);
    certificate(&solver).check_exact().unwrap();
}

#[test]
fn dimacs_instance_solves_end_to_end() {
    init_logging();
    let input = "\
c relay vertex plus an expensive shortcut
p min 3 3
n 1 4
n 3 -4
a 1 2 0 3 5
a 2 3 0 3 5
a 1 3 0 2 20
";
    let problem = parse_dimacs(input).unwrap();
    let mut solver = MinCostFlow::new(problem.network, problem.source, problem.sink);
    solver.max_flow(problem.quantity);

    assert_eq!(solver.total_flow(), 4);
    // Three cheap relay units at 10 each, one shortcut unit at 20.
    assert_eq!(solver.total_cost(), 3 * 10 + 20);
    certificate(&solver).check_exact().unwrap();
}
