//! 命令行入口：读取 DIMACS `min` 实例，求解并输出结果。
//!
//! `MCF_LOG` 环境变量控制日志级别（`MCF_LOG_STYLE` 控制着色）。
use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};

use RustMCF::analysis::{audit_conservation, certificate, solution_dot};
use RustMCF::net::io::{read_dimacs, write_json};
use RustMCF::solver::MinCostFlow;

fn make_options_parser() -> Command {
    Command::new("mcf")
        .about("Minimum-cost flow solver for DIMACS 'min' instances")
        .version("v0.1.0")
        .arg(
            Arg::new("input")
                .required(true)
                .value_name("FILE")
                .help("DIMACS minimum-cost-flow instance"),
        )
        .arg(
            Arg::new("limit")
                .short('l')
                .long("limit")
                .value_name("UNITS")
                .value_parser(clap::value_parser!(i64))
                .help("Flow limit; defaults to the instance's declared supply"),
        )
        .arg(
            Arg::new("verify")
                .long("verify")
                .action(ArgAction::SetTrue)
                .help("Check the duality certificate and flow conservation after solving"),
        )
        .arg(
            Arg::new("dot")
                .long("dot")
                .value_name("FILE")
                .help("Write the flow-carrying subgraph as Graphviz dot"),
        )
        .arg(
            Arg::new("report")
                .short('o')
                .long("report")
                .value_name("FILE")
                .help("Write a JSON solve report"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("Suppress the totals on stdout; exit status still reports failures"),
        )
}

fn main() -> Result<()> {
    if std::env::var("MCF_LOG").is_ok() {
        let e = env_logger::Env::new()
            .filter("MCF_LOG")
            .write_style("MCF_LOG_STYLE");
        env_logger::init_from_env(e);
    }

    let matches = make_options_parser().get_matches();
    let input = matches.get_one::<String>("input").expect("required");
    let problem = read_dimacs(input).with_context(|| format!("reading {input}"))?;

    problem.network.log_diagnostics(problem.source, problem.sink);
    let negative = problem
        .network
        .diagnose(problem.source, problem.sink)
        .negative_cost_edges
        > 0;
    let limit = matches
        .get_one::<i64>("limit")
        .copied()
        .unwrap_or(problem.quantity);

    let mut solver = if negative {
        MinCostFlow::with_negative_costs(problem.network, problem.source, problem.sink)
    } else {
        MinCostFlow::new(problem.network, problem.source, problem.sink)
    };
    solver.max_flow(limit);

    let quiet = matches.get_flag("quiet");
    if !quiet {
        println!("flow {} cost {}", solver.total_flow(), solver.total_cost());
        if solver.total_flow() < limit {
            println!(
                "requested {} units, only {} are feasible",
                limit,
                solver.total_flow()
            );
        }
    }

    if matches.get_flag("verify") {
        certificate(&solver)
            .check_exact()
            .context("duality certificate")?;
        audit_conservation(solver.network(), solver.source(), solver.sink())
            .context("conservation audit")?;
        if !quiet {
            println!("verified: duality certificate and conservation hold");
        }
    }

    if let Some(path) = matches.get_one::<String>("dot") {
        std::fs::write(path, solution_dot(solver.network()))
            .with_context(|| format!("writing {path}"))?;
    }

    if let Some(path) = matches.get_one::<String>("report") {
        write_json(path, &solver.report()).with_context(|| format!("writing {path}"))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parser_accepts_the_full_flag_set() {
        let matches = make_options_parser()
            .try_get_matches_from([
                "mcf",
                "instance.min",
                "--limit",
                "25",
                "--verify",
                "--dot",
                "out.dot",
                "--report",
                "out.json",
            ])
            .unwrap();
        assert_eq!(
            matches.get_one::<String>("input").map(String::as_str),
            Some("instance.min")
        );
        assert_eq!(matches.get_one::<i64>("limit").copied(), Some(25));
        assert!(matches.get_flag("verify"));
    }

    #[test]
    fn input_is_required() {
        assert!(make_options_parser().try_get_matches_from(["mcf"]).is_err());
    }
}
