use anyhow::{Result, bail};
use clap::{Parser, ValueEnum};

use incsat::check::HarnessConfig;
use incsat::check::differential::{DiffReport, run_differential};
use incsat::check::generate::GenConfig;
use incsat::solver::dpll_backend::DpllSolver;
use incsat::solver::varisat::VarisatSolver;

#[derive(Debug, Parser)]
#[command(name = "satcheck")]
#[command(about = "Differential check of incremental SAT sessions against brute force")]
struct Cli {
    #[arg(long, default_value_t = 10_000)]
    rounds: u64,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    #[arg(long, default_value_t = 10)]
    max_vars: u32,
    #[arg(long, default_value_t = 10)]
    max_clauses: usize,
    #[arg(long, default_value_t = 10)]
    max_lits: usize,
    #[arg(long, value_enum, default_value_t = Backend::Dpll)]
    backend: Backend,
    /// Print the full report as JSON instead of a summary line.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Backend {
    Dpll,
    Varisat,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let cfg = HarnessConfig {
        limits: GenConfig {
            max_vars: cli.max_vars,
            max_clauses: cli.max_clauses,
            max_lits: cli.max_lits,
        },
        rounds: cli.rounds,
        seed: cli.seed,
    };

    let report = match cli.backend {
        Backend::Dpll => run_differential(&cfg, DpllSolver::new)?,
        Backend::Varisat => run_differential(&cfg, VarisatSolver::new)?,
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }
    if !report.is_clean() {
        bail!(
            "{} discrepancies between {} and brute force",
            report.discrepancies.len(),
            report.backend
        );
    }
    Ok(())
}

fn print_summary(report: &DiffReport) {
    println!(
        "backend={} seed={} rounds={} sat={} unsat={} solver_ms={} discrepancies={}",
        report.backend,
        report.seed,
        report.rounds,
        report.sat,
        report.unsat,
        report.solver_time.as_millis(),
        report.discrepancies.len()
    );
    for d in &report.discrepancies {
        println!("round={} kind={:?} clauses={:?}", d.round, d.kind, d.clauses);
    }
}
