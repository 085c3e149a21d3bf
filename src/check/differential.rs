use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::check::HarnessConfig;
use crate::check::assignment::{check_satisfiable, from_compact};
use crate::check::brute_force::{Enumerate, brute_force};
use crate::check::generate::{instance_rng, random_clauses};
use crate::cnf::cnf::max_variable;
use crate::solver::{IncrementalSolver, SolveResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DiscrepancyKind {
    /// Reported SAT but produced no model.
    MissingModel,
    /// Reported SAT with a model that falsifies some clause.
    BadModel,
    /// Reported UNSAT while brute force found a model.
    MissedModel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Discrepancy {
    pub round: u64,
    pub kind: DiscrepancyKind,
    pub clauses: Vec<Vec<i32>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffReport {
    pub backend: String,
    pub seed: u64,
    pub rounds: u64,
    pub sat: u64,
    pub unsat: u64,
    pub solver_time: Duration,
    pub discrepancies: Vec<Discrepancy>,
}

impl DiffReport {
    pub fn is_clean(&self) -> bool {
        self.discrepancies.is_empty()
    }
}

/// Cross-checks one verdict for `clauses`. Returns the discrepancy, if any.
pub fn check_instance<S: IncrementalSolver + ?Sized>(
    solver: &mut S,
    clauses: &[Vec<i32>],
) -> Result<(SolveResult, Option<DiscrepancyKind>)> {
    solver.add_clauses(clauses)?;
    let verdict = solver.solve();
    let max_var = max_variable(clauses);

    let issue = match verdict {
        SolveResult::Sat => match solver.compact_result(max_var) {
            None => Some(DiscrepancyKind::MissingModel),
            Some(compact) => {
                let assignment = from_compact(&compact)?;
                if check_satisfiable(&assignment, clauses) {
                    None
                } else {
                    Some(DiscrepancyKind::BadModel)
                }
            }
        },
        SolveResult::Unsat => {
            let found = brute_force(clauses, Enumerate::First)?;
            if found.is_empty() {
                None
            } else {
                Some(DiscrepancyKind::MissedModel)
            }
        }
    };
    Ok((verdict, issue))
}

/// Runs `cfg.rounds` random instances, each on a fresh session from `make_solver`.
///
/// Instance `round` is generated from `instance_rng(cfg.seed, round)`, so a
/// reported discrepancy can be replayed on its own.
pub fn run_differential<S, F>(cfg: &HarnessConfig, mut make_solver: F) -> Result<DiffReport>
where
    S: IncrementalSolver,
    F: FnMut() -> S,
{
    cfg.validate()?;
    let mut report = DiffReport {
        backend: String::new(),
        seed: cfg.seed,
        rounds: 0,
        sat: 0,
        unsat: 0,
        solver_time: Duration::ZERO,
        discrepancies: Vec::new(),
    };

    for round in 0..cfg.rounds {
        let mut rng = instance_rng(cfg.seed, round);
        let clauses = random_clauses(&cfg.limits, &mut rng)?;

        let mut solver = make_solver();
        if report.backend.is_empty() {
            report.backend = solver.backend_name().to_string();
        }
        let (verdict, issue) = check_instance(&mut solver, &clauses)
            .with_context(|| format!("round {round} (seed {})", cfg.seed))?;
        report.solver_time += solver.stats().last_solve_time;

        report.rounds += 1;
        match verdict {
            SolveResult::Sat => report.sat += 1,
            SolveResult::Unsat => report.unsat += 1,
        }
        if let Some(kind) = issue {
            log::warn!("round {}: {:?} on {:?}", round, kind, clauses);
            report.discrepancies.push(Discrepancy {
                round,
                kind,
                clauses,
            });
        }
    }

    log::info!(
        "{}: {} rounds, {} sat, {} unsat, {} discrepancies",
        report.backend,
        report.rounds,
        report.sat,
        report.unsat,
        report.discrepancies.len()
    );
    Ok(report)
}
