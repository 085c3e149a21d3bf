//! Incremental solving sessions.
//!
//! A session accumulates clauses (there is no retraction) and answers
//! `solve()` over everything added so far. Clauses use the DIMACS literal
//! convention: a nonzero `i32` whose magnitude is the 1-based variable and
//! whose sign is the polarity.

pub mod dpll_backend;
pub mod varisat;

use std::time::Duration;

use crate::cnf::cnf::{Lit, parse_clause, parse_clauses};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveResult {
    Sat,
    Unsat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolverStats {
    pub solve_calls: usize,
    pub decisions: usize,
    pub propagations: usize,
    pub conflicts: usize,
    /// Wall time of the most recent `solve()`.
    pub last_solve_time: Duration,
}

pub trait IncrementalSolver {
    /// Commits a clause whose literals are already validated.
    fn add_lits(&mut self, clause: Vec<Lit>);

    fn solve(&mut self) -> SolveResult;

    /// Verdict of the last `solve()`, or `None` if the store changed since
    /// (or was never solved).
    fn last_result(&self) -> Option<SolveResult>;

    /// Value of `var` in the current model. `None` without a model or for
    /// variables no clause mentions.
    fn model_value(&self, var: u32) -> Option<bool>;

    fn stats(&self) -> SolverStats;

    fn backend_name(&self) -> &'static str;

    /// Fails with `InvalidLiteral` on a 0 literal; the store is left untouched.
    fn add_clause(&mut self, clause: &[i32]) -> Result<()> {
        let lits = parse_clause(clause, 0)?;
        self.add_lits(lits);
        Ok(())
    }

    /// All-or-nothing: the whole batch is validated before any clause is committed.
    fn add_clauses(&mut self, clauses: &[Vec<i32>]) -> Result<()> {
        let parsed = parse_clauses(clauses)?;
        for lits in parsed {
            self.add_lits(lits);
        }
        Ok(())
    }

    /// Truth values of variables `1..=max_var` (index `i - 1` holds variable `i`).
    /// `None` unless the last solve was satisfiable. Unmentioned variables read as false.
    fn result(&self, max_var: u32) -> Option<Vec<bool>> {
        if self.last_result() != Some(SolveResult::Sat) {
            return None;
        }
        Some(
            (1..=max_var)
                .map(|v| self.model_value(v).unwrap_or(false))
                .collect(),
        )
    }

    /// Same as [`IncrementalSolver::result`] in signed form: `i` if true, `-i` if false.
    fn compact_result(&self, max_var: u32) -> Option<Vec<i64>> {
        let values = self.result(max_var)?;
        Some(
            values
                .into_iter()
                .zip(1..=i64::from(max_var))
                .map(|(value, var)| if value { var } else { -var })
                .collect(),
        )
    }
}
