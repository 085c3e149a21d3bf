use std::time::Instant;

use indexmap::IndexSet;

use crate::cnf::cnf::{Assignment, Cnf, Lit, normalize_clause};
use crate::sat::dpll::{SatResult, solve_with_stats};
use crate::solver::{IncrementalSolver, SolveResult, SolverStats};

/// Session backed by the in-crate DPLL search.
///
/// External variable ids are registered on first sight and mapped onto a
/// dense range, so a clause mentioning variable 1_000_000 does not allocate
/// a million slots.
#[derive(Debug, Clone)]
pub struct DpllSolver {
    vars: IndexSet<u32>,
    cnf: Cnf,
    last_result: Option<SolveResult>,
    last_model: Option<Vec<bool>>,
    stats: SolverStats,
}

impl DpllSolver {
    pub fn new() -> Self {
        Self {
            vars: IndexSet::new(),
            cnf: Cnf::new(0),
            last_result: None,
            last_model: None,
            stats: SolverStats::default(),
        }
    }

    /// Number of distinct variables seen so far.
    pub fn num_vars(&self) -> usize {
        self.vars.len()
    }

    /// Number of stored clauses. Tautologies are not stored.
    pub fn num_clauses(&self) -> usize {
        self.cnf.clauses.len()
    }

    /// The model over exactly the registered variables, if the last solve was satisfiable.
    pub fn model(&self) -> Option<Assignment> {
        let model = self.last_model.as_ref()?;
        self.vars
            .iter()
            .enumerate()
            .map(|(idx, &var)| model.get(idx + 1).map(|&value| (var, value)))
            .collect()
    }

    fn dense_lit(&mut self, lit: Lit) -> Lit {
        let (idx, _) = self.vars.insert_full(lit.var);
        Lit::new(idx as u32 + 1, lit.sign)
    }
}

impl Default for DpllSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl IncrementalSolver for DpllSolver {
    fn add_lits(&mut self, clause: Vec<Lit>) {
        let dense = clause
            .into_iter()
            .map(|lit| self.dense_lit(lit))
            .collect::<Vec<_>>();
        self.cnf.num_vars = self.vars.len() as u32;
        self.last_result = None;
        self.last_model = None;
        match normalize_clause(dense) {
            Some(c) => self.cnf.add_clause(c),
            None => log::trace!("skipping tautological clause"),
        }
    }

    fn solve(&mut self) -> SolveResult {
        self.stats.solve_calls += 1;
        let start = Instant::now();
        let (result, search) = solve_with_stats(&self.cnf);
        self.stats.last_solve_time = start.elapsed();
        self.stats.decisions += search.decisions;
        self.stats.propagations += search.propagations;
        self.stats.conflicts += search.conflicts;

        let verdict = match result {
            SatResult::Sat(model) => {
                debug_assert!(self.cnf.is_satisfied_by(&model));
                self.last_model = Some(model);
                SolveResult::Sat
            }
            SatResult::Unsat => {
                self.last_model = None;
                SolveResult::Unsat
            }
        };
        log::debug!(
            "dpll: {:?} over {} vars / {} clauses ({} decisions, {} conflicts, {:?})",
            verdict,
            self.vars.len(),
            self.cnf.clauses.len(),
            search.decisions,
            search.conflicts,
            self.stats.last_solve_time
        );
        self.last_result = Some(verdict);
        verdict
    }

    fn last_result(&self) -> Option<SolveResult> {
        self.last_result
    }

    fn model_value(&self, var: u32) -> Option<bool> {
        let idx = self.vars.get_index_of(&var)?;
        self.last_model.as_ref().and_then(|m| m.get(idx + 1).copied())
    }

    fn stats(&self) -> SolverStats {
        self.stats
    }

    fn backend_name(&self) -> &'static str {
        "dpll"
    }
}
