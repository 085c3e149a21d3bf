use std::time::Instant;

use indexmap::IndexSet;
use varisat::ExtendFormula;

use crate::cnf::cnf::Lit;
use crate::solver::{IncrementalSolver, SolveResult, SolverStats};

/// Session delegating to the `varisat` CDCL solver. Used as an independent
/// oracle next to [`crate::solver::dpll_backend::DpllSolver`].
pub struct VarisatSolver {
    inner: varisat::Solver<'static>,
    names: IndexSet<u32>,
    vars: Vec<varisat::Var>,
    last_result: Option<SolveResult>,
    last_model: Option<Vec<bool>>,
    stats: SolverStats,
}

impl VarisatSolver {
    pub fn new() -> Self {
        Self {
            inner: varisat::Solver::new(),
            names: IndexSet::new(),
            vars: Vec::new(),
            last_result: None,
            last_model: None,
            stats: SolverStats::default(),
        }
    }

    fn to_lit(&mut self, lit: Lit) -> varisat::Lit {
        let (idx, fresh) = self.names.insert_full(lit.var);
        if fresh {
            let v = self.inner.new_var();
            self.vars.push(v);
        }
        varisat::Lit::from_var(self.vars[idx], lit.sign)
    }

    fn inner_var_count(&self) -> usize {
        self.vars.iter().map(|v| v.index() + 1).max().unwrap_or(0)
    }
}

impl Default for VarisatSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl IncrementalSolver for VarisatSolver {
    fn add_lits(&mut self, clause: Vec<Lit>) {
        let lits = clause
            .into_iter()
            .map(|x| self.to_lit(x))
            .collect::<Vec<_>>();
        self.inner.add_clause(&lits);
        self.last_result = None;
        self.last_model = None;
    }

    fn solve(&mut self) -> SolveResult {
        self.stats.solve_calls += 1;
        let start = Instant::now();
        let outcome = self.inner.solve();
        self.stats.last_solve_time = start.elapsed();
        let verdict = match outcome {
            Ok(true) => {
                let mut values = vec![false; self.inner_var_count()];
                for lit in self.inner.model().unwrap_or_default() {
                    if let Some(slot) = values.get_mut(lit.var().index()) {
                        *slot = lit.is_positive();
                    }
                }
                self.last_model = Some(values);
                SolveResult::Sat
            }
            Ok(false) => {
                self.last_model = None;
                SolveResult::Unsat
            }
            Err(err) => {
                // only reachable with proofs or interruption, neither of which is configured
                log::warn!("varisat: solve failed: {}", err);
                self.last_model = None;
                SolveResult::Unsat
            }
        };
        log::debug!(
            "varisat: {:?} over {} vars ({:?})",
            verdict,
            self.names.len(),
            self.stats.last_solve_time
        );
        self.last_result = Some(verdict);
        verdict
    }

    fn last_result(&self) -> Option<SolveResult> {
        self.last_result
    }

    fn model_value(&self, var: u32) -> Option<bool> {
        let idx = self.names.get_index_of(&var)?;
        let model = self.last_model.as_ref()?;
        model.get(self.vars[idx].index()).copied()
    }

    fn stats(&self) -> SolverStats {
        self.stats
    }

    fn backend_name(&self) -> &'static str {
        "varisat"
    }
}
