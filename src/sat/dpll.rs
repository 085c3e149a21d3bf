use crate::cnf::cnf::{Cnf, Lit};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SatResult {
    /// Dense model, `model[var]` for `var` in `1..=num_vars`; index 0 is unused.
    Sat(Vec<bool>),
    Unsat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub decisions: usize,
    pub propagations: usize,
    pub conflicts: usize,
}

pub fn solve_with_stats(cnf: &Cnf) -> (SatResult, SearchStats) {
    let mut search = Search::new(cnf);
    let sat = search.run();
    let result = if sat {
        // fill free vars deterministically
        let model = search
            .values
            .iter()
            .map(|v| v.unwrap_or(false))
            .collect::<Vec<_>>();
        SatResult::Sat(model)
    } else {
        SatResult::Unsat
    };
    (result, search.stats)
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    var: u32,
    trail_len: usize,
    flipped: bool,
}

/// Chronological backtracking search. Decisions branch `true` first, then `false`.
struct Search<'a> {
    cnf: &'a Cnf,
    values: Vec<Option<bool>>,
    trail: Vec<u32>,
    frames: Vec<Frame>,
    stats: SearchStats,
}

impl<'a> Search<'a> {
    fn new(cnf: &'a Cnf) -> Self {
        Self {
            cnf,
            values: vec![None; cnf.num_vars as usize + 1],
            trail: Vec::new(),
            frames: Vec::new(),
            stats: SearchStats::default(),
        }
    }

    fn run(&mut self) -> bool {
        loop {
            if self.unit_propagate() {
                if self.cnf.eval_formula_partial(&self.values) == Some(true) {
                    return true;
                }
                let Some(var) = self.first_unassigned() else {
                    return true;
                };
                self.stats.decisions += 1;
                log::trace!("decide x{} = true at depth {}", var, self.frames.len());
                self.frames.push(Frame {
                    var,
                    trail_len: self.trail.len(),
                    flipped: false,
                });
                self.assign(Lit::new(var, true));
            } else {
                self.stats.conflicts += 1;
                if !self.backtrack() {
                    return false;
                }
            }
        }
    }

    /// Undoes frames until one still has an untried branch, then takes it.
    /// Returns false once every branch is exhausted.
    fn backtrack(&mut self) -> bool {
        while let Some(frame) = self.frames.pop() {
            self.undo_to(frame.trail_len);
            if !frame.flipped {
                log::trace!("backtrack: x{} = false at depth {}", frame.var, self.frames.len());
                self.frames.push(Frame {
                    flipped: true,
                    ..frame
                });
                self.assign(Lit::new(frame.var, false));
                return true;
            }
        }
        false
    }

    fn assign(&mut self, lit: Lit) {
        self.values[lit.var as usize] = Some(lit.sign);
        self.trail.push(lit.var);
    }

    fn undo_to(&mut self, len: usize) {
        for var in self.trail.drain(len..) {
            self.values[var as usize] = None;
        }
    }

    /// Returns false on conflict (some clause has every literal false).
    fn unit_propagate(&mut self) -> bool {
        let cnf = self.cnf;
        loop {
            let mut changed = false;

            for clause in &cnf.clauses {
                let mut open_count = 0usize;
                let mut last_open = None;
                let mut has_true = false;

                for &lit in clause {
                    match Cnf::eval_lit_partial(lit, &self.values) {
                        Some(true) => {
                            has_true = true;
                            break;
                        }
                        Some(false) => {}
                        None => {
                            open_count += 1;
                            last_open = Some(lit);
                        }
                    }
                }

                if has_true {
                    continue;
                }
                match (open_count, last_open) {
                    (0, _) => return false,
                    (1, Some(unit)) => {
                        self.assign(unit);
                        self.stats.propagations += 1;
                        changed = true;
                    }
                    _ => {}
                }
            }

            if !changed {
                return true;
            }
        }
    }

    fn first_unassigned(&self) -> Option<u32> {
        (1..self.values.len())
            .find(|&i| self.values[i].is_none())
            .map(|i| i as u32)
    }
}
