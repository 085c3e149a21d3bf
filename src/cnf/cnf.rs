use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Result, SatError};

/// Variable -> truth value. Keys are 1-based variable ids.
pub type Assignment = BTreeMap<u32, bool>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Lit {
    pub var: u32,
    pub sign: bool,
}

impl Lit {
    pub fn new(var: u32, sign: bool) -> Self {
        Self { var, sign }
    }

    /// Parses a signed DIMACS literal. Returns `None` for 0.
    pub fn from_dimacs(lit: i32) -> Option<Self> {
        if lit == 0 {
            return None;
        }
        Some(Self::new(lit.unsigned_abs(), lit > 0))
    }

    pub fn to_dimacs(self) -> i64 {
        let v = i64::from(self.var);
        if self.sign { v } else { -v }
    }

    /// True if this literal is satisfied by `value` for its variable.
    pub fn holds(self, value: bool) -> bool {
        value == self.sign
    }
}

/// Validates one DIMACS clause. `clause_index` is only used for error reporting.
pub fn parse_clause(clause: &[i32], clause_index: usize) -> Result<Vec<Lit>> {
    clause
        .iter()
        .enumerate()
        .map(|(position, &lit)| {
            Lit::from_dimacs(lit).ok_or(SatError::InvalidLiteral {
                clause_index,
                position,
            })
        })
        .collect()
}

/// Validates a whole batch before anything is returned, so callers can commit atomically.
pub fn parse_clauses(clauses: &[Vec<i32>]) -> Result<Vec<Vec<Lit>>> {
    clauses
        .iter()
        .enumerate()
        .map(|(i, c)| parse_clause(c, i))
        .collect()
}

/// Largest variable mentioned by `clauses`, or 0 when there is none.
pub fn max_variable(clauses: &[Vec<i32>]) -> u32 {
    clauses
        .iter()
        .flatten()
        .map(|lit| lit.unsigned_abs())
        .max()
        .unwrap_or(0)
}

/// Sorted set of variables mentioned by `clauses`.
pub fn variables(clauses: &[Vec<i32>]) -> Result<Vec<u32>> {
    let mut out = BTreeSet::new();
    for (i, clause) in clauses.iter().enumerate() {
        for lit in parse_clause(clause, i)? {
            out.insert(lit.var);
        }
    }
    Ok(out.into_iter().collect())
}

/// Dense clause store: every variable lies in `1..=num_vars`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cnf {
    pub num_vars: u32,
    pub clauses: Vec<Vec<Lit>>,
}

impl Cnf {
    pub fn new(num_vars: u32) -> Self {
        Self {
            num_vars,
            clauses: Vec::new(),
        }
    }

    pub fn add_clause(&mut self, clause: Vec<Lit>) {
        if let Some(max) = clause.iter().map(|l| l.var).max() {
            self.num_vars = self.num_vars.max(max);
        }
        self.clauses.push(clause);
    }

    pub fn eval_lit_partial(lit: Lit, assignment: &[Option<bool>]) -> Option<bool> {
        let var = lit.var as usize;
        if var >= assignment.len() {
            return None;
        }
        assignment[var].map(|v| lit.holds(v))
    }

    pub fn eval_clause_partial(clause: &[Lit], assignment: &[Option<bool>]) -> Option<bool> {
        let mut any_unknown = false;
        for &lit in clause {
            match Self::eval_lit_partial(lit, assignment) {
                Some(true) => return Some(true),
                Some(false) => {}
                None => any_unknown = true,
            }
        }
        if any_unknown { None } else { Some(false) }
    }

    pub fn eval_formula_partial(&self, assignment: &[Option<bool>]) -> Option<bool> {
        let mut all_true = true;
        for clause in &self.clauses {
            match Self::eval_clause_partial(clause, assignment) {
                Some(true) => {}
                Some(false) => return Some(false),
                None => all_true = false,
            }
        }
        if all_true { Some(true) } else { None }
    }

    /// Total evaluation against a dense model (`model[var]`, index 0 unused).
    pub fn is_satisfied_by(&self, model: &[bool]) -> bool {
        self.clauses.iter().all(|clause| {
            clause
                .iter()
                .any(|lit| model.get(lit.var as usize).is_some_and(|&v| lit.holds(v)))
        })
    }
}

/// Removes duplicate literals. Returns `None` if the clause contains both
/// polarities of a variable and is therefore always satisfied.
pub fn normalize_clause(mut clause: Vec<Lit>) -> Option<Vec<Lit>> {
    clause.sort_unstable();
    clause.dedup();
    let tautology = clause.windows(2).any(|w| w[0].var == w[1].var);
    if tautology { None } else { Some(clause) }
}
