use crate::check::assignment::check_satisfiable;
use crate::cnf::cnf::{Assignment, variables};
use crate::error::{Result, SatError};

/// Enumeration is `2^n`; anything above this is refused.
pub const BRUTE_FORCE_MAX_VARS: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enumerate {
    /// Stop at the first satisfying assignment.
    First,
    All,
}

/// Every satisfying assignment over the variables of `clauses` (or only the first).
///
/// Variables are sorted ascending and assignments are visited in binary
/// counting order with the smallest variable as the most significant bit,
/// so the all-false assignment comes first. A formula without variables has
/// exactly one (empty) assignment, which satisfies it unless it contains an
/// empty clause.
pub fn brute_force(clauses: &[Vec<i32>], mode: Enumerate) -> Result<Vec<Assignment>> {
    let vars = variables(clauses)?;
    let n = vars.len();
    if n > BRUTE_FORCE_MAX_VARS {
        return Err(SatError::TooManyVariables {
            count: n,
            limit: BRUTE_FORCE_MAX_VARS,
        });
    }

    let mut solutions = Vec::new();
    for bits in 0u64..(1u64 << n) {
        let assignment = vars
            .iter()
            .enumerate()
            .map(|(i, &var)| (var, (bits >> (n - 1 - i)) & 1 == 1))
            .collect::<Assignment>();
        if check_satisfiable(&assignment, clauses) {
            solutions.push(assignment);
            if mode == Enumerate::First {
                break;
            }
        }
    }
    Ok(solutions)
}

/// Number of satisfying assignments over the variables of `clauses`.
pub fn count_models(clauses: &[Vec<i32>]) -> Result<usize> {
    brute_force(clauses, Enumerate::All).map(|all| all.len())
}
