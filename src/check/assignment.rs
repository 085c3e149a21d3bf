use crate::cnf::cnf::Assignment;
use crate::error::{Result, SatError};

/// True if every clause has at least one literal made true by `assignment`.
///
/// A literal whose variable is absent from `assignment` does not count as true.
pub fn check_satisfiable(assignment: &Assignment, clauses: &[Vec<i32>]) -> bool {
    clauses.iter().all(|clause| {
        clause.iter().any(|&lit| {
            assignment
                .get(&lit.unsigned_abs())
                .is_some_and(|&value| value == (lit > 0))
        })
    })
}

/// Signed-literal form of an assignment, ordered by variable.
pub fn to_compact(assignment: &Assignment) -> Result<Vec<i64>> {
    assignment
        .iter()
        .map(|(&var, &value)| {
            if var == 0 {
                return Err(SatError::InvalidVariable(0));
            }
            let v = i64::from(var);
            Ok(if value { v } else { -v })
        })
        .collect()
}

/// Inverse of [`to_compact`]. Later literals for the same variable win.
pub fn from_compact(compact: &[i64]) -> Result<Assignment> {
    compact
        .iter()
        .map(|&lit| match u32::try_from(lit.unsigned_abs()) {
            Ok(var) if var != 0 => Ok((var, lit > 0)),
            _ => Err(SatError::InvalidVariable(lit)),
        })
        .collect()
}
