use thiserror::Error;

pub type Result<T> = std::result::Result<T, SatError>;

/// Contract violations reported at the call site.
///
/// Unsatisfiability is never an error; it is a normal [`crate::solver::SolveResult`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SatError {
    /// A clause contained the literal 0.
    #[error("literal 0 is not allowed (clause {clause_index}, position {position})")]
    InvalidLiteral { clause_index: usize, position: usize },

    /// An assignment helper was given variable 0 or a magnitude beyond `u32::MAX`.
    #[error("invalid variable {0}: variables are positive integers")]
    InvalidVariable(i64),

    #[error("brute force over {count} variables refused (limit {limit})")]
    TooManyVariables { count: usize, limit: usize },
}
