//! Incremental CNF-SAT solving sessions with a brute-force differential checker.

pub mod check;
pub mod cnf;
pub mod error;
pub mod sat;
pub mod solver;

pub use error::{Result, SatError};
