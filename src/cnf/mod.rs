#[allow(clippy::module_inception)]
pub mod cnf;

pub use cnf::{Assignment, Cnf, Lit};
