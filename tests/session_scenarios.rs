use std::collections::BTreeMap;

use incsat::SatError;
use incsat::solver::dpll_backend::DpllSolver;
use incsat::solver::{IncrementalSolver, SolveResult};

fn session(clauses: &[Vec<i32>]) -> DpllSolver {
    let mut solver = DpllSolver::new();
    solver.add_clauses(clauses).expect("valid clauses");
    solver
}

#[test]
fn unit_forces_second_literal() {
    let mut solver = session(&[vec![1, 2], vec![-1]]);
    assert_eq!(solver.solve(), SolveResult::Sat);
    assert_eq!(solver.result(2), Some(vec![false, true]));
    assert_eq!(solver.compact_result(2), Some(vec![-1, 2]));
    assert_eq!(solver.model(), Some(BTreeMap::from([(1, false), (2, true)])));
}

#[test]
fn contradictory_units_are_unsat() {
    let mut solver = session(&[vec![1], vec![-1]]);
    assert_eq!(solver.solve(), SolveResult::Unsat);
    assert_eq!(solver.result(1), None);
    assert_eq!(solver.compact_result(1), None);
    assert_eq!(solver.model(), None);
}

#[test]
fn exactly_one_of_three() {
    let mut solver = session(&[vec![1, 2, 3], vec![-1, -2], vec![-1, -3], vec![-2, -3]]);
    assert_eq!(solver.solve(), SolveResult::Sat);
    let values = solver.result(3).expect("model");
    assert_eq!(values.iter().filter(|&&v| v).count(), 1);
}

#[test]
fn empty_formula_is_sat() {
    let mut solver = DpllSolver::new();
    assert_eq!(solver.solve(), SolveResult::Sat);
    assert_eq!(solver.result(0), Some(Vec::new()));
    assert_eq!(solver.model(), Some(BTreeMap::new()));
}

#[test]
fn empty_clause_is_unsat_regardless_of_others() {
    let mut solver = session(&[vec![1, 2], vec![], vec![3]]);
    assert_eq!(solver.solve(), SolveResult::Unsat);
}

#[test]
fn tautology_is_accepted_and_registers_its_variable() {
    let mut solver = session(&[vec![1, -1]]);
    assert_eq!(solver.num_clauses(), 0);
    assert_eq!(solver.num_vars(), 1);
    assert_eq!(solver.solve(), SolveResult::Sat);
    let model = solver.model().expect("model");
    assert!(model.contains_key(&1));
}

#[test]
fn zero_literal_is_rejected_without_side_effects() {
    let mut solver = session(&[vec![1]]);
    assert_eq!(solver.solve(), SolveResult::Sat);

    let err = solver.add_clause(&[2, 0]).expect_err("0 must be rejected");
    assert_eq!(
        err,
        SatError::InvalidLiteral {
            clause_index: 0,
            position: 1
        }
    );
    assert_eq!(solver.num_clauses(), 1);
    assert_eq!(solver.num_vars(), 1);
    // the previous verdict still describes the store
    assert_eq!(solver.last_result(), Some(SolveResult::Sat));

    assert!(matches!(
        solver.add_clause(&[0]),
        Err(SatError::InvalidLiteral { .. })
    ));
}

#[test]
fn failing_batch_commits_nothing() {
    let mut solver = DpllSolver::new();
    let err = solver
        .add_clauses(&[vec![1], vec![2, 0], vec![-1]])
        .expect_err("batch contains 0");
    assert_eq!(
        err,
        SatError::InvalidLiteral {
            clause_index: 1,
            position: 1
        }
    );
    assert_eq!(solver.num_clauses(), 0);
    assert_eq!(solver.num_vars(), 0);
    assert_eq!(solver.solve(), SolveResult::Sat);
}

#[test]
fn result_is_absent_before_solve_and_after_new_clauses() {
    let mut solver = session(&[vec![1]]);
    assert_eq!(solver.last_result(), None);
    assert_eq!(solver.result(1), None);

    solver.solve();
    assert_eq!(solver.result(1), Some(vec![true]));

    solver.add_clause(&[2]).expect("add");
    assert_eq!(solver.last_result(), None);
    assert_eq!(solver.result(2), None);
    assert_eq!(solver.model_value(1), None);
}

#[test]
fn clauses_accumulate_across_solves() {
    let mut solver = session(&[vec![1, 2]]);
    assert_eq!(solver.solve(), SolveResult::Sat);

    solver.add_clause(&[-1]).expect("add");
    assert_eq!(solver.solve(), SolveResult::Sat);
    assert_eq!(solver.result(2), Some(vec![false, true]));

    solver.add_clause(&[-2]).expect("add");
    assert_eq!(solver.solve(), SolveResult::Unsat);

    // monotone: nothing brings it back
    solver.add_clause(&[1, 2, 3]).expect("add");
    assert_eq!(solver.solve(), SolveResult::Unsat);
    assert_eq!(solver.stats().solve_calls, 4);
}

#[test]
fn solve_is_idempotent() {
    let mut solver = session(&[vec![1, -2, 3], vec![-1, 2], vec![-3, -1], vec![2, 3]]);
    let first = solver.solve();
    let first_model = solver.result(3);
    let second = solver.solve();
    assert_eq!(first, second);
    assert_eq!(first_model, solver.result(3));
}

#[test]
fn sparse_variable_ids() {
    let mut solver = session(&[vec![1_000_000], vec![-7, 1_000_000]]);
    assert_eq!(solver.num_vars(), 2);
    assert_eq!(solver.solve(), SolveResult::Sat);
    assert_eq!(solver.model_value(1_000_000), Some(true));
    assert_eq!(solver.model_value(3), None);
    // unmentioned variables read as false
    assert_eq!(solver.result(3), Some(vec![false, false, false]));
}

#[test]
fn extreme_literal_is_a_valid_variable() {
    let mut solver = session(&[vec![i32::MIN], vec![i32::MAX]]);
    assert_eq!(solver.solve(), SolveResult::Sat);
    assert_eq!(solver.model_value(1u32 << 31), Some(false));
    assert_eq!(solver.model_value(i32::MAX as u32), Some(true));
}

#[test]
fn duplicate_literals_collapse() {
    let mut solver = session(&[vec![2, 2, 2], vec![-2, -2, 1]]);
    assert_eq!(solver.solve(), SolveResult::Sat);
    assert_eq!(solver.result(2), Some(vec![true, true]));
}

#[test]
fn stats_track_search_work() {
    let mut solver = session(&[vec![1, 2], vec![1, -2], vec![-1, 2], vec![-1, -2]]);
    assert_eq!(solver.solve(), SolveResult::Unsat);
    let stats = solver.stats();
    assert_eq!(stats.solve_calls, 1);
    assert!(stats.decisions >= 1);
    assert!(stats.conflicts >= 2);
    assert_eq!(solver.backend_name(), "dpll");
}

#[test]
fn model_tracks_variables_registered_between_solves() {
    let mut solver = session(&[vec![4]]);
    assert_eq!(solver.solve(), SolveResult::Sat);
    assert_eq!(solver.model(), Some(BTreeMap::from([(4, true)])));

    solver.add_clause(&[-9, -4]).expect("add");
    assert_eq!(solver.model(), None);
    assert_eq!(solver.solve(), SolveResult::Sat);
    assert_eq!(solver.model(), Some(BTreeMap::from([(4, true), (9, false)])));
}
