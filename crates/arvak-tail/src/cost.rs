//! Cost model and exhaustive state evaluation.
//!
//! `cost(x) = -(CR·x + mu * Σ_f (1 - (FR·x)_f)^2)`. The sign makes the
//! optimum a maximum. An assignment is a solution when every flight is
//! covered exactly once.

use ndarray::{Array1, Array2, ArrayView1, Axis};
use tracing::debug;

use crate::assignment::{assignment_matrix, Assignment};
use crate::error::{TailError, TailResult};
use crate::problem::TailAssignment;

fn check_width(problem: &TailAssignment, x: &Assignment) -> TailResult<()> {
    if x.len() != problem.num_resources() {
        return Err(TailError::InvalidBitstring {
            bitstring: x.to_bitstring(),
            reason: format!(
                "assignment has {} bits, problem has {} resources",
                x.len(),
                problem.num_resources()
            ),
        });
    }
    Ok(())
}

fn cost_of_vector(problem: &TailAssignment, x: ArrayView1<'_, f64>) -> f64 {
    let linear = problem.cr().dot(&x);
    let coverage = problem.fr().dot(&x);
    let penalty: f64 = coverage.iter().map(|c| (1.0 - c).powi(2)).sum();
    -(linear + problem.mu() * penalty)
}

fn is_solution_vector(problem: &TailAssignment, x: ArrayView1<'_, f64>) -> bool {
    problem.fr().dot(&x).iter().all(|&c| c == 1.0)
}

/// Cost of an assignment.
pub fn cost(problem: &TailAssignment, x: &Assignment) -> TailResult<f64> {
    check_width(problem, x)?;
    Ok(cost_of_vector(problem, x.as_vector().view()))
}

/// True iff every flight is covered exactly once.
pub fn is_solution(problem: &TailAssignment, x: &Assignment) -> TailResult<bool> {
    check_width(problem, x)?;
    Ok(is_solution_vector(problem, x.as_vector().view()))
}

/// Cost of an MSB-first backend bitstring.
pub fn cost_of_bitstring(problem: &TailAssignment, bitstring: &str) -> TailResult<f64> {
    let x = Assignment::from_bitstring(bitstring, problem.num_resources())?;
    cost(problem, &x)
}

/// Feasibility of an MSB-first backend bitstring.
pub fn is_solution_bitstring(problem: &TailAssignment, bitstring: &str) -> TailResult<bool> {
    let x = Assignment::from_bitstring(bitstring, problem.num_resources())?;
    is_solution(problem, &x)
}

/// Costs for every row of an `N x R` assignment matrix.
pub fn costs(problem: &TailAssignment, assignments: &Array2<f64>) -> TailResult<Array1<f64>> {
    check_matrix(problem, assignments)?;
    let linear = assignments.dot(problem.cr());
    // N x F coverage, one column per flight.
    let coverage = assignments.dot(&problem.fr().t());
    let penalty = coverage.mapv(|c| (1.0 - c).powi(2)).sum_axis(Axis(1));
    Ok(-(linear + penalty * problem.mu()))
}

/// Feasibility for every row of an `N x R` assignment matrix.
pub fn solutions(problem: &TailAssignment, assignments: &Array2<f64>) -> TailResult<Vec<bool>> {
    check_matrix(problem, assignments)?;
    let coverage = assignments.dot(&problem.fr().t());
    Ok(coverage
        .axis_iter(Axis(0))
        .map(|row| row.iter().all(|&c| c == 1.0))
        .collect())
}

fn check_matrix(problem: &TailAssignment, assignments: &Array2<f64>) -> TailResult<()> {
    if assignments.ncols() != problem.num_resources() {
        return Err(TailError::DimensionMismatch {
            fr_columns: problem.num_resources(),
            cr_len: assignments.ncols(),
        });
    }
    Ok(())
}

/// Cost and feasibility of all `2^R` assignments, indexed by basis state.
#[derive(Debug, Clone)]
pub struct StateTable {
    num_resources: usize,
    costs: Array1<f64>,
    feasible: Vec<bool>,
}

impl StateTable {
    /// Evaluate every assignment of `problem` in one batched pass.
    pub fn build(problem: &TailAssignment) -> TailResult<Self> {
        let matrix = assignment_matrix(problem.num_resources())?;
        let costs = costs(problem, &matrix)?;
        let feasible = solutions(problem, &matrix)?;
        let table = Self {
            num_resources: problem.num_resources(),
            costs,
            feasible,
        };
        debug!(
            "State table: {} states, {} solutions",
            table.len(),
            table.num_solutions()
        );
        Ok(table)
    }

    /// Number of states (`2^R`).
    pub fn len(&self) -> usize {
        self.costs.len()
    }

    /// Always false for a built table.
    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    /// Number of resources the table was built for.
    pub fn num_resources(&self) -> usize {
        self.num_resources
    }

    /// Costs by state index.
    pub fn costs(&self) -> &Array1<f64> {
        &self.costs
    }

    /// Feasibility by state index.
    pub fn feasible(&self) -> &[bool] {
        &self.feasible
    }

    /// Feasibility as a 0/1 vector for dot products.
    pub fn feasibility_vector(&self) -> Array1<f64> {
        self.feasible
            .iter()
            .map(|&f| if f { 1.0 } else { 0.0 })
            .collect()
    }

    /// Number of exact covers.
    pub fn num_solutions(&self) -> usize {
        self.feasible.iter().filter(|&&f| f).count()
    }

    /// Index and cost of the best feasible state, if any.
    pub fn best_solution(&self) -> Option<(usize, f64)> {
        self.costs
            .iter()
            .zip(&self.feasible)
            .enumerate()
            .filter(|(_, (_, f))| **f)
            .map(|(i, (&c, _))| (i, c))
            .fold(None, |best, (i, c)| match best {
                Some((_, b)) if b >= c => best,
                _ => Some((i, c)),
            })
    }
}

/// Exhaustive solution of a small instance.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceSolution {
    /// Number of exact covers.
    pub num_solutions: usize,
    /// Best exact cover and its cost, if any exists.
    pub best: Option<(Assignment, f64)>,
    /// Highest cost over all assignments, feasible or not.
    pub optimum: f64,
}

impl ReferenceSolution {
    /// Enumerate every assignment of `problem`.
    pub fn solve(problem: &TailAssignment) -> TailResult<Self> {
        let table = StateTable::build(problem)?;
        let best = table
            .best_solution()
            .map(|(i, c)| (Assignment::from_index(i, problem.num_resources()), c));
        let optimum = table
            .costs()
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        Ok(Self {
            num_solutions: table.num_solutions(),
            best,
            optimum,
        })
    }
}
