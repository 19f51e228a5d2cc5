//! Ising encoding of the tail-assignment cost and its gate translation.
//!
//! Substituting `x_r = (1 - z_r) / 2` into the cost gives local fields
//! `h_r` and pairwise couplings `J_{r,r'}`. Local fields become `Rz`
//! rotations and couplings become `CX · Rz · CX` on the pair.

use arvak_ir::{Circuit, QubitId};
use ndarray::Axis;
use tracing::debug;

use crate::error::{TailError, TailResult};
use crate::problem::TailAssignment;

/// Local field from the linear cost term: `0.5 * CR[r]`.
pub fn cost_field(problem: &TailAssignment, r: usize) -> f64 {
    0.5 * problem.cr()[r]
}

/// Local field from the coverage penalty: `0.5 * mu * FR[:, r] · (rowsum - 2)`.
pub fn constraint_field(problem: &TailAssignment, r: usize) -> f64 {
    0.5 * problem.mu() * penalty_overlap(problem, r)
}

/// Pre-summed local field used by the combined Hamiltonian layer.
pub fn combined_field(problem: &TailAssignment, r: usize) -> f64 {
    cost_field(problem, r) + constraint_field(problem, r)
}

/// Coupling `0.5 * FR[:, r] · FR[:, r_]`; symmetric in its arguments.
pub fn coupling(problem: &TailAssignment, r: usize, r_: usize) -> f64 {
    let fr = problem.fr();
    let overlap = fr
        .column(r)
        .iter()
        .zip(fr.column(r_).iter())
        .fold(0.0, |acc, (a, b)| acc + a * b);
    0.5 * overlap
}

/// All unordered pairs `(r, r_, J)` with `r < r_`, in gate order.
pub fn couplings(problem: &TailAssignment) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
    let n = problem.num_resources();
    (0..n).flat_map(move |r| ((r + 1)..n).map(move |r_| (r, r_, coupling(problem, r, r_))))
}

fn penalty_overlap(problem: &TailAssignment, r: usize) -> f64 {
    problem
        .fr()
        .index_axis(Axis(1), r)
        .iter()
        .zip(problem.row_sums().iter())
        .fold(0.0, |acc, (a, s)| acc + a * (s - 2.0))
}

/// Appends Hamiltonian layers of a problem to circuits.
#[derive(Debug, Clone, Copy)]
pub struct Translator<'a> {
    problem: &'a TailAssignment,
}

impl<'a> Translator<'a> {
    /// Create a translator for `problem`.
    pub fn new(problem: &'a TailAssignment) -> Self {
        Self { problem }
    }

    /// The problem being translated.
    pub fn problem(&self) -> &'a TailAssignment {
        self.problem
    }

    /// Linear cost term only: `Rz(angle * 0.5 * CR[r])` on every qubit.
    pub fn apply_cost(&self, circuit: &mut Circuit, angle: f64) -> TailResult<()> {
        self.check_width(circuit)?;
        for r in 0..self.problem.num_resources() {
            circuit.rz(angle * cost_field(self.problem, r), qubit(r))?;
        }
        debug!("Applied cost layer (angle={angle})");
        Ok(())
    }

    /// Coverage penalty only: constraint fields and all pair couplings.
    pub fn apply_exco(&self, circuit: &mut Circuit, angle: f64) -> TailResult<()> {
        self.check_width(circuit)?;
        self.apply_fields_and_couplings(circuit, angle, |r| constraint_field(self.problem, r))?;
        debug!("Applied exact-cover layer (angle={angle})");
        Ok(())
    }

    /// Full Hamiltonian with the two local fields merged into one rotation.
    pub fn apply_hamiltonian(&self, circuit: &mut Circuit, angle: f64) -> TailResult<()> {
        self.check_width(circuit)?;
        self.apply_fields_and_couplings(circuit, angle, |r| combined_field(self.problem, r))?;
        debug!("Applied Hamiltonian layer (angle={angle})");
        Ok(())
    }

    // For each qubit: its field rotation, then the couplings to every
    // higher qubit. CX-Rz-CX is emitted even when J is zero.
    fn apply_fields_and_couplings(
        &self,
        circuit: &mut Circuit,
        angle: f64,
        field: impl Fn(usize) -> f64,
    ) -> TailResult<()> {
        let n = self.problem.num_resources();
        for r in 0..n {
            circuit.rz(angle * field(r), qubit(r))?;
            for r_ in (r + 1)..n {
                let j = coupling(self.problem, r, r_);
                circuit.cx(qubit(r), qubit(r_))?;
                circuit.rz(angle * j, qubit(r_))?;
                circuit.cx(qubit(r), qubit(r_))?;
            }
        }
        Ok(())
    }

    fn check_width(&self, circuit: &Circuit) -> TailResult<()> {
        if circuit.num_qubits() != self.problem.num_resources() {
            return Err(TailError::CircuitWidth {
                expected: self.problem.num_resources(),
                got: circuit.num_qubits(),
            });
        }
        Ok(())
    }
}

fn qubit(r: usize) -> QubitId {
    QubitId(r as u32)
}
