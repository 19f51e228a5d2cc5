//! Transverse-field mixer.

use arvak_ir::{Circuit, QubitId};

use crate::error::TailResult;

/// Apply `Rx(-2 * beta)` to every qubit.
pub fn mix_states(circuit: &mut Circuit, beta: f64) -> TailResult<()> {
    for q in 0..circuit.num_qubits() {
        circuit.rx(-2.0 * beta, QubitId(q as u32))?;
    }
    Ok(())
}
