//! Quantum gate types.

use serde::{Deserialize, Serialize};

/// Standard gates with known semantics.
///
/// Rotation angles are concrete radians; the ansatz builders bind every
/// angle before a gate is appended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StandardGate {
    // Single-qubit gates
    /// Hadamard gate.
    H,
    /// Pauli-X gate.
    X,
    /// Rotation around X axis: `exp(-i θ X / 2)`.
    Rx(f64),
    /// Rotation around Z axis: `exp(-i θ Z / 2)`.
    Rz(f64),

    // Two-qubit gates
    /// Controlled-X (CNOT) gate.
    CX,
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::H => "h",
            StandardGate::X => "x",
            StandardGate::Rx(_) => "rx",
            StandardGate::Rz(_) => "rz",
            StandardGate::CX => "cx",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::H | StandardGate::X | StandardGate::Rx(_) | StandardGate::Rz(_) => 1,
            StandardGate::CX => 2,
        }
    }

    /// The rotation angle, for parameterized gates.
    pub fn angle(&self) -> Option<f64> {
        match self {
            StandardGate::Rx(theta) | StandardGate::Rz(theta) => Some(*theta),
            StandardGate::H | StandardGate::X | StandardGate::CX => None,
        }
    }

    /// Check if this gate takes a rotation angle.
    pub fn is_parameterized(&self) -> bool {
        self.angle().is_some()
    }
}
