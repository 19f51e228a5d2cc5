//! What a backend can execute.

use crate::result::ExecutionMode;

/// Limits a backend enforces before accepting a job.
#[derive(Debug, Clone)]
pub struct Capabilities {
    /// Largest register the backend can hold.
    pub num_qubits: u32,
    /// Gate names accepted, OpenQASM spelling.
    pub gates: Vec<&'static str>,
    /// Shots per experiment block.
    pub max_shots: u32,
    /// Experiment blocks per job.
    pub max_repetitions: u32,
    /// Result shapes the backend can produce.
    pub modes: Vec<ExecutionMode>,
}

impl Capabilities {
    /// The local statevector simulator: every ansatz gate, both modes.
    pub fn simulator(num_qubits: u32) -> Self {
        Self {
            num_qubits,
            gates: vec!["h", "x", "rx", "rz", "cx"],
            max_shots: 1_000_000,
            max_repetitions: 64,
            modes: vec![ExecutionMode::Statevector, ExecutionMode::Shots],
        }
    }

    /// Check whether the backend can produce `mode` results.
    pub fn supports_mode(&self, mode: ExecutionMode) -> bool {
        self.modes.contains(&mode)
    }

    /// Check whether the backend accepts the gate named `gate`.
    pub fn supports_gate(&self, gate: &str) -> bool {
        self.gates.iter().any(|g| *g == gate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulator_capabilities() {
        let caps = Capabilities::simulator(20);
        assert_eq!(caps.num_qubits, 20);
        assert!(caps.supports_mode(ExecutionMode::Statevector));
        assert!(caps.supports_mode(ExecutionMode::Shots));
        assert!(caps.supports_gate("rz"));
        assert!(caps.supports_gate("cx"));
        assert!(!caps.supports_gate("ccx"));
    }
}
