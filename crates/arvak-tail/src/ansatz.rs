//! QAOA ansatz construction for tail assignment.
//!
//! The circuit starts in the uniform superposition and alternates
//! Hamiltonian and mixer layers. Two layer shapes are supported:
//!
//! - [`AnsatzKind::Combined`]: angle pairs `(gamma, beta)`; one merged
//!   Hamiltonian layer followed by the mixer.
//! - [`AnsatzKind::Interlaced`]: angle triples `(gamma, beta, delta)`; the
//!   cost term (`delta`) and the exact-cover term (`gamma`) each get their
//!   own layer, both followed by the mixer (`beta`).

use std::fmt;
use std::str::FromStr;

use arvak_hal::ExecutionMode;
use arvak_ir::{Circuit, QubitId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{TailError, TailResult};
use crate::hamiltonian::Translator;
use crate::mixer::mix_states;
use crate::problem::TailAssignment;

/// Name given to generated circuits.
pub const CIRCUIT_NAME: &str = "tail_assignment";

/// Layer shape of the ansatz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnsatzKind {
    /// Merged Hamiltonian layer, then mixer.
    #[default]
    Combined,
    /// Cost layer, mixer, exact-cover layer, mixer.
    Interlaced,
}

impl AnsatzKind {
    /// Angles consumed per layer.
    pub fn params_per_layer(&self) -> usize {
        match self {
            AnsatzKind::Combined => 2,
            AnsatzKind::Interlaced => 3,
        }
    }

    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            AnsatzKind::Combined => "combined",
            AnsatzKind::Interlaced => "interlaced",
        }
    }
}

impl fmt::Display for AnsatzKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AnsatzKind {
    type Err = TailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "combined" | "standard" => Ok(AnsatzKind::Combined),
            "interlaced" => Ok(AnsatzKind::Interlaced),
            other => Err(TailError::Config(format!(
                "unknown ansatz '{other}', expected 'combined' or 'interlaced'"
            ))),
        }
    }
}

/// Construction options for [`TailAnsatz`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnsatzOptions {
    /// Layer shape.
    pub kind: AnsatzKind,
    /// Insert barriers between layers.
    pub use_barrier: bool,
    /// Statevector circuits carry no measurement.
    pub mode: ExecutionMode,
}

impl AnsatzOptions {
    /// Set the layer shape.
    pub fn with_kind(mut self, kind: AnsatzKind) -> Self {
        self.kind = kind;
        self
    }

    /// Enable or disable barriers.
    pub fn with_barriers(mut self, use_barrier: bool) -> Self {
        self.use_barrier = use_barrier;
        self
    }

    /// Set the execution mode.
    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Builds parametrized tail-assignment circuits.
#[derive(Debug, Clone, Copy)]
pub struct TailAnsatz<'a> {
    translator: Translator<'a>,
    options: AnsatzOptions,
}

impl<'a> TailAnsatz<'a> {
    /// Create a builder for `problem`.
    pub fn new(problem: &'a TailAssignment, options: AnsatzOptions) -> Self {
        Self {
            translator: Translator::new(problem),
            options,
        }
    }

    /// The options in use.
    pub fn options(&self) -> &AnsatzOptions {
        &self.options
    }

    /// Number of angles needed for `depth` layers.
    pub fn num_parameters(&self, depth: usize) -> usize {
        self.options.kind.params_per_layer() * depth
    }

    /// Build the circuit for `depth` layers.
    ///
    /// `params` is laid out layer by layer: `[g0, b0, g1, b1, ...]` for the
    /// combined ansatz and `[g0, b0, d0, g1, b1, d1, ...]` for the
    /// interlaced one.
    pub fn build(&self, depth: usize, params: &[f64]) -> TailResult<Circuit> {
        if depth == 0 {
            return Err(TailError::InvalidDepth(depth));
        }
        let expected = self.num_parameters(depth);
        if params.len() != expected {
            return Err(TailError::ParameterCount {
                kind: self.options.kind,
                depth,
                expected,
                got: params.len(),
            });
        }

        let n = self.translator.problem().num_resources() as u32;
        let mut circuit = Circuit::with_size(CIRCUIT_NAME, n, n);

        for q in 0..n {
            circuit.h(QubitId(q))?;
        }

        let k = self.options.kind.params_per_layer();
        for layer in params.chunks_exact(k) {
            match self.options.kind {
                AnsatzKind::Combined => self.combined_layer(&mut circuit, layer[0], layer[1])?,
                AnsatzKind::Interlaced => {
                    self.interlaced_layer(&mut circuit, layer[0], layer[1], layer[2])?
                }
            }
        }

        if self.options.mode == ExecutionMode::Shots {
            circuit.measure_all()?;
        }

        debug!(
            "Built {} ansatz: depth={}, ops={}, circuit depth={}",
            self.options.kind,
            depth,
            circuit.num_ops(),
            circuit.depth()
        );
        Ok(circuit)
    }

    fn combined_layer(&self, circuit: &mut Circuit, gamma: f64, beta: f64) -> TailResult<()> {
        self.translator.apply_hamiltonian(circuit, gamma)?;
        self.barrier(circuit)?;
        mix_states(circuit, beta)?;
        self.barrier(circuit)
    }

    fn interlaced_layer(
        &self,
        circuit: &mut Circuit,
        gamma: f64,
        beta: f64,
        delta: f64,
    ) -> TailResult<()> {
        self.translator.apply_cost(circuit, delta)?;
        self.barrier(circuit)?;
        mix_states(circuit, beta)?;
        self.barrier(circuit)?;
        self.translator.apply_exco(circuit, gamma)?;
        mix_states(circuit, beta)?;
        self.barrier(circuit)
    }

    fn barrier(&self, circuit: &mut Circuit) -> TailResult<()> {
        if self.options.use_barrier {
            circuit.barrier_all()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn problem() -> TailAssignment {
        TailAssignment::new(array![[1.0, 1.0], [0.0, 1.0]], array![1.0, 2.0]).unwrap()
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("combined".parse::<AnsatzKind>().unwrap(), AnsatzKind::Combined);
        assert_eq!("Interlaced".parse::<AnsatzKind>().unwrap(), AnsatzKind::Interlaced);
        assert!("spiral".parse::<AnsatzKind>().is_err());
        assert_eq!(AnsatzKind::Interlaced.to_string(), "interlaced");
    }

    #[test]
    fn test_combined_structure() {
        let p = problem();
        let ansatz = TailAnsatz::new(&p, AnsatzOptions::default());
        let circuit = ansatz.build(1, &[0.3, 0.4]).unwrap();

        assert_eq!(circuit.name(), CIRCUIT_NAME);
        assert_eq!(circuit.num_qubits(), 2);
        assert_eq!(circuit.num_clbits(), 2);
        assert!(!circuit.has_measurements());

        let counts = circuit.gate_counts();
        assert_eq!(counts.get("h"), Some(&2));
        // One field rotation per qubit plus one coupling rotation.
        assert_eq!(counts.get("rz"), Some(&3));
        assert_eq!(counts.get("cx"), Some(&2));
        assert_eq!(counts.get("rx"), Some(&2));
    }

    #[test]
    fn test_interlaced_structure() {
        let p = problem();
        let options = AnsatzOptions::default().with_kind(AnsatzKind::Interlaced);
        let circuit = TailAnsatz::new(&p, options)
            .build(2, &[0.1, 0.2, 0.3, 0.4, 0.5, 0.6])
            .unwrap();

        let counts = circuit.gate_counts();
        // Per layer: 2 cost rotations + 3 exact-cover rotations.
        assert_eq!(counts.get("rz"), Some(&10));
        assert_eq!(counts.get("rx"), Some(&8));
        assert_eq!(counts.get("cx"), Some(&4));
    }

    #[test]
    fn test_barriers_and_measurement() {
        let p = problem();
        let options = AnsatzOptions::default()
            .with_barriers(true)
            .with_mode(ExecutionMode::Shots);
        let circuit = TailAnsatz::new(&p, options).build(2, &[0.1, 0.2, 0.3, 0.4]).unwrap();

        let barriers = circuit
            .instructions()
            .iter()
            .filter(|i| i.is_barrier())
            .count();
        assert_eq!(barriers, 4);
        assert!(circuit.has_measurements());
        assert!(circuit.instructions().last().unwrap().is_measure());
    }

    #[test]
    fn test_parameter_validation() {
        let p = problem();
        let ansatz = TailAnsatz::new(&p, AnsatzOptions::default());
        assert!(matches!(ansatz.build(0, &[]), Err(TailError::InvalidDepth(0))));
        assert!(matches!(
            ansatz.build(2, &[0.1, 0.2, 0.3]),
            Err(TailError::ParameterCount {
                expected: 4,
                got: 3,
                ..
            })
        ));
        assert_eq!(ansatz.num_parameters(3), 6);
    }
}
