//! Arvak Circuit Intermediate Representation
//!
//! This crate provides the gate-level circuit description that the
//! tail-assignment ansatz builders emit and that execution backends consume.
//!
//! # Overview
//!
//! A [`Circuit`] is an ordered instruction list over a fixed quantum and
//! classical register. Every operand is validated when an instruction is
//! appended, so a circuit handed to a backend is always well formed.
//!
//! # Core Components
//!
//! - **Qubits and Classical Bits**: [`QubitId`], [`ClbitId`] for addressing
//!   the quantum and classical registers
//! - **Gates**: [`StandardGate`] for the gate set used by QAOA circuits
//! - **Instructions**: [`Instruction`] combining gates with their operands
//! - **Circuit**: [`Circuit`] high-level builder API
//!
//! # Example: A ZZ interaction
//!
//! ```rust
//! use arvak_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("zz", 2, 2);
//!
//! circuit.h(QubitId(0)).unwrap().h(QubitId(1)).unwrap();
//! circuit
//!     .cx(QubitId(0), QubitId(1))
//!     .unwrap()
//!     .rz(0.25, QubitId(1))
//!     .unwrap()
//!     .cx(QubitId(0), QubitId(1))
//!     .unwrap();
//! circuit.measure_all().unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.depth(), 5); // H, CX, RZ, CX, parallel measures
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `H` | 1 | Hadamard gate |
//! | `X` | 1 | Pauli-X gate |
//! | `Rx`, `Rz` | 1 | Mixer and field rotations |
//! | `CX` | 2 | Controlled-NOT (CNOT), brackets each coupling `Rz` |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{ClbitId, QubitId};
