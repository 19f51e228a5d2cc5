//! `OpenQASM` Emitter for Arvak
//!
//! Serializes [`arvak_ir::Circuit`] values to `OpenQASM` source so that ansatz
//! circuits can be handed to execution services that accept text programs.
//!
//! | Feature | QASM 3.0 | QASM 2.0 |
//! |---------|----------|----------|
//! | Registers | `qubit[5] q;` | `qreg q[5];` |
//! | Rotations | `rz(0.25) q[0];` | `rz(0.25) q[0];` |
//! | Measurements | `c[0] = measure q[0];` | `measure q[0] -> c[0];` |
//! | Barriers | `barrier q[0], q[1];` | `barrier q[0], q[1];` |
//!
//! # Example
//!
//! ```rust
//! use arvak_ir::{Circuit, QubitId};
//! use arvak_qasm3::emit;
//!
//! let mut circuit = Circuit::with_size("demo", 2, 2);
//! circuit.h(QubitId(0)).unwrap().cx(QubitId(0), QubitId(1)).unwrap();
//! circuit.measure_all().unwrap();
//!
//! let qasm = emit(&circuit);
//! assert!(qasm.contains("OPENQASM 3.0;"));
//! assert!(qasm.contains("h q[0];"));
//! assert!(qasm.contains("cx q[0], q[1];"));
//! ```

mod emitter;

pub use emitter::{emit, emit_qasm2};
