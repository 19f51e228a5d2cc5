//! Arvak Local Statevector Simulator
//!
//! This crate provides the local execution backend for tail-assignment QAOA
//! circuits. It evolves a dense statevector once per job, then either returns
//! the amplitudes or samples measurement histograms from them.
//!
//! # Features
//!
//! - **Exact mode**: [`ExecutionMode::Statevector`](arvak_hal::ExecutionMode)
//!   returns all `2^n` amplitudes
//! - **Sampled mode**: one or more experiment blocks per job, MSB-first
//!   bitstring keys, reproducible with a seed
//!
//! # Performance
//!
//! | Qubits | Memory | Simulation Speed |
//! |--------|--------|------------------|
//! | 10 | ~16 KB | Instant |
//! | 15 | ~512 KB | Fast |
//! | 20 | ~16 MB | Moderate |
//! | 25 | ~512 MB | Slow |
//!
//! # Example
//!
//! ```ignore
//! use arvak_adapter_sim::SimulatorBackend;
//! use arvak_hal::{Backend, ExecutionRequest};
//!
//! let backend = SimulatorBackend::new();
//! let result = backend
//!     .run(&circuit, &ExecutionRequest::shots(1000).with_seed(7))
//!     .await?;
//! println!("Results: {:?}", result.experiments[0].counts);
//! ```

mod simulator;
mod statevector;

pub use simulator::SimulatorBackend;
