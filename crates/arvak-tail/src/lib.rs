//! Arvak Tail Assignment
//!
//! QAOA circuits for the tail-assignment problem: choose a set of aircraft
//! rotations (resources) such that every flight is covered exactly once at
//! minimum cost.
//!
//! # Overview
//!
//! - [`TailAssignment`]: resource matrix `FR`, cost vector `CR`, penalty `mu`
//! - [`cost`](cost::cost) and [`is_solution`](cost::is_solution), batched over
//!   all `2^R` assignments by [`StateTable`]
//! - [`Translator`]: cost, exact-cover and combined Hamiltonian layers as
//!   `Rz` and `CX · Rz · CX` sequences
//! - [`TailAnsatz`]: the full circuit for a depth and angle vector, in the
//!   [`AnsatzKind::Combined`] or [`AnsatzKind::Interlaced`] shape
//! - [`StatisticsExtractor`]: success probability, cost expectation and best
//!   cost from statevector or shot results
//! - [`TailRunner`]: execution on any [`arvak_hal::Backend`] and depth sweeps
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use arvak_adapter_sim::SimulatorBackend;
//! use arvak_tail::{TailRunner, instances};
//!
//! let problem = instances::three_flights_five_rotations()?;
//! let runner = TailRunner::new(problem, Arc::new(SimulatorBackend::new()));
//! let evaluation = runner.evaluate(1, &[0.4, 0.3]).await?;
//! println!("P(success) = {:.3}", evaluation.success_probability);
//! ```
//!
//! # Bit order
//!
//! Backends report MSB-first bitstrings: character `R - 1 - r` is resource
//! `r`. [`Assignment::from_bitstring`] performs the reversal.

pub mod ansatz;
pub mod assignment;
pub mod config;
pub mod cost;
pub mod error;
pub mod hamiltonian;
pub mod instances;
pub mod mixer;
pub mod problem;
pub mod runner;
pub mod statistics;

pub use ansatz::{AnsatzKind, AnsatzOptions, TailAnsatz};
pub use assignment::Assignment;
pub use config::TailConfig;
pub use cost::{ReferenceSolution, StateTable};
pub use error::{TailError, TailResult};
pub use hamiltonian::Translator;
pub use mixer::mix_states;
pub use problem::TailAssignment;
pub use runner::{DepthSweep, Evaluation, TailRunner};
pub use statistics::{MeasurementStatistics, StatisticsExtractor};
