//! Arvak Hardware Abstraction Layer
//!
//! This crate is the execution contract used by the tail-assignment QAOA
//! tooling: an ansatz is handed over as an [`arvak_ir::Circuit`] together
//! with an [`ExecutionRequest`], and comes back as an [`ExecutionResult`].
//!
//! # Overview
//!
//! - A [`Backend`] trait whose provided [`Backend::run`] checks, submits,
//!   waits and verifies that the answer has the requested shape
//! - [`Capabilities`] to describe register size, gates and supported modes
//! - An explicit [`ExecutionMode`] selecting exact amplitudes or sampled
//!   histograms, instead of inferring the result shape from a backend name
//! - Unified result handling via [`ExecutionResult`], [`ExperimentResult`]
//!   and [`Counts`]
//!
//! # Example: Running a Circuit
//!
//! ```ignore
//! use arvak_hal::{Backend, ExecutionRequest};
//! use arvak_adapter_sim::SimulatorBackend;
//!
//! let backend = SimulatorBackend::new();
//! let request = ExecutionRequest::shots(1000).with_seed(7);
//! let result = backend.run(&circuit, &request).await?;
//!
//! for experiment in &result.experiments {
//!     println!("{} of {} shots read 000", experiment.counts.get("000"), experiment.shots);
//! }
//! ```

pub mod backend;
pub mod capability;
pub mod error;
pub mod job;
pub mod result;

pub use backend::{Availability, Backend, MAX_POLLS, POLL_INTERVAL};
pub use capability::Capabilities;
pub use error::{HalError, HalResult};
pub use job::{Job, JobId, JobStatus};
pub use result::{Counts, ExecutionMode, ExecutionRequest, ExecutionResult, ExperimentResult};
