//! The execution contract between ansatz builders and backends.
//!
//! A backend receives a measured or unmeasured circuit together with an
//! [`ExecutionRequest`]. It must answer in the requested [`ExecutionMode`]:
//! amplitudes for [`ExecutionMode::Statevector`], `request.repetitions`
//! histograms of `request.shots` MSB-first bitstrings for
//! [`ExecutionMode::Shots`]. [`Backend::run`] enforces that on the way out.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use arvak_ir::Circuit;

use crate::capability::Capabilities;
use crate::error::{HalError, HalResult};
use crate::job::{JobId, JobStatus};
use crate::result::{ExecutionMode, ExecutionRequest, ExecutionResult};

/// Delay between status polls in [`Backend::run`].
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Polls before [`Backend::run`] gives up on a job.
pub const MAX_POLLS: u32 = 3000;

/// Whether a backend takes jobs right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    /// Accepting jobs.
    Online,
    /// Not accepting jobs, with the backend's reason.
    Offline(String),
}

impl Availability {
    /// Check whether jobs can be submitted.
    pub fn is_online(&self) -> bool {
        matches!(self, Availability::Online)
    }
}

/// A circuit execution backend.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Backend name used in logs and error messages.
    fn name(&self) -> &str;

    /// Static limits, fixed at construction.
    fn capabilities(&self) -> &Capabilities;

    /// Current availability.
    async fn availability(&self) -> HalResult<Availability>;

    /// Hand over a circuit; the returned id is used for [`Backend::status`]
    /// and [`Backend::result`].
    async fn submit(&self, circuit: &Circuit, request: &ExecutionRequest) -> HalResult<JobId>;

    /// Current state of a job.
    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus>;

    /// Result of a completed job. Backends may forget the job afterwards.
    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult>;

    /// Check a circuit and request against [`Backend::capabilities`].
    fn check(&self, circuit: &Circuit, request: &ExecutionRequest) -> HalResult<()> {
        request.validate()?;
        let caps = self.capabilities();

        if circuit.num_qubits() > caps.num_qubits as usize {
            return Err(HalError::CircuitTooLarge {
                required: circuit.num_qubits(),
                available: caps.num_qubits as usize,
            });
        }
        if !caps.supports_mode(request.mode) {
            return Err(HalError::InvalidRequest(format!(
                "{} cannot produce {} results",
                self.name(),
                request.mode
            )));
        }
        if let Some(gate) = circuit
            .instructions()
            .iter()
            .filter_map(|inst| inst.as_gate())
            .find(|gate| !caps.supports_gate(gate.name()))
        {
            return Err(HalError::InvalidCircuit(format!(
                "gate '{}' is not supported by {}",
                gate.name(),
                self.name()
            )));
        }
        if request.mode == ExecutionMode::Shots && !circuit.has_measurements() {
            return Err(HalError::InvalidCircuit(
                "shots mode requires at least one measurement".into(),
            ));
        }
        if request.mode == ExecutionMode::Shots
            && (request.shots > caps.max_shots || request.repetitions > caps.max_repetitions)
        {
            return Err(HalError::InvalidRequest(format!(
                "{} x {} shots exceeds the limit of {} x {}",
                request.repetitions, request.shots, caps.max_repetitions, caps.max_shots
            )));
        }
        Ok(())
    }

    /// Check, submit, wait for completion and fetch the result.
    ///
    /// Fails with [`HalError::ModeMismatch`] when the backend answers in a
    /// different mode than requested.
    async fn run(&self, circuit: &Circuit, request: &ExecutionRequest) -> HalResult<ExecutionResult> {
        self.check(circuit, request)?;
        let job_id = self.submit(circuit, request).await?;
        debug!(backend = self.name(), job = %job_id, mode = %request.mode, "job submitted");

        let mut polls = 0;
        loop {
            match self.status(&job_id).await? {
                JobStatus::Completed => break,
                JobStatus::Failed(reason) => return Err(HalError::JobFailed(reason)),
                JobStatus::Queued | JobStatus::Running => {
                    polls += 1;
                    if polls >= MAX_POLLS {
                        return Err(HalError::Timeout(job_id.0));
                    }
                    tokio::time::sleep(POLL_INTERVAL).await;
                }
            }
        }

        let result = self.result(&job_id).await?;
        if result.mode != request.mode {
            return Err(HalError::ModeMismatch {
                requested: request.mode,
                returned: result.mode,
            });
        }
        Ok(result)
    }
}
