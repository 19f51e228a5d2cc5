//! Errors raised while handing a circuit to a backend and reading the
//! result back.

use thiserror::Error;

use crate::result::ExecutionMode;

/// Execution failures.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    /// The backend is not accepting jobs.
    #[error("Backend not available: {0}")]
    BackendUnavailable(String),

    /// The circuit needs more qubits than the backend offers.
    #[error("Circuit needs {required} qubits, backend offers {available}")]
    CircuitTooLarge {
        /// Qubits in the circuit.
        required: usize,
        /// Qubits on the backend.
        available: usize,
    },

    /// The circuit contains something the backend cannot execute.
    #[error("Invalid circuit: {0}")]
    InvalidCircuit(String),

    /// Mode, shot count or block count of a request is unusable.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// No job with this id is known to the backend.
    #[error("Job not found: {0}")]
    JobNotFound(String),

    /// The backend reported the job as failed.
    #[error("Job failed: {0}")]
    JobFailed(String),

    /// The job did not finish within the polling budget.
    #[error("Timeout waiting for job {0}")]
    Timeout(String),

    /// The result shape differs from the requested mode.
    #[error("Requested a {requested} result, backend returned {returned}")]
    ModeMismatch {
        /// Mode of the request.
        requested: ExecutionMode,
        /// Mode of the returned result.
        returned: ExecutionMode,
    },

    /// A histogram key could not be read as an outcome.
    #[error("Malformed outcome: {0}")]
    MalformedOutcome(String),
}

/// Result type for HAL operations.
pub type HalResult<T> = Result<T, HalError>;
