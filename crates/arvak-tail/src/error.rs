//! Error types for the tail-assignment crate.

use arvak_hal::ExecutionMode;
use thiserror::Error;

use crate::ansatz::AnsatzKind;

/// Errors produced while building or evaluating tail-assignment circuits.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TailError {
    /// Cost vector length differs from the number of matrix columns.
    #[error("Cost vector has {cr_len} entries but the resource matrix has {fr_columns} columns")]
    DimensionMismatch {
        /// Columns of FR.
        fr_columns: usize,
        /// Length of CR.
        cr_len: usize,
    },

    /// Resource matrix rows have different lengths.
    #[error("Resource matrix row {row} has {got} columns, expected {expected}")]
    RaggedMatrix {
        /// Index of the offending row.
        row: usize,
        /// Column count of row 0.
        expected: usize,
        /// Column count of the offending row.
        got: usize,
    },

    /// Problem has no flights or no resources.
    #[error("Problem needs at least one flight and one resource, got {flights}x{resources}")]
    EmptyProblem {
        /// Rows of FR.
        flights: usize,
        /// Columns of FR.
        resources: usize,
    },

    /// A problem input is NaN or infinite.
    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue {
        /// Name of the input.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// Angle count does not match `params_per_layer * depth`.
    #[error("{kind} ansatz of depth {depth} needs {expected} angles, got {got}")]
    ParameterCount {
        /// Ansatz variant.
        kind: AnsatzKind,
        /// Requested depth.
        depth: usize,
        /// Required number of angles.
        expected: usize,
        /// Supplied number of angles.
        got: usize,
    },

    /// Depth must be at least one layer.
    #[error("Ansatz depth must be at least 1, got {0}")]
    InvalidDepth(usize),

    /// Target circuit width does not match the number of resources.
    #[error("Circuit has {got} qubits, problem has {expected} resources")]
    CircuitWidth {
        /// Number of resources.
        expected: usize,
        /// Qubits in the circuit.
        got: usize,
    },

    /// No stored angles for a depth in a sweep.
    #[error("No parameters stored for depth {depth}")]
    MissingParameters {
        /// Depth without parameters.
        depth: usize,
    },

    /// A required option is absent.
    #[error("Required option '{0}' is missing")]
    MissingOption(&'static str),

    /// A measured bitstring cannot be read as an assignment.
    #[error("Invalid bitstring '{bitstring}': {reason}")]
    InvalidBitstring {
        /// The offending key.
        bitstring: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Exhaustive enumeration would be too large.
    #[error("Problem has {qubits} resources; exhaustive evaluation supports at most {max}")]
    TooManyQubits {
        /// Number of resources.
        qubits: usize,
        /// Supported maximum.
        max: usize,
    },

    /// Result carries data of the wrong shape for the selected mode.
    #[error("Unsupported result for {mode} mode: {reason}")]
    UnsupportedResult {
        /// Mode the extractor was configured for.
        mode: ExecutionMode,
        /// What is wrong with the result.
        reason: String,
    },

    /// Result carries no usable data.
    #[error("No data: {0}")]
    NoData(String),

    /// Configuration file or override is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Circuit builder returned an error.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] arvak_ir::IrError),

    /// Backend returned an error.
    #[error("Backend error: {0}")]
    Hal(#[from] arvak_hal::HalError),

    /// I/O error while reading configuration.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for tail-assignment operations.
pub type TailResult<T> = Result<T, TailError>;
