//! Execution of tail-assignment circuits on a backend.

use std::collections::BTreeMap;
use std::sync::Arc;

use arvak_hal::{Availability, Backend, ExecutionRequest, HalError};
use serde::Serialize;
use tracing::{debug, info};

use crate::ansatz::{AnsatzOptions, TailAnsatz};
use crate::config::TailConfig;
use crate::error::{TailError, TailResult};
use crate::problem::TailAssignment;
use crate::statistics::{MeasurementStatistics, StatisticsExtractor};

/// Statistics of one executed circuit.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    /// Number of ansatz layers.
    pub depth: usize,
    /// Probability of measuring an exact cover.
    pub success_probability: f64,
    /// Expected cost over the whole job.
    pub cost_expectation: f64,
    /// Per-experiment expectations and best cost.
    pub statistics: MeasurementStatistics,
    /// Depth of the executed circuit.
    pub circuit_depth: usize,
    /// Instructions in the executed circuit, barriers included.
    pub num_ops: usize,
    /// Two-qubit gates in the executed circuit.
    pub two_qubit_gates: usize,
}

/// Results of a depth sweep, indexed by `depth - 1`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DepthSweep {
    /// Success probability per depth.
    pub success_probability: Vec<f64>,
    /// Cost expectation per depth.
    pub cost: Vec<f64>,
    /// Full evaluation per depth.
    pub evaluations: Vec<Evaluation>,
}

/// Builds, executes and evaluates tail-assignment circuits.
pub struct TailRunner {
    problem: TailAssignment,
    backend: Arc<dyn Backend>,
    options: AnsatzOptions,
    request: ExecutionRequest,
}

impl TailRunner {
    /// Create a runner with statevector execution and the combined ansatz.
    pub fn new(problem: TailAssignment, backend: Arc<dyn Backend>) -> Self {
        Self {
            problem,
            backend,
            options: AnsatzOptions::default(),
            request: ExecutionRequest::statevector(),
        }
    }

    /// Create a runner from a validated configuration.
    pub fn from_config(config: &TailConfig, backend: Arc<dyn Backend>) -> TailResult<Self> {
        Ok(Self::new(config.problem()?, backend)
            .with_options(config.ansatz_options())
            .with_request(config.execution_request()))
    }

    /// Set the ansatz options. The execution mode follows `options.mode`.
    pub fn with_options(mut self, options: AnsatzOptions) -> Self {
        self.options = options;
        self.request.mode = options.mode;
        self
    }

    /// Set the execution request. The ansatz mode follows `request.mode`.
    pub fn with_request(mut self, request: ExecutionRequest) -> Self {
        self.options.mode = request.mode;
        self.request = request;
        self
    }

    /// The problem being solved.
    pub fn problem(&self) -> &TailAssignment {
        &self.problem
    }

    /// The request sent with every job.
    pub fn request(&self) -> &ExecutionRequest {
        &self.request
    }

    /// The ansatz options.
    pub fn options(&self) -> &AnsatzOptions {
        &self.options
    }

    /// Build and execute the ansatz for `depth` layers with `params`.
    pub async fn evaluate(&self, depth: usize, params: &[f64]) -> TailResult<Evaluation> {
        let circuit = TailAnsatz::new(&self.problem, self.options).build(depth, params)?;

        if let Availability::Offline(reason) = self.backend.availability().await? {
            return Err(
                HalError::BackendUnavailable(format!("{}: {reason}", self.backend.name())).into(),
            );
        }

        let result = self.backend.run(&circuit, &self.request).await?;
        debug!(
            "Job finished on {} in {:?} ms",
            self.backend.name(),
            result.execution_time_ms
        );

        let extractor = StatisticsExtractor::new(&self.problem, self.request.mode)?;
        let success_probability = extractor.success_probability(&result)?;
        let cost_expectation = extractor.cost_expectation(&result)?;
        let statistics = extractor.measurement_statistics(&result)?;

        info!(
            "depth={} success_probability={:.6} cost={:.6} best={:.6}",
            depth, success_probability, cost_expectation, statistics.best_cost
        );

        Ok(Evaluation {
            depth,
            success_probability,
            cost_expectation,
            statistics,
            circuit_depth: circuit.depth(),
            num_ops: circuit.num_ops(),
            two_qubit_gates: circuit.num_two_qubit_gates(),
        })
    }

    /// Evaluate depths `1..=max_depth` using the stored angles of each.
    pub async fn depth_sweep(
        &self,
        params: &BTreeMap<usize, Vec<f64>>,
        max_depth: usize,
    ) -> TailResult<DepthSweep> {
        if max_depth == 0 {
            return Err(TailError::InvalidDepth(0));
        }
        let mut sweep = DepthSweep::default();
        for depth in 1..=max_depth {
            let angles = params
                .get(&depth)
                .ok_or(TailError::MissingParameters { depth })?;
            let evaluation = self.evaluate(depth, angles).await?;
            sweep.success_probability.push(evaluation.success_probability);
            sweep.cost.push(evaluation.cost_expectation);
            sweep.evaluations.push(evaluation);
        }
        info!("Depth sweep finished: {} depths", max_depth);
        Ok(sweep)
    }
}

impl std::fmt::Debug for TailRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TailRunner")
            .field("problem", &self.problem)
            .field("backend", &self.backend.name())
            .field("options", &self.options)
            .field("request", &self.request)
            .finish()
    }
}
