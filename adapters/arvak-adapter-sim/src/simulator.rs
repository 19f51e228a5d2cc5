//! Simulator backend implementation.

use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rustc_hash::FxHashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;
use tracing::{debug, instrument};
use uuid::Uuid;

use arvak_hal::{
    Availability, Backend, Capabilities, Counts, ExecutionMode, ExecutionRequest, ExecutionResult,
    ExperimentResult, HalError, HalResult, Job, JobId, JobStatus,
};
use arvak_ir::{Circuit, InstructionKind};

use crate::statevector::{Sampler, Statevector, outcome_to_bitstring};

const DEFAULT_MAX_QUBITS: u32 = 20;

/// A settled job waiting for its result to be collected.
struct SimJob {
    job: Job,
    result: ExecutionResult,
}

/// Local simulator backend.
///
/// Runs every circuit once on a dense statevector. Statevector requests
/// return the final amplitudes; shot requests sample the final distribution
/// once per shot for each experiment block. Jobs run inside `submit` and are
/// dropped once their result has been collected.
pub struct SimulatorBackend {
    capabilities: Capabilities,
    jobs: Mutex<FxHashMap<String, SimJob>>,
}

impl SimulatorBackend {
    /// Create a new simulator backend with default settings.
    pub fn new() -> Self {
        Self::with_max_qubits(DEFAULT_MAX_QUBITS)
    }

    /// Create a simulator with custom max qubits.
    pub fn with_max_qubits(max_qubits: u32) -> Self {
        Self {
            capabilities: Capabilities::simulator(max_qubits),
            jobs: Mutex::new(FxHashMap::default()),
        }
    }

    /// Run simulation synchronously.
    #[instrument(skip(self, circuit), fields(qubits = circuit.num_qubits()))]
    fn run_simulation(
        &self,
        circuit: &Circuit,
        request: &ExecutionRequest,
    ) -> HalResult<ExecutionResult> {
        let start = Instant::now();

        // qubit read into each classical bit by a terminal measurement
        let mut measured: Vec<Option<usize>> = vec![None; circuit.num_clbits()];
        let mut collapsed = vec![false; circuit.num_qubits()];
        let mut sv = Statevector::new(circuit.num_qubits());

        for inst in circuit.instructions() {
            match inst.kind {
                InstructionKind::Measure => {
                    for (q, c) in inst.qubits.iter().zip(&inst.clbits) {
                        measured[c.index()] = Some(q.index());
                        collapsed[q.index()] = true;
                    }
                }
                InstructionKind::Gate(_) => {
                    if let Some(q) = inst.qubits.iter().find(|q| collapsed[q.index()]) {
                        return Err(HalError::InvalidCircuit(format!(
                            "gate '{}' on {q} after measurement",
                            inst.name()
                        )));
                    }
                    sv.apply(inst);
                }
                InstructionKind::Barrier => {}
            }
        }

        debug!(
            instructions = circuit.num_ops(),
            mode = %request.mode,
            "statevector evolved"
        );

        let result = match request.mode {
            ExecutionMode::Statevector => ExecutionResult::from_statevector(sv.into_amplitudes()),
            ExecutionMode::Shots => {
                if measured.iter().all(Option::is_none) {
                    return Err(HalError::InvalidCircuit(
                        "shots mode requires at least one measurement".into(),
                    ));
                }

                let sampler = Sampler::new(&sv.probabilities());
                let mut rng = match request.seed {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_entropy(),
                };

                let experiments = (0..request.repetitions)
                    .map(|block| {
                        let mut counts = Counts::new();
                        for _ in 0..request.shots {
                            let outcome = sampler.sample(&mut rng);
                            counts.insert(outcome_to_bitstring(outcome, &measured), 1);
                        }
                        debug!(block, distinct = counts.len(), "experiment block sampled");
                        ExperimentResult::with_shots(counts, u64::from(request.shots))
                    })
                    .collect();

                ExecutionResult::from_experiments(experiments)
            }
        };

        let elapsed = start.elapsed();
        debug!("Simulation completed in {:?}", elapsed);

        Ok(result.with_execution_time(elapsed.as_millis() as u64))
    }

    fn lock_jobs(&self) -> MutexGuard<'_, FxHashMap<String, SimJob>> {
        self.jobs.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for SimulatorBackend {
    fn name(&self) -> &str {
        "simulator"
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    async fn availability(&self) -> HalResult<Availability> {
        Ok(Availability::Online)
    }

    #[instrument(skip(self, circuit))]
    async fn submit(&self, circuit: &Circuit, request: &ExecutionRequest) -> HalResult<JobId> {
        request.validate()?;

        let available = self.capabilities.num_qubits as usize;
        if circuit.num_qubits() > available {
            return Err(HalError::CircuitTooLarge {
                required: circuit.num_qubits(),
                available,
            });
        }

        let mut job = Job::new(JobId::new(Uuid::new_v4().to_string()), request.clone());
        job.transition(JobStatus::Running);
        debug!("Submitted job: {}", job.id);

        // failed simulations are reported here and never enter the job map
        let result = self.run_simulation(circuit, request)?;
        job.transition(JobStatus::Completed);

        let job_id = job.id.clone();
        self.lock_jobs()
            .insert(job_id.0.clone(), SimJob { job, result });
        Ok(job_id)
    }

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
        self.lock_jobs()
            .get(&job_id.0)
            .map(|j| j.job.status.clone())
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))
    }

    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        let SimJob { job, result } = self
            .lock_jobs()
            .remove(&job_id.0)
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))?;
        debug!(
            job = %job.id,
            mode = %job.request.mode,
            turnaround_ms = job.turnaround_ms(),
            "result collected"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arvak_ir::QubitId;

    fn bell() -> Circuit {
        let mut circuit = Circuit::with_size("bell", 2, 2);
        circuit
            .h(QubitId(0))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap()
            .measure_all()
            .unwrap();
        circuit
    }

    #[tokio::test]
    async fn test_simulator_capabilities() {
        let backend = SimulatorBackend::new();
        let caps = backend.capabilities();

        assert_eq!(caps.num_qubits, 20);
        assert!(caps.supports_mode(ExecutionMode::Statevector));
        assert!(caps.supports_mode(ExecutionMode::Shots));
    }

    #[tokio::test]
    async fn test_simulator_bell_state() {
        let backend = SimulatorBackend::new();

        let request = ExecutionRequest::shots(1000).with_seed(11);
        let job_id = backend.submit(&bell(), &request).await.unwrap();

        let status = backend.status(&job_id).await.unwrap();
        assert_eq!(status, JobStatus::Completed);

        let result = backend.result(&job_id).await.unwrap();
        assert_eq!(result.experiments.len(), 1);
        assert_eq!(result.experiments[0].shots, 1000);

        // Bell state should produce only 00 and 11
        let counts = &result.experiments[0].counts;
        assert_eq!(counts.get("00") + counts.get("11"), 1000);
        assert_eq!(counts.get("01") + counts.get("10"), 0);
    }

    #[tokio::test]
    async fn test_simulator_bitstring_order() {
        // X on qubit 0 only: MSB-first key has the 1 at the right end
        let mut circuit = Circuit::with_size("x0", 3, 3);
        circuit.x(QubitId(0)).unwrap().measure_all().unwrap();

        let backend = SimulatorBackend::new();
        let result = backend
            .run(&circuit, &ExecutionRequest::shots(16))
            .await
            .unwrap();
        assert_eq!(result.experiments[0].counts.get("001"), 16);
    }

    #[tokio::test]
    async fn test_simulator_statevector_mode() {
        let mut circuit = Circuit::with_size("h", 1, 0);
        circuit.h(QubitId(0)).unwrap();

        let backend = SimulatorBackend::new();
        let result = backend
            .run(&circuit, &ExecutionRequest::statevector())
            .await
            .unwrap();

        assert_eq!(result.mode, ExecutionMode::Statevector);
        assert!(result.experiments.is_empty());
        let probs = result.probabilities().unwrap();
        assert!((probs[0] - 0.5).abs() < 1e-12);
        assert!((probs[1] - 0.5).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_simulator_repetitions() {
        let backend = SimulatorBackend::new();
        let request = ExecutionRequest::shots(50).with_repetitions(3).with_seed(5);
        let result = backend.run(&bell(), &request).await.unwrap();

        assert_eq!(result.experiments.len(), 3);
        for experiment in &result.experiments {
            assert_eq!(experiment.shots, 50);
            assert_eq!(experiment.counts.total_shots(), 50);
        }
    }

    #[tokio::test]
    async fn test_simulator_seed_reproducible() {
        let backend = SimulatorBackend::new();
        let request = ExecutionRequest::shots(200).with_seed(42);
        let a = backend.run(&bell(), &request).await.unwrap();
        let b = backend.run(&bell(), &request).await.unwrap();
        assert_eq!(a.experiments, b.experiments);
    }

    #[tokio::test]
    async fn test_simulator_shots_without_measurement() {
        let mut circuit = Circuit::with_size("bare", 1, 0);
        circuit.h(QubitId(0)).unwrap();

        let backend = SimulatorBackend::new();
        let result = backend.submit(&circuit, &ExecutionRequest::shots(10)).await;
        assert!(matches!(result, Err(HalError::InvalidCircuit(_))));
    }

    #[tokio::test]
    async fn test_simulator_rejects_gate_after_measure() {
        let mut circuit = Circuit::with_size("mid", 1, 1);
        circuit
            .measure(QubitId(0), arvak_ir::ClbitId(0))
            .unwrap()
            .h(QubitId(0))
            .unwrap();

        let backend = SimulatorBackend::new();
        let result = backend.submit(&circuit, &ExecutionRequest::shots(10)).await;
        assert!(matches!(result, Err(HalError::InvalidCircuit(_))));
    }

    #[tokio::test]
    async fn test_simulator_too_many_qubits() {
        let backend = SimulatorBackend::with_max_qubits(5);

        let circuit = Circuit::with_size("test", 10, 0);
        let result = backend
            .submit(&circuit, &ExecutionRequest::statevector())
            .await;

        assert!(matches!(
            result,
            Err(HalError::CircuitTooLarge {
                required: 10,
                available: 5
            })
        ));
    }

    #[tokio::test]
    async fn test_unknown_job() {
        let backend = SimulatorBackend::new();
        let result = backend.status(&JobId::new("missing")).await;
        assert!(matches!(result, Err(HalError::JobNotFound(_))));
    }

    #[tokio::test]
    async fn test_collected_jobs_are_released() {
        let backend = SimulatorBackend::new();
        let request = ExecutionRequest::shots(10).with_seed(3);
        for _ in 0..5 {
            backend.run(&bell(), &request).await.unwrap();
        }
        assert_eq!(backend.lock_jobs().len(), 0);

        let job_id = backend.submit(&bell(), &request).await.unwrap();
        assert_eq!(backend.lock_jobs().len(), 1);
        backend.result(&job_id).await.unwrap();
        assert!(matches!(
            backend.result(&job_id).await,
            Err(HalError::JobNotFound(_))
        ));
        assert!(backend.lock_jobs().is_empty());
    }

    #[tokio::test]
    async fn test_failed_job_is_not_retained() {
        let mut circuit = Circuit::with_size("bare", 1, 0);
        circuit.h(QubitId(0)).unwrap();

        let backend = SimulatorBackend::new();
        assert!(backend.submit(&circuit, &ExecutionRequest::shots(10)).await.is_err());
        assert!(backend.lock_jobs().is_empty());
    }
}
