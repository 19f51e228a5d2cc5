//! Success probability, cost expectation and best cost from execution
//! results.
//!
//! Statevector results are evaluated against the precomputed
//! [`StateTable`]; shot results are evaluated key by key. The extractor is
//! bound to one [`ExecutionMode`] and rejects results of the other shape.

use std::borrow::Cow;

use arvak_hal::{Counts, ExecutionMode, ExecutionResult, ExperimentResult};
use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::assignment::Assignment;
use crate::cost::{StateTable, cost, is_solution};
use crate::error::{TailError, TailResult};
use crate::problem::TailAssignment;

/// States whose probability falls below this are reported as numerically
/// unreliable when they carry the best cost.
pub const NEGLIGIBLE_PROBABILITY: f64 = 1e-12;

/// Per-experiment statistics of one job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementStatistics {
    /// Cost expectation per experiment block (a single entry for
    /// statevector results).
    pub expectations: Vec<f64>,
    /// Not computed; always `None`.
    pub variances: Option<Vec<f64>>,
    /// Highest cost over all observed states.
    pub best_cost: f64,
}

/// Evaluates execution results of tail-assignment circuits.
#[derive(Debug, Clone)]
pub struct StatisticsExtractor<'a> {
    problem: &'a TailAssignment,
    mode: ExecutionMode,
    table: Option<StateTable>,
    probability_floor: f64,
}

impl<'a> StatisticsExtractor<'a> {
    /// Create an extractor. Statevector mode evaluates all `2^R` states up
    /// front.
    pub fn new(problem: &'a TailAssignment, mode: ExecutionMode) -> TailResult<Self> {
        let table = match mode {
            ExecutionMode::Statevector => Some(StateTable::build(problem)?),
            ExecutionMode::Shots => None,
        };
        Ok(Self {
            problem,
            mode,
            table,
            probability_floor: 0.0,
        })
    }

    /// States with probability at or below `floor` are ignored when
    /// looking for the best cost in statevector mode.
    pub fn with_probability_floor(mut self, floor: f64) -> Self {
        self.probability_floor = floor.max(0.0);
        self
    }

    /// Mode this extractor evaluates.
    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    /// The state table, present in statevector mode.
    pub fn state_table(&self) -> Option<&StateTable> {
        self.table.as_ref()
    }

    /// Probability of measuring an exact cover.
    pub fn success_probability(&self, result: &ExecutionResult) -> TailResult<f64> {
        let probability = match self.mode {
            ExecutionMode::Statevector => {
                let (table, probs) = self.exact(result)?;
                table.feasibility_vector().dot(&ArrayView1::from(&probs[..]))
            }
            ExecutionMode::Shots => {
                let blocks = self.sampled(result)?;
                let total: u64 = blocks.iter().map(|b| b.shots).sum();
                let solutions: u64 = blocks.iter().map(|b| b.solution_counts).sum();
                solutions as f64 / total as f64
            }
        };
        debug!("Success probability: {probability:.6}");
        Ok(probability)
    }

    /// Expected cost over the whole job.
    pub fn cost_expectation(&self, result: &ExecutionResult) -> TailResult<f64> {
        match self.mode {
            ExecutionMode::Statevector => {
                let (table, probs) = self.exact(result)?;
                Ok(table.costs().dot(&ArrayView1::from(&probs[..])))
            }
            ExecutionMode::Shots => {
                let blocks = self.sampled(result)?;
                let total: u64 = blocks.iter().map(|b| b.shots).sum();
                let weighted: f64 = blocks.iter().map(|b| b.weighted_cost).sum();
                Ok(weighted / total as f64)
            }
        }
    }

    /// Per-block expectations and the best observed cost.
    pub fn measurement_statistics(
        &self,
        result: &ExecutionResult,
    ) -> TailResult<MeasurementStatistics> {
        match self.mode {
            ExecutionMode::Statevector => {
                let (table, probs) = self.exact(result)?;
                let expectation = table.costs().dot(&ArrayView1::from(&probs[..]));
                let best_cost = self.best_exact_cost(table, &probs)?;
                Ok(MeasurementStatistics {
                    expectations: vec![expectation],
                    variances: None,
                    best_cost,
                })
            }
            ExecutionMode::Shots => {
                let blocks = self.sampled(result)?;
                let expectations = blocks
                    .iter()
                    .map(|b| b.weighted_cost / b.shots as f64)
                    .collect();
                let best_cost = blocks
                    .iter()
                    .filter_map(|b| b.best_cost)
                    .fold(f64::NEG_INFINITY, f64::max);
                if best_cost == f64::NEG_INFINITY {
                    return Err(TailError::NoData(
                        "no bitstring was observed in any experiment".into(),
                    ));
                }
                Ok(MeasurementStatistics {
                    expectations,
                    variances: None,
                    best_cost,
                })
            }
        }
    }

    fn check_mode(&self, result: &ExecutionResult) -> TailResult<()> {
        if result.mode != self.mode {
            return Err(TailError::UnsupportedResult {
                mode: self.mode,
                reason: format!("result was produced in {} mode", result.mode),
            });
        }
        Ok(())
    }

    fn exact(&self, result: &ExecutionResult) -> TailResult<(&StateTable, Vec<f64>)> {
        self.check_mode(result)?;
        let table = self.table.as_ref().ok_or_else(|| TailError::UnsupportedResult {
            mode: self.mode,
            reason: "no state table".into(),
        })?;
        let probs = result
            .probabilities()
            .ok_or_else(|| TailError::NoData("result carries no statevector".into()))?;
        if probs.len() != table.len() {
            return Err(TailError::UnsupportedResult {
                mode: self.mode,
                reason: format!(
                    "statevector has {} amplitudes, expected {}",
                    probs.len(),
                    table.len()
                ),
            });
        }
        if probs.iter().sum::<f64>() <= 0.0 {
            return Err(TailError::NoData("statevector has zero norm".into()));
        }
        Ok((table, probs))
    }

    fn best_exact_cost(&self, table: &StateTable, probs: &[f64]) -> TailResult<f64> {
        let (index, best) = probs
            .iter()
            .zip(table.costs().iter())
            .enumerate()
            .filter(|(_, (p, _))| **p > self.probability_floor)
            .map(|(i, (_, &c))| (i, c))
            .fold(None, |acc: Option<(usize, f64)>, (i, c)| match acc {
                Some((_, b)) if b >= c => acc,
                _ => Some((i, c)),
            })
            .ok_or_else(|| {
                TailError::NoData(format!(
                    "no state has probability above {}",
                    self.probability_floor
                ))
            })?;
        if probs[index] < NEGLIGIBLE_PROBABILITY {
            warn!(
                "Best cost {best} comes from state {} with negligible probability {:e}",
                Assignment::from_index(index, table.num_resources()),
                probs[index]
            );
        }
        Ok(best)
    }

    fn sampled(&self, result: &ExecutionResult) -> TailResult<Vec<BlockSummary>> {
        self.check_mode(result)?;
        if result.experiments.is_empty() {
            return Err(TailError::NoData("result carries no counts".into()));
        }
        let mut blocks = Vec::with_capacity(result.experiments.len());
        for (i, experiment) in result.experiments.iter().enumerate() {
            if experiment.shots == 0 && experiment.counts.is_empty() {
                warn!("Skipping experiment {i}: zero shots");
                continue;
            }
            blocks.push(self.summarize(i, experiment)?);
        }
        if blocks.is_empty() {
            return Err(TailError::NoData("all experiments have zero shots".into()));
        }
        Ok(blocks)
    }

    fn summarize(&self, index: usize, experiment: &ExperimentResult) -> TailResult<BlockSummary> {
        let observed = experiment.counts.total_shots();
        if observed == 0 {
            return Err(TailError::NoData(format!(
                "experiment {index} declares {} shots but recorded no outcomes",
                experiment.shots
            )));
        }
        if observed != experiment.shots {
            return Err(TailError::UnsupportedResult {
                mode: self.mode,
                reason: format!(
                    "experiment {index} declares {} shots but its counts sum to {observed}",
                    experiment.shots
                ),
            });
        }
        let counts = decode_counts(&experiment.counts, self.problem.num_resources())?;
        let mut summary = BlockSummary {
            shots: experiment.shots,
            solution_counts: 0,
            weighted_cost: 0.0,
            best_cost: None,
        };
        for (bitstring, count) in counts.iter() {
            if count == 0 {
                continue;
            }
            let x = Assignment::from_bitstring(bitstring, self.problem.num_resources())?;
            let c = cost(self.problem, &x)?;
            if is_solution(self.problem, &x)? {
                summary.solution_counts += count;
            }
            summary.weighted_cost += c * count as f64;
            summary.best_cost = Some(summary.best_cost.map_or(c, |b| b.max(c)));
        }
        Ok(summary)
    }
}

struct BlockSummary {
    shots: u64,
    solution_counts: u64,
    weighted_cost: f64,
    best_cost: Option<f64>,
}

fn is_integer_key(key: &str) -> bool {
    ["0x", "0X", "0b", "0B"].iter().any(|p| key.starts_with(p))
}

/// Histograms keyed by integers (`"0x5"`) become width-`R` bitstrings;
/// bitstring-keyed histograms pass through.
fn decode_counts(counts: &Counts, width: usize) -> TailResult<Cow<'_, Counts>> {
    if !counts.is_empty() && counts.iter().all(|(k, _)| is_integer_key(k)) {
        Ok(Cow::Owned(Counts::from_integer_keys(counts.iter(), width)?))
    } else {
        Ok(Cow::Borrowed(counts))
    }
}
