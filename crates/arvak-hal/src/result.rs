//! Execution requests and results.
//!
//! A backend answers a request in one of two shapes, selected explicitly by
//! [`ExecutionMode`]:
//!
//! - **Statevector**: the dense amplitude vector of the final state, indexed
//!   so that bit `r` of the index is the value of qubit `r`.
//! - **Shots**: one or more experiment blocks, each a histogram of measured
//!   bitstrings. Bitstring keys are MSB-first: the leftmost character is the
//!   highest classical bit.

use std::fmt;
use std::str::FromStr;

use num_complex::Complex64;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{HalError, HalResult};

/// How a backend reports the outcome of a circuit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Exact amplitudes, no measurement.
    #[default]
    Statevector,
    /// Sampled measurement histograms.
    Shots,
}

impl ExecutionMode {
    /// Lowercase name of the mode.
    pub fn as_str(self) -> &'static str {
        match self {
            ExecutionMode::Statevector => "statevector",
            ExecutionMode::Shots => "shots",
        }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExecutionMode {
    type Err = HalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "statevector" | "exact" => Ok(ExecutionMode::Statevector),
            "shots" | "sampled" | "qasm" => Ok(ExecutionMode::Shots),
            other => Err(HalError::InvalidRequest(format!(
                "unknown execution mode '{other}' (expected 'statevector' or 'shots')"
            ))),
        }
    }
}

/// Parameters of a single submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionRequest {
    /// Result shape requested from the backend.
    pub mode: ExecutionMode,
    /// Shots per experiment block. Ignored in statevector mode.
    pub shots: u32,
    /// Number of independent experiment blocks. Ignored in statevector mode.
    pub repetitions: u32,
    /// Sampling seed for reproducible histograms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl ExecutionRequest {
    /// Request exact amplitudes.
    pub fn statevector() -> Self {
        Self {
            mode: ExecutionMode::Statevector,
            shots: 0,
            repetitions: 1,
            seed: None,
        }
    }

    /// Request a single histogram of `shots` samples.
    pub fn shots(shots: u32) -> Self {
        Self {
            mode: ExecutionMode::Shots,
            shots,
            repetitions: 1,
            seed: None,
        }
    }

    /// Set the number of experiment blocks.
    #[must_use]
    pub fn with_repetitions(mut self, repetitions: u32) -> Self {
        self.repetitions = repetitions;
        self
    }

    /// Fix the sampling seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the request is executable.
    pub fn validate(&self) -> HalResult<()> {
        if self.mode == ExecutionMode::Shots {
            if self.shots == 0 {
                return Err(HalError::InvalidRequest(
                    "shots mode requires at least one shot".into(),
                ));
            }
            if self.repetitions == 0 {
                return Err(HalError::InvalidRequest(
                    "shots mode requires at least one experiment block".into(),
                ));
            }
        }
        Ok(())
    }
}

/// Histogram of measured bitstrings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Counts {
    counts: FxHashMap<String, u64>,
}

impl Counts {
    /// Create an empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` observations of `bitstring`.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        *self.counts.entry(bitstring.into()).or_insert(0) += count;
    }

    /// Number of observations of `bitstring`.
    pub fn get(&self, bitstring: &str) -> u64 {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Sum of all counts.
    pub fn total_shots(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct bitstrings.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check whether no bitstring was recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate over `(bitstring, count)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Build a histogram from integer-encoded keys.
    ///
    /// Keys may be hexadecimal (`"0x5"`), binary (`"0b101"`) or decimal. Each
    /// is rendered as an MSB-first bitstring zero-padded to `width`.
    pub fn from_integer_keys<'a>(
        entries: impl IntoIterator<Item = (&'a str, u64)>,
        width: usize,
    ) -> HalResult<Self> {
        let mut counts = Self::new();
        for (key, count) in entries {
            let value = parse_integer_key(key)?;
            let bits = format!("{value:0width$b}");
            if bits.len() > width {
                return Err(HalError::MalformedOutcome(format!(
                    "outcome '{key}' does not fit in {width} bits"
                )));
            }
            counts.insert(bits, count);
        }
        Ok(counts)
    }
}

fn parse_integer_key(key: &str) -> HalResult<u64> {
    let key = key.trim();
    let parsed = if let Some(hex) = key.strip_prefix("0x").or_else(|| key.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16)
    } else if let Some(bin) = key.strip_prefix("0b").or_else(|| key.strip_prefix("0B")) {
        u64::from_str_radix(bin, 2)
    } else {
        key.parse::<u64>()
    };
    parsed.map_err(|e| HalError::MalformedOutcome(format!("invalid outcome key '{key}': {e}")))
}

impl FromIterator<(String, u64)> for Counts {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut counts = Self::new();
        for (bitstring, count) in iter {
            counts.insert(bitstring, count);
        }
        counts
    }
}

/// One sampled experiment block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentResult {
    /// Shots requested for this block.
    pub shots: u64,
    /// Observed histogram.
    pub counts: Counts,
}

impl ExperimentResult {
    /// Create a block whose shot count is the histogram total.
    pub fn new(counts: Counts) -> Self {
        Self {
            shots: counts.total_shots(),
            counts,
        }
    }

    /// Create a block with an explicit shot count.
    pub fn with_shots(counts: Counts, shots: u64) -> Self {
        Self { shots, counts }
    }
}

/// Result of a completed job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Mode the job ran in.
    pub mode: ExecutionMode,
    /// Final amplitudes (statevector mode).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statevector: Option<Vec<Complex64>>,
    /// Sampled blocks (shots mode).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub experiments: Vec<ExperimentResult>,
    /// Wall-clock execution time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,
}

impl ExecutionResult {
    /// Result carrying exact amplitudes.
    pub fn from_statevector(amplitudes: Vec<Complex64>) -> Self {
        Self {
            mode: ExecutionMode::Statevector,
            statevector: Some(amplitudes),
            experiments: vec![],
            execution_time_ms: None,
        }
    }

    /// Result carrying sampled blocks.
    pub fn from_experiments(experiments: Vec<ExperimentResult>) -> Self {
        Self {
            mode: ExecutionMode::Shots,
            statevector: None,
            experiments,
            execution_time_ms: None,
        }
    }

    /// Record the execution time.
    #[must_use]
    pub fn with_execution_time(mut self, ms: u64) -> Self {
        self.execution_time_ms = Some(ms);
        self
    }

    /// Basis-state probabilities `|amp|^2`, when amplitudes are present.
    pub fn probabilities(&self) -> Option<Vec<f64>> {
        self.statevector
            .as_ref()
            .map(|amps| amps.iter().map(Complex64::norm_sqr).collect())
    }
}
