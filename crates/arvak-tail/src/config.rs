//! Run configuration.
//!
//! Configuration is read from YAML (`.yaml`, `.yml`) or JSON (`.json`)
//! files. Selected fields can be overridden from the environment:
//!
//! - `ARVAK_TAIL_BACKEND`
//! - `ARVAK_TAIL_MODE` (`statevector` or `shots`)
//! - `ARVAK_TAIL_SHOTS`
//! - `ARVAK_TAIL_SEED`

use std::collections::BTreeMap;
use std::path::Path;

use arvak_hal::{ExecutionMode, ExecutionRequest};
use serde::{Deserialize, Serialize};

use crate::ansatz::{AnsatzKind, AnsatzOptions};
use crate::error::{TailError, TailResult};
use crate::problem::{DEFAULT_MU, TailAssignment};

/// Complete configuration of a tail-assignment run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TailConfig {
    /// Cost vector, one entry per resource.
    #[serde(rename = "CR", default, skip_serializing_if = "Option::is_none")]
    pub cr: Option<Vec<f64>>,

    /// Resource matrix, one row per flight.
    #[serde(rename = "FR", default, skip_serializing_if = "Option::is_none")]
    pub fr: Option<Vec<Vec<f64>>>,

    /// Penalty weight.
    #[serde(default = "default_mu")]
    pub mu: f64,

    /// Insert barriers between layers.
    #[serde(default, rename = "usebarrier", alias = "use_barrier")]
    pub use_barrier: bool,

    /// Layer shape.
    #[serde(default)]
    pub ansatz: AnsatzKind,

    /// Backend name.
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Execution mode.
    #[serde(default)]
    pub mode: ExecutionMode,

    /// Shots per experiment block.
    #[serde(default = "default_shots")]
    pub shots: u32,

    /// Experiment blocks per job.
    #[serde(default = "default_repetitions")]
    pub repetitions: u32,

    /// Sampling seed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Largest depth of a sweep.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Angles by depth.
    #[serde(default)]
    pub params: BTreeMap<usize, Vec<f64>>,
}

fn default_mu() -> f64 {
    DEFAULT_MU
}

fn default_backend() -> String {
    "simulator".to_string()
}

fn default_shots() -> u32 {
    1024
}

fn default_repetitions() -> u32 {
    1
}

fn default_max_depth() -> usize {
    1
}

impl Default for TailConfig {
    fn default() -> Self {
        Self {
            cr: None,
            fr: None,
            mu: default_mu(),
            use_barrier: false,
            ansatz: AnsatzKind::default(),
            backend: default_backend(),
            mode: ExecutionMode::default(),
            shots: default_shots(),
            repetitions: default_repetitions(),
            seed: None,
            max_depth: default_max_depth(),
            params: BTreeMap::new(),
        }
    }
}

impl TailConfig {
    /// Configuration for an existing problem with default run settings.
    pub fn for_problem(problem: &TailAssignment) -> Self {
        Self {
            cr: Some(problem.cr().to_vec()),
            fr: Some(
                problem
                    .fr()
                    .rows()
                    .into_iter()
                    .map(|row| row.to_vec())
                    .collect(),
            ),
            mu: problem.mu(),
            ..Self::default()
        }
    }

    /// Load and validate a configuration file, choosing the format by
    /// extension.
    pub fn from_file<P: AsRef<Path>>(path: P) -> TailResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml_str(&contents),
            Some("json") => Self::from_json_str(&contents),
            _ => Err(TailError::Config(format!(
                "unsupported configuration format: {}",
                path.display()
            ))),
        }
    }

    /// Parse and validate YAML.
    pub fn from_yaml_str(contents: &str) -> TailResult<Self> {
        let config: Self =
            serde_yaml_ng::from_str(contents).map_err(|e| TailError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate JSON.
    pub fn from_json_str(contents: &str) -> TailResult<Self> {
        let config: Self =
            serde_json::from_str(contents).map_err(|e| TailError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize as YAML.
    pub fn to_yaml(&self) -> TailResult<String> {
        serde_yaml_ng::to_string(self).map_err(|e| TailError::Config(e.to_string()))
    }

    /// Check the configuration is complete and consistent.
    pub fn validate(&self) -> TailResult<()> {
        self.problem()?;
        if self.shots == 0 {
            return Err(TailError::Config("shots must be at least 1".into()));
        }
        if self.repetitions == 0 {
            return Err(TailError::Config("repetitions must be at least 1".into()));
        }
        if self.max_depth == 0 {
            return Err(TailError::InvalidDepth(0));
        }
        let k = self.ansatz.params_per_layer();
        for (&depth, angles) in &self.params {
            if depth == 0 {
                return Err(TailError::InvalidDepth(0));
            }
            if angles.len() != k * depth {
                return Err(TailError::ParameterCount {
                    kind: self.ansatz,
                    depth,
                    expected: k * depth,
                    got: angles.len(),
                });
            }
        }
        Ok(())
    }

    /// Build the problem instance.
    pub fn problem(&self) -> TailResult<TailAssignment> {
        let cr = self.cr.as_ref().ok_or(TailError::MissingOption("CR"))?;
        let fr = self.fr.as_ref().ok_or(TailError::MissingOption("FR"))?;
        TailAssignment::from_rows(fr, cr)?.with_mu(self.mu)
    }

    /// Ansatz options for this configuration.
    pub fn ansatz_options(&self) -> AnsatzOptions {
        AnsatzOptions::default()
            .with_kind(self.ansatz)
            .with_barriers(self.use_barrier)
            .with_mode(self.mode)
    }

    /// Backend request for this configuration.
    pub fn execution_request(&self) -> ExecutionRequest {
        let request = match self.mode {
            ExecutionMode::Statevector => ExecutionRequest::statevector(),
            ExecutionMode::Shots => {
                ExecutionRequest::shots(self.shots).with_repetitions(self.repetitions)
            }
        };
        match self.seed {
            Some(seed) => request.with_seed(seed),
            None => request,
        }
    }

    /// Stored angles for `depth`.
    pub fn params_for(&self, depth: usize) -> TailResult<&[f64]> {
        self.params
            .get(&depth)
            .map(Vec::as_slice)
            .ok_or(TailError::MissingParameters { depth })
    }

    /// Apply overrides from a variable lookup, then re-validate.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> TailResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(backend) = lookup("ARVAK_TAIL_BACKEND") {
            self.backend = backend;
        }
        if let Some(mode) = lookup("ARVAK_TAIL_MODE") {
            self.mode = mode.parse()?;
        }
        if let Some(shots) = lookup("ARVAK_TAIL_SHOTS") {
            self.shots = shots
                .parse()
                .map_err(|e| TailError::Config(format!("ARVAK_TAIL_SHOTS='{shots}': {e}")))?;
        }
        if let Some(seed) = lookup("ARVAK_TAIL_SEED") {
            self.seed = Some(
                seed.parse()
                    .map_err(|e| TailError::Config(format!("ARVAK_TAIL_SEED='{seed}': {e}")))?,
            );
        }
        self.validate()
    }

    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(&mut self) -> TailResult<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"
CR: [1.0, 1.0]
FR:
  - [1, 0]
  - [0, 1]
mu: 2.0
usebarrier: true
ansatz: interlaced
mode: shots
shots: 200
seed: 11
max_depth: 2
params:
  1: [0.1, 0.2, 0.3]
  2: [0.1, 0.2, 0.3, 0.4, 0.5, 0.6]
"#;

    #[test]
    fn test_parse_yaml() {
        let config = TailConfig::from_yaml_str(YAML).unwrap();
        assert_eq!(config.mu, 2.0);
        assert!(config.use_barrier);
        assert_eq!(config.ansatz, AnsatzKind::Interlaced);
        assert_eq!(config.mode, ExecutionMode::Shots);
        assert_eq!(config.params_for(2).unwrap().len(), 6);
        assert!(matches!(
            config.params_for(3),
            Err(TailError::MissingParameters { depth: 3 })
        ));

        let request = config.execution_request();
        assert_eq!(request.shots, 200);
        assert_eq!(request.seed, Some(11));

        let problem = config.problem().unwrap();
        assert_eq!(problem.num_resources(), 2);
        assert_eq!(problem.mu(), 2.0);
    }

    #[test]
    fn test_defaults() {
        let config = TailConfig::from_json_str(r#"{"CR": [1.0], "FR": [[1.0]]}"#).unwrap();
        assert_eq!(config.mu, 1.0);
        assert!(!config.use_barrier);
        assert_eq!(config.ansatz, AnsatzKind::Combined);
        assert_eq!(config.backend, "simulator");
        assert_eq!(config.mode, ExecutionMode::Statevector);
        assert_eq!(config.shots, 1024);
        assert_eq!(config.max_depth, 1);
    }

    #[test]
    fn test_missing_options() {
        assert!(matches!(
            TailConfig::from_json_str(r#"{"FR": [[1.0]]}"#),
            Err(TailError::MissingOption("CR"))
        ));
        assert!(matches!(
            TailConfig::from_json_str(r#"{"CR": [1.0]}"#),
            Err(TailError::MissingOption("FR"))
        ));
    }

    #[test]
    fn test_parameter_length_validation() {
        let json = r#"{"CR": [1.0], "FR": [[1.0]], "params": {"2": [0.1, 0.2]}}"#;
        assert!(matches!(
            TailConfig::from_json_str(json),
            Err(TailError::ParameterCount {
                depth: 2,
                expected: 4,
                got: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_overrides() {
        let mut config = TailConfig::from_yaml_str(YAML).unwrap();
        config
            .apply_overrides(|key| match key {
                "ARVAK_TAIL_MODE" => Some("statevector".into()),
                "ARVAK_TAIL_SHOTS" => Some("64".into()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.mode, ExecutionMode::Statevector);
        assert_eq!(config.shots, 64);
        assert_eq!(config.seed, Some(11));

        let err = config.apply_overrides(|key| {
            (key == "ARVAK_TAIL_SHOTS").then(|| "many".to_string())
        });
        assert!(matches!(err, Err(TailError::Config(_))));
    }

    #[test]
    fn test_round_trip_problem() {
        let problem = TailConfig::from_yaml_str(YAML).unwrap().problem().unwrap();
        let config = TailConfig::for_problem(&problem);
        assert_eq!(config.problem().unwrap(), problem);
    }
}
