//! Shared helpers for CLI commands.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use arvak_adapter_sim::SimulatorBackend;
use arvak_hal::Backend;
use arvak_tail::{TailConfig, instances};

/// Load a configuration file and apply environment overrides.
pub fn load_config(path: &str) -> Result<TailConfig> {
    if !Path::new(path).exists() {
        anyhow::bail!("File not found: {path}");
    }
    let mut config = TailConfig::from_file(path)
        .with_context(|| format!("Failed to load configuration: {path}"))?;
    config
        .apply_env_overrides()
        .context("Invalid ARVAK_TAIL_* environment override")?;
    debug!("Loaded configuration from {path}");
    Ok(config)
}

/// Resolve `--config` or `--instance` into a configuration.
pub fn resolve_config(config: Option<&str>, instance: Option<&str>) -> Result<TailConfig> {
    match (config, instance) {
        (Some(path), _) => load_config(path),
        (None, Some(name)) => {
            let problem = instances::by_name(name).ok_or_else(|| {
                let names: Vec<&str> = instances::INSTANCES.iter().map(|(n, _)| *n).collect();
                anyhow::anyhow!(
                    "Unknown instance: '{name}'. Available: {}",
                    names.join(", ")
                )
            })?;
            Ok(TailConfig::for_problem(&problem))
        }
        (None, None) => anyhow::bail!("Either --config or --instance is required"),
    }
}

/// Create the backend named in the configuration.
pub fn create_backend(name: &str) -> Result<Arc<dyn Backend>> {
    match name.to_lowercase().as_str() {
        "simulator" | "sim" => Ok(Arc::new(SimulatorBackend::new())),
        other => anyhow::bail!("Unknown backend: '{other}'. Available: simulator"),
    }
}
