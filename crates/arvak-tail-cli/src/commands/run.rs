//! Run command implementation.

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use arvak_hal::ExecutionMode;
use arvak_tail::{DepthSweep, TailRunner};

use super::common::{create_backend, load_config};

/// Execute the run command.
pub async fn execute(
    config_path: &str,
    mode: Option<&str>,
    shots: Option<u32>,
    max_depth: Option<usize>,
    json: bool,
) -> Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(mode) = mode {
        config.mode = mode.parse::<ExecutionMode>()?;
    }
    if let Some(shots) = shots {
        config.shots = shots;
    }
    if let Some(max_depth) = max_depth {
        config.max_depth = max_depth;
    }
    config.validate()?;

    let problem = config.problem()?;
    if !json {
        println!(
            "{} Tail assignment: {} flights, {} rotations on {} ({})",
            style("→").cyan().bold(),
            problem.num_flights(),
            problem.num_resources(),
            style(&config.backend).yellow(),
            config.mode
        );
        if config.mode == ExecutionMode::Shots {
            println!(
                "  {} shots x {} block(s), {} ansatz",
                config.shots, config.repetitions, config.ansatz
            );
        } else {
            println!("  {} ansatz", config.ansatz);
        }
    }

    let backend = create_backend(&config.backend)?;
    if !backend.availability().await?.is_online() {
        anyhow::bail!("Backend '{}' is not available", config.backend);
    }
    let runner = TailRunner::from_config(&config, backend)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.set_message(format!("Evaluating depths 1..={}...", config.max_depth));
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));

    let sweep = runner.depth_sweep(&config.params, config.max_depth).await;
    spinner.finish_and_clear();
    let sweep = sweep?;

    if json {
        println!("{}", serde_json::to_string_pretty(&sweep)?);
    } else {
        print_sweep(&sweep);
    }

    Ok(())
}

fn print_sweep(sweep: &DepthSweep) {
    println!("\n{} Depth sweep:", style("✓").green().bold());
    println!(
        "  {:>5}  {:>10}  {:>12}  {:>10}  {:>8}  {:>6}",
        "depth", "P(success)", "E[cost]", "best", "2q gates", "layers"
    );
    for evaluation in &sweep.evaluations {
        let bar_len = (evaluation.success_probability * 20.0).round() as usize;
        println!(
            "  {:>5}  {:>10.4}  {:>12.4}  {:>10.4}  {:>8}  {:>6}  {}",
            evaluation.depth,
            evaluation.success_probability,
            evaluation.cost_expectation,
            evaluation.statistics.best_cost,
            evaluation.two_qubit_gates,
            evaluation.circuit_depth,
            style("█".repeat(bar_len)).green()
        );
    }
}
