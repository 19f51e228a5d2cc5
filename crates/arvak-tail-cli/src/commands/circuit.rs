//! Circuit command implementation.

use anyhow::{Context, Result};
use clap::ValueEnum;
use console::style;

use arvak_hal::ExecutionMode;
use arvak_ir::Circuit;
use arvak_tail::{AnsatzKind, TailAnsatz};

use super::common::resolve_config;

/// Output format of the circuit command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CircuitFormat {
    /// Gate counts and depth
    Summary,
    /// OpenQASM 3
    Qasm,
    /// OpenQASM 2
    Qasm2,
    /// Serialized circuit
    Json,
}

/// Execute the circuit command.
#[allow(clippy::too_many_arguments)]
pub fn execute(
    config: Option<&str>,
    instance: Option<&str>,
    depth: usize,
    params: Option<Vec<f64>>,
    ansatz: Option<&str>,
    barriers: bool,
    measure: bool,
    format: CircuitFormat,
) -> Result<()> {
    let mut config = resolve_config(config, instance)?;
    if let Some(kind) = ansatz {
        config.ansatz = kind.parse::<AnsatzKind>()?;
    }
    config.use_barrier |= barriers;
    if measure {
        config.mode = ExecutionMode::Shots;
    }

    let problem = config.problem()?;
    let params = match params {
        Some(params) => params,
        None => {
            let needed = config.ansatz.params_per_layer() * depth;
            config
                .params_for(depth)
                .with_context(|| format!("Pass --params with {needed} angles"))?
                .to_vec()
        }
    };

    let circuit = TailAnsatz::new(&problem, config.ansatz_options()).build(depth, &params)?;

    match format {
        CircuitFormat::Summary => print_summary(&circuit, config.ansatz, depth),
        CircuitFormat::Qasm => print!("{}", arvak_qasm3::emit(&circuit)),
        CircuitFormat::Qasm2 => print!("{}", arvak_qasm3::emit_qasm2(&circuit)),
        CircuitFormat::Json => println!("{}", serde_json::to_string_pretty(&circuit)?),
    }

    Ok(())
}

fn print_summary(circuit: &Circuit, kind: AnsatzKind, depth: usize) {
    println!(
        "{} {} ansatz, {} layer(s)",
        style("✓").green().bold(),
        style(kind).cyan(),
        depth
    );
    println!("  Qubits:          {}", circuit.num_qubits());
    println!("  Operations:      {}", circuit.num_ops());
    println!("  Depth:           {}", style(circuit.depth()).yellow());
    println!("  Two-qubit gates: {}", circuit.num_two_qubit_gates());
    println!("  Gates:");
    for (name, count) in circuit.gate_counts() {
        println!("    {name:<8} {count:>6}");
    }
}
