//! Solve command implementation.

use anyhow::Result;
use console::style;

use arvak_tail::ReferenceSolution;

use super::common::resolve_config;

/// Execute the solve command.
pub fn execute(config: Option<&str>, instance: Option<&str>) -> Result<()> {
    let config = resolve_config(config, instance)?;
    let problem = config.problem()?;

    println!(
        "{} Enumerating 2^{} assignments ({} flights, mu = {})",
        style("→").cyan().bold(),
        problem.num_resources(),
        problem.num_flights(),
        problem.mu()
    );

    let reference = ReferenceSolution::solve(&problem)?;
    println!("  Exact covers: {}", style(reference.num_solutions).yellow());
    println!("  Highest cost: {:.4}", reference.optimum);

    match reference.best {
        Some((assignment, cost)) => {
            println!(
                "\n{} Best cover: {} (cost {:.4})",
                style("✓").green().bold(),
                style(assignment.to_bitstring()).cyan(),
                cost
            );
            println!("  Rotations: {:?}", assignment.selected());
        }
        None => {
            println!("\n{} No exact cover exists", style("✗").red().bold());
        }
    }

    Ok(())
}
