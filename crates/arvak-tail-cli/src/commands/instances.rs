//! Instances command implementation.

use console::style;

use arvak_tail::cost::ReferenceSolution;
use arvak_tail::instances::{INSTANCES, by_name};

/// Execute the instances command.
pub fn execute() {
    println!("{} Built-in instances:\n", style("Arvak").cyan().bold());

    for (name, description) in INSTANCES {
        println!("  {} {}", style("●").green(), style(name).bold());
        println!("    {description}");
        if let Some(problem) = by_name(name) {
            print!(
                "    Flights: {}, rotations: {}",
                problem.num_flights(),
                problem.num_resources()
            );
            if let Ok(reference) = ReferenceSolution::solve(&problem) {
                print!(", exact covers: {}", reference.num_solutions);
            }
            println!();
        }
        println!();
    }
}
