//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - QAOA circuits for tail assignment",
        style("Arvak").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  arvak-ir           Circuit intermediate representation");
    println!("  arvak-qasm3        OpenQASM emitter");
    println!("  arvak-hal          Backend contract");
    println!("  arvak-adapter-sim  Statevector simulator");
    println!("  arvak-tail         Cost model, ansatz and statistics");
    println!("  arvak-tail-cli     Command-line interface");
    println!();
    println!("License:    {}", style("Apache-2.0").dim());
}
