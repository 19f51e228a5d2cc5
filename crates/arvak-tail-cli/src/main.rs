//! Arvak Tail-Assignment Command-Line Interface
//!
//! Builds QAOA circuits for tail-assignment instances, runs depth sweeps on
//! the local simulator and solves small instances exhaustively.
//!
//! ```text
//!                    A R V A K
//!          tail assignment / exact cover QAOA
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::circuit::CircuitFormat;
use commands::{circuit, instances, run, solve, version};

/// Arvak tail assignment - QAOA circuits for exact-cover scheduling
#[derive(Parser)]
#[command(name = "arvak-tail")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a depth sweep and report success probability per depth
    Run {
        /// Configuration file (YAML or JSON)
        #[arg(short, long)]
        config: String,

        /// Execution mode (statevector, shots)
        #[arg(short, long)]
        mode: Option<String>,

        /// Shots per experiment block
        #[arg(short, long)]
        shots: Option<u32>,

        /// Largest depth to evaluate
        #[arg(long)]
        max_depth: Option<usize>,

        /// Print the sweep as JSON
        #[arg(long)]
        json: bool,
    },

    /// Build and print the ansatz circuit
    Circuit {
        /// Configuration file (YAML or JSON)
        #[arg(short, long, conflicts_with = "instance")]
        config: Option<String>,

        /// Built-in instance name
        #[arg(short, long)]
        instance: Option<String>,

        /// Number of layers
        #[arg(short, long, default_value = "1")]
        depth: usize,

        /// Angles, comma separated (defaults to the configured angles)
        #[arg(short, long, value_delimiter = ',', allow_hyphen_values = true)]
        params: Option<Vec<f64>>,

        /// Ansatz kind (combined, interlaced)
        #[arg(short, long)]
        ansatz: Option<String>,

        /// Insert barriers between layers
        #[arg(long)]
        barriers: bool,

        /// Append measurements
        #[arg(long)]
        measure: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "summary")]
        format: CircuitFormat,
    },

    /// Enumerate all assignments and report the best exact cover
    Solve {
        /// Configuration file (YAML or JSON)
        #[arg(short, long, conflicts_with = "instance")]
        config: Option<String>,

        /// Built-in instance name
        #[arg(short, long)]
        instance: Option<String>,
    },

    /// List built-in instances
    Instances,

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Run {
            config,
            mode,
            shots,
            max_depth,
            json,
        } => run::execute(&config, mode.as_deref(), shots, max_depth, json).await,

        Commands::Circuit {
            config,
            instance,
            depth,
            params,
            ansatz,
            barriers,
            measure,
            format,
        } => circuit::execute(
            config.as_deref(),
            instance.as_deref(),
            depth,
            params,
            ansatz.as_deref(),
            barriers,
            measure,
            format,
        ),

        Commands::Solve { config, instance } => {
            solve::execute(config.as_deref(), instance.as_deref())
        }

        Commands::Instances => {
            instances::execute();
            Ok(())
        }

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
