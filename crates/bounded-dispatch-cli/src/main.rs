use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

/// Top-level CLI argument parser for the `bdv` command
#[derive(Parser)]
#[command(
    name = "bdv",
    about = "bounded-dispatch — clipped kernel dispatch and out-of-region write checks",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands for the `bdv` CLI
#[derive(Subcommand)]
enum Commands {
    /// Dispatch the linear-index kernel over a clipped region and verify it
    Run {
        /// Domain width
        #[arg(long)]
        dim_x: u32,
        /// Domain height
        #[arg(long)]
        dim_y: u32,
        /// Clip along x to [START, END); full width if omitted
        #[arg(long, num_args = 2, value_names = ["START", "END"])]
        x: Option<Vec<u32>>,
        /// Clip along y to [START, END); full height if omitted
        #[arg(long, num_args = 2, value_names = ["START", "END"])]
        y: Option<Vec<u32>>,
        /// Execution backend: sequential (default) or parallel
        #[arg(long, default_value = "sequential")]
        backend: String,
        /// Output format: text (default) or json
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Run every case in a YAML case file
    Check {
        /// Path to the case file
        cases: PathBuf,
        /// Override the backend named in the file
        #[arg(long)]
        backend: Option<String>,
        /// Output format: text (default) or json
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Validate a YAML case file without running it
    Validate {
        /// Path to the case file
        cases: PathBuf,
    },
}

/// Dispatch a parsed CLI subcommand to its handler
fn run_command(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Run {
            dim_x,
            dim_y,
            x,
            y,
            backend,
            format,
        } => {
            let args = commands::run::RunArgs {
                dim_x,
                dim_y,
                x: commands::run::span(x.as_deref()),
                y: commands::run::span(y.as_deref()),
                backend: commands::parse_backend(&backend)?,
            };
            commands::run::run(&args, commands::OutputFormat::from_str(&format)?)
        }
        Commands::Check {
            cases,
            backend,
            format,
        } => {
            let backend = backend
                .as_deref()
                .map(commands::parse_backend)
                .transpose()?;
            commands::check::run(&cases, backend, commands::OutputFormat::from_str(&format)?)
        }
        Commands::Validate { cases } => commands::validate::run(&cases),
    }
}

/// Entry point: install logging, parse CLI arguments and run the subcommand
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run_command(cli.command) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
