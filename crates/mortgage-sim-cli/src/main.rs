mod commands;
mod input;
mod output;
mod store;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use serde_json::Value;
use std::path::PathBuf;
use std::process;

use commands::simulation::{CompareArgs, SimulateArgs};
use commands::stored::{ExportArgs, RemoveArgs};

/// Mortgage schedule simulator
#[derive(Parser)]
#[command(
    name = "msim",
    version,
    about = "Simulate and compare SAC and PRICE mortgage schedules",
    long_about = "A CLI for projecting mortgage amortization schedules with decimal \
                  precision. Supports constant-amortization (SAC) and constant-installment \
                  (PRICE) regimes with a monetary-correction index, side-by-side comparison, \
                  a local list of saved simulations and semicolon CSV export."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// File holding saved simulations
    #[arg(long, default_value = "simulations.json", global = true)]
    store: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a SAC or PRICE schedule
    Simulate(SimulateArgs),
    /// Compare SAC and PRICE for the same loan
    Compare(CompareArgs),
    /// List saved simulations
    List,
    /// Remove a saved simulation by index
    Remove(RemoveArgs),
    /// Export a saved simulation's schedule as semicolon CSV
    Export(ExportArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result: Result<Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Simulate(args) => commands::simulation::run_simulate(args, &cli.store),
        Commands::Compare(args) => commands::simulation::run_compare(args),
        Commands::List => commands::stored::run_list(&cli.store),
        Commands::Remove(args) => commands::stored::run_remove(args, &cli.store),
        Commands::Export(args) => commands::stored::run_export(args, &cli.store),
        Commands::Version => {
            println!("msim {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(Value::Null) => process::exit(0),
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
