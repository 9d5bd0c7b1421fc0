mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::locations::LocationsArgs;
use commands::model::ModelArgs;

/// Rooftop solar cash-flow projections
#[derive(Parser)]
#[command(
    name = "solarcf",
    version,
    about = "Rooftop solar cash-flow projections",
    long_about = "Projects the annual cash flows of a residential rooftop solar system \
                  with decimal precision: production, bill savings, incentives, \
                  depreciation, loan service, NPV, IRR, payback and LCOE."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log pipeline stages to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Project the cash flows of a rooftop solar system
    Model(ModelArgs),
    /// List the locations available for modeling
    Locations(LocationsArgs),
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

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("{}: {}", "warning".yellow().bold(), e);
    }
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Model(args) => commands::model::run_model(args),
        Commands::Locations(args) => commands::locations::run_locations(args),
        Commands::Version => {
            println!("solarcf {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
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
