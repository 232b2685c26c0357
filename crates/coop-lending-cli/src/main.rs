mod commands;
mod input;
mod output;
mod settings;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::amortization::{QuoteArgs, ScheduleArgs};
use commands::loans::LoanScheduleArgs;

/// Loan amortization schedules for cooperative lending
#[derive(Parser)]
#[command(
    name = "coop-lend",
    version,
    about = "Loan amortization schedules for cooperative lending",
    long_about = "Generates fixed-installment amortization schedules with decimal precision, \
                  quotes minimum and level payments, and creates the one-off schedule for a \
                  released loan."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Settings file (defaults to ./coop-lend.toml when present)
    #[arg(long, global = true)]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an amortization schedule for loan terms and a periodic payment
    Schedule(ScheduleArgs),
    /// Quote the minimum and level payments for loan terms
    PaymentQuote(QuoteArgs),
    /// Create the schedule for a released loan (refused if one already exists)
    LoanSchedule(LoanScheduleArgs),
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

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();

    let settings = match settings::load_settings(cli.config.as_deref()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };
    init_tracing(&settings.log_filter);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Schedule(args) => commands::amortization::run_schedule(args, &settings),
        Commands::PaymentQuote(args) => commands::amortization::run_quote(args, &settings),
        Commands::LoanSchedule(args) => commands::loans::run_loan_schedule(args, &settings),
        Commands::Version => {
            println!("coop-lend {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
