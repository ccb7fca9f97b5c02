mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::mortgage::{FormatArgs, LoanArgs};
use mortgage_calc_core::FieldErrors;

/// Mortgage repayment calculator
#[derive(Parser)]
#[command(
    name = "mortgage-calc",
    version,
    about = "Mortgage repayment calculator",
    long_about = "Validates loan amount, term, interest rate and mortgage type, then \
                  computes monthly and total repayments with decimal precision for \
                  repayment and interest-only mortgages."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Enable debug logging (RUST_LOG still applies when unset)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate monthly and total repayments
    #[command(alias = "repayment")]
    Calculate(LoanArgs),
    /// Check loan fields without calculating
    Validate(LoanArgs),
    /// Insert thousands separators into a number
    Format(FormatArgs),
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

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Calculate(args) => commands::mortgage::run_calculate(args),
        Commands::Validate(args) => commands::mortgage::run_validate(args),
        Commands::Format(args) => commands::mortgage::run_format(args),
        Commands::Version => {
            println!("mortgage-calc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            if let Some(errors) = e.downcast_ref::<FieldErrors>() {
                for (field, err) in errors.iter() {
                    eprintln!("{} {}: {}", "invalid".red().bold(), field, err);
                }
            } else {
                eprintln!("{}: {}", "error".red().bold(), e);
            }
            process::exit(1);
        }
    }
}
