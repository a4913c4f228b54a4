//! # renew CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use renew_cli::classify::{run_classify, ClassifyArgs};
use renew_cli::plans::{run_plans, PlansArgs};
use renew_cli::quote::{run_quote, QuoteArgs};

/// Update-license renewal tooling.
///
/// Lists renewal plans, prices them for a base price and discount, and
/// classifies update-expiry dates. Works offline; no license store is read.
#[derive(Parser, Debug)]
#[command(name = "renew", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the renewal plan catalog.
    Plans(PlansArgs),

    /// Price every renewal plan for a base price and discount.
    Quote(QuoteArgs),

    /// Classify an update-expiry instant as active, expired, or never expiring.
    Classify(ClassifyArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut stdout = std::io::stdout().lock();
    let result = match cli.command {
        Commands::Plans(args) => run_plans(&args, &mut stdout),
        Commands::Quote(args) => run_quote(&args, &mut stdout),
        Commands::Classify(args) => run_classify(&args, &mut stdout),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
