//! hotpush CLI - over-the-air bundle deployment helper
//!
//! This is the main entry point for the hotpush command-line interface.

mod cli;
mod commands;
mod output;
mod version;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};
use output::OutputMode;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI args
    let cli = Cli::parse();

    // JSON mode affects both user-facing output and log records
    output::set_mode(if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    });
    init_tracing(cli.verbose, cli.quiet, cli.json);

    let result = match cli.command {
        Commands::Version(args) => commands::version::run(args),
        Commands::Regions(args) => commands::regions::run(args, cli.config.as_deref()),
        Commands::Replicate(args) => commands::replicate::run(args, cli.config.as_deref()).await,
        Commands::Bump(args) => commands::bump::run(args, cli.config.as_deref()),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        output::error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

/// Initialize tracing with appropriate verbosity
fn init_tracing(verbose: u8, quiet: bool, json: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            // User-facing output goes through `output`; logs are for diagnosis
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
