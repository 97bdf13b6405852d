//! Casekit CLI - Main Entry Point
//!
//! Parses, converts and executes textual test scripts. With no subcommand the
//! interactive console flow starts: load or build a test case, review it,
//! run it, save it.

use clap::{Parser, Subcommand};

mod builder;
mod commands;
mod config;
mod console;
mod output;

use commands::{convert, list, new, run, show};

/// Casekit - textual test-case authoring and execution toolkit
#[derive(Parser)]
#[command(name = "casekit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to the configuration file (defaults to ./casekit.toml if present)
    #[arg(long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a script and execute it against the matching backend
    Run(run::RunArgs),

    /// Parse a script and print its summary
    Show(show::ShowArgs),

    /// Convert a script to the legacy or narrative dialect
    Convert(convert::ConvertArgs),

    /// List available test scripts
    List(list::ListArgs),

    /// Build a test case interactively
    New(new::NewArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .init();

    let config = config::CasekitConfig::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Some(Commands::Run(args)) => run::execute(args, &config, cli.format).await?,
        Some(Commands::Show(args)) => show::execute(args, &config)?,
        Some(Commands::Convert(args)) => convert::execute(args, &config)?,
        Some(Commands::List(args)) => list::execute(args, &config, cli.format)?,
        Some(Commands::New(args)) => new::execute(args, &config).await?,
        None => console::run(&config).await?,
    }

    Ok(())
}
