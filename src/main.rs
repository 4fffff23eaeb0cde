use clap::Parser;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::Path;

mod cli;
mod commands;
mod config;
mod error;
mod experience;
mod loader;
mod render;
mod site;
mod storage;
mod terminal;
mod theme;
mod visitor;

use cli::{Cli, Commands};
use config::{Config, LogLevel};

fn setup_logging(data_dir: &Path, log_level: &LogLevel) -> Result<()> {
    let log_dir = data_dir.join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("portfolio.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    // RUST_LOG env var takes precedence, otherwise use config log_level
    let mut builder = env_logger::Builder::new();

    if std::env::var("RUST_LOG").is_ok() {
        builder.parse_default_env();
    } else {
        builder.filter_level(log_level.to_level_filter());
    }

    builder.target(env_logger::Target::Pipe(target)).init();

    info!("Logging initialized, writing to: {}", log_file.display());
    info!(
        "Log level: {} (from {})",
        log_level.as_filter(),
        if std::env::var("RUST_LOG").is_ok() { "RUST_LOG env" } else { "config" }
    );
    Ok(())
}

fn run(cli: Cli, config: Config) -> Result<()> {
    match cli.command.unwrap_or(Commands::Shell { no_loader: false }) {
        Commands::Shell { no_loader } => commands::shell::run(no_loader, &config),
        Commands::Exec { input } => commands::exec::run(&input, &config),
        Commands::Visitors { action } => commands::visitors::run(action, &config),
        Commands::Theme { action } => commands::theme::run(action, &config),
        Commands::Status { format } => commands::status::run(cli::OutputFormat::resolve(format), &config),
        Commands::Config { action } => commands::config::run(action, &config),
        Commands::Completions { shell } => commands::completions::run(shell),
    }
}

fn main() -> Result<()> {
    // Parse CLI arguments first
    let cli = Cli::parse();

    // Load configuration (before logging, so log messages in Config::load are silent)
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    // Setup logging with log level from config (or RUST_LOG env var)
    setup_logging(&config.data_dir(), &config.log_level).context("Failed to setup logging")?;

    info!("Starting portfolio with config from: {:?}", cli.config);

    run(cli, config).context("Command failed")?;

    Ok(())
}
