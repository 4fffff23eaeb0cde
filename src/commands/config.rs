use colored::*;
use eyre::Result;

use crate::cli::{ConfigAction, OutputFormat};
use crate::config::Config;

pub fn run(action: ConfigAction, config: &Config) -> Result<()> {
    match action {
        ConfigAction::Show { format } => show(OutputFormat::resolve(format), config),
        ConfigAction::Get { key } => get(&key, config),
    }
}

fn show(format: OutputFormat, config: &Config) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(config)?);
        }
        OutputFormat::Yaml => {
            println!("{}", serde_yaml::to_string(config)?);
        }
        OutputFormat::Text => {
            println!("{}", "Portfolio Configuration".bold());
            println!();

            println!("{}:", "paths".cyan());
            println!("  data: {}", config.data_dir().display());
            println!();

            println!("{}:", "terminal".cyan());
            println!("  prompt: {}", config.terminal.prompt);
            println!("  start_visible: {}", config.terminal.start_visible);
            println!(
                "  timezone: {} (UTC{:+}m)",
                config.terminal.timezone_label, config.terminal.utc_offset_minutes
            );
            println!();

            println!("{}:", "visitors".cyan());
            println!("  capacity: {}", config.visitors.capacity);
            println!("  display_limit: {}", config.visitors.display_limit);
            println!("  placeholder: {}", config.visitors.placeholder);
            println!();

            println!("{}:", "theme".cyan());
            println!("  default: {}", config.theme.default);
        }
    }

    Ok(())
}

fn get(key: &str, config: &Config) -> Result<()> {
    match config.get(key) {
        Some(v) => println!("{}", v),
        None => eyre::bail!("Unknown config key: {}", key),
    }

    Ok(())
}
