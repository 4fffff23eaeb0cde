use clap::{Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::theme::Theme;

/// Output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

impl OutputFormat {
    /// Resolve the effective output format.
    /// If user specified a format, use it.
    /// Otherwise: TTY → Text, non-TTY (pipe) → Json
    pub fn resolve(user_choice: Option<OutputFormat>) -> OutputFormat {
        match user_choice {
            Some(fmt) => fmt,
            None => {
                if std::io::stdout().is_terminal() {
                    OutputFormat::Text
                } else {
                    OutputFormat::Json
                }
            }
        }
    }
}

#[derive(Parser)]
#[command(
    name = "portfolio",
    about = "Portfolio console - command terminal, visitor log and theme",
    version = env!("GIT_DESCRIBE"),
    after_help = "Data and logs live in $PORTFOLIO_DIR (default: ~/.local/share/portfolio)"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to portfolio.yaml config file")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive portfolio shell (default)
    Shell {
        /// Skip the loading animation
        #[arg(long)]
        no_loader: bool,
    },

    /// Run a single terminal command and print its output
    Exec {
        /// Command line to submit
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        input: Vec<String>,
    },

    /// Inspect or add to the visitor log
    Visitors {
        #[command(subcommand)]
        action: VisitorsAction,
    },

    /// Show or change the theme
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },

    /// Show profile, experience and storage status
    Status {
        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
pub enum VisitorsAction {
    /// List visitors, newest first
    List {
        /// Maximum entries to show (defaults to visitors.display_limit)
        #[arg(long)]
        limit: Option<usize>,

        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },

    /// Print the number of stored visitors
    Count,

    /// Record a visitor
    Register {
        /// Visitor name (empty records the placeholder)
        name: Option<String>,

        /// Register anonymously
        #[arg(long, conflicts_with = "name")]
        skip: bool,
    },
}

#[derive(Subcommand)]
pub enum ThemeAction {
    /// Print the current theme
    Show,

    /// Flip between dark and light
    Toggle,

    /// Choose a theme
    Set {
        #[arg(value_parser = parse_theme)]
        theme: Theme,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show {
        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },

    /// Get a configuration value
    Get {
        /// Configuration key (dot notation)
        key: String,
    },
}

fn parse_theme(s: &str) -> Result<Theme, String> {
    Theme::from_str(s).ok_or_else(|| format!("unknown theme '{}' (expected dark or light)", s))
}
