use chrono::NaiveDate;
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::theme::Theme;

/// Main portfolio configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub log_level: LogLevel,
    pub paths: PathsConfig,
    pub terminal: TerminalConfig,
    pub visitors: VisitorsConfig,
    pub theme: ThemeConfig,
    pub loader: LoaderConfig,
    pub profile: Profile,
}

/// Log verbosity
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }

    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Off => log::LevelFilter::Off,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory holding the durable store and logs
    pub data: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// Marker printed in front of echoed input
    pub prompt: String,
    /// Delay before the input takes focus after the panel opens
    pub focus_delay_ms: u64,
    /// Whether the shell starts with the terminal panel open
    pub start_visible: bool,
    /// Offset used by the `date` command
    pub utc_offset_minutes: i32,
    pub timezone_label: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct VisitorsConfig {
    /// Maximum number of stored entries; oldest are evicted first
    pub capacity: usize,
    /// Number of entries shown in the visitor log
    pub display_limit: usize,
    /// Name recorded for skipped or empty registrations
    pub placeholder: String,
    /// Names are truncated to this many characters
    pub max_name_len: usize,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub default: Theme,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub enabled: bool,
    pub tick_ms: u64,
    /// Pause between reaching 100% and revealing the page
    pub settle_ms: u64,
}

/// Owner details rendered by the terminal commands and the banner
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub role: String,
    pub email: String,
    pub linkedin: String,
    pub github: String,
    pub resume_url: Option<String>,
    pub experience_start: NaiveDate,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data: Config::portfolio_dir(),
        }
    }
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            prompt: "visitor@portfolio:~$".to_string(),
            focus_delay_ms: 300,
            start_visible: true,
            utc_offset_minutes: 330,
            timezone_label: "IST".to_string(),
        }
    }
}

impl Default for VisitorsConfig {
    fn default() -> Self {
        Self {
            capacity: 50,
            display_limit: 50,
            placeholder: "Anonymous Visitor".to_string(),
            max_name_len: 64,
        }
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            tick_ms: 60,
            settle_ms: 400,
        }
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "Shivakumar M".to_string(),
            role: "Network Engineer & Software Developer".to_string(),
            email: "shivakumar@example.com".to_string(),
            linkedin: "linkedin.com/in/shivakumar".to_string(),
            github: "github.com/shivakumar".to_string(),
            resume_url: None,
            experience_start: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap_or_default(),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Check PORTFOLIO_CONFIG env var
        if let Ok(env_path) = std::env::var("PORTFOLIO_CONFIG") {
            let path = PathBuf::from(env_path);
            if path.exists() {
                match Self::load_from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from PORTFOLIO_CONFIG: {}", e);
                    }
                }
            }
        }

        // Try PORTFOLIO_DIR/portfolio.yaml
        if let Ok(dir) = std::env::var("PORTFOLIO_DIR") {
            let path = PathBuf::from(dir).join("portfolio.yaml");
            if path.exists() {
                match Self::load_from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from PORTFOLIO_DIR: {}", e);
                    }
                }
            }
        }

        // Try ~/.config/portfolio/portfolio.yaml
        if let Some(config_dir) = dirs::config_dir() {
            let path = config_dir.join("portfolio").join("portfolio.yaml");
            if path.exists() {
                match Self::load_from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", path.display(), e);
                    }
                }
            }
        }

        // Try ./portfolio.yaml (for development)
        let local_config = PathBuf::from("portfolio.yaml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load local config: {}", e);
                }
            }
        }

        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Default data directory (PORTFOLIO_DIR wins over the platform data dir)
    pub fn portfolio_dir() -> PathBuf {
        std::env::var("PORTFOLIO_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| dirs::data_local_dir().unwrap_or_else(|| PathBuf::from(".")).join("portfolio"))
    }

    /// Data directory with `~` and env vars expanded
    pub fn data_dir(&self) -> PathBuf {
        Self::expand_path(&self.paths.data)
    }

    /// Expand a path that may contain ~ or env vars
    pub fn expand_path(path: &Path) -> PathBuf {
        let path_str = path.to_string_lossy();
        let expanded = shellexpand::full(&path_str).unwrap_or_else(|_| path_str.clone());
        PathBuf::from(expanded.as_ref())
    }

    /// Look up a single value by dotted key
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "log_level" | "log-level" => self.log_level.as_filter().to_string(),
            "paths.data" => self.paths.data.display().to_string(),
            "terminal.prompt" => self.terminal.prompt.clone(),
            "terminal.focus_delay_ms" => self.terminal.focus_delay_ms.to_string(),
            "terminal.start_visible" => self.terminal.start_visible.to_string(),
            "terminal.utc_offset_minutes" => self.terminal.utc_offset_minutes.to_string(),
            "terminal.timezone_label" => self.terminal.timezone_label.clone(),
            "visitors.capacity" => self.visitors.capacity.to_string(),
            "visitors.display_limit" => self.visitors.display_limit.to_string(),
            "visitors.placeholder" => self.visitors.placeholder.clone(),
            "visitors.max_name_len" => self.visitors.max_name_len.to_string(),
            "theme.default" => self.theme.default.to_string(),
            "loader.enabled" => self.loader.enabled.to_string(),
            "loader.tick_ms" => self.loader.tick_ms.to_string(),
            "loader.settle_ms" => self.loader.settle_ms.to_string(),
            "profile.name" => self.profile.name.clone(),
            "profile.role" => self.profile.role.clone(),
            "profile.email" => self.profile.email.clone(),
            "profile.experience_start" => self.profile.experience_start.to_string(),
            _ => return None,
        };
        Some(value)
    }
}
