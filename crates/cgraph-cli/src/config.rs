//! CLI configuration management.
//!
//! Values come from defaults, then the config file, then environment
//! variables (including a `.env` file). Command-line flags override all three.

use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// How results are printed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => anyhow::bail!("Unknown format: {}. Use 'text' or 'json'", s),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Application-wide configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Format used when `--format` is not given.
    pub output_format: OutputFormat,

    /// Whether the clique search abandons branches that cannot reach the
    /// requested size.
    pub clique_pruning: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::Text,
            clique_pruning: true,
        }
    }
}

impl Config {
    /// Load configuration from the config file and environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present (silently ignore if missing)
        let _ = dotenvy::dotenv();

        let mut config = Self::load_file()?;
        config.apply_env()?;
        Ok(config)
    }

    /// Load only what is stored on disk, falling back to defaults.
    ///
    /// This is the base for `config set`, so environment overrides never
    /// end up in the file.
    pub fn load_file() -> Result<Self> {
        match Self::config_file_path() {
            Some(config_path) if config_path.exists() => {
                let contents = std::fs::read_to_string(&config_path).with_context(|| {
                    format!("Failed to read config from {}", config_path.display())
                })?;
                serde_json::from_str(&contents).with_context(|| "Failed to parse config file")
            }
            _ => Ok(Self::default()),
        }
    }

    /// Override fields from `CG_*` environment variables.
    fn apply_env(&mut self) -> Result<()> {
        if let Ok(format) = std::env::var("CG_OUTPUT_FORMAT") {
            self.output_format = format
                .parse()
                .with_context(|| "Invalid CG_OUTPUT_FORMAT")?;
        }
        if let Ok(pruning) = std::env::var("CG_CLIQUE_PRUNING") {
            self.clique_pruning = parse_flag(&pruning).with_context(|| "Invalid CG_CLIQUE_PRUNING")?;
        }
        Ok(())
    }

    /// Save current configuration to the config file.
    pub fn save(&self) -> Result<()> {
        if let Some(config_path) = Self::config_file_path() {
            if let Some(parent) = config_path.parent() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create config directory: {}", parent.display())
                })?;
            }
            let contents = serde_json::to_string_pretty(self)?;
            std::fs::write(&config_path, contents)
                .with_context(|| format!("Failed to write config to {}", config_path.display()))?;
        }
        Ok(())
    }

    /// Get the path to the config file.
    pub fn config_file_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "cgraph", "cg").map(|dirs| dirs.config_dir().join("config.json"))
    }
}

/// Parse a boolean setting written as `true/false`, `on/off`, `yes/no` or `1/0`.
pub fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        other => anyhow::bail!("Expected true or false, got '{}'", other),
    }
}
