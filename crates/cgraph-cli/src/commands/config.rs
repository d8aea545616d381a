//! Config command implementation.
//!
//! Manages CLI configuration.

use anyhow::Result;

use crate::config::{parse_flag, Config};

/// Show current configuration.
pub fn show(config: &Config) -> Result<()> {
    println!("cgraph CLI Configuration");
    println!("{:-<40}", "");

    println!("Output Format:       {}", config.output_format);
    println!(
        "Clique Pruning:      {}",
        if config.clique_pruning { "on" } else { "off" }
    );

    if let Some(config_path) = Config::config_file_path() {
        println!("\nConfig file: {}", config_path.display());
    }

    Ok(())
}

/// Set a configuration value.
pub fn set(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "output-format" | "format" => {
            config.output_format = value.parse()?;
            println!("Set output-format to: {}", config.output_format);
        }
        "clique-pruning" | "pruning" | "prune" => {
            config.clique_pruning = parse_flag(value)?;
            println!("Set clique-pruning to: {}", config.clique_pruning);
        }
        _ => {
            anyhow::bail!(
                "Unknown config key: {}. Valid keys: output-format, clique-pruning",
                key
            );
        }
    }

    config.save()?;
    Ok(())
}

/// Get a configuration value.
pub fn get(config: &Config, key: &str) -> Result<()> {
    let value = match key {
        "output-format" | "format" => config.output_format.to_string(),
        "clique-pruning" | "pruning" | "prune" => config.clique_pruning.to_string(),
        _ => {
            anyhow::bail!("Unknown config key: {}", key);
        }
    };

    println!("{}", value);
    Ok(())
}

/// Reset configuration to defaults.
pub fn reset() -> Result<()> {
    let config = Config::default();
    config.save()?;
    println!("Configuration reset to defaults");
    Ok(())
}
