//! `leap config ...` commands

use anyhow::Result;
use colored::Colorize;
use leap_infrastructure::{ConfigLoader, FileConfig};
use leap_presentation::ConfigCommand;
use std::path::PathBuf;

const MASK: &str = "********";

pub fn run(command: ConfigCommand, config: &FileConfig, explicit: Option<&PathBuf>) -> Result<()> {
    match command {
        ConfigCommand::Show => {
            println!("{}", render(config)?);
            let key = if config.model.resolve_api_key().is_some() {
                "found".green()
            } else {
                "missing".red()
            };
            eprintln!("# API key: {key}");
        }
        ConfigCommand::Sources => {
            println!("Configuration sources (in priority order):");
            println!("  [ env ] LEAP_* environment variables");
            for (label, path, found) in ConfigLoader::config_sources(explicit) {
                let marker = if found { "FOUND" } else { "     " };
                let shown = path
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "./leap.toml or ./.leap.toml".to_string());
                println!("  [{marker}] {label:<8} {shown}");
            }
            println!("  [     ] Default  built-in defaults");
        }
    }
    Ok(())
}

/// Effective config as TOML, with any inline API key masked
fn render(config: &FileConfig) -> Result<String> {
    let mut shown = config.clone();
    if shown.model.api_key.is_some() {
        shown.model.api_key = Some(MASK.to_string());
    }
    Ok(toml::to_string_pretty(&shown)?)
}
