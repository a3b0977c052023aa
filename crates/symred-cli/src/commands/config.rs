//! `symred config`: inspect configuration

use anyhow::{Context, Result};
use clap::Subcommand;
use std::path::{Path, PathBuf};
use symred_common::SymredConfig;

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration (file + environment + flags)
    Show,
    /// Show the configuration file path in use
    Path,
    /// Print the default configuration
    Default,
}

impl ConfigAction {
    pub fn execute(&self, config: &SymredConfig, explicit_path: Option<&Path>) -> Result<()> {
        println!("{}", self.render(config, explicit_path)?);
        Ok(())
    }

    pub fn render(&self, config: &SymredConfig, explicit_path: Option<&Path>) -> Result<String> {
        match self {
            ConfigAction::Show => config.to_toml().context("Failed to serialize configuration"),
            ConfigAction::Path => Ok(config_path(explicit_path).display().to_string()),
            ConfigAction::Default => {
                SymredConfig::default_toml().context("Failed to serialize default configuration")
            }
        }
    }
}

/// `--config` when given, otherwise `SYMRED_CONFIG` or `./symred.toml`.
pub fn config_path(explicit_path: Option<&Path>) -> PathBuf {
    explicit_path.map(Path::to_path_buf).unwrap_or_else(SymredConfig::default_config_path)
}

/// Load the configuration the CLI runs with.
///
/// An explicit path must exist. The default path is optional; when it is
/// missing the configuration comes from defaults plus `SYMRED_*` overrides.
pub fn load_configuration(explicit_path: Option<&Path>) -> Result<SymredConfig> {
    let path = config_path(explicit_path);
    if explicit_path.is_none() && !path.exists() {
        return SymredConfig::from_env().context("Failed to build configuration from environment");
    }
    SymredConfig::load(&path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))
}
