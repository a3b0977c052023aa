//! Configuration file format for symred.
//!
//! Loads [`SymredConfig`] from a TOML file (`symred.toml`) with environment
//! variable overrides via `SYMRED_*` prefixed variables.

use crate::registry::ALLOWED_MODES;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];
const LOG_FORMATS: &[&str] = &["pretty", "compact", "json"];

/// Logging section of the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Override: `SYMRED_LOG_LEVEL`
    pub level: String,
    /// `pretty`, `compact` or `json`.
    /// Override: `SYMRED_LOG_FORMAT`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: "pretty".to_string() }
    }
}

/// symred configuration loaded from TOML with environment variable overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymredConfig {
    /// Mode used when a caller does not name one.
    /// Override: `SYMRED_BACKEND`
    pub default_mode: String,

    /// Force the GPU-availability flag instead of probing.
    /// Override: `SYMRED_FORCE_GPU`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_gpu: Option<bool>,

    /// Force the tensor-framework flag instead of probing.
    /// Override: `SYMRED_FORCE_FRAMEWORK`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_framework: Option<bool>,

    pub logging: LoggingConfig,
}

impl Default for SymredConfig {
    fn default() -> Self {
        Self {
            default_mode: "auto".to_string(),
            force_gpu: None,
            force_framework: None,
            logging: LoggingConfig::default(),
        }
    }
}

/// Errors that can occur when loading or validating a [`SymredConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize TOML: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("invalid environment override {key}={value}: {reason}")]
    EnvOverride { key: String, value: String, reason: String },
}

impl SymredConfig {
    /// Default configuration rendered as TOML.
    pub fn default_toml() -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(&Self::default())?)
    }

    /// Render this configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Path used when no explicit config file is given: `SYMRED_CONFIG` if
    /// set, otherwise `symred.toml` in the working directory.
    pub fn default_config_path() -> PathBuf {
        std::env::var_os("SYMRED_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("symred.toml"))
    }

    /// Load configuration from a TOML file, falling back to defaults for
    /// missing fields, then apply environment variable overrides.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loaded symred config");
        Self::from_toml(&contents)
    }

    /// Load from TOML string (useful for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let mut cfg: SymredConfig = toml::from_str(toml_str)?;
        cfg.apply_env_overrides()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load only from environment variables, starting from defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut cfg = Self::default();
        cfg.apply_env_overrides()?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !ALLOWED_MODES.contains(&self.default_mode.as_str()) {
            return Err(ConfigError::Validation(format!(
                "default_mode '{}' is not one of {:?}",
                self.default_mode, ALLOWED_MODES
            )));
        }
        if !LOG_LEVELS.contains(&self.logging.level.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::Validation(format!(
                "logging.level '{}' is not one of {:?}",
                self.logging.level, LOG_LEVELS
            )));
        }
        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::Validation(format!(
                "logging.format '{}' is not one of {:?}",
                self.logging.format, LOG_FORMATS
            )));
        }
        Ok(())
    }

    /// Apply `SYMRED_*` environment variable overrides.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("SYMRED_BACKEND") {
            self.default_mode = val;
        }

        if let Ok(val) = std::env::var("SYMRED_FORCE_GPU") {
            self.force_gpu = Some(parse_bool_override("SYMRED_FORCE_GPU", &val)?);
        }

        if let Ok(val) = std::env::var("SYMRED_FORCE_FRAMEWORK") {
            self.force_framework = Some(parse_bool_override("SYMRED_FORCE_FRAMEWORK", &val)?);
        }

        if let Ok(val) = std::env::var("SYMRED_LOG_LEVEL") {
            self.logging.level = val;
        }

        if let Ok(val) = std::env::var("SYMRED_LOG_FORMAT") {
            self.logging.format = val;
        }

        Ok(())
    }
}

fn parse_bool_override(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::EnvOverride {
            key: key.to_string(),
            value: value.to_string(),
            reason: "expected a boolean (1/0, true/false, yes/no, on/off)".to_string(),
        }),
    }
}
