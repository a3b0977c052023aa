//! Argument definitions for the `symred` binary.

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use symred_common::SymredConfig;

use crate::commands::{ConfigAction, InfoCommand, ModesCommand, ResolveCommand};

/// symred - backend selection for symbolic tensor reductions
#[derive(Debug, Parser)]
#[command(name = "symred")]
#[command(about = "Resolve device, grid and memory tags for symred reductions")]
#[command(long_about = r#"
Resolves the backend a reduction runs on: the device (CPU or GPU), the
parallelization grid (1D or 2D) and the memory location of its operands
(host or device).

Examples:
  # Let symred pick everything
  symred resolve --mode auto --operand tensor:device --operand tensor:device

  # Labels instead of integer tags
  symred resolve --mode GPU_2D --operand param:host --labels

  # Pretend a GPU is present
  symred resolve --mode auto --operand array --gpu true

  # What was detected on this machine
  symred info --format json
"#)]
#[command(version)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(long, value_enum, value_name = "FORMAT", global = true)]
    pub log_format: Option<LogFormat>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve backend tags for a mode and a set of operands
    Resolve(ResolveCommand),

    /// Show compiled features and detected capabilities
    Info(InfoCommand),

    /// List accepted backend modes
    Modes(ModesCommand),

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Compact,
    Json,
}

impl LogFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            LogFormat::Pretty => "pretty",
            LogFormat::Compact => "compact",
            LogFormat::Json => "json",
        }
    }
}

impl Cli {
    /// Fold `--log-level` / `--log-format` into a loaded configuration.
    pub fn apply_overrides(&self, config: &mut SymredConfig) {
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(format) = self.log_format {
            config.logging.format = format.as_str().to_string();
        }
    }
}

/// Build the clap command, for help output and tests.
pub fn build_cli() -> clap::Command {
    Cli::command()
}
