//! `symred resolve`: resolve a mode against described operands.

use anyhow::Result;
use clap::Args;
use clap::builder::BoolishValueParser;
use serde::Serialize;
use symred_backend::{BackendResolver, Operand, ResolvedBackend, RuntimeCapabilities};
use symred_common::SymredConfig;
use tracing::debug;

use super::OutputFormat;
use crate::operand_spec::parse_operand_spec;

/// Resolve device, grid and memory tags for a reduction
#[derive(Debug, Args)]
pub struct ResolveCommand {
    /// Backend mode (auto, CPU, GPU, GPU_1D, GPU_2D_device, ...).
    /// Defaults to `default_mode` from the configuration.
    #[arg(short, long, value_name = "MODE")]
    pub mode: Option<String>,

    /// Input operand: array, tensor:host, tensor:device, param:host, param:device
    #[arg(long = "operand", value_name = "SPEC", value_parser = parse_operand_spec)]
    pub operands: Vec<Operand>,

    /// Output operand, same SPEC forms as --operand
    #[arg(long, value_name = "SPEC", value_parser = parse_operand_spec)]
    pub output: Option<Operand>,

    /// Print registry labels instead of integer tags
    #[arg(long)]
    pub labels: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Override GPU availability
    #[arg(long, value_name = "BOOL", value_parser = BoolishValueParser::new())]
    pub gpu: Option<bool>,

    /// Override tensor framework availability
    #[arg(long, value_name = "BOOL", value_parser = BoolishValueParser::new())]
    pub framework: Option<bool>,
}

/// Everything `resolve` reports, in JSON form.
#[derive(Debug, Serialize)]
pub struct ResolveReport {
    pub mode: String,
    pub backend: ResolvedBackend,
    pub capabilities: RuntimeCapabilities,
}

impl ResolveCommand {
    pub fn execute(&self, config: &SymredConfig) -> Result<()> {
        let report = self.run(config, self.capabilities(config))?;
        println!("{}", render(&report, self.format)?);
        Ok(())
    }

    /// Detect, then apply config `force_*`, then `--gpu` / `--framework`.
    pub fn capabilities(&self, config: &SymredConfig) -> RuntimeCapabilities {
        RuntimeCapabilities::detect_with_config(config).with_overrides(self.gpu, self.framework)
    }

    /// Resolve against fixed capabilities without printing anything.
    pub fn run(
        &self,
        config: &SymredConfig,
        capabilities: RuntimeCapabilities,
    ) -> Result<ResolveReport> {
        let mode = self.mode.clone().unwrap_or_else(|| config.default_mode.clone());
        debug!(%mode, capabilities = %capabilities.summary(), "resolving backend");

        let backend = BackendResolver::new(capabilities).resolve_as_tags(
            &mode,
            &self.operands,
            self.output.as_ref(),
            self.labels,
        )?;
        Ok(ResolveReport { mode, backend, capabilities })
    }
}

pub fn render(report: &ResolveReport, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(report)?,
        OutputFormat::Text => match report.backend {
            ResolvedBackend::Tags(device, grid, memory) => format!("{device} {grid} {memory}"),
            ResolvedBackend::Labels(device, grid, memory) => format!("{device} {grid} {memory}"),
        },
    })
}
