//! `symred info`: capability snapshot

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use symred_backend::{BackendResolver, RuntimeCapabilities};
use symred_common::SymredConfig;
use symred_device_probe::{framework_compiled, gpu_compiled, strict_mode_enabled};

use super::OutputFormat;

/// Show compiled features and detected capabilities
#[derive(Debug, Args)]
pub struct InfoCommand {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Serialize)]
pub struct InfoReport {
    pub version: &'static str,
    pub gpu_compiled: bool,
    pub framework_compiled: bool,
    pub strict_mode: bool,
    pub capabilities: RuntimeCapabilities,
    pub default_mode: String,
    pub default_device: &'static str,
}

impl InfoCommand {
    pub fn execute(&self, config: &SymredConfig) -> Result<()> {
        let report = InfoReport::collect(config, RuntimeCapabilities::detect_with_config(config));
        println!("{}", render(&report, self.format)?);
        Ok(())
    }
}

impl InfoReport {
    pub fn collect(config: &SymredConfig, capabilities: RuntimeCapabilities) -> Self {
        let resolver = BackendResolver::new(capabilities);
        Self {
            version: env!("CARGO_PKG_VERSION"),
            gpu_compiled: gpu_compiled(),
            framework_compiled: framework_compiled(),
            strict_mode: strict_mode_enabled(),
            capabilities,
            default_mode: config.default_mode.clone(),
            default_device: symred_backend::Registry::label(resolver.default_device()),
        }
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

pub fn render(report: &InfoReport, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(report)?);
    }

    let lines = [
        format!("symred {}", report.version),
        String::new(),
        "Compiled:".to_string(),
        format!("  GPU support:       {}", yes_no(report.gpu_compiled)),
        format!("  Tensor framework:  {}", yes_no(report.framework_compiled)),
        "Runtime:".to_string(),
        format!("  GPU available:     {}", yes_no(report.capabilities.gpu_available)),
        format!("  Framework usable:  {}", yes_no(report.capabilities.framework_available)),
        format!("  Strict mode:       {}", yes_no(report.strict_mode)),
        "Defaults:".to_string(),
        format!("  Mode:              {}", report.default_mode),
        format!("  Device for auto:   {}", report.default_device),
    ];
    Ok(lines.join("\n"))
}
