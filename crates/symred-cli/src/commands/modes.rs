//! `symred modes`: list the accepted mode strings

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use symred_backend::{BackendMode, Registry};

use super::OutputFormat;

/// List every accepted backend mode and what it fixes
#[derive(Debug, Args)]
pub struct ModesCommand {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// One row of the mode table. `None` means the field is decided at resolve time.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ModeRow {
    pub mode: String,
    pub device: Option<&'static str>,
    pub grid: Option<&'static str>,
    pub memory: Option<&'static str>,
}

impl ModesCommand {
    pub fn execute(&self) -> Result<()> {
        println!("{}", render(&mode_table(), self.format)?);
        Ok(())
    }
}

pub fn mode_table() -> Vec<ModeRow> {
    BackendMode::all()
        .into_iter()
        .map(|mode| ModeRow {
            mode: mode.to_string(),
            device: mode.device().map(Registry::label),
            grid: mode.grid().map(Registry::label),
            memory: mode.memory().map(Registry::label),
        })
        .collect()
}

pub fn render(rows: &[ModeRow], format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(rows)?);
    }

    let cell = |value: Option<&'static str>| value.unwrap_or("-");
    let mut out = format!("{:<14} {:<7} {:<5} {}", "MODE", "DEVICE", "GRID", "MEMORY");
    for row in rows {
        out.push('\n');
        out.push_str(&format!(
            "{:<14} {:<7} {:<5} {}",
            row.mode,
            cell(row.device),
            cell(row.grid),
            cell(row.memory)
        ));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_one_row_per_allowed_mode() {
        let rows = mode_table();
        let names: Vec<&str> = rows.iter().map(|row| row.mode.as_str()).collect();
        assert_eq!(names, symred_common::ALLOWED_MODES);
    }

    #[test]
    fn text_table() {
        insta::assert_snapshot!(render(&mode_table(), OutputFormat::Text).unwrap(), @r"
        MODE           DEVICE  GRID  MEMORY
        auto           -       -     -
        CPU            CPU     -     -
        GPU            GPU     -     -
        GPU_1D         GPU     1D    -
        GPU_1D_device  GPU     1D    device
        GPU_1D_host    GPU     1D    host
        GPU_2D         GPU     2D    -
        GPU_2D_device  GPU     2D    device
        GPU_2D_host    GPU     2D    host
        ");
    }
}
