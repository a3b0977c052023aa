//! Backend mode grammar.
//!
//! A mode string is either `auto` or up to three `_`-separated registry
//! labels: `DEVICE[_GRID[_MEMORY]]`. Only the strings in [`ALLOWED_MODES`]
//! are accepted, so `CPU_1D` is rejected even though both labels exist.

use std::fmt;
use std::str::FromStr;
use symred_common::{ALLOWED_MODES, BackendError, Device, Grid, MemoryLocation, Registry};

/// A parsed backend request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendMode {
    /// Infer device from GPU availability and memory from the operands.
    Auto,
    /// Device is fixed; grid and memory are fixed when present, inferred otherwise.
    Explicit { device: Device, grid: Option<Grid>, memory: Option<MemoryLocation> },
}

impl BackendMode {
    /// Every allowed mode, in [`ALLOWED_MODES`] order.
    pub fn all() -> Vec<BackendMode> {
        ALLOWED_MODES.iter().filter_map(|mode| mode.parse().ok()).collect()
    }

    /// Explicit device, if the mode names one.
    pub fn device(&self) -> Option<Device> {
        match self {
            BackendMode::Auto => None,
            BackendMode::Explicit { device, .. } => Some(*device),
        }
    }

    /// Explicit grid, if the mode names one.
    pub fn grid(&self) -> Option<Grid> {
        match self {
            BackendMode::Auto => None,
            BackendMode::Explicit { grid, .. } => *grid,
        }
    }

    /// Explicit memory location, if the mode names one.
    pub fn memory(&self) -> Option<MemoryLocation> {
        match self {
            BackendMode::Auto => None,
            BackendMode::Explicit { memory, .. } => *memory,
        }
    }

    /// True when operand locations must be inspected to resolve this mode.
    pub fn infers_memory(&self) -> bool {
        self.memory().is_none()
    }
}

fn invalid(mode: &str) -> BackendError {
    BackendError::InvalidArgument { mode: mode.to_string(), allowed: ALLOWED_MODES }
}

fn lookup<R: Registry>(mode: &str, label: &str) -> Result<R, BackendError> {
    R::from_label(label).ok_or_else(|| invalid(mode))
}

impl FromStr for BackendMode {
    type Err = BackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !ALLOWED_MODES.contains(&s) {
            return Err(invalid(s));
        }
        if s == "auto" {
            return Ok(BackendMode::Auto);
        }

        let parts: Vec<&str> = s.split('_').collect();
        match parts.as_slice() {
            [device] => Ok(BackendMode::Explicit {
                device: lookup(s, device)?,
                grid: None,
                memory: None,
            }),
            [device, grid] => Ok(BackendMode::Explicit {
                device: lookup(s, device)?,
                grid: Some(lookup(s, grid)?),
                memory: None,
            }),
            [device, grid, memory] => Ok(BackendMode::Explicit {
                device: lookup(s, device)?,
                grid: Some(lookup(s, grid)?),
                memory: Some(lookup(s, memory)?),
            }),
            _ => Err(invalid(s)),
        }
    }
}

impl fmt::Display for BackendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendMode::Auto => f.write_str("auto"),
            BackendMode::Explicit { device, grid, memory } => {
                write!(f, "{device}")?;
                if let Some(grid) = grid {
                    write!(f, "_{grid}")?;
                }
                if let Some(memory) = memory {
                    write!(f, "_{memory}")?;
                }
                Ok(())
            }
        }
    }
}
