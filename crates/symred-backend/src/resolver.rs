//! Backend resolution.
//!
//! Answers "where and how should this reduction run?" for a mode request and
//! a set of operands, returning the device / grid / memory tags the kernel
//! launcher consumes.

use crate::memory::infer_memory;
use crate::mode::BackendMode;
use crate::operand::{Inspect, Operand};
use serde::Serialize;
use std::fmt;
use symred_common::{
    BackendError, Device, Grid, MemoryLocation, Registry, SymredConfig, warn_once,
};
use symred_device_probe::{CapabilityProvider, RuntimeCapabilities};
use tracing::debug;

/// Warn-once key used when a mode names the GPU but none is available.
pub const GPU_UNAVAILABLE_WARNING: &str = "symred_gpu_requested_without_gpu";

/// Resolved backend, one value per registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BackendTags {
    pub device: Device,
    pub grid: Grid,
    pub memory: MemoryLocation,
}

impl BackendTags {
    /// `(device, grid, memory)` as integer tags.
    pub fn as_tuple(&self) -> (u8, u8, u8) {
        (self.device.tag(), self.grid.tag(), self.memory.tag())
    }

    /// Rebuild from integer tags; `None` if any tag is outside its registry.
    pub fn from_tuple((device, grid, memory): (u8, u8, u8)) -> Option<Self> {
        Some(Self {
            device: Device::from_tag(device)?,
            grid: Grid::from_tag(grid)?,
            memory: MemoryLocation::from_tag(memory)?,
        })
    }

    /// Registry labels for each tag.
    pub fn labels(&self) -> BackendLabels {
        BackendLabels {
            device: self.device.label(),
            grid: self.grid.label(),
            memory: self.memory.label(),
        }
    }

    /// A compact one-line summary for logs.
    ///
    /// Format: `device=GPU grid=1D memory=host`
    pub fn summary(&self) -> String {
        format!("device={} grid={} memory={}", self.device, self.grid, self.memory)
    }
}

impl fmt::Display for BackendTags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

/// Resolved backend as registry labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BackendLabels {
    pub device: &'static str,
    pub grid: &'static str,
    pub memory: &'static str,
}

impl BackendLabels {
    pub fn as_tuple(&self) -> (&'static str, &'static str, &'static str) {
        (self.device, self.grid, self.memory)
    }
}

/// Output of [`BackendResolver::resolve_as_tags`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResolvedBackend {
    Tags(u8, u8, u8),
    Labels(&'static str, &'static str, &'static str),
}

/// Maps backend requests to [`BackendTags`].
///
/// Holds nothing but the capability provider, so resolution is a pure
/// function of the request and the provider's flags.
#[derive(Debug, Clone)]
pub struct BackendResolver<P = RuntimeCapabilities> {
    capabilities: P,
}

impl BackendResolver<RuntimeCapabilities> {
    /// Snapshot the current process capabilities.
    pub fn detect() -> Self {
        Self::new(RuntimeCapabilities::detect())
    }

    /// Snapshot capabilities, then apply `force_gpu` / `force_framework`.
    pub fn from_config(config: &SymredConfig) -> Self {
        Self::new(RuntimeCapabilities::detect_with_config(config))
    }
}

impl<P: CapabilityProvider> BackendResolver<P> {
    pub fn new(capabilities: P) -> Self {
        Self { capabilities }
    }

    pub fn capabilities(&self) -> &P {
        &self.capabilities
    }

    /// Device chosen for `auto`: GPU when one is available.
    pub fn default_device(&self) -> Device {
        if self.capabilities.gpu_available() { Device::Gpu } else { Device::Cpu }
    }

    /// Grid used when the mode does not name one.
    pub fn default_grid(&self) -> Grid {
        Grid::default()
    }

    /// Resolve a mode string against a set of operands.
    ///
    /// `output`, when present, takes part in memory inference alongside
    /// `operands`.
    pub fn resolve(
        &self,
        mode: &str,
        operands: &[Operand],
        output: Option<&Operand>,
    ) -> Result<BackendTags, BackendError> {
        let parsed: BackendMode = mode.parse()?;
        self.resolve_mode(parsed, operands, output)
    }

    /// Resolve an already-parsed mode.
    pub fn resolve_mode(
        &self,
        mode: BackendMode,
        operands: &[Operand],
        output: Option<&Operand>,
    ) -> Result<BackendTags, BackendError> {
        let device = match mode.device() {
            Some(device) => {
                if device == Device::Gpu && !self.capabilities.gpu_available() {
                    warn_once!(
                        GPU_UNAVAILABLE_WARNING,
                        "backend '{}' requests the GPU but none was detected",
                        mode
                    );
                }
                device
            }
            None => self.default_device(),
        };
        let grid = mode.grid().unwrap_or_else(|| self.default_grid());
        let memory = match mode.memory() {
            Some(memory) => memory,
            None => infer_memory(operands, output, self.capabilities.framework_available())?,
        };

        let tags = BackendTags { device, grid, memory };
        debug!(
            %mode,
            operands = operands.len(),
            has_output = output.is_some(),
            resolved = %tags.summary(),
            "resolved backend"
        );
        Ok(tags)
    }

    /// Resolve from arbitrary handles, inspecting each one.
    pub fn resolve_handles(
        &self,
        mode: &str,
        operands: &[&dyn Inspect],
        output: Option<&dyn Inspect>,
    ) -> Result<BackendTags, BackendError> {
        let parsed: BackendMode = mode.parse()?;
        let operands: Vec<Operand> = operands.iter().map(|handle| handle.inspect()).collect();
        let output = output.map(|handle| handle.inspect());
        self.resolve_mode(parsed, &operands, output.as_ref())
    }

    /// [`resolve`](Self::resolve), returning integer tags or, with
    /// `as_labels`, the registry labels for those tags.
    pub fn resolve_as_tags(
        &self,
        mode: &str,
        operands: &[Operand],
        output: Option<&Operand>,
        as_labels: bool,
    ) -> Result<ResolvedBackend, BackendError> {
        let tags = self.resolve(mode, operands, output)?;
        if !as_labels {
            let (device, grid, memory) = tags.as_tuple();
            return Ok(ResolvedBackend::Tags(device, grid, memory));
        }
        let (device, grid, memory) = tags.labels().as_tuple();
        Ok(ResolvedBackend::Labels(device, grid, memory))
    }
}
