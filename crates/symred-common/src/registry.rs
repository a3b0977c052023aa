//! Mode registries: the lookup tables behind every backend tag.
//!
//! Each axis of a backend choice (device, grid scheme, memory location) is a
//! closed enum backed by an ordered `(label, value)` table. Tags are the
//! small integers handed to the kernel launcher; labels are the strings that
//! appear in mode requests such as `"GPU_2D_device"`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Every backend mode string accepted by the resolver.
///
/// Ordering matches the order reported in error messages.
pub const ALLOWED_MODES: &[&str] = &[
    "auto",
    "CPU",
    "GPU",
    "GPU_1D",
    "GPU_1D_device",
    "GPU_1D_host",
    "GPU_2D",
    "GPU_2D_device",
    "GPU_2D_host",
];

/// An immutable label ↔ tag table for one axis of backend selection.
pub trait Registry: Copy + Eq + fmt::Debug + 'static {
    /// Axis name, used in diagnostics (`"device"`, `"grid"`, `"memory"`).
    const AXIS: &'static str;

    /// Ordered `(label, variant)` entries. A variant's tag is its position.
    const ENTRIES: &'static [(&'static str, Self)];

    /// Small integer tag for this variant.
    fn tag(self) -> u8;

    /// Registry label for this variant.
    fn label(self) -> &'static str;

    /// Look up a variant by its exact (case-sensitive) label.
    fn from_label(label: &str) -> Option<Self> {
        Self::ENTRIES.iter().find(|(name, _)| *name == label).map(|&(_, value)| value)
    }

    /// Look up a variant by its tag.
    fn from_tag(tag: u8) -> Option<Self> {
        Self::ENTRIES.get(usize::from(tag)).map(|&(_, value)| value)
    }

    /// All labels in registry order.
    fn labels() -> Vec<&'static str> {
        Self::ENTRIES.iter().map(|(name, _)| *name).collect()
    }
}

/// Execution device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Device {
    #[serde(rename = "CPU")]
    Cpu = 0,
    #[serde(rename = "GPU")]
    Gpu = 1,
}

impl Registry for Device {
    const AXIS: &'static str = "device";
    const ENTRIES: &'static [(&'static str, Self)] = &[("CPU", Device::Cpu), ("GPU", Device::Gpu)];

    fn tag(self) -> u8 {
        self as u8
    }

    fn label(self) -> &'static str {
        match self {
            Device::Cpu => "CPU",
            Device::Gpu => "GPU",
        }
    }
}

/// Parallelization grid scheme for GPU reductions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Grid {
    /// One thread per output row; the default when no scheme is requested.
    #[default]
    #[serde(rename = "1D")]
    OneD = 0,
    /// Tiled over both reduction axes.
    #[serde(rename = "2D")]
    TwoD = 1,
}

impl Registry for Grid {
    const AXIS: &'static str = "grid";
    const ENTRIES: &'static [(&'static str, Self)] = &[("1D", Grid::OneD), ("2D", Grid::TwoD)];

    fn tag(self) -> u8 {
        self as u8
    }

    fn label(self) -> &'static str {
        match self {
            Grid::OneD => "1D",
            Grid::TwoD => "2D",
        }
    }
}

/// Where operand data lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum MemoryLocation {
    /// System RAM.
    #[serde(rename = "host")]
    Host = 0,
    /// Accelerator memory.
    #[serde(rename = "device")]
    Device = 1,
}

impl Registry for MemoryLocation {
    const AXIS: &'static str = "memory";
    const ENTRIES: &'static [(&'static str, Self)] =
        &[("host", MemoryLocation::Host), ("device", MemoryLocation::Device)];

    fn tag(self) -> u8 {
        self as u8
    }

    fn label(self) -> &'static str {
        match self {
            MemoryLocation::Host => "host",
            MemoryLocation::Device => "device",
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for MemoryLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_positions_match_tags<R: Registry>() {
        for (index, &(label, value)) in R::ENTRIES.iter().enumerate() {
            assert_eq!(usize::from(value.tag()), index, "{} entry {label}", R::AXIS);
            assert_eq!(value.label(), label);
        }
    }

    #[test]
    fn entry_positions_are_tags() {
        assert_positions_match_tags::<Device>();
        assert_positions_match_tags::<Grid>();
        assert_positions_match_tags::<MemoryLocation>();
    }

    #[test]
    fn registry_values() {
        assert_eq!(Device::Cpu.tag(), 0);
        assert_eq!(Device::Gpu.tag(), 1);
        assert_eq!(Grid::OneD.tag(), 0);
        assert_eq!(Grid::TwoD.tag(), 1);
        assert_eq!(MemoryLocation::Host.tag(), 0);
        assert_eq!(MemoryLocation::Device.tag(), 1);
    }

    #[test]
    fn label_lookup_is_case_sensitive() {
        assert_eq!(Device::from_label("GPU"), Some(Device::Gpu));
        assert_eq!(Device::from_label("gpu"), None);
        assert_eq!(MemoryLocation::from_label("device"), Some(MemoryLocation::Device));
        assert_eq!(MemoryLocation::from_label("Device"), None);
        assert_eq!(Grid::from_label("3D"), None);
    }

    #[test]
    fn tag_lookup_rejects_out_of_range() {
        assert_eq!(Grid::from_tag(1), Some(Grid::TwoD));
        assert_eq!(Grid::from_tag(2), None);
        assert_eq!(Device::from_tag(u8::MAX), None);
    }

    #[test]
    fn default_grid_is_one_d() {
        assert_eq!(Grid::default(), Grid::OneD);
    }

    #[test]
    fn display_uses_labels() {
        assert_eq!(Device::Cpu.to_string(), "CPU");
        assert_eq!(Grid::TwoD.to_string(), "2D");
        assert_eq!(MemoryLocation::Host.to_string(), "host");
    }

    #[test]
    fn serde_uses_labels() {
        let json = serde_json::to_string(&(Device::Gpu, Grid::OneD, MemoryLocation::Device)).unwrap();
        assert_eq!(json, r#"["GPU","1D","device"]"#);
    }

    #[test]
    fn allowed_modes_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for mode in ALLOWED_MODES {
            assert!(seen.insert(*mode), "duplicate mode {mode}");
        }
        assert_eq!(ALLOWED_MODES.len(), 9);
    }
}
