//! Backend resolution for symred reductions.
//!
//! Given a mode request such as `"auto"`, `"GPU_2D"` or `"GPU_1D_device"`
//! and the operands of a reduction, [`BackendResolver`] picks the device,
//! the grid scheme and the memory location the kernel should use.
//!
//! ```
//! use symred_backend::{BackendResolver, Operand};
//! use symred_device_probe::RuntimeCapabilities;
//!
//! let resolver = BackendResolver::new(RuntimeCapabilities::cpu_only());
//! let tags = resolver.resolve("GPU_1D_host", &[Operand::array()], None).unwrap();
//! assert_eq!(tags.as_tuple(), (1, 0, 0));
//! ```

pub mod memory;
pub mod mode;
pub mod operand;
pub mod resolver;

pub use memory::infer_memory;
pub use mode::BackendMode;
pub use operand::{HostScalar, Inspect, Operand};
pub use resolver::{
    BackendLabels, BackendResolver, BackendTags, GPU_UNAVAILABLE_WARNING, ResolvedBackend,
};
pub use symred_common::{BackendError, Device, Grid, MemoryLocation, Registry};
pub use symred_device_probe::{CapabilityProvider, RuntimeCapabilities};

/// One-shot resolution against freshly detected process capabilities.
///
/// Equivalent to `BackendResolver::detect().resolve_as_tags(..)`.
pub fn get_tag_backend(
    mode: &str,
    operands: &[Operand],
    output: Option<&Operand>,
    as_labels: bool,
) -> Result<ResolvedBackend, BackendError> {
    BackendResolver::detect().resolve_as_tags(mode, operands, output, as_labels)
}
