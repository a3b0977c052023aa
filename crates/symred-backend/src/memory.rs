//! Memory-location inference over a set of operands.

use crate::operand::Operand;
use symred_common::{BackendError, MemoryLocation};
use tracing::trace;

/// Infer where a reduction's data lives from its operands (and output, if any).
///
/// - all native arrays, including no operands at all: [`MemoryLocation::Host`]
/// - otherwise the framework must be available and every operand must be a
///   framework tensor; all on the accelerator gives [`MemoryLocation::Device`],
///   none gives [`MemoryLocation::Host`], a mix is
///   [`BackendError::InconsistentLocation`]
/// - anything else is [`BackendError::TypeMismatch`]
pub fn infer_memory(
    operands: &[Operand],
    output: Option<&Operand>,
    framework_available: bool,
) -> Result<MemoryLocation, BackendError> {
    let all = || operands.iter().chain(output);

    if all().all(Operand::is_native_array) {
        trace!(count = all().count(), "all operands are native arrays");
        return Ok(MemoryLocation::Host);
    }

    if !framework_available {
        return Err(BackendError::TypeMismatch {
            reason: format!(
                "tensor framework is not available; got [{}]",
                describe(all())
            ),
        });
    }

    let mut on_device = 0usize;
    let mut on_host = 0usize;
    for operand in all() {
        match operand {
            Operand::FrameworkTensor { location: MemoryLocation::Device, .. } => on_device += 1,
            Operand::FrameworkTensor { location: MemoryLocation::Host, .. } => on_host += 1,
            Operand::NativeArray | Operand::Unrecognized { .. } => {
                return Err(BackendError::TypeMismatch {
                    reason: format!("got [{}]", describe(all())),
                });
            }
        }
    }

    trace!(on_device, on_host, "framework tensor locations");
    match (on_device, on_host) {
        (_, 0) => Ok(MemoryLocation::Device),
        (0, _) => Ok(MemoryLocation::Host),
        _ => Err(BackendError::InconsistentLocation { on_device, on_host }),
    }
}

fn describe<'a>(operands: impl Iterator<Item = &'a Operand>) -> String {
    operands.map(ToString::to_string).collect::<Vec<_>>().join(", ")
}
