//! Operand model and inspection.
//!
//! The resolver never looks at operand data, only at two properties: whether
//! a handle is a plain host array or a framework tensor, and for tensors,
//! where the backing memory lives. [`Inspect`] turns a handle into the
//! closed [`Operand`] variant the resolver matches on.

use serde::{Deserialize, Serialize};
use std::fmt;
use symred_common::MemoryLocation;

/// What the resolver knows about one input or output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Operand {
    /// Plain host array without autodiff or residency metadata.
    NativeArray,
    /// Tensor owned by the autodiff framework.
    FrameworkTensor {
        location: MemoryLocation,
        /// Wrapped as a trainable parameter. Treated exactly like a plain tensor.
        parameter: bool,
    },
    /// A handle the inspector could not classify.
    Unrecognized { type_name: String },
}

impl Operand {
    pub const fn array() -> Self {
        Operand::NativeArray
    }

    pub const fn tensor(location: MemoryLocation) -> Self {
        Operand::FrameworkTensor { location, parameter: false }
    }

    pub const fn parameter(location: MemoryLocation) -> Self {
        Operand::FrameworkTensor { location, parameter: true }
    }

    pub fn unrecognized(type_name: impl Into<String>) -> Self {
        Operand::Unrecognized { type_name: type_name.into() }
    }

    pub fn is_native_array(&self) -> bool {
        matches!(self, Operand::NativeArray)
    }

    /// Physical location of a framework tensor; `None` for anything else.
    pub fn tensor_location(&self) -> Option<MemoryLocation> {
        match self {
            Operand::FrameworkTensor { location, .. } => Some(*location),
            _ => None,
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::NativeArray => f.write_str("array"),
            Operand::FrameworkTensor { location, parameter: false } => {
                write!(f, "tensor:{location}")
            }
            Operand::FrameworkTensor { location, parameter: true } => {
                write!(f, "param:{location}")
            }
            Operand::Unrecognized { type_name } => write!(f, "unrecognized:{type_name}"),
        }
    }
}

/// Reports the [`Operand`] view of a handle.
pub trait Inspect {
    fn inspect(&self) -> Operand;
}

impl Inspect for Operand {
    fn inspect(&self) -> Operand {
        self.clone()
    }
}

impl<T: Inspect + ?Sized> Inspect for &T {
    fn inspect(&self) -> Operand {
        (**self).inspect()
    }
}

impl<T: Inspect + ?Sized> Inspect for Box<T> {
    fn inspect(&self) -> Operand {
        (**self).inspect()
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Element types of plain host arrays.
pub trait HostScalar: sealed::Sealed {}

macro_rules! host_scalars {
    ($($t:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $t {}
            impl HostScalar for $t {}
        )*
    };
}

host_scalars!(f32, f64, i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

impl<T: HostScalar> Inspect for [T] {
    fn inspect(&self) -> Operand {
        Operand::NativeArray
    }
}

impl<T: HostScalar, const N: usize> Inspect for [T; N] {
    fn inspect(&self) -> Operand {
        Operand::NativeArray
    }
}

impl<T: HostScalar> Inspect for Vec<T> {
    fn inspect(&self) -> Operand {
        Operand::NativeArray
    }
}

#[cfg(feature = "candle")]
mod candle_impls {
    use super::{Inspect, Operand};
    use symred_common::MemoryLocation;

    fn location_of(device: &candle_core::Device) -> MemoryLocation {
        if device.is_cpu() { MemoryLocation::Host } else { MemoryLocation::Device }
    }

    impl Inspect for candle_core::Tensor {
        fn inspect(&self) -> Operand {
            Operand::tensor(location_of(self.device()))
        }
    }

    impl Inspect for candle_core::Var {
        fn inspect(&self) -> Operand {
            Operand::parameter(location_of(self.as_tensor().device()))
        }
    }
}
