//! Common types and utilities for symred backend selection
//!
//! This crate provides the foundational pieces shared across the symred
//! workspace: the three mode registries (device, grid, memory location), the
//! error taxonomy, configuration loading, and rate-limited logging.

pub mod config;
pub mod error;
pub mod registry;
pub mod warn_once;

pub use config::{ConfigError, LoggingConfig, SymredConfig};
pub use error::*;
pub use registry::{ALLOWED_MODES, Device, Grid, MemoryLocation, Registry};
pub use warn_once::warn_once_fn;
