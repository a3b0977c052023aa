//! symred CLI library
//!
//! This library exposes internal modules for testing purposes.

pub mod cli;
pub mod commands;
pub mod exit;
pub mod logging;
pub mod operand_spec;

pub use cli::{Cli, Commands, build_cli};
