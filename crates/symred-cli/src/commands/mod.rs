//! CLI command implementations

pub mod config;
pub mod info;
pub mod modes;
pub mod resolve;

pub use config::ConfigAction;
pub use info::InfoCommand;
pub use modes::ModesCommand;
pub use resolve::ResolveCommand;

use clap::ValueEnum;

/// Output format shared by the reporting commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
