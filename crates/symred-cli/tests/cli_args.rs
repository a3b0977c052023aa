//! CLI argument parsing tests using clap's test utilities (no process spawning).

use clap::Parser;
use symred_backend::{MemoryLocation, Operand};
use symred_cli::cli::{Cli, Commands, LogFormat};
use symred_cli::commands::{ConfigAction, OutputFormat};
use symred_cli::exit::{EXIT_INVALID_ARGUMENT, exit_code_for};
use symred_common::{ALLOWED_MODES, BackendError, SymredConfig};

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap_or_else(|e| panic!("{args:?} must parse: {e}"))
}

#[test]
fn build_cli_command_name_is_symred() {
    let cmd = symred_cli::build_cli();
    assert_eq!(cmd.get_name(), "symred");
    cmd.debug_assert();
}

#[test]
fn no_subcommand_is_accepted() {
    let cli = parse(&["symred"]);
    assert!(cli.command.is_none());
}

#[test]
fn resolve_with_all_flags() {
    let cli = parse(&[
        "symred",
        "resolve",
        "--mode",
        "GPU_2D",
        "--operand",
        "tensor:device",
        "--operand",
        "param:device",
        "--output",
        "tensor:device",
        "--labels",
        "--format",
        "json",
        "--gpu",
        "false",
    ]);
    let Some(Commands::Resolve(cmd)) = cli.command else {
        panic!("expected resolve subcommand");
    };
    assert_eq!(cmd.mode.as_deref(), Some("GPU_2D"));
    assert_eq!(cmd.operands.len(), 2);
    assert_eq!(cmd.output, Some(Operand::tensor(MemoryLocation::Device)));
    assert!(cmd.labels);
    assert_eq!(cmd.format, OutputFormat::Json);
    assert_eq!(cmd.gpu, Some(false));
    assert_eq!(cmd.framework, None);
}

#[test]
fn global_flags_work_after_the_subcommand() {
    let cli = parse(&["symred", "modes", "--log-level", "debug", "--log-format", "json"]);
    assert_eq!(cli.log_level.as_deref(), Some("debug"));
    assert_eq!(cli.log_format, Some(LogFormat::Json));

    let mut config = SymredConfig::default();
    cli.apply_overrides(&mut config);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, "json");
    assert!(config.validate().is_ok());
}

#[test]
fn config_subcommands() {
    for (arg, expected) in
        [("show", ConfigAction::Show), ("path", ConfigAction::Path), ("default", ConfigAction::Default)]
    {
        let cli = parse(&["symred", "--config", "custom.toml", "config", arg]);
        match cli.command {
            Some(Commands::Config { action }) => assert_eq!(action, expected),
            other => panic!("expected config subcommand, got {other:?}"),
        }
        assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("custom.toml")));
    }
}

#[test]
fn rejected_arguments() {
    for args in [
        &["symred", "resolve", "--operand", "list"][..],
        &["symred", "resolve", "--format", "yaml"],
        &["symred", "resolve", "--gpu", "maybe"],
        &["symred", "--log-format", "xml", "info"],
        &["symred", "config", "set"],
    ] {
        assert!(Cli::try_parse_from(args).is_err(), "{args:?} should be rejected");
    }
}

#[test]
fn unknown_mode_is_not_a_parse_error() {
    // Mode validation happens in the resolver so the error carries the allowed set.
    let cli = parse(&["symred", "resolve", "--mode", "CPU_1D"]);
    assert!(matches!(cli.command, Some(Commands::Resolve(_))));
}

#[test]
fn bad_mode_and_bad_usage_exit_differently() {
    let usage = Cli::try_parse_from(["symred", "resolve", "--operand", "list"]).unwrap_err();

    let bad_mode = anyhow::Error::new(BackendError::InvalidArgument {
        mode: "not_a_mode".to_string(),
        allowed: ALLOWED_MODES,
    });
    assert_eq!(exit_code_for(&bad_mode), EXIT_INVALID_ARGUMENT);
    assert_ne!(usage.exit_code(), exit_code_for(&bad_mode));
}
