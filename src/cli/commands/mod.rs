//! CLI command handlers

mod grid;
mod info;
mod run;
mod validate;

use crate::cli::LogLevel;
use crate::config::{Cli, Command, GridArgs};
use crate::error::Result;

/// Dispatch a parsed CLI invocation
///
/// Invoking the binary with no subcommand runs the standard experiment grid.
pub fn run_command(cli: Cli) -> Result<()> {
    let log_level = LogLevel::from_flags(cli.quiet, cli.verbose);
    match cli.command.unwrap_or(Command::Grid(GridArgs::default())) {
        Command::Grid(args) => grid::run_grid_command(args, log_level),
        Command::Run(args) => run::run_single(args, log_level),
        Command::Validate(args) => validate::run_validate(args, log_level),
        Command::Info(args) => info::run_info(args),
    }
}
