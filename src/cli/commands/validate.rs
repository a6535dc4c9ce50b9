//! Validate command handler

use crate::cli::{log, LogLevel};
use crate::config::{validate, ExperimentParams, ValidateArgs};
use crate::error::Result;

pub fn run_validate(args: ValidateArgs, log_level: LogLevel) -> Result<()> {
    let params = ExperimentParams::from_yaml_file(&args.config)?;
    validate(&params)?;
    log(
        log_level,
        LogLevel::Normal,
        &format!("{} is valid (experiment {})", args.config.display(), params.exp_name()),
    );
    Ok(())
}
