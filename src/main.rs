//! Desagregar CLI
//!
//! Experiment harness entry point for NILM training/evaluation runs.
//!
//! # Usage
//!
//! ```bash
//! # Run the standard experiment grid
//! desagregar
//!
//! # Sweep two datasets with a custom seed
//! desagregar grid --data ukdale,redd --epochs 50 --seed 1234
//!
//! # Run a single experiment from a config, with overrides
//! desagregar run exp.yaml --epochs 10 --mc
//!
//! # Validate or inspect a config
//! desagregar validate exp.yaml
//! desagregar info exp.yaml
//! ```

use clap::Parser;
use desagregar::cli::{run_command, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
