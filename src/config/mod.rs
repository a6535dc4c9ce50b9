//! Experiment configuration
//!
//! Typed parameters for one NILM experiment, construction-time validation,
//! and the CLI argument types.

mod cli;
mod schema;
mod validate;

pub use cli::{Cli, Command, GridArgs, InfoArgs, RunArgs, ValidateArgs};
pub use schema::{derive_exp_name, Device, ExperimentParams};
pub use validate::{validate, ValidationError};
