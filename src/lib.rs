//! desagregar: NILM experiment harness
//!
//! Configures and launches training/evaluation runs for neural
//! load-disaggregation models over energy-consumption time series:
//! - Typed experiment configuration with derived experiment names
//! - An experiment wrapper owning output directories and one fit/test cycle
//! - An epoch-loop trainer with checkpointing, early stopping, and resume
//! - A narrow [`train::TrainingBackend`] seam any training engine implements
//! - A sequential grid driver over dataset x model x Monte-Carlo flag
//! - NPY results persistence
//!
//! # Example
//!
//! ```no_run
//! use desagregar::backend::MeanPowerBackend;
//! use desagregar::cli::LogLevel;
//! use desagregar::config::ExperimentParams;
//! use desagregar::experiment::NilmExperiment;
//!
//! # fn main() -> desagregar::Result<()> {
//! let params = ExperimentParams::new("CNN1D", "ukdale").with_epochs(50);
//! let experiment = NilmExperiment::new(params)?;
//! let mut backend = MeanPowerBackend::new(experiment.params());
//! let report = experiment.fit(&mut backend, LogLevel::Normal)?;
//! println!("results at {}", report.results_path.display());
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod cli;
pub mod config;
pub mod error;
pub mod experiment;
pub mod grid;
pub mod logging;
pub mod results;
pub mod train;

pub use config::{Device, ExperimentParams};
pub use error::{Error, Result};
pub use experiment::{FitReport, NilmExperiment};
pub use grid::{run_experiment, run_grid, GridSpec, RunContext};
