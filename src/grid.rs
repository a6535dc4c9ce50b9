//! Experiment grid driver
//!
//! Sweeps dataset x model x Monte-Carlo flag sequentially, then adds one
//! quantile-regression run per dataset/model pair. No retry and no
//! partial-failure isolation: the first failing cell aborts the sweep.

use std::path::PathBuf;

use crate::backend::MeanPowerBackend;
use crate::cli::{log, LogLevel};
use crate::config::{Device, ExperimentParams};
use crate::error::Result;
use crate::experiment::{FitReport, NilmExperiment};

/// Quantiles of the extra quantile-regression run per grid pair
pub const GRID_QUANTILES: [f64; 3] = [0.1, 0.5, 0.9];

/// Explicit run-wide initialization state
///
/// Seed and device travel here instead of being set as process-global side
/// effects at import time.
#[derive(Debug, Clone, Copy)]
pub struct RunContext {
    /// Backend seed
    pub seed: u64,
    /// Compute device
    pub device: Device,
    /// Output verbosity
    pub log_level: LogLevel,
}

impl Default for RunContext {
    fn default() -> Self {
        Self { seed: 7777, device: Device::Cpu, log_level: LogLevel::Normal }
    }
}

/// The grid to sweep
#[derive(Debug, Clone)]
pub struct GridSpec {
    /// Datasets to sweep
    pub datasets: Vec<String>,
    /// Model names to sweep
    pub models: Vec<String>,
    /// Epoch budget per cell
    pub epochs: usize,
    /// Optional cap on training samples
    pub sample: Option<usize>,
    /// Optional common root for data, logs, checkpoints, and results;
    /// `None` keeps the conventional `../` layout
    pub output_root: Option<PathBuf>,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            datasets: vec!["ukdale".to_string()],
            models: vec!["CNN1D".to_string()],
            epochs: 50,
            sample: None,
            output_root: None,
        }
    }
}

impl GridSpec {
    fn cell_params(&self, model: &str, data: &str, ctx: &RunContext) -> ExperimentParams {
        let mut params = ExperimentParams::new(model, data)
            .with_epochs(self.epochs)
            .with_sample(self.sample)
            .with_seed(ctx.seed)
            .with_device(ctx.device);
        if let Some(root) = &self.output_root {
            params = params.with_output_root(root);
        }
        params
    }
}

/// Run a single experiment: validate, build the backend, fit, persist
pub fn run_experiment(params: ExperimentParams, ctx: &RunContext) -> Result<FitReport> {
    let experiment = NilmExperiment::new(params)?;
    let mut backend = MeanPowerBackend::new(experiment.params());
    experiment.fit(&mut backend, ctx.log_level)
}

/// Run the full grid sequentially, returning one report per cell
pub fn run_grid(spec: &GridSpec, ctx: &RunContext) -> Result<Vec<FitReport>> {
    let mut reports = Vec::new();
    for data in &spec.datasets {
        for model in &spec.models {
            for mc in [false, true] {
                let params = spec.cell_params(model, data, ctx).with_mc(mc);
                reports.push(run_experiment(params, ctx)?);
            }
            // One quantile-regression configuration per pair
            let params =
                spec.cell_params(model, data, ctx).with_quantiles(GRID_QUANTILES.to_vec());
            reports.push(run_experiment(params, ctx)?);
        }
    }
    log(
        ctx.log_level,
        LogLevel::Normal,
        &format!("grid complete: {} run(s)", reports.len()),
    );
    Ok(reports)
}
