//! Typed experiment configuration
//!
//! Replaces the loose option dictionary of earlier NILM harnesses with a
//! struct of named, typed fields and documented defaults. The experiment
//! name is derived deterministically from dataset, model name, and quantile
//! count so checkpoint and results file names never collide between runs.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Compute device for the training backend
///
/// Passed explicitly through the configuration instead of being probed as a
/// process-wide side effect at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    /// CPU execution
    #[default]
    Cpu,
    /// CUDA device, when the backend supports one
    Cuda,
}

/// Complete configuration for one experiment run
///
/// Construct with [`ExperimentParams::new`] and the `with_*` builders, or
/// load from YAML with [`ExperimentParams::from_yaml_file`]. Construction is
/// pure; range checks happen when the experiment wrapper is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentParams {
    /// Model identifier, e.g. "CNN1D"
    pub model_name: String,

    /// Dataset name, e.g. "ukdale"
    pub data: String,

    /// Epoch budget
    pub n_epochs: usize,

    /// Mini-batch size
    pub batch_size: usize,

    /// Input window length in samples
    pub sequence_length: usize,

    /// Dropout probability
    pub dropout: f64,

    /// Gradient clipping value forwarded to the backend
    pub clip_value: f64,

    /// Optional cap on the number of training samples
    pub sample: Option<usize>,

    /// Stochastic forward passes per prediction in Monte-Carlo runs
    pub n_model_samples: usize,

    /// Number of target appliances
    pub out_size: usize,

    /// Target quantiles; more than one selects quantile regression
    pub quantiles: Vec<f64>,

    /// Denoise the aggregate signal before windowing
    pub denoise: bool,

    /// Estimate predictive uncertainty via Monte-Carlo sampling
    pub mc: bool,

    /// Train chunk-by-chunk instead of on the full series
    pub chunk_wise_training: bool,

    /// Dataset root
    pub data_path: PathBuf,

    /// Root for per-run metric logs
    pub log_path: PathBuf,

    /// Root for checkpoint directories; each run checkpoints under
    /// `<checkpoint_root>/<exp_name>`
    pub checkpoint_root: PathBuf,

    /// Directory for persisted result arrays
    pub results_path: PathBuf,

    /// Random seed for the backend
    pub seed: u64,

    /// Compute device for the backend
    pub device: Device,
}

impl Default for ExperimentParams {
    fn default() -> Self {
        Self {
            model_name: "CNN1D".to_string(),
            data: "ukdale".to_string(),
            n_epochs: 10,
            batch_size: 128,
            sequence_length: 99,
            dropout: 0.1,
            clip_value: 10.0,
            sample: None,
            n_model_samples: 50,
            out_size: 5,
            quantiles: vec![0.5],
            denoise: true,
            mc: false,
            chunk_wise_training: false,
            data_path: PathBuf::from("../data/"),
            log_path: PathBuf::from("../logs/"),
            checkpoint_root: PathBuf::from("../checkpoints/"),
            results_path: PathBuf::from("../results/"),
            seed: 7777,
            device: Device::Cpu,
        }
    }
}

impl ExperimentParams {
    /// Create a configuration for one model/dataset pair with defaults
    pub fn new(model_name: impl Into<String>, data: impl Into<String>) -> Self {
        Self { model_name: model_name.into(), data: data.into(), ..Self::default() }
    }

    /// Load a configuration from a YAML file
    pub fn from_yaml_file(path: &Path) -> crate::error::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let params: Self = serde_yaml::from_str(&text)?;
        Ok(params)
    }

    /// Derived experiment name
    ///
    /// `"{data}_{model_name}"` for a single quantile,
    /// `"{data}_{model_name}_quantiles"` for quantile regression.
    pub fn exp_name(&self) -> String {
        derive_exp_name(&self.data, &self.model_name, self.quantiles.len())
    }

    /// Checkpoint directory for this run: `<checkpoint_root>/<exp_name>`
    pub fn checkpoint_dir(&self) -> PathBuf {
        self.checkpoint_root.join(self.exp_name())
    }

    /// Set the epoch budget
    pub fn with_epochs(mut self, n_epochs: usize) -> Self {
        self.n_epochs = n_epochs;
        self
    }

    /// Set the mini-batch size
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Set the dropout probability
    pub fn with_dropout(mut self, dropout: f64) -> Self {
        self.dropout = dropout;
        self
    }

    /// Cap the number of training samples
    pub fn with_sample(mut self, sample: Option<usize>) -> Self {
        self.sample = sample;
        self
    }

    /// Set the target quantiles
    pub fn with_quantiles(mut self, quantiles: Vec<f64>) -> Self {
        self.quantiles = quantiles;
        self
    }

    /// Enable or disable Monte-Carlo uncertainty estimation
    pub fn with_mc(mut self, mc: bool) -> Self {
        self.mc = mc;
        self
    }

    /// Set the backend seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the compute device
    pub fn with_device(mut self, device: Device) -> Self {
        self.device = device;
        self
    }

    /// Point all output roots (data, logs, checkpoints, results) under one
    /// directory. Useful for tests and non-default layouts.
    pub fn with_output_root(mut self, root: &Path) -> Self {
        self.data_path = root.join("data");
        self.log_path = root.join("logs");
        self.checkpoint_root = root.join("checkpoints");
        self.results_path = root.join("results");
        self
    }
}

/// Derive the unique experiment name from dataset, model, and quantile count
pub fn derive_exp_name(data: &str, model_name: &str, n_quantiles: usize) -> String {
    if n_quantiles > 1 {
        format!("{data}_{model_name}_quantiles")
    } else {
        format!("{data}_{model_name}")
    }
}
