//! CLI argument types

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::schema::Device;

/// Desagregar: NILM experiment harness
#[derive(Parser, Debug, Clone)]
#[command(name = "desagregar")]
#[command(version)]
#[command(about = "Configure and launch NILM training/evaluation experiments")]
pub struct Cli {
    /// Subcommand to execute; defaults to the standard experiment grid
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the experiment grid (dataset x model x Monte-Carlo flag, plus one
    /// quantile-regression run per pair)
    Grid(GridArgs),

    /// Run a single experiment from a YAML configuration
    Run(RunArgs),

    /// Validate a configuration file without running
    Validate(ValidateArgs),

    /// Display information about a configuration
    Info(InfoArgs),
}

/// Arguments for the grid command
#[derive(Parser, Debug, Clone)]
pub struct GridArgs {
    /// Datasets to sweep
    #[arg(long, value_delimiter = ',', default_value = "ukdale")]
    pub data: Vec<String>,

    /// Model names to sweep
    #[arg(long, value_delimiter = ',', default_value = "CNN1D")]
    pub models: Vec<String>,

    /// Epoch budget for every grid cell
    #[arg(long, default_value_t = 50)]
    pub epochs: usize,

    /// Optional cap on training samples
    #[arg(long)]
    pub sample: Option<usize>,

    /// Random seed for the backends
    #[arg(long, default_value_t = 7777)]
    pub seed: u64,

    /// Compute device
    #[arg(long, value_enum, default_value = "cpu")]
    pub device: Device,

    /// Root directory for data, logs, checkpoints, and results
    /// (defaults to the conventional ../ layout)
    #[arg(long)]
    pub output_root: Option<PathBuf>,
}

impl Default for GridArgs {
    fn default() -> Self {
        Self {
            data: vec!["ukdale".to_string()],
            models: vec!["CNN1D".to_string()],
            epochs: 50,
            sample: None,
            seed: 7777,
            device: Device::Cpu,
            output_root: None,
        }
    }
}

/// Arguments for the run command
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Path to YAML configuration
    pub config: PathBuf,

    /// Override the epoch budget
    #[arg(long)]
    pub epochs: Option<usize>,

    /// Override the batch size
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Override the target quantiles
    #[arg(long, value_delimiter = ',')]
    pub quantiles: Option<Vec<f64>>,

    /// Force a Monte-Carlo uncertainty run
    #[arg(long)]
    pub mc: bool,

    /// Override the random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Override the compute device
    #[arg(long, value_enum)]
    pub device: Option<Device>,
}

/// Arguments for the validate command
#[derive(Parser, Debug, Clone)]
pub struct ValidateArgs {
    /// Path to YAML configuration
    pub config: PathBuf,
}

/// Arguments for the info command
#[derive(Parser, Debug, Clone)]
pub struct InfoArgs {
    /// Path to YAML configuration
    pub config: PathBuf,
}
