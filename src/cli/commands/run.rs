//! Run command handler: one experiment from a YAML configuration

use crate::cli::{log, LogLevel};
use crate::config::{ExperimentParams, RunArgs};
use crate::error::Result;
use crate::grid::{run_experiment, RunContext};

pub fn run_single(args: RunArgs, log_level: LogLevel) -> Result<()> {
    let mut params = ExperimentParams::from_yaml_file(&args.config)?;

    // CLI overrides take precedence over the file
    if let Some(epochs) = args.epochs {
        params = params.with_epochs(epochs);
    }
    if let Some(batch_size) = args.batch_size {
        params = params.with_batch_size(batch_size);
    }
    if let Some(quantiles) = args.quantiles {
        params = params.with_quantiles(quantiles);
    }
    if args.mc {
        params = params.with_mc(true);
    }
    if let Some(seed) = args.seed {
        params = params.with_seed(seed);
    }
    if let Some(device) = args.device {
        params = params.with_device(device);
    }

    let ctx = RunContext { seed: params.seed, device: params.device, log_level };
    let report = run_experiment(params, &ctx)?;
    log(
        log_level,
        LogLevel::Normal,
        &format!("results written to {}", report.results_path.display()),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_run_single_from_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let params = ExperimentParams::new("CNN1D", "ukdale")
            .with_epochs(2)
            .with_output_root(dir.path());
        let config = dir.path().join("exp.yaml");
        std::fs::write(&config, serde_yaml::to_string(&params).unwrap()).unwrap();

        let args = RunArgs {
            config,
            epochs: None,
            batch_size: None,
            quantiles: None,
            mc: true,
            seed: None,
            device: None,
        };
        run_single(args, LogLevel::Quiet).unwrap();

        // The --mc override changes the results path
        assert!(dir
            .path()
            .join("results")
            .join("ukdale_CNN1D_uncertainityresults.npy")
            .exists());
    }

    #[test]
    fn test_run_single_missing_config() {
        let args = RunArgs {
            config: PathBuf::from("/nonexistent/exp.yaml"),
            epochs: None,
            batch_size: None,
            quantiles: None,
            mc: false,
            seed: None,
            device: None,
        };
        assert!(run_single(args, LogLevel::Quiet).is_err());
    }
}
