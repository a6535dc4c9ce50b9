//! Experiment wrapper
//!
//! One `NilmExperiment` is one fit/evaluate cycle against one configuration:
//! construction validates the parameters and creates the output directories;
//! `fit()` wires the trainer (logger, checkpointing, early stopping, resume)
//! around a training backend, runs the test phase, and persists the results
//! matrix.

use std::fs;
use std::path::PathBuf;

use crate::cli::{log, LogLevel};
use crate::config::{validate, ExperimentParams};
use crate::error::Result;
use crate::logging::MetricsLogger;
use crate::results::save_results;
use crate::train::{
    latest_checkpoint, EarlyStopping, FitResult, ProgressCallback, Trainer, TrainerOptions,
    TrainingBackend, CHECKPOINT_SUFFIX,
};

/// Early-stopping patience in epochs
const EARLY_STOP_PATIENCE: usize = 20;

/// Minimum F1 improvement to reset early-stopping patience
const EARLY_STOP_MIN_DELTA: f32 = 1e-4;

/// Progress line interval in epochs
const PROGRESS_EVERY: usize = 10;

/// The three output directories of a run
#[derive(Debug, Clone)]
pub struct ExperimentPaths {
    /// Metric log root
    pub logs: PathBuf,
    /// Checkpoint directory for this experiment
    pub checkpoints: PathBuf,
    /// Results directory
    pub results: PathBuf,
}

impl ExperimentPaths {
    /// Derive the output directories from a configuration
    pub fn from_params(params: &ExperimentParams) -> Self {
        Self {
            logs: params.log_path.clone(),
            checkpoints: params.checkpoint_dir(),
            results: params.results_path.clone(),
        }
    }

    /// Create all three directories; creation is idempotent, existing
    /// directories are left untouched
    pub fn ensure(&self) -> Result<()> {
        fs::create_dir_all(&self.logs)?;
        fs::create_dir_all(&self.checkpoints)?;
        fs::create_dir_all(&self.results)?;
        Ok(())
    }
}

/// Outcome of one experiment run
#[derive(Debug, Clone)]
pub struct FitReport {
    /// Where the results matrix was written
    pub results_path: PathBuf,
    /// Best-checkpoint file of the run
    pub checkpoint_path: PathBuf,
    /// Training summary
    pub fit: FitResult,
}

/// Wrapper around one train/evaluate cycle
pub struct NilmExperiment {
    params: ExperimentParams,
    paths: ExperimentPaths,
}

impl NilmExperiment {
    /// Validate the configuration and create the output directories
    pub fn new(params: ExperimentParams) -> Result<Self> {
        validate(&params)?;
        let paths = ExperimentPaths::from_params(&params);
        paths.ensure()?;
        Ok(Self { params, paths })
    }

    /// The validated configuration
    pub fn params(&self) -> &ExperimentParams {
        &self.params
    }

    /// Output directories of the run
    pub fn paths(&self) -> &ExperimentPaths {
        &self.paths
    }

    /// Checkpoint file for this run: `<model>_<exp_name>_checkpoint.pt`
    /// inside the experiment's checkpoint directory
    pub fn checkpoint_file(&self) -> PathBuf {
        let file_name = format!("{}_{}", self.params.model_name, self.params.exp_name());
        self.paths.checkpoints.join(format!("{file_name}{CHECKPOINT_SUFFIX}"))
    }

    /// Run fit then test against a backend and persist the results
    ///
    /// Resumes from the latest checkpoint in the checkpoint directory when
    /// one exists. Backend failures propagate unmodified.
    pub fn fit(&self, backend: &mut dyn TrainingBackend, level: LogLevel) -> Result<FitReport> {
        let exp_name = self.params.exp_name();
        let file_name = format!("{}_{exp_name}", self.params.model_name);
        let checkpoint_path = self.checkpoint_file();
        let resume_from = latest_checkpoint(&self.paths.checkpoints);

        let mut trainer = Trainer::new(TrainerOptions {
            max_epochs: self.params.n_epochs,
            grad_clip: self.params.clip_value,
            checkpoint_path: checkpoint_path.clone(),
            resume_from,
        });
        trainer.set_logger(MetricsLogger::new(
            &self.paths.logs,
            &self.params.model_name,
            &exp_name,
        )?);
        trainer.add_callback(EarlyStopping::new(EARLY_STOP_PATIENCE, EARLY_STOP_MIN_DELTA));
        if level != LogLevel::Quiet {
            trainer.add_callback(ProgressCallback::new(PROGRESS_EVERY));
        }

        log(level, LogLevel::Normal, &format!("fit model for {file_name}"));
        let fit = trainer.fit(backend)?;
        let results = trainer.test(backend)?;
        let results_path = save_results(&results, &self.params)?;
        log(
            level,
            LogLevel::Verbose,
            &format!("results written to {}", results_path.display()),
        );

        Ok(FitReport { results_path, checkpoint_path, fit })
    }
}

/// Convenience check used by tests and the info command
pub fn directories_exist(paths: &ExperimentPaths) -> bool {
    paths.logs.is_dir() && paths.checkpoints.is_dir() && paths.results.is_dir()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MeanPowerBackend;
    use std::path::Path;

    fn params_in(dir: &Path) -> ExperimentParams {
        ExperimentParams::new("CNN1D", "ukdale").with_epochs(3).with_output_root(dir)
    }

    #[test]
    fn test_new_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let exp = NilmExperiment::new(params_in(dir.path())).unwrap();
        assert!(directories_exist(exp.paths()));
    }

    #[test]
    fn test_new_is_idempotent_on_existing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let params = params_in(dir.path());
        NilmExperiment::new(params.clone()).unwrap();
        // Second construction against the same tree succeeds
        let exp = NilmExperiment::new(params).unwrap();
        assert!(directories_exist(exp.paths()));
    }

    #[test]
    fn test_new_rejects_invalid_params() {
        let dir = tempfile::tempdir().unwrap();
        let params = params_in(dir.path()).with_quantiles(vec![]);
        assert!(NilmExperiment::new(params).is_err());
    }

    #[test]
    fn test_checkpoint_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let exp = NilmExperiment::new(params_in(dir.path())).unwrap();
        let name = exp.checkpoint_file();
        assert!(name.to_string_lossy().ends_with("CNN1D_ukdale_CNN1D_checkpoint.pt"));
        assert!(name.starts_with(exp.paths().checkpoints.clone()));
    }

    #[test]
    fn test_fit_produces_results_and_checkpoint() {
        let dir = tempfile::tempdir().unwrap();
        let exp = NilmExperiment::new(params_in(dir.path())).unwrap();
        let mut backend = MeanPowerBackend::new(exp.params());

        let report = exp.fit(&mut backend, LogLevel::Quiet).unwrap();
        assert!(report.results_path.exists());
        assert!(report.checkpoint_path.exists());
        assert!(!report.fit.stopped_early);
        assert!(report
            .results_path
            .to_string_lossy()
            .ends_with("ukdale_CNN1Dresults.npy"));
    }

    #[test]
    fn test_fit_mc_run_marks_results_path() {
        let dir = tempfile::tempdir().unwrap();
        let exp = NilmExperiment::new(params_in(dir.path()).with_mc(true)).unwrap();
        let mut backend = MeanPowerBackend::new(exp.params());

        let report = exp.fit(&mut backend, LogLevel::Quiet).unwrap();
        assert!(report.results_path.to_string_lossy().contains("_uncertainity"));
    }

    #[test]
    fn test_second_fit_resumes_from_checkpoint() {
        let dir = tempfile::tempdir().unwrap();
        let params = params_in(dir.path());
        let exp = NilmExperiment::new(params.clone()).unwrap();
        let mut backend = MeanPowerBackend::new(exp.params());
        let first = exp.fit(&mut backend, LogLevel::Quiet).unwrap();
        assert!(first.fit.resumed_from.is_none());

        let exp = NilmExperiment::new(params.with_epochs(6)).unwrap();
        let mut backend = MeanPowerBackend::new(exp.params());
        let second = exp.fit(&mut backend, LogLevel::Quiet).unwrap();
        assert!(second.fit.resumed_from.is_some());
    }
}
