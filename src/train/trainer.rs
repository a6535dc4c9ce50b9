//! Epoch-loop trainer
//!
//! Drives a [`TrainingBackend`] for an epoch budget with metric logging,
//! best-by-validation-F1 checkpointing, early stopping, and resume from the
//! latest checkpoint. Backend errors are not caught here; they propagate and
//! terminate the run.

use std::path::PathBuf;
use std::time::Instant;

use super::backend::{ApplianceMetrics, TrainingBackend};
use super::callback::{CallbackAction, CallbackContext, CallbackManager, TrainerCallback};
use super::checkpoint::{load_checkpoint, BestCheckpointer};
use crate::error::Result;
use crate::logging::MetricsLogger;

/// Trainer options derived from the experiment configuration
#[derive(Debug, Clone)]
pub struct TrainerOptions {
    /// Epoch budget
    pub max_epochs: usize,
    /// Gradient clipping value; informational at this layer, the backend
    /// applies it during its own optimization step
    pub grad_clip: f64,
    /// Checkpoint file written when the monitored score improves
    pub checkpoint_path: PathBuf,
    /// Checkpoint to resume from, if any
    pub resume_from: Option<PathBuf>,
}

/// Result of a training run
#[derive(Debug, Clone)]
pub struct FitResult {
    /// Last epoch executed (0-indexed); equals the resume epoch when the
    /// budget was already exhausted
    pub final_epoch: usize,
    /// Final training loss
    pub final_loss: f32,
    /// Best monitored score achieved
    pub best_score: Option<f32>,
    /// Whether training was stopped early
    pub stopped_early: bool,
    /// Total training time in seconds
    pub elapsed_secs: f64,
    /// Checkpoint the run resumed from, if any
    pub resumed_from: Option<PathBuf>,
}

/// High-level trainer orchestrating the fit/test cycle
pub struct Trainer {
    options: TrainerOptions,
    callbacks: CallbackManager,
    checkpointer: BestCheckpointer,
    logger: Option<MetricsLogger>,
}

impl Trainer {
    /// Create a trainer for the given options
    pub fn new(options: TrainerOptions) -> Self {
        let checkpointer = BestCheckpointer::new(&options.checkpoint_path);
        Self { options, callbacks: CallbackManager::new(), checkpointer, logger: None }
    }

    /// Add a callback to the trainer
    pub fn add_callback<C: TrainerCallback + 'static>(&mut self, callback: C) {
        self.callbacks.add(callback);
    }

    /// Attach a per-epoch metrics logger
    pub fn set_logger(&mut self, logger: MetricsLogger) {
        self.logger = Some(logger);
    }

    /// Get reference to the callback manager
    pub fn callbacks(&self) -> &CallbackManager {
        &self.callbacks
    }

    /// Run the training loop
    pub fn fit(&mut self, backend: &mut dyn TrainingBackend) -> Result<FitResult> {
        let start_time = Instant::now();
        backend.set_eval(false);

        let mut start_epoch = 0;
        let mut resumed_from = None;
        if let Some(path) = self.options.resume_from.clone() {
            let state = load_checkpoint(&path)?;
            backend.restore(&state.backend_state)?;
            self.checkpointer.set_best_score(state.best_score);
            start_epoch = state.epoch + 1;
            resumed_from = Some(path);
        }

        let max_epochs = self.options.max_epochs;
        let mut stopped_early = false;
        let mut final_loss = 0.0;
        let mut final_epoch = start_epoch.min(max_epochs.saturating_sub(1));

        let ctx = self.build_context(start_epoch, 0.0, None, None, &start_time);
        if self.callbacks.on_train_begin(&ctx) == CallbackAction::Stop {
            return Ok(FitResult {
                final_epoch,
                final_loss,
                best_score: self.checkpointer.best_score(),
                stopped_early: true,
                elapsed_secs: start_time.elapsed().as_secs_f64(),
                resumed_from,
            });
        }

        for epoch in start_epoch..max_epochs {
            let metrics = backend.train_epoch(epoch)?;
            final_loss = metrics.loss;
            final_epoch = epoch;

            if let Some(logger) = &mut self.logger {
                logger.log_epoch(epoch, &metrics)?;
            }

            self.checkpointer.observe(epoch, metrics.monitor_score(), &*backend)?;

            let ctx = self.build_context(
                epoch,
                metrics.loss,
                metrics.val_loss,
                metrics.val_f1,
                &start_time,
            );
            if self.callbacks.on_epoch_end(&ctx) == CallbackAction::Stop {
                stopped_early = true;
                break;
            }
        }

        let ctx = self.build_context(final_epoch, final_loss, None, None, &start_time);
        self.callbacks.on_train_end(&ctx);

        Ok(FitResult {
            final_epoch,
            final_loss,
            best_score: self.checkpointer.best_score(),
            stopped_early,
            elapsed_secs: start_time.elapsed().as_secs_f64(),
            resumed_from,
        })
    }

    /// Run the test phase: switch the backend to evaluation mode and collect
    /// per-appliance metrics
    pub fn test(&self, backend: &mut dyn TrainingBackend) -> Result<Vec<ApplianceMetrics>> {
        backend.set_eval(true);
        backend.evaluate()
    }

    fn build_context(
        &self,
        epoch: usize,
        loss: f32,
        val_loss: Option<f32>,
        val_f1: Option<f32>,
        start_time: &Instant,
    ) -> CallbackContext {
        CallbackContext {
            epoch,
            max_epochs: self.options.max_epochs,
            loss,
            val_loss,
            val_f1,
            best_score: self.checkpointer.best_score(),
            elapsed_secs: start_time.elapsed().as_secs_f64(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MeanPowerBackend;
    use crate::config::ExperimentParams;
    use crate::train::checkpoint::latest_checkpoint;
    use crate::train::EarlyStopping;

    fn options_in(dir: &std::path::Path, max_epochs: usize) -> TrainerOptions {
        TrainerOptions {
            max_epochs,
            grad_clip: 10.0,
            checkpoint_path: dir.join("CNN1D_ukdale_CNN1D_checkpoint.pt"),
            resume_from: None,
        }
    }

    #[test]
    fn test_fit_runs_all_epochs() {
        let dir = tempfile::tempdir().unwrap();
        let params = ExperimentParams::default().with_epochs(5);
        let mut backend = MeanPowerBackend::new(&params);
        let mut trainer = Trainer::new(options_in(dir.path(), 5));

        let result = trainer.fit(&mut backend).unwrap();
        assert_eq!(result.final_epoch, 4);
        assert!(!result.stopped_early);
        assert!(result.resumed_from.is_none());
        assert!(result.best_score.is_some());
        // Best checkpoint was written
        assert!(latest_checkpoint(dir.path()).is_some());
    }

    #[test]
    fn test_fit_early_stops_on_plateau() {
        let dir = tempfile::tempdir().unwrap();
        let params = ExperimentParams::default().with_epochs(500);
        let mut backend = MeanPowerBackend::new(&params);
        let mut trainer = Trainer::new(options_in(dir.path(), 500));
        trainer.add_callback(EarlyStopping::new(5, 1e-3));

        let result = trainer.fit(&mut backend).unwrap();
        // The reference backend converges, so the plateau triggers well
        // before the budget
        assert!(result.stopped_early);
        assert!(result.final_epoch < 499);
    }

    #[test]
    fn test_fit_resumes_from_checkpoint() {
        let dir = tempfile::tempdir().unwrap();
        let params = ExperimentParams::default().with_epochs(3);
        let mut backend = MeanPowerBackend::new(&params);

        let mut trainer = Trainer::new(options_in(dir.path(), 3));
        let first = trainer.fit(&mut backend).unwrap();
        assert!(!first.stopped_early);

        let ckpt = latest_checkpoint(dir.path()).unwrap();
        let mut options = options_in(dir.path(), 6);
        options.resume_from = Some(ckpt.clone());
        let mut trainer = Trainer::new(options);
        let mut backend = MeanPowerBackend::new(&params);
        let resumed = trainer.fit(&mut backend).unwrap();

        assert_eq!(resumed.resumed_from, Some(ckpt));
        assert_eq!(resumed.final_epoch, 5);
    }

    #[test]
    fn test_fit_noop_when_budget_exhausted() {
        let dir = tempfile::tempdir().unwrap();
        let params = ExperimentParams::default().with_epochs(3);
        let mut backend = MeanPowerBackend::new(&params);

        let mut trainer = Trainer::new(options_in(dir.path(), 3));
        trainer.fit(&mut backend).unwrap();

        // Resume with the same budget: checkpoint epoch + 1 >= max_epochs
        let ckpt = latest_checkpoint(dir.path()).unwrap();
        let mut options = options_in(dir.path(), 3);
        options.resume_from = Some(ckpt);
        let mut trainer = Trainer::new(options);
        let mut backend = MeanPowerBackend::new(&params);
        let result = trainer.fit(&mut backend).unwrap();

        assert!(!result.stopped_early);
        assert_eq!(result.final_loss, 0.0);
    }

    #[test]
    fn test_test_phase_reports_all_appliances() {
        let dir = tempfile::tempdir().unwrap();
        let params = ExperimentParams::default().with_epochs(2);
        let mut backend = MeanPowerBackend::new(&params);
        let mut trainer = Trainer::new(options_in(dir.path(), 2));
        trainer.fit(&mut backend).unwrap();

        let results = trainer.test(&mut backend).unwrap();
        assert_eq!(results.len(), params.out_size);
    }
}
