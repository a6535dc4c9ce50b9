//! Training orchestration
//!
//! This module provides the harness side of a train/evaluate cycle:
//! - The [`TrainingBackend`] seam any engine implements
//! - A [`Trainer`] driving the epoch loop with logging and checkpointing
//! - Callbacks (early stopping, progress reporting)
//! - Checkpoint persistence and latest-checkpoint discovery

pub mod backend;
pub mod callback;
pub mod checkpoint;
mod trainer;

pub use backend::{metrics_matrix, ApplianceMetrics, EpochMetrics, TrainingBackend, METRIC_COLUMNS};
pub use callback::{
    CallbackAction, CallbackContext, CallbackManager, EarlyStopping, ProgressCallback,
    TrainerCallback,
};
pub use checkpoint::{latest_checkpoint, BestCheckpointer, CheckpointState, CHECKPOINT_SUFFIX};
pub use trainer::{FitResult, Trainer, TrainerOptions};
