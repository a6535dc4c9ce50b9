//! Checkpoint persistence
//!
//! One checkpoint file per run, overwritten whenever the monitored score
//! improves (keep-top-1 on validation F1). Checkpoint content is a JSON
//! `CheckpointState` carrying the backend-defined learned state, the epoch
//! it was taken at, and the best score so far, which is enough to resume an
//! interrupted run from the latest checkpoint in the directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::backend::TrainingBackend;
use crate::error::{Error, Result};

/// Suffix shared by all checkpoint files
pub const CHECKPOINT_SUFFIX: &str = "_checkpoint.pt";

/// Serialized snapshot of a training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckpointState {
    /// Epoch the snapshot was taken at (0-indexed)
    pub epoch: usize,
    /// Best monitored score at snapshot time
    pub best_score: f32,
    /// Engine-defined learned state
    pub backend_state: serde_json::Value,
}

/// Saves the best-scoring snapshot of a run to a single file
#[derive(Debug, Clone)]
pub struct BestCheckpointer {
    path: PathBuf,
    best_score: Option<f32>,
    pub(crate) last_saved_epoch: Option<usize>,
}

impl BestCheckpointer {
    /// Create a checkpointer writing to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), best_score: None, last_saved_epoch: None }
    }

    /// Checkpoint file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Best score observed so far
    pub fn best_score(&self) -> Option<f32> {
        self.best_score
    }

    /// Seed the best score from a resumed checkpoint so stale snapshots are
    /// not overwritten by worse epochs after resume
    pub fn set_best_score(&mut self, score: f32) {
        self.best_score = Some(score);
    }

    /// Record the score for an epoch, snapshotting the backend if it is the
    /// best seen. Returns whether a checkpoint was written.
    pub fn observe(
        &mut self,
        epoch: usize,
        score: f32,
        backend: &dyn TrainingBackend,
    ) -> Result<bool> {
        if self.best_score.is_some_and(|best| score <= best) {
            return Ok(false);
        }
        self.best_score = Some(score);

        let state = CheckpointState { epoch, best_score: score, backend_state: backend.snapshot()? };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec(&state)?)?;
        self.last_saved_epoch = Some(epoch);
        Ok(true)
    }
}

/// Load a checkpoint file
pub fn load_checkpoint(path: &Path) -> Result<CheckpointState> {
    let bytes = fs::read(path)
        .map_err(|e| Error::Checkpoint(format!("cannot read {}: {e}", path.display())))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| Error::Checkpoint(format!("corrupt checkpoint {}: {e}", path.display())))
}

/// Find the most recently modified checkpoint file in a directory
///
/// Returns `None` when the directory does not exist or holds no checkpoint
/// files, so a fresh run starts at epoch zero.
pub fn latest_checkpoint(dir: &Path) -> Option<PathBuf> {
    let entries = fs::read_dir(dir).ok()?;
    entries
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let path = entry.path();
            let name = path.file_name()?.to_str()?;
            if !name.ends_with(CHECKPOINT_SUFFIX) {
                return None;
            }
            let modified = entry.metadata().ok()?.modified().ok()?;
            Some((modified, path))
        })
        .max_by_key(|(modified, _)| *modified)
        .map(|(_, path)| path)
}
