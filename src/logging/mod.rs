//! Per-epoch metrics logger
//!
//! Appends one JSON record per epoch to
//! `<log_path>/<name>/<version>/metrics.jsonl`, where `name` is the model
//! name and `version` the experiment name, so every run keeps a replayable
//! metric history next to its checkpoints.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::train::EpochMetrics;

/// One logged epoch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochRecord {
    /// Epoch index (0-based)
    pub epoch: usize,
    /// Training loss
    pub loss: f32,
    /// Validation loss, if reported
    pub val_loss: Option<f32>,
    /// Validation F1, if reported
    pub val_f1: Option<f32>,
    /// Wall-clock time the record was written
    pub timestamp: DateTime<Utc>,
}

/// Appends epoch metrics as JSON lines under `<log_path>/<name>/<version>/`
#[derive(Debug)]
pub struct MetricsLogger {
    file: PathBuf,
}

impl MetricsLogger {
    /// Create a logger for one run, creating its directory if needed
    pub fn new(log_path: &Path, name: &str, version: &str) -> Result<Self> {
        let dir = log_path.join(name).join(version);
        fs::create_dir_all(&dir)?;
        Ok(Self { file: dir.join("metrics.jsonl") })
    }

    /// Path of the metrics file
    pub fn path(&self) -> &Path {
        &self.file
    }

    /// Append one epoch record
    pub fn log_epoch(&mut self, epoch: usize, metrics: &EpochMetrics) -> Result<()> {
        let record = EpochRecord {
            epoch,
            loss: metrics.loss,
            val_loss: metrics.val_loss,
            val_f1: metrics.val_f1,
            timestamp: Utc::now(),
        };
        let mut file = OpenOptions::new().create(true).append(true).open(&self.file)?;
        writeln!(file, "{}", serde_json::to_string(&record)?)?;
        Ok(())
    }

    /// Read back all records logged so far
    pub fn records(&self) -> Result<Vec<EpochRecord>> {
        if !self.file.exists() {
            return Ok(Vec::new());
        }
        let text = fs::read_to_string(&self.file)?;
        let mut records = Vec::new();
        for line in text.lines().filter(|l| !l.trim().is_empty()) {
            records.push(serde_json::from_str(line)?);
        }
        Ok(records)
    }
}
