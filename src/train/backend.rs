//! Training backend seam
//!
//! The harness does not implement gradient descent itself; it drives any
//! engine that can train for one epoch, evaluate on the test split, and
//! snapshot its state for checkpointing. The trait is deliberately narrow so
//! a real neural backend and the built-in reference backend are
//! interchangeable.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Metric columns of the persisted results matrix, in order
pub const METRIC_COLUMNS: [&str; 4] = ["mae", "f1", "eac", "nde"];

/// Per-epoch training metrics reported by a backend
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EpochMetrics {
    /// Mean training loss over the epoch
    pub loss: f32,
    /// Validation loss, when a validation split exists
    pub val_loss: Option<f32>,
    /// Validation F1 over on/off appliance states
    pub val_f1: Option<f32>,
}

impl EpochMetrics {
    /// Score used for checkpoint selection and early stopping: validation F1
    /// when available, otherwise negated training loss so that larger is
    /// always better.
    pub fn monitor_score(&self) -> f32 {
        self.val_f1.unwrap_or(-self.loss)
    }
}

/// Test-phase metrics for one appliance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplianceMetrics {
    /// Appliance name, e.g. "kettle"
    pub appliance: String,
    /// Mean absolute error in watts
    pub mae: f64,
    /// F1 over on/off states
    pub f1: f64,
    /// Estimated accuracy of consumed energy
    pub eac: f64,
    /// Normalized disaggregation error
    pub nde: f64,
}

/// Dense view of test results: one row per appliance, columns per
/// [`METRIC_COLUMNS`]
pub fn metrics_matrix(results: &[ApplianceMetrics]) -> Array2<f64> {
    let mut matrix = Array2::zeros((results.len(), METRIC_COLUMNS.len()));
    for (i, m) in results.iter().enumerate() {
        matrix[[i, 0]] = m.mae;
        matrix[[i, 1]] = m.f1;
        matrix[[i, 2]] = m.eac;
        matrix[[i, 3]] = m.nde;
    }
    matrix
}

/// Narrow interface to a training engine
///
/// Implementations own their model and data pipeline. State exchanged
/// through [`snapshot`](TrainingBackend::snapshot) and
/// [`restore`](TrainingBackend::restore) is engine-defined JSON, persisted
/// verbatim inside checkpoint files.
pub trait TrainingBackend {
    /// Backend name for logging
    fn name(&self) -> &str;

    /// Train for one epoch and report metrics
    fn train_epoch(&mut self, epoch: usize) -> Result<EpochMetrics>;

    /// Run the test phase, producing per-appliance metrics
    fn evaluate(&mut self) -> Result<Vec<ApplianceMetrics>>;

    /// Switch between training and evaluation mode
    fn set_eval(&mut self, eval: bool);

    /// Serialize learned state for checkpointing
    fn snapshot(&self) -> Result<serde_json::Value>;

    /// Restore learned state from a checkpoint
    fn restore(&mut self, state: &serde_json::Value) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monitor_score_prefers_val_f1() {
        let m = EpochMetrics { loss: 0.4, val_loss: Some(0.5), val_f1: Some(0.8) };
        assert_eq!(m.monitor_score(), 0.8);
    }

    #[test]
    fn test_monitor_score_falls_back_to_negated_loss() {
        let m = EpochMetrics { loss: 0.4, val_loss: None, val_f1: None };
        assert_eq!(m.monitor_score(), -0.4);
        // Lower loss means higher score
        let better = EpochMetrics { loss: 0.2, val_loss: None, val_f1: None };
        assert!(better.monitor_score() > m.monitor_score());
    }

    #[test]
    fn test_metrics_matrix_layout() {
        let results = vec![
            ApplianceMetrics {
                appliance: "kettle".to_string(),
                mae: 12.0,
                f1: 0.9,
                eac: 0.95,
                nde: 0.1,
            },
            ApplianceMetrics {
                appliance: "fridge".to_string(),
                mae: 30.0,
                f1: 0.7,
                eac: 0.8,
                nde: 0.3,
            },
        ];
        let matrix = metrics_matrix(&results);
        assert_eq!(matrix.shape(), &[2, 4]);
        assert_eq!(matrix[[0, 0]], 12.0);
        assert_eq!(matrix[[1, 1]], 0.7);
        assert_eq!(matrix[[1, 3]], 0.3);
    }

    #[test]
    fn test_metrics_matrix_empty() {
        let matrix = metrics_matrix(&[]);
        assert_eq!(matrix.shape(), &[0, 4]);
    }
}
