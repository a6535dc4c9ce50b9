//! Configuration validation
//!
//! Range checks applied when the experiment wrapper is constructed, so a
//! malformed configuration fails before any directory or backend work.

use super::schema::ExperimentParams;

/// Validation error type
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Quantile list cannot be empty")]
    EmptyQuantiles,

    #[error("Invalid quantile: {0} (must be in (0.0, 1.0))")]
    InvalidQuantile(f64),

    #[error("Invalid batch size: {0} (must be > 0)")]
    InvalidBatchSize(usize),

    #[error("Invalid epochs: {0} (must be > 0)")]
    InvalidEpochs(usize),

    #[error("Invalid sequence length: {0} (must be > 0)")]
    InvalidSequenceLength(usize),

    #[error("Invalid dropout: {0} (must be in [0.0, 1.0))")]
    InvalidDropout(f64),

    #[error("Invalid gradient clip value: {0} (must be > 0.0)")]
    InvalidClipValue(f64),

    #[error("Invalid output size: {0} (must be > 0)")]
    InvalidOutSize(usize),

    #[error("Invalid Monte-Carlo sample count: {0} (must be > 0 when mc is set)")]
    InvalidModelSamples(usize),

    #[error("Model name cannot be empty")]
    EmptyModelName,

    #[error("Dataset name cannot be empty")]
    EmptyDataset,
}

/// Validate an experiment configuration
pub fn validate(params: &ExperimentParams) -> Result<(), ValidationError> {
    if params.model_name.is_empty() {
        return Err(ValidationError::EmptyModelName);
    }
    if params.data.is_empty() {
        return Err(ValidationError::EmptyDataset);
    }
    if params.quantiles.is_empty() {
        return Err(ValidationError::EmptyQuantiles);
    }
    for &q in &params.quantiles {
        if q <= 0.0 || q >= 1.0 {
            return Err(ValidationError::InvalidQuantile(q));
        }
    }
    if params.batch_size == 0 {
        return Err(ValidationError::InvalidBatchSize(params.batch_size));
    }
    if params.n_epochs == 0 {
        return Err(ValidationError::InvalidEpochs(params.n_epochs));
    }
    if params.sequence_length == 0 {
        return Err(ValidationError::InvalidSequenceLength(params.sequence_length));
    }
    if !(0.0..1.0).contains(&params.dropout) {
        return Err(ValidationError::InvalidDropout(params.dropout));
    }
    if params.clip_value <= 0.0 {
        return Err(ValidationError::InvalidClipValue(params.clip_value));
    }
    if params.out_size == 0 {
        return Err(ValidationError::InvalidOutSize(params.out_size));
    }
    if params.mc && params.n_model_samples == 0 {
        return Err(ValidationError::InvalidModelSamples(params.n_model_samples));
    }
    Ok(())
}
