//! Core traits and types for the callback system
//!
//! - `CallbackContext` - training state passed to callbacks
//! - `CallbackAction` - actions a callback can request
//! - `TrainerCallback` - the trait all callbacks implement

/// Context passed to callbacks with current training state
#[derive(Clone, Debug)]
pub struct CallbackContext {
    /// Current epoch (0-indexed)
    pub epoch: usize,
    /// Total epochs planned
    pub max_epochs: usize,
    /// Training loss for the epoch
    pub loss: f32,
    /// Validation loss, if available
    pub val_loss: Option<f32>,
    /// Validation F1, if available
    pub val_f1: Option<f32>,
    /// Best monitored score seen so far
    pub best_score: Option<f32>,
    /// Training duration in seconds
    pub elapsed_secs: f64,
}

impl Default for CallbackContext {
    fn default() -> Self {
        Self {
            epoch: 0,
            max_epochs: 0,
            loss: 0.0,
            val_loss: None,
            val_f1: None,
            best_score: None,
            elapsed_secs: 0.0,
        }
    }
}

/// Action to take after a callback
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallbackAction {
    /// Continue training normally
    Continue,
    /// Stop training (early stopping)
    Stop,
}

/// Trait for training callbacks
///
/// All methods have default no-op implementations; implement only the events
/// you care about.
pub trait TrainerCallback: Send {
    /// Called before training starts
    fn on_train_begin(&mut self, _ctx: &CallbackContext) -> CallbackAction {
        CallbackAction::Continue
    }

    /// Called after each epoch
    fn on_epoch_end(&mut self, _ctx: &CallbackContext) -> CallbackAction {
        CallbackAction::Continue
    }

    /// Called after training ends
    fn on_train_end(&mut self, _ctx: &CallbackContext) {}

    /// Callback name for logging
    fn name(&self) -> &'static str {
        "TrainerCallback"
    }
}
