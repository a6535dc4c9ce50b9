//! Progress reporting callback

use super::traits::{CallbackAction, CallbackContext, TrainerCallback};

/// Prints a one-line summary every N epochs
#[derive(Clone, Debug)]
pub struct ProgressCallback {
    /// Print every N epochs
    every: usize,
}

impl ProgressCallback {
    /// Create a progress callback printing every `every` epochs
    pub fn new(every: usize) -> Self {
        Self { every: every.max(1) }
    }
}

impl TrainerCallback for ProgressCallback {
    fn on_epoch_end(&mut self, ctx: &CallbackContext) -> CallbackAction {
        if ctx.epoch % self.every == 0 || ctx.epoch + 1 == ctx.max_epochs {
            let val_f1 = ctx.val_f1.map_or_else(|| "-".to_string(), |f1| format!("{f1:.4}"));
            println!(
                "epoch {}/{}: loss={:.4} val_f1={} [{:.1}s]",
                ctx.epoch + 1,
                ctx.max_epochs,
                ctx.loss,
                val_f1,
                ctx.elapsed_secs
            );
        }
        CallbackAction::Continue
    }

    fn name(&self) -> &'static str {
        "ProgressCallback"
    }
}
