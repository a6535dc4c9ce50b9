//! Early stopping callback to halt training when the monitored metric plateaus

use super::traits::{CallbackAction, CallbackContext, TrainerCallback};

/// Early stopping on a maximized metric
///
/// Monitors validation F1 (falling back to negated training loss when no
/// validation metric is reported) and stops training if no improvement of at
/// least `min_delta` is seen for `patience` epochs.
///
/// # Example
///
/// ```rust
/// use desagregar::train::EarlyStopping;
///
/// // Stop if F1 fails to improve by 1e-4 for 20 epochs
/// let early_stop = EarlyStopping::new(20, 1e-4);
/// ```
#[derive(Clone, Debug)]
pub struct EarlyStopping {
    /// Number of epochs to wait for improvement
    patience: usize,
    /// Minimum improvement to reset patience
    min_delta: f32,
    /// Best score seen so far
    best_score: f32,
    /// Epochs without improvement
    pub(crate) epochs_without_improvement: usize,
}

impl EarlyStopping {
    /// Create new early stopping callback
    pub fn new(patience: usize, min_delta: f32) -> Self {
        Self {
            patience,
            min_delta,
            best_score: f32::NEG_INFINITY,
            epochs_without_improvement: 0,
        }
    }

    /// Reset internal state
    pub fn reset(&mut self) {
        self.best_score = f32::NEG_INFINITY;
        self.epochs_without_improvement = 0;
    }

    /// Check if the monitored score improved
    fn check_improvement(&mut self, score: f32) -> bool {
        if score > self.best_score + self.min_delta {
            self.best_score = score;
            self.epochs_without_improvement = 0;
            true
        } else {
            self.epochs_without_improvement += 1;
            false
        }
    }
}

impl TrainerCallback for EarlyStopping {
    fn on_epoch_end(&mut self, ctx: &CallbackContext) -> CallbackAction {
        let score = ctx.val_f1.unwrap_or(-ctx.loss);
        self.check_improvement(score);

        if self.epochs_without_improvement >= self.patience {
            eprintln!(
                "Early stopping: no improvement for {} epochs (best score: {:.4})",
                self.patience, self.best_score
            );
            CallbackAction::Stop
        } else {
            CallbackAction::Continue
        }
    }

    fn name(&self) -> &'static str {
        "EarlyStopping"
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Early stopping always stops after patience epochs without improvement
        #[test]
        fn early_stopping_respects_patience(
            patience in 1usize..10,
            min_delta in 0.0001f32..0.1,
            initial_f1 in 0.1f32..0.9,
        ) {
            let mut es = EarlyStopping::new(patience, min_delta);
            let mut ctx = CallbackContext { val_f1: Some(initial_f1), ..Default::default() };

            // First epoch establishes the baseline
            es.on_epoch_end(&ctx);

            // Run for patience epochs without improvement
            for epoch in 1..=patience {
                ctx.epoch = epoch;
                let action = es.on_epoch_end(&ctx);
                if epoch < patience {
                    prop_assert_eq!(action, CallbackAction::Continue);
                } else {
                    prop_assert_eq!(action, CallbackAction::Stop);
                }
            }
        }

        /// The counter resets whenever the score improves past min_delta
        #[test]
        fn early_stopping_resets_on_improvement(
            patience in 2usize..10,
            min_delta in 0.001f32..0.01,
            initial_f1 in 0.1f32..0.5,
            improvement in 0.1f32..0.4,
        ) {
            let mut es = EarlyStopping::new(patience, min_delta);
            let mut ctx = CallbackContext { val_f1: Some(initial_f1), ..Default::default() };
            es.on_epoch_end(&ctx);

            ctx.epoch = 1;
            es.on_epoch_end(&ctx);
            prop_assert!(es.epochs_without_improvement >= 1);

            ctx.epoch = 2;
            ctx.val_f1 = Some(initial_f1 + improvement);
            es.on_epoch_end(&ctx);
            prop_assert_eq!(es.epochs_without_improvement, 0);
        }
    }
}
