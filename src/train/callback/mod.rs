//! Training callbacks
//!
//! Event hooks fired by the trainer around epochs: early stopping on a
//! plateaued validation metric and periodic progress reporting.

mod early_stopping;
mod manager;
mod progress;
mod traits;

pub use early_stopping::EarlyStopping;
pub use manager::CallbackManager;
pub use progress::ProgressCallback;
pub use traits::{CallbackAction, CallbackContext, TrainerCallback};
