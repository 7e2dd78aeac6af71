use std::sync::mpsc;
use std::sync::{Arc, atomic::AtomicBool};
use crate::train::epoch_stats::EpochStats;

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `epochs`        — number of full passes over the training set
/// - `learning_rate` — step size for every weight and bias update
/// - `progress_tx`   — optional channel sender; one `EpochStats` is sent per
///                     completed epoch.  If the receiver is dropped the loop
///                     stops after that epoch.
/// - `stop_flag`     — optional atomic flag; when set to `true` the loop
///                     stops after the current epoch.
#[derive(Debug, Clone)]
pub struct TrainConfig {
    pub epochs: usize,
    pub learning_rate: f64,
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl TrainConfig {
    /// Creates a minimal `TrainConfig` with no progress channel and no stop flag.
    pub fn new(epochs: usize, learning_rate: f64) -> Self {
        TrainConfig {
            epochs,
            learning_rate,
            progress_tx: None,
            stop_flag: None,
        }
    }

    pub fn with_progress(mut self, progress_tx: mpsc::Sender<EpochStats>) -> Self {
        self.progress_tx = Some(progress_tx);
        self
    }

    pub fn with_stop_flag(mut self, stop_flag: Arc<AtomicBool>) -> Self {
        self.stop_flag = Some(stop_flag);
        self
    }
}
