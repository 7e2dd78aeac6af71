use serde::{Serialize, Deserialize};

/// Per-epoch statistics emitted by `train_loop` on the optional progress channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    pub total_epochs: usize,
    /// Mean squared error over all samples seen in this epoch.
    pub train_loss: f64,
    pub elapsed_ms: u64,
}
