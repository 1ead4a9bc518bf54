use serde::{Serialize, Deserialize};

/// Per-epoch training statistics emitted by the training loops.
///
/// When a `progress_tx` channel is configured in `TrainConfig`, the loop
/// sends one `EpochStats` value at the end of every completed epoch.
/// Receivers (e.g. the CLI's JSON-lines mode) use this to drive real-time
/// progress output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Total epochs requested for this run.
    pub total_epochs: usize,
    /// Mean error over all samples (absent for ClassAccuracy runs).
    pub error: Option<f64>,
    /// Fraction of correctly classified samples in [0, 1] (ClassAccuracy
    /// runs only).
    pub accuracy: Option<f64>,
    /// Number of correctly classified samples (ClassAccuracy runs only).
    pub correct: Option<usize>,
    /// Wall-clock duration of this single epoch in milliseconds.
    pub elapsed_ms: u64,
}

impl EpochStats {
    /// The scalar the loop tracks and returns: accuracy when present,
    /// otherwise the error.
    pub fn value(&self) -> f64 {
        self.accuracy.or(self.error).unwrap_or(0.0)
    }
}
