use std::sync::mpsc;
use std::sync::{atomic::AtomicBool, Arc};

use serde::{Serialize, Deserialize};

use crate::train::epoch_stats::EpochStats;

/// Selects which epoch-level metric the training loop reports.
///
/// - `ClassAccuracy` — count/fraction of correctly classified samples;
///   "correct" means the expected class's one-hot index holds the strict
///   maximum output activation (ties reject correctness).
/// - `MeanAbsError`  — mean absolute difference between the output and
///   expected vectors.
/// - `CrossEntropy`  — mean categorical cross-entropy; pair with a Softmax
///   output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    ClassAccuracy,
    MeanAbsError,
    CrossEntropy,
}

/// Configuration for a training run.
///
/// # Fields
/// - `epochs`      — number of full passes; the loop runs exactly this many,
///                   no early stopping
/// - `shuffle`     — reshuffle the sample order before every epoch
///                   (feed-forward loop only; a sequence is ordered by
///                   definition and is never shuffled)
/// - `metric`      — epoch-level metric to compute and report
/// - `log_every`   — print a console line every N epochs; 0 disables
/// - `progress_tx` — optional channel sender; one `EpochStats` is sent per
///                   completed epoch. If the receiver is dropped the loop
///                   terminates early (clean shutdown).
/// - `stop_flag`   — optional atomic flag; when set to `true` from another
///                   thread the loop terminates after the current epoch
pub struct TrainConfig {
    pub epochs: usize,
    pub shuffle: bool,
    pub metric: Metric,
    pub log_every: usize,
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl TrainConfig {
    /// Creates a minimal config: no shuffling, no console logging, no
    /// progress channel, no stop flag.
    pub fn new(epochs: usize, metric: Metric) -> Self {
        TrainConfig {
            epochs,
            shuffle: false,
            metric,
            log_every: 0,
            progress_tx: None,
            stop_flag: None,
        }
    }
}
