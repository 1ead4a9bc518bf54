pub mod config;
pub mod epoch_stats;
pub mod loop_fn;
pub mod metrics;

pub use config::{Metric, TrainConfig};
pub use epoch_stats::EpochStats;
pub use loop_fn::{run_epochs, run_sequence_epochs};
