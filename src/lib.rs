pub mod activation;
pub mod data;
pub mod error;
pub mod layers;
pub mod loss;
pub mod math;
pub mod network;
pub mod recurrent;
pub mod report;
pub mod train;

// Convenience re-exports
pub use activation::ActivationFunction;
pub use error::{NetError, NetResult};
pub use layers::{Acts, Sums, Transition};
pub use loss::CrossEntropy;
pub use math::Matrix;
pub use network::Feedforward;
pub use recurrent::Recurrent;
pub use train::{run_epochs, run_sequence_epochs, EpochStats, Metric, TrainConfig};
