pub mod feedforward;

pub use feedforward::{Args, Feedforward, Gradients};
