pub mod transition;

pub use transition::{Acts, Sums, Transition};
