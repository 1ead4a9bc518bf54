pub mod rnn;

pub use rnn::{Args, Recurrent};
