use thiserror::Error;

/// Result alias used by every fallible entry point in the crate.
pub type NetResult<T> = Result<T, NetError>;

/// Errors reported by network construction, forward/backward entry points
/// and the dataset collaborators.
///
/// Entry points validate shapes up front and fail with one of these instead
/// of letting a mismatched matrix-vector product produce undefined behavior
/// deep inside the numeric pipeline.
#[derive(Debug, Clone, Error)]
pub enum NetError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("shape mismatch for {what}: expected length {expected}, got {got}")]
    Shape {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("length mismatch: {inputs} input rows vs {targets} target rows")]
    Length { inputs: usize, targets: usize },

    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("csv parse error at line {line}: {msg}")]
    Csv { line: usize, msg: String },
}
