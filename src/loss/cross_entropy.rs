/// Categorical cross-entropy error for use with a Softmax output layer.
pub struct CrossEntropy;

impl CrossEntropy {
    /// Error for a single sample:
    ///   E = -sum(expected[i] * ln(predicted[i]))
    ///
    /// If the prediction is [0.3, 0.3, 0.4] and the expected output is
    /// [0, 0, 1], the error is -ln(0.4).
    ///
    /// The log is intentionally unguarded: a zero predicted component
    /// produces -inf/NaN which then propagates through subsequent epochs
    /// instead of being clamped away.
    pub fn sample(expected: &[f64], predicted: &[f64]) -> f64 {
        -expected
            .iter()
            .zip(predicted.iter())
            .map(|(e, p)| e * p.ln())
            .sum::<f64>()
    }

    /// Mean error across a set of samples (one row per sample).
    pub fn mean(expected: &[Vec<f64>], predicted: &[Vec<f64>]) -> f64 {
        let total: f64 = expected
            .iter()
            .zip(predicted.iter())
            .map(|(e, p)| CrossEntropy::sample(e, p))
            .sum();
        total / expected.len() as f64
    }
}
