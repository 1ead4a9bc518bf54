//! Epoch-level metric helpers shared by both training loops.

/// Index of the maximum element in a slice.
pub fn argmax(v: &[f64]) -> usize {
    v.iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Whether a classification output is correct: the expected class's one-hot
/// index must hold the strict maximum output activation. A tie with any
/// other component rejects correctness.
pub fn prediction_correct(out: &[f64], expected: &[f64]) -> bool {
    let required = argmax(expected);
    out.iter()
        .enumerate()
        .all(|(idx, &value)| idx == required || out[required] > value)
}

/// Fraction and count of correctly classified samples.
pub fn class_accuracy(outputs: &[Vec<f64>], expected: &[Vec<f64>]) -> (f64, usize) {
    let correct = outputs
        .iter()
        .zip(expected.iter())
        .filter(|(out, exp)| prediction_correct(out, exp))
        .count();
    (correct as f64 / outputs.len() as f64, correct)
}

/// Mean absolute difference between output and expected components,
/// averaged over all components of all samples.
pub fn mean_abs_error(outputs: &[Vec<f64>], expected: &[Vec<f64>]) -> f64 {
    let mut total = 0.0;
    let mut count = 0usize;
    for (out, exp) in outputs.iter().zip(expected.iter()) {
        for (o, e) in out.iter().zip(exp.iter()) {
            total += (o - e).abs();
            count += 1;
        }
    }
    total / count as f64
}

/// Thresholds every component at `threshold`: 1.0 at or above, else 0.0.
/// Used to binarize the final epoch's predictions for display.
pub fn binarize(v: &[f64], threshold: f64) -> Vec<f64> {
    v.iter()
        .map(|&x| if x >= threshold { 1.0 } else { 0.0 })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argmax_picks_first_of_equal_maxima() {
        assert_eq!(argmax(&[0.1, 0.9, 0.9]), 1);
        assert_eq!(argmax(&[3.0]), 0);
    }

    #[test]
    fn prediction_requires_strict_maximum() {
        let expected = [0.0, 1.0, 0.0];
        assert!(prediction_correct(&[0.1, 0.8, 0.1], &expected));
        // A tie with another component is not correct.
        assert!(!prediction_correct(&[0.8, 0.8, 0.1], &expected));
        assert!(!prediction_correct(&[0.9, 0.8, 0.1], &expected));
    }

    #[test]
    fn class_accuracy_counts_hits() {
        let outputs = vec![vec![0.9, 0.1], vec![0.4, 0.6], vec![0.5, 0.5]];
        let expected = vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![0.0, 1.0]];
        let (fraction, correct) = class_accuracy(&outputs, &expected);
        assert_eq!(correct, 2);
        assert!((fraction - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn mean_abs_error_averages_components() {
        let outputs = vec![vec![1.0, 0.0], vec![0.5, 0.5]];
        let expected = vec![vec![0.0, 0.0], vec![0.5, 1.0]];
        assert!((mean_abs_error(&outputs, &expected) - (1.0 + 0.0 + 0.0 + 0.5) / 4.0).abs() < 1e-12);
    }

    #[test]
    fn binarize_thresholds_at_half() {
        assert_eq!(binarize(&[0.49, 0.5, 0.51], 0.5), vec![0.0, 1.0, 1.0]);
    }
}
