//! Non-mutating elementwise vector helpers.
//!
//! Every function here allocates a fresh result and leaves its arguments
//! untouched, so callers can keep reusing intermediate sums/activations
//! across several downstream computations in the same pass.

use rand::Rng;

/// Elementwise sum of two equal-length vectors.
pub fn add(a: &[f64], b: &[f64]) -> Vec<f64> {
    if a.len() != b.len() {
        panic!("Vectors are of incorrect sizes")
    }
    a.iter().zip(b.iter()).map(|(x, y)| x + y).collect()
}

/// Elementwise difference of two equal-length vectors.
pub fn sub(a: &[f64], b: &[f64]) -> Vec<f64> {
    if a.len() != b.len() {
        panic!("Vectors are of incorrect sizes")
    }
    a.iter().zip(b.iter()).map(|(x, y)| x - y).collect()
}

/// Elementwise (Hadamard) product of two equal-length vectors.
pub fn hadamard(a: &[f64], b: &[f64]) -> Vec<f64> {
    if a.len() != b.len() {
        panic!("Vectors are of incorrect sizes")
    }
    a.iter().zip(b.iter()).map(|(x, y)| x * y).collect()
}

/// Scales every component by `k`. Used to turn a raw gradient into a
/// learning-rate-sized step.
pub fn scale(v: &[f64], k: f64) -> Vec<f64> {
    v.iter().map(|x| x * k).collect()
}

/// Glorot-uniform vector init with the same `sqrt(1/fan_in)` bound as
/// `Matrix::glorot` — used for bias vectors.
pub fn glorot<R: Rng>(len: usize, fan_in: usize, rng: &mut R) -> Vec<f64> {
    let bound = (1.0 / fan_in as f64).sqrt();
    (0..len).map(|_| rng.gen::<f64>() * 2.0 * bound - bound).collect()
}
