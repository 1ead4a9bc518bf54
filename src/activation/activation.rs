use serde::{Serialize, Deserialize};
use std::f64::consts::E;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivationFunction {
    Sigmoid,
    Tanh,
    /// Softmax is a vector-valued activation; it is applied at the layer
    /// level (not element-wise) in `apply_vec()`. The element-wise
    /// `function()` path must therefore not be reached for this variant.
    Softmax,
}

impl ActivationFunction {
    /// Element-wise activation. For `Softmax`, call `apply_vec()` which
    /// applies the full-vector softmax; this path should not be reached.
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => 1.0 / (1.0 + E.powf(-x)),
            ActivationFunction::Tanh => x.tanh(),
            ActivationFunction::Softmax => {
                panic!(
                    "ActivationFunction::Softmax::function() must not be called directly; \
                     use apply_vec() which applies the full-vector softmax."
                )
            }
        }
    }

    /// Element-wise derivative of the activation, evaluated on the
    /// pre-activation sum.
    ///
    /// For `Softmax`, paired with cross-entropy the combined gradient is
    /// `predicted - expected`. Returning `1.0` here lets the output-error
    /// step pass that delta through unchanged without double-applying the
    /// Jacobian.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => {
                let fx = self.function(x);
                fx * (1.0 - fx)
            }
            ActivationFunction::Tanh => {
                let t = x.tanh();
                1.0 - t * t
            }
            ActivationFunction::Softmax => 1.0,
        }
    }

    /// Whole-vector activation. Produces a new vector, never mutates its
    /// argument.
    ///
    /// `Softmax` is computed as `e^{v_i} / Σ_j e^{v_j}` with no
    /// max-subtraction, so large-magnitude sums can overflow to infinity —
    /// the caller observes the resulting NaN/∞ instead of a silent rescale.
    pub fn apply_vec(&self, v: &[f64]) -> Vec<f64> {
        match self {
            ActivationFunction::Softmax => {
                let total: f64 = v.iter().map(|x| E.powf(*x)).sum();
                v.iter().map(|x| E.powf(*x) / total).collect()
            }
            _ => v.iter().map(|x| self.function(*x)).collect(),
        }
    }

    /// Whole-vector derivative, evaluated on the pre-activation sums.
    pub fn derivative_vec(&self, v: &[f64]) -> Vec<f64> {
        v.iter().map(|x| self.derivative(*x)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_prime_matches_sigmoid_identity() {
        let f = ActivationFunction::Sigmoid;
        // Dense sample over a wide range of finite inputs.
        let mut x = -8.0;
        while x <= 8.0 {
            let s = f.function(x);
            let expected = s * (1.0 - s);
            assert!((f.derivative(x) - expected).abs() < 1e-15, "at x = {x}");
            x += 0.01;
        }
    }

    #[test]
    fn tanh_derivative_is_one_minus_square() {
        let f = ActivationFunction::Tanh;
        for x in [-3.0f64, -0.5, 0.0, 0.5, 3.0] {
            let t = x.tanh();
            assert!((f.derivative(x) - (1.0 - t * t)).abs() < 1e-15);
        }
    }

    #[test]
    fn softmax_normalizes_to_one() {
        let out = ActivationFunction::Softmax.apply_vec(&[1.0, 2.0, 3.0]);
        let total: f64 = out.iter().sum();
        assert!((total - 1.0).abs() < 1e-12);
        // Larger sums get larger shares.
        assert!(out[2] > out[1] && out[1] > out[0]);
    }

    #[test]
    fn softmax_derivative_passes_delta_through() {
        assert_eq!(
            ActivationFunction::Softmax.derivative_vec(&[0.3, -2.0]),
            vec![1.0, 1.0]
        );
    }

    #[test]
    fn apply_vec_leaves_input_unmodified() {
        let v = vec![0.5, -0.5];
        let _ = ActivationFunction::Sigmoid.apply_vec(&v);
        assert_eq!(v, vec![0.5, -0.5]);
    }
}
