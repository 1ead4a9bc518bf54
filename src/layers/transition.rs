use rand::Rng;

use crate::activation::ActivationFunction;
use crate::math::{vector, Matrix};

/// Weighted sums received by each neuron of the hidden and output layers
/// for one sample (or one timestep). `sums.hidden[2]` is the pre-activation
/// sum received by the 3rd hidden neuron.
#[derive(Debug, Clone, PartialEq)]
pub struct Sums {
    pub hidden: Vec<f64>,
    pub output: Vec<f64>,
}

/// Activations of each neuron for one sample (or one timestep). The raw
/// input vector is echoed into `input` because layer-0 "activation" is
/// defined as the input itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Acts {
    pub input: Vec<f64>,
    pub hidden: Vec<f64>,
    pub output: Vec<f64>,
}

/// One layer boundary: a weight matrix, an optional bias vector and the
/// activation applied on top. Every network variant in this crate is a
/// composition of these — the feed-forward engine chains two, the
/// recurrent engine adds a hidden-to-hidden carry into the hidden one.
#[derive(Debug, Clone)]
pub struct Transition {
    /// Shape (to × from); `from` is the fan-in.
    pub weights: Matrix,
    pub bias: Option<Vec<f64>>,
    pub activation: ActivationFunction,
}

impl Transition {
    /// Glorot-initializes a transition of shape (to × from). Bias entries,
    /// when present, use the same fan-in bound as the weights.
    pub fn glorot<R: Rng>(
        to: usize,
        from: usize,
        with_bias: bool,
        activation: ActivationFunction,
        rng: &mut R,
    ) -> Transition {
        Transition {
            weights: Matrix::glorot(to, from, rng),
            bias: with_bias.then(|| vector::glorot(to, from, rng)),
            activation,
        }
    }

    /// Forward step: `sum = W·prev (+ bias)`, `act = activation(sum)`.
    /// Returns (sums, acts); neither input is mutated.
    pub fn forward(&self, prev: &[f64]) -> (Vec<f64>, Vec<f64>) {
        let mut sums = self.weights.mul_vec(prev);
        if let Some(bias) = &self.bias {
            sums = vector::add(&sums, bias);
        }
        let acts = self.activation.apply_vec(&sums);
        (sums, acts)
    }

    /// Forward step with an extra pre-activation carry-in:
    /// `sum = W·prev + carried (+ bias)`. The recurrent engine injects
    /// `HH·hidden[t-1]` here.
    pub fn forward_with(&self, prev: &[f64], carried: &[f64]) -> (Vec<f64>, Vec<f64>) {
        let mut sums = vector::add(&self.weights.mul_vec(prev), carried);
        if let Some(bias) = &self.bias {
            sums = vector::add(&sums, bias);
        }
        let acts = self.activation.apply_vec(&sums);
        (sums, acts)
    }

    /// Applies pre-computed gradients scaled by the learning rate. Call
    /// sites never reach into the raw weight storage.
    pub fn apply_gradients(&mut self, weights_grad: &Matrix, bias_grad: Option<&[f64]>, eta: f64) {
        self.weights = self.weights.clone() - weights_grad.map(|x| x * eta);
        if let (Some(bias), Some(grad)) = (self.bias.as_mut(), bias_grad) {
            *bias = vector::sub(bias, &vector::scale(grad, eta));
        }
    }
}

/// Output layer error: `(acts - expected) ⊙ activation'(sums)`.
///
/// With a sigmoid output this is the squared-error delta; with a softmax
/// output the derivative convention of 1.0 turns it into the combined
/// softmax + cross-entropy delta `predicted - expected`.
pub fn output_error(
    out_acts: &[f64],
    out_sums: &[f64],
    expected: &[f64],
    activation: ActivationFunction,
) -> Vec<f64> {
    let diff = vector::sub(out_acts, expected);
    vector::hadamard(&diff, &activation.derivative_vec(out_sums))
}

/// Backward propagation through one layer boundary: errors of layer (L+1)
/// are carried back to layer (L) through the same weights used on the
/// forward step (transposed), then multiplied elementwise by
/// `activation'(L-sums)`.
///
/// This single routine is reused for every layer boundary in every network
/// variant, including each hidden-to-hidden step of the BPTT unroll.
pub fn propagate_error(
    next_errs: &[f64],
    curr_sums: &[f64],
    weights_to_next: &Matrix,
    activation: ActivationFunction,
) -> Vec<f64> {
    let propagated = weights_to_next.transpose().mul_vec(next_errs);
    vector::hadamard(&propagated, &activation.derivative_vec(curr_sums))
}
