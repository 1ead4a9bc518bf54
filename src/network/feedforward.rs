use rand::Rng;

use crate::activation::ActivationFunction;
use crate::error::{NetError, NetResult};
use crate::layers::transition::{output_error, propagate_error};
use crate::layers::{Acts, Sums, Transition};
use crate::math::Matrix;

/// Construction arguments for [`Feedforward`]. No defaults — every field
/// must be supplied.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct Args {
    /// Learning rate η.
    pub eta: f64,
    pub num_inp: usize,
    pub num_hid: usize,
    pub num_out: usize,
}

impl Args {
    pub(crate) fn validate(&self) -> NetResult<()> {
        if !(self.eta > 0.0 && self.eta.is_finite()) {
            return Err(NetError::Config(format!(
                "learning rate must be positive and finite, got {}",
                self.eta
            )));
        }
        if self.num_inp == 0 || self.num_hid == 0 || self.num_out == 0 {
            return Err(NetError::Config(
                "layer sizes must all be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Per-sample weight/bias gradients produced by one backprop call. Same
/// shapes as the entities they are computed for; consumed immediately by
/// the update step and then discarded.
#[derive(Debug, Clone)]
pub struct Gradients {
    pub ih: Matrix,
    pub ho: Matrix,
    pub hb: Vec<f64>,
    pub ob: Vec<f64>,
}

/// A simple feed-forward neural network with an input, a hidden and an
/// output layer. We use this simplified model (without the possibility to
/// add an arbitrary number of hidden layers) to reduce the number of
/// obscure indices and to use only named entities.
///
/// The network is not optimized at all: no mini-batches, no full-matrix
/// batch updates. All updates are per sample, which is equivalent to a
/// mini-batch size of 1.
#[derive(Debug, Clone)]
pub struct Feedforward {
    /// Learning rate η.
    pub eta: f64,
    /// Input-to-hidden weights and hidden biases, sigmoid on top.
    pub hidden: Transition,
    /// Hidden-to-output weights and output biases, sigmoid on top.
    pub output: Transition,
}

impl Feedforward {
    /// Constructs a network with thread-local randomness.
    pub fn new(args: &Args) -> NetResult<Feedforward> {
        Feedforward::with_rng(args, &mut rand::thread_rng())
    }

    /// Constructs a network drawing the initial weights from `rng`, so a
    /// seeded rng gives a reproducible starting point.
    pub fn with_rng<R: Rng>(args: &Args, rng: &mut R) -> NetResult<Feedforward> {
        args.validate()?;
        Ok(Feedforward {
            eta: args.eta,
            hidden: Transition::glorot(
                args.num_hid,
                args.num_inp,
                true,
                ActivationFunction::Sigmoid,
                rng,
            ),
            output: Transition::glorot(
                args.num_out,
                args.num_hid,
                true,
                ActivationFunction::Sigmoid,
                rng,
            ),
        })
    }

    /// Forward pass: weighted sums (before the activation function) and
    /// activations (after it) for each neuron in all layers. The input
    /// vector is echoed into `Acts::input`; nothing is saved as input-layer
    /// sums because those values are not used anywhere.
    pub fn forward(&self, input: &[f64]) -> NetResult<(Sums, Acts)> {
        if input.len() != self.hidden.weights.cols {
            return Err(NetError::Shape {
                what: "input",
                expected: self.hidden.weights.cols,
                got: input.len(),
            });
        }
        let (hid_sums, hid_acts) = self.hidden.forward(input);
        let (out_sums, out_acts) = self.output.forward(&hid_acts);
        Ok((
            Sums {
                hidden: hid_sums,
                output: out_sums,
            },
            Acts {
                input: input.to_vec(),
                hidden: hid_acts,
                output: out_acts,
            },
        ))
    }

    /// Performs a forward pass for the input vector, calculates the error
    /// and returns the error gradients on the IH and HO weights and on the
    /// hidden and output biases.
    ///
    /// The gradient of the error on each hidden-to-output weight from
    /// neuron k to neuron j is (activation of k) * (error of j) — which,
    /// over whole layers, is exactly the outer product of the output-error
    /// vector and the hidden-activation vector. The same shortcut gives the
    /// input-to-hidden gradients, and the bias gradients are just the layer
    /// errors themselves.
    pub fn backprop(&self, input: &[f64], expected: &[f64]) -> NetResult<Gradients> {
        if expected.len() != self.output.weights.rows {
            return Err(NetError::Shape {
                what: "expected output",
                expected: self.output.weights.rows,
                got: expected.len(),
            });
        }
        let (sums, acts) = self.forward(input)?;
        let out_errs = output_error(&acts.output, &sums.output, expected, self.output.activation);
        let hid_errs = propagate_error(
            &out_errs,
            &sums.hidden,
            &self.output.weights,
            self.hidden.activation,
        );
        Ok(Gradients {
            ih: Matrix::outer(&hid_errs, &acts.input),
            ho: Matrix::outer(&out_errs, &acts.hidden),
            hb: hid_errs,
            ob: out_errs,
        })
    }

    /// Updates the weights and biases using the error gradients retrieved
    /// by backpropagation: each gradient is scaled by the learning rate and
    /// subtracted from the corresponding entity. The partial derivative of
    /// the error with respect to a weight tells how fast the error grows
    /// when that weight grows — to make the error smaller, we subtract.
    pub fn update(&mut self, input: &[f64], expected: &[f64]) -> NetResult<()> {
        let grads = self.backprop(input, expected)?;
        let eta = self.eta;
        self.hidden.apply_gradients(&grads.ih, Some(&grads.hb), eta);
        self.output.apply_gradients(&grads.ho, Some(&grads.ob), eta);
        Ok(())
    }
}
