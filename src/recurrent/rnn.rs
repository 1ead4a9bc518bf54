use rand::Rng;

use crate::activation::ActivationFunction;
use crate::error::{NetError, NetResult};
use crate::layers::transition::{output_error, propagate_error};
use crate::layers::{Acts, Sums, Transition};
use crate::math::Matrix;

/// Construction arguments for [`Recurrent`]. No defaults — every field
/// must be supplied.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct Args {
    /// Learning rate η.
    pub eta: f64,
    pub num_inp: usize,
    pub num_hid: usize,
    pub num_out: usize,
    /// Truncation depth: how many timesteps backward the error signal
    /// propagates through the unfolded network before stopping. Bounds the
    /// cost of BPTT to O(depth) per timestep instead of O(sequence length).
    pub depth: usize,
}

impl Args {
    fn validate(&self) -> NetResult<()> {
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

/// A simple recurrent neural network with recurrent connections from the
/// hidden layer at timestep (t-1) to the hidden layer at timestep (t),
/// trained by truncated backpropagation through time. As with the
/// feed-forward engine there is a single hidden layer and, for simplicity,
/// no biases.
///
/// The Elman-style and "vanilla" variants are the same engine with
/// different activation choices; both are built from the same shared layer
/// transitions, differing only in which nonlinearity sits on top of the
/// hidden and output sums.
#[derive(Debug, Clone)]
pub struct Recurrent {
    /// Learning rate η.
    pub eta: f64,
    /// Truncation depth: number of steps down the unfolded network.
    pub depth: usize,
    /// Input-to-hidden weights (IH), no bias.
    pub input_hidden: Transition,
    /// Hidden-to-hidden recurrence weights (HH).
    pub hidden_hidden: Matrix,
    /// Hidden-to-output weights (HO), no bias.
    pub output: Transition,
}

impl Recurrent {
    /// Elman-style variant: sigmoid hidden recurrence, sigmoid output.
    pub fn elman(args: &Args) -> NetResult<Recurrent> {
        Recurrent::elman_with_rng(args, &mut rand::thread_rng())
    }

    pub fn elman_with_rng<R: Rng>(args: &Args, rng: &mut R) -> NetResult<Recurrent> {
        Recurrent::with_rng(
            args,
            ActivationFunction::Sigmoid,
            ActivationFunction::Sigmoid,
            rng,
        )
    }

    /// Vanilla variant: tanh hidden recurrence, softmax output.
    pub fn vanilla(args: &Args) -> NetResult<Recurrent> {
        Recurrent::vanilla_with_rng(args, &mut rand::thread_rng())
    }

    pub fn vanilla_with_rng<R: Rng>(args: &Args, rng: &mut R) -> NetResult<Recurrent> {
        Recurrent::with_rng(
            args,
            ActivationFunction::Tanh,
            ActivationFunction::Softmax,
            rng,
        )
    }

    fn with_rng<R: Rng>(
        args: &Args,
        hidden_act: ActivationFunction,
        output_act: ActivationFunction,
        rng: &mut R,
    ) -> NetResult<Recurrent> {
        args.validate()?;
        Ok(Recurrent {
            eta: args.eta,
            depth: args.depth,
            input_hidden: Transition::glorot(args.num_hid, args.num_inp, false, hidden_act, rng),
            hidden_hidden: Matrix::glorot(args.num_hid, args.num_hid, rng),
            output: Transition::glorot(args.num_out, args.num_hid, false, output_act, rng),
        })
    }

    /// Forward pass over an ordered sequence of timesteps, maintaining the
    /// hidden-state chain: at t = 0 the previous hidden state is the zero
    /// vector, afterwards `hiddenSum[t] = IH·input[t] + HH·hidden[t-1]`.
    ///
    /// All per-timestep sums and activations are retained for the entire
    /// sequence — BPTT needs every timestep's intermediate state.
    pub fn forward_sequence(&self, inputs: &[Vec<f64>]) -> NetResult<(Vec<Sums>, Vec<Acts>)> {
        if inputs.is_empty() {
            return Err(NetError::Empty("input sequence"));
        }
        let mut sums = Vec::with_capacity(inputs.len());
        let mut acts: Vec<Acts> = Vec::with_capacity(inputs.len());

        let mut prev_hidden = vec![0.0; self.hidden_hidden.rows];
        for input in inputs {
            if input.len() != self.input_hidden.weights.cols {
                return Err(NetError::Shape {
                    what: "input",
                    expected: self.input_hidden.weights.cols,
                    got: input.len(),
                });
            }
            let carried = self.hidden_hidden.mul_vec(&prev_hidden);
            let (hid_sums, hid_acts) = self.input_hidden.forward_with(input, &carried);
            let (out_sums, out_acts) = self.output.forward(&hid_acts);
            prev_hidden = hid_acts.clone();
            sums.push(Sums {
                hidden: hid_sums,
                output: out_sums,
            });
            acts.push(Acts {
                input: input.clone(),
                hidden: hid_acts,
                output: out_acts,
            });
        }
        Ok((sums, acts))
    }

    /// Truncated backpropagation through time. As BPTT is a variation of
    /// standard backpropagation it may help to read the feed-forward
    /// engine's `backprop` first and look for similarities. There is no
    /// separate update step: every weight matrix is updated "on the go",
    /// once per timestep (HO) or once per unroll step (IH, HH), rather
    /// than via accumulated-then-applied gradients. This order-dependent
    /// behavior is intentional and preserved.
    ///
    /// For each timestep t, in forward chronological order:
    /// 1. output error for t, exactly as in the feed-forward engine;
    /// 2. HO gradient = outer(outputError, hidden[t]), applied immediately;
    /// 3. the hidden error is seeded by propagating the output error back
    ///    through HO;
    /// 4. the network is unfolded backward for z = 0 .. min(depth, t):
    ///    IH receives outer(hiddenError, input[t-z]), HH receives
    ///    outer(hiddenError, hidden[t-z-1]), and the hidden error is then
    ///    carried one step further back through HH.
    ///
    /// The unroll stops when z reaches the truncation depth or when t-z
    /// reaches 0 — there is no hidden state before the first timestep.
    pub fn bptt(&mut self, inputs: &[Vec<f64>], expected: &[Vec<f64>]) -> NetResult<()> {
        if inputs.len() != expected.len() {
            return Err(NetError::Length {
                inputs: inputs.len(),
                targets: expected.len(),
            });
        }
        for row in expected {
            if row.len() != self.output.weights.rows {
                return Err(NetError::Shape {
                    what: "expected output",
                    expected: self.output.weights.rows,
                    got: row.len(),
                });
            }
        }
        let (sums, acts) = self.forward_sequence(inputs)?;
        let eta = self.eta;

        for t in 0..inputs.len() {
            let out_err = output_error(
                &acts[t].output,
                &sums[t].output,
                &expected[t],
                self.output.activation,
            );
            let grad_ho = Matrix::outer(&out_err, &acts[t].hidden);
            self.output.apply_gradients(&grad_ho, None, eta);
            // Seed the unroll by carrying the output error back through the
            // (already updated) HO weights.
            let mut hid_err = propagate_error(
                &out_err,
                &sums[t].hidden,
                &self.output.weights,
                self.input_hidden.activation,
            );
            for z in 0..self.depth.min(t) {
                let grad_ih = Matrix::outer(&hid_err, &acts[t - z].input);
                self.input_hidden.apply_gradients(&grad_ih, None, eta);
                let grad_hh = Matrix::outer(&hid_err, &acts[t - z - 1].hidden);
                self.hidden_hidden =
                    self.hidden_hidden.clone() - grad_hh.map(|x| x * eta);
                // Hidden errors for step (t-z-1), carried back via HH.
                hid_err = propagate_error(
                    &hid_err,
                    &sums[t - z - 1].hidden,
                    &self.hidden_hidden,
                    self.input_hidden.activation,
                );
            }
        }
        Ok(())
    }
}
