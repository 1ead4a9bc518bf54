use rand::rngs::StdRng;
use rand::SeedableRng;

use minirnn::activation::ActivationFunction;
use minirnn::data;
use minirnn::layers::transition::output_error;
use minirnn::math::Matrix;
use minirnn::recurrent::{Args, Recurrent};
use minirnn::train::{self, Metric, TrainConfig};
use minirnn::NetError;

fn args_with_depth(depth: usize) -> Args {
    Args {
        eta: 0.05,
        num_inp: 3,
        num_hid: 4,
        num_out: 2,
        depth,
    }
}

/// A short deterministic sequence with matching 2-wide targets.
fn five_step_sequence() -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
    let inputs = vec![
        vec![1.0, 0.0, 0.0],
        vec![0.0, 1.0, 0.0],
        vec![0.0, 0.0, 1.0],
        vec![1.0, 0.0, 0.0],
        vec![0.0, 1.0, 0.0],
    ];
    let expected = vec![
        vec![0.0, 1.0],
        vec![1.0, 0.0],
        vec![0.0, 1.0],
        vec![1.0, 0.0],
        vec![0.0, 1.0],
    ];
    (inputs, expected)
}

#[test]
fn first_timestep_sees_a_zero_hidden_state() {
    let net =
        Recurrent::elman_with_rng(&args_with_depth(3), &mut StdRng::seed_from_u64(2)).unwrap();
    let (inputs, _) = five_step_sequence();
    let (sums, _) = net.forward_sequence(&inputs).unwrap();
    // With no previous hidden state the recurrent carry contributes nothing.
    assert_eq!(sums[0].hidden, net.input_hidden.weights.mul_vec(&inputs[0]));
}

#[test]
fn forward_sequence_is_deterministic() {
    let net =
        Recurrent::elman_with_rng(&args_with_depth(2), &mut StdRng::seed_from_u64(4)).unwrap();
    let (inputs, _) = five_step_sequence();
    let (sums_a, acts_a) = net.forward_sequence(&inputs).unwrap();
    let (sums_b, acts_b) = net.forward_sequence(&inputs).unwrap();
    assert_eq!(sums_a, sums_b);
    assert_eq!(acts_a, acts_b);
}

#[test]
fn vanilla_outputs_are_softmax_distributions() {
    let net =
        Recurrent::vanilla_with_rng(&args_with_depth(2), &mut StdRng::seed_from_u64(6)).unwrap();
    let (inputs, _) = five_step_sequence();
    let (_, acts) = net.forward_sequence(&inputs).unwrap();
    for step in &acts {
        let total: f64 = step.output.iter().sum();
        assert!((total - 1.0).abs() < 1e-12);
        // Hidden activations come from tanh, so they live in (-1, 1).
        assert!(step.hidden.iter().all(|&h| h > -1.0 && h < 1.0));
    }
}

#[test]
fn depth_zero_never_unrolls() {
    let args = args_with_depth(0);
    let mut net = Recurrent::elman_with_rng(&args, &mut StdRng::seed_from_u64(11)).unwrap();
    let initial = net.clone();
    let (inputs, expected) = five_step_sequence();

    net.bptt(&inputs, &expected).unwrap();

    // The unroll loop never executes: IH and HH receive no updates at all.
    assert_eq!(net.input_hidden.weights, initial.input_hidden.weights);
    assert_eq!(net.hidden_hidden, initial.hidden_hidden);
    assert_ne!(net.output.weights, initial.output.weights);

    // HO must match applying the single-layer backward law at each timestep
    // independently, with no cross-timestep accumulation.
    let (sums, acts) = initial.forward_sequence(&inputs).unwrap();
    let mut ho = initial.output.weights.clone();
    for t in 0..inputs.len() {
        let out_err = output_error(
            &acts[t].output,
            &sums[t].output,
            &expected[t],
            ActivationFunction::Sigmoid,
        );
        ho = ho - Matrix::outer(&out_err, &acts[t].hidden).map(|x| x * initial.eta);
    }
    assert_eq!(net.output.weights, ho);
}

#[test]
fn single_timestep_sequence_trains_without_unrolling() {
    let mut net =
        Recurrent::elman_with_rng(&args_with_depth(3), &mut StdRng::seed_from_u64(13)).unwrap();
    let initial = net.clone();

    net.bptt(&[vec![1.0, 0.0, 0.0]], &[vec![0.0, 1.0]]).unwrap();

    // There is no timestep before t = 0, so HH and IH stay untouched while
    // HO still receives its per-timestep update.
    assert_eq!(net.hidden_hidden, initial.hidden_hidden);
    assert_eq!(net.input_hidden.weights, initial.input_hidden.weights);
    assert_ne!(net.output.weights, initial.output.weights);
}

#[test]
fn positive_depth_updates_all_three_matrices() {
    let mut net =
        Recurrent::elman_with_rng(&args_with_depth(2), &mut StdRng::seed_from_u64(17)).unwrap();
    let initial = net.clone();
    let (inputs, expected) = five_step_sequence();

    net.bptt(&inputs, &expected).unwrap();

    assert_ne!(net.input_hidden.weights, initial.input_hidden.weights);
    assert_ne!(net.hidden_hidden, initial.hidden_hidden);
    assert_ne!(net.output.weights, initial.output.weights);
}

#[test]
fn depth_beyond_sequence_length_is_capped() {
    // A depth far larger than the sequence must clamp at t steps back.
    let mut net =
        Recurrent::elman_with_rng(&args_with_depth(100), &mut StdRng::seed_from_u64(19)).unwrap();
    let (inputs, expected) = five_step_sequence();
    net.bptt(&inputs, &expected).unwrap();
}

#[test]
fn bptt_rejects_mismatched_sequences() {
    let mut net =
        Recurrent::elman_with_rng(&args_with_depth(1), &mut StdRng::seed_from_u64(23)).unwrap();
    let (inputs, _) = five_step_sequence();

    let err = net.bptt(&inputs, &[vec![0.0, 1.0]]).unwrap_err();
    assert!(matches!(err, NetError::Length { inputs: 5, targets: 1 }));

    let bad_width = vec![vec![0.0]; 5];
    let err = net.bptt(&inputs, &bad_width).unwrap_err();
    assert!(matches!(err, NetError::Shape { expected: 2, got: 1, .. }));

    let err = net.forward_sequence(&[]).unwrap_err();
    assert!(matches!(err, NetError::Empty(_)));
}

#[test]
fn sequence_training_loop_learns_the_moving_pulse() {
    let mut rng = StdRng::seed_from_u64(0);
    let args = Args {
        eta: 0.025,
        num_inp: 4,
        num_hid: 6,
        num_out: 4,
        depth: 3,
    };
    let mut net = Recurrent::elman_with_rng(&args, &mut rng).unwrap();
    let (inputs, expected) = data::abstract_series();

    let config = TrainConfig::new(4001, Metric::MeanAbsError);
    let outputs = train::run_sequence_epochs(&mut net, &inputs, &expected, &config).unwrap();

    assert_eq!(outputs.len(), inputs.len());
    assert!(outputs.iter().all(|row| row.len() == 4));

    // After training, the raw error must sit well below an untrained
    // network's and every timestep must predict the right next channel.
    let error = train::metrics::mean_abs_error(&outputs, &expected);
    assert!(error < 0.3, "mean abs error still {error}");
    for (t, (output, exp)) in outputs.iter().zip(expected.iter()).enumerate() {
        assert_eq!(
            train::metrics::argmax(output),
            train::metrics::argmax(exp),
            "wrong channel predicted at timestep {t}"
        );
    }
}
