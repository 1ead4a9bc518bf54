use std::sync::atomic::Ordering;
use std::time::Instant;

use rand::seq::SliceRandom;

use crate::error::{NetError, NetResult};
use crate::loss::CrossEntropy;
use crate::network::Feedforward;
use crate::recurrent::Recurrent;
use crate::train::config::{Metric, TrainConfig};
use crate::train::epoch_stats::EpochStats;
use crate::train::metrics;

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Trains the feed-forward network for `config.epochs` epochs and returns
/// the metric value of the last completed epoch.
///
/// Each epoch applies a per-sample `update` to every sample — optionally in
/// a freshly shuffled order — and then performs one full additional forward
/// pass over all samples (in dataset order) to compute the epoch-level
/// metric. The loop runs exactly `config.epochs` times; there is no early
/// stopping beyond the optional stop flag / dropped progress receiver.
pub fn run_epochs(
    network: &mut Feedforward,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
    config: &TrainConfig,
) -> NetResult<f64> {
    validate_dataset(inputs, targets)?;

    let n = inputs.len();
    let mut last_metric = 0.0;

    for epoch in 1..=config.epochs {
        if should_stop(config) {
            break;
        }
        let t_start = Instant::now();

        let mut order: Vec<usize> = (0..n).collect();
        if config.shuffle {
            order.shuffle(&mut rand::thread_rng());
        }
        for &i in &order {
            network.update(&inputs[i], &targets[i])?;
        }

        // Reporting pass, always in dataset order.
        let mut outputs = Vec::with_capacity(n);
        for input in inputs {
            let (_, acts) = network.forward(input)?;
            outputs.push(acts.output);
        }

        let stats = epoch_stats(epoch, config, &outputs, targets, t_start);
        last_metric = stats.value();
        log_epoch(config, &stats, n);
        if !emit(config, stats) || should_stop(config) {
            break;
        }
    }

    Ok(last_metric)
}

/// Trains the recurrent network for `config.epochs` epochs and returns the
/// raw (un-binarized) outputs of the final epoch's reporting pass, one
/// vector per timestep.
///
/// Each epoch runs one `bptt` pass over the whole ordered sequence —
/// weights mutate continuously during the pass — followed by a forward
/// pass for reporting. Sequences are never shuffled: row order is time.
pub fn run_sequence_epochs(
    network: &mut Recurrent,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
    config: &TrainConfig,
) -> NetResult<Vec<Vec<f64>>> {
    validate_dataset(inputs, targets)?;

    let mut final_outputs = Vec::new();

    for epoch in 1..=config.epochs {
        if should_stop(config) {
            break;
        }
        let t_start = Instant::now();

        network.bptt(inputs, targets)?;

        let (_, acts) = network.forward_sequence(inputs)?;
        let outputs: Vec<Vec<f64>> = acts.into_iter().map(|a| a.output).collect();

        let stats = epoch_stats(epoch, config, &outputs, targets, t_start);
        log_epoch(config, &stats, inputs.len());
        final_outputs = outputs;
        if !emit(config, stats) || should_stop(config) {
            break;
        }
    }

    Ok(final_outputs)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn validate_dataset(inputs: &[Vec<f64>], targets: &[Vec<f64>]) -> NetResult<()> {
    if inputs.is_empty() {
        return Err(NetError::Empty("training inputs"));
    }
    if inputs.len() != targets.len() {
        return Err(NetError::Length {
            inputs: inputs.len(),
            targets: targets.len(),
        });
    }
    Ok(())
}

fn should_stop(config: &TrainConfig) -> bool {
    config
        .stop_flag
        .as_ref()
        .is_some_and(|flag| flag.load(Ordering::Relaxed))
}

/// Sends stats on the progress channel, if any. Returns `false` when the
/// receiver has been dropped, which terminates the loop cleanly.
fn emit(config: &TrainConfig, stats: EpochStats) -> bool {
    match &config.progress_tx {
        Some(tx) => tx.send(stats).is_ok(),
        None => true,
    }
}

fn epoch_stats(
    epoch: usize,
    config: &TrainConfig,
    outputs: &[Vec<f64>],
    targets: &[Vec<f64>],
    t_start: Instant,
) -> EpochStats {
    let (error, accuracy, correct) = match config.metric {
        Metric::ClassAccuracy => {
            let (fraction, hits) = metrics::class_accuracy(outputs, targets);
            (None, Some(fraction), Some(hits))
        }
        Metric::MeanAbsError => (Some(metrics::mean_abs_error(outputs, targets)), None, None),
        Metric::CrossEntropy => (Some(CrossEntropy::mean(targets, outputs)), None, None),
    };
    EpochStats {
        epoch,
        total_epochs: config.epochs,
        error,
        accuracy,
        correct,
        elapsed_ms: t_start.elapsed().as_millis() as u64,
    }
}

fn log_epoch(config: &TrainConfig, stats: &EpochStats, num_samples: usize) {
    if config.log_every == 0 || stats.epoch % config.log_every != 0 {
        return;
    }
    match (stats.correct, stats.error) {
        (Some(correct), _) => println!(
            "Epoch {}; {} out of {} predictions correct",
            stats.epoch, correct, num_samples
        ),
        (None, Some(error)) => println!("Epoch {}; error {:.6}", stats.epoch, error),
        (None, None) => {}
    }
}
