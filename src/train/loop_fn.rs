use std::sync::atomic::Ordering;
use std::time::Instant;

use tracing::info;

use crate::error::Result;
use crate::network::network::NeuralNetwork;
use crate::sample::samples_set::SamplesSet;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;
use crate::train::trainer::train_sample;

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Trains `network` on `samples` epoch by epoch and returns the guess level of
/// the **last completed epoch**.
///
/// Every epoch trains each sample in set order with `train_sample`. The guess
/// level is the share of samples whose training returned at iteration 0, i.e.
/// samples the network already recognized before that epoch touched them.
/// It is 0 for an empty set and for a run with no epochs.
///
/// # Early termination
/// The loop returns early if:
/// - an epoch's guess level exceeds `config.acceptable_error`, **or**
/// - the `progress_tx` receiver has been dropped, **or**
/// - `config.stop_flag` is set to `true`.
///
/// # Errors
/// A `TrainingDivergence` on any sample aborts the whole run.
pub fn train_loop(
    network: &mut NeuralNetwork,
    samples: &mut SamplesSet,
    config: &TrainConfig,
) -> Result<f64> {
    let mut guess_level = 0.0;

    for epoch in 1..=config.epochs {
        if let Some(ref flag) = config.stop_flag {
            if flag.load(Ordering::Relaxed) {
                break;
            }
        }

        let t_start = Instant::now();

        // Counted afresh each epoch; the previous epoch's ratio is not carried in.
        let mut already_known = 0usize;
        for sample in samples.iter_mut() {
            if train_sample(network, sample, config.parallel)? == 0 {
                already_known += 1;
            }
        }

        guess_level = if samples.is_empty() {
            0.0
        } else {
            already_known as f64 / samples.len() as f64
        };

        let stats = EpochStats {
            epoch,
            total_epochs: config.epochs,
            guess_level,
            mean_error: samples.mean_estimated_error(),
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        };
        info!(epoch, guess_level, mean_error = stats.mean_error, "epoch finished");

        let receiver_gone = match config.progress_tx {
            Some(ref tx) => tx.send(stats).is_err(),
            None => false,
        };

        if guess_level > config.acceptable_error || receiver_gone {
            break;
        }
    }

    Ok(guess_level)
}

/// Recognizes every sample in `samples` and returns the share recognized
/// correctly. Weights are not touched.
pub fn test_loop(network: &mut NeuralNetwork, samples: &mut SamplesSet) -> Result<f64> {
    for sample in samples.iter_mut() {
        network.predict(sample)?;
    }
    let accuracy = samples.accuracy();
    info!(samples = samples.len(), accuracy, "test set evaluated");
    Ok(accuracy)
}
