use tracing::{debug, warn};

use crate::error::{NetworkError, Result};
use crate::network::network::NeuralNetwork;
use crate::sample::sample::Sample;

/// Forward/backward cycles allowed for one sample.
pub const MAX_ITERATIONS: usize = 1000;

/// A sample counts as learned once it is recognized correctly and its
/// estimated error is below this value.
pub const ERROR_THRESHOLD: f64 = 0.2;

/// Runs forward and backward passes on `sample` until it is learned.
///
/// Returns the 0-based iteration at which the sample was learned; 0 means the
/// network already knew it and no weight was changed. Weights updated before
/// a `TrainingDivergence` stay applied.
pub fn train_sample(network: &mut NeuralNetwork, sample: &mut Sample, parallel: bool) -> Result<usize> {
    for iteration in 0..MAX_ITERATIONS {
        network.run(sample, parallel)?;

        if sample.is_correct() && sample.estimated_error() < ERROR_THRESHOLD {
            debug!(iteration, error = sample.estimated_error(), "sample learned");
            return Ok(iteration);
        }

        network.update_weights(sample)?;
    }

    warn!(
        iterations = MAX_ITERATIONS,
        class = %sample.actual_class(),
        error = sample.estimated_error(),
        "sample did not converge"
    );
    Err(NetworkError::TrainingDivergence { iterations: MAX_ITERATIONS })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::class::SampleClass;
    use rand::{rngs::StdRng, SeedableRng};

    fn network(structure: &[usize], learning_rate: f64) -> NeuralNetwork {
        let mut rng = StdRng::seed_from_u64(5);
        NeuralNetwork::new(structure, learning_rate, &mut rng).unwrap()
    }

    #[test]
    fn learned_sample_needs_no_further_iterations() {
        let mut net = network(&[2, 3, 2], 0.5);
        let mut sample = Sample::new(&[1.0, 0.0], 2, SampleClass::Class(1));

        let first = train_sample(&mut net, &mut sample, false).unwrap();
        assert!(first < MAX_ITERATIONS);
        assert!(sample.is_correct());
        assert!(sample.estimated_error() < ERROR_THRESHOLD);

        let weights = net.weights();
        assert_eq!(train_sample(&mut net, &mut sample, false).unwrap(), 0);
        assert_eq!(net.weights(), weights);
    }

    #[test]
    fn frozen_network_diverges() {
        // With a zero learning rate nothing moves. Initial weights are negative,
        // so both outputs stay below 0.5 and the squared error above 0.25.
        let mut net = network(&[2, 2], 0.0);
        let mut sample = Sample::new(&[1.0, 1.0], 2, SampleClass::Class(0));

        assert_eq!(
            train_sample(&mut net, &mut sample, false),
            Err(NetworkError::TrainingDivergence { iterations: MAX_ITERATIONS })
        );
    }

    #[test]
    fn dimension_errors_surface_immediately() {
        let mut net = network(&[3, 2], 0.25);
        let mut sample = Sample::new(&[1.0], 2, SampleClass::Class(0));
        assert!(matches!(
            train_sample(&mut net, &mut sample, false),
            Err(NetworkError::DimensionMismatch { .. })
        ));
    }
}
