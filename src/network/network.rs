use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::info;

use crate::activation::ActivationFunction;
use crate::error::{NetworkError, Result};
use crate::graph::NodeGraph;
use crate::network::config::NetworkConfig;
use crate::sample::{Sample, SampleClass, SamplesSet};
use crate::train::{self, TrainConfig};

/// Learning rate used when none is configured.
pub const DEFAULT_LEARNING_RATE: f64 = 0.25;

/// Fully connected sigmoid network trained online, one sample at a time.
#[derive(Debug, Clone)]
pub struct NeuralNetwork {
    graph: NodeGraph,
    learning_rate: f64,
    parallel: bool,
}

fn check_learning_rate(learning_rate: f64) -> Result<()> {
    if !learning_rate.is_finite() {
        return Err(NetworkError::InvalidStructure(format!(
            "learning rate must be finite, got {learning_rate}"
        )));
    }
    Ok(())
}

impl NeuralNetwork {
    /// Builds a network from layer sizes (input first, output last). Every
    /// link weight is drawn from `rng`.
    pub fn new<R: Rng + ?Sized>(structure: &[usize], learning_rate: f64, rng: &mut R) -> Result<NeuralNetwork> {
        check_learning_rate(learning_rate)?;
        let graph = NodeGraph::build(structure, ActivationFunction::Sigmoid, rng)?;
        info!(?structure, learning_rate, links = graph.links().len(), "network initialized");
        Ok(NeuralNetwork { graph, learning_rate, parallel: false })
    }

    /// Builds a network from a configuration. Without a seed the weights come
    /// from an entropy-seeded generator.
    pub fn from_config(config: &NetworkConfig) -> Result<NeuralNetwork> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut network = NeuralNetwork::new(&config.structure, config.learning_rate, &mut rng)?;
        network.parallel = config.parallel;
        Ok(network)
    }

    /// Discards the whole graph and builds a fresh one. On error the current
    /// graph is left untouched.
    pub fn reinit<R: Rng + ?Sized>(&mut self, structure: &[usize], learning_rate: f64, rng: &mut R) -> Result<()> {
        let parallel = self.parallel;
        *self = NeuralNetwork::new(structure, learning_rate, rng)?;
        self.parallel = parallel;
        Ok(())
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn layer_sizes(&self) -> Vec<usize> {
        self.graph.layer_sizes()
    }

    /// Evaluation mode used by `predict` and `test_on_data_set`.
    pub fn parallel(&self) -> bool {
        self.parallel
    }

    pub fn set_parallel(&mut self, parallel: bool) {
        self.parallel = parallel;
    }

    pub fn graph(&self) -> &NodeGraph {
        &self.graph
    }

    /// Every link weight, layer by layer with source nodes major.
    pub fn weights(&self) -> Vec<f64> {
        self.graph.links().iter().map(|link| link.weight).collect()
    }

    /// Overwrites every link weight, in the order returned by `weights`.
    pub fn set_weights(&mut self, weights: &[f64]) -> Result<()> {
        let links = self.graph.links_mut();
        if weights.len() != links.len() {
            return Err(NetworkError::DimensionMismatch {
                what: "weights",
                expected: links.len(),
                actual: weights.len(),
            });
        }
        for (link, &weight) in links.iter_mut().zip(weights) {
            link.weight = weight;
        }
        Ok(())
    }

    /// Output layer activations from the last evaluation.
    pub fn get_output(&self) -> Vec<f64> {
        self.graph.output()
    }

    /// Forward pass: evaluates the graph on `sample.input()` and lets the
    /// sample derive its error vector and recognized class.
    pub fn run(&mut self, sample: &mut Sample, parallel: bool) -> Result<()> {
        self.check_dimensions(sample)?;
        self.graph.forward(sample.input(), parallel);
        sample.process_output(self.graph.output());
        Ok(())
    }

    fn check_dimensions(&self, sample: &Sample) -> Result<()> {
        let input_size = self.graph.input_size();
        if sample.input().len() != input_size {
            return Err(NetworkError::DimensionMismatch {
                what: "input",
                expected: input_size,
                actual: sample.input().len(),
            });
        }
        let output_size = self.graph.output_size();
        if sample.output_width() != output_size {
            return Err(NetworkError::DimensionMismatch {
                what: "output",
                expected: output_size,
                actual: sample.output_width(),
            });
        }
        if let Some(class) = sample.actual_class().index() {
            if class >= sample.classes_count() {
                return Err(NetworkError::DimensionMismatch {
                    what: "class index",
                    expected: sample.classes_count(),
                    actual: class,
                });
            }
        }
        Ok(())
    }

    /// Backward pass for a sample just evaluated by `run` on this network.
    ///
    /// Fails with `DimensionMismatch` if the sample carries no error vector
    /// or one that does not cover the output layer.
    pub fn update_weights(&mut self, sample: &Sample) -> Result<()> {
        let output_size = self.graph.output_size();
        let error = sample.error().ok_or(NetworkError::DimensionMismatch {
            what: "error",
            expected: output_size,
            actual: 0,
        })?;
        if error.len() != output_size {
            return Err(NetworkError::DimensionMismatch {
                what: "error",
                expected: output_size,
                actual: error.len(),
            });
        }
        self.graph.backward(error, self.learning_rate);
        Ok(())
    }

    /// Trains on one sample until it is recognized with low error. Returns the
    /// iteration at which that happened; 0 means no weight was touched.
    pub fn train(&mut self, sample: &mut Sample, parallel: bool) -> Result<usize> {
        train::train_sample(self, sample, parallel)
    }

    /// Epoch training over `samples`. Returns the guess level of the last
    /// epoch: the share of samples that needed no training in it.
    pub fn train_on_data_set(
        &mut self,
        samples: &mut SamplesSet,
        epochs: usize,
        acceptable_error: f64,
        parallel: bool,
    ) -> Result<f64> {
        let mut config = TrainConfig::new(epochs, acceptable_error);
        config.parallel = parallel;
        train::train_loop(self, samples, &config)
    }

    pub fn predict(&mut self, sample: &mut Sample) -> Result<SampleClass> {
        let parallel = self.parallel;
        self.run(sample, parallel)?;
        Ok(sample.recognized_class())
    }

    /// Recognizes every sample and returns the share recognized correctly.
    pub fn test_on_data_set(&mut self, samples: &mut SamplesSet) -> Result<f64> {
        train::test_loop(self, samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn seeded(structure: &[usize], learning_rate: f64) -> NeuralNetwork {
        let mut rng = StdRng::seed_from_u64(1234);
        NeuralNetwork::new(structure, learning_rate, &mut rng).unwrap()
    }

    #[test]
    fn rejects_bad_structure_and_learning_rate() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            NeuralNetwork::new(&[4], 0.25, &mut rng),
            Err(NetworkError::InvalidStructure(_))
        ));
        assert!(matches!(
            NeuralNetwork::new(&[4, 0, 2], 0.25, &mut rng),
            Err(NetworkError::InvalidStructure(_))
        ));
        assert!(matches!(
            NeuralNetwork::new(&[4, 2], f64::NAN, &mut rng),
            Err(NetworkError::InvalidStructure(_))
        ));
    }

    #[test]
    fn forward_pass_matches_hand_computation() {
        let mut network = seeded(&[2, 1], 0.25);
        network.set_weights(&[0.5, -1.5]).unwrap();

        let mut sample = Sample::new(&[2.0, 1.0], 1, SampleClass::Class(0));
        network.run(&mut sample, false).unwrap();

        let expected = 1.0 / (1.0 + (-(2.0 * 0.5 + 1.0 * -1.5f64)).exp());
        assert_relative_eq!(network.get_output()[0], expected, epsilon = 1e-12);
        assert_relative_eq!(sample.output().unwrap()[0], expected, epsilon = 1e-12);
        assert_relative_eq!(sample.error().unwrap()[0], 1.0 - expected, epsilon = 1e-12);
    }

    #[test]
    fn single_output_weight_moves_toward_target() {
        let mut network = seeded(&[1, 1], 0.5);
        let before = network.weights()[0];

        let mut sample = Sample::new(&[1.0], 1, SampleClass::Class(0));
        network.run(&mut sample, false).unwrap();
        assert!(sample.error().unwrap()[0] > 0.0);
        network.update_weights(&sample).unwrap();

        assert!(network.weights()[0] > before);
    }

    #[test]
    fn delta_rule_uses_derivative_scaled_error() {
        let mut network = seeded(&[1, 1, 1], 1.0);
        network.set_weights(&[0.0, 2.0]).unwrap();

        let mut sample = Sample::new(&[3.0], 1, SampleClass::Class(0));
        network.run(&mut sample, false).unwrap();

        // Hidden node: sigmoid(0) = 0.5. Output: sigmoid(1.0).
        let hidden = 0.5;
        let out = 1.0 / (1.0 + (-1.0f64).exp());
        let out_delta = (1.0 - out) * out * (1.0 - out);
        let hidden_delta = out_delta * 2.0 * hidden * (1.0 - hidden);

        network.update_weights(&sample).unwrap();
        let weights = network.weights();
        assert_relative_eq!(weights[1], 2.0 + out_delta * hidden, epsilon = 1e-12);
        assert_relative_eq!(weights[0], hidden_delta * 3.0, epsilon = 1e-12);
    }

    #[test]
    fn rejects_mismatched_dimensions() {
        let mut network = seeded(&[3, 2], 0.25);

        let mut short = Sample::new(&[1.0, 2.0], 2, SampleClass::Class(0));
        assert_eq!(
            network.run(&mut short, false),
            Err(NetworkError::DimensionMismatch { what: "input", expected: 3, actual: 2 })
        );

        let mut wide = Sample::new(&[1.0, 2.0, 3.0], 3, SampleClass::Class(0));
        assert_eq!(
            network.predict(&mut wide),
            Err(NetworkError::DimensionMismatch { what: "output", expected: 2, actual: 3 })
        );

        let mut stray = Sample::new(&[1.0, 2.0, 3.0], 2, SampleClass::Class(5));
        assert!(matches!(
            network.run(&mut stray, false),
            Err(NetworkError::DimensionMismatch { what: "class index", .. })
        ));
        assert!(stray.output().is_none());
    }

    #[test]
    fn update_weights_rejects_missing_or_foreign_error() {
        let mut wide = seeded(&[2, 3], 0.25);
        let mut evaluated = Sample::new(&[0.4, 0.8], 3, SampleClass::Class(2));
        wide.run(&mut evaluated, false).unwrap();

        let mut network = seeded(&[2, 2], 0.25);
        let weights = network.weights();
        assert_eq!(
            network.update_weights(&evaluated),
            Err(NetworkError::DimensionMismatch { what: "error", expected: 2, actual: 3 })
        );
        assert_eq!(network.weights(), weights);

        let fresh = Sample::new(&[0.4, 0.8], 2, SampleClass::Class(1));
        assert_eq!(
            network.update_weights(&fresh),
            Err(NetworkError::DimensionMismatch { what: "error", expected: 2, actual: 0 })
        );
        assert_eq!(network.weights(), weights);
    }

    #[test]
    fn set_weights_checks_length() {
        let mut network = seeded(&[2, 2], 0.25);
        assert!(network.set_weights(&[0.1; 3]).is_err());
        assert!(network.set_weights(&[0.1; 4]).is_ok());
    }

    #[test]
    fn reinit_replaces_the_graph() {
        let mut network = seeded(&[2, 2], 0.25);
        network.set_parallel(true);

        let mut rng = StdRng::seed_from_u64(9);
        network.reinit(&[3, 4, 5], 0.1, &mut rng).unwrap();
        assert_eq!(network.layer_sizes(), vec![3, 4, 5]);
        assert_eq!(network.weights().len(), 3 * 4 + 4 * 5);
        assert_relative_eq!(network.learning_rate(), 0.1);
        assert!(network.parallel());

        assert!(network.reinit(&[3], 0.1, &mut rng).is_err());
        assert_eq!(network.layer_sizes(), vec![3, 4, 5]);
    }

    #[test]
    fn from_config_is_reproducible_with_seed() {
        let config = NetworkConfig {
            structure: vec![4, 3, 2],
            learning_rate: 0.3,
            parallel: true,
            seed: Some(77),
        };
        let a = NeuralNetwork::from_config(&config).unwrap();
        let b = NeuralNetwork::from_config(&config).unwrap();
        assert_eq!(a.weights(), b.weights());
        assert!(a.parallel());
        assert_relative_eq!(a.learning_rate(), 0.3);
    }
}
