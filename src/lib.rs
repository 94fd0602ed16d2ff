pub mod activation;
pub mod error;
pub mod graph;
pub mod network;
pub mod sample;
pub mod train;

// Convenience re-exports
pub use activation::ActivationFunction;
pub use error::{NetworkError, Result};
pub use graph::NodeGraph;
pub use network::{NeuralNetwork, NetworkConfig};
pub use sample::{OutputEncoding, Sample, SampleClass, SamplesSet};
pub use train::{EpochStats, TrainConfig, train_loop, test_loop};
