use std::process::ExitCode;

use figure_nn::{NetworkConfig, NeuralNetwork, Sample, SampleClass, SamplesSet};

// Trains the XOR table on a network described by an optional JSON config:
//   cargo run -- network.json
// Without an argument a [2, 2, 1] network is used.
fn main() -> ExitCode {
    let config = match std::env::args().nth(1) {
        Some(path) => match NetworkConfig::load_json(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Cannot read config '{path}': {e}");
                return ExitCode::FAILURE;
            }
        },
        None => NetworkConfig::default(),
    };

    let mut network = match NeuralNetwork::from_config(&config) {
        Ok(network) => network,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let output_size = config.structure.last().copied().unwrap_or(0);
    let mut samples: SamplesSet = [([0.0, 0.0], 0), ([0.0, 1.0], 1), ([1.0, 0.0], 1), ([1.0, 1.0], 0)]
        .iter()
        .map(|(input, class)| {
            if output_size == 1 {
                Sample::binary(input, SampleClass::Class(*class))
            } else {
                Sample::new(input, output_size, SampleClass::Class(*class))
            }
        })
        .collect();

    match network.train_on_data_set(&mut samples, 5000, 0.9, config.parallel) {
        Ok(guess_level) => println!("Guess level after training: {guess_level:.3}"),
        Err(e) => {
            eprintln!("Training aborted: {e}");
            return ExitCode::FAILURE;
        }
    }

    match network.test_on_data_set(&mut samples) {
        Ok(accuracy) => println!("Accuracy: {accuracy:.3}"),
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    }
    for sample in &samples {
        print!("{sample}");
    }
    ExitCode::SUCCESS
}
