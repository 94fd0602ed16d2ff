use std::sync::mpsc;
use std::thread;

use figure_nn::{EpochStats, NeuralNetwork, Sample, SampleClass, SamplesSet, TrainConfig, train_loop};
use rand::{rngs::StdRng, SeedableRng};

fn main() {
    let mut rng = StdRng::seed_from_u64(17);
    let mut network = NeuralNetwork::new(&[2, 2, 1], 0.25, &mut rng)
        .expect("valid structure");

    let table = [
        ([0.0, 0.0], 0),
        ([0.0, 1.0], 1),
        ([1.0, 0.0], 1),
        ([1.0, 1.0], 0),
    ];
    let mut samples: SamplesSet = table.iter()
        .map(|(input, class)| Sample::binary(input, SampleClass::Class(*class)))
        .collect();

    let (tx, rx) = mpsc::channel::<EpochStats>();
    let printer = thread::spawn(move || {
        for stats in rx {
            if stats.epoch % 500 == 0 {
                println!("Epoch {}: guess level = {:.2}, mean error = {:.4}",
                    stats.epoch, stats.guess_level, stats.mean_error);
            }
        }
    });

    let mut config = TrainConfig::new(5000, 0.9);
    config.progress_tx = Some(tx);
    let result = train_loop(&mut network, &mut samples, &config);
    drop(config);
    printer.join().expect("printer thread panicked");

    match result {
        Ok(guess_level) => println!("Stopped with guess level {guess_level:.2}"),
        Err(e) => println!("Training aborted: {e}"),
    }

    for sample in samples.iter_mut() {
        let class = network.predict(sample).expect("dimensions match");
        println!("Input: {:?} -> Output: {:.4} ({class})", sample.input(), sample.output().map_or(f64::NAN, |o| o[0]));
    }
    println!("Accuracy: {:.2}", samples.accuracy());
}
