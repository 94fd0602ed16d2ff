/// Recognizes tiny 3×3 figures: horizontal bar, vertical bar and diagonal.
///
/// Run with:
///   cargo run --example figures
use figure_nn::{NeuralNetwork, Sample, SampleClass, SamplesSet};
use rand::{rngs::StdRng, Rng, SeedableRng};

const CLASSES: usize = 3;

/// Draws one noisy figure of class `class` at a random position.
fn draw(class: usize, rng: &mut StdRng) -> Vec<f64> {
    let mut grid = vec![0.0; 9];
    let k = rng.gen_range(0..3);
    for i in 0..3 {
        let cell = match class {
            0 => k * 3 + i,      // row k
            1 => i * 3 + k,      // column k
            _ => i * 3 + i,      // main diagonal
        };
        grid[cell] = 1.0;
    }
    for v in grid.iter_mut() {
        *v += rng.gen_range(-0.1..0.1);
    }
    grid
}

fn generate(count: usize, rng: &mut StdRng) -> SamplesSet {
    (0..count)
        .map(|i| {
            let class = i % CLASSES;
            Sample::new(&draw(class, rng), CLASSES, SampleClass::Class(class))
        })
        .collect()
}

fn main() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut network = NeuralNetwork::new(&[9, 12, CLASSES], 0.5, &mut rng)
        .expect("valid structure");

    let mut train_set = generate(60, &mut rng);
    let mut test_set = generate(30, &mut rng);

    match network.train_on_data_set(&mut train_set, 200, 0.95, true) {
        Ok(guess_level) => println!("Guess level: {guess_level:.2}"),
        Err(e) => {
            println!("Training aborted: {e}");
            return;
        }
    }

    let accuracy = network.test_on_data_set(&mut test_set).expect("dimensions match");
    println!("Test accuracy: {accuracy:.2}");

    let mut unknown = Sample::new(&draw(2, &mut rng), CLASSES, SampleClass::Undefined);
    let class = network.predict(&mut unknown).expect("dimensions match");
    println!("Unlabeled diagonal recognized as {class}");
}
