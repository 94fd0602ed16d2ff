use serde::{Serialize, Deserialize};

use crate::network::network::DEFAULT_LEARNING_RATE;

fn default_learning_rate() -> f64 {
    DEFAULT_LEARNING_RATE
}

/// Serializable description of a network: layer sizes plus the knobs used to
/// build and evaluate it. Trained weights are not part of it.
///
/// ```json
/// { "structure": [2, 2, 1], "learning_rate": 0.25, "parallel": false, "seed": 42 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Layer sizes, input layer first and output layer last.
    pub structure: Vec<usize>,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    /// Evaluate nodes of a layer concurrently during inference.
    #[serde(default)]
    pub parallel: bool,
    /// Seed for weight initialization; `None` draws one from the OS.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl NetworkConfig {
    pub fn new(structure: Vec<usize>) -> NetworkConfig {
        NetworkConfig {
            structure,
            learning_rate: DEFAULT_LEARNING_RATE,
            parallel: false,
            seed: None,
        }
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }

    /// Deserializes a config from a JSON file.
    pub fn load_json(path: &str) -> std::io::Result<NetworkConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        NetworkConfig::new(vec![2, 2, 1])
    }
}
