use thiserror::Error;

/// Errors raised by network construction, evaluation and training.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NetworkError {
    /// The layer-size descriptor (or learning rate) cannot describe a network.
    #[error("invalid network structure: {0}")]
    InvalidStructure(String),

    /// A vector or class index does not fit the network it was given to.
    #[error("dimension mismatch in {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Single-sample training ran out of iterations before converging.
    #[error("sample is too hard to train: no convergence after {iterations} iterations")]
    TrainingDivergence { iterations: usize },
}

pub type Result<T> = std::result::Result<T, NetworkError>;
