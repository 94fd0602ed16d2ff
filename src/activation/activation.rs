use serde::{Serialize, Deserialize};

/// Activation bound to every non-input node of a network.
///
/// The logistic sigmoid is the only function the backward pass knows how to
/// differentiate, so it is the only variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ActivationFunction {
    #[default]
    Sigmoid,
}

impl ActivationFunction {
    /// Element-wise activation.
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => 1.0 / (1.0 + (-x).exp()),
        }
    }

    /// Derivative expressed through the node's *output* `y = f(x)`.
    ///
    /// Nodes only keep their activated value, so the backward pass scales
    /// errors with `y * (1 - y)` instead of re-evaluating `f` at the sum.
    pub fn derivative_from_output(&self, y: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => y * (1.0 - y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn sigmoid_is_centered_at_half() {
        let f = ActivationFunction::Sigmoid;
        assert_relative_eq!(f.function(0.0), 0.5);
        assert!(f.function(10.0) > 0.99);
        assert!(f.function(-10.0) < 0.01);
    }

    #[test]
    fn derivative_peaks_at_half() {
        let f = ActivationFunction::Sigmoid;
        assert_relative_eq!(f.derivative_from_output(0.5), 0.25);
        assert_relative_eq!(f.derivative_from_output(1.0), 0.0);
    }
}
