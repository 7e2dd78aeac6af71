use crate::{error::{NnError, Result}, layers::dense::Layer};

/// Plain online gradient descent with a fixed learning rate.
#[derive(Debug, Clone, Copy)]
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    /// Fails on a NaN or infinite learning rate.
    pub fn new(learning_rate: f64) -> Result<Sgd> {
        if !learning_rate.is_finite() {
            return Err(NnError::InvalidLearningRate(learning_rate));
        }
        Ok(Sgd { learning_rate })
    }

    /// Applies one update to `layer` using the input it saw on the matching
    /// feedforward call and the error from its last backpropagation. The rate
    /// was validated once in `new`, so no per-update check happens here.
    pub fn step(&self, layer: &mut Layer, input: &[f64]) -> Result<()> {
        layer.optimize(input, self.learning_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_finite_learning_rate() {
        assert!(matches!(Sgd::new(f64::NAN), Err(NnError::InvalidLearningRate(_))));
        assert!(matches!(Sgd::new(f64::INFINITY), Err(NnError::InvalidLearningRate(_))));
    }

    #[test]
    fn step_updates_layer_parameters() {
        let mut layer = Layer::with_parameters(vec![vec![0.0, 0.0]], vec![0.0]).unwrap();
        let input = [1.0, 0.0];
        layer.feedforward(&input).unwrap();
        layer.backpropagate_output(&[1.0]).unwrap();

        Sgd::new(1.0).unwrap().step(&mut layer, &input).unwrap();

        assert!(layer.weights()[0][0] > 0.0);
        assert_eq!(layer.weights()[0][1], 0.0);
        assert!(layer.biases()[0] > 0.0);
    }
}
