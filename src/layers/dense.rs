use std::io::Write;

use rand::Rng;

use crate::activation::sigmoid::{sigmoid, sigmoid_derivative};
use crate::error::{NnError, Result};
use crate::math::matrix::{random_weight, Matrix};

/// A fully connected sigmoid layer.
///
/// `weights` holds one row per node, each row as wide as the layer's input.
/// `output` and `error` are empty until the first `feedforward` and
/// `backpropagate_*` call respectively.
#[derive(Debug, Clone, Default)]
pub struct Layer{
    weights: Matrix,
    biases: Vec<f64>,
    output: Vec<f64>,
    error: Vec<f64>,
}

impl Layer {
    /// Creates a layer with `size` nodes fed by `input_size` inputs.
    pub fn new<R: Rng + ?Sized>(size: usize, input_size: usize, rng: &mut R) -> Layer {
        let mut layer = Layer::default();
        layer.resize(size, input_size, rng);
        layer
    }

    /// Builds a layer from explicit parameters. Fails on ragged rows or when
    /// the bias count differs from the row count.
    pub fn with_parameters(weights: Vec<Vec<f64>>, biases: Vec<f64>) -> Result<Layer> {
        let weights = Matrix::from_data(weights)?;
        NnError::check_len("biases", weights.rows, biases.len())?;

        Ok(Layer {
            weights,
            biases,
            output: Vec::new(),
            error: Vec::new(),
        })
    }

    /// Reallocates the layer to `size` nodes of `input_size` weights each and
    /// randomizes every weight and bias. Previous output and error are dropped.
    pub fn resize<R: Rng + ?Sized>(&mut self, size: usize, input_size: usize, rng: &mut R) {
        self.weights = Matrix::random(size, input_size, rng);
        self.biases = (0..size).map(|_| random_weight(rng)).collect();
        self.output.clear();
        self.error.clear();
    }

    pub fn clear(&mut self) {
        self.weights = Matrix::default();
        self.biases.clear();
        self.output.clear();
        self.error.clear();
    }

    pub fn num_nodes(&self) -> usize {
        self.weights.rows
    }

    /// Number of weights per node, which is the width of the input.
    pub fn num_weights(&self) -> usize {
        self.weights.cols
    }

    pub fn weights(&self) -> &[Vec<f64>] {
        &self.weights.data
    }

    pub fn biases(&self) -> &[f64] {
        &self.biases
    }

    pub fn output(&self) -> &[f64] {
        &self.output
    }

    pub fn error(&self) -> &[f64] {
        &self.error
    }

    /// Computes `sigmoid(w · input + b)` for every node and stores it as the output.
    pub fn feedforward(&mut self, input: &[f64]) -> Result<&[f64]> {
        NnError::check_len("layer input", self.num_weights(), input.len())?;

        self.output = self.weights.data.iter()
            .zip(&self.biases)
            .map(|(row, bias)| {
                let sum: f64 = row.iter().zip(input).map(|(w, x)| w * x).sum();
                sigmoid(sum + bias)
            })
            .collect();

        Ok(&self.output)
    }

    /// Output-layer error: `(reference - output) * output * (1 - output)`.
    pub fn backpropagate_output(&mut self, reference: &[f64]) -> Result<()> {
        NnError::check_len("reference", self.num_nodes(), reference.len())?;
        NnError::check_len("layer output", self.num_nodes(), self.output.len())?;

        self.error = reference.iter()
            .zip(&self.output)
            .map(|(target, y)| (target - y) * sigmoid_derivative(*y))
            .collect();

        Ok(())
    }

    /// Hidden-layer error: the downstream error pushed back through the
    /// downstream weights, scaled by this layer's activation derivative.
    pub fn backpropagate_hidden(&mut self, next_layer: &Layer) -> Result<()> {
        NnError::check_len("downstream weight row", self.num_nodes(), next_layer.num_weights())?;
        NnError::check_len("downstream error", next_layer.num_nodes(), next_layer.error.len())?;
        NnError::check_len("layer output", self.num_nodes(), self.output.len())?;

        self.error = self.output.iter()
            .enumerate()
            .map(|(i, y)| {
                let upstream: f64 = next_layer.error.iter()
                    .zip(next_layer.weights.column(i))
                    .map(|(e, w)| e * w)
                    .sum();
                upstream * sigmoid_derivative(*y)
            })
            .collect();

        Ok(())
    }

    /// Moves every weight by `learning_rate * error[i] * input[j]` and every
    /// bias by `learning_rate * error[i]`. `input` must be the vector that fed
    /// the matching `feedforward` call.
    pub fn optimize(&mut self, input: &[f64], learning_rate: f64) -> Result<()> {
        NnError::check_len("optimizer input", self.num_weights(), input.len())?;
        NnError::check_len("layer error", self.num_nodes(), self.error.len())?;

        for ((row, bias), delta) in self.weights.data.iter_mut()
            .zip(self.biases.iter_mut())
            .zip(&self.error)
        {
            for (w, x) in row.iter_mut().zip(input) {
                *w += learning_rate * delta * x;
            }
            *bias += learning_rate * delta;
        }

        Ok(())
    }

    /// Writes `values` separated by spaces with `precision` decimals, then a newline.
    pub fn print<W: Write + ?Sized>(values: &[f64], sink: &mut W, precision: usize) -> Result<()> {
        let line = values.iter()
            .map(|v| format!("{v:.precision$}"))
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(sink, "{line}")?;
        Ok(())
    }
}
