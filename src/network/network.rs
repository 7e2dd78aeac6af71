use std::io::Write;

use log::warn;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::{
    error::{NnError, Result},
    layers::dense::Layer,
    loss::mse::MseLoss,
    network::config::NetworkConfig,
    optim::sgd::Sgd,
    train::{loop_fn::train_loop, train_config::TrainConfig},
};

/// Decimal precision used by the diagnostic printers when none is given.
pub const DEFAULT_PRECISION: usize = 1;

const RULE: &str = "--------------------------------------------------------------------------------";

/// A feedforward network with one hidden layer and one output layer,
/// trained by online backpropagation over a stored training set.
#[derive(Debug, Clone)]
pub struct Network {
    hidden_layer: Layer,
    output_layer: Layer,
    training_inputs: Vec<Vec<f64>>,
    training_targets: Vec<Vec<f64>>,
    training_order: Vec<usize>,
    rng: StdRng,
}

impl Default for Network {
    fn default() -> Self {
        Network {
            hidden_layer: Layer::default(),
            output_layer: Layer::default(),
            training_inputs: Vec::new(),
            training_targets: Vec::new(),
            training_order: Vec::new(),
            rng: StdRng::from_entropy(),
        }
    }
}

impl Network {
    /// Builds a randomly initialized network seeded from OS entropy.
    pub fn new(num_inputs: usize, num_hidden_nodes: usize, num_outputs: usize) -> Network {
        let mut network = Network::default();
        network.init(num_inputs, num_hidden_nodes, num_outputs);
        network
    }

    /// Same as `new`, but every random draw (weights and shuffles) follows `seed`.
    pub fn with_seed(
        num_inputs: usize,
        num_hidden_nodes: usize,
        num_outputs: usize,
        seed: u64,
    ) -> Network {
        let mut network = Network {
            rng: StdRng::seed_from_u64(seed),
            ..Network::default()
        };
        network.init(num_inputs, num_hidden_nodes, num_outputs);
        network
    }

    pub fn from_config(config: &NetworkConfig) -> Network {
        match config.seed {
            Some(seed) => Network::with_seed(
                config.num_inputs,
                config.num_hidden_nodes,
                config.num_outputs,
                seed,
            ),
            None => Network::new(config.num_inputs, config.num_hidden_nodes, config.num_outputs),
        }
    }

    /// Resizes both layers. The output layer is always as wide as the hidden layer.
    pub fn init(&mut self, num_inputs: usize, num_hidden_nodes: usize, num_outputs: usize) {
        self.hidden_layer.resize(num_hidden_nodes, num_inputs, &mut self.rng);
        self.output_layer.resize(num_outputs, num_hidden_nodes, &mut self.rng);
    }

    /// Empties both layers together with the stored training set.
    pub fn clear(&mut self) {
        self.hidden_layer.clear();
        self.output_layer.clear();
        self.training_inputs.clear();
        self.training_targets.clear();
        self.training_order.clear();
    }

    pub fn hidden_layer(&self) -> &Layer {
        &self.hidden_layer
    }

    pub fn output_layer(&self) -> &Layer {
        &self.output_layer
    }

    pub fn training_inputs(&self) -> &[Vec<f64>] {
        &self.training_inputs
    }

    pub fn training_targets(&self) -> &[Vec<f64>] {
        &self.training_targets
    }

    /// The order in which the last epoch visited the training set.
    pub fn training_order(&self) -> &[usize] {
        &self.training_order
    }

    pub fn num_inputs(&self) -> usize {
        self.hidden_layer.num_weights()
    }

    pub fn num_hidden_nodes(&self) -> usize {
        self.hidden_layer.num_nodes()
    }

    pub fn num_outputs(&self) -> usize {
        self.output_layer.num_nodes()
    }

    pub fn num_training_sets(&self) -> usize {
        self.training_order.len()
    }

    /// Output of the most recent feedforward pass.
    pub fn output(&self) -> &[f64] {
        self.output_layer.output()
    }

    /// Replaces the training set with copies of `inputs` and `targets`.
    ///
    /// If the collections differ in length the longer one is truncated to the
    /// shorter; the number of dropped samples is returned. Every kept sample
    /// must match the network's input and output widths, otherwise nothing is
    /// stored and the previous training set stays in place.
    pub fn set_training_data(
        &mut self,
        inputs: &[Vec<f64>],
        targets: &[Vec<f64>],
    ) -> Result<usize> {
        let kept = inputs.len().min(targets.len());
        let dropped = inputs.len().max(targets.len()) - kept;

        for (input, target) in inputs[..kept].iter().zip(&targets[..kept]) {
            NnError::check_len("training input", self.num_inputs(), input.len())?;
            NnError::check_len("training target", self.num_outputs(), target.len())?;
        }

        if dropped > 0 {
            warn!(
                "training data mismatch ({} inputs, {} targets): dropped {} samples",
                inputs.len(),
                targets.len(),
                dropped
            );
        }

        self.training_inputs = inputs[..kept].to_vec();
        self.training_targets = targets[..kept].to_vec();
        self.training_order = (0..kept).collect();

        Ok(dropped)
    }

    /// Trains for `num_epochs` epochs at `learning_rate`.
    pub fn train(&mut self, num_epochs: usize, learning_rate: f64) -> Result<()> {
        self.train_with(&TrainConfig::new(num_epochs, learning_rate))?;
        Ok(())
    }

    /// Trains according to `config` and returns the mean loss of the last
    /// completed epoch.
    pub fn train_with(&mut self, config: &TrainConfig) -> Result<f64> {
        train_loop(self, config)
    }

    /// Reshuffles the training order and runs one training step per sample.
    /// Returns the mean squared error observed over the epoch.
    pub(crate) fn train_epoch(&mut self, optimizer: &Sgd) -> Result<f64> {
        let Network {
            hidden_layer,
            output_layer,
            training_inputs,
            training_targets,
            training_order,
            rng,
        } = self;

        if training_order.is_empty() {
            return Ok(0.0);
        }

        training_order.shuffle(rng);

        let mut total_loss = 0.0;
        for &index in training_order.iter() {
            let input = &training_inputs[index];
            let target = &training_targets[index];

            let hidden_output = hidden_layer.feedforward(input)?;
            output_layer.feedforward(hidden_output)?;
            total_loss += MseLoss::loss(output_layer.output(), target);

            // Both error signals are taken from the untouched weights before
            // either layer is updated.
            output_layer.backpropagate_output(target)?;
            hidden_layer.backpropagate_hidden(output_layer)?;

            optimizer.step(output_layer, hidden_layer.output())?;
            optimizer.step(hidden_layer, input)?;
        }

        Ok(total_loss / training_order.len() as f64)
    }

    /// Runs one feedforward pass and returns the output layer's output.
    pub fn predict(&mut self, input: &[f64]) -> Result<&[f64]> {
        let hidden_output = self.hidden_layer.feedforward(input)?;
        self.output_layer.feedforward(hidden_output)
    }

    /// Predicts every input and writes the input/output pairs to `sink`.
    /// Writes nothing when `inputs` is empty.
    pub fn print<W: Write + ?Sized>(
        &mut self,
        inputs: &[Vec<f64>],
        precision: usize,
        sink: &mut W,
    ) -> Result<()> {
        if inputs.is_empty() {
            return Ok(());
        }

        writeln!(sink, "{RULE}")?;
        for (i, input) in inputs.iter().enumerate() {
            write!(sink, "Input:\t")?;
            Layer::print(input, sink, precision)?;

            write!(sink, "Output:\t")?;
            let output = self.predict(input)?;
            Layer::print(output, sink, precision)?;

            if i + 1 < inputs.len() {
                writeln!(sink)?;
            }
        }
        writeln!(sink, "{RULE}\n")?;

        Ok(())
    }

    /// `print` over the stored training inputs.
    pub fn print_training_set<W: Write + ?Sized>(&mut self, precision: usize, sink: &mut W) -> Result<()> {
        let inputs = self.training_inputs.clone();
        self.print(&inputs, precision, sink)
    }
}
