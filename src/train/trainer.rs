use log::debug;

use crate::{
    data::iris::Dataset,
    loss::mse::MseLoss,
    math::matrix::Matrix,
    network::network::Network,
    optim::{sgd::GradientDescent, update_rule::UpdateRule},
    train::train_config::TrainConfig,
};

/// Full-batch backpropagation over one owned network and dataset.
///
/// Every epoch runs a forward and backward pass over all samples, sums the
/// per-sample gradients, then asks the update rule for one weight delta per
/// layer. Biases always take a plain gradient step. Without an attached rule
/// the weights take a plain gradient step too.
pub struct Trainer<U = GradientDescent> {
    network: Network,
    dataset: Dataset,
    learning_rate: f64,
    epochs: usize,
    log_every: usize,
    rule: U,
}

impl Trainer<GradientDescent> {
    pub fn new(network: Network, dataset: Dataset, learning_rate: f64, epochs: usize) -> Self {
        Trainer {
            network,
            dataset,
            learning_rate,
            epochs,
            log_every: TrainConfig::DEFAULT_LOG_EVERY,
            rule: GradientDescent,
        }
    }
}

impl<U: UpdateRule> Trainer<U> {
    /// Replaces the weight update rule.
    pub fn with_update_rule<R: UpdateRule>(self, rule: R) -> Trainer<R> {
        Trainer {
            network: self.network,
            dataset: self.dataset,
            learning_rate: self.learning_rate,
            epochs: self.epochs,
            log_every: self.log_every,
            rule,
        }
    }

    /// Records MSE on every `every`-th epoch (at least every epoch).
    pub fn log_every(mut self, every: usize) -> Self {
        self.log_every = every.max(1);
        self
    }

    /// Runs all epochs and returns the MSE recorded at each checkpoint.
    ///
    /// # Panics
    /// Panics if the dataset is empty.
    pub fn train(&mut self) -> Vec<f64> {
        assert!(!self.dataset.is_empty(), "cannot train on an empty dataset");

        let mut trace = Vec::with_capacity(self.epochs / self.log_every + 1);
        for epoch in 0..self.epochs {
            let mse = self.run_epoch(epoch);
            if epoch % self.log_every == 0 {
                debug!("epoch {epoch}: mse = {mse:.6}");
                trace.push(mse);
            }
        }
        trace
    }

    /// Classification accuracy of the current network on the training data.
    pub fn accuracy(&mut self) -> f64 {
        self.network.accuracy(self.dataset.inputs(), self.dataset.labels())
    }

    /// Mean loss of the current network over the whole dataset, without
    /// updating anything.
    pub fn mse(&mut self) -> f64 {
        let total: f64 = self.dataset.inputs().iter().zip(self.dataset.labels())
            .map(|(input, expected)| MseLoss::loss(&self.network.forward(input.clone()), expected))
            .sum();
        total / self.dataset.len() as f64
    }

    pub fn into_network(self) -> Network {
        self.network
    }

    /// One forward/backward pass over every sample followed by one update
    /// per layer. Returns the mean loss seen during the pass.
    fn run_epoch(&mut self, epoch: usize) -> f64 {
        let mut total_loss = 0.0;

        let mut acc_grads: Vec<(Matrix, Matrix)> = self.network.layers.iter()
            .map(|layer| (
                Matrix::zeros(layer.weights.rows, layer.weights.cols),
                Matrix::zeros(layer.biases.rows, layer.biases.cols),
            ))
            .collect();

        for (input, expected) in self.dataset.inputs().iter().zip(self.dataset.labels()) {
            let output = self.network.forward(input.clone());
            total_loss += MseLoss::loss(&output, expected);

            let mut delta = Matrix::from_data(vec![MseLoss::derivative(&output, expected)]);

            for i in (0..self.network.layers.len()).rev() {
                let input_for_layer = if i == 0 {
                    Matrix::from_data(vec![input.clone()])
                } else {
                    self.network.layers[i - 1].neurons.clone()
                };

                let (w_grad, b_grad) = self.network.layers[i].compute_gradients(&delta, &input_for_layer);

                if i > 0 {
                    // Propagate δ_i through weights to get ∂L/∂a_{i-1}
                    delta = b_grad.clone() * self.network.layers[i].weights.transpose();
                }

                let (w_acc, b_acc) = &mut acc_grads[i];
                *w_acc = w_acc.zip_map(&w_grad, |a, g| a + g);
                *b_acc = b_acc.zip_map(&b_grad, |a, g| a + g);
            }
        }

        for (i, (w_grad, b_grad)) in acc_grads.iter().enumerate() {
            let w_delta = self.rule.delta(self.learning_rate, w_grad, i, epoch);
            let layer = &mut self.network.layers[i];
            layer.apply_weight_delta(&w_delta);
            layer.descend_biases(b_grad, self.learning_rate);
        }

        total_loss / self.dataset.len() as f64
    }
}
