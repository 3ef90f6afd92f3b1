use rand::Rng;

use crate::{math::matrix::Matrix, activation::activation::ActivationFunction};

#[derive(Debug, Clone)]
pub struct Layer{
    pub size: usize,
    pub neurons: Matrix,
    pre_neurons: Matrix,  // pre-activation values (z = xW + b) needed for the derivative
    pub weights: Matrix,
    pub biases: Matrix,
    pub activator: ActivationFunction
}

impl Layer {
    /// Builds a layer whose weights are uniform in [-init_range, init_range]
    /// and whose biases start at zero.
    pub fn new<R: Rng + ?Sized>(
        size: usize,
        input_size: usize,
        activation: ActivationFunction,
        init_range: f64,
        rng: &mut R,
    ) -> Layer {
        let weights = Matrix::random(input_size, size, rng).scale(init_range);

        Layer {
            size,
            neurons: Matrix::zeros(1, size),
            pre_neurons: Matrix::zeros(1, size),
            weights,
            biases: Matrix::zeros(1, size),
            activator: activation
        }
    }

    pub fn input_size(&self) -> usize {
        self.weights.rows
    }

    pub fn feed_from(&mut self, input: Vec<f64>) -> Vec<f64> {
        let z = Matrix::from_data(vec![input]) * self.weights.clone() + self.biases.clone();
        let a = z.map(|x| self.activator.function(x));
        self.pre_neurons = z;
        self.neurons = a.clone();
        a.data[0].clone()
    }

    /// Computes gradients for the most recent forward pass. Returns
    /// (weights_grad, biases_grad). `next_layer_delta` is ∂L/∂a for this layer.
    pub fn compute_gradients(
        &self,
        next_layer_delta: &Matrix,
        inputs: &Matrix,
    ) -> (Matrix, Matrix) {
        let act_derivative = self.pre_neurons.map(|x| self.activator.derivative(x));
        // δ = error ⊙ σ'(z)
        let layer_delta = next_layer_delta.hadamard(&act_derivative);

        let weights_grad = inputs.transpose() * layer_delta.clone();

        (weights_grad, layer_delta)
    }

    /// Adds an optimizer-produced delta to the weights.
    pub fn apply_weight_delta(&mut self, delta: &Matrix) {
        self.weights = self.weights.zip_map(delta, |w, d| w + d);
    }

    /// Plain gradient step on the biases.
    pub fn descend_biases(&mut self, biases_grad: &Matrix, lr: f64) {
        self.biases = self.biases.zip_map(biases_grad, |b, g| b - lr * g);
    }
}
