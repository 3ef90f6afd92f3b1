use rand::Rng;

use crate::layers::dense::Layer;
use crate::network::spec::{is_chained, LayerSpec, IRIS_TOPOLOGY};

#[derive(Debug, Clone)]
pub struct Network {
    pub layers: Vec<Layer>,
}

impl Network {
    /// Builds a network from a chained list of layer specs. Weights are
    /// uniform in [-init_range, init_range]; biases start at zero.
    ///
    /// # Panics
    /// Panics if a layer's input size differs from the previous layer's size.
    pub fn new<R: Rng + ?Sized>(layer_specs: &[LayerSpec], init_range: f64, rng: &mut R) -> Network {
        assert!(is_chained(layer_specs), "layer sizes must chain");
        let layers = layer_specs.iter()
            .map(|spec| Layer::new(spec.size, spec.input_size, spec.activation, init_range, rng))
            .collect();
        Network { layers }
    }

    /// Fresh 4 → 5 → 4 → 3 Iris classifier.
    pub fn iris<R: Rng + ?Sized>(init_range: f64, rng: &mut R) -> Network {
        Network::new(&IRIS_TOPOLOGY, init_range, rng)
    }

    /// Forward pass; stores activations in each layer for backprop.
    pub fn forward(&mut self, input: Vec<f64>) -> Vec<f64> {
        let mut current = input;
        for layer in &mut self.layers {
            current = layer.feed_from(current);
        }
        current
    }

    /// Fraction of samples whose strongest output matches the hot label entry.
    pub fn accuracy(&mut self, inputs: &[Vec<f64>], labels: &[Vec<f64>]) -> f64 {
        if inputs.is_empty() {
            return 0.0;
        }
        let correct = inputs.iter().zip(labels.iter())
            .filter(|(input, label)| argmax(&self.forward((*input).clone())) == argmax(label))
            .count();
        correct as f64 / inputs.len() as f64
    }
}

/// Index of the maximum element in a slice.
fn argmax(v: &[f64]) -> usize {
    v.iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(i, _)| i)
        .unwrap_or(0)
}
