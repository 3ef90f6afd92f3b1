use serde::{Serialize, Deserialize};
use crate::activation::activation::ActivationFunction;

/// Describes one layer in a network topology.
///
/// Fields:
/// - `size`       — number of neurons in this layer
/// - `input_size` — output size of the previous layer, or the raw input
///                  dimension for the first layer
/// - `activation` — activation function applied after the linear transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub size: usize,
    pub input_size: usize,
    pub activation: ActivationFunction,
}

impl LayerSpec {
    pub const fn sigmoid(input_size: usize, size: usize) -> LayerSpec {
        LayerSpec { size, input_size, activation: ActivationFunction::Sigmoid }
    }
}

/// The Iris perceptron: 4 → 5 → 4 → 3, logistic everywhere.
pub const IRIS_TOPOLOGY: [LayerSpec; 3] = [
    LayerSpec::sigmoid(4, 5),
    LayerSpec::sigmoid(5, 4),
    LayerSpec::sigmoid(4, 3),
];

/// Returns true when every layer consumes exactly what the previous one produces.
pub fn is_chained(specs: &[LayerSpec]) -> bool {
    specs.windows(2).all(|pair| pair[0].size == pair[1].input_size)
}
