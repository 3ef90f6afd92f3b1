use crate::math::matrix::Matrix;
use crate::optim::update_rule::{scaled_step, LayerState, UpdateRule};

/// Adagrad: a ← a + g², δ = −η·g / sqrt(a + ε).
#[derive(Debug, Clone, Default)]
pub struct Adagrad {
    squares: LayerState,
}

impl Adagrad {
    pub fn new() -> Adagrad {
        Adagrad::default()
    }

    /// Running sum of squared gradients for `layer`, once it has seen one.
    pub fn accumulator(&self, layer: usize) -> Option<&Matrix> {
        self.squares.get(layer)
    }
}

impl UpdateRule for Adagrad {
    fn delta(&mut self, learning_rate: f64, grad: &Matrix, layer: usize, _epoch: usize) -> Matrix {
        let a = self.squares.update(
            layer,
            grad,
            |g| g.map(|x| x * x),
            |a, g| a.zip_map(g, |a, g| a + g * g),
        );
        scaled_step(learning_rate, grad, a)
    }
}
