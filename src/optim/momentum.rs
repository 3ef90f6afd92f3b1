use crate::math::matrix::Matrix;
use crate::optim::update_rule::{LayerState, UpdateRule};

/// Momentum: v ← β·v − η·g, δ = v.
#[derive(Debug, Clone)]
pub struct Momentum {
    pub beta: f64,
    velocity: LayerState,
}

impl Momentum {
    pub const DEFAULT_BETA: f64 = 0.3;

    pub fn new(beta: f64) -> Momentum {
        Momentum { beta, velocity: LayerState::default() }
    }
}

impl Default for Momentum {
    fn default() -> Self {
        Momentum::new(Momentum::DEFAULT_BETA)
    }
}

impl UpdateRule for Momentum {
    fn delta(&mut self, learning_rate: f64, grad: &Matrix, layer: usize, _epoch: usize) -> Matrix {
        let beta = self.beta;
        self.velocity
            .update(
                layer,
                grad,
                |g| g.scale(-learning_rate),
                |v, g| v.zip_map(g, |v, g| beta * v - learning_rate * g),
            )
            .clone()
    }
}
