use crate::math::matrix::Matrix;
use crate::optim::update_rule::{scaled_step, LayerState, UpdateRule};

/// Adam with a first moment v (decay β) and a second moment a (decay ρ):
///
/// a ← ρ·a + (1−ρ)·g², v ← β·v + (1−β)·g, δ = −α·v / sqrt(a + ε)
///
/// The step size α is bias-corrected only for the first
/// `BIAS_CORRECTION_EPOCHS` epochs; afterwards it is the raw learning rate.
#[derive(Debug, Clone)]
pub struct Adam {
    pub rho: f64,
    pub beta: f64,
    squares: LayerState,
    moments: LayerState,
}

impl Adam {
    pub const DEFAULT_RHO: f64 = 0.9;
    pub const DEFAULT_BETA: f64 = 0.7;
    pub const BIAS_CORRECTION_EPOCHS: usize = 100;

    pub fn new(rho: f64, beta: f64) -> Adam {
        Adam {
            rho,
            beta,
            squares: LayerState::default(),
            moments: LayerState::default(),
        }
    }

    /// α for `epoch` (0-based).
    pub fn step_size(&self, learning_rate: f64, epoch: usize) -> f64 {
        if epoch >= Adam::BIAS_CORRECTION_EPOCHS {
            return learning_rate;
        }
        let t = (epoch + 1) as i32;
        learning_rate * (1.0 - self.rho.powi(t)).sqrt() / (1.0 - self.beta.powi(t))
    }
}

impl Default for Adam {
    fn default() -> Self {
        Adam::new(Adam::DEFAULT_RHO, Adam::DEFAULT_BETA)
    }
}

impl UpdateRule for Adam {
    fn delta(&mut self, learning_rate: f64, grad: &Matrix, layer: usize, epoch: usize) -> Matrix {
        let (rho, beta) = (self.rho, self.beta);
        let alpha = self.step_size(learning_rate, epoch);

        let a = self.squares.update(
            layer,
            grad,
            |g| g.map(|x| (1.0 - rho) * x * x),
            |a, g| a.zip_map(g, |a, g| rho * a + (1.0 - rho) * g * g),
        );
        let v = self.moments.update(
            layer,
            grad,
            |g| g.scale(1.0 - beta),
            |v, g| v.zip_map(g, |v, g| beta * v + (1.0 - beta) * g),
        );
        scaled_step(alpha, v, a)
    }
}
