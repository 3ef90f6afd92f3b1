use crate::math::matrix::Matrix;
use crate::optim::update_rule::{scaled_step, LayerState, UpdateRule};

/// RMSprop: a ← ρ·a + (1−ρ)·g², δ = −η·g / sqrt(a + ε).
#[derive(Debug, Clone)]
pub struct RmsProp {
    pub rho: f64,
    squares: LayerState,
}

impl RmsProp {
    pub const DEFAULT_RHO: f64 = 0.9;

    pub fn new(rho: f64) -> RmsProp {
        RmsProp { rho, squares: LayerState::default() }
    }

    pub fn accumulator(&self, layer: usize) -> Option<&Matrix> {
        self.squares.get(layer)
    }
}

impl Default for RmsProp {
    fn default() -> Self {
        RmsProp::new(RmsProp::DEFAULT_RHO)
    }
}

impl UpdateRule for RmsProp {
    fn delta(&mut self, learning_rate: f64, grad: &Matrix, layer: usize, _epoch: usize) -> Matrix {
        let rho = self.rho;
        let a = self.squares.update(
            layer,
            grad,
            |g| g.map(|x| (1.0 - rho) * x * x),
            |a, g| a.zip_map(g, |a, g| rho * a + (1.0 - rho) * g * g),
        );
        scaled_step(learning_rate, grad, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulator_is_a_decaying_average() {
        let mut rms = RmsProp::default();
        let g = Matrix::from_data(vec![vec![2.0]]);
        rms.delta(0.01, &g, 0, 0);
        assert!((rms.accumulator(0).unwrap().data[0][0] - 0.4).abs() < 1e-12);
        rms.delta(0.01, &g, 0, 1);
        assert!((rms.accumulator(0).unwrap().data[0][0] - (0.36 + 0.4)).abs() < 1e-12);
    }

    #[test]
    fn first_step_matches_closed_form() {
        let mut rms = RmsProp::default();
        let d = rms.delta(0.01, &Matrix::from_data(vec![vec![2.0]]), 0, 0);
        let expected = -0.01 * 2.0 / (0.4f64 + 1e-8).sqrt();
        assert!((d.data[0][0] - expected).abs() < 1e-12);
    }

    #[test]
    fn zero_gradient_gives_zero_delta() {
        let d = RmsProp::default().delta(0.01, &Matrix::zeros(4, 5), 0, 0);
        assert!(d.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn zero_gradient_after_seeding_gives_zero_delta() {
        let mut rms = RmsProp::default();
        rms.delta(0.01, &Matrix::from_data(vec![vec![2.0, -0.3]]), 0, 0);
        let d = rms.delta(0.01, &Matrix::zeros(1, 2), 0, 1);
        assert!(d.iter().all(|&x| x == 0.0));
        // Only the decay applies to the accumulator.
        assert!((rms.accumulator(0).unwrap().data[0][0] - 0.9 * 0.4).abs() < 1e-12);
    }
}
