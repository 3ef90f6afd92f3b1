use crate::math::matrix::Matrix;
use crate::optim::update_rule::UpdateRule;

/// Plain gradient descent: δ = −η·g. Keeps no state.
#[derive(Debug, Clone, Copy, Default)]
pub struct GradientDescent;

impl UpdateRule for GradientDescent {
    fn delta(&mut self, learning_rate: f64, grad: &Matrix, _layer: usize, _epoch: usize) -> Matrix {
        grad.scale(-learning_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_against_the_gradient() {
        let g = Matrix::from_data(vec![vec![1.0, -2.0], vec![0.0, 4.0]]);
        let d = GradientDescent.delta(0.5, &g, 0, 0);
        assert_eq!(d.data, vec![vec![-0.5, 1.0], vec![0.0, -2.0]]);
    }

    #[test]
    fn zero_gradient_gives_zero_delta() {
        let d = GradientDescent.delta(0.01, &Matrix::zeros(3, 2), 1, 7);
        assert!(d.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn zero_gradient_after_a_real_step_is_still_zero() {
        let mut rule = GradientDescent;
        rule.delta(0.01, &Matrix::from_data(vec![vec![3.0, -1.0]]), 0, 0);
        let d = rule.delta(0.01, &Matrix::zeros(1, 2), 0, 1);
        assert!(d.iter().all(|&x| x == 0.0));
    }
}
