use std::collections::hash_map::{Entry, HashMap};

use crate::math::matrix::Matrix;

/// Added under every square root so a zero accumulator never divides by zero.
pub const EPSILON: f64 = 1e-8;

/// Turns one layer's weight gradient into the delta added to its weights.
///
/// Implementations may keep per-layer state between calls; a fresh value
/// always starts with empty state.
pub trait UpdateRule {
    fn delta(&mut self, learning_rate: f64, grad: &Matrix, layer: usize, epoch: usize) -> Matrix;
}

/// Per-layer accumulator storage, filled lazily on the first gradient a
/// layer sees.
#[derive(Debug, Clone, Default)]
pub struct LayerState {
    slots: HashMap<usize, Matrix>,
}

impl LayerState {
    /// Seeds the slot with `init` on first use, otherwise folds `grad` into
    /// the stored value with `step`. Returns the updated accumulator.
    pub fn update<I, S>(&mut self, layer: usize, grad: &Matrix, init: I, step: S) -> &Matrix
    where
        I: FnOnce(&Matrix) -> Matrix,
        S: FnOnce(&Matrix, &Matrix) -> Matrix,
    {
        match self.slots.entry(layer) {
            Entry::Occupied(mut e) => {
                let next = step(e.get(), grad);
                e.insert(next);
                e.into_mut()
            }
            Entry::Vacant(e) => e.insert(init(grad)),
        }
    }

    pub fn get(&self, layer: usize) -> Option<&Matrix> {
        self.slots.get(&layer)
    }
}

/// δ = −η·g / sqrt(a + ε), element-wise.
pub(crate) fn scaled_step(learning_rate: f64, numerator: &Matrix, accumulator: &Matrix) -> Matrix {
    numerator.zip_map(accumulator, |g, a| -learning_rate * g / (a + EPSILON).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_is_seeded_then_stepped_per_layer() {
        let mut state = LayerState::default();
        assert!(state.get(0).is_none());
        let g = Matrix::from_data(vec![vec![2.0]]);

        let first = state.update(0, &g, |g| g.scale(10.0), |a, g| a.clone() + g.clone()).clone();
        assert_eq!(first.data, vec![vec![20.0]]);

        let second = state.update(0, &g, |g| g.scale(10.0), |a, g| a.clone() + g.clone()).clone();
        assert_eq!(second.data, vec![vec![22.0]]);

        // Layer 1 is independent of layer 0.
        state.update(1, &g, |g| g.clone(), |a, _| a.clone());
        assert_eq!(state.get(1).map(|m| m.data[0][0]), Some(2.0));
        assert_eq!(state.get(0).map(|m| m.data[0][0]), Some(22.0));
    }
}
