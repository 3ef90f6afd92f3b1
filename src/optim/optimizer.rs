use serde::{Serialize, Deserialize};

use crate::math::matrix::Matrix;
use crate::optim::{
    adagrad::Adagrad,
    adam::Adam,
    momentum::Momentum,
    rmsprop::RmsProp,
    sgd::GradientDescent,
    update_rule::UpdateRule,
};

/// The five configurations compared by the experiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizerKind {
    None,
    Momentum,
    Adagrad,
    RmsProp,
    Adam,
}

impl OptimizerKind {
    pub const ALL: [OptimizerKind; 5] = [
        OptimizerKind::None,
        OptimizerKind::Momentum,
        OptimizerKind::Adagrad,
        OptimizerKind::RmsProp,
        OptimizerKind::Adam,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            OptimizerKind::None => "No optimization",
            OptimizerKind::Momentum => "Momentum",
            OptimizerKind::Adagrad => "Adagrad",
            OptimizerKind::RmsProp => "RMSprop",
            OptimizerKind::Adam => "Adam",
        }
    }

    /// A fresh optimizer with empty accumulators.
    pub fn build(&self) -> Optimizer {
        match self {
            OptimizerKind::None => Optimizer::Plain(GradientDescent),
            OptimizerKind::Momentum => Optimizer::Momentum(Momentum::default()),
            OptimizerKind::Adagrad => Optimizer::Adagrad(Adagrad::new()),
            OptimizerKind::RmsProp => Optimizer::RmsProp(RmsProp::default()),
            OptimizerKind::Adam => Optimizer::Adam(Adam::default()),
        }
    }
}

/// Any of the update rules, dispatched by variant.
#[derive(Debug, Clone)]
pub enum Optimizer {
    Plain(GradientDescent),
    Momentum(Momentum),
    Adagrad(Adagrad),
    RmsProp(RmsProp),
    Adam(Adam),
}

impl UpdateRule for Optimizer {
    fn delta(&mut self, learning_rate: f64, grad: &Matrix, layer: usize, epoch: usize) -> Matrix {
        match self {
            Optimizer::Plain(rule) => rule.delta(learning_rate, grad, layer, epoch),
            Optimizer::Momentum(rule) => rule.delta(learning_rate, grad, layer, epoch),
            Optimizer::Adagrad(rule) => rule.delta(learning_rate, grad, layer, epoch),
            Optimizer::RmsProp(rule) => rule.delta(learning_rate, grad, layer, epoch),
            Optimizer::Adam(rule) => rule.delta(learning_rate, grad, layer, epoch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_maps_zero_gradient_to_zero() {
        for kind in OptimizerKind::ALL {
            let d = kind.build().delta(0.01, &Matrix::zeros(4, 5), 0, 0);
            assert!(d.iter().all(|&x| x == 0.0), "{} produced a nonzero delta", kind.label());
        }
    }

    #[test]
    fn labels_are_distinct() {
        let mut labels: Vec<&str> = OptimizerKind::ALL.iter().map(|k| k.label()).collect();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), 5);
        assert_eq!(OptimizerKind::None.label(), "No optimization");
        assert_eq!(OptimizerKind::RmsProp.label(), "RMSprop");
    }

    #[test]
    fn build_starts_fresh() {
        let g = Matrix::from_data(vec![vec![1.0]]);
        let mut used = OptimizerKind::Momentum.build();
        used.delta(0.1, &g, 0, 0);
        let again = used.delta(0.1, &g, 0, 1);
        let fresh = OptimizerKind::Momentum.build().delta(0.1, &g, 0, 0);
        assert_ne!(again, fresh);
        assert_eq!(fresh.data, vec![vec![-0.1]]);
    }
}
