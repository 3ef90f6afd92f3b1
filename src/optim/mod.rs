pub mod update_rule;
pub mod sgd;
pub mod momentum;
pub mod adagrad;
pub mod rmsprop;
pub mod adam;
pub mod optimizer;

pub use update_rule::{LayerState, UpdateRule, EPSILON};
pub use sgd::GradientDescent;
pub use momentum::Momentum;
pub use adagrad::Adagrad;
pub use rmsprop::RmsProp;
pub use adam::Adam;
pub use optimizer::{Optimizer, OptimizerKind};
