pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod data;
pub mod train;
pub mod plot;
pub mod experiment;
pub mod error;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use layers::dense::Layer;
pub use network::network::Network;
pub use loss::mse::MseLoss;
pub use optim::{Optimizer, OptimizerKind, UpdateRule};
pub use data::{load_iris, Dataset, Species};
pub use train::{TrainConfig, Trainer};
pub use plot::{Chart, Series};
pub use experiment::{run_comparison, run_optimizer, Comparison, RunReport};
pub use error::{ChartError, DatasetError, Error, ParseSpeciesError};
