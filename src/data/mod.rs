pub mod csv;
pub mod iris;

pub use csv::{load_iris, parse_iris};
pub use iris::{Dataset, Species, IRIS_FEATURES, IRIS_SAMPLES};
