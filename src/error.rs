use std::path::PathBuf;

use thiserror::Error;

/// Failures while reading the Iris CSV. Loading stops at the first one.
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("cannot read dataset '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("row {row}: expected {expected} columns, got {found}")]
    ColumnCount { row: usize, expected: usize, found: usize },

    #[error("row {row}: '{value}' is not a valid number")]
    InvalidNumber { row: usize, value: String },

    #[error("row {row}: unknown species '{label}'")]
    UnknownSpecies { row: usize, label: String },

    #[error("expected {expected} data rows, found {found}")]
    RowCount { expected: usize, found: usize },
}

/// A label that names none of the three species.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown species '{0}'")]
pub struct ParseSpeciesError(pub String);

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("nothing to plot")]
    NoSeries,

    #[error("at most {max} series can be plotted, got {found}")]
    TooManySeries { max: usize, found: usize },

    #[error("series '{label}' has {found} points, expected {expected}")]
    RaggedSeries { label: String, expected: usize, found: usize },

    #[error("failed to write chart: {0}")]
    Image(#[from] image::ImageError),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Chart(#[from] ChartError),

    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode report: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
