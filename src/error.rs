//! Error type shared by the loading, filtering and aggregation pipeline.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, BikeshareError>;

#[derive(Debug, Error)]
pub enum BikeshareError {
    /// The requested city has no backing dataset.
    #[error("unknown city '{0}' (expected chicago, new york city or washington)")]
    UnknownCity(String),

    /// A row of the dataset could not be parsed. The whole load is rejected.
    #[error("malformed dataset {resource}: row {row}: {reason}")]
    MalformedDataset {
        resource: String,
        row: usize,
        reason: String,
    },

    /// The filtered record set is empty, so the requested statistic is undefined.
    #[error("no trips match the selected filters")]
    EmptyResultSet,

    #[error("invalid {axis} filter '{value}'")]
    InvalidFilter { axis: &'static str, value: String },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BikeshareError {
    pub(crate) fn malformed(resource: &str, row: usize, reason: impl Into<String>) -> Self {
        BikeshareError::MalformedDataset {
            resource: resource.to_string(),
            row,
            reason: reason.into(),
        }
    }
}
