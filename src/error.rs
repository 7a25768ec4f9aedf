//! Crate-wide error type

use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the harness core.
///
/// Culled bodies and frames without simulation steps are normal control flow
/// and never show up here.
#[derive(Debug, Error)]
pub enum Error {
    /// Bad radius, vertex count, time delta or configuration value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Settings, script or report JSON could not be (de)serialized.
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidParameter(msg.into())
    }
}
