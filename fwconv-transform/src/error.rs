use fwconv_types::InvalidWidth;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    /// A schema width could not be interpreted. Raised before any output is
    /// written.
    #[error(transparent)]
    InvalidWidth(#[from] InvalidWidth),

    /// The sink rejected a write or flush.
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialize record: {0}")]
    Json(#[from] serde_json::Error),
}

impl TransformError {
    /// True when the failure came from the output sink rather than the schema.
    pub fn is_sink_failure(&self) -> bool {
        match self {
            TransformError::InvalidWidth(_) => false,
            TransformError::Io(_) => true,
            TransformError::Json(e) => e.is_io(),
        }
    }
}
