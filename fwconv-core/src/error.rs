use thiserror::Error;

/// Failure listing or reading a specs or data location.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The location itself does not exist.
    #[error("{location} does not exist")]
    Missing { location: String },

    /// The location exists but holds no files.
    #[error("no files found in {location}")]
    Empty { location: String },

    /// A named item is absent.
    #[error("{name} not found")]
    NotFound { name: String },

    #[error("io error on {name}: {message}")]
    Io { name: String, message: String },
}
