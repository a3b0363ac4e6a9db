//! Error types for fwconv-spec.
//!
//! Validation rejections (wrong extension, bad header) are not errors; they
//! are reported through [`Validation`](crate::Validation). Everything here is
//! fatal for the specification it came from.

use camino::Utf8PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    /// The specification file does not exist.
    #[error("specification not found: {path}")]
    NotFound { path: Utf8PathBuf },

    /// The specification exists but could not be read.
    #[error("io error reading {path}: {message}")]
    Io { path: Utf8PathBuf, message: String },

    /// A detail line has fewer than three comma-separated columns.
    #[error("malformed spec record at line {line}: expected 3 columns, found {found} in '{content}'")]
    MalformedRecord {
        /// 1-based line number in the specification file.
        line: usize,
        found: usize,
        content: String,
    },

    /// A detail line repeats a field name declared earlier.
    #[error("duplicate field '{name}' at line {line}")]
    DuplicateField { line: usize, name: String },
}

impl SpecError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, SpecError::NotFound { .. })
    }

    /// True for content problems in the detail lines, as opposed to I/O.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            SpecError::MalformedRecord { .. } | SpecError::DuplicateField { .. }
        )
    }
}
