//! Port traits abstracting all I/O away from the pipeline.

use crate::SourceError;
use fwconv_spec::{SpecError, Validation};
use fwconv_types::Schema;
use std::io::Write;

/// Source of column specifications.
pub trait SpecSource {
    /// Names of every candidate specification, sorted.
    fn list_specs(&self) -> Result<Vec<String>, SourceError>;
    fn validate(&self, name: &str) -> Result<Validation, SpecError>;
    /// Parse a specification. Callers validate first.
    fn load(&self, name: &str) -> Result<Schema, SpecError>;
}

/// Source of fixed-width data files.
pub trait DataSource {
    /// Names of every candidate data source, sorted.
    fn list_data(&self) -> Result<Vec<String>, SourceError>;
    fn read_lines(&self, name: &str) -> Result<Vec<String>, SourceError>;
}

/// Destination for NDJSON output.
pub trait RecordSink {
    /// Create or truncate the named output.
    fn create(&self, name: &str) -> anyhow::Result<Box<dyn Write + '_>>;
}
