//! Embeddable core library for fwconv.
//!
//! Provides a clap-free, I/O-abstracted entry point suitable for linking
//! into a larger ETL host or driving from tests.
//!
//! # Port traits
//!
//! All I/O is abstracted behind port traits in [`ports`]:
//! - [`SpecSource`](ports::SpecSource): list, validate and load specifications
//! - [`DataSource`](ports::DataSource): list and read fixed-width data files
//! - [`RecordSink`](ports::RecordSink): create output sinks
//!
//! The [`adapters`] module provides filesystem-backed and in-memory
//! implementations.
//!
//! # Entry points
//!
//! - [`run`](pipeline::run): process every specification against its data sources
//! - [`run_in_dirs`](pipeline::run_in_dirs): the same, over the directories in [`RunSettings`]

pub mod adapters;
pub mod correlate;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod settings;

pub use error::SourceError;
pub use pipeline::{RunOutcome, run, run_in_dirs};
pub use settings::{OutputNaming, RunSettings};

// Re-export so embedders don't need fwconv-spec or fwconv-types directly.
pub use fwconv_spec::{SpecError, Validation};
pub use fwconv_types::{Record, Schema};
