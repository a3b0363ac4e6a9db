//! Shared DTOs for the fwconv workspace.
//!
//! # Design constraints
//! - `Schema` is built once per specification and never mutated afterwards.
//! - `Record` keeps schema field order; serialization must not reorder keys.
//! - Report types are written to disk, so prefer adding optional fields over
//!   changing semantics.

pub mod record;
pub mod report;
pub mod schema;

pub use record::{Record, Value};
pub use schema::{Datatype, FieldSpec, InvalidWidth, Schema};

/// Schema identifiers.
pub mod schema_id {
    pub const FWCONV_RUN_V1: &str = "fwconv.run.v1";
}
