//! Specification loading.
//!
//! A specification is a `.csv` file whose first line is exactly
//! `column name,width,datatype`, followed by one `name,width,datatype` line
//! per field. Validation and parsing are separate steps: callers validate
//! first and skip sources that do not qualify, then parse.
//!
//! Widths are kept as written; they are interpreted only when a data line is
//! extracted.

mod error;
mod load;

pub use error::SpecError;
pub use load::{
    SPEC_EXTENSION, SPEC_HEADER, Validation, check_header, has_spec_extension, is_valid_spec,
    load_spec, parse_spec, validate_spec, validate_text,
};
