//! Record transformation.
//!
//! A [`Schema`](fwconv_types::Schema) is resolved into a [`Layout`] (widths
//! parsed, offsets accumulated), then each fixed-width line is sliced and
//! coerced into a [`Record`](fwconv_types::Record). Extraction on a resolved
//! layout cannot fail: malformed content degrades per field, never per line.

mod error;
mod extract;
mod write;

pub use error::TransformError;
pub use extract::{Layout, Slot, coerce, extract_line};
pub use write::{OUTPUT_EXTENSION, to_ndjson_line, transform_and_write};
