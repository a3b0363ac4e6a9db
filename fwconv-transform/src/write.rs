use crate::{Layout, TransformError};
use fwconv_types::{Record, Schema};
use std::io::Write;
use tracing::debug;

/// Extension (without the dot) of generated output files.
pub const OUTPUT_EXTENSION: &str = "ndjson";

/// Serialize one record as a single JSON line, without the terminator.
pub fn to_ndjson_line(record: &Record) -> Result<String, serde_json::Error> {
    serde_json::to_string(record)
}

/// Transform every line and write one JSON object per line to `sink`.
///
/// Widths are resolved before the first write, so a bad schema leaves the
/// sink untouched. Blank lines still produce a record. Returns the number of
/// records written, which always equals the number of input lines.
pub fn transform_and_write<W, I>(schema: &Schema, lines: I, sink: W) -> Result<u64, TransformError>
where
    W: Write,
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let layout = Layout::resolve(schema)?;
    layout.write_records(lines, sink)
}

impl Layout<'_> {
    /// Extract and write every line with an already resolved layout.
    pub fn write_records<W, I>(&self, lines: I, mut sink: W) -> Result<u64, TransformError>
    where
        W: Write,
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut written = 0u64;
        for line in lines {
            let record = self.extract(line.as_ref());
            serde_json::to_writer(&mut sink, &record)?;
            sink.write_all(b"\n")?;
            written += 1;
        }
        sink.flush()?;

        debug!(records = written, fields = self.slots().len(), "transformed lines");
        Ok(written)
    }
}
