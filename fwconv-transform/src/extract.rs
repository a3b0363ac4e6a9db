use fwconv_types::{Datatype, InvalidWidth, Record, Schema, Value};

/// Position of one field within a fixed-width line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot<'a> {
    pub name: &'a str,
    /// Character offset from the start of the line.
    pub offset: usize,
    pub width: usize,
    pub datatype: Datatype,
}

/// A schema with every width resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout<'a> {
    slots: Vec<Slot<'a>>,
}

impl<'a> Layout<'a> {
    pub fn resolve(schema: &'a Schema) -> Result<Self, InvalidWidth> {
        let mut slots = Vec::with_capacity(schema.len());
        let mut offset = 0usize;
        for field in schema {
            let width = field.parse_width()?;
            slots.push(Slot {
                name: &field.name,
                offset,
                width,
                datatype: field.datatype(),
            });
            offset = offset.saturating_add(width);
        }
        Ok(Self { slots })
    }

    pub fn slots(&self) -> &[Slot<'a>] {
        &self.slots
    }

    /// Characters a line needs for every field to be populated.
    pub fn line_width(&self) -> usize {
        self.slots
            .last()
            .map(|s| s.offset.saturating_add(s.width))
            .unwrap_or(0)
    }

    /// Slice and coerce one line.
    ///
    /// Offsets are fixed: a short line leaves the trailing fields empty rather
    /// than re-synchronizing on whatever content is present.
    pub fn extract(&self, line: &str) -> Record {
        let mut record = Record::with_capacity(self.slots.len());
        let mut rest = line;
        for slot in &self.slots {
            let (raw, tail) = split_chars(rest, slot.width);
            rest = tail;
            record.push(slot.name, coerce(raw.trim(), slot.datatype));
        }
        record
    }
}

/// Resolve `schema` and extract a single line.
///
/// Only a schema defect (an uninterpretable width) is an error; line content
/// never is.
pub fn extract_line(line: &str, schema: &Schema) -> Result<Record, InvalidWidth> {
    Ok(Layout::resolve(schema)?.extract(line))
}

/// Convert a trimmed slice to a typed value.
pub fn coerce(raw: &str, datatype: Datatype) -> Value {
    match datatype {
        Datatype::Boolean => Value::Boolean(raw == "1"),
        Datatype::Integer => Value::Integer(raw.parse::<i64>().ok()),
        Datatype::Text => Value::Text(raw.to_string()),
    }
}

/// Split after `n` characters. If `s` is shorter, all of it is taken.
fn split_chars(s: &str, n: usize) -> (&str, &str) {
    match s.char_indices().nth(n) {
        Some((idx, _)) => s.split_at(idx),
        None => (s, ""),
    }
}
