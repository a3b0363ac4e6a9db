#![no_main]

//! Fuzz target for line extraction with structured schemas.
//!
//! Whatever the line content, a schema with valid widths yields one value per
//! field, in schema order.

use fwconv_types::{FieldSpec, Schema};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, arbitrary::Arbitrary)]
struct ExtractInput {
    fields: Vec<FieldInput>,
    line: String,
}

#[derive(Debug, arbitrary::Arbitrary)]
struct FieldInput {
    width: u8,
    datatype: DatatypeChoice,
}

#[derive(Debug, arbitrary::Arbitrary)]
enum DatatypeChoice {
    Text,
    Integer,
    Boolean,
    Other,
}

impl DatatypeChoice {
    fn tag(&self) -> &'static str {
        match self {
            DatatypeChoice::Text => "text",
            DatatypeChoice::Integer => "INTEGER",
            DatatypeChoice::Boolean => "Boolean",
            DatatypeChoice::Other => "memo",
        }
    }
}

fuzz_target!(|input: ExtractInput| {
    let schema = Schema::new(
        input
            .fields
            .iter()
            .enumerate()
            .map(|(i, f)| FieldSpec::new(format!("f{i}"), f.width.to_string(), f.datatype.tag()))
            .collect(),
    );

    let record = fwconv_transform::extract_line(&input.line, &schema)
        .expect("numeric widths always resolve");
    assert_eq!(record.len(), schema.len());
    for (field, (name, _)) in schema.iter().zip(record.iter()) {
        assert_eq!(field.name, name);
    }

    let line = fwconv_transform::to_ndjson_line(&record).expect("serialize record");
    assert!(!line.contains('\n'));
    let _: serde_json::Value = serde_json::from_str(&line).expect("valid JSON");
});
