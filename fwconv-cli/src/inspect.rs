//! Layout view for the `fwconv schema` command.

use fwconv_types::Schema;
use serde::Serialize;
use std::fmt::Write as _;

/// One field of a specification with its resolved position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldRow {
    pub name: String,
    /// Unknown once any earlier width is invalid.
    pub offset: Option<usize>,
    pub width: Option<usize>,
    /// Width as written in the specification.
    pub declared_width: String,
    pub datatype: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaView {
    pub spec: String,
    pub line_width: Option<usize>,
    pub fields: Vec<FieldRow>,
}

impl SchemaView {
    pub fn new(spec: &str, schema: &Schema) -> Self {
        let mut offset = Some(0usize);
        let mut fields = Vec::with_capacity(schema.len());
        for field in schema {
            let width = field.parse_width().ok();
            fields.push(FieldRow {
                name: field.name.clone(),
                offset: width.and(offset),
                width,
                declared_width: field.width.clone(),
                datatype: field.datatype().as_str(),
            });
            offset = match (offset, width) {
                (Some(o), Some(w)) => Some(o.saturating_add(w)),
                _ => None,
            };
        }
        Self {
            spec: spec.to_string(),
            line_width: offset,
            fields,
        }
    }

    pub fn invalid_widths(&self) -> impl Iterator<Item = &FieldRow> {
        self.fields.iter().filter(|f| f.width.is_none())
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Spec: {}", self.spec);
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "  {:<24} {:>8} {:>8}  DATATYPE",
            "NAME", "OFFSET", "WIDTH"
        );
        for f in &self.fields {
            let offset = f.offset.map(|o| o.to_string()).unwrap_or_else(|| "-".into());
            let width = match f.width {
                Some(w) => w.to_string(),
                None => format!("invalid width '{}'", f.declared_width),
            };
            let _ = writeln!(
                out,
                "  {:<24} {:>8} {:>8}  {}",
                f.name, offset, width, f.datatype
            );
        }
        let _ = writeln!(out);
        match self.line_width {
            Some(w) => {
                let _ = writeln!(out, "Line width: {}", w);
            }
            None => {
                let _ = writeln!(out, "Line width: unknown");
            }
        }
        out
    }
}
