//! Column specification model: one `FieldSpec` per detail line, in file order.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Declared type of a column.
///
/// Tags are matched case-insensitively. Anything that is not `integer` or
/// `boolean` behaves like `text`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Datatype {
    Text,
    Integer,
    Boolean,
}

impl Datatype {
    pub fn from_tag(tag: &str) -> Self {
        if tag.eq_ignore_ascii_case("integer") {
            Datatype::Integer
        } else if tag.eq_ignore_ascii_case("boolean") {
            Datatype::Boolean
        } else {
            Datatype::Text
        }
    }

    /// True when `tag` names one of the three known types.
    pub fn is_known_tag(tag: &str) -> bool {
        ["text", "integer", "boolean"]
            .iter()
            .any(|known| tag.eq_ignore_ascii_case(known))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Datatype::Text => "text",
            Datatype::Integer => "integer",
            Datatype::Boolean => "boolean",
        }
    }
}

/// A width literal that is not a non-negative integer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("field '{field}' has invalid width '{width}'")]
pub struct InvalidWidth {
    pub field: String,
    pub width: String,
}

/// One schema entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Output key.
    pub name: String,

    /// Width exactly as written in the specification. Interpreted only when a
    /// line is extracted.
    pub width: String,

    /// Datatype tag exactly as written in the specification.
    pub tag: String,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, width: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            width: width.into(),
            tag: tag.into(),
        }
    }

    pub fn datatype(&self) -> Datatype {
        Datatype::from_tag(&self.tag)
    }

    pub fn parse_width(&self) -> Result<usize, InvalidWidth> {
        self.width.trim().parse::<usize>().map_err(|_| InvalidWidth {
            field: self.name.clone(),
            width: self.width.clone(),
        })
    }
}

/// Ordered, immutable list of field definitions.
///
/// The offset of field `i` is the sum of the widths of fields `0..i`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    fields: Vec<FieldSpec>,
}

impl Schema {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldSpec> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a FieldSpec;
    type IntoIter = std::slice::Iter<'a, FieldSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn datatype_tags_are_case_insensitive() {
        assert_eq!(Datatype::from_tag("INTEGER"), Datatype::Integer);
        assert_eq!(Datatype::from_tag("Boolean"), Datatype::Boolean);
        assert_eq!(Datatype::from_tag("tExT"), Datatype::Text);
    }

    #[test]
    fn unknown_tag_falls_back_to_text() {
        assert_eq!(Datatype::from_tag("string"), Datatype::Text);
        assert_eq!(Datatype::from_tag(""), Datatype::Text);
        assert!(!Datatype::is_known_tag("int"));
        assert!(Datatype::is_known_tag("BOOLEAN"));
    }

    #[test]
    fn width_is_parsed_lazily() {
        let ok = FieldSpec::new("age", "3", "integer");
        assert_eq!(ok.parse_width(), Ok(3));

        let bad = FieldSpec::new("age", "three", "integer");
        let err = bad.parse_width().unwrap_err();
        assert_eq!(err.field, "age");
        assert_eq!(err.width, "three");
        assert!(err.to_string().contains("'three'"));

        let negative = FieldSpec::new("x", "-1", "text");
        assert!(negative.parse_width().is_err());
    }

    #[test]
    fn schema_preserves_order() {
        let schema = Schema::new(vec![
            FieldSpec::new("b", "1", "text"),
            FieldSpec::new("a", "2", "text"),
        ]);
        let names: Vec<&str> = schema.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(schema.field("a").map(|f| f.width.as_str()), Some("2"));
        assert!(schema.field("c").is_none());
    }
}
