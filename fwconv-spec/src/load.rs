use crate::SpecError;
use camino::Utf8Path;
use fs_err as fs;
use fwconv_types::{Datatype, FieldSpec, Schema};
use std::collections::HashSet;
use std::io::{self, BufRead, BufReader};
use tracing::{debug, warn};

/// Required first line of every specification.
pub const SPEC_HEADER: &str = "column name,width,datatype";

/// Extension (without the dot) that marks a specification file.
pub const SPEC_EXTENSION: &str = "csv";

/// Outcome of structural validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Valid,
    /// The name does not end in `.csv`.
    WrongExtension,
    /// The first line is not the required header.
    BadHeader { found: String },
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid)
    }
}

pub fn has_spec_extension(spec_name: &str) -> bool {
    spec_name
        .strip_suffix(SPEC_EXTENSION)
        .is_some_and(|rest| rest.ends_with('.'))
}

/// Header comparison: trailing whitespace is ignored, nothing else is.
pub fn check_header(first_line: &str) -> bool {
    first_line.trim_end() == SPEC_HEADER
}

/// Validate the specification `spec_name` inside `specs_dir`.
///
/// The extension is checked before the file is touched, so a non-`.csv` name
/// is rejected even if it does not exist.
pub fn validate_spec(specs_dir: &Utf8Path, spec_name: &str) -> Result<Validation, SpecError> {
    if !has_spec_extension(spec_name) {
        return Ok(validate_text(spec_name, ""));
    }
    let first_line = read_first_line(&specs_dir.join(spec_name))?;
    Ok(validate_text(spec_name, &first_line))
}

/// Validate a specification held in memory. Only the first line of
/// `contents` is inspected.
pub fn validate_text(spec_name: &str, contents: &str) -> Validation {
    if !has_spec_extension(spec_name) {
        warn!(spec = spec_name, "skipping spec: not a .{} file", SPEC_EXTENSION);
        return Validation::WrongExtension;
    }

    let first_line = contents.lines().next().unwrap_or("").trim_end();
    if !check_header(first_line) {
        warn!(
            spec = spec_name,
            found = first_line,
            "skipping spec: first line is not '{}'",
            SPEC_HEADER
        );
        return Validation::BadHeader {
            found: first_line.to_string(),
        };
    }

    debug!(spec = spec_name, "spec is valid");
    Validation::Valid
}

/// Boolean form of [`validate_spec`].
pub fn is_valid_spec(specs_dir: &Utf8Path, spec_name: &str) -> Result<bool, SpecError> {
    validate_spec(specs_dir, spec_name).map(|v| v.is_valid())
}

/// Read and parse a specification. Does not re-validate the header.
pub fn load_spec(specs_dir: &Utf8Path, spec_name: &str) -> Result<Schema, SpecError> {
    let path = specs_dir.join(spec_name);
    let contents = fs::read_to_string(&path).map_err(|e| io_error(&path, e))?;
    let schema = parse_spec(&contents)?;
    debug!(spec = spec_name, fields = schema.len(), "parsed spec");
    Ok(schema)
}

/// Parse specification text. The first line is treated as the header and
/// skipped without inspection.
pub fn parse_spec(contents: &str) -> Result<Schema, SpecError> {
    let mut fields = Vec::new();
    let mut seen = HashSet::new();

    for (idx, raw) in contents.lines().enumerate().skip(1) {
        let line_no = idx + 1;
        let line = raw.trim();
        let columns: Vec<&str> = line.split(',').collect();

        let [name, width, tag, ..] = columns.as_slice() else {
            return Err(SpecError::MalformedRecord {
                line: line_no,
                found: columns.len(),
                content: line.to_string(),
            });
        };

        if !seen.insert(name.to_string()) {
            return Err(SpecError::DuplicateField {
                line: line_no,
                name: name.to_string(),
            });
        }

        if !Datatype::is_known_tag(tag) {
            debug!(field = *name, tag = *tag, "unrecognized datatype, treating as text");
        }

        fields.push(FieldSpec::new(*name, *width, *tag));
    }

    Ok(Schema::new(fields))
}

fn read_first_line(path: &Utf8Path) -> Result<String, SpecError> {
    let file = fs::File::open(path.as_std_path()).map_err(|e| io_error(path, e))?;
    let mut line = String::new();
    BufReader::new(file)
        .read_line(&mut line)
        .map_err(|e| io_error(path, e))?;
    Ok(line)
}

fn io_error(path: &Utf8Path, err: io::Error) -> SpecError {
    if err.kind() == io::ErrorKind::NotFound {
        SpecError::NotFound {
            path: path.to_path_buf(),
        }
    } else {
        SpecError::Io {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }
}
