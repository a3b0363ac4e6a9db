//! Filesystem tests for the specification loader.

use camino::Utf8PathBuf;
use fwconv_spec::{SpecError, Validation, is_valid_spec, load_spec, validate_spec};
use fwconv_types::FieldSpec;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

fn specs_dir(temp: &TempDir) -> Utf8PathBuf {
    let dir = Utf8PathBuf::from_path_buf(temp.path().join("specs")).unwrap();
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_spec(dir: &Utf8PathBuf, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).unwrap();
}

#[test]
fn non_csv_file_is_rejected() {
    let temp = tempfile::tempdir().unwrap();
    let dir = specs_dir(&temp);
    write_spec(&dir, "test_specs.txt", "column name,width,datatype\n");

    assert_eq!(
        validate_spec(&dir, "test_specs.txt").unwrap(),
        Validation::WrongExtension
    );
    assert!(!is_valid_spec(&dir, "test_specs.txt").unwrap());
}

#[test]
fn non_csv_name_is_rejected_without_reading() {
    let temp = tempfile::tempdir().unwrap();
    let dir = specs_dir(&temp);

    assert_eq!(
        validate_spec(&dir, "does_not_exist.json").unwrap(),
        Validation::WrongExtension
    );
}

#[test]
fn invalid_first_line_is_rejected() {
    let temp = tempfile::tempdir().unwrap();
    let dir = specs_dir(&temp);
    write_spec(&dir, "test_specs.csv", "invalid first line\n");

    assert_eq!(
        validate_spec(&dir, "test_specs.csv").unwrap(),
        Validation::BadHeader {
            found: "invalid first line".to_string()
        }
    );
}

#[test]
fn empty_file_is_rejected() {
    let temp = tempfile::tempdir().unwrap();
    let dir = specs_dir(&temp);
    write_spec(&dir, "empty.csv", "");

    assert!(!is_valid_spec(&dir, "empty.csv").unwrap());
}

#[test]
fn valid_file_is_accepted() {
    let temp = tempfile::tempdir().unwrap();
    let dir = specs_dir(&temp);
    write_spec(&dir, "test_specs.csv", "column name,width,datatype\n");

    assert!(is_valid_spec(&dir, "test_specs.csv").unwrap());
}

#[test]
fn validating_missing_csv_is_not_found() {
    let temp = tempfile::tempdir().unwrap();
    let dir = specs_dir(&temp);

    let err = validate_spec(&dir, "missing.csv").unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn load_valid_file() {
    let temp = tempfile::tempdir().unwrap();
    let dir = specs_dir(&temp);
    write_spec(
        &dir,
        "test_specs.csv",
        "column name,width,datatype\nname,10,string\nage,3,int\nvalid,1,bool\n",
    );

    let schema = load_spec(&dir, "test_specs.csv").unwrap();
    assert_eq!(
        schema.fields(),
        &[
            FieldSpec::new("name", "10", "string"),
            FieldSpec::new("age", "3", "int"),
            FieldSpec::new("valid", "1", "bool"),
        ]
    );
}

#[test]
fn load_header_only_file_is_empty() {
    let temp = tempfile::tempdir().unwrap();
    let dir = specs_dir(&temp);
    write_spec(&dir, "test_specs.csv", "column name,width,datatype\n");

    assert!(load_spec(&dir, "test_specs.csv").unwrap().is_empty());
}

#[test]
fn load_missing_file_is_not_found() {
    let temp = tempfile::tempdir().unwrap();
    let dir = specs_dir(&temp);

    let err = load_spec(&dir, "missing_specs.csv").unwrap_err();
    assert!(matches!(err, SpecError::NotFound { .. }));
    assert!(err.to_string().contains("missing_specs.csv"));
}

#[test]
fn load_incorrectly_formatted_file_fails() {
    let temp = tempfile::tempdir().unwrap();
    let dir = specs_dir(&temp);
    write_spec(
        &dir,
        "test_specs.csv",
        "column name,width,datatype\nname,10\nage,3,int\nvalid,bool\n",
    );

    let err = load_spec(&dir, "test_specs.csv").unwrap_err();
    assert!(err.is_malformed());
    assert!(matches!(
        err,
        SpecError::MalformedRecord {
            line: 2,
            found: 2,
            ..
        }
    ));
}
