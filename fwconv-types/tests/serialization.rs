//! Serialization tests for records and run reports.

use fwconv_types::report::{FailureKind, RunReport, RunStatus};
use fwconv_types::{Record, Value};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

proptest! {
    /// Any text survives JSON encoding, including quotes and control characters.
    #[test]
    fn text_values_decode_to_original(s in any::<String>()) {
        let mut r = Record::default();
        r.push("t", Value::Text(s.clone()));
        let line = serde_json::to_string(&r).unwrap();
        prop_assert!(!line.contains('\n'));

        let decoded: serde_json::Value = serde_json::from_str(&line).unwrap();
        prop_assert_eq!(decoded["t"].as_str(), Some(s.as_str()));
    }

    /// Integers render as bare decimal literals.
    #[test]
    fn integers_render_bare(n in any::<i64>()) {
        let mut r = Record::default();
        r.push("n", Value::Integer(Some(n)));
        let line = serde_json::to_string(&r).unwrap();
        prop_assert_eq!(line, format!("{{\"n\":{}}}", n));
    }
}

#[test]
fn booleans_render_as_unquoted_tokens() {
    let mut r = Record::default();
    r.push("yes", Value::Boolean(true));
    r.push("no", Value::Boolean(false));
    assert_eq!(
        serde_json::to_string(&r).unwrap(),
        r#"{"yes":true,"no":false}"#
    );
}

#[test]
fn minimal_report_deserializes_with_defaults() {
    let json = r#"{
        "schema": "fwconv.run.v1",
        "tool": { "name": "fwconv" }
    }"#;
    let report: RunReport = serde_json::from_str(json).unwrap();
    assert_eq!(report.status, RunStatus::Pass);
    assert_eq!(report.counts.outputs, 0);
    assert!(report.outputs.is_empty());
    assert!(report.failures.is_empty());
    assert!(report.tool.version.is_none());
}

#[test]
fn report_failure_kind_round_trips() {
    let json = r#"{
        "schema": "fwconv.run.v1",
        "tool": { "name": "fwconv", "version": "0.1.0" },
        "status": "partial",
        "failures": [
            { "spec": "a.csv", "kind": "malformed_spec_record", "message": "line 2" }
        ]
    }"#;
    let report: RunReport = serde_json::from_str(json).unwrap();
    assert_eq!(report.status, RunStatus::Partial);
    assert_eq!(report.failures[0].kind, FailureKind::MalformedSpecRecord);
    assert!(report.failures[0].data_source.is_none());
}
