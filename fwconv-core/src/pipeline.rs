//! Batch conversion pipeline, extracted from the CLI.
//!
//! These entry points are I/O-agnostic: all listing, reading and writing is
//! performed through the port traits.

use crate::SourceError;
use crate::adapters::{FsDataSource, FsRecordSink, FsSpecSource};
use crate::correlate;
use crate::ports::{DataSource, RecordSink, SpecSource};
use crate::settings::{OutputNaming, RunSettings};
use chrono::{DateTime, Utc};
use fwconv_spec::{SpecError, Validation};
use fwconv_transform::{Layout, TransformError};
use fwconv_types::Schema;
use fwconv_types::report::{
    FailureEntry, FailureKind, OutputEntry, RunCounts, RunInfo, RunReport, RunStatus, SkipReason,
    SkippedSpec, ToolInfo,
};
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// Everything a run did. Per-item failures land here; only fatal listing
/// errors abort [`run`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOutcome {
    pub specs_seen: u64,
    pub outputs: Vec<OutputEntry>,
    pub skipped: Vec<SkippedSpec>,
    pub failures: Vec<FailureEntry>,
    /// Output names written more than once, in first-overwrite order.
    pub overwrites: Vec<String>,
}

impl RunOutcome {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// 0 when every pair converted (skips allowed), 2 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.is_clean() { 0 } else { 2 }
    }

    pub fn records_written(&self) -> u64 {
        self.outputs.iter().map(|o| o.records).sum()
    }

    pub fn to_report(
        &self,
        tool: ToolInfo,
        started_at: DateTime<Utc>,
        ended_at: DateTime<Utc>,
    ) -> RunReport {
        RunReport {
            schema: fwconv_types::schema_id::FWCONV_RUN_V1.to_string(),
            tool,
            run: RunInfo {
                started_at: Some(started_at),
                ended_at: Some(ended_at),
            },
            status: if self.is_clean() {
                RunStatus::Pass
            } else {
                RunStatus::Partial
            },
            counts: RunCounts {
                specs_seen: self.specs_seen,
                specs_skipped: self.skipped.len() as u64,
                outputs: self.outputs.len() as u64,
                records: self.records_written(),
                failures: self.failures.len() as u64,
            },
            outputs: self.outputs.clone(),
            skipped: self.skipped.clone(),
            failures: self.failures.clone(),
            overwrites: self.overwrites.clone(),
        }
    }

    fn fail(&mut self, spec: &str, data_source: Option<&str>, kind: FailureKind, message: String) {
        warn!(
            spec,
            data_source = data_source.unwrap_or("-"),
            kind = ?kind,
            "{message}"
        );
        self.failures.push(FailureEntry {
            spec: spec.to_string(),
            data_source: data_source.map(str::to_string),
            kind,
            message,
        });
    }
}

fn spec_failure_kind(err: &SpecError) -> FailureKind {
    match err {
        SpecError::NotFound { .. } => FailureKind::NotFound,
        SpecError::Io { .. } => FailureKind::Io,
        SpecError::MalformedRecord { .. } | SpecError::DuplicateField { .. } => {
            FailureKind::MalformedSpecRecord
        }
    }
}

fn source_failure_kind(err: &SourceError) -> FailureKind {
    match err {
        SourceError::NotFound { .. } => FailureKind::NotFound,
        SourceError::Missing { .. } | SourceError::Empty { .. } | SourceError::Io { .. } => {
            FailureKind::Io
        }
    }
}

/// Convert every valid specification against each data source it governs.
///
/// Specifications are visited in listing order and their data sources in
/// listing order, strictly one at a time. Listing failures are fatal; every
/// other failure is recorded and the run moves on to the next pair.
pub fn run(
    naming: OutputNaming,
    specs: &dyn SpecSource,
    data: &dyn DataSource,
    sink: &dyn RecordSink,
) -> Result<RunOutcome, SourceError> {
    let spec_names = specs.list_specs()?;
    let data_names = data.list_data()?;
    debug!(
        specs = spec_names.len(),
        data_sources = data_names.len(),
        "listed sources"
    );

    let mut outcome = RunOutcome::default();
    let mut written = WrittenOutputs::default();

    for spec_name in &spec_names {
        outcome.specs_seen += 1;

        let reason = match specs.validate(spec_name) {
            Ok(Validation::Valid) => None,
            Ok(Validation::WrongExtension) => Some(SkipReason::WrongExtension),
            Ok(Validation::BadHeader { .. }) => Some(SkipReason::BadHeader),
            Err(e) => {
                outcome.fail(spec_name, None, spec_failure_kind(&e), e.to_string());
                continue;
            }
        };
        if let Some(reason) = reason {
            outcome.skipped.push(SkippedSpec {
                spec: spec_name.clone(),
                reason,
            });
            continue;
        }

        let schema = match specs.load(spec_name) {
            Ok(schema) => schema,
            Err(e) => {
                outcome.fail(spec_name, None, spec_failure_kind(&e), e.to_string());
                continue;
            }
        };

        let matches = correlate::matching(spec_name, &data_names);
        if matches.is_empty() {
            info!(spec = spec_name.as_str(), "no data sources for spec");
            continue;
        }

        for &data_name in &matches {
            let output = naming.output_name(spec_name, data_name, matches.len());
            match convert(&schema, data, spec_name, data_name, sink, &output, &mut written) {
                Ok(records) => {
                    info!(
                        spec = spec_name.as_str(),
                        data_source = data_name,
                        output = output.as_str(),
                        records,
                        "wrote output"
                    );
                    outcome.outputs.push(OutputEntry {
                        spec: spec_name.clone(),
                        data_source: data_name.to_string(),
                        output,
                        records,
                    });
                }
                Err((kind, message)) => outcome.fail(spec_name, Some(data_name), kind, message),
            }
        }
    }

    outcome.overwrites = written.overwrites;
    Ok(outcome)
}

/// Output names opened during one run.
#[derive(Debug, Default)]
struct WrittenOutputs {
    names: BTreeSet<String>,
    /// Names opened more than once, in first-overwrite order.
    overwrites: Vec<String>,
}

impl WrittenOutputs {
    /// Record that `output` was just created. Returns true when an earlier
    /// pair in this run had already written it.
    fn opened(&mut self, output: &str) -> bool {
        if self.names.insert(output.to_string()) {
            return false;
        }
        if !self.overwrites.iter().any(|o| o == output) {
            self.overwrites.push(output.to_string());
        }
        true
    }
}

/// One data source into one output. Widths are resolved before the sink is
/// opened so a bad schema never leaves a truncated output behind. Only an
/// opened sink counts as a write for overwrite tracking.
fn convert(
    schema: &Schema,
    data: &dyn DataSource,
    spec_name: &str,
    data_name: &str,
    sink: &dyn RecordSink,
    output: &str,
    written: &mut WrittenOutputs,
) -> Result<u64, (FailureKind, String)> {
    let lines = data
        .read_lines(data_name)
        .map_err(|e| (source_failure_kind(&e), e.to_string()))?;

    let layout =
        Layout::resolve(schema).map_err(|e| (FailureKind::InvalidWidth, e.to_string()))?;

    let writer = sink
        .create(output)
        .map_err(|e| (FailureKind::Sink, format!("{e:#}")))?;
    if written.opened(output) {
        warn!(
            spec = spec_name,
            data_source = data_name,
            output,
            "overwriting output written earlier in this run"
        );
    }

    layout.write_records(&lines, writer).map_err(|e| {
        let kind = match &e {
            TransformError::InvalidWidth(_) => FailureKind::InvalidWidth,
            _ => FailureKind::Sink,
        };
        (kind, e.to_string())
    })
}

/// [`run`] over the filesystem directories in `settings`.
pub fn run_in_dirs(settings: &RunSettings) -> Result<RunOutcome, SourceError> {
    let specs = FsSpecSource::new(settings.specs_dir.clone());
    let data = FsDataSource::new(settings.data_dir.clone());
    let sink = FsRecordSink::new(settings.output_dir.clone());
    run(settings.output_naming, &specs, &data, &sink)
}
