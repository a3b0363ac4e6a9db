//! Run report written by `fwconv run --report`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Schema identifier, "fwconv.run.v1".
    pub schema: String,

    pub tool: ToolInfo,

    #[serde(default)]
    pub run: RunInfo,

    #[serde(default)]
    pub status: RunStatus,

    #[serde(default)]
    pub counts: RunCounts,

    #[serde(default)]
    pub outputs: Vec<OutputEntry>,

    #[serde(default)]
    pub skipped: Vec<SkippedSpec>,

    #[serde(default)]
    pub failures: Vec<FailureEntry>,

    /// Output names written more than once in this run.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub overwrites: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    #[default]
    Pass,
    /// At least one specification or data source failed.
    Partial,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunCounts {
    pub specs_seen: u64,
    pub specs_skipped: u64,
    pub outputs: u64,
    pub records: u64,
    pub failures: u64,
}

/// One written output sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputEntry {
    pub spec: String,
    pub data_source: String,
    pub output: String,
    pub records: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    WrongExtension,
    BadHeader,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedSpec {
    pub spec: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    NotFound,
    MalformedSpecRecord,
    InvalidWidth,
    Io,
    Sink,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureEntry {
    pub spec: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_source: Option<String>,

    pub kind: FailureKind,
    pub message: String,
}
