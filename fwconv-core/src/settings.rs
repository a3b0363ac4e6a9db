//! Clap-free settings for the conversion pipeline.

use crate::correlate::base_name;
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use fwconv_transform::OUTPUT_EXTENSION;
use tracing::{debug, info};

/// How output sinks are named.
///
/// With `Spec`, every data source matching one specification writes to the
/// same `<spec>.ndjson`, so only the last one processed survives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputNaming {
    /// Spec name for a single match, data source names for several.
    #[default]
    Auto,
    /// `<spec base name>.ndjson`
    Spec,
    /// `<data source base name>.ndjson`
    DataSource,
}

impl OutputNaming {
    /// Output name for `data_name`, one of `matches` data sources governed by
    /// `spec_name`.
    pub fn output_name(&self, spec_name: &str, data_name: &str, matches: usize) -> String {
        let stem = match self {
            OutputNaming::Auto if matches <= 1 => base_name(spec_name),
            OutputNaming::Auto => base_name(data_name),
            OutputNaming::Spec => base_name(spec_name),
            OutputNaming::DataSource => base_name(data_name),
        };
        format!("{stem}.{OUTPUT_EXTENSION}")
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputNaming::Auto => "auto",
            OutputNaming::Spec => "spec",
            OutputNaming::DataSource => "data-source",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "auto" => Some(OutputNaming::Auto),
            "spec" => Some(OutputNaming::Spec),
            "data-source" => Some(OutputNaming::DataSource),
            _ => None,
        }
    }
}

/// Settings for a run over filesystem directories.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub specs_dir: Utf8PathBuf,
    pub data_dir: Utf8PathBuf,
    pub output_dir: Utf8PathBuf,
    pub output_naming: OutputNaming,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self::under(Utf8Path::new("."))
    }
}

impl RunSettings {
    /// The conventional `specs/`, `data/`, `output/` layout under `base`.
    pub fn under(base: &Utf8Path) -> Self {
        Self {
            specs_dir: base.join("specs"),
            data_dir: base.join("data"),
            output_dir: base.join("output"),
            output_naming: OutputNaming::default(),
        }
    }

    pub fn dirs(&self) -> [&Utf8Path; 3] {
        [&self.specs_dir, &self.data_dir, &self.output_dir]
    }

    /// Create any of the three directories that are missing. Existing
    /// directories and their contents are left alone. Returns the directories
    /// that were created.
    pub fn ensure_dirs(&self) -> anyhow::Result<Vec<Utf8PathBuf>> {
        let mut created = Vec::new();
        for dir in self.dirs() {
            if dir.is_dir() {
                debug!(dir = %dir, "directory exists");
                continue;
            }
            fs::create_dir_all(dir.as_std_path()).with_context(|| format!("create {}", dir))?;
            info!(dir = %dir, "created directory");
            created.push(dir.to_path_buf());
        }
        Ok(created)
    }
}
