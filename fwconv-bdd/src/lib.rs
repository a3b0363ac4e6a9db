//! BDD harness (cucumber-rs).
//!
//! This crate exists to keep scenario tests isolated from the production crates.
//! The helpers here stage a `specs/`, `data/`, `output/` layout and read it back.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use std::collections::BTreeMap;

/// A throwaway base directory with the conventional layout.
#[derive(Debug)]
pub struct Layout {
    _temp: tempfile::TempDir,
    root: Utf8PathBuf,
}

impl Layout {
    /// Create a base directory with empty `specs/` and `data/`.
    pub fn new() -> anyhow::Result<Self> {
        let temp = tempfile::tempdir().context("create tempdir")?;
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf())
            .map_err(|p| anyhow::anyhow!("non-utf8 temp path {}", p.display()))?;
        fs::create_dir_all(root.join("specs"))?;
        fs::create_dir_all(root.join("data"))?;
        Ok(Self { _temp: temp, root })
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub fn output_dir(&self) -> Utf8PathBuf {
        self.root.join("output")
    }

    pub fn add_spec(&self, name: &str, contents: &str) -> anyhow::Result<()> {
        stage_file(&self.root.join("specs"), name, contents)
    }

    pub fn add_data(&self, name: &str, contents: &str) -> anyhow::Result<()> {
        stage_file(&self.root.join("data"), name, contents)
    }

    pub fn outputs(&self) -> anyhow::Result<BTreeMap<String, String>> {
        read_outputs(&self.output_dir())
    }
}

pub fn stage_file(dir: &Utf8Path, name: &str, contents: &str) -> anyhow::Result<()> {
    fs::create_dir_all(dir)?;
    let path = dir.join(name);
    fs::write(&path, contents).with_context(|| format!("write {}", path))
}

/// Every regular file in `dir`, by name. A missing directory reads as empty.
pub fn read_outputs(dir: &Utf8Path) -> anyhow::Result<BTreeMap<String, String>> {
    let mut out = BTreeMap::new();
    if !dir.exists() {
        return Ok(out);
    }
    for entry in dir.read_dir_utf8().with_context(|| format!("read {}", dir))? {
        let entry = entry?;
        if entry.path().is_file() {
            let contents = fs::read_to_string(entry.path())?;
            out.insert(entry.file_name().to_string(), contents);
        }
    }
    Ok(out)
}

/// Docstring body as file contents: one leading newline dropped, exactly one
/// trailing newline.
pub fn docstring_text(raw: &str) -> String {
    let body = raw.strip_prefix('\n').unwrap_or(raw);
    let body = body.trim_end_matches('\n');
    if body.is_empty() {
        String::new()
    } else {
        format!("{body}\n")
    }
}
