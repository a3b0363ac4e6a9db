//! Default filesystem-backed and in-memory port implementations.

use crate::SourceError;
use crate::ports::{DataSource, RecordSink, SpecSource};
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use fwconv_spec::{SpecError, Validation};
use fwconv_types::Schema;
use glob::{Pattern, glob};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io::{self, BufWriter, Write};
use tracing::{debug, warn};

/// Sorted names of the regular files directly inside `dir`.
fn list_files(dir: &Utf8Path) -> Result<Vec<String>, SourceError> {
    if !dir.is_dir() {
        return Err(SourceError::Missing {
            location: dir.to_string(),
        });
    }

    let pattern = format!("{}/*", Pattern::escape(dir.as_str()));
    debug!(pattern = %pattern, "listing files");

    let entries = glob(&pattern).map_err(|e| SourceError::Io {
        name: dir.to_string(),
        message: e.to_string(),
    })?;

    let mut names = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| SourceError::Io {
            name: dir.to_string(),
            message: e.to_string(),
        })?;
        if !path.is_file() {
            continue;
        }
        match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => names.push(name.to_string()),
            None => warn!(path = %path.display(), "skipping file with a non-UTF-8 name"),
        }
    }

    if names.is_empty() {
        return Err(SourceError::Empty {
            location: dir.to_string(),
        });
    }

    // Deterministic order matters.
    names.sort();
    Ok(names)
}

fn source_io_error(name: &str, err: io::Error) -> SourceError {
    if err.kind() == io::ErrorKind::NotFound {
        SourceError::NotFound {
            name: name.to_string(),
        }
    } else {
        SourceError::Io {
            name: name.to_string(),
            message: err.to_string(),
        }
    }
}

/// Specifications stored as files in a directory.
#[derive(Debug, Clone)]
pub struct FsSpecSource {
    pub dir: Utf8PathBuf,
}

impl FsSpecSource {
    pub fn new(dir: Utf8PathBuf) -> Self {
        Self { dir }
    }
}

impl SpecSource for FsSpecSource {
    fn list_specs(&self) -> Result<Vec<String>, SourceError> {
        list_files(&self.dir)
    }

    fn validate(&self, name: &str) -> Result<Validation, SpecError> {
        fwconv_spec::validate_spec(&self.dir, name)
    }

    fn load(&self, name: &str) -> Result<Schema, SpecError> {
        fwconv_spec::load_spec(&self.dir, name)
    }
}

/// Data files stored in a directory.
#[derive(Debug, Clone)]
pub struct FsDataSource {
    pub dir: Utf8PathBuf,
}

impl FsDataSource {
    pub fn new(dir: Utf8PathBuf) -> Self {
        Self { dir }
    }
}

impl DataSource for FsDataSource {
    fn list_data(&self) -> Result<Vec<String>, SourceError> {
        list_files(&self.dir)
    }

    fn read_lines(&self, name: &str) -> Result<Vec<String>, SourceError> {
        let path = self.dir.join(name);
        let contents = fs::read_to_string(&path).map_err(|e| source_io_error(name, e))?;
        Ok(contents.lines().map(str::to_string).collect())
    }
}

/// Writes outputs as files in a directory, creating it on first use.
#[derive(Debug, Clone)]
pub struct FsRecordSink {
    pub dir: Utf8PathBuf,
}

impl FsRecordSink {
    pub fn new(dir: Utf8PathBuf) -> Self {
        Self { dir }
    }
}

impl RecordSink for FsRecordSink {
    fn create(&self, name: &str) -> anyhow::Result<Box<dyn Write + '_>> {
        fs::create_dir_all(self.dir.as_std_path())
            .with_context(|| format!("create_dir_all {}", self.dir))?;
        let path = self.dir.join(name);
        let file =
            fs::File::create(path.as_std_path()).with_context(|| format!("create {}", path))?;
        Ok(Box::new(BufWriter::new(file)))
    }
}

/// In-memory specifications for embedding and testing.
#[derive(Debug, Clone, Default)]
pub struct InMemorySpecSource {
    specs: BTreeMap<String, String>,
}

impl InMemorySpecSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, contents: impl Into<String>) -> Self {
        self.specs.insert(name.into(), contents.into());
        self
    }

    fn contents(&self, name: &str) -> Result<&str, SpecError> {
        self.specs
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| SpecError::NotFound {
                path: Utf8PathBuf::from(name),
            })
    }
}

impl SpecSource for InMemorySpecSource {
    fn list_specs(&self) -> Result<Vec<String>, SourceError> {
        if self.specs.is_empty() {
            return Err(SourceError::Empty {
                location: "in-memory specs".to_string(),
            });
        }
        Ok(self.specs.keys().cloned().collect())
    }

    fn validate(&self, name: &str) -> Result<Validation, SpecError> {
        if !fwconv_spec::has_spec_extension(name) {
            return Ok(fwconv_spec::validate_text(name, ""));
        }
        Ok(fwconv_spec::validate_text(name, self.contents(name)?))
    }

    fn load(&self, name: &str) -> Result<Schema, SpecError> {
        fwconv_spec::parse_spec(self.contents(name)?)
    }
}

/// In-memory data sources for embedding and testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDataSource {
    data: BTreeMap<String, String>,
}

impl InMemoryDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, contents: impl Into<String>) -> Self {
        self.data.insert(name.into(), contents.into());
        self
    }
}

impl DataSource for InMemoryDataSource {
    fn list_data(&self) -> Result<Vec<String>, SourceError> {
        if self.data.is_empty() {
            return Err(SourceError::Empty {
                location: "in-memory data".to_string(),
            });
        }
        Ok(self.data.keys().cloned().collect())
    }

    fn read_lines(&self, name: &str) -> Result<Vec<String>, SourceError> {
        let contents = self.data.get(name).ok_or_else(|| SourceError::NotFound {
            name: name.to_string(),
        })?;
        Ok(contents.lines().map(str::to_string).collect())
    }
}

/// Collects outputs in memory. `create` truncates like a file would.
#[derive(Debug, Default)]
pub struct InMemorySink {
    outputs: RefCell<BTreeMap<String, Vec<u8>>>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn names(&self) -> Vec<String> {
        self.outputs.borrow().keys().cloned().collect()
    }

    /// Output contents as text, if the output was created.
    pub fn contents(&self, name: &str) -> Option<String> {
        self.outputs
            .borrow()
            .get(name)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }
}

impl RecordSink for InMemorySink {
    fn create(&self, name: &str) -> anyhow::Result<Box<dyn Write + '_>> {
        self.outputs.borrow_mut().insert(name.to_string(), Vec::new());
        Ok(Box::new(MemoryFile {
            outputs: &self.outputs,
            name: name.to_string(),
        }))
    }
}

struct MemoryFile<'a> {
    outputs: &'a RefCell<BTreeMap<String, Vec<u8>>>,
    name: String,
}

impl Write for MemoryFile<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.outputs
            .borrow_mut()
            .entry(self.name.clone())
            .or_default()
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn temp_dir() -> (TempDir, Utf8PathBuf) {
        let temp = TempDir::new().unwrap();
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap();
        (temp, root)
    }

    #[test]
    fn list_files_is_sorted_and_skips_dirs() {
        let (_temp, root) = temp_dir();
        std::fs::write(root.join("b.csv"), "x").unwrap();
        std::fs::write(root.join("a.csv"), "x").unwrap();
        std::fs::create_dir(root.join("nested")).unwrap();

        let source = FsSpecSource::new(root);
        assert_eq!(source.list_specs().unwrap(), vec!["a.csv", "b.csv"]);
    }

    #[test]
    fn list_files_missing_dir() {
        let (_temp, root) = temp_dir();
        let source = FsDataSource::new(root.join("absent"));
        assert!(matches!(
            source.list_data().unwrap_err(),
            SourceError::Missing { .. }
        ));
    }

    #[test]
    fn list_files_empty_dir() {
        let (_temp, root) = temp_dir();
        let source = FsDataSource::new(root.clone());
        assert_eq!(
            source.list_data().unwrap_err(),
            SourceError::Empty {
                location: root.to_string()
            }
        );
    }

    #[test]
    fn list_files_escapes_glob_metacharacters() {
        let (_temp, root) = temp_dir();
        let dir = root.join("specs[1]");
        std::fs::create_dir(&dir).unwrap();
        std::fs::write(dir.join("fmt.csv"), "x").unwrap();

        assert_eq!(FsSpecSource::new(dir).list_specs().unwrap(), vec!["fmt.csv"]);
    }

    #[cfg(unix)]
    #[test]
    fn list_files_skips_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let (_temp, root) = temp_dir();
        let odd = root.as_std_path().join(OsStr::from_bytes(b"bad\xFF.txt"));
        if std::fs::write(&odd, "x").is_err() {
            // Some filesystems refuse non-UTF-8 names outright.
            return;
        }

        let source = FsDataSource::new(root.clone());
        assert!(matches!(
            source.list_data().unwrap_err(),
            SourceError::Empty { .. }
        ));

        std::fs::write(root.join("good.txt"), "x").unwrap();
        assert_eq!(source.list_data().unwrap(), vec!["good.txt"]);
    }

    #[test]
    fn fs_read_lines_strips_terminators() {
        let (_temp, root) = temp_dir();
        std::fs::write(root.join("d.txt"), "one\r\ntwo\n\nfour\n").unwrap();
        let source = FsDataSource::new(root);
        assert_eq!(
            source.read_lines("d.txt").unwrap(),
            vec!["one", "two", "", "four"]
        );
    }

    #[test]
    fn fs_read_lines_missing_file() {
        let (_temp, root) = temp_dir();
        let source = FsDataSource::new(root);
        assert_eq!(
            source.read_lines("gone.txt").unwrap_err(),
            SourceError::NotFound {
                name: "gone.txt".to_string()
            }
        );
    }

    #[test]
    fn fs_sink_creates_dir_and_truncates() {
        let (_temp, root) = temp_dir();
        let out = root.join("output");
        let sink = FsRecordSink::new(out.clone());

        {
            let mut w = sink.create("x.ndjson").unwrap();
            w.write_all(b"first\nsecond\n").unwrap();
            w.flush().unwrap();
        }
        {
            let mut w = sink.create("x.ndjson").unwrap();
            w.write_all(b"third\n").unwrap();
            w.flush().unwrap();
        }
        assert_eq!(
            std::fs::read_to_string(out.join("x.ndjson")).unwrap(),
            "third\n"
        );
    }

    #[test]
    fn in_memory_spec_source_validates_and_loads() {
        let source = InMemorySpecSource::new()
            .with("fmt.csv", "column name,width,datatype\nname,4,TEXT\n")
            .with("bad.csv", "name,width,type\n")
            .with("notes.txt", "column name,width,datatype\n");

        assert_eq!(
            source.list_specs().unwrap(),
            vec!["bad.csv", "fmt.csv", "notes.txt"]
        );
        assert!(source.validate("fmt.csv").unwrap().is_valid());
        assert!(matches!(
            source.validate("bad.csv").unwrap(),
            Validation::BadHeader { .. }
        ));
        assert_eq!(
            source.validate("notes.txt").unwrap(),
            Validation::WrongExtension
        );
        assert_eq!(source.load("fmt.csv").unwrap().len(), 1);
        assert!(source.load("gone.csv").unwrap_err().is_not_found());
    }

    #[test]
    fn in_memory_sources_report_empty() {
        assert!(matches!(
            InMemorySpecSource::new().list_specs().unwrap_err(),
            SourceError::Empty { .. }
        ));
        assert!(matches!(
            InMemoryDataSource::new().list_data().unwrap_err(),
            SourceError::Empty { .. }
        ));
    }

    #[test]
    fn in_memory_sink_truncates_on_create() {
        let sink = InMemorySink::new();
        {
            let mut w = sink.create("a.ndjson").unwrap();
            w.write_all(b"old\n").unwrap();
        }
        {
            let mut w = sink.create("a.ndjson").unwrap();
            w.write_all(b"new\n").unwrap();
        }
        assert_eq!(sink.names(), vec!["a.ndjson"]);
        assert_eq!(sink.contents("a.ndjson").unwrap(), "new\n");
        assert!(sink.contents("b.ndjson").is_none());
    }
}
