//! Configuration file loading for fwconv.
//!
//! Discovers and loads `fwconv.toml` from the base directory.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use fwconv_core::{OutputNaming, RunSettings};
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "fwconv.toml";

/// Top-level configuration from fwconv.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FwconvConfig {
    /// Directory layout, relative to the base directory.
    pub paths: PathsConfig,

    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub specs: Utf8PathBuf,
    pub data: Utf8PathBuf,
    pub output: Utf8PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            specs: Utf8PathBuf::from("specs"),
            data: Utf8PathBuf::from("data"),
            output: Utf8PathBuf::from("output"),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub naming: Naming,
}

/// Output naming policy as spelled in config files and on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Naming {
    #[default]
    Auto,
    Spec,
    DataSource,
}

impl From<Naming> for OutputNaming {
    fn from(value: Naming) -> Self {
        match value {
            Naming::Auto => OutputNaming::Auto,
            Naming::Spec => OutputNaming::Spec,
            Naming::DataSource => OutputNaming::DataSource,
        }
    }
}

/// Discover the fwconv.toml config file.
///
/// Returns `None` if no config file is found in `base_dir`.
pub fn discover_config(base_dir: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = base_dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse a fwconv.toml config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<FwconvConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

/// Parse a config file from a string.
pub fn parse_config(contents: &str) -> anyhow::Result<FwconvConfig> {
    let config: FwconvConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from the base directory, or return default if not found.
pub fn load_or_default(base_dir: &Utf8Path) -> anyhow::Result<FwconvConfig> {
    match discover_config(base_dir) {
        Some(path) => load_config(&path),
        None => Ok(FwconvConfig::default()),
    }
}

/// Path and naming overrides given on the command line.
#[derive(Debug, Clone, Default)]
pub struct RunOverrides {
    pub specs_dir: Option<Utf8PathBuf>,
    pub data_dir: Option<Utf8PathBuf>,
    pub output_dir: Option<Utf8PathBuf>,
    pub naming: Option<Naming>,
}

/// Builder for merging config file with CLI arguments.
pub struct ConfigMerger {
    config: FwconvConfig,
}

impl ConfigMerger {
    pub fn new(config: FwconvConfig) -> Self {
        Self { config }
    }

    /// Resolve run settings. Config paths are relative to `base_dir`; CLI
    /// paths are used as given.
    pub fn merge_run_args(self, base_dir: &Utf8Path, cli: RunOverrides) -> RunSettings {
        let paths = self.config.paths;
        RunSettings {
            specs_dir: cli.specs_dir.unwrap_or_else(|| base_dir.join(paths.specs)),
            data_dir: cli.data_dir.unwrap_or_else(|| base_dir.join(paths.data)),
            output_dir: cli.output_dir.unwrap_or_else(|| base_dir.join(paths.output)),
            output_naming: cli.naming.unwrap_or(self.config.output.naming).into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_config() {
        let contents = r#"
[paths]
specs = "in/specs"
data = "in/data"
output = "/var/out"

[output]
naming = "data-source"
"#;

        let config = parse_config(contents).unwrap();
        assert_eq!(config.paths.specs, Utf8PathBuf::from("in/specs"));
        assert_eq!(config.paths.data, Utf8PathBuf::from("in/data"));
        assert_eq!(config.paths.output, Utf8PathBuf::from("/var/out"));
        assert_eq!(config.output.naming, Naming::DataSource);
    }

    #[test]
    fn test_parse_empty_config() {
        let config = parse_config("").unwrap();
        assert_eq!(config.paths.specs, Utf8PathBuf::from("specs"));
        assert_eq!(config.output.naming, Naming::Auto);
    }

    #[test]
    fn test_parse_rejects_unknown_naming() {
        let err = parse_config("[output]\nnaming = \"by-date\"\n").unwrap_err();
        assert!(err.to_string().contains("invalid TOML"));
    }

    #[test]
    fn test_merge_uses_config_relative_to_base() {
        let config = parse_config("[paths]\nspecs = \"layouts\"\n").unwrap();
        let settings =
            ConfigMerger::new(config).merge_run_args(Utf8Path::new("/base"), RunOverrides::default());

        assert_eq!(settings.specs_dir, Utf8PathBuf::from("/base/layouts"));
        assert_eq!(settings.data_dir, Utf8PathBuf::from("/base/data"));
        assert_eq!(settings.output_dir, Utf8PathBuf::from("/base/output"));
        assert_eq!(settings.output_naming, OutputNaming::Auto);
    }

    #[test]
    fn test_merge_cli_overrides_config() {
        let config = parse_config("[paths]\ndata = \"feeds\"\n[output]\nnaming = \"spec\"\n").unwrap();
        let settings = ConfigMerger::new(config).merge_run_args(
            Utf8Path::new("/base"),
            RunOverrides {
                data_dir: Some(Utf8PathBuf::from("/elsewhere")),
                naming: Some(Naming::DataSource),
                ..Default::default()
            },
        );

        assert_eq!(settings.data_dir, Utf8PathBuf::from("/elsewhere"));
        assert_eq!(settings.output_naming, OutputNaming::DataSource);
    }

    #[test]
    fn test_merge_config_naming_used_when_cli_absent() {
        let config = parse_config("[output]\nnaming = \"spec\"\n").unwrap();
        let settings =
            ConfigMerger::new(config).merge_run_args(Utf8Path::new("."), RunOverrides::default());
        assert_eq!(settings.output_naming, OutputNaming::Spec);
    }

    #[test]
    fn test_discover_config_some_and_none() {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
        assert!(discover_config(&root).is_none());

        std::fs::write(root.join(CONFIG_FILE_NAME), "").expect("write config");
        assert!(discover_config(&root).is_some());
    }

    #[test]
    fn test_load_or_default_returns_default_when_missing() {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
        let cfg = load_or_default(&root).expect("load default");
        assert_eq!(cfg.paths.output, Utf8PathBuf::from("output"));
    }
}
