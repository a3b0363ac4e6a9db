use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Utc;
use clap::{Parser, Subcommand};
use fs_err as fs;
use fwconv_cli::config::{self, ConfigMerger, Naming, RunOverrides};
use fwconv_cli::inspect::SchemaView;
use fwconv_core::{RunOutcome, Validation};
use fwconv_spec::SPEC_HEADER;
use fwconv_types::report::ToolInfo;
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "fwconv",
    version,
    about = "Convert fixed-width data files to NDJSON using CSV column specifications."
)]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG).
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Convert every data file governed by a valid specification.
    Run(RunArgs),
    /// Create the specs, data and output directories.
    Init(InitArgs),
    /// Validate one specification and print its field layout.
    Schema(SchemaArgs),
}

#[derive(Debug, Parser)]
struct RunArgs {
    /// Base directory holding fwconv.toml and the default layout.
    #[arg(long, default_value = ".")]
    base_dir: Utf8PathBuf,

    /// Specifications directory (default: <base_dir>/specs).
    #[arg(long)]
    specs_dir: Option<Utf8PathBuf>,

    /// Data directory (default: <base_dir>/data).
    #[arg(long)]
    data_dir: Option<Utf8PathBuf>,

    /// Output directory (default: <base_dir>/output).
    #[arg(long)]
    output_dir: Option<Utf8PathBuf>,

    /// How output files are named.
    #[arg(long, value_enum)]
    output_naming: Option<Naming>,

    /// Write a JSON run report to this path.
    #[arg(long)]
    report: Option<Utf8PathBuf>,
}

#[derive(Debug, Parser)]
struct InitArgs {
    /// Base directory to create the layout in.
    #[arg(long, default_value = ".")]
    base_dir: Utf8PathBuf,
}

#[derive(Debug, Parser)]
struct SchemaArgs {
    /// Specification file to inspect.
    spec_file: Utf8PathBuf,

    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match real_main(cli) {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::from(1)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn real_main(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.cmd {
        Command::Run(args) => cmd_run(args),
        Command::Init(args) => cmd_init(args),
        Command::Schema(args) => cmd_schema(args),
    }
}

fn cmd_run(args: RunArgs) -> anyhow::Result<ExitCode> {
    // Load config file and merge with CLI arguments
    let file_config =
        config::load_or_default(&args.base_dir).context("load fwconv.toml config")?;
    let settings = ConfigMerger::new(file_config).merge_run_args(
        &args.base_dir,
        RunOverrides {
            specs_dir: args.specs_dir,
            data_dir: args.data_dir,
            output_dir: args.output_dir,
            naming: args.output_naming,
        },
    );

    debug!(
        "merged config: specs={}, data={}, output={}, naming={}",
        settings.specs_dir,
        settings.data_dir,
        settings.output_dir,
        settings.output_naming.as_str()
    );

    let started_at = Utc::now();
    let outcome = fwconv_core::run_in_dirs(&settings).context("convert")?;
    let ended_at = Utc::now();

    if let Some(path) = &args.report {
        let report = outcome.to_report(tool_info(), started_at, ended_at);
        write_json(path, &report)?;
        info!("wrote report to {}", path);
    }

    print_summary(&outcome);
    Ok(exit_code(&outcome))
}

fn print_summary(outcome: &RunOutcome) {
    for o in &outcome.outputs {
        println!("{} -> {} ({} records)", o.data_source, o.output, o.records);
    }
    println!(
        "{} output(s), {} record(s), {} spec(s) skipped, {} failure(s)",
        outcome.outputs.len(),
        outcome.records_written(),
        outcome.skipped.len(),
        outcome.failures.len()
    );
}

fn exit_code(outcome: &RunOutcome) -> ExitCode {
    match u8::try_from(outcome.exit_code()) {
        Ok(code) => ExitCode::from(code),
        Err(_) => ExitCode::FAILURE,
    }
}

fn cmd_init(args: InitArgs) -> anyhow::Result<ExitCode> {
    let file_config =
        config::load_or_default(&args.base_dir).context("load fwconv.toml config")?;
    let settings =
        ConfigMerger::new(file_config).merge_run_args(&args.base_dir, RunOverrides::default());

    let created = settings.ensure_dirs()?;
    debug!("created {} director(ies)", created.len());

    for dir in settings.dirs() {
        println!("{}", dir);
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_schema(args: SchemaArgs) -> anyhow::Result<ExitCode> {
    let path = args.spec_file;
    let name = path
        .file_name()
        .with_context(|| format!("{} is not a file path", path))?;
    let dir = path.parent().unwrap_or(Utf8Path::new("."));

    match fwconv_spec::validate_spec(dir, name)? {
        Validation::Valid => {}
        Validation::WrongExtension => {
            anyhow::bail!("{}: not a .csv specification", path);
        }
        Validation::BadHeader { found } => {
            anyhow::bail!(
                "{}: expected header '{}', found '{}'",
                path,
                SPEC_HEADER,
                found
            );
        }
    }

    let schema = fwconv_spec::load_spec(dir, name)?;
    let view = SchemaView::new(name, &schema);

    match args.format {
        OutputFormat::Text => print!("{}", view.render_text()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
    }

    let mut code = ExitCode::SUCCESS;
    for f in view.invalid_widths() {
        error!("field '{}' has invalid width '{}'", f.name, f.declared_width);
        code = ExitCode::from(2);
    }
    Ok(code)
}

fn write_json<T: serde::Serialize>(path: &Utf8Path, v: &T) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(v).context("serialize json")?;
    fs::write(path, s).with_context(|| format!("write {}", path))?;
    Ok(())
}

fn tool_info() -> ToolInfo {
    ToolInfo {
        name: "fwconv".to_string(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
    }
}
