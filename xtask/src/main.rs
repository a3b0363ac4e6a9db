use anyhow::Context;
use clap::{Parser, Subcommand};
use fs_err as fs;
use std::path::Path;
use std::process::Command as ProcessCommand;

#[derive(Debug, Parser)]
#[command(name = "xtask", about = "Workspace helper tasks")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print schema identifiers used by fwconv.
    PrintSchemas,
    /// Scaffold a golden fixture (tests/fixtures/<name>/{specs,data,expected}).
    InitFixture {
        name: String,
        #[arg(long, default_value = "tests/fixtures")]
        dir: String,
    },
    /// Bless golden fixtures (overwrite expected outputs).
    BlessFixtures,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::PrintSchemas => {
            println!("{}", fwconv_types::schema_id::FWCONV_RUN_V1);
        }
        Command::InitFixture { name, dir } => {
            let root = Path::new(&dir).join(&name);
            if root.exists() {
                anyhow::bail!("fixture {} already exists", root.display());
            }
            for sub in ["specs", "data", "expected"] {
                fs::create_dir_all(root.join(sub))
                    .with_context(|| format!("create {dir}/{name}/{sub}"))?;
            }
            fs::write(
                root.join("specs").join(format!("{name}.csv")),
                format!("{}\n", fwconv_spec::SPEC_HEADER),
            )?;
            println!("initialized {dir}/{name}/{{specs,data,expected}}");
        }
        Command::BlessFixtures => {
            let status = ProcessCommand::new("cargo")
                .args(["test", "-p", "fwconv-core", "--test", "golden_fixtures"])
                .env("FWCONV_BLESS", "1")
                .status()
                .context("run golden fixture blessing")?;
            if !status.success() {
                anyhow::bail!("bless-fixtures failed");
            }
        }
    }
    Ok(())
}
