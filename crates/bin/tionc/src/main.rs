use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tion_app::schema;
use tionc::config::{self, Config};
use tionc::dispatch::{compile_document, validate_only};
use tionc::report::Report;

/// Compile tion breezer configuration into an object graph.
#[derive(Parser, Debug)]
#[command(name = "tionc")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Action to perform.
    #[command(subcommand)]
    command: Command,

    /// Tool configuration file.
    #[arg(long, global = true, default_value = config::DEFAULT_PATH)]
    config: PathBuf,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Compile every device block of a document and print the graphs.
    Compile {
        /// YAML document to compile.
        file: PathBuf,
        /// Pretty-print the JSON report.
        #[arg(long)]
        pretty: bool,
    },
    /// Validate every device block of a document without compiling.
    Validate {
        /// YAML document to validate.
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<bool> {
    let args = Args::parse();
    let config = Config::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(config.env_filter()?)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let (report, pretty) = match args.command {
        Command::Compile { file, pretty } => {
            let tree = read_document(&file)?;
            (compile_document(&tree)?, pretty || config.output.pretty)
        }
        Command::Validate { file } => {
            let tree = read_document(&file)?;
            (validate_only(&tree)?, config.output.pretty)
        }
    };

    print_report(&report, pretty)?;
    if !report.is_success() {
        tracing::error!(failed = report.failed(), "some device blocks failed");
    }
    Ok(report.is_success())
}

fn read_document(path: &Path) -> Result<serde_yaml::Value> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let tree = schema::parse(&text).with_context(|| format!("parsing {}", path.display()))?;
    tracing::debug!(path = %path.display(), "document loaded");
    Ok(tree)
}

fn print_report(report: &Report, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    };
    println!("{json}");
    Ok(())
}
