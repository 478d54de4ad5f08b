//! schema-export CLI - Export entity-relationship models to DDL and MongoDB scripts.

use clap::Parser;
use erd_schema_export::cli::CliError;
use erd_schema_export::cli::commands::export::{ExportArgs, ExportTarget, handle_export, load_options};
use erd_schema_export::cli::commands::validate::handle_validate;
use erd_schema_export::cli::output::format_dialect_list;
use erd_schema_export::export::{ExportOptions, ExportService};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schema-export")]
#[command(about = "Export entity-relationship models to database schema scripts")]
#[command(version)]
struct Cli {
    /// Model file (JSON, or YAML with a .yaml/.yml extension); `-` reads JSON from stdin
    #[arg(short, long, required_unless_present = "list_dialects")]
    model: Option<String>,

    /// Target dialect (PostgreSQL, MySQL, SQLite, Oracle, SQL Server, MongoDB)
    #[arg(short, long, required_unless_present_any = ["list_dialects", "validate_only"])]
    dialect: Option<String>,

    /// Directory receiving the generated file
    #[arg(short, long, default_value = ".", conflicts_with = "stdout")]
    output_dir: PathBuf,

    /// Print the generated script instead of writing a file
    #[arg(long)]
    stdout: bool,

    /// Fail when a foreign key points at a table that is not exported
    #[arg(long)]
    strict_references: bool,

    /// Export options file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Only print model diagnostics
    #[arg(long)]
    validate_only: bool,

    /// List the supported dialects and exit
    #[arg(long)]
    list_dialects: bool,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    if cli.list_dialects {
        print!("{}", format_dialect_list(ExportService::supported_dialects()));
        return Ok(());
    }

    let model = cli
        .model
        .ok_or_else(|| CliError::InvalidArgument("--model is required".to_string()))?;

    if cli.validate_only {
        handle_validate(&model)?;
        return Ok(());
    }

    let dialect = cli
        .dialect
        .ok_or_else(|| CliError::InvalidArgument("--dialect is required".to_string()))?;

    let mut options = match &cli.config {
        Some(path) => load_options(path)?,
        None => ExportOptions::default(),
    };
    if cli.strict_references {
        options = options.with_strict_references(true);
    }

    let target = if cli.stdout {
        ExportTarget::Stdout
    } else {
        ExportTarget::Directory(cli.output_dir)
    };

    handle_export(&ExportArgs {
        model,
        dialect,
        target,
        options,
    })
    .await
}
