//! Export command implementation

use super::load_model;
use crate::cli::error::CliError;
use crate::cli::output::format_export_summary;
use crate::delivery::FileSystemDelivery;
use crate::export::{ExportOptions, ExportService};
use std::path::{Path, PathBuf};
use tracing::info;

/// Where the generated artifact goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportTarget {
    Stdout,
    Directory(PathBuf),
}

#[derive(Debug, Clone)]
pub struct ExportArgs {
    pub model: String,
    pub dialect: String,
    pub target: ExportTarget,
    pub options: ExportOptions,
}

/// Load export options from a TOML file
pub fn load_options(path: &Path) -> Result<ExportOptions, CliError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| CliError::FileReadError(path.to_path_buf(), e.to_string()))?;
    ExportOptions::from_toml_str(&content)
        .map_err(|e| CliError::Config(path.to_path_buf(), e.to_string()))
}

/// Handle the export command
pub async fn handle_export(args: &ExportArgs) -> Result<(), CliError> {
    if !ExportService::is_supported(&args.dialect) {
        return Err(CliError::InvalidArgument(format!(
            "Unknown dialect: {} (see --list-dialects)",
            args.dialect
        )));
    }

    let model = load_model(&args.model)?;
    info!("Loaded {} table(s) from {}", model.tables.len(), args.model);

    let service = ExportService::new(args.options.clone());
    match &args.target {
        ExportTarget::Stdout => {
            let result = service.export(&model.tables, &args.dialect)?;
            print!("{}", result.content);
        }
        ExportTarget::Directory(dir) => {
            let delivery = FileSystemDelivery::new(dir);
            let (result, receipt) = service
                .export_and_deliver(&model.tables, &args.dialect, &delivery)
                .await?;
            print!("{}", format_export_summary(&result, &receipt));
        }
    }
    Ok(())
}
