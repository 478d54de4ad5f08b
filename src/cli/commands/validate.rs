//! Validate command implementation

use super::load_model;
use crate::cli::error::CliError;
use crate::cli::output::format_validation_report;
use crate::validation::{ValidationReport, validate_model};

/// Handle the validate command: print the model diagnostics
pub fn handle_validate(input: &str) -> Result<ValidationReport, CliError> {
    let model = load_model(input)?;
    let report = validate_model(&model.tables);
    print!("{}", format_validation_report(&report));
    Ok(report)
}
