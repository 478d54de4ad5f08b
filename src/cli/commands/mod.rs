//! CLI command implementations

pub mod export;
pub mod validate;

use crate::cli::error::CliError;
use crate::models::DataModel;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Load input content from file or stdin
pub(crate) fn load_input(input: &str) -> Result<String, CliError> {
    if input == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map_err(|e| CliError::InvalidArgument(format!("Failed to read stdin: {}", e)))?;
        Ok(content)
    } else {
        let path = PathBuf::from(input);
        std::fs::read_to_string(&path).map_err(|e| CliError::FileReadError(path, e.to_string()))
    }
}

/// Parse a model document; `.yaml`/`.yml` files are YAML, everything else JSON
pub fn parse_model(input: &str, content: &str) -> Result<DataModel, CliError> {
    let is_yaml = Path::new(input)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    let model = if is_yaml {
        DataModel::from_yaml(content)?
    } else {
        DataModel::from_json(content)?
    };
    Ok(model)
}

/// Read and parse a model file (`-` reads JSON from stdin)
pub fn load_model(input: &str) -> Result<DataModel, CliError> {
    let content = load_input(input)?;
    parse_model(input, &content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_by_extension() {
        let yaml = "tables:\n  - name: users\n    columns:\n      - name: id\n        type: INT\n";
        let model = parse_model("model.YML", yaml).unwrap();
        assert_eq!(model.tables[0].name, "users");

        assert!(matches!(
            parse_model("model.json", yaml),
            Err(CliError::Model(_))
        ));
    }
}
