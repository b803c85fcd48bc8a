use log::debug;
use serde_json::{Map, Value};
use std::path::Path;

use crate::errors::{ExtractError, Result};
use crate::file_utils::FileManager;
use crate::projection::StyleOverride;

use super::{ColumnSpec, RuleColumn};

// @module: Rule file loading

/// Read and validate a rule file.
///
/// A missing, unreadable or empty file is a configuration error, as is
/// anything that is not a JSON object with a non-empty `columns` array.
pub fn load_column_spec<P: AsRef<Path>>(path: P) -> Result<ColumnSpec> {
    let path = path.as_ref();
    let content = FileManager::read_to_string(path)
        .map_err(|e| ExtractError::Config(format!("Error reading format file {:?}: {}", path, e)))?;

    let spec = parse_column_spec(&content)
        .map_err(|e| ExtractError::Config(format!("Error reading format file {:?}: {}", path, e)))?;

    debug!("Loaded {} column definitions from {:?}", spec.columns.len(), path);
    Ok(spec)
}

/// Parse rule file content
pub fn parse_column_spec(content: &str) -> Result<ColumnSpec> {
    if content.trim().is_empty() {
        return Err(ExtractError::Config("file is empty".to_string()));
    }

    let value: Value = serde_json::from_str(content)
        .map_err(|e| ExtractError::Config(format!("invalid JSON: {}", e)))?;

    match &value {
        Value::Object(members) if !members.is_empty() => {
            if let Some(columns) = members.get("columns") {
                check_columns(columns)?;
            }
        }
        _ => return Err(ExtractError::Config("expected a non-empty JSON object".to_string())),
    }

    let spec: ColumnSpec = serde_json::from_value(value)
        .map_err(|e| ExtractError::Config(format!("invalid column definitions: {}", e)))?;
    spec.validate()?;
    Ok(spec)
}

// @checks: Each column entry on its own, naming the column and field at fault
fn check_columns(columns: &Value) -> Result<()> {
    let Value::Array(entries) = columns else {
        return Err(ExtractError::Config(format!("`columns` must be an array, found {}", columns)));
    };
    for (index, entry) in entries.iter().enumerate() {
        let position = index + 1;
        match entry {
            Value::String(_) => {}
            Value::Object(fields) => {
                for (name, field) in fields {
                    match (name.as_str(), field) {
                        ("style", Value::Object(style)) => {
                            for (style_name, style_field) in style {
                                check_field::<StyleOverride>(style_name, style_field).map_err(|e| {
                                    ExtractError::Config(format!("column {}: invalid `style.{}`: {}", position, style_name, e))
                                })?;
                            }
                        }
                        _ => check_field::<RuleColumn>(name, field).map_err(|e| {
                            ExtractError::Config(format!("column {}: invalid `{}`: {}", position, name, e))
                        })?,
                    }
                }
            }
            other => {
                return Err(ExtractError::Config(format!(
                    "column {}: expected a key string or a column object, found {}",
                    position, other
                )));
            }
        }
    }
    Ok(())
}

fn check_field<T: serde::de::DeserializeOwned>(name: &str, field: &Value) -> serde_json::Result<()> {
    let mut single = Map::new();
    single.insert(name.to_string(), field.clone());
    serde_json::from_value::<T>(Value::Object(single)).map(drop)
}
