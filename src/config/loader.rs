//! Configuration file loading.

use crate::config::schema::SetupConfig;
use crate::error::{ProvisionError, Result};
use serde_json::error::Category;
use std::fs;
use std::path::Path;

/// Default config file name, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Load and parse a config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the file is not valid JSON.
/// Returns `ConfigSchemaError` if the JSON does not match [`SetupConfig`].
pub fn load_config(path: &Path) -> Result<SetupConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ProvisionError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ProvisionError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse JSON content into a [`SetupConfig`].
///
/// # Arguments
///
/// * `content` - The JSON content to parse
/// * `source_path` - Path for error reporting
pub fn parse_config(content: &str, source_path: &Path) -> Result<SetupConfig> {
    serde_json::from_str(content).map_err(|e| match e.classify() {
        Category::Data => ProvisionError::ConfigSchemaError {
            path: source_path.to_path_buf(),
            message: e.to_string(),
        },
        Category::Syntax | Category::Eof | Category::Io => ProvisionError::ConfigParseError {
            path: source_path.to_path_buf(),
            message: e.to_string(),
        },
    })
}
