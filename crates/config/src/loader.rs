use crate::{ConfigBlock, ConfigError, Result};
use std::fs;
use std::path::Path;

/// Load an ordered list of config blocks from a file.
/// The format is detected from the file extension.
#[tracing::instrument(fields(path = %path.display()))]
pub fn from_file(path: &Path) -> Result<Vec<ConfigBlock>> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");
    tracing::debug!(extension, "Detecting config format");
    let blocks = match extension {
        "yml" | "yaml" => parse_yaml(&contents, path)?,
        "json" => parse_json(&contents, path)?,
        _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    };
    tracing::info!(blocks = blocks.len(), "Config loaded");
    Ok(blocks)
}

/// Parse config blocks from a YAML document (a sequence of blocks).
pub fn from_yaml_str(contents: &str) -> Result<Vec<ConfigBlock>> {
    serde_yaml::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: "<yaml>".into(),
        message: format!("YAML parse error: {e}"),
    })
}

/// Parse config blocks from a JSON array.
pub fn from_json_str(contents: &str) -> Result<Vec<ConfigBlock>> {
    serde_json::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: "<json>".into(),
        message: format!("JSON parse error: {e}"),
    })
}

fn parse_yaml(contents: &str, path: &Path) -> Result<Vec<ConfigBlock>> {
    serde_yaml::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("YAML parse error: {e}"),
    })
}

fn parse_json(contents: &str, path: &Path) -> Result<Vec<ConfigBlock>> {
    serde_json::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("JSON parse error: {e}"),
    })
}
