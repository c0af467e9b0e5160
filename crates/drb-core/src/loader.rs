use std::path::Path;

use crate::error::{DrbError, DrbResult};
use crate::value::{ConfigTree, Value};

/// Textual formats a game file can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON (`.json`).
    Json,
    /// TOML (`.toml`).
    Toml,
    /// YAML (`.yaml`, `.yml`).
    Yaml,
}

impl ConfigFormat {
    /// Pick a format from a file's extension.
    pub fn from_path(path: &Path) -> DrbResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        match ext.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "toml" => Ok(Self::Toml),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(DrbError::UnsupportedFormat(ext.to_string())),
        }
    }
}

/// Parse a game file's contents into a config tree.
///
/// The top level must be a mapping.
pub fn parse_config(source: &str, format: ConfigFormat) -> DrbResult<ConfigTree> {
    let value: Value = match format {
        ConfigFormat::Json => serde_json::from_str(source)?,
        ConfigFormat::Toml => toml::from_str(source)?,
        ConfigFormat::Yaml => serde_yaml::from_str(source)?,
    };
    match value {
        Value::Map(tree) => Ok(tree),
        _ => Err(DrbError::NotAMapping {
            path: String::new(),
        }),
    }
}

/// Read and parse a game file, choosing the format by extension.
pub fn load_config(path: &Path) -> DrbResult<ConfigTree> {
    let format = ConfigFormat::from_path(path)?;
    let source = std::fs::read_to_string(path).map_err(|source| DrbError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let tree = parse_config(&source, format)?;
    tracing::debug!(path = %path.display(), keys = tree.len(), "loaded game file");
    Ok(tree)
}
