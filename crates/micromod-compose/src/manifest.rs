//! Loading preparation inputs from JSON or YAML manifests.

use std::path::Path;

use micromod_common::error::{MicromodError, Result};

use crate::prepare::PrepareInput;

/// Manifest encodings recognised by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    /// `.json`
    Json,
    /// `.yaml` or `.yml`
    Yaml,
}

impl ManifestFormat {
    /// Detects the format from a file extension.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for any other extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            _ => Err(MicromodError::Config {
                message: format!(
                    "unsupported manifest extension: {} (expected .json, .yaml or .yml)",
                    path.display()
                ),
            }),
        }
    }

    /// Parses `content` in this format.
    ///
    /// # Errors
    ///
    /// Returns an error if `content` is malformed.
    pub fn parse<T: serde::de::DeserializeOwned>(self, content: &str) -> Result<T> {
        match self {
            Self::Json => Ok(serde_json::from_str(content)?),
            Self::Yaml => Ok(serde_yaml::from_str(content)?),
        }
    }
}

/// Parses a JSON manifest.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or does not match the schema.
pub fn parse_input_json(content: &str) -> Result<PrepareInput> {
    ManifestFormat::Json.parse(content)
}

/// Parses a YAML manifest.
///
/// # Errors
///
/// Returns an error if the YAML is malformed or does not match the schema.
pub fn parse_input_yaml(content: &str) -> Result<PrepareInput> {
    ManifestFormat::Yaml.parse(content)
}

/// Reads and parses a manifest file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, has an unknown extension, or
/// fails to parse.
pub fn load_input(path: &Path) -> Result<PrepareInput> {
    tracing::info!(path = %path.display(), "loading manifest");
    let format = ManifestFormat::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|e| MicromodError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    format.parse(&content)
}
