//! Input document formats

use serde::de::DeserializeOwned;
use std::path::Path;

use crate::error::{ImportError, ImportResult};

/// Serialization format of an input document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Pick the format from a file extension; anything other than `.json`
    /// is read as YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DocumentFormat::Json,
            _ => DocumentFormat::Yaml,
        }
    }

    pub fn parse<T: DeserializeOwned>(&self, content: &str) -> ImportResult<T> {
        match self {
            DocumentFormat::Json => Ok(serde_json::from_str(content)?),
            DocumentFormat::Yaml => Ok(serde_yaml::from_str(content)?),
        }
    }
}

/// Read and parse a document, choosing the format from the extension
pub fn load<T: DeserializeOwned>(path: &Path) -> ImportResult<T> {
    let content = std::fs::read_to_string(path)?;
    DocumentFormat::from_path(path)
        .parse(&content)
        .map_err(|e| ImportError::InvalidDescriptor(format!("{}: {}", path.display(), e)))
}
