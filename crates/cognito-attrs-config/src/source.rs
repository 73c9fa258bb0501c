//! Reading service definitions from disk.

use std::path::Path;

use tracing::debug;

use crate::definition::ServiceDefinition;
use crate::settings::ServiceSettings;
use crate::{ConfigError, Result};

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "cognito-attrs.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Toml,
    Json,
}

impl Format {
    /// Picks the format from the file extension; TOML unless it is `.json`.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Toml,
        }
    }
}

/// Parses a service definition without validating it.
pub fn parse(content: &str, format: Format) -> Result<ServiceDefinition> {
    match format {
        Format::Toml => toml::from_str(content).map_err(|e| ConfigError::parse(e.to_string())),
        Format::Json => {
            serde_json::from_str(content).map_err(|e| ConfigError::parse(e.to_string()))
        }
    }
}

/// Reads, parses and validates the service definition at `path`.
pub fn load(path: &Path) -> Result<ServiceSettings> {
    debug!(path = %path.display(), "Loading service definition");
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let definition = parse(&content, Format::from_path(path))?;
    ServiceSettings::try_from(definition)
}
