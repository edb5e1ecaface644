//! Reading configuration from TOML, YAML or JSON.

use crate::config::HygieneConfig;
use crate::error::{ConfigError, Result};
use std::path::Path;
use tracing::debug;

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Infer the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("toml") => Ok(Self::Toml),
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Loads [`HygieneConfig`] values.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Parse configuration text in the given format.
    pub fn load_from_str(content: &str, format: ConfigFormat) -> Result<HygieneConfig> {
        let config = match format {
            ConfigFormat::Toml => toml::from_str(content)?,
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
            ConfigFormat::Json => serde_json::from_str(content)?,
        };
        Ok(config)
    }

    /// Read and parse a configuration file; the format follows the extension.
    pub async fn load_from_file(path: impl AsRef<Path>) -> Result<HygieneConfig> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let content = tokio::fs::read_to_string(path).await?;
        let config = Self::load_from_str(&content, format)?;

        debug!(
            path = %path.display(),
            format = ?format,
            rule_sets = config.rules.len(),
            "Loaded hygiene configuration"
        );
        Ok(config)
    }
}
