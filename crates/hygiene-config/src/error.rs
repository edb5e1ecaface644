//! Error types for configuration loading.

use thiserror::Error;

/// Errors that can occur while loading or applying configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// I/O error while reading a configuration file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The file extension does not name a supported format.
    #[error("Unsupported configuration format: {0}")]
    UnsupportedFormat(String),

    /// No rule set with this name is configured.
    #[error("Unknown rule set '{0}'")]
    UnknownRuleSet(String),

    /// The tracing subscriber could not be installed.
    #[error("Logging initialization failed: {0}")]
    Logging(String),

    /// Applying rules to a pipeline failed.
    #[error(transparent)]
    Pipeline(#[from] hygiene_core::Error),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
