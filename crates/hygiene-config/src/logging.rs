//! Logging setup.
//!
//! Pipelines log through `tracing`: `debug` when fields, types and pipelines
//! are registered or compiled, `trace` for every executed step. This module
//! installs a `fmt` subscriber filtered by [`LoggingConfig`].

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing_subscriber::EnvFilter;

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level for every target
    pub level: String,
    /// Per-target levels, e.g. `hygiene_core = "trace"`
    pub targets: BTreeMap<String, String>,
    /// Whether to include the event target
    pub include_target: bool,
    /// Whether to use ANSI colors
    pub use_ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            targets: BTreeMap::new(),
            include_target: true,
            use_ansi: true,
        }
    }
}

impl LoggingConfig {
    /// Filter directives, default level first.
    pub fn filter_string(&self) -> String {
        let mut filter = self.level.clone();
        for (target, level) in &self.targets {
            filter.push_str(&format!(",{}={}", target, level));
        }
        filter
    }

    /// Parse the directives into an [`EnvFilter`].
    pub fn env_filter(&self) -> Result<EnvFilter> {
        EnvFilter::try_new(self.filter_string()).map_err(|e| ConfigError::Logging(e.to_string()))
    }

    /// Install a global `fmt` subscriber.
    ///
    /// Fails if the directives do not parse or a global subscriber is
    /// already set.
    pub fn init(&self) -> Result<()> {
        tracing_subscriber::fmt()
            .with_env_filter(self.env_filter()?)
            .with_target(self.include_target)
            .with_ansi(self.use_ansi)
            .try_init()
            .map_err(|e| ConfigError::Logging(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_string_lists_targets_after_default() {
        let mut config = LoggingConfig {
            level: "warn".into(),
            ..Default::default()
        };
        config.targets.insert("hygiene_core".into(), "trace".into());
        config.targets.insert("hygiene_config".into(), "debug".into());

        assert_eq!(
            config.filter_string(),
            "warn,hygiene_config=debug,hygiene_core=trace"
        );
        assert!(config.env_filter().is_ok());
    }

    #[test]
    fn test_invalid_directive_is_reported() {
        let config = LoggingConfig {
            level: "hygiene_core=loud".into(),
            ..Default::default()
        };

        assert!(matches!(config.env_filter(), Err(ConfigError::Logging(_))));
    }

    #[test]
    fn test_second_init_fails() {
        let config = LoggingConfig {
            use_ansi: false,
            ..Default::default()
        };

        // Another test may already have installed a subscriber.
        let _ = config.init();
        assert!(matches!(config.init(), Err(ConfigError::Logging(_))));
    }
}
