//! Configuration for hygiene pipelines.
//!
//! Loads a [`HygieneConfig`] from TOML, YAML or JSON. The config carries
//! registry options, logging setup and named string rule sets that can be
//! applied to any `PipelineBuilder<String>`.
//!
//! ```rust,ignore
//! use hygiene_config::ConfigLoader;
//!
//! let config = ConfigLoader::load_from_file("hygiene.toml").await?;
//! config.logging.init()?;
//!
//! let mut registry = config.registry_builder();
//! let phone_rules = config.rule_set("phone")?.clone();
//! registry.configure::<Contact, _>(|builder| {
//!     let phone = builder.property(PathExpression::root().field(field!(Contact, phone)))?;
//!     phone_rules.apply(&phone)
//! })?;
//! let registry = registry.build();
//! ```

pub mod config;
pub mod error;
pub mod loader;
pub mod logging;
pub mod rules;

pub use config::{HygieneConfig, RegistryConfig};
pub use error::{ConfigError, Result};
pub use loader::{ConfigFormat, ConfigLoader};
pub use logging::LoggingConfig;
pub use rules::{RuleSet, StringRule};
