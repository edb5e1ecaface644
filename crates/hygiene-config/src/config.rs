//! Top-level configuration.

use crate::error::{ConfigError, Result};
use crate::logging::LoggingConfig;
use crate::rules::RuleSet;
use hygiene_core::{DuplicatePolicy, PipelineBuilder, Sanitizer, SanitizerRegistryBuilder};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Registry options
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RegistryConfig {
    /// What happens when a type is configured twice
    pub duplicate_types: DuplicatePolicy,
}

/// Configuration for hygiene pipelines. Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HygieneConfig {
    pub registry: RegistryConfig,
    pub logging: LoggingConfig,
    /// Named string rule sets
    pub rules: BTreeMap<String, RuleSet>,
}

impl HygieneConfig {
    /// A registry builder honouring the configured duplicate policy.
    pub fn registry_builder(&self) -> SanitizerRegistryBuilder {
        SanitizerRegistryBuilder::new().with_duplicate_policy(self.registry.duplicate_types)
    }

    /// Look up a rule set by name.
    pub fn rule_set(&self, name: &str) -> Result<&RuleSet> {
        self.rules
            .get(name)
            .ok_or_else(|| ConfigError::UnknownRuleSet(name.to_string()))
    }

    /// Append the named rule set to `builder`.
    pub fn apply_rules(&self, name: &str, builder: &PipelineBuilder<String>) -> Result<()> {
        self.rule_set(name)?.apply(builder)?;
        Ok(())
    }

    /// A string sanitizer running only the named rule set.
    pub fn string_sanitizer(&self, name: &str) -> Result<Sanitizer<String>> {
        let builder = PipelineBuilder::new();
        self.apply_rules(name, &builder)?;
        Ok(Sanitizer::from_mutator(builder.build()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::StringRule;

    fn config() -> HygieneConfig {
        let mut config = HygieneConfig::default();
        config.rules.insert(
            "slug".into(),
            RuleSet {
                steps: vec![
                    StringRule::Trim {
                        chars: String::new(),
                    },
                    StringRule::Lower,
                    StringRule::Replace {
                        pattern: r"\s+".into(),
                        replacement: "-".into(),
                    },
                ],
            },
        );
        config
    }

    #[test]
    fn test_defaults() {
        let config = HygieneConfig::default();
        assert_eq!(config.registry.duplicate_types, DuplicatePolicy::Reject);
        assert_eq!(config.logging.level, "info");
        assert!(config.rules.is_empty());
    }

    #[test]
    fn test_string_sanitizer_from_rule_set() {
        let sanitizer = config().string_sanitizer("slug").unwrap();

        let mut value = String::from("  Hello Big World ");
        sanitizer.sanitize(&mut value).unwrap();
        assert_eq!(value, "hello-big-world");
    }

    #[test]
    fn test_unknown_rule_set() {
        let err = config().string_sanitizer("missing").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownRuleSet(name) if name == "missing"));
    }

    #[test]
    fn test_registry_builder_uses_policy() {
        let mut config = config();
        config.registry.duplicate_types = DuplicatePolicy::Replace;

        let mut builder = config.registry_builder();
        builder.configure_with::<u8, _>(|n| *n = 1).unwrap();
        builder.configure_with::<u8, _>(|n| *n = 2).unwrap();

        let mut value = 0;
        builder
            .build()
            .sanitizer::<u8>()
            .unwrap()
            .sanitize(&mut value)
            .unwrap();
        assert_eq!(value, 2);
    }
}
