//! Declarative string rules.
//!
//! A [`RuleSet`] is an ordered list of [`StringRule`]s read from
//! configuration. Applying it to a `PipelineBuilder<String>` appends the
//! matching pre-built transformations in the listed order.
//!
//! ```toml
//! [[rules.phone.steps]]
//! op = "replace"
//! pattern = "[^0-9]"
//!
//! [[rules.phone.steps]]
//! op = "prepend"
//! value = "1-"
//! ```

use hygiene_core::PipelineBuilder;
use hygiene_transforms::StringPipelineExt;
use serde::{Deserialize, Serialize};

fn default_fill() -> char {
    ' '
}

/// One string transformation, tagged by `op`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum StringRule {
    /// Trim both ends; `chars` lists the characters to strip (whitespace when empty).
    Trim {
        #[serde(default)]
        chars: String,
    },
    TrimStart {
        #[serde(default)]
        chars: String,
    },
    TrimEnd {
        #[serde(default)]
        chars: String,
    },
    Upper,
    Lower,
    /// Regex replacement of every match.
    Replace {
        pattern: String,
        #[serde(default)]
        replacement: String,
    },
    Append {
        value: String,
    },
    Prepend {
        value: String,
    },
    PadLeft {
        width: usize,
        #[serde(default = "default_fill")]
        fill: char,
    },
    PadRight {
        width: usize,
        #[serde(default = "default_fill")]
        fill: char,
    },
    Substring {
        start: usize,
        #[serde(default)]
        len: Option<usize>,
    },
    Remove {
        start: usize,
        #[serde(default)]
        count: Option<usize>,
    },
}

impl StringRule {
    /// Append this rule to `builder`.
    pub fn apply(&self, builder: &PipelineBuilder<String>) -> hygiene_core::Result<()> {
        match self {
            Self::Trim { chars } => {
                builder.trim_chars(&chars.chars().collect::<Vec<_>>());
            }
            Self::TrimStart { chars } => {
                builder.trim_start(&chars.chars().collect::<Vec<_>>());
            }
            Self::TrimEnd { chars } => {
                builder.trim_end(&chars.chars().collect::<Vec<_>>());
            }
            Self::Upper => {
                builder.to_upper();
            }
            Self::Lower => {
                builder.to_lower();
            }
            Self::Replace {
                pattern,
                replacement,
            } => {
                builder.replace(pattern, replacement)?;
            }
            Self::Append { value } => {
                builder.append(value);
            }
            Self::Prepend { value } => {
                builder.prepend(value);
            }
            Self::PadLeft { width, fill } => {
                builder.pad_left(*width, *fill);
            }
            Self::PadRight { width, fill } => {
                builder.pad_right(*width, *fill);
            }
            Self::Substring { start, len } => {
                builder.substring(*start, *len);
            }
            Self::Remove { start, count } => {
                builder.remove(*start, *count);
            }
        }
        Ok(())
    }
}

/// An ordered list of string rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RuleSet {
    pub steps: Vec<StringRule>,
}

impl RuleSet {
    /// Append every rule to `builder`, in order.
    ///
    /// Stops at the first rule that cannot be configured; rules before it
    /// stay registered.
    pub fn apply(&self, builder: &PipelineBuilder<String>) -> hygiene_core::Result<()> {
        for rule in &self.steps {
            rule.apply(builder)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hygiene_core::Sanitizer;

    fn sanitize(rules: &RuleSet, input: &str) -> String {
        let builder = PipelineBuilder::new();
        rules.apply(&builder).unwrap();

        let mut value = input.to_string();
        Sanitizer::from_mutator(builder.build())
            .sanitize(&mut value)
            .unwrap();
        value
    }

    #[test]
    fn test_rules_deserialize_by_op() {
        let rules: RuleSet = serde_json::from_str(
            r#"{"steps": [
                {"op": "trim", "chars": "-"},
                {"op": "upper"},
                {"op": "pad_left", "width": 9, "fill": "*"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(
            rules.steps,
            vec![
                StringRule::Trim { chars: "-".into() },
                StringRule::Upper,
                StringRule::PadLeft {
                    width: 9,
                    fill: '*'
                },
            ]
        );
        assert_eq!(sanitize(&rules, "--success--"), "**SUCCESS");
    }

    #[test]
    fn test_defaults_for_optional_fields() {
        let rules: RuleSet = serde_json::from_str(
            r#"{"steps": [
                {"op": "trim"},
                {"op": "replace", "pattern": "\\s+"},
                {"op": "substring", "start": 1},
                {"op": "pad_right", "width": 6}
            ]}"#,
        )
        .unwrap();

        assert_eq!(sanitize(&rules, "  a b c  "), "bc    ");
    }

    #[test]
    fn test_remove_and_affixes() {
        let rules = RuleSet {
            steps: vec![
                StringRule::Remove {
                    start: 0,
                    count: Some(2),
                },
                StringRule::Append { value: ")".into() },
                StringRule::Prepend { value: "(".into() },
                StringRule::Lower,
            ],
        };
        assert_eq!(sanitize(&rules, "XXABC"), "(abc)");
    }

    #[test]
    fn test_bad_pattern_is_a_configuration_error() {
        let rules = RuleSet {
            steps: vec![
                StringRule::Upper,
                StringRule::Replace {
                    pattern: "(".into(),
                    replacement: String::new(),
                },
            ],
        };

        let builder = PipelineBuilder::new();
        let err = rules.apply(&builder).unwrap_err();
        assert!(matches!(err, hygiene_core::Error::InvalidSettings(_)));
        assert_eq!(builder.transform_count(), 1);
    }
}
