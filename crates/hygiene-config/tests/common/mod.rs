//! Common test utilities for configuration tests.

#![allow(dead_code)]

use anyhow::Result;
use std::path::PathBuf;
use tempfile::TempDir;

pub const PHONE_RULES_TOML: &str = r#"
[registry]
duplicate_types = "reject"

[logging]
level = "debug"
use_ansi = false

[logging.targets]
hygiene_core = "trace"

[[rules.phone.steps]]
op = "replace"
pattern = "-"

[[rules.phone.steps]]
op = "trim"

[[rules.phone.steps]]
op = "prepend"
value = "1-"

[[rules.name.steps]]
op = "trim"

[[rules.name.steps]]
op = "upper"
"#;

/// Write `content` to a file named `name` inside a fresh temp directory.
///
/// Returns the temp directory (which must be kept alive) and the file path.
pub fn create_config_file(name: &str, content: &str) -> Result<(TempDir, PathBuf)> {
    let temp_dir = TempDir::new()?;
    let file_path = temp_dir.path().join(name);
    std::fs::write(&file_path, content)?;
    Ok((temp_dir, file_path))
}

#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    pub name: String,
    pub phone: String,
}

pub fn contact() -> Contact {
    Contact {
        name: " ada ".into(),
        phone: " 555-555-5555 ".into(),
    }
}
