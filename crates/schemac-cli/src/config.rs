//! Configuration file for the `schemac` binary

use anyhow::Context;
use schemac_linker::TypeMap;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Settings read from `--config`; command-line flags take precedence
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Output directory for generated sources
    pub out: Option<PathBuf>,

    /// Go package clause override
    pub package: Option<String>,

    /// Extra raw type mappings
    pub typemap: TypeMap,

    /// Import paths of extra support packages
    pub imports: BTreeMap<String, String>,
}

impl CliConfig {
    /// Read a YAML configuration file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_yaml(&content).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Parse YAML configuration text; empty text is the default configuration
    pub fn from_yaml(yaml: &str) -> anyhow::Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }
}
