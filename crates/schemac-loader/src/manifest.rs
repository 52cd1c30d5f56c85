//! Resource manifest of a schema directory

use crate::envelope::VERSION;
use crate::{LoaderError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::trace;

/// File name of the manifest inside a schema directory
pub const MANIFEST_FILE: &str = "schemac.yaml";

/// Resource kind of a manifest
pub const MANIFEST_KIND: &str = "Manifest";

/// List of model files making up one schema batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub version: String,

    #[serde(default)]
    pub kind: String,

    /// Resource paths relative to the manifest directory, in load order
    #[serde(default)]
    pub resources: Vec<String>,
}

impl Manifest {
    /// Parse and validate manifest text; `path` is used for error reporting
    pub fn from_yaml(path: &Path, yaml: &str) -> Result<Self> {
        let manifest: Manifest = serde_yaml::from_str(yaml).map_err(|e| LoaderError::Manifest {
            path: path.to_path_buf(),
            message: format!("YAML parse error: {e}"),
        })?;

        if manifest.version != VERSION {
            return Err(LoaderError::UnknownVersion {
                source_name: path.display().to_string(),
                version: manifest.version,
            });
        }
        if manifest.kind != MANIFEST_KIND {
            return Err(LoaderError::UnknownKind {
                source_name: path.display().to_string(),
                kind: manifest.kind,
            });
        }
        Ok(manifest)
    }

    /// Read the manifest of a schema directory
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(MANIFEST_FILE);
        trace!("Loading manifest: {:?}", path);
        let content = std::fs::read_to_string(&path).map_err(|source| LoaderError::Io {
            path: path.clone(),
            source,
        })?;
        Self::from_yaml(&path, &content)
    }

    /// Resource paths resolved against `dir`
    pub fn resource_paths(&self, dir: &Path) -> Vec<PathBuf> {
        self.resources.iter().map(|resource| dir.join(resource)).collect()
    }
}
