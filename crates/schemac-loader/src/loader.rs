//! Schema source loading

use crate::envelope::DocumentFormat;
use crate::manifest::Manifest;
use crate::reader::read_documents;
use crate::{LoaderError, Result};
use schemac_ir::{Document, SourceInfo};
use std::path::Path;
use tracing::{debug, info, trace};

/// Loads schema sources into documents
#[derive(Debug, Clone, Default)]
pub struct SchemaLoader {
    format: DocumentFormat,
}

impl SchemaLoader {
    /// Create a loader expecting enveloped model documents
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document format
    #[must_use]
    pub fn with_format(mut self, format: DocumentFormat) -> Self {
        self.format = format;
        self
    }

    /// Document format in use
    pub fn format(&self) -> DocumentFormat {
        self.format
    }

    /// Load a source given as a path or URI
    ///
    /// Directories are read through their manifest; anything else is read as a
    /// single YAML file.
    pub fn load(&self, source: &str) -> Result<Vec<Document>> {
        if source.starts_with("http://") || source.starts_with("https://") {
            return Err(LoaderError::RemoteUnsupported(source.to_string()));
        }
        self.load_path(Path::new(source))
    }

    /// Load a file or manifest directory
    pub fn load_path(&self, path: &Path) -> Result<Vec<Document>> {
        if path.is_dir() {
            return self.load_dir(path);
        }
        self.load_file(path)
    }

    /// Load in-memory text under a source name
    pub fn load_str(&self, name: &str, text: &str) -> Result<Vec<Document>> {
        let nodes = read_documents(name, text)?;
        trace!(source = name, documents = nodes.len(), "decoding documents");

        nodes
            .into_iter()
            .enumerate()
            .map(|(index, node)| {
                let source = SourceInfo::new(name, index).with_position(node.position);
                self.format.decode(node, source)
            })
            .collect()
    }

    fn load_file(&self, path: &Path) -> Result<Vec<Document>> {
        debug!("Loading schema file: {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_str(&path.display().to_string(), &content)
    }

    fn load_dir(&self, dir: &Path) -> Result<Vec<Document>> {
        let manifest = Manifest::load(dir)?;
        info!(
            "Loading {} resources from {:?}",
            manifest.resources.len(),
            dir
        );

        let mut documents = Vec::new();
        for path in manifest.resource_paths(dir) {
            documents.extend(self.load_file(&path)?);
        }
        Ok(documents)
    }
}
