//! Document representation handed from the loader to the parser
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]

use crate::metadata::SourceInfo;
use crate::node::Node;
use serde::{Deserialize, Serialize};

/// One schema document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Schema body; `None` for a blank document
    pub root: Option<Node>,

    /// Document-level metadata
    pub metadata: DocumentMetadata,
}

/// Metadata associated with a document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Primary-table name declared by the document
    pub table: Option<String>,

    /// Envelope version (e.g. `v1`)
    pub version: Option<String>,

    /// Envelope kind (e.g. `Model`)
    pub kind: Option<String>,

    /// Where the document came from
    pub source: Option<SourceInfo>,
}

impl Document {
    /// Create a new document with the given body
    pub fn new(root: Node) -> Self {
        Self {
            root: Some(root),
            metadata: DocumentMetadata::default(),
        }
    }

    /// Create a blank document
    pub fn blank() -> Self {
        Self {
            root: None,
            metadata: DocumentMetadata::default(),
        }
    }

    /// Create a new document with metadata
    pub fn with_metadata(root: Option<Node>, metadata: DocumentMetadata) -> Self {
        Self { root, metadata }
    }

    /// Declare the primary-table name
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.metadata.table = Some(table.into());
        self
    }

    /// Attach source information
    pub fn with_source(mut self, source: SourceInfo) -> Self {
        self.metadata.source = Some(source);
        self
    }

    /// True when the body is absent or null
    pub fn is_blank(&self) -> bool {
        self.root.as_ref().is_none_or(Node::is_null)
    }

    /// Primary-table name, if declared
    pub fn table(&self) -> Option<&str> {
        self.metadata.table.as_deref()
    }
}
