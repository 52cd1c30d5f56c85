//! Node types for the document tree
//!
//! A document is kept as an ordered tree of mappings, sequences, and scalars.
//! Mapping entries are a list rather than a map so that repeated keys reach
//! the parser, which reports them.

use crate::metadata::Position;
use serde::{Deserialize, Serialize};

/// A node in the document tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Node content
    pub kind: NodeKind,

    /// Comment lines directly above the node, markers included
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub head_comment: String,

    /// Trailing comment on the node's line, marker included
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub line_comment: String,

    /// Where the node starts in its source
    #[serde(default)]
    pub position: Position,
}

/// Shapes a node can take
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    /// Absent or explicit null (`~`, `null`, empty)
    Null,

    /// Scalar text
    Scalar(String),

    /// Ordered sequence
    Sequence(Vec<Node>),

    /// Ordered mapping
    Mapping(Vec<Entry>),
}

/// Key/value pair of a mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub key: Node,
    pub value: Node,
}

impl Node {
    /// Create a node of the given kind without comments
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            head_comment: String::new(),
            line_comment: String::new(),
            position: Position::default(),
        }
    }

    /// Create a null node
    pub fn null() -> Self {
        Self::new(NodeKind::Null)
    }

    /// Create a scalar node
    pub fn scalar(value: impl Into<String>) -> Self {
        Self::new(NodeKind::Scalar(value.into()))
    }

    /// Create a sequence node
    pub fn sequence(items: Vec<Node>) -> Self {
        Self::new(NodeKind::Sequence(items))
    }

    /// Create a mapping node
    pub fn mapping(entries: Vec<Entry>) -> Self {
        Self::new(NodeKind::Mapping(entries))
    }

    /// Set the head comment
    #[must_use]
    pub fn with_head_comment(mut self, comment: impl Into<String>) -> Self {
        self.head_comment = comment.into();
        self
    }

    /// Set the line comment
    #[must_use]
    pub fn with_line_comment(mut self, comment: impl Into<String>) -> Self {
        self.line_comment = comment.into();
        self
    }

    /// Set the source position
    #[must_use]
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Check if the node is null
    pub fn is_null(&self) -> bool {
        matches!(self.kind, NodeKind::Null)
    }

    /// Scalar text, if the node is a scalar
    pub fn as_scalar(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Scalar(value) => Some(value),
            _ => None,
        }
    }

    /// Mapping entries, if the node is a mapping
    pub fn as_mapping(&self) -> Option<&[Entry]> {
        match &self.kind {
            NodeKind::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    /// Sequence items, if the node is a sequence
    pub fn as_sequence(&self) -> Option<&[Node]> {
        match &self.kind {
            NodeKind::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Find the first entry value whose key is the given scalar
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_mapping()?
            .iter()
            .find(|entry| entry.key.as_scalar() == Some(key))
            .map(|entry| &entry.value)
    }

    /// Human-readable name of the node shape
    pub fn kind_name(&self) -> &'static str {
        self.kind.name()
    }
}

impl NodeKind {
    /// Human-readable name of the shape
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Null => "null",
            NodeKind::Scalar(_) => "scalar",
            NodeKind::Sequence(_) => "sequence",
            NodeKind::Mapping(_) => "mapping",
        }
    }
}

impl Entry {
    /// Create a mapping entry
    pub fn new(key: Node, value: Node) -> Self {
        Self { key, value }
    }
}
