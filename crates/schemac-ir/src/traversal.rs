//! Cursor API for navigating mapping nodes by key

use crate::Error;
use crate::Result;
use crate::node::Node;

/// A cursor for navigating the document tree
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    /// Current node
    node: &'a Node,

    /// Keys walked so far (for error reporting)
    path: Vec<String>,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor at the given node
    pub fn new(node: &'a Node) -> Self {
        Self {
            node,
            path: Vec::new(),
        }
    }

    /// Get the current node
    pub fn node(&self) -> &'a Node {
        self.node
    }

    /// Get the current path
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Navigate to the value of a mapping key
    pub fn child(&self, key: &str) -> Result<Cursor<'a>> {
        let mut path = self.path.clone();
        path.push(key.to_string());

        if self.node.as_mapping().is_none() {
            return Err(Error::type_mismatch(
                self.path.join("/"),
                "mapping",
                self.node.kind_name(),
            ));
        }

        match self.node.get(key) {
            Some(node) => Ok(Cursor { node, path }),
            None => Err(Error::node_not_found(path.join("/"))),
        }
    }

    /// Navigate to the value of a mapping key, if present
    pub fn optional_child(&self, key: &str) -> Result<Option<Cursor<'a>>> {
        match self.child(key) {
            Ok(cursor) => Ok(Some(cursor)),
            Err(Error::NodeNotFound { .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Navigate using a slash-separated key path (e.g. `metadata/name`)
    pub fn navigate(&self, path: &str) -> Result<Cursor<'a>> {
        let mut cursor = self.clone();
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            cursor = cursor.child(segment)?;
        }
        Ok(cursor)
    }

    /// Scalar text at the cursor
    pub fn scalar(&self) -> Result<&'a str> {
        self.node
            .as_scalar()
            .ok_or_else(|| Error::type_mismatch(self.path.join("/"), "scalar", self.node.kind_name()))
    }
}
