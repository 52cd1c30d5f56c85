//! Document envelope decoding
//!
//! A model document is wrapped as:
//!
//! ```yaml
//! version: v1
//! kind: Model
//! metadata:
//!   name: demo      # primary table, optional
//! spec:
//!   demo:
//!     id!: string
//! ```

use crate::{LoaderError, Result};
use schemac_ir::{Cursor, Document, DocumentMetadata, Node, SourceInfo};
use tracing::debug;

/// Supported envelope version
pub const VERSION: &str = "v1";

/// Resource kind of a model document
pub const MODEL_KIND: &str = "Model";

/// How a YAML document maps onto a schema document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DocumentFormat {
    /// `version`/`kind`/`metadata`/`spec` wrapper
    #[default]
    Envelope,

    /// The whole YAML document is the schema body
    Bare,
}

impl DocumentFormat {
    /// Decode a YAML document into a schema document
    pub fn decode(self, root: Node, source: SourceInfo) -> Result<Document> {
        if root.is_null() {
            return Ok(Document::blank().with_source(source));
        }

        match self {
            DocumentFormat::Bare => Ok(Document::new(root).with_source(source)),
            DocumentFormat::Envelope => decode_envelope(&root, source),
        }
    }
}

fn decode_envelope(root: &Node, source: SourceInfo) -> Result<Document> {
    let name = source.to_string();
    if root.as_mapping().is_none() {
        return Err(LoaderError::invalid_envelope(
            name,
            format!("expected a mapping, found {}", root.kind_name()),
        ));
    }

    let cursor = Cursor::new(root);
    let version = optional_scalar(&cursor, "version", &name)?;
    if version.as_deref() != Some(VERSION) {
        return Err(LoaderError::UnknownVersion {
            source_name: name,
            version: version.unwrap_or_default(),
        });
    }

    let kind = optional_scalar(&cursor, "kind", &name)?;
    if kind.as_deref() != Some(MODEL_KIND) {
        return Err(LoaderError::UnknownKind {
            source_name: name,
            kind: kind.unwrap_or_default(),
        });
    }

    let table = match cursor
        .optional_child("metadata")
        .map_err(|err| LoaderError::invalid_envelope(&name, err.to_string()))?
    {
        Some(metadata) if !metadata.node().is_null() => {
            optional_scalar(&metadata, "name", &name)?.filter(|table| !table.is_empty())
        }
        _ => None,
    };

    let body = root.get("spec").filter(|spec| !spec.is_null()).cloned();
    debug!(
        source = %name,
        table = table.as_deref().unwrap_or(""),
        blank = body.is_none(),
        "decoded model envelope"
    );

    let metadata = DocumentMetadata {
        table,
        version,
        kind,
        source: Some(source),
    };
    Ok(Document::with_metadata(body, metadata))
}

/// Scalar value of `key`, `None` when absent or null
fn optional_scalar(cursor: &Cursor<'_>, key: &str, name: &str) -> Result<Option<String>> {
    let child = cursor
        .optional_child(key)
        .map_err(|err| LoaderError::invalid_envelope(name, err.to_string()))?;

    match child {
        None => Ok(None),
        Some(child) if child.node().is_null() => Ok(None),
        Some(child) => child
            .scalar()
            .map(|value| Some(value.to_string()))
            .map_err(|err| LoaderError::invalid_envelope(name, err.to_string())),
    }
}
