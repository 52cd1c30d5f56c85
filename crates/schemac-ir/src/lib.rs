#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # schemac-ir
//!
//! Intermediate Representation, document node tree, and diagnostics for schemac.
//!
//! This crate holds everything the parsing and linking stages exchange:
//! the comment-carrying document tree produced by the loader, the package
//! model produced by the parser, and the diagnostics both stages accumulate.

/// Accumulated parse and link diagnostics.
pub mod diagnostic;
/// Document container and per-document metadata.
pub mod document;
/// Source position metadata attached to nodes and documents.
pub mod metadata;
/// Package, structure, enum, field, and type model.
pub mod model;
/// Comment-carrying document tree.
pub mod node;
/// Cursor-based navigation over mapping nodes.
pub mod traversal;

/// Diagnostic values and their taxonomy.
pub use diagnostic::{Category, Diagnostic, Diagnostics};
/// Primary document type handed from loader to parser.
pub use document::{Document, DocumentMetadata};
/// Position and source metadata.
pub use metadata::{Position, SourceInfo};
/// Schema model.
pub use model::{COMMON_PACKAGE, Enum, EnumField, Field, Kind, Package, Resolution, Structure, Type};
/// Node primitives for the document tree.
pub use node::{Entry, Node, NodeKind};
/// Navigation entry point.
pub use traversal::Cursor;

use thiserror::Error;

/// Errors that can occur when navigating the document tree
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Node not found at path: {path}")]
    NodeNotFound { path: String },

    #[error("Type mismatch at '{path}': expected {expected}, found {found}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },
}

impl Error {
    /// Build a node-not-found error with path context.
    pub fn node_not_found(path: impl Into<String>) -> Self {
        Self::NodeNotFound { path: path.into() }
    }

    /// Build a type-mismatch error for a node of the wrong shape.
    pub fn type_mismatch(path: impl Into<String>, expected: &'static str, found: &'static str) -> Self {
        Self::TypeMismatch {
            path: path.into(),
            expected,
            found,
        }
    }
}

/// Crate-local result type for IR operations.
pub type Result<T> = std::result::Result<T, Error>;
