#![deny(rust_2018_idioms)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # schemac-loader
//!
//! Turns schema sources into [`schemac_ir::Document`]s.
//!
//! A source is either a single YAML file or a directory holding a
//! `schemac.yaml` manifest that lists resource files. Every YAML document of a
//! source becomes one `Document`; comments are kept on the node tree because
//! they become the documentation of generated types.

pub mod envelope;
pub mod loader;
pub mod manifest;
pub mod reader;

pub use envelope::DocumentFormat;
pub use loader::SchemaLoader;
pub use manifest::Manifest;
pub use reader::read_documents;

use std::path::PathBuf;
use thiserror::Error;

/// Errors that halt loading before any parsing begins
#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("YAML syntax error in {source_name}: {message}")]
    Syntax { source_name: String, message: String },

    #[error("unknown version in {source_name}: {version:?}")]
    UnknownVersion { source_name: String, version: String },

    #[error("unknown resource kind in {source_name}: {kind:?}")]
    UnknownKind { source_name: String, kind: String },

    #[error("invalid document envelope in {source_name}: {message}")]
    InvalidEnvelope { source_name: String, message: String },

    #[error("invalid manifest {}: {message}", .path.display())]
    Manifest { path: PathBuf, message: String },

    #[error("remote sources are not supported: {0}")]
    RemoteUnsupported(String),
}

impl LoaderError {
    /// Build a syntax error for a named source.
    pub fn syntax(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Syntax {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    /// Build an envelope error for a named source.
    pub fn invalid_envelope(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidEnvelope {
            source_name: source_name.into(),
            message: message.into(),
        }
    }
}

/// Crate-local result type for loading.
pub type Result<T> = std::result::Result<T, LoaderError>;
