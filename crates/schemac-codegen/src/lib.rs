#![deny(rust_2018_idioms)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

//! # schemac-codegen
//!
//! Source generation for linked schemac packages.
//!
//! - [`naming`]: identifier case conversions shared by generators
//! - [`go`]: Go structs and enum constants

pub mod go;
pub mod naming;

pub use go::{GeneratedFile, GoGenerator};

use schemac_ir::Category;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while generating sources
#[derive(Error, Debug)]
pub enum CodegenError {
    #[error("unknown cross-file reference `{dependency}` in package `{package}`")]
    UnknownDependency { package: String, dependency: String },

    #[error("field `{field}` of `{structure}` has no type")]
    MissingType { structure: String, field: String },

    #[error("invalid identifier: `{0}`")]
    InvalidIdentifier(String),

    #[error("invalid identifier pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl CodegenError {
    /// Diagnostic taxonomy bucket, for errors that describe the schema
    pub fn category(&self) -> Option<Category> {
        match self {
            CodegenError::UnknownDependency { .. } => Some(Category::Semantic),
            CodegenError::MissingType { .. } => Some(Category::Structural),
            CodegenError::InvalidIdentifier(_) => Some(Category::Naming),
            CodegenError::Pattern(_) | CodegenError::Io { .. } => None,
        }
    }
}

/// Crate-local result type for generation.
pub type Result<T> = std::result::Result<T, CodegenError>;
