//! Diagnostics accumulated while parsing and linking
//!
//! Stages collect diagnostics as values and keep going where it is safe, so
//! one run reports every independent problem it can find.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Problem found in a schema batch
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Diagnostic {
    #[error("document root must be a mapping, found {found}")]
    InvalidRoot { found: &'static str },

    #[error("enum values must be scalar")]
    NonScalarEnumValue { enum_name: String },

    #[error("duplicate field name: `{0}`")]
    DuplicateField(String),

    #[error("duplicate enum value: `{0}`")]
    DuplicateEnumValue(String),

    #[error("duplicate enum: `{0}`")]
    DuplicateEnum(String),

    #[error("duplicate structure: `{0}`")]
    DuplicateStructure(String),

    #[error("duplicate package: `{0}`")]
    DuplicatePackage(String),

    #[error("document declares more than one primary table: `{0}`")]
    MultiplePrimaryTables(String),
}

/// Diagnostic taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Category {
    /// Malformed document shape
    Structural,
    /// Name conflicts
    Naming,
    /// Unresolvable references (raised by generators)
    Semantic,
}

impl Diagnostic {
    /// Taxonomy bucket of this diagnostic
    pub fn category(&self) -> Category {
        match self {
            Diagnostic::InvalidRoot { .. } | Diagnostic::NonScalarEnumValue { .. } => {
                Category::Structural
            }
            Diagnostic::DuplicateField(_)
            | Diagnostic::DuplicateEnumValue(_)
            | Diagnostic::DuplicateEnum(_)
            | Diagnostic::DuplicateStructure(_)
            | Diagnostic::DuplicatePackage(_)
            | Diagnostic::MultiplePrimaryTables(_) => Category::Naming,
        }
    }
}

/// Non-empty list of diagnostics returned by a failed batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    /// Create an empty list
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Record one diagnostic
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    /// Check if anything was recorded
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of diagnostics
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Recorded diagnostics in order
    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.0
    }

    /// Iterate over diagnostics
    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }

    /// Consume into the underlying list
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.0
    }
}

impl From<Vec<Diagnostic>> for Diagnostics {
    fn from(items: Vec<Diagnostic>) -> Self {
        Self(items)
    }
}

impl Extend<Diagnostic> for Diagnostics {
    fn extend<I: IntoIterator<Item = Diagnostic>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [] => f.write_str("no diagnostics"),
            [only] => write!(f, "{only}"),
            items => {
                write!(f, "{} diagnostics:", items.len())?;
                for item in items {
                    write!(f, "\n  {item}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for Diagnostics {}
