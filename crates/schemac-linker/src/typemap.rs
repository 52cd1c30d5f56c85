//! Raw type name to target type mapping

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Target type of one raw primitive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeMapping {
    /// Target-language type name
    pub name: String,

    /// Support package to import; empty for none
    #[serde(default)]
    pub package: String,
}

impl TypeMapping {
    /// Create a mapping
    pub fn new(name: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
        }
    }
}

/// Raw primitive names and their target types
///
/// Deserializes from a mapping such as:
///
/// ```yaml
/// string: { name: string }
/// datetime: { name: Time, package: time }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeMap {
    entries: BTreeMap<String, TypeMapping>,
}

impl TypeMap {
    /// Create an empty type map
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry
    #[must_use]
    pub fn with(
        mut self,
        raw: impl Into<String>,
        name: impl Into<String>,
        package: impl Into<String>,
    ) -> Self {
        self.insert(raw, TypeMapping::new(name, package));
        self
    }

    /// Add or replace an entry
    pub fn insert(&mut self, raw: impl Into<String>, mapping: TypeMapping) {
        self.entries.insert(raw.into(), mapping);
    }

    /// Add every entry of `other`, replacing existing ones
    pub fn extend(&mut self, other: TypeMap) {
        self.entries.extend(other.entries);
    }

    /// Look up a raw type name
    pub fn get(&self, raw: &str) -> Option<&TypeMapping> {
        self.entries.get(raw)
    }

    /// Iterate over entries ordered by raw name
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypeMapping)> {
        self.entries.iter().map(|(raw, mapping)| (raw.as_str(), mapping))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
