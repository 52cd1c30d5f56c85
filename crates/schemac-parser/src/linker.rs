//! Batch linker
//!
//! Merges the candidate packages of one batch into the final package list.
//! Linking is all-or-nothing: any diagnostic raised for the batch, during
//! parsing or here, fails the whole batch.

use crate::conflict::find_conflicts;
use schemac_ir::{Diagnostic, Diagnostics, Package};
use tracing::debug;

/// Aggregates candidate packages and their diagnostics
#[derive(Debug, Default)]
pub struct BatchLinker {
    packages: Vec<Package>,
    diagnostics: Diagnostics,
}

impl BatchLinker {
    /// Create an empty linker
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a candidate package
    pub fn add_package(&mut self, package: Package) {
        self.packages.push(package);
    }

    /// Record diagnostics raised while producing the candidates
    pub fn add_diagnostics(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.diagnostics.extend(diagnostics);
    }

    /// Merge, check, and order the batch
    pub fn link(self) -> Result<Vec<Package>, Diagnostics> {
        let BatchLinker {
            packages,
            mut diagnostics,
        } = self;

        let mut common: Option<Package> = None;
        let mut linked = Vec::with_capacity(packages.len() + 1);

        for mut package in packages {
            if package.is_common() {
                let merged = common.get_or_insert_with(Package::common);
                merged.enums.append(&mut package.enums);
                merged.structures.append(&mut package.structures);
            } else {
                normalize(&mut package, &mut diagnostics);
                linked.push(package);
            }
        }
        if let Some(mut common) = common {
            normalize(&mut common, &mut diagnostics);
            linked.push(common);
        }

        for name in find_conflicts(&linked, |package| package.name.as_str()) {
            diagnostics.push(Diagnostic::DuplicatePackage(name));
        }
        linked.sort_by(|a, b| a.name.cmp(&b.name));

        debug!(
            packages = linked.len(),
            diagnostics = diagnostics.len(),
            "linked batch"
        );

        if diagnostics.is_empty() {
            Ok(linked)
        } else {
            Err(diagnostics)
        }
    }
}

/// Report duplicate declarations and order them by name
fn normalize(package: &mut Package, diagnostics: &mut Diagnostics) {
    for name in find_conflicts(&package.enums, |item| item.name.as_str()) {
        diagnostics.push(Diagnostic::DuplicateEnum(name));
    }
    for name in find_conflicts(&package.structures, |structure| structure.name.as_str()) {
        diagnostics.push(Diagnostic::DuplicateStructure(name));
    }
    package.enums.sort_by(|a, b| a.name.cmp(&b.name));
    package.structures.sort_by(|a, b| a.name.cmp(&b.name));
}
