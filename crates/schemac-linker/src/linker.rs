//! Type linker
//!
//! Resolves every field's raw type against a [`TypeMap`] and derives each
//! package's support-package dependencies. Raw names missing from the map are
//! references to declared structures or enums and go through the naming
//! transform instead.

use crate::typemap::TypeMap;
use schemac_ir::{Enum, Package};
use std::collections::BTreeSet;
use std::fmt;
use tracing::{debug, trace};

/// Naming transform applied to raw names missing from the type map
pub type NamingFn = Box<dyn Fn(&str) -> String + Send + Sync>;

/// Rewrites field types in place
pub struct TypeLinker {
    typemap: TypeMap,
    naming: NamingFn,
}

impl TypeLinker {
    /// Create a linker using the identity naming transform
    pub fn new(typemap: TypeMap) -> Self {
        Self {
            typemap,
            naming: Box::new(str::to_string),
        }
    }

    /// Set the naming transform
    #[must_use]
    pub fn with_naming<F>(mut self, naming: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.naming = Box::new(naming);
        self
    }

    /// Type map in use
    pub fn typemap(&self) -> &TypeMap {
        &self.typemap
    }

    /// Link all packages
    ///
    /// Dependencies are recomputed from scratch, so linking twice gives the
    /// same result.
    pub fn link(&self, packages: &mut [Package]) {
        for package in packages.iter_mut() {
            self.link_package(package);
        }
    }

    fn link_package(&self, package: &mut Package) {
        for item in &mut package.enums {
            assign_constants(item);
        }

        let mut dependencies = BTreeSet::new();
        for structure in &mut package.structures {
            for field in &mut structure.fields {
                let ty = &mut field.ty;
                match self.typemap.get(&ty.raw) {
                    Some(mapping) => {
                        ty.resolve(mapping.name.as_str(), Some(mapping.package.as_str()));
                        if !mapping.package.is_empty() {
                            dependencies.insert(mapping.package.clone());
                        }
                    }
                    None => {
                        let name = (self.naming)(&ty.raw);
                        trace!(raw = %ty.raw, name = %name, "resolved declared type");
                        ty.resolve(name, None);
                    }
                }
            }
        }

        package.dependencies = dependencies.into_iter().collect();
        debug!(
            package = %package.name,
            dependencies = ?package.dependencies,
            "linked package types"
        );
    }
}

impl fmt::Debug for TypeLinker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeLinker")
            .field("typemap", &self.typemap)
            .finish_non_exhaustive()
    }
}

/// Set `UPPER(enum_value)` constants on every enum value
fn assign_constants(item: &mut Enum) {
    for field in &mut item.fields {
        field.constant = Some(format!("{}_{}", item.name, field.name).to_uppercase());
    }
}
