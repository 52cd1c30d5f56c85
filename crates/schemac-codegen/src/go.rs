//! Go source generator
//!
//! One `.go` file per package. Enums become `int32` types with an `iota`
//! constant block, structures become structs tagged for BSON and JSON.

use crate::naming::{package_name, pascal, proto_pascal, snake};
use crate::{CodegenError, Result};
use regex::Regex;
use schemac_ir::{Enum, Kind, Package, Structure, Type};
use schemac_linker::{TypeLinker, TypeMap};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, info};

/// Go identifier syntax
static IDENTIFIER: LazyLock<std::result::Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$"));

/// Header marking generated files
const HEADER: &str = "// Code generated by schemac. DO NOT EDIT.";

/// Primitive schema types and their Go counterparts
pub fn go_typemap() -> TypeMap {
    TypeMap::new()
        .with("int", "int64", "")
        .with("float", "float64", "")
        .with("bool", "bool", "")
        .with("string", "string", "")
        .with("datetime", "Time", "time")
        .with("objectid", "ObjectID", "primitive")
}

/// Import paths of the support packages used by [`go_typemap`]
pub fn go_imports() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("time".to_string(), "time".to_string()),
        (
            "primitive".to_string(),
            "go.mongodb.org/mongo-driver/bson/primitive".to_string(),
        ),
    ])
}

/// A rendered source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub contents: String,
}

/// Generates Go sources into an output directory
#[derive(Debug, Clone)]
pub struct GoGenerator {
    out: PathBuf,
    package: Option<String>,
    typemap: TypeMap,
    imports: BTreeMap<String, String>,
}

impl GoGenerator {
    /// Create a generator writing into `out`
    pub fn new(out: impl Into<PathBuf>) -> Self {
        Self {
            out: out.into(),
            package: None,
            typemap: go_typemap(),
            imports: go_imports(),
        }
    }

    /// Override the Go package clause, which defaults to the output folder name
    #[must_use]
    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    /// Add or replace type mappings
    #[must_use]
    pub fn with_types(mut self, types: TypeMap) -> Self {
        self.typemap.extend(types);
        self
    }

    /// Map a support package to its import path
    #[must_use]
    pub fn with_import(mut self, package: impl Into<String>, path: impl Into<String>) -> Self {
        self.imports.insert(package.into(), path.into());
        self
    }

    /// Output directory
    pub fn out(&self) -> &Path {
        &self.out
    }

    /// Go package clause for the generated files
    pub fn package_clause(&self) -> Result<String> {
        let name = match &self.package {
            Some(package) => package.clone(),
            None => package_name(&folder_name(&self.out)?),
        };
        validate_identifier(&name)?;
        Ok(name)
    }

    /// Link the packages against the Go type map and render them
    pub fn generate(&self, packages: &[Package]) -> Result<Vec<GeneratedFile>> {
        let mut packages = packages.to_vec();
        TypeLinker::new(self.typemap.clone())
            .with_naming(proto_pascal)
            .link(&mut packages);

        let clause = self.package_clause()?;
        let value_types: BTreeSet<String> = self
            .typemap
            .iter()
            .map(|(_, mapping)| qualified(&mapping.name, &mapping.package))
            .collect();

        packages
            .iter()
            .map(|package| {
                let file = package_name(&package.name);
                validate_identifier(&file)?;
                let contents = self.render(package, &clause, &value_types)?;
                debug!(package = %package.name, file = %file, "rendered Go package");
                Ok(GeneratedFile {
                    path: self.out.join(format!("{file}.go")),
                    contents,
                })
            })
            .collect()
    }

    /// Write rendered files, creating the output directory
    pub fn write(&self, files: &[GeneratedFile]) -> Result<()> {
        std::fs::create_dir_all(&self.out).map_err(|source| CodegenError::Io {
            path: self.out.clone(),
            source,
        })?;

        for file in files {
            std::fs::write(&file.path, &file.contents).map_err(|source| CodegenError::Io {
                path: file.path.clone(),
                source,
            })?;
            info!("Generated {}", file.path.display());
        }
        Ok(())
    }

    /// Generate and write; returns the written paths
    pub fn run(&self, packages: &[Package]) -> Result<Vec<PathBuf>> {
        let files = self.generate(packages)?;
        self.write(&files)?;
        Ok(files.into_iter().map(|file| file.path).collect())
    }

    fn render(
        &self,
        package: &Package,
        clause: &str,
        value_types: &BTreeSet<String>,
    ) -> Result<String> {
        let mut out = String::new();
        out.push_str(HEADER);
        out.push_str("\n\n");
        out.push_str(&format!("package {clause}\n"));

        let imports = self.imports_for(package)?;
        if !imports.is_empty() {
            out.push_str("\nimport (\n");
            for import in &imports {
                out.push_str(&format!("\t\"{import}\"\n"));
            }
            out.push_str(")\n");
        }

        for item in &package.enums {
            out.push('\n');
            out.push_str(&render_enum(item)?);
        }
        for structure in &package.structures {
            out.push('\n');
            out.push_str(&render_structure(structure, value_types)?);
        }
        Ok(out)
    }

    fn imports_for(&self, package: &Package) -> Result<Vec<String>> {
        let mut imports = package
            .dependencies
            .iter()
            .map(|dependency| {
                self.imports
                    .get(dependency)
                    .cloned()
                    .ok_or_else(|| CodegenError::UnknownDependency {
                        package: package.name.clone(),
                        dependency: dependency.clone(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        imports.sort();
        Ok(imports)
    }
}

/// Last path segment of the output directory
fn folder_name(out: &Path) -> Result<String> {
    let absolute;
    let path = if out.file_name().is_some() {
        out
    } else {
        absolute = std::path::absolute(out).map_err(|source| CodegenError::Io {
            path: out.to_path_buf(),
            source,
        })?;
        absolute.as_path()
    };

    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| CodegenError::InvalidIdentifier(out.display().to_string()))
}

fn validate_identifier(name: &str) -> Result<()> {
    let pattern = IDENTIFIER.as_ref().map_err(Clone::clone)?;
    if pattern.is_match(name) {
        Ok(())
    } else {
        Err(CodegenError::InvalidIdentifier(name.to_string()))
    }
}

fn qualified(name: &str, package: &str) -> String {
    if package.is_empty() {
        name.to_string()
    } else {
        format!("{package}.{name}")
    }
}

/// Go spelling of a linked field type
///
/// Arrays get `[]`, optionals a pointer, and arrays of declared types hold
/// pointers.
pub fn go_type(ty: &Type, value_types: &BTreeSet<String>) -> String {
    let full = qualified(ty.name(), ty.package());
    let mut out = String::new();
    if ty.kind == Kind::Array {
        out.push_str("[]");
    }
    let pointer = match ty.kind {
        Kind::Optional => true,
        Kind::Array => !value_types.contains(&full),
        Kind::Normal | Kind::PrimaryKey => false,
    };
    if pointer {
        out.push('*');
    }
    out.push_str(&full);
    out
}

fn doc_comment(out: &mut String, indent: &str, ident: &str, comment: &str) {
    if !comment.is_empty() {
        out.push_str(&format!("{indent}// {ident} {comment}\n"));
    }
}

fn render_enum(item: &Enum) -> Result<String> {
    let name = proto_pascal(&item.name);
    validate_identifier(&name)?;

    let mut out = String::new();
    doc_comment(&mut out, "", &name, &item.comment);
    out.push_str(&format!("type {name} int32\n"));

    if item.fields.is_empty() {
        return Ok(out);
    }
    out.push_str("\nconst (\n");
    for (index, field) in item.fields.iter().enumerate() {
        let constant = field.ident();
        validate_identifier(constant)?;
        doc_comment(&mut out, "\t", constant, &field.comment);
        if index == 0 {
            out.push_str(&format!("\t{constant} {name} = iota\n"));
        } else {
            out.push_str(&format!("\t{constant}\n"));
        }
    }
    out.push_str(")\n");
    Ok(out)
}

fn render_structure(structure: &Structure, value_types: &BTreeSet<String>) -> Result<String> {
    let name = proto_pascal(&structure.name);
    validate_identifier(&name)?;

    let mut out = String::new();
    doc_comment(&mut out, "", &name, &structure.comment);
    out.push_str(&format!("type {name} struct {{\n"));
    for field in &structure.fields {
        let ident = pascal(&field.name);
        validate_identifier(&ident)?;
        if field.ty.name().is_empty() {
            return Err(CodegenError::MissingType {
                structure: structure.name.clone(),
                field: field.name.clone(),
            });
        }
        validate_identifier(field.ty.name())?;
        doc_comment(&mut out, "\t", &ident, &field.comment);

        let key = snake(&field.name);
        let (bson, json) = match field.ty.kind {
            Kind::PrimaryKey => ("_id".to_string(), key),
            Kind::Optional => (format!("{key},omitempty"), format!("{key},omitempty")),
            Kind::Normal | Kind::Array => (key.clone(), key),
        };
        out.push_str(&format!(
            "\t{ident} {} `bson:\"{bson}\" json:\"{json}\"`\n",
            go_type(&field.ty, value_types)
        ));
    }
    out.push_str("}\n");
    Ok(out)
}
