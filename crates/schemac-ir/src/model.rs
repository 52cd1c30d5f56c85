//! Schema model definitions
//!
//! Packages own flat lists of structures and enums. A field never owns the
//! type it refers to; it stores the raw type name and, after type linking,
//! the resolved target name.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Package name used for documents that declare no primary table
pub const COMMON_PACKAGE: &str = "common";

/// Field cardinality/role modifier, derived from a trailing key marker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    /// No marker
    #[default]
    Normal,
    /// `[]` marker
    Array,
    /// `?` marker
    Optional,
    /// `!` marker
    PrimaryKey,
}

impl Kind {
    /// Split a field key into its base name and kind.
    ///
    /// Only the last marker counts: `tags[]?` is an optional field named `tags[]`.
    pub fn split_key(key: &str) -> (&str, Kind) {
        if let Some(name) = key.strip_suffix("[]") {
            (name, Kind::Array)
        } else if let Some(name) = key.strip_suffix('?') {
            (name, Kind::Optional)
        } else if let Some(name) = key.strip_suffix('!') {
            (name, Kind::PrimaryKey)
        } else {
            (key, Kind::Normal)
        }
    }

    /// Marker text for this kind
    pub fn marker(self) -> &'static str {
        match self {
            Kind::Normal => "",
            Kind::Array => "[]",
            Kind::Optional => "?",
            Kind::PrimaryKey => "!",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Normal => "Normal",
            Kind::Array => "Array",
            Kind::Optional => "Optional",
            Kind::PrimaryKey => "PrimaryKey",
        };
        f.write_str(name)
    }
}

/// Link state of a type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    /// Not linked yet
    #[default]
    Unresolved,
    /// Linked against a type map
    Resolved {
        /// Target-language type name
        name: String,
        /// Support package to import, if any
        package: Option<String>,
    },
}

/// Type of a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Type {
    /// Schema-level type token
    pub raw: String,
    /// Cardinality/role modifier
    pub kind: Kind,
    /// Link state
    #[serde(default)]
    pub resolution: Resolution,
}

impl Type {
    /// Create an unresolved type
    pub fn new(raw: impl Into<String>, kind: Kind) -> Self {
        Self {
            raw: raw.into(),
            kind,
            resolution: Resolution::Unresolved,
        }
    }

    /// Resolved target type name, empty until linked
    pub fn name(&self) -> &str {
        match &self.resolution {
            Resolution::Resolved { name, .. } => name,
            Resolution::Unresolved => "",
        }
    }

    /// Resolved support package, empty if none
    pub fn package(&self) -> &str {
        match &self.resolution {
            Resolution::Resolved {
                package: Some(package),
                ..
            } => package,
            _ => "",
        }
    }

    /// Check if the type has been linked
    pub fn is_resolved(&self) -> bool {
        matches!(self.resolution, Resolution::Resolved { .. })
    }

    /// Record the link result. An empty package means no import.
    pub fn resolve(&mut self, name: impl Into<String>, package: Option<&str>) {
        self.resolution = Resolution::Resolved {
            name: name.into(),
            package: package.filter(|p| !p.is_empty()).map(str::to_string),
        };
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.kind)?;
        if !self.package().is_empty() {
            write!(f, "{}.", self.package())?;
        }
        write!(f, "{}({})", self.name(), self.raw)
    }
}

/// Field of a structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub comment: String,
    #[serde(rename = "type")]
    pub ty: Type,
}

impl Field {
    /// Create a field
    pub fn new(name: impl Into<String>, comment: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            comment: comment.into(),
            ty,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}#{}", self.name, self.ty, self.comment)
    }
}

/// Record type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Structure {
    pub name: String,
    pub comment: String,
    /// Fields in declaration order
    pub fields: Vec<Field>,
}

impl Structure {
    /// Create a structure
    pub fn new(name: impl Into<String>, comment: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            comment: comment.into(),
            fields,
        }
    }

    /// Find a field by name
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "#{}", self.comment)?;
        writeln!(f, "type {} struct {{", self.name)?;
        for field in &self.fields {
            writeln!(f, "\t{field}")?;
        }
        f.write_str("}")
    }
}

/// Enumeration constant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumField {
    /// Raw value as written in the schema
    ///
    /// Type linking never rewrites it; the `UPPER(enum_value)` identifier goes
    /// to [`EnumField::constant`], so linking twice leaves the field unchanged.
    /// Use [`EnumField::ident`] for the linked identifier.
    pub name: String,
    pub comment: String,
    /// Constant identifier assigned by the type linker
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constant: Option<String>,
}

impl EnumField {
    /// Create an unlinked enum field
    pub fn new(name: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            comment: comment.into(),
            constant: None,
        }
    }

    /// Constant identifier once linked, raw name before
    pub fn ident(&self) -> &str {
        self.constant.as_deref().unwrap_or(&self.name)
    }
}

impl fmt::Display for EnumField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.ident(), self.comment)
    }
}

/// Enumeration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enum {
    pub name: String,
    pub comment: String,
    /// Values in declaration order
    pub fields: Vec<EnumField>,
}

impl Enum {
    /// Create an enum
    pub fn new(name: impl Into<String>, comment: impl Into<String>, fields: Vec<EnumField>) -> Self {
        Self {
            name: name.into(),
            comment: comment.into(),
            fields,
        }
    }
}

impl fmt::Display for Enum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "#{}", self.comment)?;
        writeln!(f, "type {} enum {{", self.name)?;
        for field in &self.fields {
            writeln!(f, "\t{field}")?;
        }
        f.write_str("}")
    }
}

/// Named unit of generated output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    pub enums: Vec<Enum>,
    pub structures: Vec<Structure>,
    /// Support packages required by field types, sorted and deduplicated
    pub dependencies: Vec<String>,
}

impl Package {
    /// Create an empty package
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enums: Vec::new(),
            structures: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    /// Create the shared package for documents without a primary table
    pub fn common() -> Self {
        Self::new(COMMON_PACKAGE)
    }

    /// Check if this is the shared package
    pub fn is_common(&self) -> bool {
        self.name == COMMON_PACKAGE
    }

    /// Check if the package declares nothing
    pub fn is_empty(&self) -> bool {
        self.enums.is_empty() && self.structures.is_empty()
    }

    /// Find a structure by name
    pub fn structure(&self, name: &str) -> Option<&Structure> {
        self.structures.iter().find(|s| s.name == name)
    }

    /// Find an enum by name
    pub fn enumeration(&self, name: &str) -> Option<&Enum> {
        self.enums.iter().find(|e| e.name == name)
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = format!("package {}\n", self.name);
        for dependency in &self.dependencies {
            out.push_str(dependency);
            out.push('\n');
        }
        for item in &self.enums {
            out.push_str(&item.to_string());
            out.push('\n');
        }
        for structure in &self.structures {
            out.push_str(&structure.to_string());
            out.push('\n');
        }
        f.write_str(out.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(raw: &str, name: &str, kind: Kind, package: Option<&str>) -> Type {
        let mut ty = Type::new(raw, kind);
        ty.resolve(name, package);
        ty
    }

    #[test]
    fn test_split_key_markers() {
        assert_eq!(Kind::split_key("id!"), ("id", Kind::PrimaryKey));
        assert_eq!(Kind::split_key("tag?"), ("tag", Kind::Optional));
        assert_eq!(Kind::split_key("author[]"), ("author", Kind::Array));
        assert_eq!(Kind::split_key("name"), ("name", Kind::Normal));
        assert_eq!(Kind::split_key("tags[]?"), ("tags[]", Kind::Optional));
    }

    #[test]
    fn test_type_display() {
        let ty = resolved("datetime", "datetime", Kind::PrimaryKey, Some("time"));
        assert_eq!(ty.to_string(), "[PrimaryKey]time.datetime(datetime)");

        let unresolved = Type::new("string", Kind::Normal);
        assert_eq!(unresolved.to_string(), "[Normal](string)");
        assert_eq!(unresolved.name(), "");
        assert_eq!(unresolved.package(), "");
    }

    #[test]
    fn test_resolve_treats_empty_package_as_none() {
        let ty = resolved("string", "string", Kind::Normal, Some(""));
        assert!(ty.is_resolved());
        assert_eq!(ty.package(), "");
        assert_eq!(
            ty.resolution,
            Resolution::Resolved {
                name: "string".to_string(),
                package: None
            }
        );
    }

    #[test]
    fn test_field_display() {
        let field = Field::new(
            "id",
            "primary key",
            resolved("datetime", "datetime", Kind::PrimaryKey, Some("time")),
        );
        assert_eq!(
            field.to_string(),
            "id [PrimaryKey]time.datetime(datetime)#primary key"
        );
    }

    #[test]
    fn test_structure_display() {
        let structure = Structure::new(
            "demo",
            "example",
            vec![
                Field::new("id", "primary key", resolved("string", "string", Kind::PrimaryKey, None)),
                Field::new("name", "name", resolved("string", "string", Kind::Normal, None)),
            ],
        );
        assert_eq!(
            structure.to_string(),
            "#example\ntype demo struct {\n\tid [PrimaryKey]string(string)#primary key\n\tname [Normal]string(string)#name\n}"
        );
    }

    #[test]
    fn test_enum_display_uses_constant_once_linked() {
        let mut item = Enum::new(
            "kind",
            "type",
            vec![EnumField::new("array", "array"), EnumField::new("optional", "")],
        );
        assert_eq!(
            item.to_string(),
            "#type\ntype kind enum {\n\tarray#array\n\toptional#\n}"
        );

        item.fields[0].constant = Some("KIND_ARRAY".to_string());
        assert_eq!(item.fields[0].ident(), "KIND_ARRAY");
        assert_eq!(item.fields[1].ident(), "optional");
    }

    #[test]
    fn test_package_display() {
        let mut package = Package::new("demo");
        package.dependencies.push("time".to_string());
        package.enums.push(Enum::new(
            "gender",
            "gender",
            vec![EnumField::new("male", "m"), EnumField::new("female", "f")],
        ));
        package.structures.push(Structure::new(
            "author",
            "author",
            vec![Field::new(
                "gender",
                "gender",
                resolved("gender", "gender", Kind::Optional, None),
            )],
        ));

        assert_eq!(
            package.to_string(),
            "package demo\ntime\n#gender\ntype gender enum {\n\tmale#m\n\tfemale#f\n}\n#author\ntype author struct {\n\tgender [Optional]gender(gender)#gender\n}"
        );
    }

    #[test]
    fn test_common_package() {
        let package = Package::common();
        assert!(package.is_common());
        assert!(package.is_empty());
        assert_eq!(package.to_string(), "package common");
    }

    #[test]
    fn test_serialize_round_trip() {
        let mut package = Package::new("demo");
        package.structures.push(Structure::new(
            "demo",
            "",
            vec![Field::new("tag", "", resolved("datetime", "Time", Kind::Optional, Some("time")))],
        ));

        let json = serde_json::to_string(&package).unwrap();
        let back: Package = serde_json::from_str(&json).unwrap();
        assert_eq!(back, package);
    }
}
