//! Document parser
//!
//! Walks one document's root mapping and turns it into a candidate package.
//! Every nested mapping is a structure and every nested sequence an enum;
//! both are registered flat in the package by name, and the field that
//! declared them refers to them through its raw type.

use crate::comment::first_comment;
use crate::conflict::find_conflicts;
use schemac_ir::{
    Diagnostic, Diagnostics, Document, Entry, Enum, EnumField, Field, Kind, Node, NodeKind,
    Package, Structure, Type,
};
use tracing::{debug, warn};

/// Result of parsing one document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDocument {
    /// Candidate package; `None` for blank or rejected documents
    pub package: Option<Package>,

    /// Fields of the document's top-level mapping
    pub fields: Vec<Field>,

    /// Problems found in this document
    pub diagnostics: Diagnostics,
}

/// Parse one document into a candidate package
pub fn parse_document(document: &Document) -> ParsedDocument {
    let root = match document.root.as_ref() {
        None => return ParsedDocument::default(),
        Some(root) if root.is_null() => return ParsedDocument::default(),
        Some(root) => root,
    };

    let Some(entries) = root.as_mapping() else {
        let mut parsed = ParsedDocument::default();
        parsed.diagnostics.push(Diagnostic::InvalidRoot {
            found: root.kind_name(),
        });
        return parsed;
    };

    let mut context = ParseContext::new(document.table());
    let fields = context.parse_mapping(entries);
    let (package, diagnostics) = context.finish();

    debug!(
        package = %package.name,
        enums = package.enums.len(),
        structures = package.structures.len(),
        diagnostics = diagnostics.len(),
        "parsed document"
    );

    ParsedDocument {
        package: Some(package),
        fields,
        diagnostics,
    }
}

/// State of one document parse
struct ParseContext<'d> {
    /// Declared primary-table name
    table_name: Option<&'d str>,

    /// Primary table once found
    table: Option<String>,

    enums: Vec<Enum>,
    structures: Vec<Structure>,
    diagnostics: Diagnostics,
}

impl<'d> ParseContext<'d> {
    fn new(table_name: Option<&'d str>) -> Self {
        Self {
            table_name,
            table: None,
            enums: Vec::new(),
            structures: Vec::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    fn finish(self) -> (Package, Diagnostics) {
        let mut package = match (self.table, self.table_name) {
            (Some(table), _) => Package::new(table),
            (None, Some(declared)) => {
                warn!(
                    table = declared,
                    "primary table not found in document, using common package"
                );
                Package::common()
            }
            (None, None) => Package::common(),
        };
        package.enums = self.enums;
        package.structures = self.structures;
        (package, self.diagnostics)
    }

    /// Parse the entries of a mapping into fields, registering nested types
    fn parse_mapping(&mut self, entries: &[Entry]) -> Vec<Field> {
        let mut fields = Vec::with_capacity(entries.len());

        for entry in entries {
            let key = key_text(&entry.key);
            let (name, kind) = Kind::split_key(key);
            let comment = first_comment([
                entry.key.head_comment.as_str(),
                entry.key.line_comment.as_str(),
                entry.value.line_comment.as_str(),
            ]);

            let raw = match &entry.value.kind {
                NodeKind::Sequence(items) => {
                    let values = self.parse_sequence(name, items);
                    self.enums.push(Enum::new(name, comment.clone(), values));
                    name.to_string()
                }
                NodeKind::Mapping(children) => {
                    let children = self.parse_mapping(children);
                    self.register_structure(Structure::new(name, comment.clone(), children));
                    name.to_string()
                }
                NodeKind::Scalar(value) => value.clone(),
                NodeKind::Null => String::new(),
            };

            fields.push(Field::new(name, comment, Type::new(raw, kind)));
        }

        for name in find_conflicts(&fields, |field| field.name.as_str()) {
            self.diagnostics.push(Diagnostic::DuplicateField(name));
        }
        fields
    }

    /// Parse the items of an inline enum
    fn parse_sequence(&mut self, enum_name: &str, items: &[Node]) -> Vec<EnumField> {
        let mut values = Vec::with_capacity(items.len());

        for item in items {
            let Some(value) = item.as_scalar() else {
                self.diagnostics.push(Diagnostic::NonScalarEnumValue {
                    enum_name: enum_name.to_string(),
                });
                continue;
            };
            let comment = first_comment([item.head_comment.as_str(), item.line_comment.as_str()]);
            values.push(EnumField::new(value, comment));
        }

        for name in find_conflicts(&values, |value| value.name.as_str()) {
            self.diagnostics.push(Diagnostic::DuplicateEnumValue(name));
        }
        values
    }

    fn register_structure(&mut self, structure: Structure) {
        if self.table_name == Some(structure.name.as_str()) {
            match &self.table {
                None => self.table = Some(structure.name.clone()),
                Some(_) => self
                    .diagnostics
                    .push(Diagnostic::MultiplePrimaryTables(structure.name.clone())),
            }
        }
        self.structures.push(structure);
    }
}

/// Text of a mapping key; non-scalar keys have no name
fn key_text(key: &Node) -> &str {
    key.as_scalar().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemac_ir::COMMON_PACKAGE;

    fn entry(key: &str, value: Node) -> Entry {
        Entry::new(Node::scalar(key), value)
    }

    #[test]
    fn test_blank_documents() {
        assert_eq!(parse_document(&Document::blank()), ParsedDocument::default());
        assert_eq!(
            parse_document(&Document::new(Node::null())),
            ParsedDocument::default()
        );
    }

    #[test]
    fn test_non_mapping_root() {
        let parsed = parse_document(&Document::new(Node::sequence(vec![Node::scalar("a")])));

        assert!(parsed.package.is_none());
        assert_eq!(
            parsed.diagnostics.as_slice(),
            &[Diagnostic::InvalidRoot { found: "sequence" }]
        );
    }

    #[test]
    fn test_scalar_fields_and_markers() {
        let root = Node::mapping(vec![
            entry("id!", Node::scalar("string").with_line_comment("# primary key")),
            entry("tags[]", Node::scalar("string")),
            entry("tag?", Node::scalar("datetime")),
            entry("empty", Node::null()),
        ]);
        let parsed = parse_document(&Document::new(root));
        let package = parsed.package.unwrap();

        assert_eq!(package.name, COMMON_PACKAGE);
        assert!(package.is_empty());
        assert!(parsed.diagnostics.is_empty());

        let summary: Vec<String> = parsed.fields.iter().map(ToString::to_string).collect();
        assert_eq!(
            summary,
            vec![
                "id [PrimaryKey](string)#primary key",
                "tags [Array](string)#",
                "tag [Optional](datetime)#",
                "empty [Normal]()#",
            ]
        );
    }

    #[test]
    fn test_enum_declaration() {
        let root = Node::mapping(vec![Entry::new(
            Node::scalar("gender").with_head_comment("# gender"),
            Node::sequence(vec![
                Node::scalar("male").with_head_comment("# male"),
                Node::scalar("female").with_line_comment("# female"),
            ]),
        )]);
        let parsed = parse_document(&Document::new(root));
        let package = parsed.package.unwrap();

        assert_eq!(package.enums.len(), 1);
        let gender = &package.enums[0];
        assert_eq!(gender.comment, "gender");
        assert_eq!(
            gender.fields,
            vec![EnumField::new("male", "male"), EnumField::new("female", "female")]
        );
        assert_eq!(parsed.fields[0].ty.raw, "gender");
        assert_eq!(parsed.fields[0].comment, "gender");
    }

    #[test]
    fn test_non_scalar_enum_value_skipped() {
        let root = Node::mapping(vec![entry(
            "gender",
            Node::sequence(vec![
                Node::scalar("male"),
                Node::sequence(vec![Node::scalar("nested")]),
                Node::scalar("female"),
            ]),
        )]);
        let parsed = parse_document(&Document::new(root));

        assert_eq!(
            parsed.diagnostics.as_slice(),
            &[Diagnostic::NonScalarEnumValue {
                enum_name: "gender".to_string()
            }]
        );
        let package = parsed.package.unwrap();
        assert_eq!(package.enums[0].fields.len(), 2);
    }

    #[test]
    fn test_duplicate_names() {
        let root = Node::mapping(vec![
            entry("name", Node::scalar("string")),
            entry("name?", Node::scalar("string")),
            entry(
                "kind",
                Node::sequence(vec![Node::scalar("a"), Node::scalar("a"), Node::scalar("a")]),
            ),
        ]);
        let parsed = parse_document(&Document::new(root));

        assert_eq!(
            parsed.diagnostics.as_slice(),
            &[
                Diagnostic::DuplicateEnumValue("a".to_string()),
                Diagnostic::DuplicateEnumValue("a".to_string()),
                Diagnostic::DuplicateField("name".to_string()),
            ]
        );
    }

    #[test]
    fn test_primary_table() {
        let root = Node::mapping(vec![entry(
            "demo",
            Node::mapping(vec![
                entry("id!", Node::scalar("string")),
                entry(
                    "author",
                    Node::mapping(vec![entry("name", Node::scalar("string"))]),
                ),
            ]),
        )]);
        let parsed = parse_document(&Document::new(root).with_table("demo"));
        let package = parsed.package.unwrap();

        assert_eq!(package.name, "demo");
        let names: Vec<&str> = package.structures.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["author", "demo"]);
        assert_eq!(package.structure("demo").unwrap().fields[1].ty.raw, "author");
    }

    #[test]
    fn test_missing_primary_table_falls_back_to_common() {
        let root = Node::mapping(vec![entry(
            "other",
            Node::mapping(vec![entry("id", Node::scalar("string"))]),
        )]);
        let parsed = parse_document(&Document::new(root).with_table("demo"));

        assert!(parsed.diagnostics.is_empty());
        assert!(parsed.package.unwrap().is_common());
    }

    #[test]
    fn test_second_primary_table_reported() {
        let table = || Node::mapping(vec![entry("id", Node::scalar("string"))]);
        let root = Node::mapping(vec![
            entry("demo", table()),
            entry("nested", Node::mapping(vec![entry("demo", table())])),
        ]);
        let parsed = parse_document(&Document::new(root).with_table("demo"));

        assert_eq!(
            parsed.diagnostics.as_slice(),
            &[Diagnostic::MultiplePrimaryTables("demo".to_string())]
        );
        assert_eq!(parsed.package.unwrap().name, "demo");
    }
}
