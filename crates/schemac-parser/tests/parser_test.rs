//! Integration tests for schemac-parser, from YAML text to linked packages

use schemac_ir::{Diagnostic, Diagnostics, Document, Package};
use schemac_loader::{DocumentFormat, SchemaLoader};

/// Wrap a schema body in a model envelope declaring `table`
fn model(table: &str, body: &str) -> String {
    let mut out = format!("version: v1\nkind: Model\nmetadata:\n  name: {table}\nspec:\n");
    for line in body.lines() {
        if !line.is_empty() {
            out.push_str("  ");
            out.push_str(line);
        }
        out.push('\n');
    }
    out
}

fn load_bare(text: &str) -> Vec<Document> {
    SchemaLoader::new()
        .with_format(DocumentFormat::Bare)
        .load_str("test.yaml", text)
        .unwrap()
}

fn load_envelope(text: &str) -> Vec<Document> {
    SchemaLoader::new().load_str("test.yaml", text).unwrap()
}

fn dump(packages: &[Package]) -> Vec<String> {
    packages.iter().map(ToString::to_string).collect()
}

fn diagnostics(result: Result<Vec<Package>, Diagnostics>) -> Vec<Diagnostic> {
    match result {
        Err(diagnostics) => diagnostics.into_vec(),
        Ok(packages) => panic!("Expected diagnostics, got {packages:?}"),
    }
}

const GENDER: &str = "# gender
gender:
  - unset # not set
  - male # male
  - female # female
";

const DEMO: &str = "# example
demo:
  id!: string # primary key
  name: string # name
  update_at?: datetime # updated at
  author[]: # authors
    id?: string # NAID
    name: string # author name
    gender: gender # author gender
";

#[test]
fn test_blank_input() {
    for text in ["", "---", "---\n---"] {
        let packages = schemac_parser::parse(&load_bare(text)).unwrap();
        assert!(packages.is_empty(), "input {text:?}");

        let packages = schemac_parser::parse(&load_envelope(text)).unwrap();
        assert!(packages.is_empty(), "input {text:?}");
    }
}

#[test]
fn test_scalar_root_rejected() {
    let result = schemac_parser::parse(&load_bare("23333"));
    assert_eq!(
        diagnostics(result),
        vec![Diagnostic::InvalidRoot { found: "scalar" }]
    );
}

#[test]
fn test_block_enum() {
    let packages = schemac_parser::parse(&load_bare(GENDER)).unwrap();
    assert_eq!(
        dump(&packages),
        vec![
            "package common\n#gender\ntype gender enum {\n\tunset#not set\n\tmale#male\n\tfemale#female\n}"
        ]
    );
}

#[test]
fn test_flow_enum() {
    let packages =
        schemac_parser::parse(&load_bare("# kind\nkind: [normal, array, optional, primary_key]"))
            .unwrap();
    assert_eq!(
        dump(&packages),
        vec![
            "package common\n#kind\ntype kind enum {\n\tnormal#\n\tarray#\n\toptional#\n\tprimary_key#\n}"
        ]
    );
}

#[test]
fn test_simple_enum_package() {
    let packages = schemac_parser::parse(&load_bare("gender: [male, female]\n")).unwrap();

    assert_eq!(packages.len(), 1);
    let common = &packages[0];
    assert!(common.is_common());
    assert!(common.structures.is_empty());
    assert!(common.dependencies.is_empty());
    let values: Vec<&str> = common.enums[0].fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(values, vec!["male", "female"]);
}

#[test]
fn test_enum_faults() {
    let result = schemac_parser::parse(&load_bare("# gender\ngender: [a, [b]]\n"));
    assert_eq!(
        diagnostics(result),
        vec![Diagnostic::NonScalarEnumValue {
            enum_name: "gender".to_string()
        }]
    );

    let result = schemac_parser::parse(&load_bare("# gender\ngender: [a, a]\n"));
    assert_eq!(
        diagnostics(result),
        vec![Diagnostic::DuplicateEnumValue("a".to_string())]
    );
}

#[test]
fn test_nested_mapping() {
    let body = "# example
demo:
  id!: string # primary key
  name: string # name
  update_at?: datetime # updated at
  author[]: # authors
    id?: string # NAID
    name: string # author name
    gender: # gender
      - unset # not set
      - male # male
      - female # female
";
    let packages = schemac_parser::parse(&load_envelope(&model("demo", body))).unwrap();

    assert_eq!(
        dump(&packages),
        vec![
            "package demo
#gender
type gender enum {
\tunset#not set
\tmale#male
\tfemale#female
}
#authors
type author struct {
\tid [Optional](string)#NAID
\tname [Normal](string)#author name
\tgender [Normal](gender)#gender
}
#example
type demo struct {
\tid [PrimaryKey](string)#primary key
\tname [Normal](string)#name
\tupdate_at [Optional](datetime)#updated at
\tauthor [Array](author)#authors
}"
        ]
    );
}

#[test]
fn test_duplicate_field() {
    let body = "demo:
  id!: string
  author[]:
    name: string
    name: [unset, male]
";
    let result = schemac_parser::parse(&load_envelope(&model("demo", body)));
    assert_eq!(
        diagnostics(result),
        vec![Diagnostic::DuplicateField("name".to_string())]
    );
}

#[test]
fn test_common_and_table_packages() {
    let text = format!("{}---\n{}", model("common", GENDER), model("demo", DEMO));
    let packages = schemac_parser::parse(&load_envelope(&text)).unwrap();

    assert_eq!(
        dump(&packages),
        vec![
            "package common
#gender
type gender enum {
\tunset#not set
\tmale#male
\tfemale#female
}",
            "package demo
#authors
type author struct {
\tid [Optional](string)#NAID
\tname [Normal](string)#author name
\tgender [Normal](gender)#author gender
}
#example
type demo struct {
\tid [PrimaryKey](string)#primary key
\tname [Normal](string)#name
\tupdate_at [Optional](datetime)#updated at
\tauthor [Array](author)#authors
}"
        ]
    );
}

#[test]
fn test_multiple_primary_tables() {
    let body = "demo:
  id!: string
wrapper:
  demo:
    id!: string
";
    let result = schemac_parser::parse(&load_envelope(&model("demo", body)));
    assert_eq!(
        diagnostics(result),
        vec![
            Diagnostic::MultiplePrimaryTables("demo".to_string()),
            Diagnostic::DuplicateStructure("demo".to_string()),
        ]
    );
}

#[test]
fn test_duplicate_package() {
    let text = format!(
        "{}---\n{}---\n{}",
        model("common", GENDER),
        model("demo", "demo:\n  id!: string\n"),
        model("demo", DEMO)
    );
    let result = schemac_parser::parse(&load_envelope(&text));
    assert_eq!(
        diagnostics(result),
        vec![Diagnostic::DuplicatePackage("demo".to_string())]
    );
}

#[test]
fn test_duplicate_enum_across_documents() {
    let text = format!(
        "{}---\n{}---\n{}",
        model("common", GENDER),
        model("common", GENDER),
        model("demo", DEMO)
    );
    let result = schemac_parser::parse(&load_envelope(&text));
    assert_eq!(
        diagnostics(result),
        vec![Diagnostic::DuplicateEnum("gender".to_string())]
    );
}

#[test]
fn test_duplicate_structure_across_documents() {
    let conf = "# config\nconf:\n  id!: string # primary key\n";
    let text = format!(
        "{}---\n{}---\n{}",
        model("common", &format!("{GENDER}{conf}")),
        model("common", conf),
        model("demo", DEMO)
    );
    let result = schemac_parser::parse(&load_envelope(&text));
    assert_eq!(
        diagnostics(result),
        vec![Diagnostic::DuplicateStructure("conf".to_string())]
    );
}

#[test]
fn test_diagnostics_from_every_document() {
    let text = "gender: [a, a]\n---\nkind: [b, b]\n";
    let result = schemac_parser::parse(&load_bare(text));
    assert_eq!(
        diagnostics(result),
        vec![
            Diagnostic::DuplicateEnumValue("a".to_string()),
            Diagnostic::DuplicateEnumValue("b".to_string()),
        ]
    );
}

#[test]
fn test_top_level_fields_returned() -> anyhow::Result<()> {
    let documents = SchemaLoader::new()
        .with_format(DocumentFormat::Bare)
        .load_str("fields.yaml", "name: string # name\ncount?: int\n")?;
    let parsed = schemac_parser::parse_document(&documents[0]);

    let fields: Vec<String> = parsed.fields.iter().map(ToString::to_string).collect();
    assert_eq!(fields, vec!["name [Normal](string)#name", "count [Optional](int)#"]);
    assert!(parsed.package.is_some_and(|p| p.is_common() && p.is_empty()));
    Ok(())
}
