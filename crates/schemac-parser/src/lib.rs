#![deny(rust_2018_idioms)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

//! # schemac-parser
//!
//! Turns schema documents into the package IR.
//!
//! Each document is parsed on its own into a candidate package; the batch
//! linker then merges candidates without a primary table into the `common`
//! package, reports conflicting declarations, and orders the result.
//!
//! ```
//! use schemac_ir::{Document, Entry, Node};
//!
//! let gender = Node::sequence(vec![Node::scalar("male"), Node::scalar("female")]);
//! let document = Document::new(Node::mapping(vec![Entry::new(Node::scalar("gender"), gender)]));
//!
//! let packages = schemac_parser::parse(&[document]).unwrap();
//! assert_eq!(packages.len(), 1);
//! assert_eq!(packages[0].name, "common");
//! ```

pub mod comment;
pub mod conflict;
pub mod linker;
pub mod parser;

pub use linker::BatchLinker;
pub use parser::{ParsedDocument, parse_document};

use schemac_ir::{Diagnostics, Document, Package};
use tracing::info;

/// Parse and link a batch of documents
///
/// Every document is parsed even when an earlier one raised diagnostics, so a
/// failed batch reports everything found.
pub fn parse(documents: &[Document]) -> Result<Vec<Package>, Diagnostics> {
    let mut linker = BatchLinker::new();

    for document in documents {
        let parsed = parse_document(document);
        if let Some(package) = parsed.package {
            linker.add_package(package);
        }
        linker.add_diagnostics(parsed.diagnostics);
    }

    let result = linker.link();
    match &result {
        Ok(packages) => info!(
            documents = documents.len(),
            packages = packages.len(),
            "parsed schema batch"
        ),
        Err(diagnostics) => info!(
            documents = documents.len(),
            diagnostics = diagnostics.len(),
            "schema batch failed"
        ),
    }
    result
}
