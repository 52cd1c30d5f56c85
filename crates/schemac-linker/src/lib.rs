#![deny(rust_2018_idioms)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

//! # schemac-linker
//!
//! Resolves the raw field types of linked packages into target-language
//! types and records the support packages each package has to import.

pub mod linker;
pub mod typemap;

pub use linker::{NamingFn, TypeLinker};
pub use typemap::{TypeMap, TypeMapping};
