// src/lib.rs

//! polykat
//!
//! Converts Codeforces Polygon full problem packages (a ZIP archive carrying
//! a problem.xml manifest) into the Kattis problemtools directory layout.
//!
//! # Architecture
//!
//! - The manifest is parsed once into [`manifest::Manifest`]; phases never
//!   re-read the XML
//! - Each conversion phase writes a disjoint part of the output tree, so
//!   phases compose freely and re-runs overwrite cleanly
//! - Authoring defects in individual entities are logged and skipped; only
//!   archive, manifest and test-index faults abort a run

pub mod assets;
pub mod convert;
mod error;
pub mod layout;
pub mod manifest;
pub mod metadata;
pub mod package;
pub mod statement;
pub mod testdata;
pub mod xml;

pub use assets::SupportHeader;
pub use convert::{ConvertOptions, Converter, Phase};
pub use error::{Error, Result};
pub use manifest::{CheckerKind, Manifest};
pub use metadata::License;
pub use package::ProblemPackage;
pub use statement::Language;
