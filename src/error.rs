// src/error.rs

//! Error types for the conversion pipeline
//!
//! Only fatal conditions live here. Recoverable authoring defects (a testset
//! with no test-count, a solution without a source file) are logged and
//! skipped by the component that detects them.

use thiserror::Error;

/// Errors that abort a conversion run.
#[derive(Error, Debug)]
pub enum Error {
    /// The package could not be opened or enumerated as a ZIP archive.
    #[error("archive error: {0}")]
    Archive(String),

    /// A member named by the manifest is absent from the archive.
    #[error("archive member not found: {member}")]
    MemberNotFound { member: String },

    /// problem.xml is missing required structure or is not well-formed XML.
    #[error("manifest parse error: {0}")]
    ManifestParse(String),

    /// A testset declares more tests than it authors records for.
    #[error("testset {testset}: test {ordinal} has no <test> record ({authored} authored)")]
    TestIndex {
        testset: String,
        ordinal: usize,
        authored: usize,
    },

    /// The testlib.h support header could not be copied or linked.
    #[error("failed to install support header {}: {source}", .path.display())]
    SupportHeader {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    /// Filesystem failure while writing the output tree.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using our error type.
pub type Result<T> = std::result::Result<T, Error>;
