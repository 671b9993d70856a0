// src/layout.rs

//! The problemtools output tree
//!
//! All destination paths live here so the directory names appear exactly
//! once. Accessors create their directory on first use and are idempotent,
//! which is what makes re-running a conversion over an existing output tree
//! safe.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Submissions bucket directory names.
pub const BUCKET_ACCEPTED: &str = "accepted";
pub const BUCKET_TIME_LIMIT_EXCEEDED: &str = "time_limit_exceeded";
pub const BUCKET_WRONG_ANSWER: &str = "wrong_answer";
pub const BUCKET_RUN_TIME_ERROR: &str = "run_time_error";

/// Root of a problemtools problem directory.
#[derive(Debug, Clone)]
pub struct ProblemLayout {
    root: PathBuf,
}

impl ProblemLayout {
    /// Create the layout rooted at `root`, creating the root directory.
    pub fn create(root: &Path) -> Result<Self> {
        fs::create_dir_all(root)?;
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn problem_statement(&self) -> Result<PathBuf> {
        self.ensure(&["problem_statement"])
    }

    pub fn sample_data(&self) -> Result<PathBuf> {
        self.ensure(&["data", "sample"])
    }

    /// Secret data directory for one testset, named after the testset.
    pub fn secret_data(&self, testset: &str) -> Result<PathBuf> {
        self.ensure(&["data", "secret", testset])
    }

    pub fn submissions_bucket(&self, bucket: &str) -> Result<PathBuf> {
        self.ensure(&["submissions", bucket])
    }

    pub fn checker_dir(&self) -> Result<PathBuf> {
        self.ensure(&["output_validators", "checker"])
    }

    pub fn validator_dir(&self) -> Result<PathBuf> {
        self.ensure(&["input_validators", "extracted_validator"])
    }

    pub fn generators_dir(&self) -> Result<PathBuf> {
        self.ensure(&["generators"])
    }

    /// Path of problem.yaml at the tree root. Not created here.
    pub fn problem_yaml(&self) -> PathBuf {
        self.root.join("problem.yaml")
    }

    fn ensure(&self, parts: &[&str]) -> Result<PathBuf> {
        let mut path = self.root.clone();
        for part in parts {
            path.push(part);
        }
        fs::create_dir_all(&path)?;
        Ok(path)
    }
}
