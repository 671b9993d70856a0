// src/assets.rs

//! Solution, checker and validator placement
//!
//! Solutions are bucketed by their verdict tag into submissions/
//! subdirectories. A custom checker or validator is copied with its source
//! file name kept, and when it looks like native code it also gets the
//! testlib.h support header next to it so problemtools can compile it as is.

use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::layout::{self, ProblemLayout};
use crate::manifest::{CheckerKind, Manifest, SolutionTag, SourceRef};
use crate::package::ProblemPackage;

/// How the testlib.h support header is installed next to custom sources.
#[derive(Debug, Clone)]
pub enum SupportHeader {
    /// Copy the header from this path.
    Copy(PathBuf),
    /// Create a relative symbolic link pointing at this target.
    Symlink(PathBuf),
}

/// Copy every bucketable solution into its submissions/ bucket.
pub fn copy_solutions(
    package: &mut ProblemPackage,
    manifest: &Manifest,
    layout: &ProblemLayout,
) -> Result<()> {
    for solution in &manifest.solutions {
        let Some(bucket) = bucket_for(&solution.tag) else {
            debug!("solution tag {} has no bucket, skipping", solution.tag);
            continue;
        };
        let Some(source) = &solution.source else {
            warn!("solution tagged {} has no source path, skipping", solution.tag);
            continue;
        };
        let Some(file_name) = Path::new(source).file_name() else {
            warn!("solution source {source:?} has no file name, skipping");
            continue;
        };
        let dir = layout.submissions_bucket(bucket)?;
        package.extract_member_to(source, &dir.join(file_name))?;
    }
    Ok(())
}

/// Map a solution tag to its submissions bucket. Memory limit violations
/// surface as runtime errors under problemtools' default limits, so they go
/// to run_time_error.
fn bucket_for(tag: &SolutionTag) -> Option<&'static str> {
    match tag {
        SolutionTag::Accepted | SolutionTag::Main => Some(layout::BUCKET_ACCEPTED),
        SolutionTag::TimeLimitExceeded => Some(layout::BUCKET_TIME_LIMIT_EXCEEDED),
        SolutionTag::WrongAnswer => Some(layout::BUCKET_WRONG_ANSWER),
        SolutionTag::MemoryLimitExceeded => Some(layout::BUCKET_RUN_TIME_ERROR),
        SolutionTag::Other(_) => None,
    }
}

/// Place a custom checker under output_validators/checker/. Named standard
/// checkers have no files to place; their semantics surface in problem.yaml.
pub fn copy_checker(
    package: &mut ProblemPackage,
    manifest: &Manifest,
    layout: &ProblemLayout,
    header: &SupportHeader,
    native_markers: &[String],
) -> Result<()> {
    match &manifest.checker {
        CheckerKind::Absent => debug!("no checker to place"),
        CheckerKind::Named(name) => debug!("standard checker {name}, nothing to copy"),
        CheckerKind::Custom(source) => {
            info!("custom checker {}", source.path);
            let dir = layout.checker_dir()?;
            place_source(package, source, &dir, header, native_markers)?;
        }
    }
    Ok(())
}

/// Place the input validator under input_validators/extracted_validator/.
pub fn copy_validator(
    package: &mut ProblemPackage,
    manifest: &Manifest,
    layout: &ProblemLayout,
    header: &SupportHeader,
    native_markers: &[String],
) -> Result<()> {
    let Some(source) = &manifest.validator else {
        debug!("no input validator to place");
        return Ok(());
    };
    info!("input validator {}", source.path);
    let dir = layout.validator_dir()?;
    place_source(package, source, &dir, header, native_markers)
}

fn place_source(
    package: &mut ProblemPackage,
    source: &SourceRef,
    dir: &Path,
    header: &SupportHeader,
    native_markers: &[String],
) -> Result<()> {
    let Some(file_name) = Path::new(&source.path).file_name() else {
        warn!("source path {:?} has no file name, skipping", source.path);
        return Ok(());
    };
    package.extract_member_to(&source.path, &dir.join(file_name))?;

    let is_native = native_markers
        .iter()
        .any(|marker| source.language.contains(marker.as_str()));
    if is_native {
        install_support_header(dir, header)?;
    } else {
        debug!(
            "source type {:?} not marked native, no support header",
            source.language
        );
    }
    Ok(())
}

fn install_support_header(dir: &Path, header: &SupportHeader) -> Result<()> {
    match header {
        SupportHeader::Copy(source) => {
            let name = source.file_name().unwrap_or_else(|| OsStr::new("testlib.h"));
            let dest = dir.join(name);
            debug!("copying support header {} -> {}", source.display(), dest.display());
            fs::copy(source, &dest).map_err(|e| Error::SupportHeader {
                path: source.clone(),
                source: e,
            })?;
            Ok(())
        }
        SupportHeader::Symlink(target) => {
            let name = target.file_name().unwrap_or_else(|| OsStr::new("testlib.h"));
            let dest = dir.join(name);
            // A stale link or file would make symlink creation fail.
            if dest.symlink_metadata().is_ok() {
                fs::remove_file(&dest)?;
            }
            debug!("linking support header {} -> {}", dest.display(), target.display());
            symlink(target, &dest).map_err(|e| Error::SupportHeader {
                path: target.clone(),
                source: e,
            })
        }
    }
}

#[cfg(unix)]
fn symlink(target: &Path, dest: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, dest)
}

#[cfg(not(unix))]
fn symlink(_target: &Path, _dest: &Path) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "symbolic links to the support header require a Unix platform",
    ))
}
