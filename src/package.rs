// src/package.rs

//! Read access to Polygon problem packages
//!
//! A full package is a ZIP archive with a `problem.xml` manifest at its root.
//! Members are addressed by their archive path exactly as the manifest spells
//! it; nothing is extracted until a conversion phase asks for it.

use std::fmt;
use std::fs::File;
use std::io::{self, Cursor, Read, Seek};
use std::path::Path;

use tracing::debug;
use zip::ZipArchive;
use zip::result::ZipError;

use crate::error::{Error, Result};

/// Archive path of the manifest every full package carries at its root.
pub const MANIFEST_MEMBER: &str = "problem.xml";

/// Combined reader bound so archives can be backed by files or buffers.
pub trait ReadSeek: Read + Seek {}
impl<T: Read + Seek> ReadSeek for T {}

/// An opened Polygon package.
///
/// Member names are enumerated once at open time and kept in physical archive
/// order, so prefix scans (statement sections) see members in a stable order.
pub struct ProblemPackage {
    archive: ZipArchive<Box<dyn ReadSeek>>,
    member_names: Vec<String>,
}

impl ProblemPackage {
    /// Open a package from a ZIP file on disk.
    pub fn open(path: &Path) -> Result<Self> {
        debug!("opening package {}", path.display());
        let file = File::open(path)
            .map_err(|e| Error::Archive(format!("failed to open {}: {e}", path.display())))?;
        Self::from_reader(Box::new(file))
    }

    /// Open a package held entirely in memory.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        Self::from_reader(Box::new(Cursor::new(bytes)))
    }

    /// Open a package from any seekable reader.
    pub fn from_reader(reader: Box<dyn ReadSeek>) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::Archive(format!("not a valid ZIP archive: {e}")))?;

        let mut member_names = Vec::with_capacity(archive.len());
        for index in 0..archive.len() {
            let member = archive
                .by_index(index)
                .map_err(|e| Error::Archive(format!("unreadable archive member {index}: {e}")))?;
            member_names.push(member.name().to_string());
        }

        if !member_names.iter().any(|n| n == MANIFEST_MEMBER) {
            return Err(Error::Archive(format!(
                "package has no {MANIFEST_MEMBER} member; not a Polygon full package"
            )));
        }

        Ok(Self {
            archive,
            member_names,
        })
    }

    /// All member names in physical archive order.
    pub fn member_names(&self) -> &[String] {
        &self.member_names
    }

    pub fn has_member(&self, name: &str) -> bool {
        self.member_names.iter().any(|n| n == name)
    }

    /// Read a member fully into memory.
    pub fn read_member(&mut self, name: &str) -> Result<Vec<u8>> {
        let mut member = self
            .archive
            .by_name(name)
            .map_err(|e| member_error(name, e))?;
        let mut bytes = Vec::with_capacity(member.size() as usize);
        member.read_to_end(&mut bytes)?;
        Ok(bytes)
    }

    /// Stream a member to a file on disk, overwriting any existing file.
    pub fn extract_member_to(&mut self, name: &str, dest: &Path) -> Result<()> {
        debug!("extracting {name} -> {}", dest.display());
        let mut member = self
            .archive
            .by_name(name)
            .map_err(|e| member_error(name, e))?;
        let mut target = File::create(dest)?;
        io::copy(&mut member, &mut target)?;
        Ok(())
    }

    /// The raw bytes of the problem.xml manifest.
    pub fn manifest_bytes(&mut self) -> Result<Vec<u8>> {
        self.read_member(MANIFEST_MEMBER)
    }
}

// The archive handle itself has nothing printable; the member list is what
// identifies a package in logs and assertion failures.
impl fmt::Debug for ProblemPackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProblemPackage")
            .field("member_names", &self.member_names)
            .finish_non_exhaustive()
    }
}

fn member_error(name: &str, err: ZipError) -> Error {
    match err {
        ZipError::FileNotFound => Error::MemberNotFound {
            member: name.to_string(),
        },
        other => Error::Archive(format!("failed to read member {name}: {other}")),
    }
}
