// src/metadata.rs

//! problem.yaml generation
//!
//! The file is assembled line by line rather than through a YAML serializer:
//! problemtools reads a handful of known keys and the historical output
//! format is part of the tool's contract, down to key order.

use std::fmt;
use std::fs;
use std::str::FromStr;

use tracing::info;

use crate::error::Result;
use crate::layout::ProblemLayout;
use crate::manifest::{CheckerKind, Manifest};

/// Safety factor applied by problemtools on top of the measured time limit.
const TIME_MULTIPLIER: u32 = 2;

/// License values problemtools accepts in problem.yaml.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum License {
    Unknown,
    PublicDomain,
    Cc0,
    CcBy,
    CcBySa,
    Educational,
    Permission,
}

impl fmt::Display for License {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::PublicDomain => write!(f, "public domain"),
            Self::Cc0 => write!(f, "cc0"),
            Self::CcBy => write!(f, "cc by"),
            Self::CcBySa => write!(f, "cc by-sa"),
            Self::Educational => write!(f, "educational"),
            Self::Permission => write!(f, "permission"),
        }
    }
}

impl FromStr for License {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "unknown" => Ok(Self::Unknown),
            "public domain" | "public-domain" => Ok(Self::PublicDomain),
            "cc0" => Ok(Self::Cc0),
            "cc by" | "cc-by" => Ok(Self::CcBy),
            "cc by-sa" | "cc-by-sa" => Ok(Self::CcBySa),
            "educational" => Ok(Self::Educational),
            "permission" => Ok(Self::Permission),
            other => Err(format!("unknown license: {other}")),
        }
    }
}

/// Write problem.yaml at the output root.
pub fn write_problem_yaml(
    manifest: &Manifest,
    layout: &ProblemLayout,
    license: License,
) -> Result<()> {
    let path = layout.problem_yaml();
    fs::write(&path, render(manifest, license))?;
    info!("wrote {}", path.display());
    Ok(())
}

fn render(manifest: &Manifest, license: License) -> String {
    let mut out = String::new();
    push_line(&mut out, &format!("source: {}", manifest.url));
    push_line(&mut out, &format!("license: {license}"));
    push_line(&mut out, "limits:");
    push_line(&mut out, &format!("  time_multiplier: {TIME_MULTIPLIER}"));
    match &manifest.checker {
        CheckerKind::Custom(_) => push_line(&mut out, "validation: custom"),
        CheckerKind::Named(name) => {
            if let Some(tolerance) = float_tolerance(name) {
                push_line(&mut out, "validation:");
                push_line(
                    &mut out,
                    &format!("  validator_flags: float_tolerance {tolerance}"),
                );
            }
        }
        CheckerKind::Absent => {}
    }
    out
}

/// Tolerance implied by Polygon's standard relative-comparison checkers.
/// Other named checkers (wcmp, ncmp, yesno, ...) match problemtools' default
/// token comparison and need no flags.
fn float_tolerance(checker: &str) -> Option<&'static str> {
    match checker {
        "std::rcmp4.cpp" => Some("1e-4"),
        "std::rcmp6.cpp" => Some("1e-6"),
        "std::rcmp9.cpp" => Some("1e-9"),
        _ => None,
    }
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::SourceRef;

    fn manifest_with_checker(checker: CheckerKind) -> Manifest {
        Manifest {
            url: "https://polygon.example/p/aplusb".to_string(),
            testsets: Vec::new(),
            solutions: Vec::new(),
            checker,
            validator: None,
            has_interactor: false,
            resources: Vec::new(),
            executables: Vec::new(),
        }
    }

    #[test]
    fn test_render_with_default_token_checker() {
        let manifest = manifest_with_checker(CheckerKind::Named("std::wcmp.cpp".to_string()));
        let expected =
            "source: https://polygon.example/p/aplusb\nlicense: cc by-sa\nlimits:\n  time_multiplier: 2\n";
        assert_eq!(render(&manifest, License::CcBySa), expected);
    }

    #[test]
    fn test_render_with_tolerance_checkers() {
        for (name, tolerance) in [
            ("std::rcmp4.cpp", "1e-4"),
            ("std::rcmp6.cpp", "1e-6"),
            ("std::rcmp9.cpp", "1e-9"),
        ] {
            let manifest = manifest_with_checker(CheckerKind::Named(name.to_string()));
            let rendered = render(&manifest, License::CcBySa);
            assert!(rendered.ends_with(&format!(
                "validation:\n  validator_flags: float_tolerance {tolerance}\n"
            )));
        }
    }

    #[test]
    fn test_render_with_custom_checker() {
        let manifest = manifest_with_checker(CheckerKind::Custom(SourceRef {
            path: "files/check.cpp".to_string(),
            language: "cpp.g++17".to_string(),
        }));
        assert!(render(&manifest, License::CcBySa).ends_with("validation: custom\n"));
    }

    #[test]
    fn test_render_without_checker_has_no_validation_block() {
        let manifest = manifest_with_checker(CheckerKind::Absent);
        let rendered = render(&manifest, License::Educational);
        assert!(rendered.contains("license: educational\n"));
        assert!(!rendered.contains("validation"));
    }

    #[test]
    fn test_empty_url_still_renders_source_line() {
        let mut manifest = manifest_with_checker(CheckerKind::Absent);
        manifest.url = String::new();
        assert!(render(&manifest, License::Unknown).starts_with("source: \n"));
    }

    #[test]
    fn test_license_parsing_accepts_spaced_and_hyphenated() {
        assert_eq!("cc by-sa".parse::<License>().unwrap(), License::CcBySa);
        assert_eq!("cc-by-sa".parse::<License>().unwrap(), License::CcBySa);
        assert_eq!("public domain".parse::<License>().unwrap(), License::PublicDomain);
        assert_eq!("cc0".parse::<License>().unwrap(), License::Cc0);
        assert!("gpl".parse::<License>().is_err());
        assert_eq!(License::CcBy.to_string(), "cc by");
    }
}
