// src/statement.rs

//! Statement assembly
//!
//! Polygon ships statements as loose fragments under
//! `statement-sections/<language>/` (legend.tex, input.tex, ...) plus any
//! media the LaTeX references. Problemtools wants one `problem.<lang>.tex`.
//! We copy everything for the selected language into `problem_statement/`,
//! then fold the known fragments into the composite file and delete them so
//! the directory holds only the composite and its media.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use tracing::{debug, info};

use crate::error::Result;
use crate::layout::ProblemLayout;
use crate::package::ProblemPackage;

/// Statement languages supported by the converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    Vietnamese,
}

impl Language {
    /// Directory name Polygon uses under statement-sections/.
    pub fn full_name(&self) -> &'static str {
        match self {
            Self::English => "english",
            Self::Vietnamese => "vietnamese",
        }
    }

    /// Short code used in the composite file name, problem.<code>.tex.
    pub fn short_code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Vietnamese => "vn",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "en" | "english" => Ok(Self::English),
            "vn" | "vietnamese" => Ok(Self::Vietnamese),
            other => Err(format!("unsupported language: {other}")),
        }
    }
}

/// Fragment files folded into the composite, in output order, with the
/// heading printed above each. The name fragment is handled separately.
const SECTIONS: [(&str, Option<&str>); 5] = [
    ("legend", None),
    ("input", Some("Input")),
    ("output", Some("Output")),
    ("notes", Some("Explanation of the sample")),
    ("scoring", Some("Scoring")),
];

/// Copy the statement for `lang` out of the package and fold its fragments
/// into `problem_statement/problem.<code>.tex`.
///
/// A package without statement sections for the language is fine; nothing is
/// written and no composite is produced.
pub fn assemble(package: &mut ProblemPackage, layout: &ProblemLayout, lang: Language) -> Result<()> {
    let prefix = format!("statement-sections/{}/", lang.full_name());
    let members: Vec<String> = package
        .member_names()
        .iter()
        .filter(|n| n.starts_with(&prefix))
        .cloned()
        .collect();
    if members.is_empty() {
        debug!("no statement sections for language {lang}");
        return Ok(());
    }

    let statement_dir = layout.problem_statement()?;
    for member in &members {
        let Some(file_name) = Path::new(member).file_name() else {
            continue;
        };
        let dest = statement_dir.join(file_name);
        // Directory markers and extensionless entries are not statement files.
        if dest.extension().is_none_or(|e| e.is_empty()) {
            continue;
        }
        package.extract_member_to(member, &dest)?;
    }

    write_composite(&statement_dir, lang)?;
    Ok(())
}

/// Fold the fragment files present in `dir` into the composite statement,
/// removing each fragment afterwards. Re-running the full phase stays
/// idempotent because [`assemble`] re-extracts the fragments first.
fn write_composite(dir: &Path, lang: Language) -> Result<()> {
    let mut doc = String::new();

    if let Some(name) = take_fragment(dir, "name")? {
        let name = name.trim();
        info!("problem name: {name}");
        push_line(&mut doc, &format!("\\problemname{{ {name} }}"));
    }

    for (fragment, heading) in SECTIONS {
        if let Some(text) = take_fragment(dir, fragment)? {
            if let Some(heading) = heading {
                push_line(&mut doc, &format!("\\section*{{{heading}}}"));
            }
            push_line(&mut doc, &text);
        }
    }

    let composite = dir.join(format!("problem.{}.tex", lang.short_code()));
    fs::write(&composite, doc)?;
    debug!("wrote composite statement {}", composite.display());
    Ok(())
}

/// Read and delete `<name>.tex` in `dir`, if present.
fn take_fragment(dir: &Path, name: &str) -> Result<Option<String>> {
    let path = dir.join(format!("{name}.tex"));
    if !path.is_file() {
        return Ok(None);
    }
    let text = fs::read_to_string(&path)?;
    fs::remove_file(&path)?;
    Ok(Some(text))
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}
