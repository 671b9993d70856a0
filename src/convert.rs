// src/convert.rs

//! Conversion orchestration
//!
//! [`Converter`] owns the opened package, the parsed manifest and the output
//! layout, and runs the enabled phases in a fixed order. Each phase writes a
//! disjoint part of the output tree, so a subset of phases is always safe to
//! run and re-run.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::{info, warn};

use crate::assets::{self, SupportHeader};
use crate::error::Result;
use crate::layout::ProblemLayout;
use crate::manifest::Manifest;
use crate::metadata::{self, License};
use crate::package::ProblemPackage;
use crate::statement::{self, Language};
use crate::testdata;

/// Independently runnable parts of a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Statement,
    Tests,
    Solutions,
    Checker,
    Metadata,
}

impl Phase {
    /// Phases run when the caller does not pick a subset. Metadata is opt-in
    /// so an existing hand-edited problem.yaml survives a re-conversion.
    pub fn default_set() -> BTreeSet<Phase> {
        [Self::Statement, Self::Tests, Self::Solutions, Self::Checker]
            .into_iter()
            .collect()
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Statement => write!(f, "statement"),
            Self::Tests => write!(f, "tests"),
            Self::Solutions => write!(f, "solutions"),
            Self::Checker => write!(f, "checker"),
            Self::Metadata => write!(f, "metadata"),
        }
    }
}

impl FromStr for Phase {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "statement" => Ok(Self::Statement),
            "tests" => Ok(Self::Tests),
            "solutions" => Ok(Self::Solutions),
            "checker" => Ok(Self::Checker),
            "metadata" => Ok(Self::Metadata),
            other => Err(format!("unknown phase: {other}")),
        }
    }
}

/// Options controlling a conversion run.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Statement language to convert.
    pub lang: Language,
    /// License recorded in problem.yaml.
    pub license: License,
    /// Phases to run.
    pub phases: BTreeSet<Phase>,
    /// Record generation scripts and export generator sources.
    pub test_generation_info: bool,
    /// How testlib.h lands next to custom checkers and validators.
    pub support_header: SupportHeader,
    /// Substrings of Polygon source types that count as native code and
    /// therefore need the support header.
    pub native_source_markers: Vec<String>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            lang: Language::English,
            license: License::CcBySa,
            phases: Phase::default_set(),
            test_generation_info: false,
            support_header: SupportHeader::Copy(PathBuf::from("testlib.h")),
            native_source_markers: vec!["cpp".to_string()],
        }
    }
}

/// Drives one package through the enabled conversion phases.
pub struct Converter {
    package: ProblemPackage,
    manifest: Manifest,
    layout: ProblemLayout,
    options: ConvertOptions,
}

impl Converter {
    /// Parse the package manifest and create the output root.
    pub fn new(
        mut package: ProblemPackage,
        out_dir: &Path,
        options: ConvertOptions,
    ) -> Result<Self> {
        let manifest_bytes = package.manifest_bytes()?;
        let manifest = Manifest::parse(&manifest_bytes)?;
        let layout = ProblemLayout::create(out_dir)?;
        Ok(Self {
            package,
            manifest,
            layout,
            options,
        })
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Run every enabled phase.
    pub fn run(&mut self) -> Result<()> {
        if self.manifest.has_interactor {
            warn!("package declares an interactor; interactive problems are not supported");
        }

        if self.enabled(Phase::Statement) {
            info!("assembling statement");
            statement::assemble(&mut self.package, &self.layout, self.options.lang)?;
        }

        if self.enabled(Phase::Tests) {
            info!("partitioning tests");
            let generators = testdata::partition_tests(
                &mut self.package,
                &self.manifest,
                &self.layout,
                self.options.test_generation_info,
            )?;
            if self.options.test_generation_info {
                testdata::export_generator_assets(
                    &mut self.package,
                    &self.manifest,
                    &self.layout,
                    &generators,
                )?;
            }
        }

        if self.enabled(Phase::Solutions) {
            info!("copying solutions");
            assets::copy_solutions(&mut self.package, &self.manifest, &self.layout)?;
        }

        if self.enabled(Phase::Checker) {
            info!("placing checker and validator");
            assets::copy_checker(
                &mut self.package,
                &self.manifest,
                &self.layout,
                &self.options.support_header,
                &self.options.native_source_markers,
            )?;
            assets::copy_validator(
                &mut self.package,
                &self.manifest,
                &self.layout,
                &self.options.support_header,
                &self.options.native_source_markers,
            )?;
        }

        if self.enabled(Phase::Metadata) {
            metadata::write_problem_yaml(&self.manifest, &self.layout, self.options.license)?;
        }

        info!("conversion finished: {}", self.layout.root().display());
        Ok(())
    }

    fn enabled(&self, phase: Phase) -> bool {
        self.options.phases.contains(&phase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_phases_exclude_metadata() {
        let phases = Phase::default_set();
        assert!(phases.contains(&Phase::Statement));
        assert!(phases.contains(&Phase::Tests));
        assert!(phases.contains(&Phase::Solutions));
        assert!(phases.contains(&Phase::Checker));
        assert!(!phases.contains(&Phase::Metadata));
    }

    #[test]
    fn test_phase_parsing() {
        assert_eq!("tests".parse::<Phase>().unwrap(), Phase::Tests);
        assert_eq!("metadata".parse::<Phase>().unwrap(), Phase::Metadata);
        assert!("everything".parse::<Phase>().is_err());
        assert_eq!(Phase::Checker.to_string(), "checker");
    }

    #[test]
    fn test_default_options() {
        let options = ConvertOptions::default();
        assert_eq!(options.lang, Language::English);
        assert_eq!(options.license, License::CcBySa);
        assert!(!options.test_generation_info);
        assert_eq!(options.native_source_markers, ["cpp"]);
        assert!(matches!(options.support_header, SupportHeader::Copy(_)));
    }
}
