// src/testdata.rs

//! Test data partitioning
//!
//! Every testset contributes `1..=test_count` tests. Archive member names
//! come from instantiating the testset's printf-style patterns with the test
//! ordinal; the matching `<test>` record decides whether the pair lands in
//! `data/sample/` or `data/secret/<testset>/`. Sample membership is per test,
//! so one shared sample directory is correct even with several testsets.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::layout::ProblemLayout;
use crate::manifest::{Manifest, Testset};
use crate::package::ProblemPackage;

/// File recorded next to secret tests when generation info is requested.
const GENERATION_SCRIPT_FILE: &str = "_gen-test-script";

const GENERATION_SCRIPT_HEADER: &str = "\
# Commands Polygon used to generate the tests of this testset.\n\
# Informational only: the converted problem ships the generated inputs\n\
# and nothing in the judging pipeline executes this file.\n";

/// Resource files never exported to generators/. They belong to the
/// statement toolchain, not to test generation.
const EXCLUDED_RESOURCES: [&str; 4] = ["olymp.sty", "problem.tex", "statements.ftl", "defs.toml"];

/// Upper bound on accepted pad widths. Real patterns use two or three
/// digits; anything wider is an authoring error.
const MAX_PAD_WIDTH: usize = 64;

/// Generator program names seen in test generation commands.
#[derive(Debug, Default)]
pub struct GeneratorNames(BTreeSet<String>);

impl GeneratorNames {
    fn record(&mut self, cmd: &str) {
        if let Some(name) = cmd.split_whitespace().next() {
            self.0.insert(name.to_string());
        }
    }

    /// Whether an archive path mentions any recorded generator name.
    pub fn matches_path(&self, path: &str) -> bool {
        self.0.iter().any(|name| path.contains(name.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Copy every test of every testset into the data tree.
///
/// Returns the generator names collected from generation commands, which the
/// optional export pass consumes afterwards.
pub fn partition_tests(
    package: &mut ProblemPackage,
    manifest: &Manifest,
    layout: &ProblemLayout,
    record_generation_info: bool,
) -> Result<GeneratorNames> {
    let mut generators = GeneratorNames::default();
    for testset in &manifest.testsets {
        partition_testset(
            package,
            testset,
            layout,
            record_generation_info,
            &mut generators,
        )?;
    }
    Ok(generators)
}

fn partition_testset(
    package: &mut ProblemPackage,
    testset: &Testset,
    layout: &ProblemLayout,
    record_generation_info: bool,
    generators: &mut GeneratorNames,
) -> Result<()> {
    info!(
        "testset {}: copying {} tests",
        testset.name, testset.test_count
    );
    let secret_dir = layout.secret_data(&testset.name)?;

    let mut script_lines = Vec::new();
    for ordinal in 1..=testset.test_count {
        let test = testset.tests.get(ordinal - 1).ok_or_else(|| Error::TestIndex {
            testset: testset.name.clone(),
            ordinal,
            authored: testset.tests.len(),
        })?;

        let input_member = instantiate_pattern(&testset.input_pattern, ordinal);
        let answer_member = instantiate_pattern(&testset.answer_pattern, ordinal);
        let dest_dir = if test.sample {
            layout.sample_data()?
        } else {
            secret_dir.clone()
        };
        package.extract_member_to(&input_member, &dest_dir.join(format!("{ordinal}.in")))?;
        package.extract_member_to(&answer_member, &dest_dir.join(format!("{ordinal}.ans")))?;

        if let Some(cmd) = &test.generation_cmd {
            script_lines.push(format!("{cmd} > {ordinal}.in"));
            generators.record(cmd);
        }
    }

    if record_generation_info {
        write_generation_script(&secret_dir, &script_lines)?;
    }
    Ok(())
}

fn write_generation_script(dir: &Path, lines: &[String]) -> Result<()> {
    let mut script = String::from(GENERATION_SCRIPT_HEADER);
    for line in lines {
        script.push_str(line);
        script.push('\n');
    }
    fs::write(dir.join(GENERATION_SCRIPT_FILE), script)?;
    Ok(())
}

/// Export generator sources and auxiliary resources to `generators/`.
///
/// Resources are copied unless excluded; executables are copied only when a
/// recorded generator name occurs in their archive path. The directory is
/// only created once there is something to put in it.
pub fn export_generator_assets(
    package: &mut ProblemPackage,
    manifest: &Manifest,
    layout: &ProblemLayout,
    generators: &GeneratorNames,
) -> Result<()> {
    for resource in &manifest.resources {
        let Some(file_name) = Path::new(resource).file_name() else {
            continue;
        };
        let name = file_name.to_string_lossy();
        if EXCLUDED_RESOURCES.iter().any(|excluded| *excluded == name) {
            debug!("not exporting statement resource {resource}");
            continue;
        }
        let dir = layout.generators_dir()?;
        package.extract_member_to(resource, &dir.join(file_name))?;
    }

    for executable in &manifest.executables {
        if !generators.matches_path(executable) {
            debug!("{executable} is not a known generator, not exporting");
            continue;
        }
        let Some(file_name) = Path::new(executable).file_name() else {
            continue;
        };
        let dir = layout.generators_dir()?;
        package.extract_member_to(executable, &dir.join(file_name))?;
    }
    Ok(())
}

/// Instantiate a printf-style member pattern with a test ordinal.
///
/// Supports the subset Polygon emits: `%d`, zero-padded `%0Nd`, space-padded
/// `%Nd` and the `%%` escape. Anything else after a `%` passes through
/// unchanged, and pad widths are clamped to a small upper bound.
pub fn instantiate_pattern(pattern: &str, ordinal: usize) -> String {
    let mut out = String::with_capacity(pattern.len() + 4);
    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        if chars.peek() == Some(&'%') {
            chars.next();
            out.push('%');
            continue;
        }
        let mut zero_pad = false;
        if chars.peek() == Some(&'0') {
            zero_pad = true;
            chars.next();
        }
        let mut width = 0usize;
        let mut digits = String::new();
        while let Some(&c) = chars.peek() {
            let Some(digit) = c.to_digit(10) else { break };
            width = width.saturating_mul(10).saturating_add(digit as usize);
            digits.push(c);
            chars.next();
        }
        if chars.peek() == Some(&'d') {
            chars.next();
            let width = width.min(MAX_PAD_WIDTH);
            if zero_pad {
                out.push_str(&format!("{ordinal:0width$}"));
            } else {
                out.push_str(&format!("{ordinal:width$}"));
            }
        } else {
            out.push('%');
            if zero_pad {
                out.push('0');
            }
            out.push_str(&digits);
        }
    }
    out
}
