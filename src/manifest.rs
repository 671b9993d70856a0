// src/manifest.rs

//! Parsed model of the problem.xml manifest
//!
//! The manifest is parsed once into plain entity collections; conversion
//! phases never touch the XML again. Missing optional structure degrades to
//! empty collections, while structurally broken testsets are dropped with a
//! warning so one bad declaration cannot sink the rest of the package.

use tracing::{debug, warn};

use crate::error::Result;
use crate::xml::{self, XmlElement};

/// Everything the conversion phases need to know about a package.
#[derive(Debug, Clone)]
pub struct Manifest {
    /// Problem URL from the root element, empty when not declared.
    pub url: String,
    pub testsets: Vec<Testset>,
    pub solutions: Vec<Solution>,
    pub checker: CheckerKind,
    pub validator: Option<SourceRef>,
    pub has_interactor: bool,
    /// Archive paths of declared resource files.
    pub resources: Vec<String>,
    /// Archive paths of declared executable sources.
    pub executables: Vec<String>,
}

/// One `<testset>` under `<judging>`.
#[derive(Debug, Clone)]
pub struct Testset {
    pub name: String,
    /// printf-style pattern for input members, e.g. `tests/%02d`.
    pub input_pattern: String,
    /// printf-style pattern for answer members, e.g. `tests/%02d.a`.
    pub answer_pattern: String,
    /// Declared number of tests; drives pattern instantiation.
    pub test_count: usize,
    /// Per-test records in authoring order.
    pub tests: Vec<TestCase>,
}

#[derive(Debug, Clone)]
pub struct TestCase {
    pub sample: bool,
    /// Generation command for generated tests, absent for manual ones.
    pub generation_cmd: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Solution {
    pub tag: SolutionTag,
    /// Archive path of the source file, when one is declared.
    pub source: Option<String>,
}

/// Verdict expectation attached to a solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolutionTag {
    Accepted,
    Main,
    TimeLimitExceeded,
    WrongAnswer,
    MemoryLimitExceeded,
    /// Any tag this tool does not map to a submissions bucket.
    Other(String),
}

impl SolutionTag {
    fn from_attr(tag: &str) -> Self {
        match tag {
            "accepted" => Self::Accepted,
            "main" => Self::Main,
            "time-limit-exceeded" => Self::TimeLimitExceeded,
            "wrong-answer" => Self::WrongAnswer,
            "memory-limit-exceeded" => Self::MemoryLimitExceeded,
            other => Self::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for SolutionTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Accepted => write!(f, "accepted"),
            Self::Main => write!(f, "main"),
            Self::TimeLimitExceeded => write!(f, "time-limit-exceeded"),
            Self::WrongAnswer => write!(f, "wrong-answer"),
            Self::MemoryLimitExceeded => write!(f, "memory-limit-exceeded"),
            Self::Other(tag) => write!(f, "{tag}"),
        }
    }
}

/// How answers are judged, decided from the `<checker>` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckerKind {
    /// A standard Polygon checker referenced by name, e.g. `std::rcmp6.cpp`.
    Named(String),
    /// A problem-specific checker shipped as source in the package.
    Custom(SourceRef),
    /// No usable checker declaration.
    Absent,
}

/// A source file referenced by the manifest, with Polygon's source type tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRef {
    pub path: String,
    /// Polygon source type, e.g. `cpp.g++17`. Empty when not declared.
    pub language: String,
}

impl Manifest {
    /// Parse manifest bytes into the entity model.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let root = xml::parse_document(bytes)?;

        let url = root.attr_or_empty("url").to_string();

        let mut testsets = Vec::new();
        if let Some(judging) = root.child("judging") {
            for element in judging.children("testset") {
                if let Some(testset) = parse_testset(element) {
                    testsets.push(testset);
                }
            }
        }

        let assets = root.child("assets");
        let solutions = assets
            .and_then(|a| a.child("solutions"))
            .map(parse_solutions)
            .unwrap_or_default();
        let checker = assets
            .and_then(|a| a.descendant("checker"))
            .map(classify_checker)
            .unwrap_or(CheckerKind::Absent);
        let validator = assets
            .and_then(|a| a.child("validators"))
            .and_then(|v| v.children("validator").next())
            .and_then(|element| {
                let source = source_ref(element);
                if source.is_none() {
                    warn!("validator element has no source path, ignoring it");
                }
                source
            });
        let has_interactor = assets.is_some_and(|a| a.descendant("interactor").is_some());

        let files = root.child("files");
        let resources = files
            .and_then(|f| f.child("resources"))
            .map(|r| {
                r.children("file")
                    .filter_map(|f| f.attr("path"))
                    .filter(|p| !p.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        let executables = files
            .and_then(|f| f.child("executables"))
            .map(|e| {
                e.children("executable")
                    .filter_map(|x| x.child("source"))
                    .filter_map(|s| s.attr("path"))
                    .filter(|p| !p.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let manifest = Manifest {
            url,
            testsets,
            solutions,
            checker,
            validator,
            has_interactor,
            resources,
            executables,
        };
        debug!(
            "parsed manifest: {} testsets, {} solutions, {} resources, {} executables",
            manifest.testsets.len(),
            manifest.solutions.len(),
            manifest.resources.len(),
            manifest.executables.len()
        );
        Ok(manifest)
    }
}

fn parse_testset(element: &XmlElement) -> Option<Testset> {
    let name = element.attr_or_empty("name").to_string();

    let Some(input_pattern) = element.child_text("input-path-pattern") else {
        warn!("testset {name:?}: no input-path-pattern, skipping testset");
        return None;
    };
    let Some(answer_pattern) = element.child_text("answer-path-pattern") else {
        warn!("testset {name:?}: no answer-path-pattern, skipping testset");
        return None;
    };
    let Some(count_text) = element.child_text("test-count") else {
        warn!("testset {name:?}: no test-count, skipping testset");
        return None;
    };
    let Ok(test_count) = count_text.parse::<usize>() else {
        warn!("testset {name:?}: unparsable test-count {count_text:?}, skipping testset");
        return None;
    };

    let tests = element
        .child("tests")
        .map(|t| t.children("test").map(parse_test).collect())
        .unwrap_or_default();

    Some(Testset {
        name,
        input_pattern: input_pattern.to_string(),
        answer_pattern: answer_pattern.to_string(),
        test_count,
        tests,
    })
}

fn parse_test(element: &XmlElement) -> TestCase {
    TestCase {
        sample: element.attr("sample") == Some("true"),
        generation_cmd: element
            .attr("cmd")
            .filter(|c| !c.is_empty())
            .map(str::to_string),
    }
}

fn parse_solutions(solutions: &XmlElement) -> Vec<Solution> {
    solutions
        .children("solution")
        .map(|element| Solution {
            tag: SolutionTag::from_attr(element.attr_or_empty("tag")),
            source: element
                .child("source")
                .and_then(|s| s.attr("path"))
                .filter(|p| !p.is_empty())
                .map(str::to_string),
        })
        .collect()
}

fn classify_checker(element: &XmlElement) -> CheckerKind {
    if let Some(name) = element.attr("name") {
        if !name.is_empty() {
            return CheckerKind::Named(name.to_string());
        }
    }
    match source_ref(element) {
        Some(source) => CheckerKind::Custom(source),
        None => {
            warn!("checker element has neither a name nor a source path, ignoring it");
            CheckerKind::Absent
        }
    }
}

fn source_ref(element: &XmlElement) -> Option<SourceRef> {
    let source = element.child("source")?;
    let path = source.attr("path").filter(|p| !p.is_empty())?;
    Some(SourceRef {
        path: path.to_string(),
        language: source.attr_or_empty("type").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_MANIFEST: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<problem url="https://polygon.example/p/aplusb">
    <judging>
        <testset name="tests">
            <input-path-pattern>tests/%02d</input-path-pattern>
            <answer-path-pattern>tests/%02d.a</answer-path-pattern>
            <test-count>3</test-count>
            <tests>
                <test method="manual" sample="true"/>
                <test method="generated" cmd="gen 1 100"/>
                <test method="generated" cmd="gen 2 100"/>
            </tests>
        </testset>
    </judging>
    <files>
        <resources>
            <file path="files/olymp.sty"/>
            <file path="files/lib.h"/>
        </resources>
        <executables>
            <executable>
                <source path="files/gen.cpp" type="cpp.g++17"/>
            </executable>
        </executables>
    </files>
    <assets>
        <checker type="testlib">
            <source path="files/check.cpp" type="cpp.g++17"/>
        </checker>
        <validators>
            <validator>
                <source path="files/val.cpp" type="cpp.g++17"/>
            </validator>
        </validators>
        <solutions>
            <solution tag="main">
                <source path="solutions/a.cpp" type="cpp.g++17"/>
            </solution>
            <solution tag="rejected">
                <source path="solutions/bad.cpp" type="cpp.g++17"/>
            </solution>
        </solutions>
    </assets>
</problem>"#;

    #[test]
    fn test_parse_full_manifest() {
        let manifest = Manifest::parse(FULL_MANIFEST.as_bytes()).unwrap();
        assert_eq!(manifest.url, "https://polygon.example/p/aplusb");
        assert_eq!(manifest.testsets.len(), 1);

        let testset = &manifest.testsets[0];
        assert_eq!(testset.name, "tests");
        assert_eq!(testset.input_pattern, "tests/%02d");
        assert_eq!(testset.answer_pattern, "tests/%02d.a");
        assert_eq!(testset.test_count, 3);
        assert_eq!(testset.tests.len(), 3);
        assert!(testset.tests[0].sample);
        assert_eq!(testset.tests[0].generation_cmd, None);
        assert!(!testset.tests[1].sample);
        assert_eq!(testset.tests[1].generation_cmd.as_deref(), Some("gen 1 100"));

        assert_eq!(manifest.resources, ["files/olymp.sty", "files/lib.h"]);
        assert_eq!(manifest.executables, ["files/gen.cpp"]);
        assert!(!manifest.has_interactor);
    }

    #[test]
    fn test_parse_solutions_keeps_unknown_tags() {
        let manifest = Manifest::parse(FULL_MANIFEST.as_bytes()).unwrap();
        assert_eq!(manifest.solutions.len(), 2);
        assert_eq!(manifest.solutions[0].tag, SolutionTag::Main);
        assert_eq!(
            manifest.solutions[0].source.as_deref(),
            Some("solutions/a.cpp")
        );
        assert_eq!(
            manifest.solutions[1].tag,
            SolutionTag::Other("rejected".to_string())
        );
    }

    #[test]
    fn test_custom_checker_and_validator() {
        let manifest = Manifest::parse(FULL_MANIFEST.as_bytes()).unwrap();
        assert_eq!(
            manifest.checker,
            CheckerKind::Custom(SourceRef {
                path: "files/check.cpp".to_string(),
                language: "cpp.g++17".to_string(),
            })
        );
        let validator = manifest.validator.unwrap();
        assert_eq!(validator.path, "files/val.cpp");
    }

    #[test]
    fn test_named_checker_wins_over_source() {
        let doc = r#"<problem>
            <assets>
                <checker name="std::rcmp6.cpp" type="testlib">
                    <source path="files/check.cpp" type="cpp.g++17"/>
                </checker>
            </assets>
        </problem>"#;
        let manifest = Manifest::parse(doc.as_bytes()).unwrap();
        assert_eq!(
            manifest.checker,
            CheckerKind::Named("std::rcmp6.cpp".to_string())
        );
    }

    #[test]
    fn test_checker_without_name_or_source_is_absent() {
        let doc = r#"<problem><assets><checker type="testlib"/></assets></problem>"#;
        let manifest = Manifest::parse(doc.as_bytes()).unwrap();
        assert_eq!(manifest.checker, CheckerKind::Absent);
    }

    #[test]
    fn test_minimal_manifest_degrades_to_empty_collections() {
        let manifest = Manifest::parse(b"<problem/>").unwrap();
        assert_eq!(manifest.url, "");
        assert!(manifest.testsets.is_empty());
        assert!(manifest.solutions.is_empty());
        assert_eq!(manifest.checker, CheckerKind::Absent);
        assert!(manifest.validator.is_none());
        assert!(manifest.resources.is_empty());
        assert!(manifest.executables.is_empty());
    }

    #[test]
    fn test_broken_testset_is_dropped_not_fatal() {
        let doc = r#"<problem>
            <judging>
                <testset name="broken">
                    <input-path-pattern>t/%d</input-path-pattern>
                    <answer-path-pattern>t/%d.a</answer-path-pattern>
                    <test-count>many</test-count>
                </testset>
                <testset name="good">
                    <input-path-pattern>tests/%d</input-path-pattern>
                    <answer-path-pattern>tests/%d.a</answer-path-pattern>
                    <test-count>1</test-count>
                    <tests><test method="manual"/></tests>
                </testset>
            </judging>
        </problem>"#;
        let manifest = Manifest::parse(doc.as_bytes()).unwrap();
        assert_eq!(manifest.testsets.len(), 1);
        assert_eq!(manifest.testsets[0].name, "good");
    }

    #[test]
    fn test_interactor_is_detected() {
        let doc = r#"<problem>
            <assets>
                <interactor>
                    <source path="files/interactor.cpp" type="cpp.g++17"/>
                </interactor>
            </assets>
        </problem>"#;
        let manifest = Manifest::parse(doc.as_bytes()).unwrap();
        assert!(manifest.has_interactor);
    }

    #[test]
    fn test_solution_tag_display_round_trip() {
        for (attr, expected) in [
            ("accepted", "accepted"),
            ("main", "main"),
            ("time-limit-exceeded", "time-limit-exceeded"),
            ("wrong-answer", "wrong-answer"),
            ("memory-limit-exceeded", "memory-limit-exceeded"),
            ("rejected", "rejected"),
        ] {
            assert_eq!(SolutionTag::from_attr(attr).to_string(), expected);
        }
    }
}
