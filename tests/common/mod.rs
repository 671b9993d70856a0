// tests/common/mod.rs

//! Shared fixtures for integration tests
//!
//! Packages are built in memory as real ZIP archives so tests exercise the
//! same archive path as production conversions.

use std::io::{Cursor, Write};

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Builds a Polygon-style package archive member by member.
pub struct PackageBuilder {
    writer: ZipWriter<Cursor<Vec<u8>>>,
}

impl PackageBuilder {
    pub fn new() -> Self {
        Self {
            writer: ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    pub fn member(mut self, name: &str, content: &[u8]) -> Self {
        self.writer
            .start_file(name, SimpleFileOptions::default())
            .unwrap();
        self.writer.write_all(content).unwrap();
        self
    }

    pub fn manifest(self, xml: &str) -> Self {
        self.member("problem.xml", xml.as_bytes())
    }

    pub fn directory(mut self, name: &str) -> Self {
        self.writer
            .add_directory(name, SimpleFileOptions::default())
            .unwrap();
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.writer.finish().unwrap().into_inner()
    }
}

/// Wrap a manifest body in the XML header and problem root element.
pub fn problem_xml(body: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<problem url=\"https://polygon.example/p/aplusb\">\n{body}\n</problem>"
    )
}

/// A three-test testset named `tests` with zero-padded member patterns and
/// test 2 marked as the sample.
pub fn standard_testset() -> &'static str {
    r#"<judging>
        <testset name="tests">
            <input-path-pattern>tests/%02d</input-path-pattern>
            <answer-path-pattern>tests/%02d.a</answer-path-pattern>
            <test-count>3</test-count>
            <tests>
                <test method="generated" cmd="gen 1 100"/>
                <test method="manual" sample="true"/>
                <test method="generated" cmd="gen 3 100"/>
            </tests>
        </testset>
    </judging>"#
}

/// Add the six members the standard testset refers to.
pub fn with_standard_tests(builder: PackageBuilder) -> PackageBuilder {
    builder
        .member("tests/01", b"1 1\n")
        .member("tests/01.a", b"2\n")
        .member("tests/02", b"2 2\n")
        .member("tests/02.a", b"4\n")
        .member("tests/03", b"3 3\n")
        .member("tests/03.a", b"6\n")
}
