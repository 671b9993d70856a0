// src/cli.rs

//! Command line interface definitions using clap

use std::path::PathBuf;

use clap::Parser;

use polykat::{Language, License, Phase};

#[derive(Parser)]
#[command(name = "polykat")]
#[command(author, version, about = "Convert Polygon problem packages to the problemtools layout", long_about = None)]
pub struct Cli {
    /// Polygon full package (ZIP with problem.xml at its root)
    pub package: PathBuf,

    /// Output problem directory
    #[arg(short = 'o', long)]
    pub out_dir: PathBuf,

    /// Statement language
    #[arg(long, default_value = "en")]
    pub lang: Language,

    /// License recorded in problem.yaml
    #[arg(long, default_value = "cc by-sa")]
    pub license: License,

    /// Write problem.yaml (off by default so a hand-edited file survives)
    #[arg(long)]
    pub write_problem_yaml: bool,

    /// Comma-separated phases to run instead of the default set
    /// (statement,tests,solutions,checker,metadata)
    #[arg(long, value_delimiter = ',')]
    pub phases: Option<Vec<Phase>>,

    /// Record test generation scripts and export generator sources
    #[arg(long)]
    pub test_generation_info: bool,

    /// testlib.h to copy next to custom checkers and validators
    #[arg(long, default_value = "testlib.h", value_name = "FILE")]
    pub testlib: PathBuf,

    /// Symlink testlib.h to this target instead of copying
    #[arg(long, value_name = "TARGET", conflicts_with = "testlib")]
    pub link_testlib: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
