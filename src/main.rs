// src/main.rs

//! polykat - Polygon to problemtools package converter

use std::collections::BTreeSet;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use polykat::{ConvertOptions, Converter, Phase, ProblemPackage, SupportHeader};

mod cli;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    info!(
        "converting {} -> {}",
        cli.package.display(),
        cli.out_dir.display()
    );
    let package = ProblemPackage::open(&cli.package)?;
    let options = options_from_cli(&cli);
    let mut converter = Converter::new(package, &cli.out_dir, options)?;
    converter.run()?;

    println!("Problem written to {}", cli.out_dir.display());
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();
}

fn options_from_cli(cli: &Cli) -> ConvertOptions {
    let mut phases: BTreeSet<Phase> = match &cli.phases {
        Some(selected) => selected.iter().copied().collect(),
        None => Phase::default_set(),
    };
    if cli.write_problem_yaml {
        phases.insert(Phase::Metadata);
    }

    let support_header = match &cli.link_testlib {
        Some(target) => SupportHeader::Symlink(target.clone()),
        None => SupportHeader::Copy(cli.testlib.clone()),
    };

    ConvertOptions {
        lang: cli.lang,
        license: cli.license,
        phases,
        test_generation_info: cli.test_generation_info,
        support_header,
        ..ConvertOptions::default()
    }
}
