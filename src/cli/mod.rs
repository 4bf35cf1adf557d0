//! The record scanner command-line interface.
//!
//! Reads a response body from disk, scans it with the default rule set and
//! prints the AST. Scan failures are rendered as `miette` reports.

use std::{fs, path::Path, process};

use clap::Parser;
use miette::{IntoDiagnostic, WrapErr};
use tracing::Level;

use crate::cli::args::{Command, OutputFormat, ScannerArgs};
use crate::config::ScannerConfig;
use crate::ruleset::RuleSet;
use crate::scanner::Scanner;

pub mod args;
pub mod output;

/// The main entry point for the CLI.
pub fn run() {
    let args = ScannerArgs::parse();
    init_tracing(args.verbose);

    let result = match args.command {
        Command::Scan {
            file,
            format,
            config,
            snippet_limit,
        } => handle_scan(&file, format, config.as_deref(), snippet_limit),
        Command::Rules => output::print_rules(&RuleSet::default()).into_diagnostic(),
    };

    if let Err(report) = result {
        eprintln!("{:?}", report);
        process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolves the scanner settings: config file first, then command-line overrides.
fn load_config(path: Option<&Path>, snippet_limit: Option<usize>) -> miette::Result<ScannerConfig> {
    let mut config = match path {
        Some(path) => {
            let yaml = fs::read_to_string(path)
                .into_diagnostic()
                .wrap_err_with(|| format!("failed to read config {}", path.display()))?;
            ScannerConfig::from_yaml_str(&yaml)?
        }
        None => ScannerConfig::default(),
    };
    if let Some(limit) = snippet_limit {
        config = config.with_snippet_limit(limit);
        config.validate()?;
    }
    Ok(config)
}

fn handle_scan(
    path: &Path,
    format: OutputFormat,
    config: Option<&Path>,
    snippet_limit: Option<usize>,
) -> miette::Result<()> {
    let config = load_config(config, snippet_limit)?;
    let text = fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to read {}", path.display()))?;

    let scanner = Scanner::default().with_config(config);
    let ast = scanner.parse(&text)?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&ast).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(&ast).into_diagnostic()?;
            print!("{}", yaml);
        }
        OutputFormat::Text => output::print_text(&ast).into_diagnostic()?,
    }
    Ok(())
}
