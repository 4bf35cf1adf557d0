//! Command-line arguments for the record scanner.
//!
//! Uses the `clap` derive API.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "record-scanner",
    version,
    about = "Scan free-text record responses into a key/value AST."
)]
pub struct ScannerArgs {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scan a file with the default rule set and print the AST.
    Scan {
        /// The response body to scan.
        #[arg(required = true)]
        file: PathBuf,
        /// Output format.
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,
        /// YAML file with scanner settings.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Characters of unconsumed input shown on failure; overrides the config file.
        #[arg(long)]
        snippet_limit: Option<usize>,
    },
    /// List the default rules in the order they are tried.
    Rules,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
    Text,
}
