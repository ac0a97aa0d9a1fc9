//! CLI definitions and parsing

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// varsift - threshold-driven filtering for VCF variant streams
#[derive(Parser, Debug)]
#[command(name = "varsift")]
#[command(version)]
#[command(about = "Partition VCF variant streams with per-field threshold filters")]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Partition a VCF into passing and rejected records
    Filter(FilterArgs),

    /// Compile filter settings and report problems without reading records
    Check(CheckArgs),

    /// Print the built-in mpileup VCF 4.1 filter table as TOML
    Defaults,
}

#[derive(Args, Debug)]
pub struct FilterArgs {
    /// Input VCF path, or '-' for stdin
    pub input: PathBuf,

    /// Where to write passing records (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Where to write rejected records (discarded when omitted)
    #[arg(long)]
    pub rejected: Option<PathBuf>,

    /// Override the quality-gate threshold
    #[arg(short, long)]
    pub quality: Option<f64>,

    /// Add a filter as KEY<THRESHOLD>, e.g. 'MQ<30' (repeatable; replaces
    /// any default with the same key)
    #[arg(short = 'f', long = "filter", value_name = "EXPR")]
    pub filters: Vec<String>,

    /// TOML settings file replacing the built-in table entirely
    #[arg(long, value_name = "FILE")]
    pub filter_file: Option<PathBuf>,

    /// Proceed on unrecognised VCF flavors using only supplied filters
    #[arg(long)]
    pub force: bool,

    /// Print the run summary as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Override the quality-gate threshold
    #[arg(short, long)]
    pub quality: Option<f64>,

    /// Add a filter as KEY<THRESHOLD>, e.g. 'MQ<30' (repeatable)
    #[arg(short = 'f', long = "filter", value_name = "EXPR")]
    pub filters: Vec<String>,

    /// TOML settings file replacing the built-in table entirely
    #[arg(long, value_name = "FILE")]
    pub filter_file: Option<PathBuf>,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
