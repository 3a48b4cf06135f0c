// src/cli/args.rs
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::render::OutputFormat;

#[derive(Parser)]
#[command(name = "contextmap", version, about = "Token-budgeted repository maps")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
    /// Print debug logs to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the ranked signature map and write it to context.txt
    Map(MapArgs),
    /// Print the top-ranked files
    Rank(RankArgs),
}

/// What to scan and how to bias the ranking.
#[derive(Args, Debug, Clone)]
pub struct ScopeArgs {
    /// Project root
    #[arg(default_value = ".")]
    pub root: PathBuf,
    /// Feature to boost, e.g. "booking"
    #[arg(long, short)]
    pub feature: Option<String>,
    /// Path hint to boost; repeatable
    #[arg(long = "domain", short = 'd', value_name = "HINT")]
    pub domains: Vec<String>,
    /// File to centre the ranking on; repeatable
    #[arg(long, value_name = "FILE")]
    pub focus: Vec<PathBuf>,
    /// Only scan these directories (relative to the root)
    #[arg(long, value_name = "DIR")]
    pub include: Vec<String>,
    /// Skip directories with this name
    #[arg(long, value_name = "DIR")]
    pub exclude: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct MapArgs {
    #[command(flatten)]
    pub scope: ScopeArgs,
    /// Token budget (overrides contextmap.toml)
    #[arg(long, short)]
    pub budget: Option<usize>,
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
    /// Show rank scores next to each file
    #[arg(long)]
    pub scores: bool,
    /// Print to stdout instead of writing context.txt
    #[arg(long, short)]
    pub stdout: bool,
}

#[derive(Args, Debug, Clone)]
pub struct RankArgs {
    #[command(flatten)]
    pub scope: ScopeArgs,
    /// Number of files to show
    #[arg(long, short = 'n', default_value_t = 20)]
    pub top: usize,
}
