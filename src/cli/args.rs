//! CLI argument definitions using clap
//!
//! Commands:
//! - shapeguard demo
//! - shapeguard project --schema <name> [--omit a,b | --pick a,b]
//! - shapeguard instantiate --schema <name> [--omit a,b | --pick a,b] [--lenient | --strict]

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::projection::Selection;

/// shapeguard - construction-time field projection for data schemas
#[derive(Parser, Debug)]
#[command(name = "shapeguard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Minimum log severity (trace, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Contrast serialization-time exclusion with schema projection
    Demo,

    /// Print a projected schema as JSON
    Project {
        #[command(flatten)]
        target: ProjectionArgs,
    },

    /// Validate a JSON record from stdin against a (projected) schema
    Instantiate {
        #[command(flatten)]
        target: ProjectionArgs,

        /// Drop undeclared keys instead of rejecting them
        #[arg(long)]
        lenient: bool,

        /// Reject undeclared keys, overriding the config file
        #[arg(long, conflicts_with = "lenient")]
        strict: bool,
    },
}

#[derive(Args, Debug)]
pub struct ProjectionArgs {
    /// Directory holding schema JSON files
    #[arg(long)]
    pub schema_dir: Option<PathBuf>,

    /// Name of the source schema
    #[arg(long)]
    pub schema: String,

    /// Comma-separated fields to exclude
    #[arg(long, value_delimiter = ',', num_args = 0.., conflicts_with = "pick")]
    pub omit: Option<Vec<String>>,

    /// Comma-separated fields to keep
    #[arg(long, value_delimiter = ',', num_args = 0..)]
    pub pick: Option<Vec<String>>,
}

impl ProjectionArgs {
    /// The requested selection, if any
    pub fn selection(&self) -> Option<Selection> {
        match (&self.omit, &self.pick) {
            (Some(names), _) => Some(Selection::omit(names.iter().map(|n| n.trim()))),
            (None, Some(names)) => Some(Selection::pick(names.iter().map(|n| n.trim()))),
            (None, None) => None,
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
