//! Command-line arguments

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Look up, audit and reformat Qt Linguist `.ts` translation catalogs
#[derive(Debug, Parser)]
#[command(name = "tscat", version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (default: $TSCAT_CONFIG_PATH, then ./tscat.yaml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Translate one message, falling back to the source text
    Lookup(LookupArgs),

    /// Report placeholder, numerus and duplicate problems; fails if any
    Check {
        /// Resource to audit
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print completion statistics
    Stats {
        /// Resource to count
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Rewrite a resource in canonical layout
    Fmt {
        /// Resource to format
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Write here instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

/// Arguments of `tscat lookup`
#[derive(Debug, Args)]
pub struct LookupArgs {
    /// Context name
    pub context: String,

    /// Source text
    pub source: String,

    /// Values for %1, %2, ...
    #[arg(value_name = "ARGS")]
    pub args: Vec<String>,

    /// Read this resource instead of the configured translations directory
    #[arg(short, long, value_name = "FILE", conflicts_with = "language")]
    pub file: Option<PathBuf>,

    /// Language to load from the translations directory
    #[arg(short, long, value_name = "LANG")]
    pub language: Option<String>,

    /// Disambiguation comment
    #[arg(short, long)]
    pub comment: Option<String>,

    /// Count for numerus messages; replaces %n
    #[arg(short = 'n', long, allow_negative_numbers = true)]
    pub count: Option<i64>,
}
