//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// docdex search-index generator CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory (default: current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Markdown source directory (relative to project root)
    #[arg(short, long)]
    pub content: Option<PathBuf>,

    /// Output directory path (relative to project root)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Config file name (default: docdex.toml)
    #[arg(short = 'C', long, default_value = "docdex.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Create a config file and a sample page
    Init {
        /// the name(path) of the project directory, related to `root`
        name: Option<PathBuf>,
    },

    /// Scan the sources and write the search index
    Build {
        /// Override the JavaScript variable name of the artifact
        #[arg(long)]
        variable: Option<String>,
    },

    /// Load a search index, validate it and print statistics
    Check {
        /// Artifact to check (default: the configured output artifact)
        file: Option<PathBuf>,
    },

    /// Query a search index
    Search {
        /// Search terms
        query: String,

        /// Maximum number of hits
        #[arg(short, long)]
        limit: Option<usize>,

        /// Artifact to search (default: the configured output artifact)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

impl Cli {
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Commands::Init { .. })
    }
    pub const fn is_build(&self) -> bool {
        matches!(self.command, Commands::Build { .. })
    }
}
