//! Command-line interface definitions and parsing
//!
//! This module defines the CLI structure for tagtree using the `clap` crate.
//!
//! # Commands
//!
//! - **index**: scan a root and cache its tree
//! - **rescan**: rebuild one or all cached trees
//! - **search**: find files by name pattern and `@tag`
//! - **cleanup**: print the shell steps flattening single-file folders
//! - **gather**: print the shell steps moving tagged entries into a tag folder
//! - **show** / **roots** / **dump**: inspect the cache
//! - **config**: read and write settings

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "tagtree")]
#[command(about = "Cached trees of tagged files", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Log debug diagnostics to stderr
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Cache file to use instead of the configured one
    #[arg(long = "cache", value_name = "FILE", global = true)]
    pub cache: Option<PathBuf>,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Scan a directory and cache its tree
    #[command(visible_alias = "i")]
    Index {
        /// Directory to scan
        #[arg(value_name = "ROOT")]
        root: PathBuf,

        /// Only descend into top-level entries carrying one of these tags
        #[arg(short = 't', long = "filter-tag", value_name = "TAG")]
        filter_tags: Vec<String>,

        /// Record size and modification time of every entry
        #[arg(long = "stat")]
        stat: bool,
    },

    /// Rebuild cached trees from the filesystem
    Rescan {
        /// Only rescan this root
        #[arg(value_name = "ROOT")]
        root: Option<PathBuf>,
    },

    /// Write the whole cache to a file (JSON when it ends in .json)
    Dump {
        /// Destination file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print cached trees
    Show {
        /// Only print this root
        #[arg(value_name = "ROOT")]
        root: Option<PathBuf>,
    },

    /// List cached roots
    Roots,

    /// Search cached trees
    #[command(visible_alias = "s")]
    Search {
        /// Name patterns (regex) and @tags; all must match
        #[arg(value_name = "TERM", required = true)]
        terms: Vec<String>,

        /// Skip files fewer than N levels below their root
        #[arg(short = 'd', long = "min-depth", value_name = "N")]
        min_depth: Option<usize>,

        /// Match name patterns case-sensitively
        #[arg(short = 'c', long = "case-sensitive")]
        case_sensitive: bool,

        /// Sort alphanumerically instead of by date stamp
        #[arg(long = "no-date-sort")]
        no_date_sort: bool,

        /// Keep covers, samples and other junk in the results
        #[arg(long = "include-junk")]
        include_junk: bool,

        /// Only search this root
        #[arg(short = 'r', long = "root", value_name = "ROOT")]
        root: Option<PathBuf>,
    },

    /// Print the shell steps flattening tagged single-file folders
    Cleanup {
        /// Only consider folders with this tag
        #[arg(short = 't', long = "tag", value_name = "TAG")]
        tag: Option<String>,

        /// Only consider this root
        #[arg(short = 'r', long = "root", value_name = "ROOT")]
        root: Option<PathBuf>,
    },

    /// Print the shell steps moving entries with a tag into a folder named after it
    Gather {
        /// Tag to gather; also the name of the folder
        #[arg(value_name = "TAG")]
        tag: String,

        /// Only consider this root
        #[arg(short = 'r', long = "root", value_name = "ROOT")]
        root: Option<PathBuf>,
    },

    /// Manage configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Configuration management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Set a configuration value
    Set {
        /// Configuration key=value (e.g., quiet=true)
        #[arg(value_name = "KEY=VALUE")]
        setting: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key to retrieve (e.g., quiet)
        #[arg(value_name = "KEY")]
        key: String,
    },
}

impl Cli {
    /// Parse command-line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
